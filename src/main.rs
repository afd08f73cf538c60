use anyhow::{bail, Context, Result};
use clap::Parser;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::time::Instant;

use playlist_stats::playlist::playlist_id_from_url;
use playlist_stats::progress::{create_progress_bar, format_duration, log_progress, set_log_only};
use playlist_stats::safety::{validate_output_dir, validate_output_path};
use playlist_stats::{calculate_statistics, PlaylistExport, StatisticsResult, StatsOptions};

#[derive(Parser)]
#[command(name = "playlist-stats")]
#[command(about = "Compute statistical summaries of fetched playlist exports")]
struct Args {
    /// Playlist export JSON file, or a directory of them
    source: PathBuf,

    /// Stats JSON file, or an output directory when source is a directory
    output: PathBuf,

    #[arg(long, default_value = "0")]
    workers: usize,

    /// Number of most/least popular tracks to list
    #[arg(long, default_value = "5")]
    ranking_size: usize,

    /// Number of top genres to list
    #[arg(long, default_value = "10")]
    top_genres: usize,

    /// Hide progress bars and log progress lines instead
    #[arg(long)]
    log_only: bool,

    /// Write single-line JSON instead of pretty-printed
    #[arg(long)]
    compact: bool,
}

const LOG_INTERVAL: u64 = 100;

fn load_export(path: &Path) -> Result<PlaylistExport> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse playlist export {}", path.display()))
}

fn write_stats(path: &Path, stats: &StatisticsResult, compact: bool) -> Result<()> {
    let json = if compact {
        serde_json::to_string(stats)?
    } else {
        serde_json::to_string_pretty(stats)?
    };
    std::fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))
}

/// `<playlist id>.stats.json` when the export carries a playlist URL,
/// otherwise `<source file stem>.stats.json`.
fn output_file_name(export: &PlaylistExport, source: &Path) -> String {
    let stem = export
        .playlist_url
        .as_deref()
        .and_then(playlist_id_from_url)
        .map(str::to_string)
        .unwrap_or_else(|| {
            source
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| "playlist".to_string())
        });
    format!("{}.stats.json", stem)
}

fn summarize_to(
    export: &PlaylistExport,
    source: &Path,
    output: &Path,
    options: &StatsOptions,
    compact: bool,
) -> Result<StatisticsResult> {
    let stats = calculate_statistics(export, options)
        .with_context(|| format!("Cannot summarize {}", source.display()))?;
    write_stats(output, &stats, compact)?;
    Ok(stats)
}

fn process_file(
    source: &Path,
    output: &Path,
    options: &StatsOptions,
    compact: bool,
) -> Result<StatisticsResult> {
    let export = load_export(source)?;
    summarize_to(&export, source, output, options, compact)
}

fn list_exports(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = std::fs::read_dir(dir)
        .with_context(|| format!("Failed to list {}", dir.display()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.is_file() && p.extension().is_some_and(|ext| ext == "json"))
        .filter(|p| !p.to_string_lossy().ends_with(".stats.json"))
        .collect();
    files.sort();
    Ok(files)
}

fn run_single(args: &Args, options: &StatsOptions) -> Result<()> {
    validate_output_path(&args.output, "stats", &[&args.source])?;

    let stats = process_file(&args.source, &args.output, options, args.compact)?;

    println!("Summarized {} tracks -> {:?}", stats.num_tracks, args.output);
    Ok(())
}

fn run_batch(args: &Args, options: &StatsOptions) -> Result<()> {
    validate_output_dir(&args.output, &[&args.source])?;
    std::fs::create_dir_all(&args.output)
        .with_context(|| format!("Failed to create {}", args.output.display()))?;

    let files = list_exports(&args.source)?;
    let total = files.len() as u64;
    log::info!("[BATCH] {} exports in {:?}", total, args.source);

    let pb = create_progress_bar(total, "Summarizing playlists");
    let done = std::sync::atomic::AtomicU64::new(0);

    let failures: Vec<(PathBuf, anyhow::Error)> = files
        .par_iter()
        .filter_map(|source| {
            let result = load_export(source).and_then(|export| {
                let output = args.output.join(output_file_name(&export, source));
                summarize_to(&export, source, &output, options, args.compact)
            });

            pb.inc(1);
            let current = done.fetch_add(1, std::sync::atomic::Ordering::Relaxed) + 1;
            log_progress("BATCH", current, total, LOG_INTERVAL);

            result.err().map(|err| (source.clone(), err))
        })
        .collect();
    pb.finish_and_clear();

    for (source, err) in &failures {
        log::error!("[BATCH] {}: {:#}", source.display(), err);
    }

    println!(
        "Summarized {}/{} playlists -> {:?}",
        files.len() - failures.len(),
        files.len(),
        args.output
    );

    if !failures.is_empty() {
        bail!("{} of {} exports failed", failures.len(), files.len());
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    set_log_only(args.log_only);

    if args.workers > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(args.workers)
            .build_global()
            .context("Failed to set thread pool size")?;
    }

    let options = StatsOptions {
        ranking_size: args.ranking_size,
        top_genres: args.top_genres,
    };

    let start = Instant::now();
    if args.source.is_dir() {
        run_batch(&args, &options)?;
    } else {
        run_single(&args, &options)?;
    }
    log::info!("Elapsed: {}", format_duration(start.elapsed()));

    Ok(())
}
