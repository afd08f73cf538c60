//! Safety checks for output paths.
//!
//! Stats are written next to the exports they come from, so a mistyped
//! argument can easily point the output at an input file.

use anyhow::{bail, Result};
use std::path::Path;

/// Validates that an output file is safe to overwrite.
///
/// Checks:
/// - Output filename must contain the required pattern (e.g., "stats")
/// - Output cannot be the same as any of the provided source paths
pub fn validate_output_path(
    output: &Path,
    required_pattern: &str,
    source_paths: &[&Path],
) -> Result<()> {
    let output_name = output.file_name().and_then(|n| n.to_str()).unwrap_or("");

    if !output_name.contains(required_pattern) {
        bail!(
            "Safety check failed: output file '{}' must contain '{}' in the name",
            output.display(),
            required_pattern
        );
    }

    ensure_distinct(output, source_paths)
}

/// Validates that an output directory is not one of the sources.
pub fn validate_output_dir(output: &Path, source_paths: &[&Path]) -> Result<()> {
    if output.is_file() {
        bail!(
            "Safety check failed: output '{}' is an existing file, expected a directory",
            output.display()
        );
    }
    ensure_distinct(output, source_paths)
}

fn ensure_distinct(output: &Path, source_paths: &[&Path]) -> Result<()> {
    for source in source_paths {
        if output == *source {
            bail!(
                "Safety check failed: output '{}' cannot be the same as source '{}'",
                output.display(),
                source.display()
            );
        }
    }
    Ok(())
}
