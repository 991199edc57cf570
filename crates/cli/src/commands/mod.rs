//! CLI command implementations.

mod check;
mod generate;
mod info;

pub use check::run_check;
pub use generate::run_generate;
pub use info::run_info;

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use discovery::SourceUnit;

/// Resolve the given inputs to a sorted list of .rs files
///
/// Directories are walked recursively; explicit file paths are taken
/// as-is. Sorting keeps discovery order deterministic across runs.
pub(crate) fn collect_source_files(inputs: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for input in inputs {
        if !input.exists() {
            bail!("Source path not found: {}", input.display());
        }
        if input.is_dir() {
            walk_dir(input, &mut files)
                .with_context(|| format!("Failed to walk directory {}", input.display()))?;
        } else {
            files.push(input.clone());
        }
    }

    files.sort();
    files.dedup();

    if files.is_empty() {
        bail!("No source files found in the given inputs");
    }

    Ok(files)
}

fn walk_dir(dir: &Path, files: &mut Vec<PathBuf>) -> std::io::Result<()> {
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            walk_dir(&path, files)?;
        } else if path.extension().and_then(|e| e.to_str()) == Some("rs") {
            files.push(path);
        }
    }
    Ok(())
}

/// Parse every resolved source file into a unit
pub(crate) fn load_units(inputs: &[PathBuf]) -> Result<Vec<SourceUnit>> {
    let files = collect_source_files(inputs)?;
    let mut units = Vec::with_capacity(files.len());

    for file in files {
        let unit = discovery::parse_path(&file)
            .with_context(|| format!("Failed to parse {}", file.display()))?;
        units.push(unit);
    }

    Ok(units)
}
