// src/pipeline/mod.rs
use anyhow::{ensure, Context, Result};
use glob::glob;
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{info, instrument};

use crate::{config::SplitConfig, expand::expand_table, table::Table};

/// Totals for one full run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub files: usize,
    pub columns: usize,
}

/// List source files carrying the configured extension.
pub fn enumerate_files(config: &SplitConfig) -> Result<Vec<PathBuf>> {
    ensure!(
        config.source_dir.is_dir(),
        "source directory {} does not exist or is not a directory",
        config.source_dir.display()
    );
    let pattern = format!(
        "{}/*.{}",
        config.source_dir.display(),
        config.file_extension
    );
    let mut files = Vec::new();
    for entry in glob(&pattern).context("invalid glob pattern for source directory")? {
        let path = entry.context("reading source directory entry")?;
        if path.is_file() {
            files.push(path);
        }
    }
    Ok(files)
}

/// Load one file, expand its sequence columns, and write the result under
/// the destination directory. Returns the number of expanded columns.
#[instrument(level = "info", skip(config, path), fields(file = %path.display()))]
pub fn process_file(config: &SplitConfig, path: &Path) -> Result<usize> {
    let mut table = Table::from_csv_path(path)?;
    let shapes = expand_table(&mut table, config)?;
    let out_path = config.output_path(path);
    table.write_csv_path(&out_path)?;
    info!(out = %out_path.display(), columns = shapes.len(), "wrote output");
    Ok(shapes.len())
}

/// Run the whole batch: files are handled one at a time in enumeration
/// order, and the first failure aborts the run.
pub fn run(config: &SplitConfig) -> Result<RunSummary> {
    fs::create_dir_all(&config.dest_dir).with_context(|| {
        format!(
            "creating destination directory {}",
            config.dest_dir.display()
        )
    })?;

    let files = enumerate_files(config)?;
    if files.is_empty() {
        info!(dir = %config.source_dir.display(), "no matching files; nothing to do");
        return Ok(RunSummary::default());
    }

    let mut summary = RunSummary::default();
    for path in &files {
        info!(file = %path.display(), "processing file");
        summary.columns += process_file(config, path)?;
        summary.files += 1;
    }
    Ok(summary)
}
