use std::path::{Path, PathBuf};

/// Where a column's replacement columns land in the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Placement {
    /// After every untouched column, in expansion order. This is the
    /// historical layout of the tool's output.
    #[default]
    Append,
    /// At the removed column's position.
    InPlace,
}

/// Run-wide configuration, built once and passed into the pipeline entry
/// point.
#[derive(Debug, Clone)]
pub struct SplitConfig {
    pub source_dir: PathBuf,
    pub dest_dir: PathBuf,
    /// Extension (without the dot) a source file must carry.
    pub file_extension: String,
    /// Prepended to the input file name to form the output file name.
    pub output_prefix: String,
    /// How many leading rows shape inference examines. `None` scans all
    /// rows, which makes the strict expansion pass unable to fail on a
    /// well-formed file.
    pub sample_rows: Option<usize>,
    pub placement: Placement,
}

impl SplitConfig {
    pub fn new(source_dir: impl Into<PathBuf>, dest_dir: impl Into<PathBuf>) -> Self {
        Self {
            source_dir: source_dir.into(),
            dest_dir: dest_dir.into(),
            file_extension: "csv".to_string(),
            output_prefix: "Splitted_".to_string(),
            sample_rows: None,
            placement: Placement::default(),
        }
    }

    /// Output path for one input file: `{dest_dir}/{prefix}{file_name}`.
    pub fn output_path(&self, input: &Path) -> PathBuf {
        let name = input
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.dest_dir
            .join(format!("{}{}", self.output_prefix, name))
    }
}
