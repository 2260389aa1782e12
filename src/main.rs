use anyhow::Result;
use std::{env, path::PathBuf};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};
use vecsplit::{config::SplitConfig, pipeline};

const USAGE: &str = "Usage: vecsplit <SOURCE_DIR> <DEST_DIR> [EXTENSION] [PREFIX]";

fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env_filter).init();

    // ─── 2) build config ─────────────────────────────────────────────
    let mut args = env::args().skip(1);
    let source_dir = PathBuf::from(args.next().expect(USAGE));
    let dest_dir = PathBuf::from(args.next().expect(USAGE));
    let mut config = SplitConfig::new(source_dir, dest_dir);
    if let Some(extension) = args.next() {
        config.file_extension = extension;
    }
    if let Some(prefix) = args.next() {
        config.output_prefix = prefix;
    }
    info!(
        source = %config.source_dir.display(),
        dest = %config.dest_dir.display(),
        extension = %config.file_extension,
        "startup"
    );

    // ─── 3) run the split ────────────────────────────────────────────
    let summary = pipeline::run(&config)?;
    info!(files = summary.files, columns = summary.columns, "all done");
    Ok(())
}
