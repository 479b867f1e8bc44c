//! Publishes a batch of files into a directory. Every file written so far is
//! removed again unless the whole batch makes it.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use scope_exit::{create_guard, no_panic};
use tracing::{error, info, warn};

#[derive(Parser, Debug)]
#[command(about = "Publish files, rolling back partial batches")]
struct Args {
    /// Number of files to publish
    #[arg(long, default_value_t = 3)]
    files: usize,
    /// Simulate a failure before writing this file (0-based)
    #[arg(long)]
    fail_at: Option<usize>,
    /// Publish here instead of into a temporary directory
    #[arg(long)]
    output: Option<PathBuf>,
    #[arg(short, long)]
    verbose: bool,
}

fn publish(dir: &Path, files: usize, fail_at: Option<usize>) -> Result<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(files);
    let mut rollbacks = Vec::with_capacity(files);
    for i in 0..files {
        let path = dir.join(format!("part-{i}.txt"));
        anyhow::ensure!(fail_at != Some(i), "simulated failure before {}", path.display());
        fs::write(&path, format!("part {i}\n"))
            .with_context(|| format!("write {} failed", path.display()))?;

        let undo = path.clone();
        rollbacks.push(create_guard(no_panic(move || match fs::remove_file(&undo) {
            Ok(()) => info!("rolled back {}", undo.display()),
            Err(err) => warn!("rollback of {} failed: {err}", undo.display()),
        })));
        written.push(path);
    }
    // all written, keep them
    rollbacks.iter_mut().for_each(|rollback| rollback.dismiss());
    Ok(written)
}

fn main() -> Result<()> {
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_max_level(if args.verbose {
            tracing::Level::TRACE
        } else {
            tracing::Level::INFO
        })
        .init();

    let temp;
    let dir = match &args.output {
        Some(dir) => dir.clone(),
        None => {
            temp = tempfile::tempdir().context("create temp dir failed")?;
            temp.path().to_path_buf()
        }
    };

    match publish(&dir, args.files, args.fail_at) {
        Ok(written) => info!("published {} files into {}", written.len(), dir.display()),
        Err(err) => error!("publish failed: {err:#}"),
    }
    let left = fs::read_dir(&dir)
        .with_context(|| format!("read {} failed", dir.display()))?
        .count();
    info!("{left} files left in {}", dir.display());
    Ok(())
}
