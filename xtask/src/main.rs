use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use walkdir::WalkDir;

#[derive(Parser)]
#[command(author, version, about = "Project automation commands", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run cargo nextest with default configuration
    Nextest {
        #[arg(long)]
        profile: Option<String>,
        #[arg(long)]
        release: bool,
    },
    /// Scaffold the built-in layout twice in a scratch directory and check nothing changes
    Smoke,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Nextest { profile, release } => run_nextest(profile, release)?,
        Commands::Smoke => run_smoke()?,
    }
    Ok(())
}

fn run_nextest(profile: Option<String>, release: bool) -> Result<()> {
    let mut cmd = Command::new("cargo");
    cmd.arg("nextest").arg("run");
    if let Some(profile) = profile {
        cmd.arg("--profile").arg(profile);
    }
    if release {
        cmd.arg("--release");
    }
    let status = cmd.status()?;
    if !status.success() {
        anyhow::bail!("cargo nextest run failed");
    }
    Ok(())
}

fn run_smoke() -> Result<()> {
    let metadata = cargo_metadata::MetadataCommand::new()
        .no_deps()
        .exec()
        .context("failed to read cargo metadata")?;
    let manifest = metadata.workspace_root.join("Cargo.toml");
    let scratch = tempfile::tempdir().context("failed to create scratch directory")?;

    run_scaffold(manifest.as_std_path(), scratch.path())?;
    let first = snapshot(scratch.path())?;
    run_scaffold(manifest.as_std_path(), scratch.path())?;
    let second = snapshot(scratch.path())?;

    if first != second {
        anyhow::bail!("second scaffold run changed the tree");
    }
    println!("smoke ok: {} entries, second run was a no-op", first.len());
    Ok(())
}

fn run_scaffold(manifest: &Path, root: &Path) -> Result<()> {
    let status = Command::new("cargo")
        .args(["run", "--quiet", "-p", "scaffold", "--manifest-path"])
        .arg(manifest)
        .arg("--")
        .arg("--root")
        .arg(root)
        .status()?;
    if !status.success() {
        anyhow::bail!("scaffold exited with {status}");
    }
    Ok(())
}

/// Relative path -> (is_dir, size) for everything under `root`.
fn snapshot(root: &Path) -> Result<BTreeMap<PathBuf, (bool, u64)>> {
    let mut tree = BTreeMap::new();
    for entry in WalkDir::new(root).min_depth(1) {
        let entry = entry?;
        let meta = entry.metadata()?;
        let rel = entry.path().strip_prefix(root)?.to_path_buf();
        tree.insert(rel, (meta.is_dir(), if meta.is_dir() { 0 } else { meta.len() }));
    }
    Ok(tree)
}
