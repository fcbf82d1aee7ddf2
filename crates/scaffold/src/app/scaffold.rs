//! Idempotent creation of the project skeleton.

use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::domain::model::{FileState, PathEntry, ScaffoldEvent, ScaffoldReport};

/// Walks a layout once, creating missing directories and empty files under `root`.
#[derive(Debug, Clone)]
pub struct Scaffolder {
    root: PathBuf,
    dry_run: bool,
}

impl Scaffolder {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            dry_run: false,
        }
    }

    /// Report the actions a real run would take without touching the filesystem.
    pub fn dry_run(mut self, enabled: bool) -> Self {
        self.dry_run = enabled;
        self
    }

    /// Ensure every entry exists, in order. The first I/O failure aborts the pass.
    pub fn ensure_scaffold(&self, paths: &[PathEntry]) -> Result<ScaffoldReport> {
        let mut report = ScaffoldReport {
            events: Vec::with_capacity(paths.len() * 2),
            dry_run: self.dry_run,
        };

        for entry in paths {
            self.ensure_entry(entry, &mut report)?;
        }

        tracing::debug!(
            root = %self.root.display(),
            created = report.created_files(),
            skipped = report.skipped_files(),
            dry_run = self.dry_run,
            "scaffold pass finished"
        );
        Ok(report)
    }

    fn ensure_entry(&self, entry: &PathEntry, report: &mut ScaffoldReport) -> Result<()> {
        let (dir, name) = entry.split();

        if let Some(dir) = dir {
            if !self.dry_run {
                let target_dir = self.root.join(dir);
                fs::create_dir_all(&target_dir).with_context(|| {
                    format!("failed to create directory {}", target_dir.display())
                })?;
            }
            record(
                report,
                ScaffoldEvent::DirectoryEnsured {
                    dir: dir.to_path_buf(),
                    name: name.to_string_lossy().into_owned(),
                },
            );
        }

        let target = self.root.join(entry.as_path());
        let state = inspect(&target)
            .with_context(|| format!("failed to inspect {}", target.display()))?;

        let path = entry.as_path().to_path_buf();
        if state.needs_creation() {
            if !self.dry_run {
                create_empty(&target)
                    .with_context(|| format!("failed to create file {}", target.display()))?;
            }
            record(report, ScaffoldEvent::FileCreated { path });
        } else {
            if state == FileState::NotAFile {
                tracing::debug!(path = %target.display(), "target is not a regular file");
            }
            record(report, ScaffoldEvent::FileSkipped { path });
        }
        Ok(())
    }
}

fn record(report: &mut ScaffoldReport, event: ScaffoldEvent) {
    tracing::info!("{event}");
    report.events.push(event);
}

/// Classify whatever sits at `path`, following symlinks.
pub fn inspect(path: &Path) -> io::Result<FileState> {
    match fs::metadata(path) {
        Ok(meta) if !meta.is_file() => Ok(FileState::NotAFile),
        Ok(meta) if meta.len() == 0 => Ok(FileState::Empty),
        Ok(_) => Ok(FileState::Populated),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(FileState::Absent),
        Err(err) => Err(err),
    }
}

fn create_empty(path: &Path) -> io::Result<()> {
    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)?;
    Ok(())
}
