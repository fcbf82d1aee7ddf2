//! Domain models for layout entries and scaffold outcomes.

use std::ffi::OsStr;
use std::fmt;
use std::path::{Component, Path, PathBuf};

use crate::domain::errors::DomainError;

/// A single relative file path that the scaffold must bring into existence.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PathEntry(PathBuf);

impl PathEntry {
    /// Validate a raw layout string.
    ///
    /// Entries must be relative, must stay under the project root and must end in a file name.
    /// `.` components and repeated separators are dropped, so `./a//b.txt` becomes `a/b.txt`.
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        if raw.trim().is_empty() {
            return Err(DomainError::EmptyEntry);
        }
        if raw.ends_with('/') || raw.ends_with('\\') {
            return Err(DomainError::MissingFileName(raw.to_owned()));
        }

        let mut normalized = PathBuf::new();
        for component in Path::new(raw).components() {
            match component {
                Component::Prefix(_) | Component::RootDir => {
                    return Err(DomainError::AbsoluteEntry(raw.to_owned()));
                }
                Component::ParentDir => {
                    return Err(DomainError::ParentTraversal(raw.to_owned()));
                }
                Component::CurDir => {}
                Component::Normal(part) => normalized.push(part),
            }
        }

        if normalized.file_name().is_none() {
            return Err(DomainError::MissingFileName(raw.to_owned()));
        }

        Ok(Self(normalized))
    }

    pub fn as_path(&self) -> &Path {
        &self.0
    }

    /// Split into the directory portion (if any) and the final file name.
    pub fn split(&self) -> (Option<&Path>, &OsStr) {
        let dir = self
            .0
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty());
        // parse() guarantees a file name.
        let name = self.0.file_name().unwrap_or_default();
        (dir, name)
    }
}

impl fmt::Display for PathEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

/// Ordered set of entries making up one scaffold run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Layout {
    entries: Vec<PathEntry>,
}

impl Layout {
    pub fn new(entries: Vec<PathEntry>) -> Self {
        Self { entries }
    }

    /// Parse every raw string, failing on the first invalid entry.
    pub fn parse<I, S>(raw: I) -> Result<Self, DomainError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let entries = raw
            .into_iter()
            .map(|entry| PathEntry::parse(entry.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[PathEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// What currently sits at a target path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileState {
    /// Nothing exists at the path.
    Absent,
    /// A regular file of zero bytes.
    Empty,
    /// A regular file with content.
    Populated,
    /// A directory or other non-regular entry.
    NotAFile,
}

impl FileState {
    /// Absent and zero-byte targets are (re)created; everything else is left alone.
    pub fn needs_creation(self) -> bool {
        matches!(self, FileState::Absent | FileState::Empty)
    }
}

/// A single logged scaffold action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScaffoldEvent {
    DirectoryEnsured { dir: PathBuf, name: String },
    FileCreated { path: PathBuf },
    FileSkipped { path: PathBuf },
}

impl fmt::Display for ScaffoldEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScaffoldEvent::DirectoryEnsured { dir, name } => {
                write!(f, "Creating directory: {} for file: {name}", dir.display())
            }
            ScaffoldEvent::FileCreated { path } => {
                write!(f, "Creating empty file: {}", path.display())
            }
            ScaffoldEvent::FileSkipped { path } => {
                write!(
                    f,
                    "File already exists: {}, skipping creation.",
                    path.display()
                )
            }
        }
    }
}

/// Ordered record of everything a run did (or would do, for dry runs).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScaffoldReport {
    pub events: Vec<ScaffoldEvent>,
    pub dry_run: bool,
}

impl ScaffoldReport {
    pub fn ensured_directories(&self) -> usize {
        self.count(|event| matches!(event, ScaffoldEvent::DirectoryEnsured { .. }))
    }

    pub fn created_files(&self) -> usize {
        self.count(|event| matches!(event, ScaffoldEvent::FileCreated { .. }))
    }

    pub fn skipped_files(&self) -> usize {
        self.count(|event| matches!(event, ScaffoldEvent::FileSkipped { .. }))
    }

    /// Rendered log messages in emission order.
    pub fn messages(&self) -> Vec<String> {
        self.events.iter().map(ToString::to_string).collect()
    }

    fn count(&self, predicate: impl Fn(&ScaffoldEvent) -> bool) -> usize {
        self.events.iter().filter(|event| predicate(event)).count()
    }
}
