// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Library store — list, resolve and delete the PDFs under the current root.
//
// The root is held by a single `LibraryStore` value and read afresh by every
// operation; nothing about the folder's contents is cached between calls.

use std::path::{Component, Path, PathBuf};

use chrono::{DateTime, Utc};
use pagewright_core::error::{PagewrightError, Result};
use pagewright_core::types::LibraryEntry;
use tracing::{debug, info, instrument, warn};

use crate::data_dir;

const PDF_SUFFIX: &str = ".pdf";

/// The folder of generated PDFs.
#[derive(Debug, Clone)]
pub struct LibraryStore {
    root: PathBuf,
    /// The default root is recreated on use if it has gone missing; a custom
    /// root never is.
    is_default: bool,
}

impl LibraryStore {
    /// Open the library at an existing folder.
    pub fn open(root: impl AsRef<Path>) -> Result<Self> {
        let root = validate_root(root.as_ref())?;
        Ok(Self {
            root,
            is_default: false,
        })
    }

    /// Open the library at the default folder, creating it if absent.
    pub fn open_default() -> Result<Self> {
        Self::from_default_root(data_dir::default_root()?)
    }

    /// Open the library at the default folder under `data_dir`.
    pub fn open_default_in(data_dir: &Path) -> Result<Self> {
        Self::from_default_root(data_dir::default_root_in(data_dir)?)
    }

    fn from_default_root(root: PathBuf) -> Result<Self> {
        let root = std::path::absolute(&root)?;
        info!(path = %root.display(), "using default library folder");
        Ok(Self {
            root,
            is_default: true,
        })
    }

    /// The current root folder.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Whether the store is using the default folder.
    pub fn is_default(&self) -> bool {
        self.is_default
    }

    /// Return the root, ready to be written into. The default root is
    /// recreated if it has been removed since startup.
    pub fn prepare(&self) -> Result<&Path> {
        if self.is_default && !self.root.is_dir() {
            warn!(path = %self.root.display(), "default library folder missing, recreating");
            std::fs::create_dir_all(&self.root)?;
        }
        Ok(&self.root)
    }

    /// Point the library at another existing folder.
    ///
    /// The folder is never created. On failure the current root is kept.
    #[instrument(skip_all, fields(new_root = %new_root.as_ref().display()))]
    pub fn set_root(&mut self, new_root: impl AsRef<Path>) -> Result<()> {
        let root = validate_root(new_root.as_ref())?;
        info!(from = %self.root.display(), to = %root.display(), "library folder changed");
        self.root = root;
        self.is_default = false;
        Ok(())
    }

    /// All PDFs in the root, in the order the filesystem enumerates them.
    #[instrument(skip(self), fields(root = %self.root.display()))]
    pub fn list(&self) -> Result<Vec<LibraryEntry>> {
        let root = self.prepare()?;
        let read_dir = std::fs::read_dir(root).map_err(|err| PagewrightError::InvalidRoot {
            path: root.to_path_buf(),
            reason: err.to_string(),
        })?;

        let mut entries = Vec::new();
        for dir_entry in read_dir {
            let dir_entry = dir_entry?;
            let Some(filename) = dir_entry.file_name().to_str().map(str::to_string) else {
                debug!(name = ?dir_entry.file_name(), "skipping non UTF-8 file name");
                continue;
            };
            if !filename.ends_with(PDF_SUFFIX) {
                continue;
            }
            // Follows symlinks, unlike `DirEntry::metadata`.
            let Ok(metadata) = std::fs::metadata(dir_entry.path()) else {
                continue;
            };
            if !metadata.is_file() {
                continue;
            }
            entries.push(LibraryEntry {
                filename,
                path: dir_entry.path(),
                size_bytes: metadata.len(),
                modified: metadata.modified().ok().map(DateTime::<Utc>::from),
            });
        }

        debug!(count = entries.len(), "library listed");
        Ok(entries)
    }

    /// [`list`](Self::list), sorted by file name.
    pub fn list_sorted(&self) -> Result<Vec<LibraryEntry>> {
        let mut entries = self.list()?;
        entries.sort_by(|a, b| a.filename.cmp(&b.filename));
        Ok(entries)
    }

    /// Path a library member with this name would have. Does not check that
    /// it exists.
    pub fn resolve(&self, filename: &str) -> Result<PathBuf> {
        check_entry_name(filename)?;
        Ok(self.root.join(filename))
    }

    /// Look up a single library member.
    pub fn entry(&self, filename: &str) -> Result<LibraryEntry> {
        let path = self.resolve(filename)?;
        match std::fs::metadata(&path) {
            Ok(metadata) if metadata.is_file() => Ok(LibraryEntry {
                filename: filename.to_string(),
                path,
                size_bytes: metadata.len(),
                modified: metadata.modified().ok().map(DateTime::<Utc>::from),
            }),
            Ok(_) => Err(PagewrightError::NotFound(filename.to_string())),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                Err(PagewrightError::NotFound(filename.to_string()))
            }
            Err(err) => Err(err.into()),
        }
    }

    pub fn contains(&self, filename: &str) -> bool {
        self.entry(filename).is_ok()
    }

    /// Remove a PDF from the library. Immediate and irreversible.
    #[instrument(skip(self), fields(root = %self.root.display()))]
    pub fn delete(&self, filename: &str) -> Result<()> {
        let entry = self.entry(filename)?;
        match std::fs::remove_file(&entry.path) {
            Ok(()) => {
                info!(file = filename, "deleted from library");
                Ok(())
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                Err(PagewrightError::NotFound(filename.to_string()))
            }
            Err(err) => Err(err.into()),
        }
    }
}

fn validate_root(path: &Path) -> Result<PathBuf> {
    let invalid = |reason: &str| PagewrightError::InvalidRoot {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    };
    match std::fs::metadata(path) {
        Ok(metadata) if metadata.is_dir() => {
            std::path::absolute(path).map_err(|err| invalid(&err.to_string()))
        }
        Ok(_) => Err(invalid("not a directory")),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Err(invalid("does not exist")),
        Err(err) => Err(invalid(&err.to_string())),
    }
}

/// A library member name is a single plain path component ending in `.pdf`.
fn check_entry_name(filename: &str) -> Result<()> {
    let mut components = Path::new(filename).components();
    let single_normal = matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    );
    if !single_normal
        || filename.contains(['/', '\\'])
        || !filename.ends_with(PDF_SUFFIX)
    {
        return Err(PagewrightError::InvalidEntryName(filename.to_string()));
    }
    Ok(())
}
