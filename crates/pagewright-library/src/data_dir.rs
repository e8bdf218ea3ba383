// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Platform-aware data directory resolution.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use pagewright_core::error::Result;
use tracing::debug;

/// Environment variable that overrides the data directory outright.
pub const DATA_DIR_ENV: &str = "PAGEWRIGHT_DATA_DIR";

/// Name of the default library folder inside the data directory.
pub const DEFAULT_LIBRARY_DIR: &str = "SavedPDFs";

/// Return the application data directory, creating it if needed.
pub fn data_dir() -> Result<PathBuf> {
    let dir = resolve_data_dir(
        std::env::var_os(DATA_DIR_ENV),
        std::env::var_os("XDG_DATA_HOME"),
        std::env::var_os("HOME"),
    );
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Return the default library folder, creating it if needed.
pub fn default_root() -> Result<PathBuf> {
    default_root_in(&data_dir()?)
}

/// The default library folder under `data_dir`, created if absent.
pub fn default_root_in(data_dir: &Path) -> Result<PathBuf> {
    let dir = data_dir.join(DEFAULT_LIBRARY_DIR);
    if !dir.is_dir() {
        debug!(path = %dir.display(), "creating default library folder");
    }
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

fn resolve_data_dir(
    override_dir: Option<OsString>,
    xdg_data_home: Option<OsString>,
    home: Option<OsString>,
) -> PathBuf {
    if let Some(dir) = override_dir.filter(|d| !d.is_empty()) {
        return PathBuf::from(dir);
    }
    // Try XDG data dir, then fallback to home
    let base = if let Some(xdg) = xdg_data_home.filter(|d| !d.is_empty()) {
        PathBuf::from(xdg)
    } else if let Some(home) = home.filter(|d| !d.is_empty()) {
        PathBuf::from(home).join(".local").join("share")
    } else {
        // Last resort
        std::env::temp_dir()
    };
    base.join("pagewright")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn override_wins() {
        let dir = resolve_data_dir(
            Some("/opt/pw".into()),
            Some("/xdg".into()),
            Some("/home/u".into()),
        );
        assert_eq!(dir, PathBuf::from("/opt/pw"));
    }

    #[test]
    fn xdg_then_home() {
        assert_eq!(
            resolve_data_dir(None, Some("/xdg".into()), Some("/home/u".into())),
            PathBuf::from("/xdg/pagewright")
        );
        assert_eq!(
            resolve_data_dir(None, Some("".into()), Some("/home/u".into())),
            PathBuf::from("/home/u/.local/share/pagewright")
        );
    }

    #[test]
    fn default_root_is_created_on_first_use() {
        let base = tempfile::tempdir().expect("tempdir");
        let expected = base.path().join(DEFAULT_LIBRARY_DIR);
        assert!(!expected.exists());

        let root = default_root_in(base.path()).expect("default root");
        assert_eq!(root, expected);
        assert!(root.is_dir());

        // Second call is a no-op.
        assert_eq!(default_root_in(base.path()).expect("again"), expected);
    }
}
