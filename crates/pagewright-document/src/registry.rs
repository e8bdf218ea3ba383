// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// File type registry — maps a declared type label to the extension a source
// file must carry.

use std::path::Path;

use pagewright_core::error::{PagewrightError, Result};
use pagewright_core::types::{FILE_TYPE_CATALOG, FileTypeSpec};
use tracing::debug;

/// Lookup and validation over an ordered catalog of [`FileTypeSpec`]s.
#[derive(Debug, Clone, Copy)]
pub struct TypeRegistry {
    catalog: &'static [FileTypeSpec],
}

impl TypeRegistry {
    pub fn new(catalog: &'static [FileTypeSpec]) -> Self {
        Self { catalog }
    }

    /// All types, in display order.
    pub fn types(&self) -> &'static [FileTypeSpec] {
        self.catalog
    }

    /// Find a type by its full label (`"Python File (.py)"`) or by its
    /// extension key (`"py"` / `".py"`). Case-insensitive.
    pub fn lookup(&self, label: &str) -> Option<&'static FileTypeSpec> {
        let wanted = label.trim();
        if let Some(spec) = self
            .catalog
            .iter()
            .find(|spec| spec.label.eq_ignore_ascii_case(wanted))
        {
            return Some(spec);
        }
        let key = wanted.trim_start_matches('.');
        self.catalog
            .iter()
            .find(|spec| spec.key().eq_ignore_ascii_case(key))
    }

    /// Check that `path` carries the extension required by `declared_label`.
    pub fn validate(&self, path: &Path, declared_label: &str) -> Result<&'static FileTypeSpec> {
        let spec = self
            .lookup(declared_label)
            .ok_or_else(|| PagewrightError::UnknownType(declared_label.to_string()))?;

        let actual = extension_of(path);
        debug!(path = %path.display(), label = spec.label, %actual, "validating file type");

        if actual != spec.extension {
            return Err(PagewrightError::InvalidType {
                path: path.to_path_buf(),
                label: spec.label.to_string(),
                expected: spec.extension.to_string(),
                actual: if actual.is_empty() {
                    "no extension".to_string()
                } else {
                    actual
                },
            });
        }
        Ok(spec)
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new(FILE_TYPE_CATALOG)
    }
}

/// Lowercased last extension with its leading dot, or an empty string.
fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| format!(".{}", ext.to_lowercase()))
        .unwrap_or_default()
}
