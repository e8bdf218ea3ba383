// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Pagewright.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for all Pagewright operations.
#[derive(Debug, Error)]
pub enum PagewrightError {
    // -- Conversion errors --
    #[error("{path} does not match the declared type {label}: expected {expected}, found {actual}")]
    InvalidType {
        path: PathBuf,
        label: String,
        expected: String,
        actual: String,
    },

    #[error("unknown file type: {0}")]
    UnknownType(String),

    #[error("could not read {path}: {detail}")]
    ReadFailure { path: PathBuf, detail: String },

    #[error("could not write {path}: {detail}")]
    WriteFailure { path: PathBuf, detail: String },

    #[error("PDF encoding failed: {0}")]
    Encoding(String),

    // -- Library errors --
    #[error("no such PDF in the library: {0}")]
    NotFound(String),

    #[error("invalid library folder {path}: {reason}")]
    InvalidRoot { path: PathBuf, reason: String },

    #[error("invalid library entry name: {0}")]
    InvalidEntryName(String),

    // -- Storage / persistence --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Stable, payload-free tag for an error, for callers that branch on the
/// failure class rather than on the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidType,
    ReadFailure,
    WriteFailure,
    NotFound,
    InvalidRoot,
    InvalidInput,
    Internal,
    Io,
}

impl PagewrightError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidType { .. } | Self::UnknownType(_) => ErrorKind::InvalidType,
            Self::ReadFailure { .. } => ErrorKind::ReadFailure,
            Self::WriteFailure { .. } => ErrorKind::WriteFailure,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::InvalidRoot { .. } => ErrorKind::InvalidRoot,
            Self::InvalidEntryName(_) => ErrorKind::InvalidInput,
            Self::Encoding(_) | Self::Serialization(_) => ErrorKind::Internal,
            Self::Io(_) => ErrorKind::Io,
        }
    }

    /// Build a `ReadFailure` from an I/O error on `path`.
    pub fn read(path: impl Into<PathBuf>, err: impl std::fmt::Display) -> Self {
        Self::ReadFailure {
            path: path.into(),
            detail: err.to_string(),
        }
    }

    /// Build a `WriteFailure` from an I/O error on `path`.
    pub fn write(path: impl Into<PathBuf>, err: impl std::fmt::Display) -> Self {
        Self::WriteFailure {
            path: path.into(),
            detail: err.to_string(),
        }
    }
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, PagewrightError>;
