// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Human-readable error messages.
//
// Every technical error is mapped to plain English with a clear suggestion.
// The severity drives how the caller presents the failure.

use crate::error::PagewrightError;
use crate::types::FILE_TYPE_CATALOG;

/// Severity of an error from the user's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Disk busy, file briefly locked — trying again may work.
    Transient,
    /// User must do something (pick another file, fix permissions, choose a folder).
    ActionRequired,
    /// Cannot be fixed by retrying or user action.
    Permanent,
}

/// A human-readable error with plain English message and actionable suggestion.
#[derive(Debug, Clone)]
pub struct HumanError {
    /// Plain English summary (shown as a heading).
    pub message: String,
    /// What the user should try (shown as body text).
    pub suggestion: String,
    /// Whether trying the same operation again might succeed.
    pub retriable: bool,
    pub severity: Severity,
}

/// Convert a `PagewrightError` into a `HumanError`.
pub fn humanize_error(err: &PagewrightError) -> HumanError {
    match err {
        // -- Conversion --
        PagewrightError::InvalidType {
            label, expected, ..
        } => HumanError {
            message: "The selected file does not match the chosen type.".into(),
            suggestion: format!(
                "\"{label}\" only accepts {expected} files. Pick the matching type or a different file."
            ),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        PagewrightError::UnknownType(label) => {
            let known: Vec<&str> = FILE_TYPE_CATALOG.iter().map(|spec| spec.key()).collect();
            HumanError {
                message: format!("\"{label}\" isn't a file type we can convert."),
                suggestion: format!("Choose one of: {}.", known.join(", ")),
                retriable: false,
                severity: Severity::ActionRequired,
            }
        }

        PagewrightError::ReadFailure { path, detail } => humanize_fs_detail(
            &format!("We couldn't read {}.", path.display()),
            detail,
        ),

        PagewrightError::WriteFailure { path, detail } => humanize_fs_detail(
            &format!("We couldn't save {}.", path.display()),
            detail,
        ),

        PagewrightError::Encoding(_) => HumanError {
            message: "Something went wrong while building the PDF.".into(),
            suggestion: "This is a bug. Please report it along with the file you tried to convert.".into(),
            retriable: false,
            severity: Severity::Permanent,
        },

        // -- Library --
        PagewrightError::NotFound(name) => HumanError {
            message: format!("{name} isn't in the library."),
            suggestion: "It may already have been deleted. List the library to see what's there.".into(),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        PagewrightError::InvalidRoot { path, reason } => HumanError {
            message: format!("{} can't be used as the PDF folder.", path.display()),
            suggestion: format!("Choose an existing folder. ({reason})"),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        PagewrightError::InvalidEntryName(name) => HumanError {
            message: format!("\"{name}\" isn't a valid PDF name."),
            suggestion: "Use just the file name as shown in the library, without any folders.".into(),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        // -- Storage --
        PagewrightError::Io(io_err) => match io_err.kind() {
            std::io::ErrorKind::NotFound => HumanError {
                message: "A file or folder couldn't be found.".into(),
                suggestion: "It may have been moved or deleted. Check the library folder still exists.".into(),
                retriable: false,
                severity: Severity::ActionRequired,
            },
            std::io::ErrorKind::PermissionDenied => HumanError {
                message: "Permission was denied.".into(),
                suggestion: "Check the permissions on the library folder.".into(),
                retriable: false,
                severity: Severity::ActionRequired,
            },
            _ => HumanError {
                message: "There was a problem reading or writing a file.".into(),
                suggestion: "Try again. If this keeps happening, your disk may be full.".into(),
                retriable: true,
                severity: Severity::Transient,
            },
        },

        PagewrightError::Serialization(_) => HumanError {
            message: "The settings file couldn't be saved.".into(),
            suggestion: "Try again. If this keeps happening, please report it.".into(),
            retriable: true,
            severity: Severity::Transient,
        },
    }
}

/// Turn the OS error text carried by a read or write failure into advice.
fn humanize_fs_detail(message: &str, detail: &str) -> HumanError {
    let lower = detail.to_ascii_lowercase();

    if lower.contains("no such file") || lower.contains("cannot find") {
        HumanError {
            message: message.into(),
            suggestion: "The file or folder doesn't exist. It may have been moved or deleted.".into(),
            retriable: false,
            severity: Severity::ActionRequired,
        }
    } else if lower.contains("permission denied") || lower.contains("access is denied") {
        HumanError {
            message: message.into(),
            suggestion: "Permission was denied. Check the file and folder permissions.".into(),
            retriable: false,
            severity: Severity::ActionRequired,
        }
    } else if lower.contains("utf-8") {
        HumanError {
            message: message.into(),
            suggestion: "The file isn't plain UTF-8 text. Re-save it as UTF-8 and try again.".into(),
            retriable: false,
            severity: Severity::Permanent,
        }
    } else if lower.contains("no space") || lower.contains("disk full") {
        HumanError {
            message: message.into(),
            suggestion: "The disk is full. Free up some space and try again.".into(),
            retriable: true,
            severity: Severity::ActionRequired,
        }
    } else {
        HumanError {
            message: message.into(),
            suggestion: format!("Try again. (Detail: {detail})"),
            retriable: true,
            severity: Severity::Transient,
        }
    }
}
