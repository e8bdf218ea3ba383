// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF reader — open and inspect generated PDF documents using the `lopdf`
// crate.

use std::path::Path;

use lopdf::content::Content;
use lopdf::{Document, Object, ObjectId};
use pagewright_core::error::{PagewrightError, Result};
use tracing::{debug, info, instrument};

/// Read-only view over an existing PDF.
pub struct PdfReader {
    /// The underlying lopdf document.
    document: Document,
    /// Source path, if opened from a file (useful for diagnostics).
    source_path: Option<String>,
}

impl PdfReader {
    // -- Construction ---------------------------------------------------------

    /// Open a PDF from the filesystem.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path_ref = path.as_ref();
        info!("Opening PDF: {}", path_ref.display());

        let document =
            Document::load(path_ref).map_err(|err| PagewrightError::read(path_ref, err))?;

        debug!(pages = document.get_pages().len(), "PDF loaded");

        Ok(Self {
            document,
            source_path: Some(path_ref.display().to_string()),
        })
    }

    /// Create a reader from raw PDF bytes already in memory.
    #[instrument(skip_all, fields(bytes_len = data.len()))]
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let document = Document::load_mem(data)
            .map_err(|err| PagewrightError::read("<memory>", err))?;

        debug!(pages = document.get_pages().len(), "PDF loaded from bytes");

        Ok(Self {
            document,
            source_path: None,
        })
    }

    // -- Inspection -----------------------------------------------------------

    /// Number of pages in the document.
    pub fn page_count(&self) -> usize {
        self.document.get_pages().len()
    }

    /// Return the source path if the reader was created via [`PdfReader::open`].
    pub fn source_path(&self) -> Option<&str> {
        self.source_path.as_deref()
    }

    /// Document title from the /Info dictionary, if present.
    pub fn title(&self) -> Option<String> {
        let info = self.document.trailer.get(b"Info").ok()?;
        let dict = match info {
            Object::Reference(id) => self.document.get_dictionary(*id).ok()?,
            Object::Dictionary(dict) => dict,
            _ => return None,
        };
        match dict.get(b"Title").ok()? {
            Object::String(bytes, _) => Some(latin1(bytes)),
            _ => None,
        }
    }

    /// Every string shown with `Tj` on page `page_number` (1-indexed), in
    /// drawing order.
    #[instrument(skip(self))]
    pub fn page_strings(&self, page_number: u32) -> Result<Vec<String>> {
        let page_id = self.page_id(page_number)?;
        let raw = self
            .document
            .get_page_content(page_id)
            .map_err(|err| corrupt(page_number, err))?;
        let content = Content::decode(&raw).map_err(|err| corrupt(page_number, err))?;

        let strings = content
            .operations
            .iter()
            .filter(|op| op.operator == "Tj")
            .filter_map(|op| match op.operands.first() {
                Some(Object::String(bytes, _)) => Some(latin1(bytes)),
                _ => None,
            })
            .collect();
        Ok(strings)
    }

    fn page_id(&self, page_number: u32) -> Result<ObjectId> {
        let pages = self.document.get_pages();
        pages.get(&page_number).copied().ok_or_else(|| {
            PagewrightError::read(
                self.source_path.as_deref().unwrap_or("<memory>"),
                format!(
                    "page {} not found (document has {} pages)",
                    page_number,
                    pages.len()
                ),
            )
        })
    }
}

fn corrupt(page_number: u32, err: impl std::fmt::Display) -> PagewrightError {
    PagewrightError::read("<pdf>", format!("page {page_number}: {err}"))
}

/// WinAnsi and Latin-1 agree for every byte the encoder writes.
fn latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}
