// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// pagewright-document — Source-to-PDF conversion for Pagewright.
//
// Provides file type validation against the type catalog, page layout with
// hard wrapping, deterministic PDF encoding, reading generated PDFs back, and
// the pipeline that ties these together.

pub mod convert;
pub mod layout;
pub mod pdf;
pub mod registry;

// Re-export the primary structs so callers can use `pagewright_document::PdfEncoder` etc.
pub use convert::{ConversionPipeline, output_file_name};
pub use layout::PageLayoutEngine;
pub use pdf::reader::PdfReader;
pub use pdf::writer::PdfEncoder;
pub use registry::TypeRegistry;
