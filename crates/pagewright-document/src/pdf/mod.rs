// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF module — encoding laid-out pages and reading generated PDFs back.

pub mod reader;
pub mod writer;

pub use reader::PdfReader;
pub use writer::PdfEncoder;
