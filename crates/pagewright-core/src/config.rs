// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Application configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::types::{CODE_INDENT, LayoutConfig, PageGeometry, PaperSize, Theme};

/// Persistent application settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Custom library folder. `None` means the default folder in the data dir.
    pub library_root: Option<PathBuf>,
    /// Paper size for generated PDFs.
    pub paper_size: PaperSize,
    /// Text drawn centred at the top of every page.
    pub header_text: String,
    /// Colour scheme for generated pages.
    pub theme: Theme,
    /// TrueType font to embed instead of the built-in Courier face.
    pub custom_font: Option<PathBuf>,
    /// Prefix every line with a three-space indent.
    pub code_indent: bool,
    /// Body font size in points.
    pub font_size_pt: f32,
}

impl AppConfig {
    pub fn page_geometry(&self) -> PageGeometry {
        PageGeometry::new(self.paper_size, self.font_size_pt)
    }

    pub fn layout_config(&self) -> LayoutConfig {
        let indent = self.code_indent.then(|| CODE_INDENT.to_string());
        self.page_geometry().layout_config(indent)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            library_root: None,
            paper_size: PaperSize::A4,
            header_text: "Code to PDF Conversion".to_string(),
            theme: Theme::Light,
            custom_font: None,
            code_indent: false,
            font_size_pt: 10.0,
        }
    }
}
