// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for Pagewright.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// -- File types ---------------------------------------------------------------

/// One selectable source-file type: a display label and the extension a file
/// must carry to be converted under that label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileTypeSpec {
    pub label: &'static str,
    /// Leading dot, lowercase.
    pub extension: &'static str,
}

impl FileTypeSpec {
    /// Extension without the leading dot (`"py"`).
    pub fn key(&self) -> &'static str {
        self.extension.trim_start_matches('.')
    }
}

/// The built-in catalog, in display order. Extensions are unique.
pub const FILE_TYPE_CATALOG: &[FileTypeSpec] = &[
    FileTypeSpec { label: "Text File (.txt)", extension: ".txt" },
    FileTypeSpec { label: "Python File (.py)", extension: ".py" },
    FileTypeSpec { label: "Java File (.java)", extension: ".java" },
    FileTypeSpec { label: "C++ File (.cpp)", extension: ".cpp" },
    FileTypeSpec { label: "HTML File (.html)", extension: ".html" },
    FileTypeSpec { label: "CSS File (.css)", extension: ".css" },
    FileTypeSpec { label: "JavaScript File (.js)", extension: ".js" },
    FileTypeSpec { label: "Ruby File (.rb)", extension: ".rb" },
    FileTypeSpec { label: "PHP File (.php)", extension: ".php" },
    FileTypeSpec { label: "Swift File (.swift)", extension: ".swift" },
    FileTypeSpec { label: "Go File (.go)", extension: ".go" },
    FileTypeSpec { label: "Perl File (.pl)", extension: ".pl" },
    FileTypeSpec { label: "TypeScript File (.ts)", extension: ".ts" },
];

// -- Page geometry ------------------------------------------------------------

/// Standard paper sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaperSize {
    A4,
    A3,
    A5,
    Letter,
    Legal,
    Custom { width_mm: u32, height_mm: u32 },
}

impl PaperSize {
    /// Dimensions in millimetres (width, height).
    pub fn dimensions_mm(&self) -> (u32, u32) {
        match self {
            Self::A4 => (210, 297),
            Self::A3 => (297, 420),
            Self::A5 => (148, 210),
            Self::Letter => (216, 279),
            Self::Legal => (216, 356),
            Self::Custom {
                width_mm,
                height_mm,
            } => (*width_mm, *height_mm),
        }
    }

    /// Dimensions in PDF points (1/72 inch).
    pub fn dimensions_pt(&self) -> (f32, f32) {
        let (w, h) = self.dimensions_mm();
        (mm_to_pt(w as f32), mm_to_pt(h as f32))
    }
}

/// Convert millimetres to PDF points.
pub fn mm_to_pt(mm: f32) -> f32 {
    mm * 72.0 / 25.4
}

/// Advance width of every Courier glyph, in thousandths of the font size.
pub const MONOSPACE_GLYPH_WIDTH: f32 = 600.0;

/// Fixed page geometry used both for layout and for PDF drawing.
///
/// All lengths are in points. The layout engine only ever sees the derived
/// [`LayoutConfig`]; the encoder uses the raw numbers to place text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    pub paper_size: PaperSize,
    pub side_margin: f32,
    pub top_margin: f32,
    pub bottom_margin: f32,
    /// Vertical space reserved for the page header.
    pub header_height: f32,
    pub header_font_size: f32,
    pub font_size: f32,
    pub line_height: f32,
}

impl PageGeometry {
    pub fn new(paper_size: PaperSize, font_size: f32) -> Self {
        let font_size = if font_size.is_finite() && font_size > 0.0 {
            font_size
        } else {
            10.0
        };
        Self {
            paper_size,
            side_margin: mm_to_pt(10.0),
            top_margin: mm_to_pt(10.0),
            bottom_margin: mm_to_pt(20.0),
            header_height: mm_to_pt(10.0),
            header_font_size: 12.0,
            font_size,
            line_height: font_size * 1.2,
        }
    }

    pub fn page_size(&self) -> (f32, f32) {
        self.paper_size.dimensions_pt()
    }

    /// Width of one body glyph in points.
    pub fn char_width(&self) -> f32 {
        MONOSPACE_GLYPH_WIDTH / 1000.0 * self.font_size
    }

    /// How many body lines fit between the header and the bottom margin.
    pub fn max_lines_per_page(&self) -> usize {
        let (_, h) = self.page_size();
        let usable = h - self.top_margin - self.header_height - self.bottom_margin;
        ((usable / self.line_height).floor() as usize).max(1)
    }

    /// How many body glyphs fit between the side margins.
    pub fn max_chars_per_line(&self) -> usize {
        let (w, _) = self.page_size();
        let usable = w - 2.0 * self.side_margin;
        ((usable / self.char_width()).floor() as usize).max(1)
    }

    /// Derive the layout parameters for this geometry. The indent eats into
    /// the wrap width so that indented lines still fit between the margins.
    pub fn layout_config(&self, leading_indent: Option<String>) -> LayoutConfig {
        let indent_len = leading_indent
            .as_deref()
            .map(|s| s.chars().count())
            .unwrap_or(0);
        LayoutConfig {
            max_lines_per_page: self.max_lines_per_page(),
            wrap_width: self.max_chars_per_line().saturating_sub(indent_len).max(1),
            leading_indent,
        }
    }
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self::new(PaperSize::A4, 10.0)
    }
}

/// Parameters of the page layout stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutConfig {
    pub max_lines_per_page: usize,
    /// Maximum characters per wrapped line, not counting the indent.
    pub wrap_width: usize,
    /// Prefix prepended to every output line.
    pub leading_indent: Option<String>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        PageGeometry::default().layout_config(None)
    }
}

/// Indent used by the code-formatting variant.
pub const CODE_INDENT: &str = "   ";

// -- Documents ----------------------------------------------------------------

/// A source file loaded for conversion.
#[derive(Debug, Clone)]
pub struct SourceDocument {
    pub path: PathBuf,
    pub text: String,
}

/// One laid-out page of wrapped lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub index: usize,
    pub lines: Vec<String>,
}

impl Page {
    pub fn new(index: usize) -> Self {
        Self {
            index,
            lines: Vec::new(),
        }
    }
}

/// Colour scheme applied when drawing pages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Text fill colour as RGB components in `0.0..=1.0`.
    pub fn text_rgb(&self) -> (f32, f32, f32) {
        match self {
            Self::Light => (0.0, 0.0, 0.0),
            Self::Dark => rgb(0xec, 0xf0, 0xf1),
        }
    }

    /// Page background, if the theme paints one.
    pub fn background_rgb(&self) -> Option<(f32, f32, f32)> {
        match self {
            Self::Light => None,
            Self::Dark => Some(rgb(0x2c, 0x3e, 0x50)),
        }
    }
}

fn rgb(r: u8, g: u8, b: u8) -> (f32, f32, f32) {
    (r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
}

/// A fully laid-out document ready for encoding.
#[derive(Debug, Clone)]
pub struct PdfDocument {
    pub title: String,
    pub header_text: String,
    pub pages: Vec<Page>,
}

// -- Library ------------------------------------------------------------------

/// A PDF present in the library folder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibraryEntry {
    pub filename: String,
    pub path: PathBuf,
    pub size_bytes: u64,
    pub modified: Option<DateTime<Utc>>,
}

// -- Conversion progress ------------------------------------------------------

/// Stages of a single conversion, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversionStage {
    Idle,
    Validating,
    Reading,
    LayingOut,
    Encoding,
    Writing,
    Done,
    Failed,
}

impl std::fmt::Display for ConversionStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Validating => "validating",
            Self::Reading => "reading",
            Self::LayingOut => "laying-out",
            Self::Encoding => "encoding",
            Self::Writing => "writing",
            Self::Done => "done",
            Self::Failed => "failed",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn catalog_extensions_are_unique_and_lowercase() {
        let mut seen = HashSet::new();
        for spec in FILE_TYPE_CATALOG {
            assert!(spec.extension.starts_with('.'));
            assert_eq!(spec.extension, spec.extension.to_lowercase());
            assert!(seen.insert(spec.extension), "duplicate {}", spec.extension);
        }
        assert_eq!(FILE_TYPE_CATALOG.len(), 13);
    }

    #[test]
    fn a4_default_geometry() {
        let geometry = PageGeometry::default();
        assert_eq!(geometry.max_lines_per_page(), 60);
        assert_eq!(geometry.max_chars_per_line(), 89);
    }

    #[test]
    fn indent_reduces_wrap_width() {
        let geometry = PageGeometry::default();
        let plain = geometry.layout_config(None);
        let indented = geometry.layout_config(Some(CODE_INDENT.to_string()));
        assert_eq!(plain.wrap_width, indented.wrap_width + 3);
        assert_eq!(plain.max_lines_per_page, indented.max_lines_per_page);
    }

    #[test]
    fn bogus_font_size_falls_back() {
        let geometry = PageGeometry::new(PaperSize::A4, -3.0);
        assert_eq!(geometry.font_size, 10.0);
    }
}
