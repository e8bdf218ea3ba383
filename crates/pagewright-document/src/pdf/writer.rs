// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF encoder — serialise laid-out pages into a PDF byte stream using `lopdf`.
//
// The object graph is built by hand: one content stream per page, a shared
// resource dictionary holding the body and header fonts, and a catalog. No
// timestamps or generated identifiers are written, so identical input always
// produces identical bytes.

use std::path::Path;

use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, ObjectId, Stream, StringFormat, dictionary};
use pagewright_core::error::{PagewrightError, Result};
use pagewright_core::types::{PageGeometry, PdfDocument, Theme};
use tracing::{debug, info, instrument, warn};

const BODY_FONT: &str = "F1";
const HEADER_FONT: &str = "F2";
const BUILTIN_BODY_FACE: &str = "Courier";
const BUILTIN_HEADER_FACE: &str = "Courier-Bold";

/// The face used for body text.
#[derive(Debug, Clone, PartialEq, Eq)]
enum BodyFont {
    /// Standard 14 Courier; always available to every PDF viewer.
    Builtin,
    /// A TrueType program embedded in the document.
    Embedded { name: String, data: Vec<u8> },
}

/// Encodes a [`PdfDocument`] to PDF bytes.
#[derive(Debug, Clone)]
pub struct PdfEncoder {
    geometry: PageGeometry,
    theme: Theme,
    body_font: BodyFont,
}

impl PdfEncoder {
    pub fn new(geometry: PageGeometry, theme: Theme) -> Self {
        Self {
            geometry,
            theme,
            body_font: BodyFont::Builtin,
        }
    }

    pub fn geometry(&self) -> &PageGeometry {
        &self.geometry
    }

    /// Use the TrueType font at `path` for body text.
    ///
    /// A missing, unreadable or non-TrueType file is not an error: the
    /// encoder logs a warning and keeps the built-in Courier face.
    pub fn with_custom_font(mut self, path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match load_truetype(path) {
            Ok(data) => {
                let name = font_name_for(path);
                info!(font = %name, path = %path.display(), "Embedding custom font");
                self.body_font = BodyFont::Embedded { name, data };
            }
            Err(reason) => {
                warn!(path = %path.display(), %reason, "Custom font unavailable, using Courier");
                self.body_font = BodyFont::Builtin;
            }
        }
        self
    }

    /// Whether a custom font was successfully loaded.
    pub fn uses_custom_font(&self) -> bool {
        matches!(self.body_font, BodyFont::Embedded { .. })
    }

    /// Serialise `document` to PDF bytes.
    ///
    /// A document without pages is written as a single blank page.
    #[instrument(skip_all, fields(pages = document.pages.len()))]
    pub fn encode(&self, document: &PdfDocument) -> Result<Vec<u8>> {
        let (page_w, page_h) = self.geometry.page_size();

        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let body_font_id = self.add_body_font(&mut doc);
        let header_font_id = doc.add_object(builtin_font(BUILTIN_HEADER_FACE));
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! {
                BODY_FONT => body_font_id,
                HEADER_FONT => header_font_id,
            },
        });

        let page_lines: Vec<&[String]> = if document.pages.is_empty() {
            vec![&[][..]]
        } else {
            document.pages.iter().map(|p| p.lines.as_slice()).collect()
        };

        let mut kids: Vec<Object> = Vec::with_capacity(page_lines.len());
        for lines in page_lines {
            let content = self.page_content(&document.header_text, lines);
            let encoded = content
                .encode()
                .map_err(|err| PagewrightError::Encoding(format!("content stream: {err}")))?;
            let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));

            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
                "Resources" => resources_id,
                "MediaBox" => vec![0.into(), 0.into(), page_w.into(), page_h.into()],
            });
            kids.push(page_id.into());
        }

        let count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
            }),
        );

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        let info_id = doc.add_object(dictionary! {
            "Title" => Object::String(win_ansi_bytes(&document.title), StringFormat::Literal),
            "Producer" => Object::string_literal("Pagewright"),
        });
        doc.trailer.set("Root", catalog_id);
        doc.trailer.set("Info", info_id);
        doc.compress();

        let mut output = Vec::new();
        doc.save_to(&mut output)
            .map_err(|err| PagewrightError::Encoding(format!("serialise: {err}")))?;

        debug!(pages = count, output_bytes = output.len(), "PDF encoded");
        Ok(output)
    }

    fn add_body_font(&self, doc: &mut Document) -> ObjectId {
        match &self.body_font {
            BodyFont::Builtin => doc.add_object(builtin_font(BUILTIN_BODY_FACE)),
            BodyFont::Embedded { name, data } => {
                let file_id = doc.add_object(Stream::new(
                    dictionary! { "Length1" => data.len() as i64 },
                    data.clone(),
                ));
                // Metrics are those of a generic monospace face; every glyph
                // advances by the same width the layout engine assumed.
                let bbox: Vec<Object> = vec![0.into(), (-200).into(), 600.into(), 800.into()];
                let descriptor_id = doc.add_object(dictionary! {
                    "Type" => "FontDescriptor",
                    "FontName" => Object::Name(name.as_bytes().to_vec()),
                    "Flags" => 33,
                    "FontBBox" => bbox,
                    "ItalicAngle" => 0,
                    "Ascent" => 800,
                    "Descent" => -200,
                    "CapHeight" => 700,
                    "StemV" => 80,
                    "FontFile2" => file_id,
                });
                let widths = vec![Object::Integer(600); 224];
                doc.add_object(dictionary! {
                    "Type" => "Font",
                    "Subtype" => "TrueType",
                    "BaseFont" => Object::Name(name.as_bytes().to_vec()),
                    "FirstChar" => 32,
                    "LastChar" => 255,
                    "Widths" => widths,
                    "FontDescriptor" => descriptor_id,
                    "Encoding" => "WinAnsiEncoding",
                })
            }
        }
    }

    /// Drawing operations for one page: background, header, then body lines.
    fn page_content(&self, header_text: &str, lines: &[String]) -> Content {
        let g = &self.geometry;
        let (page_w, page_h) = g.page_size();
        let (r, gr, b) = self.theme.text_rgb();
        let mut ops: Vec<Operation> = Vec::new();

        if let Some((br, bg, bb)) = self.theme.background_rgb() {
            ops.push(Operation::new("q", vec![]));
            ops.push(Operation::new("rg", vec![br.into(), bg.into(), bb.into()]));
            ops.push(Operation::new(
                "re",
                vec![0.into(), 0.into(), page_w.into(), page_h.into()],
            ));
            ops.push(Operation::new("f", vec![]));
            ops.push(Operation::new("Q", vec![]));
        }

        // Header, centred in its band. Courier-Bold is monospaced, so the
        // width is exact.
        if !header_text.is_empty() {
            let header_width = header_text.chars().count() as f32 * g.header_font_size * 0.6;
            let x = ((page_w - header_width) / 2.0).max(g.side_margin);
            let y = page_h - g.top_margin - g.header_height / 2.0 - g.header_font_size / 3.0;
            ops.push(Operation::new("BT", vec![]));
            ops.push(Operation::new("rg", vec![r.into(), gr.into(), b.into()]));
            ops.push(Operation::new(
                "Tf",
                vec![HEADER_FONT.into(), g.header_font_size.into()],
            ));
            ops.push(Operation::new("Td", vec![x.into(), y.into()]));
            ops.push(Operation::new("Tj", vec![text_object(header_text)]));
            ops.push(Operation::new("ET", vec![]));
        }

        if !lines.is_empty() {
            let first_baseline = page_h - g.top_margin - g.header_height - g.font_size;
            ops.push(Operation::new("BT", vec![]));
            ops.push(Operation::new("rg", vec![r.into(), gr.into(), b.into()]));
            ops.push(Operation::new("Tf", vec![BODY_FONT.into(), g.font_size.into()]));
            ops.push(Operation::new("TL", vec![g.line_height.into()]));
            ops.push(Operation::new(
                "Td",
                vec![g.side_margin.into(), first_baseline.into()],
            ));
            for (i, line) in lines.iter().enumerate() {
                if i > 0 {
                    ops.push(Operation::new("T*", vec![]));
                }
                if !line.is_empty() {
                    ops.push(Operation::new("Tj", vec![text_object(line)]));
                }
            }
            ops.push(Operation::new("ET", vec![]));
        }

        Content { operations: ops }
    }
}

impl Default for PdfEncoder {
    fn default() -> Self {
        Self::new(PageGeometry::default(), Theme::default())
    }
}

fn builtin_font(face: &str) -> lopdf::Dictionary {
    dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => face,
        "Encoding" => "WinAnsiEncoding",
    }
}

fn text_object(text: &str) -> Object {
    Object::String(win_ansi_bytes(text), StringFormat::Literal)
}

/// Encode text for a WinAnsi simple font. Tabs become a space; characters
/// the font cannot show become `?`.
pub(crate) fn win_ansi_bytes(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            '\t' => b' ',
            ' '..='~' => c as u8,
            '\u{a0}'..='\u{ff}' => c as u32 as u8,
            _ => b'?',
        })
        .collect()
}

/// Read a font file and check it carries a TrueType signature.
fn load_truetype(path: &Path) -> std::result::Result<Vec<u8>, String> {
    let data = std::fs::read(path).map_err(|err| err.to_string())?;
    match data.get(..4) {
        Some([0x00, 0x01, 0x00, 0x00]) | Some([b't', b'r', b'u', b'e']) => Ok(data),
        Some([b'O', b'T', b'T', b'O']) => Err("CFF-flavoured OpenType fonts are not supported".to_string()),
        _ => Err("not a TrueType font".to_string()),
    }
}

/// PostScript-safe font name derived from the file stem.
fn font_name_for(path: &Path) -> String {
    let name: String = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-')
        .collect();
    if name.is_empty() {
        "CustomMono".to_string()
    } else {
        name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdf::reader::PdfReader;
    use pagewright_core::types::Page;

    fn document(pages: Vec<Vec<&str>>) -> PdfDocument {
        PdfDocument {
            title: "sample.txt".into(),
            header_text: "Code to PDF Conversion".into(),
            pages: pages
                .into_iter()
                .enumerate()
                .map(|(index, lines)| Page {
                    index,
                    lines: lines.into_iter().map(str::to_string).collect(),
                })
                .collect(),
        }
    }

    #[test]
    fn encoding_is_deterministic() {
        let doc = document(vec![vec!["alpha", "", "beta (gamma) \\ delta"], vec!["omega"]]);
        let encoder = PdfEncoder::default();
        let first = encoder.encode(&doc).expect("encode");
        let second = encoder.encode(&doc).expect("encode");
        assert_eq!(first, second);
        assert!(first.starts_with(b"%PDF-1.5"));
    }

    #[test]
    fn one_pdf_page_per_layout_page() {
        let doc = document(vec![vec!["a"], vec!["b"], vec!["c"]]);
        let bytes = PdfEncoder::default().encode(&doc).expect("encode");
        let reader = PdfReader::from_bytes(&bytes).expect("parse");
        assert_eq!(reader.page_count(), 3);
    }

    #[test]
    fn header_then_lines_are_drawn() {
        let doc = document(vec![vec!["fn main() {", "", "}"]]);
        let bytes = PdfEncoder::default().encode(&doc).expect("encode");
        let reader = PdfReader::from_bytes(&bytes).expect("parse");
        let shown = reader.page_strings(1).expect("page 1");
        assert_eq!(shown, vec!["Code to PDF Conversion", "fn main() {", "}"]);
    }

    #[test]
    fn zero_pages_still_produce_a_page() {
        let doc = document(vec![]);
        let bytes = PdfEncoder::default().encode(&doc).expect("encode");
        let reader = PdfReader::from_bytes(&bytes).expect("parse");
        assert_eq!(reader.page_count(), 1);
    }

    #[test]
    fn empty_header_draws_nothing_extra() {
        let mut doc = document(vec![vec!["only line"]]);
        doc.header_text.clear();
        let bytes = PdfEncoder::default().encode(&doc).expect("encode");
        let reader = PdfReader::from_bytes(&bytes).expect("parse");
        assert_eq!(reader.page_strings(1).expect("page 1"), vec!["only line"]);
    }

    #[test]
    fn dark_theme_changes_output() {
        let doc = document(vec![vec!["x"]]);
        let light = PdfEncoder::new(PageGeometry::default(), Theme::Light)
            .encode(&doc)
            .expect("encode");
        let dark = PdfEncoder::new(PageGeometry::default(), Theme::Dark)
            .encode(&doc)
            .expect("encode");
        assert_ne!(light, dark);
    }

    #[test]
    fn missing_custom_font_falls_back() {
        let encoder = PdfEncoder::default().with_custom_font("/definitely/not/here/Mono.ttf");
        assert!(!encoder.uses_custom_font());
        let bytes = encoder.encode(&document(vec![vec!["still works"]])).expect("encode");
        assert!(PdfReader::from_bytes(&bytes).is_ok());
    }

    #[test]
    fn non_truetype_font_falls_back() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("fake.ttf");
        std::fs::write(&path, b"not a font at all").expect("write");
        assert!(!PdfEncoder::default().with_custom_font(&path).uses_custom_font());
    }

    #[test]
    fn truetype_signature_is_embedded() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("Mono Code.ttf");
        let mut data = vec![0x00, 0x01, 0x00, 0x00];
        data.extend_from_slice(&[0u8; 64]);
        std::fs::write(&path, &data).expect("write");

        let encoder = PdfEncoder::default().with_custom_font(&path);
        assert!(encoder.uses_custom_font());
        let bytes = encoder.encode(&document(vec![vec!["x"]])).expect("encode");
        let reader = PdfReader::from_bytes(&bytes).expect("parse");
        assert_eq!(reader.page_count(), 1);
    }

    #[test]
    fn unencodable_characters_become_question_marks() {
        assert_eq!(win_ansi_bytes("a\tb"), b"a b");
        assert_eq!(win_ansi_bytes("café"), vec![b'c', b'a', b'f', 0xe9]);
        assert_eq!(win_ansi_bytes("→λ"), b"??");
    }
}
