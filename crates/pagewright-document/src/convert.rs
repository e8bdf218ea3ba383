// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Conversion pipeline: validate → read → lay out → encode → write.
//
// The stages run strictly in order and any of them may fail. The encoded PDF
// is held in memory in full and then written to a temporary file in the
// destination folder which is renamed over the target, so a failed write
// never leaves a truncated PDF behind.

use std::io::Write;
use std::path::{Path, PathBuf};

use pagewright_core::AppConfig;
use pagewright_core::error::{PagewrightError, Result};
use pagewright_core::types::{ConversionStage, PdfDocument, SourceDocument};
use tracing::{debug, info, instrument, warn};

use crate::layout::PageLayoutEngine;
use crate::pdf::writer::PdfEncoder;
use crate::registry::TypeRegistry;

/// Converts one source file into a PDF.
#[derive(Debug, Clone)]
pub struct ConversionPipeline {
    registry: TypeRegistry,
    layout: PageLayoutEngine,
    encoder: PdfEncoder,
    header_text: String,
}

impl ConversionPipeline {
    pub fn new(
        registry: TypeRegistry,
        layout: PageLayoutEngine,
        encoder: PdfEncoder,
        header_text: impl Into<String>,
    ) -> Self {
        Self {
            registry,
            layout,
            encoder,
            header_text: header_text.into(),
        }
    }

    /// Build a pipeline from the persisted settings.
    pub fn from_config(config: &AppConfig) -> Self {
        let mut encoder = PdfEncoder::new(config.page_geometry(), config.theme);
        if let Some(font) = &config.custom_font {
            encoder = encoder.with_custom_font(font);
        }
        Self::new(
            TypeRegistry::default(),
            PageLayoutEngine::new(config.layout_config()),
            encoder,
            config.header_text.clone(),
        )
    }

    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    /// Convert `input` (declared as `declared_label`) and write the PDF into
    /// `output_root`. Returns the absolute path of the written PDF.
    ///
    /// An existing PDF with the same name is replaced.
    #[instrument(skip_all, fields(input = %input.display(), label = declared_label, root = %output_root.display()))]
    pub fn convert(
        &self,
        input: &Path,
        declared_label: &str,
        output_root: &Path,
    ) -> Result<PathBuf> {
        let mut stage = ConversionStage::Idle;
        let result = self.run(input, declared_label, output_root, &mut stage);

        match &result {
            Ok(path) => {
                advance(&mut stage, ConversionStage::Done);
                info!(output = %path.display(), "Conversion complete");
            }
            Err(err) => {
                warn!(failed_at = %stage, error = %err, "Conversion failed");
                advance(&mut stage, ConversionStage::Failed);
            }
        }
        result
    }

    fn run(
        &self,
        input: &Path,
        declared_label: &str,
        output_root: &Path,
        stage: &mut ConversionStage,
    ) -> Result<PathBuf> {
        advance(stage, ConversionStage::Validating);
        self.registry.validate(input, declared_label)?;
        let file_name = output_file_name(input)?;

        advance(stage, ConversionStage::Reading);
        let source = read_source(input)?;

        advance(stage, ConversionStage::LayingOut);
        let pages = self.layout.layout(&source.text);
        let document = PdfDocument {
            title: input
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default(),
            header_text: self.header_text.clone(),
            pages,
        };
        drop(source);

        advance(stage, ConversionStage::Encoding);
        let bytes = self.encoder.encode(&document)?;

        advance(stage, ConversionStage::Writing);
        write_atomically(output_root, &file_name, &bytes)
    }
}

impl Default for ConversionPipeline {
    fn default() -> Self {
        Self::from_config(&AppConfig::default())
    }
}

fn advance(stage: &mut ConversionStage, next: ConversionStage) {
    debug!(from = %stage, to = %next, "conversion stage");
    *stage = next;
}

/// Output name for `input`: its base name with the extension replaced by
/// `.pdf` (`notes.txt` → `notes.pdf`).
pub fn output_file_name(input: &Path) -> Result<String> {
    let stem = input
        .file_stem()
        .ok_or_else(|| PagewrightError::read(input, "path has no file name"))?;
    Ok(format!("{}.pdf", stem.to_string_lossy()))
}

/// Read `path` as UTF-8 text. A leading byte-order mark is dropped.
fn read_source(path: &Path) -> Result<SourceDocument> {
    let bytes = std::fs::read(path).map_err(|err| PagewrightError::read(path, err))?;
    let mut text = String::from_utf8(bytes).map_err(|err| {
        PagewrightError::read(path, format!("file is not valid UTF-8 text ({err})"))
    })?;
    if text.starts_with('\u{feff}') {
        text.replace_range(..'\u{feff}'.len_utf8(), "");
    }
    debug!(bytes = text.len(), "Source read");
    Ok(SourceDocument {
        path: path.to_path_buf(),
        text,
    })
}

/// Write `bytes` to `root/file_name` in one step via a sibling temp file.
fn write_atomically(root: &Path, file_name: &str, bytes: &[u8]) -> Result<PathBuf> {
    let target = root.join(file_name);

    let mut tmp = tempfile::Builder::new()
        .prefix(".pagewright-")
        .suffix(".part")
        .tempfile_in(root)
        .map_err(|err| PagewrightError::write(&target, err))?;
    tmp.write_all(bytes)
        .and_then(|()| tmp.as_file().sync_all())
        .map_err(|err| PagewrightError::write(&target, err))?;
    tmp.persist(&target)
        .map_err(|err| PagewrightError::write(&target, err.error))?;

    let absolute = std::path::absolute(&target).map_err(|err| PagewrightError::write(&target, err))?;
    debug!(path = %absolute.display(), bytes = bytes.len(), "PDF written");
    Ok(absolute)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdf::reader::PdfReader;
    use pagewright_core::ErrorKind;

    fn fixture(dir: &Path, name: &str, contents: &[u8]) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, contents).expect("write fixture");
        path
    }

    fn pdfs_in(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(dir)
            .expect("read_dir")
            .filter_map(|e| e.ok())
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .filter(|name| name.ends_with(".pdf"))
            .collect();
        names.sort();
        names
    }

    #[test]
    fn converts_text_file_into_root() {
        let src = tempfile::tempdir().expect("tempdir");
        let out = tempfile::tempdir().expect("tempdir");
        let input = fixture(src.path(), "notes.txt", b"one\ntwo\nthree\n");

        let path = ConversionPipeline::default()
            .convert(&input, "Text File (.txt)", out.path())
            .expect("convert");

        assert!(path.is_absolute());
        assert_eq!(path.file_name().and_then(|n| n.to_str()), Some("notes.pdf"));
        let reader = PdfReader::open(&path).expect("open");
        assert_eq!(reader.page_count(), 1);
        let shown = reader.page_strings(1).expect("page");
        assert_eq!(&shown[1..], &["one", "two", "three"]);
        assert_eq!(pdfs_in(out.path()), vec!["notes.pdf"]);
    }

    #[test]
    fn type_mismatch_writes_nothing() {
        let src = tempfile::tempdir().expect("tempdir");
        let out = tempfile::tempdir().expect("tempdir");
        let input = fixture(src.path(), "script.py", b"print('hi')\n");

        let err = ConversionPipeline::default()
            .convert(&input, "Java File (.java)", out.path())
            .expect_err("mismatch");

        assert_eq!(err.kind(), ErrorKind::InvalidType);
        assert!(pdfs_in(out.path()).is_empty());
    }

    #[test]
    fn missing_input_is_a_read_failure() {
        let out = tempfile::tempdir().expect("tempdir");
        let err = ConversionPipeline::default()
            .convert(&out.path().join("ghost.txt"), "Text File (.txt)", out.path())
            .expect_err("missing");
        assert_eq!(err.kind(), ErrorKind::ReadFailure);
    }

    #[test]
    fn invalid_utf8_is_a_read_failure() {
        let src = tempfile::tempdir().expect("tempdir");
        let input = fixture(src.path(), "latin1.txt", &[b'c', b'a', b'f', 0xe9, b'\n']);
        let err = ConversionPipeline::default()
            .convert(&input, "Text File (.txt)", src.path())
            .expect_err("bad utf-8");
        assert_eq!(err.kind(), ErrorKind::ReadFailure);
        assert!(err.to_string().contains("UTF-8"));
        assert!(pdfs_in(src.path()).is_empty());
    }

    #[test]
    fn missing_output_folder_is_a_write_failure() {
        let src = tempfile::tempdir().expect("tempdir");
        let input = fixture(src.path(), "a.txt", b"x");
        let err = ConversionPipeline::default()
            .convert(&input, "Text File (.txt)", &src.path().join("nope"))
            .expect_err("no folder");
        assert_eq!(err.kind(), ErrorKind::WriteFailure);
    }

    #[test]
    fn existing_output_is_overwritten() {
        let src = tempfile::tempdir().expect("tempdir");
        let out = tempfile::tempdir().expect("tempdir");
        let stale = fixture(out.path(), "main.pdf", b"stale bytes");
        let input = fixture(src.path(), "main.go", b"package main\n");

        let path = ConversionPipeline::default()
            .convert(&input, "Go File (.go)", out.path())
            .expect("convert");

        assert_eq!(path.file_name(), stale.file_name());
        let written = std::fs::read(&path).expect("read");
        assert!(written.starts_with(b"%PDF"));
        assert_eq!(pdfs_in(out.path()), vec!["main.pdf"]);
    }

    #[test]
    fn empty_file_gives_single_page_pdf() {
        let src = tempfile::tempdir().expect("tempdir");
        let input = fixture(src.path(), "empty.txt", b"");
        let path = ConversionPipeline::default()
            .convert(&input, "Text File (.txt)", src.path())
            .expect("convert");
        let reader = PdfReader::open(&path).expect("open");
        assert_eq!(reader.page_count(), 1);
        assert_eq!(reader.page_strings(1).expect("page"), vec!["Code to PDF Conversion"]);
    }

    #[test]
    fn byte_order_mark_is_not_rendered() {
        let src = tempfile::tempdir().expect("tempdir");
        let input = fixture(src.path(), "bom.txt", "\u{feff}hello".as_bytes());
        let path = ConversionPipeline::default()
            .convert(&input, "txt", src.path())
            .expect("convert");
        let shown = PdfReader::open(&path).expect("open").page_strings(1).expect("page");
        assert_eq!(shown.last().map(String::as_str), Some("hello"));
    }

    #[test]
    fn converting_twice_is_byte_identical() {
        let src = tempfile::tempdir().expect("tempdir");
        let input = fixture(src.path(), "app.ts", b"const x: number = 1;\n");
        let pipeline = ConversionPipeline::default();

        let first = pipeline.convert(&input, "TypeScript File (.ts)", src.path()).expect("convert");
        let first_bytes = std::fs::read(&first).expect("read");
        let second = pipeline.convert(&input, "TypeScript File (.ts)", src.path()).expect("convert");
        assert_eq!(first_bytes, std::fs::read(&second).expect("read"));
    }

    #[test]
    fn output_name_replaces_only_the_last_extension() {
        assert_eq!(output_file_name(Path::new("a/b/notes.txt")).expect("name"), "notes.pdf");
        assert_eq!(output_file_name(Path::new("archive.tar.py")).expect("name"), "archive.tar.pdf");
    }

    #[test]
    fn long_source_spans_several_pages() {
        let src = tempfile::tempdir().expect("tempdir");
        let text: String = (0..150).map(|i| format!("line {i}\n")).collect();
        let input = fixture(src.path(), "long.rb", text.as_bytes());
        let path = ConversionPipeline::default()
            .convert(&input, "Ruby File (.rb)", src.path())
            .expect("convert");
        // 60 lines per A4 page at the default font size.
        assert_eq!(PdfReader::open(&path).expect("open").page_count(), 3);
    }
}
