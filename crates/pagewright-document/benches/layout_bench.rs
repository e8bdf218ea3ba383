// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Criterion benchmarks for the layout and encoding stages of the
// pagewright-document crate, run over a synthetic 5,000-line source file.

use criterion::{Criterion, black_box, criterion_group, criterion_main};

use pagewright_core::types::PdfDocument;
use pagewright_document::{PageLayoutEngine, PdfEncoder};

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Source text mixing short lines, blank lines and lines long enough to wrap.
fn synthetic_source() -> String {
    (0..5_000)
        .map(|i| match i % 7 {
            0 => String::new(),
            3 => format!("    let value_{i} = \"{}\";", "x".repeat(150)),
            _ => format!("    call_{i}(arg, other_arg); // line {i}"),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

fn bench_layout(c: &mut Criterion) {
    let text = synthetic_source();
    let engine = PageLayoutEngine::default();

    c.bench_function("layout (5k lines)", |b| {
        b.iter(|| black_box(engine.layout(black_box(&text))));
    });
}

fn bench_encode(c: &mut Criterion) {
    let text = synthetic_source();
    let document = PdfDocument {
        title: "bench.rs".into(),
        header_text: "Code to PDF Conversion".into(),
        pages: PageLayoutEngine::default().layout(&text),
    };
    let encoder = PdfEncoder::default();

    c.bench_function("encode (5k lines)", |b| {
        b.iter(|| black_box(encoder.encode(black_box(&document))));
    });
}

criterion_group!(benches, bench_layout, bench_encode);
criterion_main!(benches);
