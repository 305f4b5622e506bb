// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Criterion benchmarks for admit card generation in the hallticket-document
// crate. Measures layout alone and layout plus PDF serialisation for a
// schedule long enough to span several pages.

use criterion::{Criterion, black_box, criterion_group, criterion_main};

use hallticket_core::{AssetPaths, CardConfig, ExamSessionEntry, ExamSessions, StudentRecord};
use hallticket_document::{AdmitCardComposer, PdfWriter};

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

fn fixture() -> (CardConfig, StudentRecord, ExamSessions) {
    let config = CardConfig {
        assets: AssetPaths {
            photo_dirs: Vec::new(),
            ..AssetPaths::default()
        },
        ..CardConfig::default()
    };

    let student = StudentRecord {
        name: "Ayush Gupta".into(),
        roll_number: "RA2311003011234".into(),
        semester: 3.into(),
        ..StudentRecord::default()
    };

    let sessions: Vec<ExamSessionEntry> = (0..40)
        .map(|i| {
            ExamSessionEntry::new(
                format!("21CSC{:03}T", i),
                "Design and Analysis of Algorithms with Applications",
                format!("2025-11-{:02}", 1 + i % 28),
                if i % 2 == 0 { "09:30" } else { "14:00" },
            )
        })
        .collect();

    (config, student, sessions.into())
}

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

/// Layout only: schedule building, wrapping and pagination.
fn bench_compose(c: &mut Criterion) {
    let (config, student, sessions) = fixture();
    let composer = AdmitCardComposer::new(config);

    c.bench_function("compose (40 sessions)", |b| {
        b.iter(|| black_box(composer.compose(black_box(&student), black_box(&sessions))));
    });
}

/// Layout followed by printpdf serialisation.
fn bench_render_pdf(c: &mut Criterion) {
    let (config, student, sessions) = fixture();
    let composer = AdmitCardComposer::new(config);
    let writer = PdfWriter::new();

    c.bench_function("compose + render (40 sessions)", |b| {
        b.iter(|| {
            let layout = composer.compose(black_box(&student), black_box(&sessions));
            black_box(writer.render(&layout));
        });
    });
}

criterion_group!(benches, bench_compose, bench_render_pdf);
criterion_main!(benches);
