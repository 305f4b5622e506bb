// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Admit card composer — lays out header band, identity block, photo, exam
// table and trailer onto as many pages as the table needs.
//
// Composition never fails. Missing photos, logos and stamps become drawn
// placeholders; blank fields render blank.

use std::sync::Arc;

use chrono::{Local, NaiveDateTime};
use hallticket_core::{CardConfig, ExamSessions, StudentRecord, SubjectCatalog};
use tracing::{debug, info, instrument};

use super::cursor::PageCursor;
use super::element::{
    AdmitCardLayout, Color, Font, LayoutElement, LayoutPage, RowPlacement, TextRun,
};
use crate::image::{PhotoResolution, RasterImage, load_asset, resolve_photo};
use crate::schedule::{RenderedExamRow, build_schedule, normalize_semester};

// -- Geometry (points) --------------------------------------------------------

const HEADER_BAND_HEIGHT: f32 = 60.0;
/// Horizontal rules run from this inset to the mirrored inset.
const RULE_INSET: f32 = 40.0;
const CONTENT_X: f32 = 50.0;
/// Nothing is drawn below this height except page numbers.
const PAGE_FLOOR: f32 = 50.0;
/// Cursor start on continuation pages, measured from the top edge.
const CONTINUATION_TOP: f32 = 50.0;
/// First identity caption baseline, measured from the top edge.
const IDENTITY_TOP: f32 = 110.0;

const LOGO_SIZE: f32 = 40.0;
const PHOTO_SIZE: f32 = 80.0;
/// Photo box left edge, measured from the right edge.
const PHOTO_RIGHT: f32 = 100.0;
const STAMP_SIZE: f32 = 45.0;
/// Serial number x, measured from the right edge.
const SERIAL_RIGHT: f32 = 180.0;
/// Authority signature x, measured from the right edge.
const AUTHORITY_RIGHT: f32 = 150.0;

const COLUMN_X: [f32; 5] = [50.0, 130.0, 280.0, 430.0, 500.0];
const COLUMN_HEADERS: [&str; 5] = ["SEMESTER", "SUBJECT CODE", "SUBJECT", "DATE", "SESSION"];
const ROW_HEIGHT: f32 = 25.0;
const WRAP_LINE_HEIGHT: f32 = 10.0;
const TABLE_FONT_SIZE: f32 = 8.0;

/// Vertical extent of the trailer, from the last row down to the footer.
const TRAILER_HEIGHT: f32 = 155.0;

/// Lays out admit cards. Holds configuration only; each call builds its own
/// cursor and pages.
#[derive(Debug, Clone, Default)]
pub struct AdmitCardComposer {
    config: CardConfig,
    catalog: Option<SubjectCatalog>,
}

impl AdmitCardComposer {
    pub fn new(config: CardConfig) -> Self {
        Self {
            config,
            catalog: None,
        }
    }

    /// Use `catalog` to name sessions that only carry a subject code.
    pub fn with_catalog(mut self, catalog: SubjectCatalog) -> Self {
        self.catalog = Some(catalog);
        self
    }

    pub fn config(&self) -> &CardConfig {
        &self.config
    }

    /// Lay out a card stamped with the current local time.
    pub fn compose(&self, student: &StudentRecord, sessions: &ExamSessions) -> AdmitCardLayout {
        self.compose_at(student, sessions, Local::now().naive_local())
    }

    /// Lay out a card with an explicit generation timestamp.
    ///
    /// Identical inputs produce identical layouts.
    #[instrument(skip_all, fields(roll = %student.roll_number, sessions = sessions.len()))]
    pub fn compose_at(
        &self,
        student: &StudentRecord,
        sessions: &ExamSessions,
        generated_at: NaiveDateTime,
    ) -> AdmitCardLayout {
        let semester = normalize_semester(&student.semester);
        let rows = build_schedule(&semester, sessions.entries(), self.catalog.as_ref());

        let assets = &self.config.assets;
        let photo = resolve_photo(student, assets);
        let logo = load_asset(assets.logo.as_deref(), "logo").map(Arc::new);
        let stamp = load_asset(assets.stamp.as_deref(), "stamp").map(Arc::new);

        let (width, height) = self.config.paper_size.dimensions_pt();
        let mut sink = PageSink {
            config: &self.config,
            width,
            height,
            serial: self.config.serial_number(&student.roll_number),
            logo,
            cursor: PageCursor::new(height - IDENTITY_TOP, PAGE_FLOOR),
            pages: Vec::new(),
            current: Vec::new(),
        };

        sink.draw_header_band(false);
        sink.draw_identity_block(student);
        sink.draw_photo(&photo);
        let placements = sink.draw_table(&rows);
        sink.draw_trailer(stamp, generated_at);
        let pages = sink.finish();

        info!(
            rows = rows.len(),
            pages = pages.len(),
            semester = %semester,
            placeholder_photo = photo.is_placeholder(),
            "Admit card composed"
        );

        AdmitCardLayout {
            width,
            height,
            title: format!("{} - {}", self.config.card_title, student.name.trim()),
            rows,
            placements,
            pages,
            photo_source: match photo {
                PhotoResolution::Found { strategy, .. } => Some(strategy),
                PhotoResolution::Placeholder { .. } => None,
            },
            generated_at,
        }
    }
}

/// Accumulates elements for the page being drawn and owns the cursor.
struct PageSink<'a> {
    config: &'a CardConfig,
    width: f32,
    height: f32,
    serial: String,
    logo: Option<Arc<RasterImage>>,
    cursor: PageCursor,
    pages: Vec<LayoutPage>,
    current: Vec<LayoutElement>,
}

impl PageSink<'_> {
    // -- Primitives -----------------------------------------------------------

    fn text(&mut self, x: f32, y: f32, text: impl Into<String>, font: Font, size: f32, color: Color) {
        self.current.push(LayoutElement::Text(TextRun {
            x,
            y,
            text: text.into(),
            font,
            size,
            color,
        }));
    }

    fn centered(&mut self, cx: f32, y: f32, text: &str, font: Font, size: f32, color: Color) {
        let x = cx - font.text_width(text, size) / 2.0;
        self.text(x, y, text, font, size, color);
    }

    fn rule(&mut self, y: f32, thickness: f32) {
        self.line((RULE_INSET, y), (self.width - RULE_INSET, y), thickness);
    }

    fn line(&mut self, from: (f32, f32), to: (f32, f32), thickness: f32) {
        self.current.push(LayoutElement::Line {
            from,
            to,
            color: Color::BLACK,
            thickness,
        });
    }

    /// Place `image` centred in a square box, preserving its aspect ratio.
    fn image_in_box(&mut self, image: Arc<RasterImage>, x: f32, y: f32, size: f32) {
        let aspect = image.aspect_ratio();
        let (w, h) = if aspect >= 1.0 {
            (size, size / aspect)
        } else {
            (size * aspect, size)
        };
        self.current.push(LayoutElement::Image {
            x: x + (size - w) / 2.0,
            y: y + (size - h) / 2.0,
            width: w,
            height: h,
            image,
        });
    }

    // -- Page management ------------------------------------------------------

    fn start_continuation_page(&mut self) {
        let number = self.cursor.page;
        self.pages.push(LayoutPage {
            number,
            continuation: number > 1,
            elements: std::mem::take(&mut self.current),
        });
        self.cursor.start_page(self.height - CONTINUATION_TOP);
        debug!(page = self.cursor.page, "Continuation page started");
        self.draw_header_band(true);
    }

    fn finish(mut self) -> Vec<LayoutPage> {
        let number = self.cursor.page;
        self.pages.push(LayoutPage {
            number,
            continuation: number > 1,
            elements: std::mem::take(&mut self.current),
        });

        let total = self.pages.len();
        if total > 1 {
            let right = self.width - RULE_INSET;
            for page in &mut self.pages {
                let label = format!("Page {} of {}", page.number, total);
                let x = right - Font::Regular.text_width(&label, 8.0);
                page.elements.push(LayoutElement::Text(TextRun {
                    x,
                    y: 20.0,
                    text: label,
                    font: Font::Regular,
                    size: 8.0,
                    color: Color::MUTED,
                }));
            }
        }
        self.pages
    }

    // -- Sections -------------------------------------------------------------

    fn draw_header_band(&mut self, continuation: bool) {
        let (w, h) = (self.width, self.height);
        self.current.push(LayoutElement::Rect {
            x: 0.0,
            y: h - HEADER_BAND_HEIGHT,
            width: w,
            height: HEADER_BAND_HEIGHT,
            fill: Some(Color::PRIMARY),
            stroke: None,
        });

        match self.logo.clone() {
            Some(logo) => self.image_in_box(logo, 5.0, h - 52.0, LOGO_SIZE),
            None => {
                let name = self.config.institution_short_name.clone();
                self.text(6.0, h - 33.0, name, Font::Bold, 7.0, Color::WHITE);
            }
        }

        let title = if continuation {
            format!("{}{}", self.config.exam_title, self.config.continuation_suffix)
        } else {
            self.config.exam_title.clone()
        };
        self.text(CONTENT_X, h - 30.0, title, Font::Bold, 14.0, Color::WHITE);

        let serial = format!("Serial No.: {}", self.serial);
        self.text(w - SERIAL_RIGHT, h - 30.0, serial, Font::Bold, 10.0, Color::WHITE);

        if !continuation {
            let card_title = self.config.card_title.clone();
            self.centered(w / 2.0, h - 52.0, &card_title, Font::Bold, 18.0, Color::WHITE);
            self.rule(h - 80.0, 1.0);
        }
    }

    fn draw_identity_block(&mut self, student: &StudentRecord) {
        let y = self.cursor.y;
        let right = self.width / 2.0;

        let course = non_blank(&student.course, &self.config.default_course);
        let branch = non_blank(&student.branch, &self.config.default_branch);
        let program = format!("{} - {}/{}", course, branch, self.config.section).to_uppercase();
        let centre = self.config.examination_centre.clone();

        self.text(CONTENT_X, y, "EXAMINATION CENTRE", Font::Bold, 11.0, Color::PRIMARY);
        self.text(CONTENT_X, y - 20.0, centre, Font::Regular, 10.0, Color::BLACK);
        self.text(CONTENT_X, y - 45.0, "REGISTRATION NUMBER", Font::Bold, 11.0, Color::PRIMARY);
        self.text(CONTENT_X, y - 60.0, student.roll_number.trim(), Font::Bold, 10.0, Color::BLACK);

        self.text(right, y, "NAME OF THE CANDIDATE", Font::Bold, 11.0, Color::PRIMARY);
        self.text(right, y - 20.0, student.name.trim().to_uppercase(), Font::Bold, 10.0, Color::BLACK);
        self.text(right, y - 45.0, "PROGRAM/SECTION", Font::Bold, 11.0, Color::PRIMARY);
        self.text(right, y - 60.0, program, Font::Regular, 10.0, Color::BLACK);
    }

    fn draw_photo(&mut self, photo: &PhotoResolution) {
        let x = self.width - PHOTO_RIGHT;
        let y = self.cursor.y - PHOTO_SIZE;

        match photo {
            PhotoResolution::Found { image, .. } => {
                self.image_in_box(Arc::new(image.clone()), x, y, PHOTO_SIZE);
            }
            PhotoResolution::Placeholder { label } => {
                self.current.push(LayoutElement::Rect {
                    x,
                    y,
                    width: PHOTO_SIZE,
                    height: PHOTO_SIZE,
                    fill: Some(Color::PLACEHOLDER_FILL),
                    stroke: Some(Color::BLACK),
                });
                let cx = x + PHOTO_SIZE / 2.0;
                if label.chars().count() == 1 {
                    self.centered(cx, y + 30.0, label, Font::Bold, 28.0, Color::MUTED);
                } else {
                    self.centered(cx, y + PHOTO_SIZE / 2.0, label, Font::Regular, 8.0, Color::MUTED);
                }
            }
        }

        self.cursor.advance(100.0);
        self.rule(self.cursor.y, 1.0);
        self.cursor.advance(30.0);
    }

    fn draw_table_header(&mut self) {
        let y = self.cursor.y;
        for (x, caption) in COLUMN_X.iter().zip(COLUMN_HEADERS) {
            self.text(*x, y, caption, Font::Bold, 10.0, Color::PRIMARY);
        }
        self.cursor.advance(5.0);
        self.rule(self.cursor.y, 0.5);
        self.cursor.advance(15.0);
    }

    fn draw_table(&mut self, rows: &[RenderedExamRow]) -> Vec<RowPlacement> {
        self.draw_table_header();

        let mut placements = Vec::with_capacity(rows.len());
        for (row_index, row) in rows.iter().enumerate() {
            let row_height = ROW_HEIGHT + row.extra_lines() as f32 * WRAP_LINE_HEIGHT;
            if !self.cursor.has_room(row_height) {
                self.start_continuation_page();
                self.cursor.advance(30.0);
                self.draw_table_header();
            }

            let y = self.cursor.y;
            let size = TABLE_FONT_SIZE;
            self.text(COLUMN_X[0], y, row.semester.as_str(), Font::Regular, size, Color::BLACK);
            self.text(COLUMN_X[1], y, row.subject_code.as_str(), Font::Regular, size, Color::BLACK);
            for (i, line) in row.subject_lines.iter().enumerate() {
                let line_y = y - i as f32 * WRAP_LINE_HEIGHT;
                self.text(COLUMN_X[2], line_y, line.as_str(), Font::Regular, size, Color::BLACK);
            }
            self.text(COLUMN_X[3], y, row.date.as_str(), Font::Regular, size, Color::BLACK);
            self.text(COLUMN_X[4], y, row.session.as_str(), Font::Regular, size, Color::BLACK);

            placements.push(RowPlacement {
                row_index,
                page: self.cursor.page,
                y,
            });
            self.cursor.advance(row_height);
        }
        placements
    }

    fn draw_trailer(&mut self, stamp: Option<Arc<RasterImage>>, generated_at: NaiveDateTime) {
        if !self.cursor.has_room(TRAILER_HEIGHT) {
            self.start_continuation_page();
        }
        let (w, cx) = (self.width, self.width / 2.0);

        self.cursor.advance(30.0);
        self.centered(cx, self.cursor.y, "*** End of Statement ***", Font::Bold, 10.0, Color::ACCENT);

        self.cursor.advance(15.0);
        self.rule(self.cursor.y, 1.0);

        self.cursor.advance(60.0);
        let label_y = self.cursor.y;
        let authority_x = w - AUTHORITY_RIGHT;
        self.text(CONTENT_X, label_y, "SIGNATURE OF THE CANDIDATE", Font::Bold, 10.0, Color::BLACK);
        let authority = self.config.authority_label.clone();
        self.text(authority_x, label_y, authority, Font::Bold, 10.0, Color::BLACK);

        match stamp {
            Some(stamp) => self.image_in_box(stamp, authority_x, label_y + 10.0, STAMP_SIZE),
            None => self.text(authority_x, label_y + 25.0, "SEAL", Font::Bold, 8.0, Color::MUTED),
        }

        self.cursor.advance(20.0);
        let line_y = self.cursor.y;
        self.line((CONTENT_X, line_y), (200.0, line_y), 0.5);
        self.line((authority_x, line_y), (w - CONTENT_X, line_y), 0.5);

        self.cursor.advance(30.0);
        let stamp_text = format!(
            "Generated on: {}",
            generated_at.format("%d/%m/%Y %H:%M:%S")
        );
        self.centered(cx, self.cursor.y, &stamp_text, Font::Oblique, 8.0, Color::MUTED);
    }
}

fn non_blank<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    let trimmed = value.trim();
    if trimmed.is_empty() { fallback } else { trimmed }
}
