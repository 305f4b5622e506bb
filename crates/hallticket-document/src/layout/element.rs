// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Layout model — what goes where on each page, independent of the PDF
// library. Coordinates are PDF points with the origin at the bottom-left.

use std::sync::Arc;

use chrono::NaiveDateTime;

use crate::image::{PhotoStrategy, RasterImage};
use crate::schedule::RenderedExamRow;

/// RGB colour with components in 0.0..=1.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    /// Header band and section captions.
    pub const PRIMARY: Color = Color::rgb(0.2, 0.4, 0.6);
    /// "End of Statement" marker.
    pub const ACCENT: Color = Color::rgb(0.9, 0.1, 0.1);
    pub const MUTED: Color = Color::rgb(0.5, 0.5, 0.5);
    pub const PLACEHOLDER_FILL: Color = Color::rgb(0.9, 0.9, 0.9);
}

/// The three Helvetica faces used on the card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Font {
    Regular,
    Bold,
    Oblique,
}

impl Font {
    /// Rough advance width of an average glyph, as a fraction of font size.
    fn average_glyph_width(&self) -> f32 {
        match self {
            Self::Bold => 0.56,
            Self::Regular | Self::Oblique => 0.50,
        }
    }

    /// Estimated rendered width of `text` in points.
    pub fn text_width(&self, text: &str, size: f32) -> f32 {
        text.chars().count() as f32 * self.average_glyph_width() * size
    }
}

/// A single run of text on one baseline.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub x: f32,
    pub y: f32,
    pub text: String,
    pub font: Font,
    pub size: f32,
    pub color: Color,
}

/// A drawable item.
#[derive(Debug, Clone, PartialEq)]
pub enum LayoutElement {
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        fill: Option<Color>,
        stroke: Option<Color>,
    },
    Line {
        from: (f32, f32),
        to: (f32, f32),
        color: Color,
        thickness: f32,
    },
    Text(TextRun),
    Image {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        image: Arc<RasterImage>,
    },
}

/// One page of the card.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutPage {
    /// 1-indexed.
    pub number: u32,
    /// True for every page after the first.
    pub continuation: bool,
    pub elements: Vec<LayoutElement>,
}

impl LayoutPage {
    pub fn texts(&self) -> impl Iterator<Item = &TextRun> {
        self.elements.iter().filter_map(|element| match element {
            LayoutElement::Text(run) => Some(run),
            _ => None,
        })
    }

    pub fn contains_text(&self, needle: &str) -> bool {
        self.texts().any(|run| run.text.contains(needle))
    }
}

/// Where an exam row landed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowPlacement {
    pub row_index: usize,
    pub page: u32,
    /// Baseline of the row's first line.
    pub y: f32,
}

/// A fully laid out admit card.
#[derive(Debug, Clone, PartialEq)]
pub struct AdmitCardLayout {
    pub width: f32,
    pub height: f32,
    /// Document title for PDF metadata.
    pub title: String,
    pub rows: Vec<RenderedExamRow>,
    /// One entry per row, same order as `rows`.
    pub placements: Vec<RowPlacement>,
    pub pages: Vec<LayoutPage>,
    /// Strategy that produced the photo; `None` means the placeholder was drawn.
    pub photo_source: Option<PhotoStrategy>,
    pub generated_at: NaiveDateTime,
}

impl AdmitCardLayout {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// All text runs on all pages, in drawing order.
    pub fn texts(&self) -> impl Iterator<Item = &TextRun> {
        self.pages.iter().flat_map(LayoutPage::texts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bold_text_measures_wider() {
        let regular = Font::Regular.text_width("HALL TICKET", 18.0);
        let bold = Font::Bold.text_width("HALL TICKET", 18.0);
        assert!(bold > regular);
        assert_eq!(Font::Oblique.text_width("", 8.0), 0.0);
    }

    #[test]
    fn page_text_filter() {
        let page = LayoutPage {
            number: 1,
            continuation: false,
            elements: vec![
                LayoutElement::Line {
                    from: (0.0, 0.0),
                    to: (1.0, 0.0),
                    color: Color::BLACK,
                    thickness: 1.0,
                },
                LayoutElement::Text(TextRun {
                    x: 0.0,
                    y: 0.0,
                    text: "*** End of Statement ***".into(),
                    font: Font::Bold,
                    size: 10.0,
                    color: Color::ACCENT,
                }),
            ],
        };
        assert_eq!(page.texts().count(), 1);
        assert!(page.contains_text("End of Statement"));
    }
}
