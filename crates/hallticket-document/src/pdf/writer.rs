// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF writer — serialise an `AdmitCardLayout` using `printpdf` 0.8.
//
// printpdf 0.8 uses a data-oriented API: documents are built by constructing
// `PdfPage` structs containing `Vec<Op>` operation lists, then serialised via
// `PdfDocument::save()`.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use hallticket_core::error::HallTicketError;
use printpdf::{
    BuiltinFont, Line, LinePoint, Mm, Op, PaintMode, PdfDocument, PdfPage, PdfSaveOptions,
    PdfWarnMsg, Point, Polygon, PolygonRing, Pt, RawImage, RawImageData, RawImageFormat, Rgb,
    TextItem, WindingOrder, XObjectId, XObjectTransform,
};
use tracing::{debug, info, instrument};

use crate::image::RasterImage;
use crate::layout::{AdmitCardLayout, Color, Font, LayoutElement, TextRun};

/// Images are placed at 72 DPI so one pixel is one point before scaling.
const IMAGE_DPI: f32 = 72.0;

/// Turns laid out pages into PDF bytes. The layout's title becomes the
/// document title.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfWriter;

impl PdfWriter {
    pub fn new() -> Self {
        Self
    }

    /// Serialise every page of `layout`.
    #[instrument(skip_all, fields(pages = layout.pages.len()))]
    pub fn render(&self, layout: &AdmitCardLayout) -> Vec<u8> {
        let mut doc = PdfDocument::new(&layout.title);

        // The same logo may appear on every page; embed each image once.
        let mut xobjects: HashMap<*const RasterImage, XObjectId> = HashMap::new();
        let page_w = pt_to_mm(layout.width);
        let page_h = pt_to_mm(layout.height);

        let mut pages = Vec::with_capacity(layout.pages.len());
        for page in &layout.pages {
            let mut ops: Vec<Op> = Vec::with_capacity(page.elements.len() * 4);
            for element in &page.elements {
                match element {
                    LayoutElement::Rect {
                        x,
                        y,
                        width,
                        height,
                        fill,
                        stroke,
                    } => push_rect(&mut ops, *x, *y, *width, *height, *fill, *stroke),
                    LayoutElement::Line {
                        from,
                        to,
                        color,
                        thickness,
                    } => push_line(&mut ops, *from, *to, *color, *thickness),
                    LayoutElement::Text(run) => push_text(&mut ops, run),
                    LayoutElement::Image {
                        x,
                        y,
                        width,
                        height,
                        image,
                    } => {
                        let id = xobjects
                            .entry(Arc::as_ptr(image))
                            .or_insert_with(|| doc.add_image(&to_raw_image(image)))
                            .clone();
                        push_image(&mut ops, id, image, *x, *y, *width, *height);
                    }
                }
            }
            pages.push(PdfPage::new(page_w, page_h, ops));
        }

        doc.with_pages(pages);

        let mut warnings: Vec<PdfWarnMsg> = Vec::new();
        let output = doc.save(&PdfSaveOptions::default(), &mut warnings);

        debug!(
            bytes = output.len(),
            images = xobjects.len(),
            warnings = warnings.len(),
            "PDF serialised"
        );
        output
    }

    /// Render `layout` and write it to `path`.
    pub fn write_to_file(
        &self,
        layout: &AdmitCardLayout,
        path: impl AsRef<Path>,
    ) -> Result<(), HallTicketError> {
        let bytes = self.render(layout);
        std::fs::write(path.as_ref(), &bytes)?;
        info!("Wrote admit card to {}", path.as_ref().display());
        Ok(())
    }
}

// -- Op builders ----------------------------------------------------------------

fn pt_to_mm(pt: f32) -> Mm {
    Mm(pt * 25.4 / 72.0)
}

fn pdf_color(color: Color) -> printpdf::Color {
    printpdf::Color::Rgb(Rgb {
        r: color.r,
        g: color.g,
        b: color.b,
        icc_profile: None,
    })
}

fn builtin(font: Font) -> BuiltinFont {
    match font {
        Font::Regular => BuiltinFont::Helvetica,
        Font::Bold => BuiltinFont::HelveticaBold,
        Font::Oblique => BuiltinFont::HelveticaOblique,
    }
}

fn point(x: f32, y: f32) -> LinePoint {
    LinePoint {
        p: Point { x: Pt(x), y: Pt(y) },
        bezier: false,
    }
}

fn push_rect(
    ops: &mut Vec<Op>,
    x: f32,
    y: f32,
    width: f32,
    height: f32,
    fill: Option<Color>,
    stroke: Option<Color>,
) {
    let mode = match (fill, stroke) {
        (Some(_), Some(_)) => PaintMode::FillStroke,
        (Some(_), None) => PaintMode::Fill,
        (None, Some(_)) => PaintMode::Stroke,
        (None, None) => return,
    };

    ops.push(Op::SaveGraphicsState);
    if let Some(fill) = fill {
        ops.push(Op::SetFillColor {
            col: pdf_color(fill),
        });
    }
    if let Some(stroke) = stroke {
        ops.push(Op::SetOutlineColor {
            col: pdf_color(stroke),
        });
        ops.push(Op::SetOutlineThickness { pt: Pt(1.0) });
    }
    ops.push(Op::DrawPolygon {
        polygon: Polygon {
            rings: vec![PolygonRing {
                points: vec![
                    point(x, y),
                    point(x + width, y),
                    point(x + width, y + height),
                    point(x, y + height),
                ],
            }],
            mode,
            winding_order: WindingOrder::NonZero,
        },
    });
    ops.push(Op::RestoreGraphicsState);
}

fn push_line(ops: &mut Vec<Op>, from: (f32, f32), to: (f32, f32), color: Color, thickness: f32) {
    ops.push(Op::SaveGraphicsState);
    ops.push(Op::SetOutlineColor {
        col: pdf_color(color),
    });
    ops.push(Op::SetOutlineThickness { pt: Pt(thickness) });
    ops.push(Op::DrawLine {
        line: Line {
            points: vec![point(from.0, from.1), point(to.0, to.1)],
            is_closed: false,
        },
    });
    ops.push(Op::RestoreGraphicsState);
}

fn push_text(ops: &mut Vec<Op>, run: &TextRun) {
    if run.text.is_empty() {
        return;
    }
    ops.push(Op::SaveGraphicsState);
    ops.push(Op::SetFillColor {
        col: pdf_color(run.color),
    });
    ops.push(Op::StartTextSection);
    ops.push(Op::SetTextCursor {
        pos: Point {
            x: Pt(run.x),
            y: Pt(run.y),
        },
    });
    ops.push(Op::SetFontSizeBuiltinFont {
        size: Pt(run.size),
        font: builtin(run.font),
    });
    ops.push(Op::WriteTextBuiltinFont {
        items: vec![TextItem::Text(run.text.clone())],
        font: builtin(run.font),
    });
    ops.push(Op::EndTextSection);
    ops.push(Op::RestoreGraphicsState);
}

fn to_raw_image(image: &RasterImage) -> RawImage {
    RawImage {
        pixels: RawImageData::U8(image.rgb.clone()),
        width: image.width as usize,
        height: image.height as usize,
        data_format: RawImageFormat::RGB8,
        tag: Vec::new(),
    }
}

fn push_image(
    ops: &mut Vec<Op>,
    id: XObjectId,
    image: &RasterImage,
    x: f32,
    y: f32,
    width: f32,
    height: f32,
) {
    if image.width == 0 || image.height == 0 {
        return;
    }
    ops.push(Op::UseXobject {
        id,
        transform: XObjectTransform {
            translate_x: Some(Pt(x)),
            translate_y: Some(Pt(y)),
            scale_x: Some(width / image.width as f32),
            scale_y: Some(height / image.height as f32),
            dpi: Some(IMAGE_DPI),
            rotate: None,
        },
    });
}
