// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image processor — decode, downscale and frame card images, then hand them
// to the PDF layer as raw RGB8 rasters. Uses the `image` and `imageproc`
// crates.

use std::path::Path;

use hallticket_core::error::HallTicketError;
use image::{DynamicImage, Rgb, RgbImage};
use imageproc::drawing::draw_hollow_rect_mut;
use imageproc::rect::Rect;
use tracing::{debug, instrument};

/// Decoded RGB8 pixels, row-major, three bytes per pixel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    pub width: u32,
    pub height: u32,
    pub rgb: Vec<u8>,
}

impl RasterImage {
    /// Width / height.
    pub fn aspect_ratio(&self) -> f32 {
        if self.height == 0 {
            1.0
        } else {
            self.width as f32 / self.height as f32
        }
    }
}

/// Image pipeline operating on a single in-memory image.
///
/// Each method consumes `self` and returns a new `ImageProcessor`, so calls
/// chain:
///
/// ```ignore
/// let raster = ImageProcessor::open("photos/RA2411.jpg")?
///     .fit_within(600, 600)
///     .framed(2)
///     .to_raster();
/// ```
pub struct ImageProcessor {
    image: DynamicImage,
}

impl ImageProcessor {
    // -- Construction ---------------------------------------------------------

    /// Load an image from a file path.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>) -> Result<Self, HallTicketError> {
        let img = image::open(path.as_ref()).map_err(|err| {
            HallTicketError::ImageError(format!(
                "failed to open {}: {}",
                path.as_ref().display(),
                err
            ))
        })?;
        debug!(width = img.width(), height = img.height(), "Image loaded");
        Ok(Self { image: img })
    }

    /// Create a processor from raw encoded bytes (JPEG, PNG, etc.).
    #[instrument(skip(data), fields(data_len = data.len()))]
    pub fn from_bytes(data: &[u8]) -> Result<Self, HallTicketError> {
        let img = image::load_from_memory(data).map_err(|err| {
            HallTicketError::ImageError(format!("failed to decode image: {}", err))
        })?;
        Ok(Self { image: img })
    }

    /// Wrap an already-decoded `DynamicImage`.
    pub fn from_dynamic(image: DynamicImage) -> Self {
        Self { image }
    }

    // -- Accessors ------------------------------------------------------------

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    // -- Transformations ------------------------------------------------------

    /// Downscale to fit within `max_width` x `max_height`, preserving aspect
    /// ratio. Images already inside the box are left alone.
    pub fn fit_within(self, max_width: u32, max_height: u32) -> Self {
        if self.image.width() <= max_width && self.image.height() <= max_height {
            return self;
        }
        let resized = self
            .image
            .resize(max_width, max_height, image::imageops::FilterType::Lanczos3);
        debug!(
            new_w = resized.width(),
            new_h = resized.height(),
            "Image downscaled"
        );
        Self { image: resized }
    }

    /// Draw a dark frame `thickness` pixels wide just inside the edges.
    pub fn framed(self, thickness: u32) -> Self {
        let mut rgb: RgbImage = self.image.to_rgb8();
        let (w, h) = rgb.dimensions();
        let frame = Rgb([40u8, 40, 40]);

        for inset in 0..thickness {
            if w <= inset * 2 || h <= inset * 2 {
                break;
            }
            let rect = Rect::at(inset as i32, inset as i32).of_size(w - inset * 2, h - inset * 2);
            draw_hollow_rect_mut(&mut rgb, rect, frame);
        }

        Self {
            image: DynamicImage::ImageRgb8(rgb),
        }
    }

    // -- Output ---------------------------------------------------------------

    /// Flatten to RGB8 for embedding.
    pub fn to_raster(&self) -> RasterImage {
        let rgb = self.image.to_rgb8();
        RasterImage {
            width: rgb.width(),
            height: rgb.height(),
            rgb: rgb.into_raw(),
        }
    }
}
