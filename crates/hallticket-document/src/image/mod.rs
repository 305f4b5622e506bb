// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image module — decoding card images and resolving the student photo.

pub mod photo;
pub mod processor;

pub use photo::{PhotoResolution, PhotoStrategy, load_asset, resolve_photo};
pub use processor::{ImageProcessor, RasterImage};
