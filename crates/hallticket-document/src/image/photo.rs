// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Photo and asset resolution.
//
// A candidate photo is looked for in order: the path on the student record,
// the conventional `<dir>/<roll_number>.<ext>` locations, then the shared
// default photo. The first file that decodes wins. When nothing decodes the
// caller draws a placeholder; this module never returns an error.

use std::path::{Path, PathBuf};

use hallticket_core::{AssetPaths, StudentRecord};
use tracing::{debug, info, warn};

use super::processor::{ImageProcessor, RasterImage};

/// Photos larger than this (pixels, either side) are downscaled before
/// embedding.
const MAX_PHOTO_PX: u32 = 600;

/// Larger logos/stamps are downscaled to this.
const MAX_ASSET_PX: u32 = 400;

/// Frame drawn around student photos, in pixels.
const PHOTO_FRAME_PX: u32 = 2;

/// One way of finding a student photo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhotoStrategy {
    /// Path carried on the student record.
    RecordPath,
    /// `<photo_dir>/<roll_number>.<ext>` for each configured dir and extension.
    RegistrationConvention,
    /// The shared default photo asset.
    DefaultAsset,
}

impl PhotoStrategy {
    /// Resolution order.
    pub const ORDER: [PhotoStrategy; 3] = [
        PhotoStrategy::RecordPath,
        PhotoStrategy::RegistrationConvention,
        PhotoStrategy::DefaultAsset,
    ];

    /// Candidate paths this strategy offers for `student`, in order.
    pub fn candidates(&self, student: &StudentRecord, assets: &AssetPaths) -> Vec<PathBuf> {
        match self {
            Self::RecordPath => student
                .photo
                .as_deref()
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(PathBuf::from)
                .into_iter()
                .collect(),
            Self::RegistrationConvention => {
                let roll = student.roll_number.trim();
                if roll.is_empty() {
                    return Vec::new();
                }
                assets
                    .photo_dirs
                    .iter()
                    .flat_map(|dir| {
                        assets
                            .photo_extensions
                            .iter()
                            .map(move |ext| dir.join(format!("{roll}.{ext}")))
                    })
                    .collect()
            }
            Self::DefaultAsset => assets.default_photo.iter().cloned().collect(),
        }
    }
}

/// Outcome of photo resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhotoResolution {
    Found {
        strategy: PhotoStrategy,
        path: PathBuf,
        image: RasterImage,
    },
    /// Nothing usable; draw a box with this label.
    Placeholder { label: String },
}

impl PhotoResolution {
    pub fn is_placeholder(&self) -> bool {
        matches!(self, Self::Placeholder { .. })
    }
}

/// Try each strategy in order and return the first photo that decodes.
pub fn resolve_photo(student: &StudentRecord, assets: &AssetPaths) -> PhotoResolution {
    let found = PhotoStrategy::ORDER.iter().find_map(|strategy| {
        strategy
            .candidates(student, assets)
            .into_iter()
            .find_map(|path| {
                load_image(&path, MAX_PHOTO_PX, PHOTO_FRAME_PX).map(|image| PhotoResolution::Found {
                    strategy: *strategy,
                    path,
                    image,
                })
            })
    });

    match found {
        Some(resolution) => {
            if let PhotoResolution::Found { strategy, path, .. } = &resolution {
                info!(?strategy, path = %path.display(), "Student photo resolved");
            }
            resolution
        }
        None => {
            let label = student
                .initial()
                .map(String::from)
                .unwrap_or_else(|| "PHOTO".to_owned());
            info!(%label, "No student photo found, using placeholder");
            PhotoResolution::Placeholder { label }
        }
    }
}

/// Load an optional asset (logo, stamp). `None` when unset or unreadable.
pub fn load_asset(path: Option<&Path>, what: &str) -> Option<RasterImage> {
    let path = path?;
    let image = load_image(path, MAX_ASSET_PX, 0);
    if image.is_none() {
        warn!(asset = what, path = %path.display(), "Asset unavailable, drawing placeholder");
    }
    image
}

/// Decode a candidate, treating every failure as "try the next one".
fn load_image(path: &Path, max_px: u32, frame_px: u32) -> Option<RasterImage> {
    if !path.is_file() {
        debug!(path = %path.display(), "Image candidate does not exist");
        return None;
    }
    match ImageProcessor::open(path) {
        Ok(processor) => {
            let processor = processor.fit_within(max_px, max_px);
            let processor = if frame_px > 0 {
                processor.framed(frame_px)
            } else {
                processor
            };
            Some(processor.to_raster())
        }
        Err(err) => {
            warn!(path = %path.display(), error = %err, "Image candidate unreadable");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, Rgb, RgbImage};

    fn write_png(path: &Path, width: u32, height: u32) {
        DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb([90, 120, 200])))
            .save(path)
            .unwrap();
    }

    fn student(roll: &str, photo: Option<&str>) -> StudentRecord {
        StudentRecord {
            name: "Ayush Gupta".into(),
            roll_number: roll.into(),
            photo: photo.map(String::from),
            ..Default::default()
        }
    }

    fn assets_in(dir: &Path) -> AssetPaths {
        AssetPaths {
            photo_dirs: vec![dir.join("photos")],
            ..Default::default()
        }
    }

    #[test]
    fn record_path_wins() {
        let tmp = tempfile::tempdir().unwrap();
        let explicit = tmp.path().join("me.png");
        write_png(&explicit, 8, 8);
        std::fs::create_dir(tmp.path().join("photos")).unwrap();
        write_png(&tmp.path().join("photos/RA1.png"), 4, 4);

        let resolution = resolve_photo(
            &student("RA1", explicit.to_str()),
            &assets_in(tmp.path()),
        );
        match resolution {
            PhotoResolution::Found { strategy, path, image } => {
                assert_eq!(strategy, PhotoStrategy::RecordPath);
                assert_eq!(path, explicit);
                assert_eq!(image.width, 8);
            }
            other => panic!("expected photo, got {other:?}"),
        }
    }

    #[test]
    fn convention_used_when_record_path_missing() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::create_dir(tmp.path().join("photos")).unwrap();
        write_png(&tmp.path().join("photos/RA241103003034.png"), 5, 7);

        let resolution = resolve_photo(
            &student("RA241103003034", Some("/nonexistent/pic_01.png")),
            &assets_in(tmp.path()),
        );
        match resolution {
            PhotoResolution::Found { strategy, image, .. } => {
                assert_eq!(strategy, PhotoStrategy::RegistrationConvention);
                assert_eq!((image.width, image.height), (5, 7));
            }
            other => panic!("expected photo, got {other:?}"),
        }
    }

    #[test]
    fn corrupt_candidate_falls_through_to_default() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::create_dir(tmp.path().join("photos")).unwrap();
        std::fs::write(tmp.path().join("photos/RA9.jpg"), b"definitely not jpeg").unwrap();
        let default = tmp.path().join("default.png");
        write_png(&default, 3, 3);

        let mut assets = assets_in(tmp.path());
        assets.default_photo = Some(default.clone());

        match resolve_photo(&student("RA9", None), &assets) {
            PhotoResolution::Found { strategy, path, .. } => {
                assert_eq!(strategy, PhotoStrategy::DefaultAsset);
                assert_eq!(path, default);
            }
            other => panic!("expected default photo, got {other:?}"),
        }
    }

    #[test]
    fn exhausted_chain_yields_initial_placeholder() {
        let tmp = tempfile::tempdir().unwrap();
        let resolution = resolve_photo(&student("RA1", None), &assets_in(tmp.path()));
        assert_eq!(
            resolution,
            PhotoResolution::Placeholder { label: "A".into() }
        );
    }

    #[test]
    fn nameless_placeholder_says_photo() {
        let tmp = tempfile::tempdir().unwrap();
        let resolution = resolve_photo(&StudentRecord::default(), &assets_in(tmp.path()));
        assert_eq!(
            resolution,
            PhotoResolution::Placeholder {
                label: "PHOTO".into()
            }
        );
    }

    #[test]
    fn convention_candidates_cover_dirs_and_extensions() {
        let assets = AssetPaths::default();
        let paths = PhotoStrategy::RegistrationConvention.candidates(&student("RA7", None), &assets);
        assert_eq!(paths.len(), 6);
        assert_eq!(paths[0], PathBuf::from("photos/RA7.jpg"));
        assert_eq!(paths[5], PathBuf::from("static/photos/RA7.png"));

        let none = PhotoStrategy::RegistrationConvention.candidates(&student(" ", None), &assets);
        assert!(none.is_empty());
    }

    #[test]
    fn resolved_photo_is_framed() {
        let tmp = tempfile::tempdir().unwrap();
        let explicit = tmp.path().join("me.png");
        write_png(&explicit, 8, 8);

        match resolve_photo(&student("RA1", explicit.to_str()), &assets_in(tmp.path())) {
            PhotoResolution::Found { image, .. } => {
                assert_eq!(&image.rgb[0..3], &[40, 40, 40]);
                let centre = ((4 * 8 + 4) * 3) as usize;
                assert_eq!(&image.rgb[centre..centre + 3], &[90, 120, 200]);
            }
            other => panic!("expected photo, got {other:?}"),
        }
    }

    #[test]
    fn missing_asset_is_none() {
        assert!(load_asset(None, "logo").is_none());
        assert!(load_asset(Some(Path::new("/nonexistent/logo.png")), "logo").is_none());
    }
}
