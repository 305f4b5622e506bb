// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Card configuration: institution wording and asset locations.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{HallTicketError, Result};

/// Wording and asset settings for generated hall tickets.
///
/// Any key may be omitted from a config file; omitted keys keep their
/// defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CardConfig {
    /// Examination title shown in the header band.
    pub exam_title: String,
    /// Large caption under the title.
    pub card_title: String,
    /// Appended to the title on continuation pages.
    pub continuation_suffix: String,
    pub examination_centre: String,
    /// Text drawn in place of the logo when no logo image is available.
    pub institution_short_name: String,
    /// Prefix of the serial number, e.g. "25/".
    pub serial_prefix: String,
    /// Removed from the roll number when forming the serial number.
    pub roll_prefix_strip: String,
    /// Used when the student record has a blank course.
    pub default_course: String,
    /// Used when the student record has a blank branch.
    pub default_branch: String,
    pub section: String,
    /// Caption under the authority signature line.
    pub authority_label: String,
    pub paper_size: crate::PaperSize,
    pub assets: AssetPaths,
}

impl Default for CardConfig {
    fn default() -> Self {
        Self {
            exam_title: "Internal Examinations - I, September 2025".into(),
            card_title: "HALL TICKET".into(),
            continuation_suffix: " - Contd.".into(),
            examination_centre: "SRMIST, Delhi-NCR Campus".into(),
            institution_short_name: "SRMIST".into(),
            serial_prefix: "25/".into(),
            roll_prefix_strip: "RA".into(),
            default_course: "BTECH".into(),
            default_branch: "CSE - CS".into(),
            section: "A".into(),
            authority_label: "HEAD - IEC".into(),
            paper_size: crate::PaperSize::A4,
            assets: AssetPaths::default(),
        }
    }
}

impl CardConfig {
    /// Load a config from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        serde_json::from_str(&raw).map_err(|err| {
            HallTicketError::Config(format!("{}: {}", path.display(), err))
        })
    }

    /// Serial number printed in the header, e.g. "25/241103003034".
    pub fn serial_number(&self, roll_number: &str) -> String {
        let stripped = if self.roll_prefix_strip.is_empty() {
            roll_number.to_owned()
        } else {
            roll_number.replace(&self.roll_prefix_strip, "")
        };
        format!("{}{}", self.serial_prefix, stripped)
    }
}

/// Where the composer looks for images.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetPaths {
    /// Institutional logo for the header band.
    pub logo: Option<PathBuf>,
    /// Authorisation stamp drawn above the authority signature.
    pub stamp: Option<PathBuf>,
    /// Shared photo used when no per-student photo exists.
    pub default_photo: Option<PathBuf>,
    /// Directories searched for `<roll_number>.<ext>`.
    pub photo_dirs: Vec<PathBuf>,
    pub photo_extensions: Vec<String>,
}

impl Default for AssetPaths {
    fn default() -> Self {
        Self {
            logo: None,
            stamp: None,
            default_photo: None,
            photo_dirs: vec![PathBuf::from("photos"), PathBuf::from("static/photos")],
            photo_extensions: vec!["jpg".into(), "jpeg".into(), "png".into()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn serial_strips_roll_prefix() {
        let config = CardConfig::default();
        assert_eq!(config.serial_number("RA241103003034"), "25/241103003034");
        assert_eq!(config.serial_number(""), "25/");
    }

    #[test]
    fn partial_config_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"exam_title": "End Semester, May 2026", "assets": {{"stamp": "seal.png"}}}}"#
        )
        .unwrap();

        let config = CardConfig::from_json_file(file.path()).unwrap();
        assert_eq!(config.exam_title, "End Semester, May 2026");
        assert_eq!(config.card_title, "HALL TICKET");
        assert_eq!(config.assets.stamp, Some(PathBuf::from("seal.png")));
        assert_eq!(config.assets.photo_dirs.len(), 2);
    }

    #[test]
    fn malformed_config_is_config_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[1, 2").unwrap();
        match CardConfig::from_json_file(file.path()) {
            Err(HallTicketError::Config(msg)) => assert!(msg.contains("line")),
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
