// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF reader — inspect generated admit cards using the `lopdf` crate.

use std::collections::HashSet;
use std::path::Path;

use hallticket_core::error::HallTicketError;
use lopdf::{Document, Object, ObjectId};
use tracing::{debug, info, instrument};

/// Read-only view of an existing PDF.
pub struct PdfReader {
    document: Document,
    /// Source path, if opened from a file (useful for diagnostics).
    source_path: Option<String>,
}

impl PdfReader {
    /// Open a PDF from the filesystem.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>) -> Result<Self, HallTicketError> {
        let path_ref = path.as_ref();
        info!("Opening PDF: {}", path_ref.display());

        let document = Document::load(path_ref).map_err(|err| {
            HallTicketError::PdfError(format!("failed to open {}: {}", path_ref.display(), err))
        })?;

        debug!(pages = document.get_pages().len(), "PDF loaded");

        Ok(Self {
            document,
            source_path: Some(path_ref.display().to_string()),
        })
    }

    /// Create a reader from raw PDF bytes already in memory.
    #[instrument(skip_all, fields(bytes_len = data.len()))]
    pub fn from_bytes(data: &[u8]) -> Result<Self, HallTicketError> {
        let document = Document::load_mem(data).map_err(|err| {
            HallTicketError::PdfError(format!("failed to load PDF from memory: {}", err))
        })?;

        Ok(Self {
            document,
            source_path: None,
        })
    }

    /// Number of pages in the document.
    pub fn page_count(&self) -> usize {
        self.document.get_pages().len()
    }

    /// Return the source path if the reader was created via [`PdfReader::open`].
    pub fn source_path(&self) -> Option<&str> {
        self.source_path.as_deref()
    }

    /// Width and height of a page (1-indexed) in points, from its /MediaBox.
    ///
    /// The box is looked up on the page first, then on its ancestors.
    pub fn page_size_pt(&self, page_number: u32) -> Result<(f32, f32), HallTicketError> {
        let pages = self.document.get_pages();
        let current: ObjectId = *pages.get(&page_number).ok_or_else(|| {
            HallTicketError::PdfError(format!(
                "page {} not found (document has {} pages)",
                page_number,
                pages.len()
            ))
        })?;

        inherited_media_box(&self.document, current)
    }
}

/// Walk from `start` up the /Parent chain to the first /MediaBox.
fn inherited_media_box(
    document: &Document,
    start: ObjectId,
) -> Result<(f32, f32), HallTicketError> {
    let mut visited: HashSet<ObjectId> = HashSet::new();
    let mut current = start;

    loop {
        if !visited.insert(current) {
            return Err(HallTicketError::PdfError(format!(
                "/Parent chain loops back to object {} {}",
                current.0, current.1
            )));
        }

        let dict = document
            .get_object(current)
            .and_then(|object| object.as_dict())
            .map_err(|err| {
                HallTicketError::PdfError(format!("cannot read page object: {}", err))
            })?;

        if let Ok(media_box) = dict.get(b"MediaBox") {
            return media_box_size(document, media_box);
        }

        current = match dict.get(b"Parent") {
            Ok(Object::Reference(parent)) => *parent,
            _ => {
                return Err(HallTicketError::PdfError(format!(
                    "object {} {} has no /MediaBox",
                    start.0, start.1
                )));
            }
        };
    }
}

/// Resolve a /MediaBox value (possibly a reference) into (width, height).
fn media_box_size(document: &Document, value: &Object) -> Result<(f32, f32), HallTicketError> {
    let value = match value {
        Object::Reference(id) => document.get_object(*id).map_err(|err| {
            HallTicketError::PdfError(format!("cannot resolve /MediaBox: {}", err))
        })?,
        other => other,
    };

    let numbers: Vec<f32> = match value {
        Object::Array(items) => items.iter().filter_map(number).collect(),
        _ => Vec::new(),
    };

    match numbers.as_slice() {
        [x0, y0, x1, y1] => Ok(((x1 - x0).abs(), (y1 - y0).abs())),
        _ => Err(HallTicketError::PdfError(
            "/MediaBox is not a four-number array".to_string(),
        )),
    }
}

fn number(object: &Object) -> Option<f32> {
    match object {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r as f32),
        _ => None,
    }
}
