// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// hallticket-document — Admit card composition.
//
// Takes a student record and its exam sessions and produces a paginated A4
// PDF: header band, identity block, photo, exam table, signature block and
// timestamp footer. Also provides the PDF inspection used to check output.

pub mod image;
pub mod layout;
pub mod pdf;
pub mod schedule;

use hallticket_core::error::{HallTicketError, Result};
use hallticket_core::{CardConfig, ExamSessions, StudentRecord};
use tracing::instrument;

// Re-export the primary structs so callers can use `hallticket_document::PdfWriter` etc.
pub use image::processor::ImageProcessor;
pub use layout::{AdmitCardComposer, AdmitCardLayout};
pub use pdf::reader::PdfReader;
pub use pdf::writer::PdfWriter;
pub use schedule::{RenderedExamRow, SessionCode};

/// Generate an admit card PDF with the default configuration.
///
/// Never fails: missing assets and blank fields degrade in place.
pub fn generate_admit_card(student: &StudentRecord, sessions: &ExamSessions) -> Vec<u8> {
    let composer = AdmitCardComposer::new(CardConfig::default());
    PdfWriter::new().render(&composer.compose(student, sessions))
}

/// Generate an admit card from loosely typed JSON records.
///
/// `student` must be an object; `sessions` an object or an array of objects.
/// Absent keys are treated as blank. Anything else is
/// [`HallTicketError::InvalidInput`].
#[instrument(skip_all)]
pub fn generate_admit_card_from_json(
    student: &serde_json::Value,
    sessions: &serde_json::Value,
    config: &CardConfig,
) -> Result<Vec<u8>> {
    let (student, sessions) = parse_records(student, sessions)?;
    let composer = AdmitCardComposer::new(config.clone());
    Ok(PdfWriter::new().render(&composer.compose(&student, &sessions)))
}

/// Decode JSON records into typed input, rejecting only malformed shapes.
pub fn parse_records(
    student: &serde_json::Value,
    sessions: &serde_json::Value,
) -> Result<(StudentRecord, ExamSessions)> {
    if !student.is_object() {
        return Err(HallTicketError::InvalidInput(
            "student record must be a mapping".into(),
        ));
    }
    let student: StudentRecord = serde_json::from_value(student.clone())
        .map_err(|err| HallTicketError::InvalidInput(format!("student record: {err}")))?;

    let shape_ok = match sessions {
        serde_json::Value::Object(_) => true,
        serde_json::Value::Array(items) => items.iter().all(serde_json::Value::is_object),
        _ => false,
    };
    if !shape_ok {
        return Err(HallTicketError::InvalidInput(
            "exam sessions must be a mapping or a list of mappings".into(),
        ));
    }
    let sessions: ExamSessions = serde_json::from_value(sessions.clone())
        .map_err(|err| HallTicketError::InvalidInput(format!("exam sessions: {err}")))?;

    Ok((student, sessions))
}

/// Download filename for a student's card: `admit_card_<name>.pdf` with
/// spaces replaced by underscores.
pub fn admit_card_filename(student_name: &str) -> String {
    format!("admit_card_{}.pdf", student_name.trim().replace(' ', "_"))
}
