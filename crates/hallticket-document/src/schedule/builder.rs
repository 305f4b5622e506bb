// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Exam schedule builder — turns raw session records into table rows.
//
// Formatting here is best-effort: odd dates and blank names pass through
// rather than being rejected, and output order always equals input order.

use std::fmt;

use hallticket_core::{ExamSessionEntry, SubjectCatalog};
use tracing::debug;

/// Subject names longer than this many characters are wrapped.
pub const SUBJECT_WRAP_THRESHOLD: usize = 25;

/// Forenoon / afternoon slot indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionCode {
    /// Forenoon ("morning").
    Fn,
    /// Afternoon, or anything that is not "morning".
    An,
}

impl SessionCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fn => "FN",
            Self::An => "AN",
        }
    }
}

impl fmt::Display for SessionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of the exam table, ready to be laid out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedExamRow {
    pub semester: String,
    pub subject_code: String,
    /// Full subject text after fallback.
    pub subject: String,
    /// `subject` split into visual lines; never empty.
    pub subject_lines: Vec<String>,
    pub date: String,
    pub session: SessionCode,
}

impl RenderedExamRow {
    /// Visual lines beyond the first.
    pub fn extra_lines(&self) -> usize {
        self.subject_lines.len().saturating_sub(1)
    }
}

/// Build one row per session, preserving input order.
///
/// `semester_label` is computed once per document and shared by every row.
pub fn build_schedule(
    semester_label: &str,
    entries: &[ExamSessionEntry],
    catalog: Option<&SubjectCatalog>,
) -> Vec<RenderedExamRow> {
    let rows: Vec<RenderedExamRow> = entries
        .iter()
        .map(|entry| build_row(semester_label, entry, catalog))
        .collect();
    debug!(rows = rows.len(), semester = semester_label, "Schedule built");
    rows
}

fn build_row(
    semester_label: &str,
    entry: &ExamSessionEntry,
    catalog: Option<&SubjectCatalog>,
) -> RenderedExamRow {
    let code = entry.subject_code.trim();
    let name = entry.subject_name.trim();

    let subject_code = (if code.is_empty() { name } else { code }).to_owned();
    let subject = if !name.is_empty() {
        name.to_owned()
    } else {
        catalog
            .and_then(|c| c.name_for(code))
            .unwrap_or(code)
            .to_owned()
    };

    RenderedExamRow {
        semester: semester_label.to_owned(),
        subject_code,
        subject_lines: wrap_subject(&subject, SUBJECT_WRAP_THRESHOLD),
        subject,
        date: format_exam_date(&entry.exam_date),
        session: session_code(&entry.exam_time),
    }
}

/// Reformat `YYYY-MM-DD` as `DD.MM.YYYY`; anything else is returned as-is.
pub fn format_exam_date(raw: &str) -> String {
    let parts: Vec<&str> = raw.split('-').collect();
    match parts.as_slice() {
        [year, month, day] => format!("{day}.{month}.{year}"),
        _ => raw.to_owned(),
    }
}

/// "morning" in any case is forenoon; everything else is afternoon.
pub fn session_code(exam_time: &str) -> SessionCode {
    if exam_time.trim().eq_ignore_ascii_case("morning") {
        SessionCode::Fn
    } else {
        SessionCode::An
    }
}

/// Greedy word wrap for subject names.
///
/// Text at or under `threshold` characters is a single line. Longer text is
/// split on whitespace, accumulating words while the line stays within the
/// threshold. Single words longer than the threshold keep their own line.
pub fn wrap_subject(text: &str, threshold: usize) -> Vec<String> {
    if text.chars().count() <= threshold {
        return vec![text.to_owned()];
    }

    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
        } else if current.chars().count() + 1 + word.chars().count() <= threshold {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_reformat() {
        assert_eq!(format_exam_date("2024-12-15"), "15.12.2024");
        assert_eq!(format_exam_date("15.12.2024"), "15.12.2024");
        assert_eq!(format_exam_date(""), "");
        assert_eq!(format_exam_date("2024-12"), "2024-12");
        assert_eq!(format_exam_date("2024-12-15-01"), "2024-12-15-01");
    }

    #[test]
    fn session_codes() {
        for label in ["Morning", "morning", "MORNING"] {
            assert_eq!(session_code(label), SessionCode::Fn, "{label}");
        }
        for label in ["Afternoon", "", "evening"] {
            assert_eq!(session_code(label), SessionCode::An, "{label}");
        }
        assert_eq!(SessionCode::Fn.to_string(), "FN");
    }

    #[test]
    fn blank_name_falls_back_to_code() {
        let entry = ExamSessionEntry::new("21CSC201J", "", "2024-12-15", "Morning");
        let rows = build_schedule("III", &[entry], None);
        assert_eq!(rows[0].subject, "21CSC201J");
        assert_eq!(rows[0].subject_lines, vec!["21CSC201J"]);
    }

    #[test]
    fn blank_name_prefers_catalog() {
        let mut catalog = SubjectCatalog::new();
        catalog.insert("21CSC202J", "OPERATING SYSTEMS");
        let entry = ExamSessionEntry::new("21CSC202J", "", "2024-12-16", "Afternoon");
        let rows = build_schedule("III", &[entry], Some(&catalog));
        assert_eq!(rows[0].subject, "OPERATING SYSTEMS");
    }

    #[test]
    fn blank_code_uses_name() {
        let entry = ExamSessionEntry::new("", "PHYSICS", "", "");
        let rows = build_schedule("I", &[entry], None);
        assert_eq!(rows[0].subject_code, "PHYSICS");
        assert_eq!(rows[0].subject, "PHYSICS");
    }

    #[test]
    fn rows_keep_input_order_and_share_semester() {
        let entries: Vec<_> = (0..7)
            .map(|i| ExamSessionEntry::new(format!("C{i}"), format!("Subject {i}"), "", ""))
            .collect();
        let rows = build_schedule("V", &entries, None);
        assert_eq!(rows.len(), 7);
        for (i, row) in rows.iter().enumerate() {
            assert_eq!(row.subject_code, format!("C{i}"));
            assert_eq!(row.semester, "V");
        }
    }

    #[test]
    fn short_subject_stays_on_one_line() {
        assert_eq!(wrap_subject("OPERATING SYSTEMS", 25), vec!["OPERATING SYSTEMS"]);
    }

    #[test]
    fn long_subject_wraps_greedily() {
        let lines = wrap_subject("DATA STRUCTURES AND ALGORITHMS", 25);
        assert_eq!(lines, vec!["DATA STRUCTURES AND", "ALGORITHMS"]);

        let lines = wrap_subject("NUMERICAL METHODS AND ANALYSIS", 25);
        assert_eq!(lines, vec!["NUMERICAL METHODS AND", "ANALYSIS"]);
    }

    #[test]
    fn oversized_word_is_not_split() {
        let word = "ELECTROMAGNETOHYDRODYNAMICS";
        let lines = wrap_subject(&format!("{word} LAB"), 25);
        assert_eq!(lines, vec![word, "LAB"]);
    }

    #[test]
    fn whitespace_only_yields_one_blank_line() {
        let lines = wrap_subject(&" ".repeat(30), 25);
        assert_eq!(lines, vec![""]);
    }
}
