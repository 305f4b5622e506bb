// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Input records handed to the composer by whatever layer fetched them.
//
// Every field is optional on the wire: absent keys and `null` values
// deserialise to empty strings so that a sparse record still produces a card.

use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize};

/// Scalar shapes accepted where text is expected.
#[derive(Deserialize)]
#[serde(untagged)]
enum LooseText {
    Text(String),
    Integer(i64),
    Float(f64),
    Flag(bool),
}

/// `null` becomes "", numbers and booleans become their display text.
fn loose_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<LooseText>::deserialize(deserializer)? {
        None => String::new(),
        Some(LooseText::Text(text)) => text,
        Some(LooseText::Integer(n)) => n.to_string(),
        Some(LooseText::Float(f)) => f.to_string(),
        Some(LooseText::Flag(b)) => b.to_string(),
    })
}

fn nullable_semester<'de, D>(deserializer: D) -> Result<SemesterValue, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<SemesterValue>::deserialize(deserializer)?.unwrap_or_default())
}

/// A student as stored in the records database.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StudentRecord {
    #[serde(deserialize_with = "loose_string")]
    pub name: String,
    #[serde(
        alias = "registration_number",
        alias = "reg_no",
        deserialize_with = "loose_string"
    )]
    pub roll_number: String,
    #[serde(deserialize_with = "loose_string")]
    pub course: String,
    #[serde(deserialize_with = "loose_string")]
    pub branch: String,
    #[serde(deserialize_with = "nullable_semester")]
    pub semester: SemesterValue,
    /// Explicit photo path, if the record carries one.
    #[serde(alias = "pic", alias = "photo_path")]
    pub photo: Option<String>,
}

impl StudentRecord {
    /// First character of the first name, uppercased.
    pub fn initial(&self) -> Option<char> {
        self.name
            .split_whitespace()
            .next()
            .and_then(|word| word.chars().next())
            .and_then(|c| c.to_uppercase().next())
    }
}

/// Semester as it appears in source data: sometimes a number, sometimes a
/// label such as "3rd Semester". Document stores may also hand back `3.0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SemesterValue {
    Number(i64),
    Float(f64),
    Text(String),
}

impl Default for SemesterValue {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

impl From<i64> for SemesterValue {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for SemesterValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

/// One scheduled paper for the student.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExamSessionEntry {
    #[serde(deserialize_with = "loose_string")]
    pub subject_code: String,
    #[serde(deserialize_with = "loose_string")]
    pub subject_name: String,
    /// `YYYY-MM-DD` or an already formatted date.
    #[serde(deserialize_with = "loose_string")]
    pub exam_date: String,
    /// Free-text slot label; only "morning" is significant.
    #[serde(deserialize_with = "loose_string")]
    pub exam_time: String,
}

impl ExamSessionEntry {
    pub fn new(
        subject_code: impl Into<String>,
        subject_name: impl Into<String>,
        exam_date: impl Into<String>,
        exam_time: impl Into<String>,
    ) -> Self {
        Self {
            subject_code: subject_code.into(),
            subject_name: subject_name.into(),
            exam_date: exam_date.into(),
            exam_time: exam_time.into(),
        }
    }
}

/// Either a single session (older callers) or a list of them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExamSessions {
    Many(Vec<ExamSessionEntry>),
    One(ExamSessionEntry),
}

impl ExamSessions {
    /// Borrow the sessions as a slice, in input order.
    pub fn entries(&self) -> &[ExamSessionEntry] {
        match self {
            Self::Many(entries) => entries,
            Self::One(entry) => std::slice::from_ref(entry),
        }
    }

    pub fn into_entries(self) -> Vec<ExamSessionEntry> {
        match self {
            Self::Many(entries) => entries,
            Self::One(entry) => vec![entry],
        }
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }
}

impl Default for ExamSessions {
    fn default() -> Self {
        Self::Many(Vec::new())
    }
}

impl From<ExamSessionEntry> for ExamSessions {
    fn from(entry: ExamSessionEntry) -> Self {
        Self::One(entry)
    }
}

impl From<Vec<ExamSessionEntry>> for ExamSessions {
    fn from(entries: Vec<ExamSessionEntry>) -> Self {
        Self::Many(entries)
    }
}

/// A subject offered in some semester.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Subject {
    #[serde(deserialize_with = "loose_string")]
    pub subject_code: String,
    #[serde(deserialize_with = "loose_string")]
    pub subject_name: String,
    #[serde(alias = "sem")]
    pub semester: Option<i64>,
}

/// Lookup table from subject code to subject name.
///
/// Used to fill in names for sessions that only carry a code.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubjectCatalog {
    names: HashMap<String, String>,
}

impl SubjectCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a subject; blank codes or names are ignored.
    pub fn insert(&mut self, code: impl Into<String>, name: impl Into<String>) {
        let code = code.into().trim().to_owned();
        let name = name.into().trim().to_owned();
        if !code.is_empty() && !name.is_empty() {
            self.names.insert(code, name);
        }
    }

    pub fn name_for(&self, code: &str) -> Option<&str> {
        self.names.get(code.trim()).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl FromIterator<Subject> for SubjectCatalog {
    fn from_iter<I: IntoIterator<Item = Subject>>(iter: I) -> Self {
        let mut catalog = Self::new();
        for subject in iter {
            catalog.insert(subject.subject_code, subject.subject_name);
        }
        catalog
    }
}

/// Standard paper sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PaperSize {
    #[default]
    A4,
    A5,
    Letter,
    Custom { width_mm: u32, height_mm: u32 },
}

/// Points per millimetre (72 / 25.4).
const PT_PER_MM: f32 = 2.834_646;

impl PaperSize {
    /// Dimensions in millimetres (width, height).
    pub fn dimensions_mm(&self) -> (u32, u32) {
        match self {
            Self::A4 => (210, 297),
            Self::A5 => (148, 210),
            Self::Letter => (216, 279),
            Self::Custom {
                width_mm,
                height_mm,
            } => (*width_mm, *height_mm),
        }
    }

    /// Dimensions in PDF points (width, height).
    pub fn dimensions_pt(&self) -> (f32, f32) {
        let (w, h) = self.dimensions_mm();
        (w as f32 * PT_PER_MM, h as f32 * PT_PER_MM)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sparse_student_defaults_to_blank() {
        let student: StudentRecord = serde_json::from_str(r#"{"name": "Ayush Gupta"}"#).unwrap();
        assert_eq!(student.name, "Ayush Gupta");
        assert_eq!(student.roll_number, "");
        assert_eq!(student.semester, SemesterValue::Text(String::new()));
        assert!(student.photo.is_none());
    }

    #[test]
    fn student_accepts_legacy_keys() {
        let student: StudentRecord = serde_json::from_str(
            r#"{"reg_no": "RA241103003034", "pic": "pic_01.png", "semester": 3}"#,
        )
        .unwrap();
        assert_eq!(student.roll_number, "RA241103003034");
        assert_eq!(student.photo.as_deref(), Some("pic_01.png"));
        assert_eq!(student.semester, SemesterValue::Number(3));
    }

    #[test]
    fn semester_text_deserialises() {
        let student: StudentRecord =
            serde_json::from_str(r#"{"semester": "3rd Semester"}"#).unwrap();
        assert_eq!(student.semester, SemesterValue::from("3rd Semester"));
    }

    #[test]
    fn sessions_accept_single_mapping() {
        let sessions: ExamSessions = serde_json::from_str(
            r#"{"subject_code": "21CSC201J", "exam_date": "2024-12-15"}"#,
        )
        .unwrap();
        assert_eq!(sessions.len(), 1);
        assert_eq!(sessions.entries()[0].subject_code, "21CSC201J");
    }

    #[test]
    fn sessions_accept_list_in_order() {
        let sessions: ExamSessions = serde_json::from_str(
            r#"[{"subject_code": "A"}, {"subject_code": "B"}, {}]"#,
        )
        .unwrap();
        let codes: Vec<_> = sessions
            .into_entries()
            .into_iter()
            .map(|e| e.subject_code)
            .collect();
        assert_eq!(codes, vec!["A", "B", ""]);
    }

    #[test]
    fn null_fields_read_as_blank() {
        let student: StudentRecord = serde_json::from_str(
            r#"{"name": "Ayush Gupta", "roll_number": null, "semester": null, "photo": null}"#,
        )
        .unwrap();
        assert_eq!(student.roll_number, "");
        assert_eq!(student.semester, SemesterValue::default());
        assert!(student.photo.is_none());

        let sessions: ExamSessions = serde_json::from_str(
            r#"[{"subject_code": "21CSC201J", "subject_name": null, "exam_time": null}]"#,
        )
        .unwrap();
        let entry = &sessions.entries()[0];
        assert_eq!(entry.subject_code, "21CSC201J");
        assert_eq!(entry.subject_name, "");
        assert_eq!(entry.exam_time, "");
    }

    #[test]
    fn float_semester_and_numeric_codes_are_kept() {
        let student: StudentRecord = serde_json::from_str(r#"{"semester": 3.0}"#).unwrap();
        assert_eq!(student.semester, SemesterValue::Float(3.0));

        let entry: ExamSessionEntry =
            serde_json::from_str(r#"{"subject_code": 18401, "subject_name": "MATHS"}"#).unwrap();
        assert_eq!(entry.subject_code, "18401");
    }

    #[test]
    fn nested_values_in_text_fields_are_rejected() {
        assert!(serde_json::from_str::<StudentRecord>(r#"{"name": ["a", "b"]}"#).is_err());
    }

    #[test]
    fn sessions_reject_scalar() {
        assert!(serde_json::from_str::<ExamSessions>("42").is_err());
    }

    #[test]
    fn initial_uses_first_name() {
        let student = StudentRecord {
            name: "  keshav chauhan".into(),
            ..Default::default()
        };
        assert_eq!(student.initial(), Some('K'));
        assert_eq!(StudentRecord::default().initial(), None);

        let accented = StudentRecord {
            name: "élodie martin".into(),
            ..Default::default()
        };
        assert_eq!(accented.initial(), Some('É'));
    }

    #[test]
    fn catalog_skips_blank_entries() {
        let catalog: SubjectCatalog = vec![
            Subject {
                subject_code: "21CSC202J".into(),
                subject_name: "OPERATING SYSTEMS".into(),
                semester: Some(3),
            },
            Subject {
                subject_code: "X".into(),
                subject_name: " ".into(),
                semester: None,
            },
        ]
        .into_iter()
        .collect();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.name_for(" 21CSC202J "), Some("OPERATING SYSTEMS"));
        assert_eq!(catalog.name_for("X"), None);
    }

    #[test]
    fn a4_keeps_iso_proportions() {
        let (w, h) = PaperSize::A4.dimensions_pt();
        assert!((w - 595.28).abs() < 0.5);
        assert!((h / w - 1.414).abs() < 0.01);
    }
}
