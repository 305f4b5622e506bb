// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Semester normaliser — maps "3", 3, "3rd Semester" and friends to a roman
// numeral label. Never fails: unknown input comes back uppercased.

use hallticket_core::SemesterValue;

const ROMAN: [&str; 8] = ["I", "II", "III", "IV", "V", "VI", "VII", "VIII"];

const ORDINALS: [(&str, &str); 8] = [
    ("1st", "I"),
    ("2nd", "II"),
    ("3rd", "III"),
    ("4th", "IV"),
    ("5th", "V"),
    ("6th", "VI"),
    ("7th", "VII"),
    ("8th", "VIII"),
];

/// Canonical roman label for a semester value.
pub fn normalize_semester(value: &SemesterValue) -> String {
    match value {
        SemesterValue::Number(n) => roman_for(*n),
        // Fractions truncate.
        SemesterValue::Float(f) => roman_for(f.trunc() as i64),
        SemesterValue::Text(text) => normalize_text(text),
    }
}

/// 1..=8 map to I..=VIII; anything else renders as its decimal string.
pub fn roman_for(n: i64) -> String {
    match usize::try_from(n) {
        Ok(idx @ 1..=8) => ROMAN[idx - 1].to_owned(),
        _ => n.to_string(),
    }
}

fn normalize_text(text: &str) -> String {
    let trimmed = text.trim();
    if let Ok(n) = trimmed.parse::<i64>() {
        return roman_for(n);
    }

    let token = strip_semester_word(trimmed);
    if let Some((_, roman)) = ORDINALS
        .iter()
        .find(|(ordinal, _)| ordinal.eq_ignore_ascii_case(&token))
    {
        return (*roman).to_owned();
    }
    if let Ok(n) = token.parse::<i64>() {
        return roman_for(n);
    }

    token.to_uppercase()
}

/// Remove a "semester" word (any case) and collapse the remainder.
fn strip_semester_word(text: &str) -> String {
    text.split_whitespace()
        .filter(|word| !word.eq_ignore_ascii_case("semester") && !word.eq_ignore_ascii_case("sem"))
        .collect::<Vec<_>>()
        .join(" ")
}
