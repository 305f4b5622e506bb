// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Schedule module — semester labels and exam table rows.

pub mod builder;
pub mod semester;

pub use builder::{
    RenderedExamRow, SessionCode, build_schedule, format_exam_date, session_code, wrap_subject,
};
pub use semester::normalize_semester;
