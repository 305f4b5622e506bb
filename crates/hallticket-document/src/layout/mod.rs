// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Layout module — page cursor, layout model and the admit card composer.

pub mod composer;
pub mod cursor;
pub mod element;

pub use composer::AdmitCardComposer;
pub use cursor::PageCursor;
pub use element::{
    AdmitCardLayout, Color, Font, LayoutElement, LayoutPage, RowPlacement, TextRun,
};
