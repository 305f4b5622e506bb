// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Hall ticket core — input records, card configuration and error definitions
// shared by the composer and its front ends.

pub mod config;
pub mod error;
pub mod types;

pub use config::{AssetPaths, CardConfig};
pub use error::HallTicketError;
pub use types::*;
