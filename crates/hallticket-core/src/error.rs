// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for the hall ticket composer.

use thiserror::Error;

/// Top-level error type for all hall ticket operations.
///
/// Content problems (blank fields, odd dates, missing photos) never reach this
/// type from the composer; they degrade in place. What remains is call-shape
/// and I/O failure at the edges.
#[derive(Debug, Error)]
pub enum HallTicketError {
    // -- Input shape --
    #[error("invalid input: {0}")]
    InvalidInput(String),

    // -- Assets / output --
    #[error("image processing failed: {0}")]
    ImageError(String),

    #[error("PDF operation failed: {0}")]
    PdfError(String),

    // -- Configuration --
    #[error("configuration error: {0}")]
    Config(String),

    // -- Storage --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, HallTicketError>;
