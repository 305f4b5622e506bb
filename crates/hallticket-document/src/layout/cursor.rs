// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Vertical page cursor. PDF space: y grows upward, so moving down the page
// decreases `y`.

/// Current position in the page sequence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageCursor {
    /// Current baseline, in points from the bottom edge.
    pub y: f32,
    /// 1-indexed page number.
    pub page: u32,
    /// Lowest point content may reach.
    bottom: f32,
}

impl PageCursor {
    pub fn new(top: f32, bottom: f32) -> Self {
        Self {
            y: top,
            page: 1,
            bottom,
        }
    }

    pub fn bottom(&self) -> f32 {
        self.bottom
    }

    /// Whether a block `height` points tall fits below the cursor.
    pub fn has_room(&self, height: f32) -> bool {
        self.y - height >= self.bottom
    }

    /// Move down by `dy` points.
    pub fn advance(&mut self, dy: f32) {
        self.y -= dy;
    }

    /// Move to the top of the next page.
    pub fn start_page(&mut self, top: f32) {
        self.page += 1;
        self.y = top;
    }
}
