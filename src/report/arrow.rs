// src/report/arrow.rs
// =============================================================================
// The report has no real indentation, nesting is shown with ASCII arrows:
//
//   nesting level 0 -> ""
//   nesting level 1 -> "-->"
//   nesting level 2 -> "---->"
//
// The number of dashes is nesting_level * width.
// =============================================================================

use std::fmt;

/// Default number of dashes per nesting level
pub const DEFAULT_ARROW_WIDTH: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Arrow {
    nesting_level: usize,
    width: usize,
}

impl Arrow {
    pub fn new(nesting_level: usize, width: usize) -> Self {
        Self {
            nesting_level,
            width,
        }
    }
}

impl fmt::Display for Arrow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.nesting_level == 0 {
            return Ok(());
        }

        write!(f, "{}>", "-".repeat(self.nesting_level * self.width))
    }
}
