// src/page/heading.rs
// =============================================================================
// A Heading is one <h1>..<h6> element of a page: its level and its text.
//
// Headings are plain values. Translation never edits a Heading in place,
// it replaces it with a new one that keeps the level (see with_text).
// =============================================================================

use crate::report::{Arrow, ReportStyle};

/// The level of a heading, H1 (most important) to H6
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Level {
    H1,
    H2,
    H3,
    H4,
    H5,
    H6,
}

impl Level {
    // Converts an HTML tag name ("h2", "H2") into a Level
    //
    // Returns None for anything that is not h1..h6 (e.g. "h7", "h13", "p")
    pub fn from_tag(tag: &str) -> Option<Level> {
        match tag.to_ascii_lowercase().as_str() {
            "h1" => Some(Level::H1),
            "h2" => Some(Level::H2),
            "h3" => Some(Level::H3),
            "h4" => Some(Level::H4),
            "h5" => Some(Level::H5),
            "h6" => Some(Level::H6),
            _ => None,
        }
    }

    /// 1 for H1, 6 for H6
    pub fn rank(self) -> usize {
        self as usize + 1
    }

    // The markdown prefix for this level followed by the nesting arrow
    //
    //   H2 at nesting level 1 -> "## -->"
    //   H3 at nesting level 0 -> "### "
    pub fn render(self, nesting_level: usize, style: &ReportStyle) -> String {
        format!(
            "{} {}",
            "#".repeat(self.rank()),
            Arrow::new(nesting_level, style.arrow_width)
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Heading {
    level: Level,
    text: String,
}

impl Heading {
    pub fn new(level: Level, text: impl Into<String>) -> Self {
        Self {
            level,
            text: text.into(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Same level, different text
    pub fn with_text(&self, text: impl Into<String>) -> Heading {
        Heading::new(self.level, text)
    }

    pub fn render(&self, nesting_level: usize, style: &ReportStyle) -> String {
        format!("{} {}", self.level.render(nesting_level, style), self.text)
    }
}
