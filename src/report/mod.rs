// src/report/mod.rs
// =============================================================================
// This module turns crawled pages into the final text report and writes it.
//
// Submodules:
// - arrow: the "---->" prefix that shows nesting
// - writer: sends the report to a file or to stdout
//
// The per-page rendering lives next to the Page itself (page/render.rs);
// this module only holds the shared style and joins pages together.
// =============================================================================

mod arrow;
mod writer;

pub use arrow::{Arrow, DEFAULT_ARROW_WIDTH};
pub use writer::{write_report, STDOUT_SENTINEL};

use crate::page::Page;

/// Settings that change how the report looks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportStyle {
    /// Dashes per nesting level in the arrows
    pub arrow_width: usize,
}

impl Default for ReportStyle {
    fn default() -> Self {
        Self {
            arrow_width: DEFAULT_ARROW_WIDTH,
        }
    }
}

// Separator between the reports of independent top-level pages
const PAGE_SEPARATOR: &str = "\n\n\n";

// Renders every top-level page and joins them into one report
pub fn build_report(pages: &[Page], style: &ReportStyle) -> String {
    pages
        .iter()
        .map(|page| page.render_with(style))
        .collect::<Vec<_>>()
        .join(PAGE_SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_report_joins_pages() {
        let pages = vec![
            Page::new("https://one.example/", 1).unwrap(),
            Page::new("https://two.example/", 1).unwrap(),
        ];

        let report = build_report(&pages, &ReportStyle::default());

        let parts: Vec<&str> = report.split(PAGE_SEPARATOR).collect();
        assert_eq!(parts.len(), 2);
        assert!(parts[0].starts_with("input: <a>https://one.example/</a>"));
        assert!(parts[1].starts_with("input: <a>https://two.example/</a>"));
    }

    #[test]
    fn test_empty_report() {
        assert_eq!(build_report(&[], &ReportStyle::default()), "");
    }
}
