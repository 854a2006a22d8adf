// src/page/render.rs
// =============================================================================
// Renders a Page (in any state) as a nested text report.
//
// Layout of an analyzed page at the root:
//
//   input: <a>https://example.com/</a>
//   <br>max depth: 2
//   <br>source language: german
//   <br>target language: english
//   <br>summary:
//
//   #  Welcome                           <- headings, arrow at the page depth
//
//   <br>--> broken link <a>...</a>       <- broken links, arrow at depth + 1
//
//   <br>--> link to <a>...</a>           <- each child, rendered recursively
//   # --> Child heading
//
//   <br>
//
//   <br>--> link to <a>...</a>           <- the next child
//
// Pages that never got analyzed only show their metadata, a marker telling
// how far they got, and the failures they logged.
// Empty sections are left out instead of leaving blank lines.
// =============================================================================

use super::{Page, PageState};
use crate::report::ReportStyle;

const NOT_FETCHED_MARKER: &str = "Webpage not fetched nor analyzed.";
const NOT_ANALYZED_MARKER: &str = "Webpage not analyzed.";

const SECTION_SEPARATOR: &str = "\n\n";
const CHILD_SEPARATOR: &str = "\n\n<br>\n\n";

impl Page {
    pub fn render_with(&self, style: &ReportStyle) -> String {
        let metadata = self.render_metadata(style);
        let failures = self.render_failures();

        match self.state() {
            PageState::Initialized => {
                join_sections(&[metadata, NOT_FETCHED_MARKER.to_string(), failures], "\n")
            }
            PageState::Fetched => {
                join_sections(&[metadata, NOT_ANALYZED_MARKER.to_string(), failures], "\n")
            }
            PageState::Analyzed | PageState::Translated => join_sections(
                &[
                    metadata,
                    self.render_headings(style),
                    self.render_broken_links(style),
                    self.render_children(style),
                    failures,
                ],
                SECTION_SEPARATOR,
            ),
        }
    }

    // The full block for a root page, a single link line for a child
    fn render_metadata(&self, style: &ReportStyle) -> String {
        if self.depth() > 0 {
            return self.link().render(self.depth(), style);
        }

        format!(
            "input: <a>{}</a>\n<br>max depth: {}\n<br>source language: {}\n<br>target language: {}\n<br>summary:",
            self.link(),
            self.max_depth(),
            self.source_language(),
            self.target_language()
        )
    }

    fn render_headings(&self, style: &ReportStyle) -> String {
        let lines: Vec<String> = self
            .headings()
            .iter()
            .map(|heading| heading.render(self.depth(), style))
            .collect();
        join_sections(&lines, "\n")
    }

    fn render_broken_links(&self, style: &ReportStyle) -> String {
        let lines: Vec<String> = self
            .broken_links()
            .iter()
            .map(|link| link.render(self.depth() + 1, style))
            .collect();
        join_sections(&lines, "\n")
    }

    fn render_children(&self, style: &ReportStyle) -> String {
        let children: Vec<String> = self
            .children()
            .iter()
            .map(|child| child.render_with(style))
            .collect();
        join_sections(&children, CHILD_SEPARATOR)
    }

    fn render_failures(&self) -> String {
        if self.failure_log().is_empty() {
            return String::new();
        }

        let mut lines = vec!["Logged failures:".to_string()];
        lines.extend(self.failure_log().iter().map(|e| e.to_string()));
        lines.join("\n")
    }
}

// Joins the non-blank parts with the separator
fn join_sections(parts: &[String], separator: &str) -> String {
    parts
        .iter()
        .filter(|part| !part.trim().is_empty())
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(separator)
}
