// src/page/state.rs
// =============================================================================
// The lifecycle of a page:
//
//   Initialized --fetch--> Fetched --analyze--> Analyzed --translate--> Translated
//
// There is no way back and no way to skip a step.
// =============================================================================

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageState {
    /// Created, nothing downloaded yet
    Initialized,
    /// Document downloaded, not yet looked at
    Fetched,
    /// Headings and links extracted, children crawled
    Analyzed,
    /// Headings of the whole tree translated (terminal)
    Translated,
}

impl fmt::Display for PageState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PageState::Initialized => "initialized",
            PageState::Fetched => "fetched",
            PageState::Analyzed => "analyzed",
            PageState::Translated => "translated",
        };
        f.write_str(name)
    }
}
