// src/page/mod.rs
// =============================================================================
// This module contains the crawler's core: pages and what they are made of.
//
// Submodules:
// - link: canonical URLs (query and fragment stripped)
// - heading: <h1>..<h6> elements
// - state: the page lifecycle states
// - seen: the dedup set shared by all pages of one crawl tree
// - webpage: the Page itself (fetch, analyze/crawl, translate)
// - render: turning a Page into report text
// =============================================================================

mod heading;
mod link;
mod render;
mod seen;
mod state;
mod webpage;

pub use heading::{Heading, Level};
pub use link::Link;
pub use seen::SeenLinks;
pub use state::PageState;
pub use webpage::Page;
