// src/crawl/mod.rs
// =============================================================================
// This module drives crawling for a whole batch of seed URLs.
//
// The crawl algorithm for a single tree (depth-first, shared seen set,
// broken-link capture) lives on the Page itself, see page/webpage.rs.
// This module only fans independent trees out over tokio tasks.
// =============================================================================

mod batch;

pub use batch::run_all;
