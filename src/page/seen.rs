// src/page/seen.rs
// =============================================================================
// The set of links already claimed by some page of a crawl tree.
//
// One SeenLinks belongs to one tree. The root page owns it and lends it
// (as &mut) to every child while the tree is being expanded, one child
// at a time. Two trees never share a set, so no lock is needed.
// =============================================================================

use super::Link;
use std::collections::HashSet;

#[derive(Debug, Default)]
pub struct SeenLinks {
    links: HashSet<Link>,
}

impl SeenLinks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, link: &Link) -> bool {
        self.links.contains(link)
    }

    /// Returns false if the link was already seen
    pub fn insert(&mut self, link: Link) -> bool {
        self.links.insert(link)
    }
}
