// src/source/mod.rs
// =============================================================================
// This module defines where pages come from.
//
// A DocumentSource takes a location (a URL string) and hands back the two
// things the crawler cares about: the headings and the links of that page.
// The crawler never sees HTML, which keeps the page logic testable with a
// simple in-memory source.
//
// Submodules:
// - html: the real source, fetching pages over HTTP and parsing them
// =============================================================================

mod html;

pub use html::HttpDocumentSource;

use crate::error::Result;
use crate::page::{Heading, Link};
use async_trait::async_trait;

/// The structural content of one fetched page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    /// Headings in document order
    pub headings: Vec<Heading>,
    /// Absolute links in document order, without duplicates
    pub links: Vec<Link>,
}

#[async_trait]
pub trait DocumentSource: Send + Sync {
    // Retrieves and parses the page at `location`
    //
    // Any retrieval problem (network, non-2xx status, unreadable body) is
    // reported as Error::Fetch.
    async fn get_document(&self, location: &str) -> Result<Document>;
}
