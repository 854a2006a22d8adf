// src/source/html.rs
// =============================================================================
// This module fetches web pages and extracts their headings and links.
//
// We use the `scraper` crate which:
// - Parses HTML into a DOM (Document Object Model)
// - Supports CSS selectors for finding elements
//
// We also use the `url` crate to resolve relative links against the page
// URL, and `reqwest` to download the page in the first place.
//
// Links that are empty or that do not resolve to a recognized scheme
// (mailto:, javascript:, ...) are skipped. They are neither valid links
// nor broken links.
// =============================================================================

use super::{Document, DocumentSource};
use crate::error::{Error, Result};
use crate::page::{Heading, Level, Link};
use async_trait::async_trait;
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};
use std::collections::HashSet;
use std::time::Duration;
use tracing::debug;
use url::Url;

const HEADING_SELECTOR: &str = "h1, h2, h3, h4, h5, h6";
const LINK_SELECTOR: &str = "a[href]";

/// Fetches documents over HTTP(S)
#[derive(Debug, Clone)]
pub struct HttpDocumentSource {
    client: Client,
}

impl HttpDocumentSource {
    // Creates a source whose requests give up after `timeout`
    //
    // A timed-out request is an ordinary fetch failure.
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()
            .map_err(|e| Error::Fetch {
                location: "http client".to_string(),
                reason: e.to_string(),
            })?;

        Ok(Self { client })
    }
}

#[async_trait]
impl DocumentSource for HttpDocumentSource {
    async fn get_document(&self, location: &str) -> Result<Document> {
        let fetch_error = |reason: String| Error::Fetch {
            location: location.to_string(),
            reason,
        };

        debug!("GET {}", location);
        let response = self
            .client
            .get(location)
            .send()
            .await
            .map_err(|e| fetch_error(e.to_string()))?;

        if !response.status().is_success() {
            return Err(fetch_error(format!("HTTP {}", response.status().as_u16())));
        }

        // Relative links are relative to where we ended up after redirects
        let base = response.url().clone();
        let html = response
            .text()
            .await
            .map_err(|e| fetch_error(e.to_string()))?;

        Ok(parse_document(&html, &base))
    }
}

// Extracts headings and links from HTML content
//
// Parameters:
//   html: the HTML content to parse
//   base: the URL of the page (for resolving relative links)
pub fn parse_document(html: &str, base: &Url) -> Document {
    let document = Html::parse_document(html);

    Document {
        headings: extract_headings(&document),
        links: extract_links(&document, base),
    }
}

fn extract_headings(document: &Html) -> Vec<Heading> {
    // The selector is a constant and known to be valid
    let selector = Selector::parse(HEADING_SELECTOR).unwrap();

    document
        .select(&selector)
        .filter_map(|element| {
            let level = Level::from_tag(element.value().name())?;
            Some(Heading::new(level, element_text(&element)))
        })
        .collect()
}

// Collects all text below an element, collapsing runs of whitespace
fn element_text(element: &ElementRef) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

fn extract_links(document: &Html, base: &Url) -> Vec<Link> {
    let selector = Selector::parse(LINK_SELECTOR).unwrap();

    let mut seen = HashSet::new();
    let mut links = Vec::new();

    for element in document.select(&selector) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };

        if let Some(link) = resolve_link(base, href) {
            // Keep the first occurrence only
            if seen.insert(link.clone()) {
                links.push(link);
            }
        }
    }

    links
}

// Resolves a possibly-relative href to a Link
//
// Examples (base = "https://example.com/page/"):
//   "/docs"               -> https://example.com/docs
//   "../other?x=1"        -> https://example.com/other
//   "https://other.com"   -> https://other.com/
//   ""                    -> None
//   "javascript:void(0)"  -> None
fn resolve_link(base: &Url, href: &str) -> Option<Link> {
    let href = href.trim();
    if href.is_empty() {
        return None;
    }

    let absolute = base.join(href).ok()?;
    Link::from_url(&absolute).ok()
}
