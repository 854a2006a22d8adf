// src/testing.rs
// =============================================================================
// In-memory stand-ins for the document source and the translator, shared by
// the unit tests of the page, report and crawl modules.
// =============================================================================

use crate::error::{Error, Result, TranslationError};
use crate::page::{Heading, Link};
use crate::source::{Document, DocumentSource};
use crate::translate::{Language, Translation, Translator};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Serves pages from a map; every other location fails to fetch
#[derive(Default)]
pub struct FakeSource {
    pages: HashMap<String, Document>,
    requests: Mutex<Vec<String>>,
}

impl FakeSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, url: &str, headings: Vec<Heading>, links: &[&str]) -> Self {
        let document = Document {
            headings,
            links: links.iter().map(|l| Link::parse(l).unwrap()).collect(),
        };
        self.pages.insert(url.to_string(), document);
        self
    }

    /// Every location requested so far, in order
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl DocumentSource for FakeSource {
    async fn get_document(&self, location: &str) -> Result<Document> {
        self.requests.lock().unwrap().push(location.to_string());

        self.pages.get(location).cloned().ok_or_else(|| Error::Fetch {
            location: location.to_string(),
            reason: "document could not be fetched".to_string(),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Behavior {
    /// Prefixes every text with "translated: "
    Prefix,
    /// Returns every text unchanged
    Identity,
    /// Always fails
    Fail,
    /// Returns one text too few
    DropLast,
}

/// Counts calls and answers according to its Behavior
pub struct FakeTranslator {
    behavior: Behavior,
    calls: AtomicUsize,
    batches: Mutex<Vec<Vec<String>>>,
}

impl FakeTranslator {
    pub fn new(behavior: Behavior) -> Self {
        Self {
            behavior,
            calls: AtomicUsize::new(0),
            batches: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// The texts of every call, in order
    pub fn batches(&self) -> Vec<Vec<String>> {
        self.batches.lock().unwrap().clone()
    }
}

#[async_trait]
impl Translator for FakeTranslator {
    fn target_language(&self) -> Language {
        Language::English
    }

    async fn translate(&self, texts: &[String]) -> std::result::Result<Translation, TranslationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.batches.lock().unwrap().push(texts.to_vec());

        let texts = match self.behavior {
            Behavior::Prefix => texts.iter().map(|t| format!("translated: {}", t)).collect(),
            Behavior::Identity => texts.to_vec(),
            Behavior::Fail => return Err(TranslationError::QuotaExceeded),
            Behavior::DropLast => texts[..texts.len().saturating_sub(1)].to_vec(),
        };

        Ok(Translation {
            source_language: Language::German,
            target_language: Language::English,
            texts,
        })
    }
}
