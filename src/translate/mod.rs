// src/translate/mod.rs
// =============================================================================
// This module contains everything translation related.
//
// Submodules:
// - language: the languages the service knows about
// - deepl: the DeepL API client
//
// A Translator takes an ordered batch of texts and returns the translated
// texts in the same order, together with the dominant source language it
// detected. The crawler calls it exactly once per crawl tree.
// =============================================================================

mod deepl;
mod language;

pub use deepl::DeepLTranslator;
pub use language::Language;

use crate::error::TranslationError;
use async_trait::async_trait;

/// The answer of one batch translation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translation {
    pub source_language: Language,
    pub target_language: Language,
    /// Same length and order as the texts that were sent
    pub texts: Vec<String>,
}

impl Translation {
    // The answer for an empty batch: nothing was translated, so the
    // source language is taken to be the target language
    pub fn empty(target_language: Language) -> Self {
        Self {
            source_language: target_language,
            target_language,
            texts: Vec::new(),
        }
    }
}

#[async_trait]
pub trait Translator: Send + Sync {
    /// The language this translator translates into
    fn target_language(&self) -> Language;

    // Translates all texts in one call
    //
    // Implementations must answer an empty batch with Translation::empty
    // without contacting the service.
    async fn translate(&self, texts: &[String]) -> Result<Translation, TranslationError>;
}
