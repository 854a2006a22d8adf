// src/translate/deepl.rs
// =============================================================================
// A Translator backed by the DeepL REST API.
//
// Request (form-encoded POST, key in the Authorization header):
//   Authorization: DeepL-Auth-Key ...
//   target_lang=DE&text=first&text=second
//
// DeepL takes at most 50 texts per request, so a larger batch is sent as
// several requests whose results are concatenated in order.
//
// Response (JSON):
//   {"translations": [
//       {"detected_source_language": "EN", "text": "erste"},
//       {"detected_source_language": "EN", "text": "zweite"}
//   ]}
//
// DeepL detects the source language per text. We report the one that
// occurs most often as the language of the whole batch.
// =============================================================================

use super::{Language, Translation, Translator};
use crate::error::TranslationError;
use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, info};

pub const DEEPL_FREE_API_URL: &str = "https://api-free.deepl.com/v2/translate";
pub const DEEPL_PRO_API_URL: &str = "https://api.deepl.com/v2/translate";

// Upper bound on `text` fields in one request
const MAX_TEXTS_PER_REQUEST: usize = 50;

#[derive(Debug, Deserialize)]
struct TranslateResponse {
    translations: Vec<TranslatedText>,
}

#[derive(Debug, Deserialize)]
struct TranslatedText {
    detected_source_language: String,
    text: String,
}

#[derive(Debug, Clone)]
pub struct DeepLTranslator {
    client: Client,
    target_language: Language,
    auth_key: String,
    api_url: String,
}

impl DeepLTranslator {
    // Creates a translator for the free or the pro API
    //
    // Parameters:
    //   target_language: the language every text is translated into
    //   auth_key: the DeepL auth key
    //   is_pro: whether the key belongs to a paid account
    //   timeout: how long one translation request may take
    pub fn new(
        target_language: Language,
        auth_key: impl Into<String>,
        is_pro: bool,
        timeout: Duration,
    ) -> Result<Self, TranslationError> {
        let api_url = if is_pro {
            DEEPL_PRO_API_URL
        } else {
            DEEPL_FREE_API_URL
        };

        Self::with_api_url(target_language, auth_key, api_url, timeout)
    }

    /// Same as new(), but talking to an arbitrary endpoint
    pub fn with_api_url(
        target_language: Language,
        auth_key: impl Into<String>,
        api_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, TranslationError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            target_language,
            auth_key: auth_key.into(),
            api_url: api_url.into(),
        })
    }

    fn form_fields<'a>(&'a self, texts: &'a [String]) -> Vec<(&'static str, &'a str)> {
        let mut fields = Vec::with_capacity(texts.len() + 1);
        fields.push(("target_lang", self.target_language.tag()));
        fields.extend(texts.iter().map(|text| ("text", text.as_str())));
        fields
    }

    async fn request(&self, texts: &[String]) -> Result<TranslateResponse, TranslationError> {
        let response = self
            .client
            .post(&self.api_url)
            .header(AUTHORIZATION, format!("DeepL-Auth-Key {}", self.auth_key))
            .form(&self.form_fields(texts))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(TranslationError::from_status(status.as_u16()));
        }

        let body = response.text().await?;
        serde_json::from_str::<TranslateResponse>(&body)
            .map_err(|e| TranslationError::Decode(e.to_string()))
    }
}

// Picks the most frequent detected language
//
// Ties go to the language that was detected first. Tags we do not know
// are ignored; if nothing is left, the target language is assumed.
fn dominant_language(detected: &[TranslatedText], fallback: Language) -> Language {
    let mut counts: HashMap<Language, usize> = HashMap::new();
    let mut order: Vec<Language> = Vec::new();

    for translation in detected {
        if let Ok(language) = translation.detected_source_language.parse::<Language>() {
            let count = counts.entry(language).or_insert(0);
            if *count == 0 {
                order.push(language);
            }
            *count += 1;
        }
    }

    let mut best: Option<(Language, usize)> = None;
    for language in order {
        let count = counts[&language];
        if best.map_or(true, |(_, best_count)| count > best_count) {
            best = Some((language, count));
        }
    }

    best.map(|(language, _)| language).unwrap_or(fallback)
}

#[async_trait]
impl Translator for DeepLTranslator {
    fn target_language(&self) -> Language {
        self.target_language
    }

    async fn translate(&self, texts: &[String]) -> Result<Translation, TranslationError> {
        if texts.is_empty() {
            return Ok(Translation::empty(self.target_language));
        }

        let mut translations = Vec::with_capacity(texts.len());

        for chunk in texts.chunks(MAX_TEXTS_PER_REQUEST) {
            debug!("Sending {} text(s) to {}", chunk.len(), self.api_url);
            let response = self.request(chunk).await?;

            if response.translations.len() != chunk.len() {
                return Err(TranslationError::Decode(format!(
                    "expected {} translations, got {}",
                    chunk.len(),
                    response.translations.len()
                )));
            }

            translations.extend(response.translations);
        }

        let source_language = dominant_language(&translations, self.target_language);
        info!(
            "Translated {} text(s) from {} to {}",
            texts.len(),
            source_language,
            self.target_language
        );

        Ok(Translation {
            source_language,
            target_language: self.target_language,
            texts: translations.into_iter().map(|t| t.text).collect(),
        })
    }
}
