// src/error.rs
// =============================================================================
// Error types shared by every module of the crawler.
//
// Taxonomy:
// - InvalidLink: a URL that cannot become a Link (bad input)
// - IllegalStateTransition: a page operation called out of lifecycle order
// - Fetch: the document source could not deliver a page
// - Translation: the translation service refused or failed
// - HeadingCountMismatch: the translation came back with the wrong length
//
// InvalidLink and IllegalStateTransition are programming/input errors and
// are always handed back to the caller. Fetch errors of child pages are
// turned into broken links by the crawl (see page/webpage.rs).
// =============================================================================

use crate::page::PageState;
use thiserror::Error;

/// Result type used throughout the crawler
pub type Result<T> = std::result::Result<T, Error>;

/// Every failure the crawler can report
#[derive(Debug, Error)]
pub enum Error {
    /// The string is not a well-formed absolute URL with a recognized scheme
    #[error("invalid link '{url}': {reason}")]
    InvalidLink { url: String, reason: String },

    /// A page operation was invoked in the wrong lifecycle state
    #[error("cannot {operation}: page must be {required} but is {actual}")]
    IllegalStateTransition {
        operation: &'static str,
        required: PageState,
        actual: PageState,
    },

    /// The document source failed (network, non-2xx, parse failure)
    #[error("could not fetch '{location}': {reason}")]
    Fetch { location: String, reason: String },

    /// The translation service failed
    #[error("translation failed: {0}")]
    Translation(#[from] TranslationError),

    /// The translated batch does not line up with the aggregated headings
    #[error("translation returned {actual} texts for {expected} headings")]
    HeadingCountMismatch { expected: usize, actual: usize },

    /// Writing the report failed
    #[error("could not write report: {0}")]
    Output(#[from] std::io::Error),

    /// A crawl task panicked or was cancelled
    #[error("crawl task failed: {0}")]
    Worker(String),
}

/// Failures of the translation service, following DeepL's status codes
#[derive(Debug, Error)]
pub enum TranslationError {
    #[error("Bad request. Please check error message and your parameters.")]
    BadRequest,

    #[error("Authorization failed. Please supply a valid auth key.")]
    AuthorizationFailed,

    #[error("The requested resource could not be found.")]
    ResourceNotFound,

    #[error("The request size exceeds the limit.")]
    RequestSizeExceedsLimit,

    #[error("The request URL is too long.")]
    RequestUrlTooLong,

    #[error("Too many requests. Please wait and resend your request.")]
    TooManyRequests,

    #[error("Quota exceeded. The character limit has been reached.")]
    QuotaExceeded,

    #[error("Resource currently unavailable. Try again later.")]
    ResourceUnavailable,

    #[error("Internal error (HTTP {0})")]
    Internal(u16),

    /// The request never got an answer (DNS, TLS, timeout, ...)
    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The answer could not be understood
    #[error("malformed response: {0}")]
    Decode(String),
}

impl TranslationError {
    // Maps an unsuccessful HTTP status code to the service's taxonomy
    //
    // 429 and 529 both mean the client is sending too fast.
    pub fn from_status(code: u16) -> Self {
        match code {
            400 => TranslationError::BadRequest,
            403 => TranslationError::AuthorizationFailed,
            404 => TranslationError::ResourceNotFound,
            413 => TranslationError::RequestSizeExceedsLimit,
            414 => TranslationError::RequestUrlTooLong,
            429 | 529 => TranslationError::TooManyRequests,
            456 => TranslationError::QuotaExceeded,
            503 => TranslationError::ResourceUnavailable,
            other => TranslationError::Internal(other),
        }
    }
}
