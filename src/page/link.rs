// src/page/link.rs
// =============================================================================
// A Link is the canonical, comparable form of a URL.
//
// What we keep:
// - scheme (https), host (example.com, plus a non-default port), path (/docs)
// - a "broken" flag, set when fetching the link failed
//
// What we drop:
// - query strings and fragments, so "/docs?a=1#intro" and "/docs" are the
//   same page as far as the crawler is concerned
//
// Two Links are equal only when all four fields match, so a broken copy of
// a link is a different value than the link itself.
// =============================================================================

use crate::error::{Error, Result};
use crate::report::{Arrow, ReportStyle};
use std::fmt;
use url::Url;

// Schemes a Link may use. Anything else (mailto:, javascript:, data:, ...)
// is not a link at all.
const RECOGNIZED_SCHEMES: &[&str] = &["http", "https", "ftp", "file"];

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Link {
    scheme: String,
    host: String,
    path: String,
    broken: bool,
}

impl Link {
    // Builds a Link from its parts
    //
    // Fails with InvalidLink unless scheme + "://" + host + path is a valid
    // URL with a recognized scheme.
    pub fn new(scheme: &str, host: &str, path: &str, broken: bool) -> Result<Self> {
        let recombined = format!("{}://{}{}", scheme, host, path);

        if !RECOGNIZED_SCHEMES.contains(&scheme) {
            return Err(Error::InvalidLink {
                url: recombined,
                reason: format!("unrecognized scheme '{}'", scheme),
            });
        }

        Url::parse(&recombined).map_err(|e| Error::InvalidLink {
            url: recombined.clone(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            scheme: scheme.to_string(),
            host: host.to_string(),
            path: path.to_string(),
            broken,
        })
    }

    // Parses an absolute URL string, stripping its query and fragment
    //
    // Example:
    //   "https://example.com/docs?page=2#top" -> https://example.com/docs
    pub fn parse(url: &str) -> Result<Self> {
        let parsed = Url::parse(url).map_err(|e| Error::InvalidLink {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        Self::from_url(&parsed)
    }

    // Same as parse(), for a URL that is already parsed
    pub fn from_url(url: &Url) -> Result<Self> {
        let host = match (url.host_str(), url.port()) {
            (Some(host), Some(port)) => format!("{}:{}", host, port),
            (Some(host), None) => host.to_string(),
            (None, _) => String::new(),
        };

        Self::new(url.scheme(), &host, url.path(), false)
    }

    /// A copy of this link marked as broken
    pub fn to_broken(&self) -> Link {
        Link {
            broken: true,
            ..self.clone()
        }
    }

    // Renders the link as one report line, indented by an arrow
    //
    //   "<br>--> link to <a>https://example.com/docs</a>\n"
    //   "<br>--> broken link <a>https://example.com/gone</a>\n"
    pub fn render(&self, nesting_level: usize, style: &ReportStyle) -> String {
        let arrow = Arrow::new(nesting_level, style.arrow_width);

        if self.broken {
            format!("<br>{} broken link <a>{}</a>\n", arrow, self)
        } else {
            format!("<br>{} link to <a>{}</a>\n", arrow, self)
        }
    }
}

impl fmt::Display for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}://{}{}", self.scheme, self.host, self.path)
    }
}
