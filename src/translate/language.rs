// src/translate/language.rs
// =============================================================================
// The languages DeepL can translate to and from.
//
// A Language can be parsed from its tag ("DE", "de") or its name
// ("GERMAN", "german"), and prints as the lowercase name ("german").
// =============================================================================

use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    Bulgarian,
    Czech,
    Danish,
    German,
    Greek,
    English,
    Spanish,
    Estonian,
    Finnish,
    French,
    Hungarian,
    Italian,
    Japanese,
    Lithuanian,
    Latvian,
    Dutch,
    Polish,
    Portuguese,
    Romanian,
    Russian,
    Slovak,
    Slovenian,
    Swedish,
    Chinese,
}

// (language, tag, name), in the same order as the enum variants
const LANGUAGES: &[(Language, &str, &str)] = &[
    (Language::Bulgarian, "BG", "bulgarian"),
    (Language::Czech, "CS", "czech"),
    (Language::Danish, "DA", "danish"),
    (Language::German, "DE", "german"),
    (Language::Greek, "EL", "greek"),
    (Language::English, "EN", "english"),
    (Language::Spanish, "ES", "spanish"),
    (Language::Estonian, "ET", "estonian"),
    (Language::Finnish, "FI", "finnish"),
    (Language::French, "FR", "french"),
    (Language::Hungarian, "HU", "hungarian"),
    (Language::Italian, "IT", "italian"),
    (Language::Japanese, "JA", "japanese"),
    (Language::Lithuanian, "LT", "lithuanian"),
    (Language::Latvian, "LV", "latvian"),
    (Language::Dutch, "NL", "dutch"),
    (Language::Polish, "PL", "polish"),
    (Language::Portuguese, "PT", "portuguese"),
    (Language::Romanian, "RO", "romanian"),
    (Language::Russian, "RU", "russian"),
    (Language::Slovak, "SK", "slovak"),
    (Language::Slovenian, "SL", "slovenian"),
    (Language::Swedish, "SV", "swedish"),
    (Language::Chinese, "ZH", "chinese"),
];

impl Language {
    fn entry(self) -> &'static (Language, &'static str, &'static str) {
        &LANGUAGES[self as usize]
    }

    /// The DeepL language tag, e.g. "DE"
    pub fn tag(self) -> &'static str {
        self.entry().1
    }

    /// The lowercase English name, e.g. "german"
    pub fn name(self) -> &'static str {
        self.entry().2
    }
}

/// Returned when a string is neither a known tag nor a known name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown language '{0}'")]
pub struct UnknownLanguage(pub String);

impl FromStr for Language {
    type Err = UnknownLanguage;

    fn from_str(tag_or_name: &str) -> Result<Self, Self::Err> {
        LANGUAGES
            .iter()
            .find(|(_, tag, name)| {
                tag.eq_ignore_ascii_case(tag_or_name) || name.eq_ignore_ascii_case(tag_or_name)
            })
            .map(|(language, _, _)| *language)
            .ok_or_else(|| UnknownLanguage(tag_or_name.to_string()))
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
