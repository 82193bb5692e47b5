use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use crate::stopwords::{ENGLISH, GERMAN};

lazy_static! {
    static ref TOKEN_RE: Regex =
        Regex::new(r"\p{L}[\p{L}\p{M}\p{N}_'’\-]*|\p{N}+(?:[.,]\p{N}+)*|\S").expect("valid regex");
    static ref PUNCT_RE: Regex = Regex::new(r"^\p{P}+$").expect("valid regex");
    static ref DIGIT_RE: Regex = Regex::new(r"^\p{Nd}+$").expect("valid regex");
    static ref GERMAN_STOPWORDS: HashSet<&'static str> = GERMAN.iter().copied().collect();
    static ref ENGLISH_STOPWORDS: HashSet<&'static str> = ENGLISH.iter().copied().collect();
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TextError {
    #[error("empty string is not valid for text processing")]
    EmptyInput,
    #[error("no valid tokens were found; use content words, avoid digits and punctuation")]
    NoValidTokens,
}

/// Language whose stopword list drives `Token::is_stop`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    German,
    English,
}

impl Language {
    fn stopwords(self) -> &'static HashSet<&'static str> {
        match self {
            Language::German => &GERMAN_STOPWORDS,
            Language::English => &ENGLISH_STOPWORDS,
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown language {0:?}, expected `german` or `english`")]
pub struct UnknownLanguage(String);

impl FromStr for Language {
    type Err = UnknownLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "german" | "de" => Ok(Language::German),
            "english" | "en" => Ok(Language::English),
            _ => Err(UnknownLanguage(s.to_string())),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Language::German => f.write_str("german"),
            Language::English => f.write_str("english"),
        }
    }
}

/// A surface token together with its linguistic flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub text: &'a str,
    pub is_stop: bool,
    pub is_punct: bool,
    pub is_digit: bool,
}

/// Which token classes `Normalizer::normalize` drops.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizeOptions {
    pub filter_stopwords: bool,
    pub filter_punct: bool,
    pub filter_digits: bool,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self { filter_stopwords: false, filter_punct: true, filter_digits: true }
    }
}

impl NormalizeOptions {
    /// Keep every token.
    pub fn none() -> Self {
        Self { filter_stopwords: false, filter_punct: false, filter_digits: false }
    }

    pub fn with_stopwords(mut self) -> Self {
        self.filter_stopwords = true;
        self
    }

    fn drops(&self, tok: &Token<'_>) -> bool {
        (self.filter_stopwords && tok.is_stop)
            || (self.filter_punct && tok.is_punct)
            || (self.filter_digits && tok.is_digit)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Normalizer {
    language: Language,
}

impl Normalizer {
    pub fn new(language: Language) -> Self {
        Self { language }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// Split text into annotated tokens, in order of appearance.
    pub fn annotate<'a>(&self, text: &'a str) -> Vec<Token<'a>> {
        let stopwords = self.language.stopwords();
        TOKEN_RE
            .find_iter(text)
            .map(|m| {
                let surface = m.as_str();
                Token {
                    text: surface,
                    is_stop: stopwords.contains(surface.to_lowercase().as_str()),
                    is_punct: PUNCT_RE.is_match(surface),
                    is_digit: DIGIT_RE.is_match(surface),
                }
            })
            .collect()
    }

    /// Tokenize `text` and drop the token classes selected in `options`.
    /// Surface forms are returned unchanged.
    pub fn normalize(&self, text: &str, options: NormalizeOptions) -> Result<Vec<String>, TextError> {
        if text.is_empty() {
            return Err(TextError::EmptyInput);
        }
        let tokens: Vec<String> = self
            .annotate(text)
            .into_iter()
            .filter(|tok| !options.drops(tok))
            .map(|tok| tok.text.to_string())
            .collect();
        if tokens.is_empty() {
            return Err(TextError::NoValidTokens);
        }
        Ok(tokens)
    }
}
