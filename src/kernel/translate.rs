//! English/Korean translation through the completion service, with input
//! validation and a PII screen that runs before anything leaves the process.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

use crate::kernel::services::ports::{CompletionRequest, CompletionService};

const TRANSLATION_TEMPERATURE: f32 = 0.3;

const PII_PATTERNS: &[(&str, &str)] = &[
    ("Email", r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b"),
    ("Phone", r"(\+\d{1,3}[-.\s]?)?\(?\d{3}\)?[-.\s]?\d{3}[-.\s]?\d{4}\b"),
    ("SSN", r"\b\d{3}-\d{2}-\d{4}\b"),
    ("Credit Card", r"\b\d{4}[-\s]?\d{4}[-\s]?\d{4}[-\s]?\d{4}\b"),
    (
        "Address",
        r"(?i)\b\d+\s+[A-Za-z]+\s+(Street|St|Avenue|Ave|Road|Rd|Boulevard|Blvd|Lane|Ln|Drive|Dr)\b",
    ),
];

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    En,
    Ko,
}

impl Language {
    pub fn parse(code: &str) -> Option<Self> {
        match code {
            "en" => Some(Language::En),
            "ko" => Some(Language::Ko),
            _ => None,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Ko => "ko",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Ko => "Korean",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationRequest {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub source_lang: Option<String>,
    #[serde(default)]
    pub target_lang: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Translation {
    pub translated_text: String,
    pub source_lang: Option<Language>,
    pub target_lang: Language,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranslateError {
    MissingInput,
    UnsupportedLanguage,
    PiiDetected(Vec<&'static str>),
    ServiceUnavailable(String),
}

impl TranslateError {
    /// Short error title reported alongside the message.
    pub fn title(&self) -> &'static str {
        match self {
            TranslateError::MissingInput | TranslateError::UnsupportedLanguage => {
                "Invalid Request"
            }
            TranslateError::PiiDetected(_) => "PII Detected",
            TranslateError::ServiceUnavailable(_) => "Translation Failed",
        }
    }
}

impl fmt::Display for TranslateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TranslateError::MissingInput => write!(f, "Text and target language are required"),
            TranslateError::UnsupportedLanguage => {
                write!(f, "Only English (en) and Korean (ko) are supported")
            }
            TranslateError::PiiDetected(types) => write!(
                f,
                "Your text contains potentially sensitive information ({}). Please remove personal information before translating.",
                types.join(", ")
            ),
            TranslateError::ServiceUnavailable(_) => write!(
                f,
                "The translation service is temporarily unavailable. Please try again in a moment."
            ),
        }
    }
}

impl std::error::Error for TranslateError {}

fn pii_patterns() -> &'static [(&'static str, Regex)] {
    static PATTERNS: OnceLock<Vec<(&'static str, Regex)>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        PII_PATTERNS
            .iter()
            .filter_map(|(name, pattern)| Regex::new(pattern).ok().map(|re| (*name, re)))
            .collect()
    })
}

/// Names of the PII categories found in `text`, in a fixed order.
pub fn detect_pii(text: &str) -> Vec<&'static str> {
    pii_patterns()
        .iter()
        .filter(|(_, re)| re.is_match(text))
        .map(|(name, _)| *name)
        .collect()
}

/// Checks the request without contacting the service. Returns the text and
/// the resolved language pair.
pub fn validate(
    request: &TranslationRequest,
) -> Result<(&str, Option<Language>, Language), TranslateError> {
    let text = request
        .text
        .as_deref()
        .filter(|t| !t.is_empty())
        .ok_or(TranslateError::MissingInput)?;
    let target = request
        .target_lang
        .as_deref()
        .filter(|t| !t.is_empty())
        .ok_or(TranslateError::MissingInput)?;

    let target = Language::parse(target).ok_or(TranslateError::UnsupportedLanguage)?;
    let source = match request.source_lang.as_deref().filter(|s| !s.is_empty()) {
        Some(code) => Some(Language::parse(code).ok_or(TranslateError::UnsupportedLanguage)?),
        None => None,
    };

    let detected = detect_pii(text);
    if !detected.is_empty() {
        return Err(TranslateError::PiiDetected(detected));
    }
    Ok((text, source, target))
}

/// An unspecified source is treated as Korean.
pub fn translation_prompt(text: &str, source: Option<Language>, target: Language) -> String {
    let source = source.unwrap_or(Language::Ko);
    format!(
        "Translate the following text from {} to {}.\nProvide ONLY the translation without any explanations, notes, or additional text.\n\nText to translate:\n{}",
        source.display_name(),
        target.display_name(),
        text
    )
}

pub fn translate(
    service: &dyn CompletionService,
    request: &TranslationRequest,
) -> Result<Translation, TranslateError> {
    let (text, source, target) = validate(request)?;
    let completion = CompletionRequest {
        system_prompt: String::new(),
        user_message: translation_prompt(text, source, target),
        temperature: TRANSLATION_TEMPERATURE,
    };
    match service.complete(completion) {
        Ok(translated) => Ok(Translation {
            translated_text: translated.trim().to_string(),
            source_lang: source,
            target_lang: target,
        }),
        Err(e) => {
            tracing::error!(error = %e, target = target.code(), "translation failed");
            Err(TranslateError::ServiceUnavailable(e.to_string()))
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/translate.rs"]
mod tests;
