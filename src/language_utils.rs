//! Language utilities for blog language codes
//!
//! The blog keys its translations by short codes (`vi`, `en`, `cn`, `kr`, `jp`),
//! some of which are not ISO 639-1 codes. The translation service expects locale
//! tags, so every code is mapped before a request is made.

use anyhow::{Result, anyhow};
use isolang::Language;

/// Code understood by the translation service as "detect the source language"
pub const AUTO_DETECT: &str = "auto";

/// Language used as the intermediate step of the fallback chain
pub const PIVOT_LANGUAGE: &str = "en";

/// Languages the blog ships translations for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlogLanguage {
    Vietnamese,
    English,
    Chinese,
    Korean,
    Japanese,
}

impl BlogLanguage {
    /// All supported blog languages, in display order
    pub const ALL: [BlogLanguage; 5] = [
        Self::Vietnamese,
        Self::English,
        Self::Chinese,
        Self::Korean,
        Self::Japanese,
    ];

    /// Look up a blog language by its short code
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_lowercase().as_str() {
            "vi" => Some(Self::Vietnamese),
            "en" => Some(Self::English),
            "cn" => Some(Self::Chinese),
            "kr" => Some(Self::Korean),
            "jp" => Some(Self::Japanese),
            _ => None,
        }
    }

    /// Short code used as a key in `Post::translations`
    pub fn code(&self) -> &'static str {
        match self {
            Self::Vietnamese => "vi",
            Self::English => "en",
            Self::Chinese => "cn",
            Self::Korean => "kr",
            Self::Japanese => "jp",
        }
    }

    /// Locale tag sent to the translation service
    pub fn locale_tag(&self) -> &'static str {
        match self {
            Self::Vietnamese => "vi-VN",
            Self::English => "en-US",
            Self::Chinese => "zh-CN",
            Self::Korean => "ko-KR",
            Self::Japanese => "ja-JP",
        }
    }

    /// ISO 639-1 code of the language
    pub fn iso_639_1(&self) -> &'static str {
        match self {
            Self::Vietnamese => "vi",
            Self::English => "en",
            Self::Chinese => "zh",
            Self::Korean => "ko",
            Self::Japanese => "ja",
        }
    }
}

/// Map a blog language code to the code sent to the translation service.
///
/// Known blog codes become locale tags, `auto` is passed through unmapped and
/// anything else is forwarded untouched.
pub fn to_service_code(code: &str) -> String {
    if code == AUTO_DETECT {
        return AUTO_DETECT.to_string();
    }

    match BlogLanguage::from_code(code) {
        Some(lang) => lang.locale_tag().to_string(),
        None => code.to_string(),
    }
}

/// Check whether a code denotes the pivot language of the fallback chain
pub fn is_pivot_language(code: &str, pivot: &str) -> bool {
    primary_subtag(code) == primary_subtag(pivot)
}

/// Reduce a blog code or locale tag to its lowercase ISO language part
fn primary_subtag(code: &str) -> String {
    let normalized_code = code.trim().to_lowercase();
    match BlogLanguage::from_code(&normalized_code) {
        Some(lang) => lang.iso_639_1().to_string(),
        None => normalized_code
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_string(),
    }
}

/// Canonical form of a language code: trimmed and lowercase
pub fn normalize_code(code: &str) -> String {
    code.trim().to_lowercase()
}

/// Validate a language code used in configuration or on the command line.
///
/// Accepts the blog codes plus any ISO 639-1 code.
pub fn validate_language_code(code: &str) -> Result<()> {
    let normalized_code = normalize_code(code);

    if BlogLanguage::from_code(&normalized_code).is_some() {
        return Ok(());
    }

    if normalized_code.len() == 2 && Language::from_639_1(&normalized_code).is_some() {
        return Ok(());
    }

    Err(anyhow!("Invalid language code: {}", code))
}

/// Get the English language name for a blog or ISO 639-1 code
pub fn get_language_name(code: &str) -> Result<String> {
    let normalized_code = normalize_code(code);
    let iso = match BlogLanguage::from_code(&normalized_code) {
        Some(lang) => lang.iso_639_1().to_string(),
        None => normalized_code,
    };

    let lang = Language::from_639_1(&iso)
        .ok_or_else(|| anyhow!("Failed to get language from code: {}", code))?;

    Ok(lang.to_name().to_string())
}

/// Human readable label for log and CLI output, e.g. `Japanese (jp)`.
///
/// Codes without a known name are shown as is.
pub fn describe_language(code: &str) -> String {
    match get_language_name(code) {
        Ok(name) => format!("{} ({})", name, normalize_code(code)),
        Err(_) => code.to_string(),
    }
}
