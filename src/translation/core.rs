/*!
 * Core translation service implementation.
 *
 * This module contains the main TranslationService struct: chunked text
 * translation with the English fallback chain, and line-by-line Markdown
 * translation. Every remote call is awaited in sequence and followed by a
 * fixed delay so that a free API's rate limit is respected.
 */

use anyhow::{Result, anyhow};
use log::{debug, error, warn};
use std::sync::Arc;
use std::time::Duration;
use url::Url;

use crate::app_config::TranslationConfig;
use crate::errors::ProviderError;
use crate::language_utils::{self, AUTO_DETECT};
use crate::providers::mymemory::MyMemory;
use crate::providers::{Provider, TranslationRequest};
use super::cache::{TranslationCache, truncate_text};
use super::chunker::split_text;
use super::markdown::LineRecord;

/// Translation options for customizing the translation process
#[derive(Debug, Clone)]
pub struct TranslationOptions {
    /// Maximum characters per request
    pub max_chunk_chars: usize,

    /// Pause after every chunk-level request
    pub request_delay: Duration,

    /// Intermediate language of the fallback chain (blog code)
    pub pivot_language: String,
}

impl TranslationOptions {
    /// Build options from the translation section of the config
    pub fn from_config(config: &TranslationConfig) -> Self {
        Self {
            max_chunk_chars: config.max_chunk_chars,
            request_delay: config.request_delay(),
            pivot_language: config.pivot_language.clone(),
        }
    }
}

impl Default for TranslationOptions {
    fn default() -> Self {
        Self::from_config(&TranslationConfig::default())
    }
}

/// How a chunk ended up translated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutcomeStatus {
    /// Translated by a single source -> target request
    Direct,
    /// Translated through the pivot language after the direct request failed
    ViaPivot,
    /// Served from the cache without a request
    Cached,
    /// Every attempt failed; the original text is returned
    Degraded,
}

/// Result of translating one chunk. Never an error: failures degrade to the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationOutcome {
    pub text: String,
    pub status: OutcomeStatus,
}

impl TranslationOutcome {
    fn new(text: impl Into<String>, status: OutcomeStatus) -> Self {
        Self { text: text.into(), status }
    }

    /// Whether the text is the untranslated input
    pub fn is_degraded(&self) -> bool {
        self.status == OutcomeStatus::Degraded
    }
}

/// Per-status chunk counts for a translated text, document or post
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TranslationReport {
    pub direct: usize,
    pub via_pivot: usize,
    pub cached: usize,
    pub degraded: usize,
}

impl TranslationReport {
    /// Count one chunk outcome
    pub fn record(&mut self, status: OutcomeStatus) {
        match status {
            OutcomeStatus::Direct => self.direct += 1,
            OutcomeStatus::ViaPivot => self.via_pivot += 1,
            OutcomeStatus::Cached => self.cached += 1,
            OutcomeStatus::Degraded => self.degraded += 1,
        }
    }

    /// Add another report's counts to this one
    pub fn merge(&mut self, other: &TranslationReport) {
        self.direct += other.direct;
        self.via_pivot += other.via_pivot;
        self.cached += other.cached;
        self.degraded += other.degraded;
    }

    /// Number of chunks seen
    pub fn total_chunks(&self) -> usize {
        self.direct + self.via_pivot + self.cached + self.degraded
    }

    /// Whether at least one chunk was left untranslated
    pub fn is_degraded(&self) -> bool {
        self.degraded > 0
    }
}

/// Main translation service for blog content
pub struct TranslationService {
    /// Provider that performs single requests
    provider: Arc<dyn Provider>,

    /// Translation options
    pub options: TranslationOptions,

    /// Translation cache for storing and retrieving translations
    pub cache: TranslationCache,
}

impl TranslationService {
    /// Create a new translation service talking to MyMemory
    pub fn new(config: &TranslationConfig) -> Result<Self> {
        Url::parse(&config.endpoint)
            .map_err(|e| anyhow!("Invalid translation endpoint {}: {}", config.endpoint, e))?;

        let client = MyMemory::new(config.endpoint.clone(), config.timeout())
            .with_contact_email(config.contact_email.clone());

        Ok(Self::with_provider(
            Arc::new(client),
            TranslationOptions::from_config(config),
            TranslationCache::new(config.cache_enabled),
        ))
    }

    /// Create a service around any provider
    pub fn with_provider(provider: Arc<dyn Provider>, options: TranslationOptions, cache: TranslationCache) -> Self {
        Self { provider, options, cache }
    }

    /// Name of the underlying provider
    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Translate ad hoc text. A missing source language means auto-detection.
    pub async fn translate(&self, text: &str, target_lang: &str, source_lang: Option<&str>) -> String {
        let source_lang = source_lang.unwrap_or(AUTO_DETECT);
        self.translate_text_with_report(text, source_lang, target_lang).await.0
    }

    /// Translate plain text chunk by chunk, joining the chunks with single spaces
    pub async fn translate_text_with_report(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> (String, TranslationReport) {
        let mut report = TranslationReport::default();

        if text.trim().is_empty() {
            return (String::new(), report);
        }

        let chunks = split_text(text, self.options.max_chunk_chars);
        let mut translated_chunks = Vec::with_capacity(chunks.len());

        for chunk in &chunks {
            let outcome = self.translate_with_fallback(chunk, source_lang, target_lang).await;
            report.record(outcome.status);
            translated_chunks.push(outcome.text);
        }

        (translated_chunks.join(" "), report)
    }

    /// Translate one chunk, falling back to the pivot language and finally to the input
    pub async fn translate_with_fallback(&self, chunk: &str, source_lang: &str, target_lang: &str) -> TranslationOutcome {
        let source = language_utils::to_service_code(source_lang);
        let target = language_utils::to_service_code(target_lang);

        if let Some(cached) = self.cache.get(chunk, &source, &target) {
            return TranslationOutcome::new(cached, OutcomeStatus::Cached);
        }

        let outcome = self.attempt_chain(chunk, source_lang, target_lang, &source, &target).await;

        // Paid after failures too
        self.pause().await;

        if !outcome.is_degraded() {
            self.cache.store(chunk, &source, &target, &outcome.text);
        }

        outcome
    }

    async fn attempt_chain(
        &self,
        chunk: &str,
        source_lang: &str,
        target_lang: &str,
        source: &str,
        target: &str,
    ) -> TranslationOutcome {
        let direct_error = match self.direct(chunk, source, target).await {
            Ok(text) => return TranslationOutcome::new(text, OutcomeStatus::Direct),
            Err(e) => e,
        };

        let pivot_lang = self.options.pivot_language.as_str();
        if language_utils::is_pivot_language(source_lang, pivot_lang)
            || language_utils::is_pivot_language(target_lang, pivot_lang)
        {
            warn!("Direct translation failed for {} -> {}: {}", source, target, direct_error);
            return TranslationOutcome::new(chunk, OutcomeStatus::Degraded);
        }

        warn!(
            "Direct translation failed for {} -> {} ({}), trying via {}...",
            source, target, direct_error, pivot_lang
        );

        let pivot = language_utils::to_service_code(pivot_lang);
        let chained = match self.direct(chunk, source, &pivot).await {
            Ok(intermediate) => self.direct(&intermediate, &pivot, target).await,
            Err(e) => Err(e),
        };

        match chained {
            Ok(text) => {
                debug!("Translated via {}: {} -> {}", pivot, source, target);
                TranslationOutcome::new(text, OutcomeStatus::ViaPivot)
            }
            Err(e) => {
                error!(
                    "Fallback translation also failed for '{}': {}",
                    truncate_text(chunk, 30),
                    e
                );
                TranslationOutcome::new(chunk, OutcomeStatus::Degraded)
            }
        }
    }

    async fn direct(&self, text: &str, source: &str, target: &str) -> Result<String, ProviderError> {
        self.provider
            .translate(TranslationRequest::new(text, source, target))
            .await
    }

    async fn pause(&self) {
        if !self.options.request_delay.is_zero() {
            tokio::time::sleep(self.options.request_delay).await;
        }
    }

    /// Translate a Markdown document line by line, keeping heading and list markers
    pub async fn translate_markdown(&self, markdown: &str, target_lang: &str, source_lang: &str) -> String {
        self.translate_markdown_with_report(markdown, source_lang, target_lang).await.0
    }

    /// Markdown translation that also reports how each chunk was translated
    pub async fn translate_markdown_with_report(
        &self,
        markdown: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> (String, TranslationReport) {
        let mut report = TranslationReport::default();
        let mut translated_lines = Vec::new();

        for line in markdown.split('\n') {
            let record = LineRecord::classify(line);

            let Some(span) = record.translatable_text() else {
                translated_lines.push(line.to_string());
                continue;
            };

            let (translated, line_report) = self
                .translate_text_with_report(span, source_lang, target_lang)
                .await;
            report.merge(&line_report);
            translated_lines.push(record.reassemble(&translated));
        }

        (translated_lines.join("\n"), report)
    }
}
