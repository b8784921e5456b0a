/*!
 * Provider implementations for machine translation services.
 *
 * This module contains client implementations for the services a chunk of text
 * can be sent to:
 * - MyMemory: free translation API used by the blog
 * - Mock: scripted provider for tests
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::errors::ProviderError;

/// A single text translation request.
///
/// Languages are service codes (locale tags such as `vi-VN`, or `auto`),
/// not blog language codes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationRequest {
    /// Text to translate
    pub text: String,
    /// Source language code
    pub source: String,
    /// Target language code
    pub target: String,
}

impl TranslationRequest {
    /// Create a new translation request
    pub fn new(text: impl Into<String>, source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            source: source.into(),
            target: target.into(),
        }
    }
}

/// Common trait for all translation providers
///
/// A provider performs exactly one remote call per `translate` invocation.
/// Retries and fallbacks belong to the caller.
#[async_trait]
pub trait Provider: Send + Sync + Debug {
    /// Translate one chunk of text
    ///
    /// # Arguments
    /// * `request` - The text and language pair
    ///
    /// # Returns
    /// * `Result<String, ProviderError>` - The translated text or an error
    async fn translate(&self, request: TranslationRequest) -> Result<String, ProviderError>;

    /// Human readable provider name for logs
    fn name(&self) -> &str;
}

pub mod mock;
pub mod mymemory;
