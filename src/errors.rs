/*!
 * Error types for the blogtrans application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Errors that can occur when talking to a translation service
#[derive(Error, Debug)]
pub enum ProviderError {
    /// The service reported that the caller is being rate limited
    #[error("Rate limit exceeded: {0}")]
    RateLimited(String),

    /// The service answered, but not with a usable translation
    #[error("Translation failed: {status} - {message}")]
    TranslationFailed {
        /// Status reported by the service (HTTP or response status)
        status: u16,
        /// Error message from the service
        message: String,
    },

    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),
}

impl ProviderError {
    /// Whether this error was caused by the service throttling us
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Self::RateLimited(_))
    }
}

/// Errors that can occur during translation
#[derive(Error, Debug)]
pub enum TranslationError {
    /// The post has no variant in the requested source language
    #[error("Source language {0} not found in post")]
    SourceLanguageMissing(String),
}

/// Errors raised by the post store
#[derive(Error, Debug)]
pub enum StoreError {
    /// Reading or writing the backing file failed
    #[error("Store I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The backing file exists but does not hold a JSON array of posts
    #[error("Corrupt post file {path}: {message}")]
    Corrupt {
        /// Path of the offending file
        path: String,
        /// Parser message
        message: String,
    },

    /// Posts could not be serialized
    #[error("Failed to serialize posts: {0}")]
    Serialize(#[from] serde_json::Error),

    /// No post exists with the given id
    #[error("Post not found: {0}")]
    NotFound(String),
}
