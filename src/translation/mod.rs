/*!
 * Translation service for blog posts.
 *
 * This module contains the translation pipeline. It is split into several
 * submodules:
 *
 * - `chunker`: sentence-aligned splitting under a length limit
 * - `markdown`: Markdown line classification
 * - `core`: the service, with the pivot-language fallback chain
 * - `post`: whole-post translation
 * - `cache`: caching of successful chunk translations
 */

// Re-export main types for easier usage
pub use self::cache::TranslationCache;
pub use self::chunker::{split_sentences, split_text};
pub use self::core::{
    OutcomeStatus, TranslationOptions, TranslationOutcome, TranslationReport, TranslationService,
};
pub use self::markdown::LineRecord;

// Submodules
pub mod cache;
pub mod chunker;
pub mod core;
pub mod markdown;
pub mod post;
