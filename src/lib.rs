/*!
 * # blogtrans - machine translation for a multilingual static blog
 *
 * A Rust library for translating blog posts between the blog's languages
 * through a free translation API.
 *
 * ## Features
 *
 * - Sentence-aligned chunking under the API's per-request size limit
 * - Markdown-aware translation that keeps heading and list markers
 * - Fallback through English when a direct language pair fails
 * - Fail-open behavior: untranslatable text is kept as-is, never an error
 * - JSON-file-backed post store compatible with `posts.json`
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `translation`: the translation pipeline:
 *   - `translation::chunker`: sentence-aligned chunking
 *   - `translation::markdown`: Markdown line classification
 *   - `translation::core`: translation service and fallback chain
 *   - `translation::post`: whole-post translation
 *   - `translation::cache`: caching of chunk translations
 * - `blog`: post model and JSON post store
 * - `file_utils`: File system operations
 * - `app_controller`: Main application controller
 * - `language_utils`: blog language codes and locale tags
 * - `providers`: translation service clients:
 *   - `providers::mymemory`: MyMemory API client
 *   - `providers::mock`: scripted provider for tests
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod blog;
pub mod errors;
pub mod file_utils;
pub mod language_utils;
pub mod providers;
pub mod translation;

// Re-export main types for easier usage
pub use app_config::Config;
pub use blog::{JsonPostStore, Post, PostStore, Translation};
pub use translation::TranslationService;
pub use language_utils::{BlogLanguage, describe_language, get_language_name, to_service_code};
pub use errors::{ProviderError, StoreError, TranslationError};
