/*!
 * Blog post data model.
 *
 * Mirrors the layout of `posts.json`: an array of posts, each holding one
 * translation variant per language code.
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Languages tried, in order, when the requested variant is missing
const DISPLAY_FALLBACK_LANGUAGES: [&str; 2] = ["vi", "en"];

/// One language variant of a post
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Translation {
    pub title: String,
    #[serde(default)]
    pub excerpt: String,
    #[serde(default)]
    pub content: String,
}

impl Translation {
    /// Create a new translation variant
    pub fn new(title: impl Into<String>, excerpt: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            excerpt: excerpt.into(),
            content: content.into(),
        }
    }
}

/// A blog post with all of its language variants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// Unique id, empty until the store assigns one
    #[serde(default)]
    pub id: String,

    #[serde(default)]
    pub author: String,

    /// Header image URL
    #[serde(default)]
    pub image: String,

    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,

    /// Variants keyed by language code
    #[serde(default)]
    pub translations: BTreeMap<String, Translation>,
}

impl Post {
    /// Create a post without an id, holding a single variant
    pub fn new(author: impl Into<String>, lang: impl Into<String>, translation: Translation) -> Self {
        let mut translations = BTreeMap::new();
        translations.insert(lang.into(), translation);

        Self {
            id: String::new(),
            author: author.into(),
            image: String::new(),
            tags: Vec::new(),
            created_at: None,
            updated_at: None,
            translations,
        }
    }

    /// A post can only be shown once it has at least one variant
    pub fn is_displayable(&self) -> bool {
        !self.translations.is_empty()
    }

    /// Variant for `lang`, falling back to Vietnamese and then English
    pub fn preferred_translation(&self, lang: &str) -> Option<&Translation> {
        std::iter::once(lang)
            .chain(DISPLAY_FALLBACK_LANGUAGES)
            .find_map(|code| self.translations.get(code))
    }

    /// Language codes this post is available in
    pub fn languages(&self) -> Vec<&str> {
        self.translations.keys().map(String::as_str).collect()
    }

    /// Case-insensitive match of `query` against any variant's title or content
    pub fn matches_query(&self, query: &str) -> bool {
        let needle = query.to_lowercase();
        self.translations.values().any(|t| {
            t.title.to_lowercase().contains(&needle) || t.content.to_lowercase().contains(&needle)
        })
    }
}
