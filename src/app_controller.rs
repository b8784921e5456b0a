use anyhow::{Result, Context, anyhow};
use log::{info, warn};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};

use crate::app_config::Config;
use crate::blog::{JsonPostStore, Post, PostStore};
use crate::errors::StoreError;
use crate::file_utils::FileManager;
use crate::language_utils;
use crate::translation::{TranslationReport, TranslationService};

// @module: Application controller for post translation

/// Summary of a stored post translation run
#[derive(Debug, Default)]
pub struct PostTranslationSummary {
    /// Post after the new variants were merged in
    pub post: Option<Post>,
    /// Target languages that were translated
    pub translated: Vec<String>,
    /// Target languages left alone
    pub skipped: Vec<String>,
    /// Combined chunk counts
    pub report: TranslationReport,
}

/// Main application controller for blog translation
pub struct Controller {
    // @field: App configuration
    config: Config,
    // @field: Translation pipeline
    service: TranslationService,
    // @field: Post storage
    store: Box<dyn PostStore + Send + Sync>,
    // @field: Whether progress bars are drawn
    show_progress: bool,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        let service = TranslationService::new(&config.translation)
            .context("Failed to create translation service")?;
        let store = JsonPostStore::new(&config.storage.posts_file);

        Ok(Self::with_parts(config, service, Box::new(store)))
    }

    /// Create a controller from already built parts
    pub fn with_parts(config: Config, service: TranslationService, store: Box<dyn PostStore + Send + Sync>) -> Self {
        Self {
            config,
            service,
            store,
            show_progress: true,
        }
    }

    /// Disable progress bars (tests, non-interactive use)
    pub fn without_progress(mut self) -> Self {
        self.show_progress = false;
        self
    }

    /// The active configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The post store
    pub fn store(&self) -> &dyn PostStore {
        self.store.as_ref()
    }

    /// Translate a stored post into each target language, merging the new variants.
    ///
    /// Targets equal to the source, or already present without `overwrite`, are skipped.
    pub async fn translate_stored_post(
        &self,
        post_id: &str,
        source_lang: Option<&str>,
        target_langs: &[String],
        overwrite: bool,
        save: bool,
    ) -> Result<PostTranslationSummary> {
        let mut post = self.store.get_post(post_id)?
            .ok_or_else(|| StoreError::NotFound(post_id.to_string()))?;

        // Post variants are keyed by lowercase codes
        let source_lang = language_utils::normalize_code(
            source_lang.unwrap_or(self.config.default_source_language.as_str()),
        );
        let targets: Vec<String> = if target_langs.is_empty() { &self.config.target_languages[..] } else { target_langs }
            .iter()
            .map(|code| language_utils::normalize_code(code))
            .collect();

        let mut summary = PostTranslationSummary::default();
        let progress = self.progress_bar(targets.len() as u64, "Translating post");

        for target in &targets {
            progress.set_message(format!("{} -> {}", source_lang, target));

            if *target == source_lang || (!overwrite && post.translations.contains_key(target)) {
                info!(
                    "Skipping {}: {}",
                    language_utils::describe_language(target),
                    if *target == source_lang { "same as source" } else { "already translated" }
                );
                summary.skipped.push(target.clone());
                progress.inc(1);
                continue;
            }

            info!(
                "Translating post {} from {} to {}",
                post_id,
                language_utils::describe_language(&source_lang),
                language_utils::describe_language(target)
            );
            let (translation, report) = self.service
                .translate_post_with_report(&post, target, &source_lang)
                .await
                .with_context(|| format!("Failed to translate post {} to {}", post_id, target))?;

            post.translations.insert(target.clone(), translation);
            summary.report.merge(&report);
            summary.translated.push(target.clone());
            progress.inc(1);
        }
        progress.finish_and_clear();

        if save && !summary.translated.is_empty() {
            post = self.store.save_post(post)
                .with_context(|| format!("Failed to save post {}", post_id))?;
        }

        if summary.report.is_degraded() {
            warn!(
                "{} chunk(s) could not be translated and were kept in {}",
                summary.report.degraded,
                language_utils::describe_language(&source_lang)
            );
        }
        self.log_cache_stats();

        summary.post = Some(post);
        Ok(summary)
    }

    /// Translate a Markdown file, writing `<stem>.<target>.<ext>` next to it unless `output` is given
    pub async fn translate_markdown_file(
        &self,
        input: &Path,
        output: Option<PathBuf>,
        source_lang: &str,
        target_lang: &str,
        force_overwrite: bool,
    ) -> Result<PathBuf> {
        if !FileManager::file_exists(input) {
            return Err(anyhow!("Input file does not exist: {:?}", input));
        }

        let source_lang = language_utils::normalize_code(source_lang);
        let target_lang = language_utils::normalize_code(target_lang);

        let output = output.unwrap_or_else(|| {
            let dir = input.parent().unwrap_or(Path::new("."));
            FileManager::generate_output_path(input, dir, &target_lang)
        });

        if output.exists() && !force_overwrite {
            return Err(anyhow!("Output file already exists: {:?}. Use -f to force overwrite.", output));
        }

        let markdown = FileManager::read_to_string(input)?;
        let spinner = self.progress_bar(0, "Translating document");
        let (translated, report) = self.service
            .translate_markdown_with_report(&markdown, &source_lang, &target_lang)
            .await;
        spinner.finish_and_clear();

        FileManager::write_to_file(&output, &translated)?;
        info!(
            "Translated {} chunk(s) ({} degraded): {:?}",
            report.total_chunks(), report.degraded, output
        );
        self.log_cache_stats();

        Ok(output)
    }

    /// Translate a piece of text; no source language means auto-detection
    pub async fn translate_text(&self, text: &str, target_lang: &str, source_lang: Option<&str>) -> String {
        self.service.translate(text, target_lang, source_lang).await
    }

    /// Search the store for posts that can be shown
    pub fn search_posts(&self, query: Option<&str>, lang: Option<&str>) -> Result<Vec<Post>> {
        let lang = lang.map(language_utils::normalize_code);
        let posts = self.store.search_posts(query, lang.as_deref())?;
        Ok(posts.into_iter().filter(Post::is_displayable).collect())
    }

    /// Expand `all` into every blog language and validate the rest
    pub fn resolve_targets(targets: &[String]) -> Result<Vec<String>> {
        let mut resolved: Vec<String> = Vec::new();
        for target in targets {
            let codes = if target.eq_ignore_ascii_case("all") {
                language_utils::BlogLanguage::ALL.iter().map(|l| l.code().to_string()).collect()
            } else {
                language_utils::validate_language_code(target)?;
                vec![language_utils::normalize_code(target)]
            };

            for code in codes {
                if !resolved.contains(&code) {
                    resolved.push(code);
                }
            }
        }
        Ok(resolved)
    }

    fn log_cache_stats(&self) {
        if !self.service.cache.is_enabled() {
            return;
        }

        let (hits, misses, hit_rate) = self.service.cache.stats();
        if hits + misses > 0 {
            info!(
                "Cache: {} hit(s), {} miss(es), {:.1}% hit rate, {} entries",
                hits, misses, hit_rate * 100.0, self.service.cache.len()
            );
        }
    }

    fn progress_bar(&self, len: u64, prefix: &'static str) -> ProgressBar {
        if !self.show_progress {
            return ProgressBar::hidden();
        }

        let bar = if len == 0 { ProgressBar::new_spinner() } else { ProgressBar::new(len) };
        let style = ProgressStyle::default_bar()
            .template("{prefix} [{elapsed_precise}] {bar:30.cyan/blue} {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        bar.set_style(style);
        bar.set_prefix(prefix);
        bar
    }
}
