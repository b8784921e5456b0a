/*!
 * Whole-post translation.
 *
 * Produces a new translation variant from an existing one. The post itself
 * is never modified; merging the variant back is up to the caller.
 */

use log::{info, warn};

use crate::blog::{Post, Translation};
use crate::errors::TranslationError;
use super::core::{TranslationReport, TranslationService};

impl TranslationService {
    /// Translate the `source_lang` variant of a post into `target_lang`
    pub async fn translate_post(
        &self,
        post: &Post,
        target_lang: &str,
        source_lang: &str,
    ) -> Result<Translation, TranslationError> {
        self.translate_post_with_report(post, target_lang, source_lang)
            .await
            .map(|(translation, _)| translation)
    }

    /// Like `translate_post`, also returning how every chunk was translated
    pub async fn translate_post_with_report(
        &self,
        post: &Post,
        target_lang: &str,
        source_lang: &str,
    ) -> Result<(Translation, TranslationReport), TranslationError> {
        let source = post
            .translations
            .get(source_lang)
            .ok_or_else(|| TranslationError::SourceLanguageMissing(source_lang.to_string()))?;

        info!("Starting translation of post {} from {} to {}...", post.id, source_lang, target_lang);
        let mut report = TranslationReport::default();

        info!("Translating title...");
        let (title, title_report) = self
            .translate_text_with_report(&source.title, source_lang, target_lang)
            .await;
        report.merge(&title_report);

        info!("Translating excerpt...");
        let (excerpt, excerpt_report) = self
            .translate_text_with_report(&source.excerpt, source_lang, target_lang)
            .await;
        report.merge(&excerpt_report);

        info!("Translating content...");
        let (content, content_report) = self
            .translate_markdown_with_report(&source.content, source_lang, target_lang)
            .await;
        report.merge(&content_report);

        if report.is_degraded() {
            warn!(
                "Translation of post {} to {} left {} of {} chunks untranslated",
                post.id, target_lang, report.degraded, report.total_chunks()
            );
        } else {
            info!("Translation to {} completed!", target_lang);
        }

        Ok((Translation { title, excerpt, content }, report))
    }
}
