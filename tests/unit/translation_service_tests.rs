/*!
 * Tests for the translation service: chunking, fallback chain and caching
 */

use std::sync::Arc;
use std::time::{Duration, Instant};
use anyhow::Result;
use blogtrans::app_config::TranslationConfig;
use blogtrans::providers::mock::MockProvider;
use blogtrans::translation::{OutcomeStatus, TranslationCache, TranslationOptions, TranslationService};
use crate::common;

#[test]
fn test_translation_service_creation_withDefaultConfig_shouldUseMyMemory() -> Result<()> {
    let service = TranslationService::new(&TranslationConfig::default())?;
    assert_eq!(service.provider_name(), "MyMemory");
    assert_eq!(service.options.max_chunk_chars, 400);
    assert!(service.cache.is_enabled());
    Ok(())
}

#[test]
fn test_translation_service_creation_withInvalidEndpoint_shouldFail() {
    let config = TranslationConfig {
        endpoint: "::not-a-url".to_string(),
        ..TranslationConfig::default()
    };
    assert!(TranslationService::new(&config).is_err());
}

#[tokio::test]
async fn test_translate_with_fallback_withWorkingProvider_shouldTranslateDirectly() {
    let provider = MockProvider::working();
    let service = common::service_with(&provider);

    let outcome = service.translate_with_fallback("Xin chào", "vi", "jp").await;

    assert_eq!(outcome.status, OutcomeStatus::Direct);
    assert_eq!(outcome.text, "[ja-JP] Xin chào");
    let requests = provider.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].source, "vi-VN");
    assert_eq!(requests[0].target, "ja-JP");
}

#[tokio::test]
async fn test_translate_with_fallback_withFailingDirectPair_shouldGoThroughEnglish() {
    let provider = MockProvider::working().with_failing_pair("vi-VN", "ja-JP");
    let service = common::service_with(&provider);

    let outcome = service.translate_with_fallback("Xin chào", "vi", "jp").await;

    assert_eq!(outcome.status, OutcomeStatus::ViaPivot);
    assert_eq!(outcome.text, "[ja-JP] [en-US] Xin chào");

    let pairs: Vec<(String, String)> = provider
        .requests()
        .into_iter()
        .map(|r| (r.source, r.target))
        .collect();
    assert_eq!(
        pairs,
        vec![
            ("vi-VN".to_string(), "ja-JP".to_string()),
            ("vi-VN".to_string(), "en-US".to_string()),
            ("en-US".to_string(), "ja-JP".to_string()),
        ]
    );
}

#[tokio::test]
async fn test_translate_with_fallback_withAlwaysFailingProvider_shouldReturnInput() {
    let provider = MockProvider::failing();
    let service = common::service_with(&provider);

    let outcome = service.translate_with_fallback("Xin chào", "vi", "jp").await;

    assert!(outcome.is_degraded());
    assert_eq!(outcome.text, "Xin chào");
    assert_eq!(provider.request_count(), 2);
}

#[tokio::test]
async fn test_translate_with_fallback_withEnglishEndpoint_shouldNotPivot() {
    let provider = MockProvider::failing();
    let service = common::service_with(&provider);

    let to_english = service.translate_with_fallback("Xin chào", "vi", "en").await;
    assert!(to_english.is_degraded());
    assert_eq!(provider.request_count(), 1);

    let from_english = service.translate_with_fallback("Hello", "en", "vi").await;
    assert!(from_english.is_degraded());
    assert_eq!(from_english.text, "Hello");
    assert_eq!(provider.request_count(), 2);
}

#[tokio::test]
async fn test_translate_with_fallback_withRateLimitedProvider_shouldDegradeGracefully() {
    let provider = MockProvider::rate_limited();
    let service = common::service_with(&provider);

    let outcome = service.translate_with_fallback("Bonjour", "auto", "kr").await;

    assert_eq!(outcome.status, OutcomeStatus::Degraded);
    assert_eq!(outcome.text, "Bonjour");
}

#[tokio::test]
async fn test_translate_withoutSourceLanguage_shouldAskForAutoDetection() {
    let provider = MockProvider::working();
    let service = common::service_with(&provider);

    let translated = service.translate("Hello there.", "vi", None).await;

    assert_eq!(translated, "[vi-VN] Hello there.");
    assert_eq!(provider.requests()[0].source, "auto");
}

#[tokio::test]
async fn test_translate_withBlankText_shouldReturnEmptyWithoutRequests() {
    let provider = MockProvider::working();
    let service = common::service_with(&provider);

    assert_eq!(service.translate("", "vi", Some("en")).await, "");
    assert_eq!(service.translate("   \n ", "vi", Some("en")).await, "");
    assert_eq!(provider.request_count(), 0);
}

#[tokio::test]
async fn test_translate_text_with_report_withLongText_shouldTranslateEachChunk() {
    let provider = MockProvider::working();
    let options = TranslationOptions {
        max_chunk_chars: 21,
        ..common::fast_options()
    };
    let service = TranslationService::with_provider(
        Arc::new(provider.clone()),
        options,
        TranslationCache::new(false),
    );

    let (text, report) = service
        .translate_text_with_report("One two. Three four. Five six.", "en", "vi")
        .await;

    assert_eq!(text, "[vi-VN] One two. Three four. [vi-VN] Five six.");
    assert_eq!(report.direct, 2);
    assert_eq!(report.total_chunks(), 2);
    assert!(!report.is_degraded());
}

#[tokio::test]
async fn test_translate_text_with_report_withIntermittentProvider_shouldOnlyDegradeFailedChunks() {
    // Every second request fails; en -> vi never pivots
    let provider = MockProvider::intermittent(2);
    let options = TranslationOptions {
        max_chunk_chars: 5,
        ..common::fast_options()
    };
    let service = TranslationService::with_provider(
        Arc::new(provider.clone()),
        options,
        TranslationCache::new(false),
    );

    let (text, report) = service
        .translate_text_with_report("Aa. Bb. Cc.", "en", "vi")
        .await;

    assert_eq!(text, "[vi-VN] Aa. Bb. [vi-VN] Cc.");
    assert_eq!(report.direct, 2);
    assert_eq!(report.degraded, 1);
}

#[tokio::test]
async fn test_translate_withCacheEnabled_shouldServeRepeatsWithoutRequests() {
    let provider = MockProvider::working();
    let service = common::cached_service_with(&provider);

    let first = service.translate_with_fallback("Hello.", "en", "vi").await;
    let second = service.translate_with_fallback("Hello.", "en", "vi").await;

    assert_eq!(first.status, OutcomeStatus::Direct);
    assert_eq!(second.status, OutcomeStatus::Cached);
    assert_eq!(first.text, second.text);
    assert_eq!(provider.request_count(), 1);
    assert_eq!(service.cache.len(), 1);
    assert_eq!(service.cache.stats(), (1, 1, 0.5));
}

#[test]
fn test_cache_stats_withoutLookups_shouldReportZeroHitRate() {
    let cache = TranslationCache::new(true);
    assert_eq!(cache.stats(), (0, 0, 0.0));
}

#[tokio::test]
async fn test_translate_withCacheEnabled_shouldNotCacheDegradedResults() {
    let provider = MockProvider::failing();
    let service = common::cached_service_with(&provider);

    service.translate_with_fallback("Hello.", "en", "vi").await;
    service.translate_with_fallback("Hello.", "en", "vi").await;

    assert!(service.cache.is_empty());
    assert_eq!(provider.request_count(), 2);
}

#[tokio::test]
async fn test_translate_withRequestDelay_shouldPauseAfterEveryChunk() {
    let provider = MockProvider::failing();
    let options = TranslationOptions {
        max_chunk_chars: 5,
        request_delay: Duration::from_millis(40),
        ..TranslationOptions::default()
    };
    let service = TranslationService::with_provider(
        Arc::new(provider.clone()),
        options,
        TranslationCache::new(false),
    );

    let start = Instant::now();
    let (text, report) = service.translate_text_with_report("Aa. Bb.", "en", "vi").await;

    // Failed chunks still pay the delay
    assert!(start.elapsed() >= Duration::from_millis(80));
    assert_eq!(text, "Aa. Bb.");
    assert_eq!(report.degraded, 2);
}

#[tokio::test]
async fn test_translate_withSlowProvider_shouldSendChunksOneAtATime() {
    let provider = MockProvider::slow(30);
    let options = TranslationOptions {
        max_chunk_chars: 4,
        ..common::fast_options()
    };
    let service = TranslationService::with_provider(
        Arc::new(provider.clone()),
        options,
        TranslationCache::new(false),
    );

    let start = Instant::now();
    let (_, report) = service.translate_text_with_report("Aa. Bb. Cc.", "en", "vi").await;

    // Each request waits for the previous response
    assert!(start.elapsed() >= Duration::from_millis(90));
    assert_eq!(report.direct, 3);
    let texts: Vec<String> = provider.requests().into_iter().map(|r| r.text).collect();
    assert_eq!(texts, vec!["Aa.", "Bb.", "Cc."]);
}

#[tokio::test]
async fn test_translate_withIntermittentProvider_shouldRecoverViaPivot() {
    // Third request fails: the last chunk goes through English
    let provider = MockProvider::intermittent(3);
    let options = TranslationOptions {
        max_chunk_chars: 4,
        ..common::fast_options()
    };
    let service = TranslationService::with_provider(
        Arc::new(provider.clone()),
        options,
        TranslationCache::new(false),
    );

    let (text, report) = service.translate_text_with_report("Aa. Bb. Cc.", "vi", "jp").await;

    assert_eq!(text, "[ja-JP] Aa. [ja-JP] Bb. [ja-JP] [en-US] Cc.");
    assert_eq!(report.direct, 2);
    assert_eq!(report.via_pivot, 1);
    assert_eq!(provider.request_count(), 5);
}

#[tokio::test]
async fn test_translate_markdown_withBlankLines_shouldKeepThemUntouched() {
    let provider = MockProvider::working();
    let service = common::service_with(&provider);

    let translated = service.translate_markdown("\n\n   \n", "vi", "en").await;

    assert_eq!(translated, "\n\n   \n");
    assert_eq!(provider.request_count(), 0);
}

#[tokio::test]
async fn test_translate_markdown_withHeadingAndList_shouldKeepMarkers() {
    let provider = MockProvider::working();
    let service = common::service_with(&provider);

    let heading = service.translate_markdown("# Hello", "vi", "en").await;
    let item = service.translate_markdown("- item", "vi", "en").await;
    let numbered = service.translate_markdown("3. third", "vi", "en").await;

    assert_eq!(heading, "# [vi-VN] Hello");
    assert_eq!(item, "- [vi-VN] item");
    assert_eq!(numbered, "3. [vi-VN] third");
}

#[tokio::test]
async fn test_translate_markdown_withEmptyHeading_shouldPassThrough() {
    let provider = MockProvider::working();
    let service = common::service_with(&provider);

    let translated = service.translate_markdown("#  \nText", "vi", "en").await;

    assert_eq!(translated, "#  \n[vi-VN] Text");
    assert_eq!(provider.request_count(), 1);
}
