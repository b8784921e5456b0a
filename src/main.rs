// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Result, Context};
use log::{info, warn, LevelFilter, Log, Metadata, Record, Level, SetLoggerError};
use std::path::PathBuf;
use std::io::Write;
use clap::{Parser, ValueEnum, CommandFactory, Subcommand};
use clap_complete::{generate, Shell};

use blogtrans::app_config::{Config, LogLevel};
use blogtrans::app_controller::Controller;
use blogtrans::language_utils;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => LogLevel::Error,
            CliLogLevel::Warn => LogLevel::Warn,
            CliLogLevel::Info => LogLevel::Info,
            CliLogLevel::Debug => LogLevel::Debug,
            CliLogLevel::Trace => LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Translate a stored post into one or more languages
    Post {
        /// Id of the post in the posts file
        #[arg(value_name = "POST_ID")]
        id: String,

        /// Source language code (defaults to the configured source language)
        #[arg(short, long)]
        from: Option<String>,

        /// Target language codes, comma separated, or `all`
        #[arg(short, long, value_delimiter = ',')]
        to: Vec<String>,

        /// Retranslate languages the post already has
        #[arg(long)]
        overwrite: bool,

        /// Write the translated post back to the posts file
        #[arg(long)]
        save: bool,
    },

    /// Translate a Markdown file
    Markdown {
        /// Markdown file to translate
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Source language code (defaults to the configured source language)
        #[arg(short = 's', long)]
        from: Option<String>,

        /// Target language code
        #[arg(short, long)]
        to: String,

        /// Output file (defaults to `<name>.<target>.md` next to the input)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Force overwrite of an existing output file
        #[arg(short, long)]
        force_overwrite: bool,
    },

    /// Translate a piece of text and print it
    Text {
        /// Text to translate
        #[arg(value_name = "TEXT")]
        text: String,

        /// Target language code
        #[arg(short, long)]
        to: String,

        /// Source language code (auto-detected when omitted)
        #[arg(short, long)]
        from: Option<String>,
    },

    /// Search stored posts
    Search {
        /// Case-insensitive text to look for in titles and content
        #[arg(value_name = "QUERY")]
        query: Option<String>,

        /// Only posts available in this language
        #[arg(short, long)]
        lang: Option<String>,
    },

    /// Generate shell completions for blogtrans
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// blogtrans - machine translation for a multilingual blog
///
/// Translates blog posts, Markdown files and snippets of text through the
/// MyMemory translation API, falling back through English when a direct
/// language pair is not available.
#[derive(Parser, Debug)]
#[command(name = "blogtrans")]
#[command(version)]
#[command(about = "Machine translation for a multilingual blog")]
#[command(long_about = "blogtrans translates blog posts stored in a posts.json file between Vietnamese, English, Chinese, Korean and Japanese.

EXAMPLES:
    blogtrans post post_1700000000000_abc123def --to en,jp --save
    blogtrans post post_1700000000000_abc123def --to all --overwrite
    blogtrans markdown article.md --to en           # writes article.en.md
    blogtrans text \"Xin chào\" --to en --from vi
    blogtrans search rust --lang en
    blogtrans completions bash > blogtrans.bash

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config. If the config file doesn't exist, a default one
    will be created automatically.

LANGUAGES:
    vi  - Vietnamese (vi-VN)
    en  - English (en-US), also the pivot language
    cn  - Chinese (zh-CN)
    kr  - Korean (ko-KR)
    jp  - Japanese (ja-JP)")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = "conf.json", env = "BLOGTRANS_CONFIG")]
    config: String,

    /// Set logging level
    #[arg(long, global = true, value_enum)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color and tag for a level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("\x1B[1;31m", "ERROR"),
            Level::Warn => ("\x1B[1;33m", "WARN "),
            Level::Info => ("\x1B[1;32m", "INFO "),
            Level::Debug => ("\x1B[1;36m", "DEBUG"),
            Level::Trace => ("\x1B[1;35m", "TRACE"),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let (color, tag) = Self::style_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(stderr, "{}{} {} {}\x1B[0m", color, now, tag, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize the logger once with trace as the ceiling; the effective
    // level is set through `log::set_max_level` once the config is loaded
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    if let Commands::Completions { shell } = cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(shell, &mut cmd, "blogtrans", &mut std::io::stdout());
        return Ok(());
    }

    // If log level is set via command line, apply it immediately
    if let Some(level) = &cli.log_level {
        let level: LogLevel = level.clone().into();
        log::set_max_level(level.to_level_filter());
    }

    let (mut config, created) = Config::load_or_create(&cli.config)
        .with_context(|| format!("Failed to load config file: {}", cli.config))?;
    if created {
        warn!("Config file not found at '{}', created default config.", cli.config);
    }

    match &cli.log_level {
        Some(level) => config.log_level = level.clone().into(),
        None => log::set_max_level(config.log_level.to_level_filter()),
    }

    config.validate()
        .context("Configuration validation failed")?;

    let controller = Controller::with_config(config)?;
    run_command(&controller, cli.command).await
}

async fn run_command(controller: &Controller, command: Commands) -> Result<()> {
    match command {
        Commands::Post { id, from, to, overwrite, save } => {
            if let Some(source) = &from {
                language_utils::validate_language_code(source)?;
            }
            let targets = Controller::resolve_targets(&to)?;

            let summary = controller
                .translate_stored_post(&id, from.as_deref(), &targets, overwrite, save)
                .await?;

            let describe = |codes: &[String]| {
                codes.iter().map(|code| language_utils::describe_language(code)).collect::<Vec<_>>().join(", ")
            };
            if !summary.translated.is_empty() {
                info!("Translated post {} into: {}", id, describe(&summary.translated));
            }
            if !summary.skipped.is_empty() {
                info!("Skipped: {}", describe(&summary.skipped));
            }
            if !save && !summary.translated.is_empty() {
                if let Some(post) = &summary.post {
                    println!("{}", serde_json::to_string_pretty(post)?);
                }
            }
        }
        Commands::Markdown { input, from, to, output, force_overwrite } => {
            language_utils::validate_language_code(&to)?;
            let source = from.unwrap_or_else(|| controller.config().default_source_language.clone());
            language_utils::validate_language_code(&source)?;

            let written = controller
                .translate_markdown_file(&input, output, &source, &to, force_overwrite)
                .await?;
            info!("Success: {:?}", written);
        }
        Commands::Text { text, to, from } => {
            language_utils::validate_language_code(&to)?;
            if let Some(source) = &from {
                language_utils::validate_language_code(source)?;
            }

            let translated = controller.translate_text(&text, &to, from.as_deref()).await;
            println!("{}", translated);
        }
        Commands::Search { query, lang } => {
            let posts = controller.search_posts(query.as_deref(), lang.as_deref())?;
            info!("Found {} post(s)", posts.len());

            let display_lang = language_utils::normalize_code(
                lang.as_deref().unwrap_or(controller.config().default_source_language.as_str()),
            );
            for post in posts {
                let title = post
                    .preferred_translation(&display_lang)
                    .map(|t| t.title.as_str())
                    .unwrap_or("(untitled)");
                println!("{}\t{}\t[{}]", post.id, title, post.languages().join(", "));
            }
        }
        Commands::Completions { .. } => {}
    }

    Ok(())
}
