//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument
//! parsing and configuration.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::constants::{DEFAULT_ORIGIN, DEFAULT_PAGE_DELAY_MS, DEFAULT_TIMEOUT_SECONDS, DEFAULT_USER_AGENT};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to
/// most verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Configuration for an extraction run.
///
/// Doubles as the CLI argument definition (via `clap::Parser`) and as the
/// programmatic configuration for library consumers, which can construct it
/// with `Config::default()` and adjust fields directly.
///
/// # Examples
///
/// ```no_run
/// use score_mirror::Config;
///
/// let config = Config {
///     pages: vec!["/cricket-news".to_string()],
///     fast: true,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone, Parser)]
#[command(
    name = "score_mirror",
    about = "Fetches pages from a live-score sports site and extracts structured snapshots"
)]
pub struct Config {
    /// Page paths to extract; absolute URLs pass through unchanged
    #[arg(default_value = "/")]
    pub pages: Vec<String>,

    /// Fast mode: return only the embedded news/match data, skipping the
    /// full DOM/CSS/JS inventory
    #[arg(long)]
    pub fast: bool,

    /// Remote origin pages and relative URLs are resolved against
    #[arg(long, default_value = DEFAULT_ORIGIN)]
    pub origin: String,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECONDS)]
    pub timeout_seconds: u64,

    /// HTTP User-Agent header value
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Directory to write one JSON snapshot file per page
    /// (snapshots go to stdout when omitted)
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// Delay between successive page extractions in milliseconds
    #[arg(long, default_value_t = DEFAULT_PAGE_DELAY_MS)]
    pub delay_ms: u64,

    /// Log level
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,

    /// Log format
    #[arg(long, value_enum, default_value = "plain")]
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pages: vec!["/".to_string()],
            fast: false,
            origin: DEFAULT_ORIGIN.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            out: None,
            delay_ms: DEFAULT_PAGE_DELAY_MS,
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
        }
    }
}
