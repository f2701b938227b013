//! Configuration: CLI options, defaults, and operational constants.

mod constants;
mod types;

pub use constants::{
    DEFAULT_ORIGIN, DEFAULT_PAGE_DELAY_MS, DEFAULT_TIMEOUT_SECONDS, DEFAULT_USER_AGENT,
    MAX_ELEMENT_HTML_CHARS, MAX_ELEMENT_TEXT_CHARS, MAX_INLINE_SCRIPT_PREVIEW_CHARS,
    MIN_TEXT_NODE_CHARS,
};
pub use types::{Config, LogFormat, LogLevel};
