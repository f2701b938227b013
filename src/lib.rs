//! score_mirror library: page snapshot extraction for a live-score site mirror.
//!
//! This library fetches pages from a single fixed sports-site origin and
//! extracts structured snapshots for a rendering layer to consume:
//!
//! - **Fast mode** scans inline script blocks for the two embedded
//!   live-data structures (news cards, live matches) and returns only
//!   those.
//! - **Full mode** additionally keeps the raw markup and builds complete
//!   inventories of elements, CSS, JavaScript, images, links, meta tags,
//!   `data-*` attributes, JSON-LD blocks and text content.
//!
//! The engine is stateless across calls: each extraction is one fetch, one
//! parse, and one or more traversal passes over the parsed document.
//!
//! # Example
//!
//! ```no_run
//! use score_mirror::{Config, Extractor};
//!
//! # #[tokio::main]
//! # async fn main() -> anyhow::Result<()> {
//! let config = Config::default();
//! let extractor = Extractor::from_config(&config)?;
//!
//! let snapshot = extractor.extract_everything("/", true).await?;
//! println!("news cards: {}", snapshot.news_cards().len());
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your
//! application or ensure you're calling library functions within an async
//! context.

#![warn(missing_docs)]

pub mod config;
mod extract;
mod fetch;
pub mod initialization;
mod utils;

// Re-export public API
pub use config::{Config, LogFormat, LogLevel};
pub use extract::{
    CssInventory, ElementDescriptor, ExternalScript, ExternalStylesheet, ExtractError, Extractor,
    FastSnapshot, FullSnapshot, ImageRef, InlineScript, InlineStyle, JsInventory, LinkRef,
    Snapshot, StyleTag, TextNode,
};
pub use fetch::{fetch_page, FetchError};
