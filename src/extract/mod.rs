//! Snapshot extraction: the mode dispatcher and its collaborators.
//!
//! [`Extractor::extract_everything`] is the single entry point. It fetches
//! the page, parses it, and then either runs only the embedded-data locator
//! (fast mode) or builds the complete inventory as well (full mode). Every
//! call is independent and stateless apart from the reused HTTP client, so
//! concurrent extractions are safe by construction.

mod embedded;
mod inventory;
mod snapshot;

pub use snapshot::{
    CssInventory, ElementDescriptor, ExternalScript, ExternalStylesheet, FastSnapshot,
    FullSnapshot, ImageRef, InlineScript, InlineStyle, JsInventory, LinkRef, Snapshot, StyleTag,
    TextNode,
};

use anyhow::Context;
use log::{debug, error, info};
use scraper::Html;
use thiserror::Error;
use url::Url;

use crate::config::Config;
use crate::fetch::{fetch_page, FetchError};
use crate::initialization::init_client;
use crate::utils::absolutize;

/// Failure modes of one extraction call.
///
/// Only fetch-level problems are fatal. Everything inside the embedded-data
/// locator and the inventory builder is best-effort and degrades to empty
/// snapshot fields instead of erroring.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The page could not be fetched: network error, timeout, non-2xx
    /// status, or an empty body.
    ///
    /// Markup that does fetch always parses (the parser error-recovers), so
    /// this is the only fatal failure mode of an extraction call.
    #[error(transparent)]
    Fetch(#[from] FetchError),
}

/// Extracts page snapshots from the configured remote origin.
///
/// Holds the HTTP client and origin URL; everything else is per-call state.
pub struct Extractor {
    client: reqwest::Client,
    origin: Url,
}

impl Extractor {
    /// Creates an extractor from an existing client and origin.
    pub fn new(client: reqwest::Client, origin: Url) -> Self {
        Self { client, origin }
    }

    /// Creates an extractor from a run configuration, building the HTTP
    /// client (timeout, user agent) and parsing the origin URL.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let origin = Url::parse(&config.origin)
            .with_context(|| format!("invalid origin URL: {}", config.origin))?;
        let client = init_client(config).context("failed to build HTTP client")?;
        Ok(Self::new(client, origin))
    }

    /// Extracts a snapshot of one page.
    ///
    /// `page_path` may be a path (resolved against the configured origin)
    /// or a full URL (passed through unchanged). Fast mode scans inline
    /// scripts for the two embedded live-data structures and skips
    /// everything else; full mode additionally keeps the raw markup and
    /// builds the complete DOM/CSS/JS inventory.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError`] when the page cannot be fetched. A page
    /// that fetches but carries no embedded data is not an error: the
    /// corresponding snapshot fields are empty lists.
    pub async fn extract_everything(
        &self,
        page_path: &str,
        fast_mode: bool,
    ) -> Result<Snapshot, ExtractError> {
        let url = absolutize(&self.origin, page_path);
        info!(
            "extracting {}{}",
            url,
            if fast_mode { " (fast mode)" } else { "" }
        );

        let html = match fetch_page(&self.client, &url).await {
            Ok(html) => html,
            Err(e) => {
                error!("extraction failed for {}: {}", url, e);
                return Err(e.into());
            }
        };

        Ok(self.snapshot_from_html(html, fast_mode))
    }

    /// Builds a snapshot from already-fetched markup.
    fn snapshot_from_html(&self, html: String, fast_mode: bool) -> Snapshot {
        let document = Html::parse_document(&html);
        let (news_cards, matches_list) = embedded::locate_embedded_data(&document);

        if fast_mode {
            info!(
                "fast extraction complete: {} news, {} matches",
                news_cards.len(),
                matches_list.len()
            );
            return Snapshot::Fast(FastSnapshot {
                news_cards,
                matches_list,
                html_length: html.len(),
                fast_mode: true,
            });
        }

        let (elements, text_content) = inventory::collect_elements(&document);
        let css = inventory::collect_css(&document, &self.origin);
        let javascript = inventory::collect_javascript(&document, &self.origin);
        let images = inventory::collect_images(&document, &self.origin);
        let links = inventory::collect_links(&document, &self.origin);
        let data_attributes = inventory::collect_data_attributes(&document);
        let meta = inventory::collect_meta(&document);
        let structured_data = inventory::collect_structured_data(&document);

        debug!(
            "inventory: {} elements, {} classes, {} ids, {} images, {} links, {} meta tags",
            elements.len(),
            css.all_classes.len(),
            css.all_ids.len(),
            images.len(),
            links.len(),
            meta.len()
        );

        Snapshot::Full(Box::new(FullSnapshot {
            html_length: html.len(),
            raw_html: html,
            elements,
            css,
            javascript,
            images,
            links,
            data_attributes,
            meta,
            structured_data,
            text_content,
            news_cards,
            matches_list,
        }))
    }
}
