//! Full-fidelity page inventory.
//!
//! Walks the parsed document once per concern: element descriptors and text
//! nodes, class/id sets, CSS, JavaScript, images, links, `data-*`
//! attributes, meta tags, and JSON-LD blocks. Document order is preserved
//! in every emitted list; the rendering layer relies on it for
//! layout-adjacent heuristics.
//!
//! Variable and function name detection is heuristic pattern matching over
//! script text (no JavaScript is executed); false positives and negatives
//! are acceptable since those fields are diagnostic, not authoritative.

use std::collections::{BTreeMap, HashSet};
use std::sync::LazyLock;

use log::debug;
use regex::Regex;
use scraper::{Html, Selector};
use serde_json::Value;
use url::Url;

use crate::config::{
    MAX_ELEMENT_HTML_CHARS, MAX_ELEMENT_TEXT_CHARS, MAX_INLINE_SCRIPT_PREVIEW_CHARS,
    MIN_TEXT_NODE_CHARS,
};
use crate::extract::snapshot::{
    CssInventory, ElementDescriptor, ExternalScript, ExternalStylesheet, ImageRef, InlineScript,
    InlineStyle, JsInventory, LinkRef, StyleTag, TextNode,
};
use crate::utils::{absolutize, compile_regex_unsafe, parse_selector_with_fallback, truncate_chars};

static ANY_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector_with_fallback("*", "element inventory"));
static STYLED_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector_with_fallback("[style]", "inline style extraction"));
static STYLE_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector_with_fallback("style", "style tag extraction"));
static STYLESHEET_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    parse_selector_with_fallback(r#"link[rel="stylesheet"]"#, "external stylesheet extraction")
});
static SCRIPT_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector_with_fallback("script", "script extraction"));
static IMG_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector_with_fallback("img", "image extraction"));
static ANCHOR_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector_with_fallback("a", "link extraction"));
static META_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector_with_fallback("meta", "meta tag extraction"));
static JSON_LD_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    parse_selector_with_fallback(
        r#"script[type="application/ld+json"]"#,
        "structured data extraction",
    )
});

// Heuristic identifier patterns; see module docs.
static VAR_NAME: LazyLock<Regex> =
    LazyLock::new(|| compile_regex_unsafe(r"(?:var|let|const)\s+(\w+)\s*=", "VAR_NAME"));
static FUNCTION_NAME: LazyLock<Regex> =
    LazyLock::new(|| compile_regex_unsafe(r"function\s+(\w+)\s*\(", "FUNCTION_NAME"));

/// Builds one descriptor per element, in document order, plus the text-node
/// list for elements whose trimmed text is long enough to matter.
pub(crate) fn collect_elements(document: &Html) -> (Vec<ElementDescriptor>, Vec<TextNode>) {
    let mut elements = Vec::new();
    let mut text_content = Vec::new();

    for element in document.select(&ANY_SELECTOR) {
        let value = element.value();
        let tag = value.name().to_lowercase();
        let id = value.attr("id").unwrap_or_default().to_string();
        let class_name = value.attr("class").unwrap_or_default().to_string();
        let attributes: BTreeMap<String, String> = value
            .attrs()
            .map(|(name, attr_value)| (name.to_string(), attr_value.to_string()))
            .collect();
        let text = element.text().collect::<String>().trim().to_string();

        elements.push(ElementDescriptor {
            tag: tag.clone(),
            id: id.clone(),
            class_name: class_name.clone(),
            attributes,
            text: truncate_chars(&text, MAX_ELEMENT_TEXT_CHARS),
            html: truncate_chars(&element.html(), MAX_ELEMENT_HTML_CHARS),
        });

        if text.chars().count() > MIN_TEXT_NODE_CHARS {
            text_content.push(TextNode {
                tag,
                id,
                class_name,
                text,
            });
        }
    }

    debug!(
        "collected {} element descriptors, {} text nodes",
        elements.len(),
        text_content.len()
    );
    (elements, text_content)
}

/// Collects the CSS inventory: inline styles, style tags, external sheets,
/// and the duplicate-free class/id sets in first-seen order.
pub(crate) fn collect_css(document: &Html, origin: &Url) -> CssInventory {
    let mut inventory = CssInventory::default();

    let mut seen_classes = HashSet::new();
    let mut seen_ids = HashSet::new();
    for element in document.select(&ANY_SELECTOR) {
        let value = element.value();
        if let Some(class_attr) = value.attr("class") {
            for class in class_attr.split_whitespace() {
                if seen_classes.insert(class.to_string()) {
                    inventory.all_classes.push(class.to_string());
                }
            }
        }
        if let Some(id) = value.attr("id") {
            if !id.is_empty() && seen_ids.insert(id.to_string()) {
                inventory.all_ids.push(id.to_string());
            }
        }
    }

    for element in document.select(&STYLED_SELECTOR) {
        let value = element.value();
        inventory.inline.push(InlineStyle {
            tag: value.name().to_lowercase(),
            id: value.attr("id").map(str::to_string),
            class_name: value.attr("class").map(str::to_string),
            style: value.attr("style").unwrap_or_default().to_string(),
        });
    }

    for (index, element) in document.select(&STYLE_SELECTOR).enumerate() {
        inventory.style_tags.push(StyleTag {
            index,
            r#type: element.value().attr("type").map(str::to_string),
            media: element.value().attr("media").map(str::to_string),
            css: element.inner_html(),
        });
    }

    for element in document.select(&STYLESHEET_SELECTOR) {
        if let Some(href) = element.value().attr("href") {
            if !href.is_empty() {
                inventory.external.push(ExternalStylesheet {
                    href: absolutize(origin, href),
                    media: element.value().attr("media").map(str::to_string),
                });
            }
        }
    }

    inventory
}

/// Collects the JavaScript inventory: inline/external scripts plus the
/// heuristically detected variable and function names.
pub(crate) fn collect_javascript(document: &Html, origin: &Url) -> JsInventory {
    let mut inventory = JsInventory::default();

    for (index, element) in document.select(&SCRIPT_SELECTOR).enumerate() {
        let value = element.value();
        let content: String = element.text().collect();

        if !content.is_empty() {
            inventory.inline.push(InlineScript {
                index,
                r#type: value.attr("type").map(str::to_string),
                content: truncate_chars(&content, MAX_INLINE_SCRIPT_PREVIEW_CHARS),
                length: content.chars().count(),
            });
        }

        for caps in VAR_NAME.captures_iter(&content) {
            if let Some(name) = caps.get(1) {
                inventory.variables.insert(name.as_str().to_string(), true);
            }
        }
        for caps in FUNCTION_NAME.captures_iter(&content) {
            if let Some(name) = caps.get(1) {
                inventory.functions.push(name.as_str().to_string());
            }
        }

        if let Some(src) = value.attr("src") {
            if !src.is_empty() {
                inventory.external.push(ExternalScript {
                    src: absolutize(origin, src),
                    r#type: value.attr("type").map(str::to_string),
                });
            }
        }
    }

    inventory
}

/// Collects every image reference; `src` falls back to `data-src` so
/// lazy-loaded images are not lost.
pub(crate) fn collect_images(document: &Html, origin: &Url) -> Vec<ImageRef> {
    let mut images = Vec::new();
    for element in document.select(&IMG_SELECTOR) {
        let value = element.value();
        let src = value
            .attr("src")
            .filter(|s| !s.is_empty())
            .or_else(|| value.attr("data-src").filter(|s| !s.is_empty()));
        if let Some(src) = src {
            images.push(ImageRef {
                src: absolutize(origin, src),
                alt: value.attr("alt").map(str::to_string),
                title: value.attr("title").map(str::to_string),
                class_name: value.attr("class").map(str::to_string),
                id: value.attr("id").map(str::to_string),
            });
        }
    }
    images
}

/// Collects every anchor with a non-empty `href`.
pub(crate) fn collect_links(document: &Html, origin: &Url) -> Vec<LinkRef> {
    let mut links = Vec::new();
    for element in document.select(&ANCHOR_SELECTOR) {
        if let Some(href) = element.value().attr("href") {
            if !href.is_empty() {
                links.push(LinkRef {
                    href: absolutize(origin, href),
                    text: element.text().collect::<String>().trim().to_string(),
                    class_name: element.value().attr("class").map(str::to_string),
                });
            }
        }
    }
    links
}

/// Collects meta tags keyed by `name`, falling back to `property` (Open
/// Graph style); a later tag with the same key overwrites an earlier one.
pub(crate) fn collect_meta(document: &Html) -> BTreeMap<String, String> {
    let mut meta = BTreeMap::new();
    for element in document.select(&META_SELECTOR) {
        let value = element.value();
        let name = value
            .attr("name")
            .or_else(|| value.attr("property"))
            .unwrap_or_default();
        let content = value.attr("content").unwrap_or_default();
        if !name.is_empty() && !content.is_empty() {
            meta.insert(name.to_string(), content.to_string());
        }
    }
    meta
}

/// Counts occurrences of each `data-*` attribute name across the document.
pub(crate) fn collect_data_attributes(document: &Html) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for element in document.select(&ANY_SELECTOR) {
        for (name, _) in element.value().attrs() {
            if name.starts_with("data-") {
                *counts.entry(name.to_string()).or_insert(0) += 1;
            }
        }
    }
    counts
}

/// Parses every JSON-LD block; malformed blocks are skipped, not fatal.
pub(crate) fn collect_structured_data(document: &Html) -> Vec<Value> {
    let mut blocks = Vec::new();
    for element in document.select(&JSON_LD_SELECTOR) {
        let text: String = element.text().collect();
        match serde_json::from_str::<Value>(text.trim()) {
            Ok(value) => blocks.push(value),
            Err(e) => debug!("skipping malformed JSON-LD block: {}", e),
        }
    }
    blocks
}
