//! Snapshot types: the structured result of one extraction call.
//!
//! Snapshots serialize to the camelCase JSON shape the rendering layer
//! consumes, so a snapshot can be written to a response body verbatim.
//! News-card and match payloads stay opaque `serde_json::Value`s: the remote
//! schema is not under our control and must not be over-constrained here.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The result of one extraction call.
///
/// Fast mode skips the full inventory entirely, so the fast variant carries
/// no `elements`/`css`/`textContent` fields at all; consumers key off
/// `fastMode: true` in the serialized form.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Snapshot {
    /// Fast-mode result: embedded live data only.
    Fast(FastSnapshot),
    /// Full-fidelity result: raw markup plus complete inventories.
    Full(Box<FullSnapshot>),
}

impl Snapshot {
    /// The extracted news-card payloads (either mode).
    pub fn news_cards(&self) -> &[Value] {
        match self {
            Snapshot::Fast(s) => &s.news_cards,
            Snapshot::Full(s) => &s.news_cards,
        }
    }

    /// The extracted live-match payloads (either mode).
    pub fn matches_list(&self) -> &[Value] {
        match self {
            Snapshot::Fast(s) => &s.matches_list,
            Snapshot::Full(s) => &s.matches_list,
        }
    }

    /// Length in bytes of the fetched markup.
    pub fn html_length(&self) -> usize {
        match self {
            Snapshot::Fast(s) => s.html_length,
            Snapshot::Full(s) => s.html_length,
        }
    }
}

/// Fast-mode snapshot: the two embedded live-data structures and nothing else.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FastSnapshot {
    /// News-card payloads found in inline script text (empty when absent).
    pub news_cards: Vec<Value>,
    /// Live-match payloads found in inline script text (empty when absent).
    pub matches_list: Vec<Value>,
    /// Length in bytes of the fetched markup.
    pub html_length: usize,
    /// Always `true`; marks the snapshot shape for consumers.
    pub fast_mode: bool,
}

/// Full-fidelity snapshot: raw markup plus every inventory.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FullSnapshot {
    /// The fetched markup, byte-for-byte.
    pub raw_html: String,
    /// Length in bytes of `raw_html`.
    pub html_length: usize,
    /// One descriptor per element, in document order.
    pub elements: Vec<ElementDescriptor>,
    /// CSS inventory: inline styles, style tags, external sheets, class/id sets.
    pub css: CssInventory,
    /// JavaScript inventory: inline/external scripts and detected names.
    pub javascript: JsInventory,
    /// Every image reference, `src` absolutized.
    pub images: Vec<ImageRef>,
    /// Every anchor, `href` absolutized.
    pub links: Vec<LinkRef>,
    /// Occurrence count per `data-*` attribute name.
    pub data_attributes: BTreeMap<String, usize>,
    /// Meta tags: `name` (or `property`) mapped to `content`.
    pub meta: BTreeMap<String, String>,
    /// JSON-LD blocks, parsed but otherwise untouched.
    pub structured_data: Vec<Value>,
    /// Elements with meaningful text, in document order.
    pub text_content: Vec<TextNode>,
    /// News-card payloads found in inline script text (empty when absent).
    pub news_cards: Vec<Value>,
    /// Live-match payloads found in inline script text (empty when absent).
    pub matches_list: Vec<Value>,
}

/// One element of the document, as seen in document order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementDescriptor {
    /// Lowercased tag name.
    pub tag: String,
    /// The `id` attribute, empty when absent.
    pub id: String,
    /// The `class` attribute verbatim, empty when absent.
    pub class_name: String,
    /// All attributes of the element.
    pub attributes: BTreeMap<String, String>,
    /// Trimmed text content, truncated to 200 characters.
    pub text: String,
    /// Serialized markup of the element, truncated to 500 characters.
    pub html: String,
}

/// CSS inventory of a page.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CssInventory {
    /// Elements carrying a `style` attribute.
    pub inline: Vec<InlineStyle>,
    /// `<style>` tag contents.
    pub style_tags: Vec<StyleTag>,
    /// External stylesheets, `href` absolutized.
    pub external: Vec<ExternalStylesheet>,
    /// Every CSS class seen on the page, duplicate-free, first-seen order.
    pub all_classes: Vec<String>,
    /// Every element id seen on the page, duplicate-free, first-seen order.
    pub all_ids: Vec<String>,
}

/// A `style` attribute occurrence.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineStyle {
    /// Lowercased tag name of the styled element.
    pub tag: String,
    /// The element's `id` attribute, if any.
    pub id: Option<String>,
    /// The element's `class` attribute, if any.
    pub class_name: Option<String>,
    /// The `style` attribute value.
    pub style: String,
}

/// A `<style>` tag and its contents.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleTag {
    /// Position among the page's `<style>` tags, in document order.
    pub index: usize,
    /// The tag's `type` attribute, if any.
    #[serde(rename = "type")]
    pub r#type: Option<String>,
    /// The tag's `media` attribute, if any.
    pub media: Option<String>,
    /// The CSS text inside the tag.
    pub css: String,
}

/// An external stylesheet reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalStylesheet {
    /// Absolutized stylesheet URL.
    pub href: String,
    /// The link's `media` attribute, if any.
    pub media: Option<String>,
}

/// JavaScript inventory of a page.
///
/// `variables` and `functions` come from heuristic pattern matching over
/// script text and are diagnostic, not authoritative.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JsInventory {
    /// Inline script blocks (content preview capped at 1000 characters).
    pub inline: Vec<InlineScript>,
    /// External scripts, `src` absolutized.
    pub external: Vec<ExternalScript>,
    /// Presence set of identifiers bound with `var`/`let`/`const`.
    pub variables: BTreeMap<String, bool>,
    /// Names of `function <name>(` declarations; duplicates preserved.
    pub functions: Vec<String>,
}

/// An inline script block.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineScript {
    /// Position among the page's `<script>` tags, in document order.
    pub index: usize,
    /// The tag's `type` attribute, if any.
    #[serde(rename = "type")]
    pub r#type: Option<String>,
    /// Script text, truncated to 1000 characters.
    pub content: String,
    /// Full character length of the script text before truncation.
    pub length: usize,
}

/// An external script reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalScript {
    /// Absolutized script URL.
    pub src: String,
    /// The tag's `type` attribute, if any.
    #[serde(rename = "type")]
    pub r#type: Option<String>,
}

/// An image reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageRef {
    /// Absolutized image URL (`src`, falling back to `data-src` for
    /// lazy-loaded images).
    pub src: String,
    /// The `alt` attribute, if any.
    pub alt: Option<String>,
    /// The `title` attribute, if any.
    pub title: Option<String>,
    /// The `class` attribute, if any.
    pub class_name: Option<String>,
    /// The `id` attribute, if any.
    pub id: Option<String>,
}

/// An anchor reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkRef {
    /// Absolutized link target.
    pub href: String,
    /// Trimmed anchor text.
    pub text: String,
    /// The `class` attribute, if any.
    pub class_name: Option<String>,
}

/// An element with meaningful text content.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextNode {
    /// Lowercased tag name.
    pub tag: String,
    /// The `id` attribute, empty when absent.
    pub id: String,
    /// The `class` attribute, empty when absent.
    pub class_name: String,
    /// Full trimmed text (not truncated).
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fast_snapshot_serializes_with_fast_mode_flag() {
        let snapshot = Snapshot::Fast(FastSnapshot {
            news_cards: vec![],
            matches_list: vec![],
            html_length: 42,
            fast_mode: true,
        });
        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["fastMode"], true);
        assert_eq!(json["htmlLength"], 42);
        assert!(json.get("elements").is_none());
        assert!(json.get("rawHtml").is_none());
    }

    #[test]
    fn test_full_snapshot_serializes_camel_case() {
        let snapshot = Snapshot::Full(Box::new(FullSnapshot {
            raw_html: "<html></html>".to_string(),
            html_length: 13,
            elements: vec![],
            css: CssInventory::default(),
            javascript: JsInventory::default(),
            images: vec![],
            links: vec![],
            data_attributes: BTreeMap::new(),
            meta: BTreeMap::new(),
            structured_data: vec![],
            text_content: vec![],
            news_cards: vec![],
            matches_list: vec![],
        }));
        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["rawHtml"], "<html></html>");
        assert!(json.get("fastMode").is_none());
        assert!(json["css"].get("allClasses").is_some());
        assert!(json["css"].get("styleTags").is_some());
        assert!(json["javascript"].get("variables").is_some());
        assert!(json.get("dataAttributes").is_some());
        assert!(json.get("structuredData").is_some());
        assert!(json.get("textContent").is_some());
    }

    #[test]
    fn test_element_descriptor_round_trips() {
        let descriptor = ElementDescriptor {
            tag: "div".to_string(),
            id: "x".to_string(),
            class_name: "a b".to_string(),
            attributes: BTreeMap::from([("class".to_string(), "a b".to_string())]),
            text: "Hello".to_string(),
            html: "<div class=\"a b\">Hello</div>".to_string(),
        };
        let json = serde_json::to_string(&descriptor).unwrap();
        assert!(json.contains("\"className\":\"a b\""));
        let back: ElementDescriptor = serde_json::from_str(&json).unwrap();
        assert_eq!(back.class_name, "a b");
    }
}
