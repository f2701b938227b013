//! Embedded live-data extraction from inline script text.
//!
//! The remote embeds two JSON-like literals inside inline scripts: a
//! news-card array under `newsCardsData` and a match-list wrapper under
//! `matchesList` (legacy alias `matchList`). This module locates and parses
//! both without executing any JavaScript.
//!
//! Extraction is a cascade of strategies, each a pure function over one
//! script block's text, tried in order with the first success winning:
//!
//! 1. A non-greedy regex captures the literal directly. Works whenever the
//!    literal contains no nested closing bracket that cuts the match short.
//! 2. A manual scanner finds the key, walks to the opening bracket and
//!    tracks nesting depth byte by byte, ignoring brackets inside quoted
//!    strings (escapes handled via a one-byte lookback). This recovers
//!    literals the regex cannot, at the cost of a full scan.
//!
//! Every parse failure is swallowed: a script block that looks like it
//! carries data but doesn't parse simply yields nothing, and scanning moves
//! on. Missing data is never an error at this layer.

use std::sync::LazyLock;

use log::{debug, info};
use regex::Regex;
use scraper::{Html, Selector};
use serde_json::Value;

use crate::utils::{compile_regex_unsafe, parse_selector_with_fallback};

static SCRIPT_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector_with_fallback("script", "embedded data location"));

static NEWS_LITERAL: LazyLock<Regex> = LazyLock::new(|| {
    compile_regex_unsafe(
        r#"(?s)newsCardsData["']?\s*[:=]\s*(\[.*?\])"#,
        "NEWS_LITERAL",
    )
});

static MATCHES_LITERAL: LazyLock<Regex> = LazyLock::new(|| {
    compile_regex_unsafe(
        r#"(?s)matchesList["']?\s*[:=]\s*(\{.*?\})"#,
        "MATCHES_LITERAL",
    )
});

/// Key spellings tried by the manual scanner, quoted forms first so a JSON
/// key wins over a bare identifier occurrence earlier in the block.
const NEWS_KEYS: &[&str] = &["\"newsCardsData\"", "'newsCardsData'", "newsCardsData"];
const MATCH_KEYS: &[&str] = &[
    "\"matchesList\"",
    "'matchesList'",
    "matchesList",
    "\"matchList\"",
    "'matchList'",
    "matchList",
];

/// One extraction strategy over a single script block's text.
type Strategy = fn(&str) -> Option<Vec<Value>>;

const NEWS_STRATEGIES: &[(&str, Strategy)] = &[("regex", news_by_regex), ("scan", news_by_scan)];
const MATCH_STRATEGIES: &[(&str, Strategy)] =
    &[("regex", matches_by_regex), ("scan", matches_by_scan)];

/// Runs the locator over every inline script block of `document`.
///
/// The first shape-valid match per data kind wins; later blocks never
/// replace an earlier match, even a larger one. Missing data is not an
/// error: the corresponding list comes back empty.
pub(crate) fn locate_embedded_data(document: &Html) -> (Vec<Value>, Vec<Value>) {
    let mut news_cards: Option<Vec<Value>> = None;
    let mut matches_list: Option<Vec<Value>> = None;

    for element in document.select(&SCRIPT_SELECTOR) {
        let content: String = element.text().collect();
        if content.is_empty() {
            continue;
        }
        if news_cards.is_none() {
            news_cards = find_news_cards(&content);
        }
        if matches_list.is_none() {
            matches_list = find_matches(&content);
        }
        if news_cards.is_some() && matches_list.is_some() {
            break;
        }
    }

    let news_cards = news_cards.unwrap_or_default();
    let matches_list = matches_list.unwrap_or_default();
    if !news_cards.is_empty() {
        info!("found {} news cards", news_cards.len());
    }
    if !matches_list.is_empty() {
        info!("found {} matches", matches_list.len());
    }
    (news_cards, matches_list)
}

/// Scans one script block for the news-card array.
pub(crate) fn find_news_cards(content: &str) -> Option<Vec<Value>> {
    if !content.contains("newsCardsData") {
        return None;
    }
    for (label, strategy) in NEWS_STRATEGIES {
        if let Some(cards) = strategy(content) {
            debug!("located {} news cards via {}", cards.len(), label);
            return Some(cards);
        }
    }
    None
}

/// Scans one script block for the match-list wrapper, returning its
/// `matches` array.
pub(crate) fn find_matches(content: &str) -> Option<Vec<Value>> {
    if !content.contains("matchesList") && !content.contains("matchList") {
        return None;
    }
    for (label, strategy) in MATCH_STRATEGIES {
        if let Some(matches) = strategy(content) {
            debug!("located {} matches via {}", matches.len(), label);
            return Some(matches);
        }
    }
    None
}

/// News cards must be a non-empty JSON array.
fn news_shape(value: Value) -> Option<Vec<Value>> {
    match value {
        Value::Array(items) if !items.is_empty() => Some(items),
        _ => None,
    }
}

/// The match-list wrapper must be a JSON object with a `matches` array;
/// sibling fields are ignored. The array itself may be empty (no live
/// matches right now is a valid state).
fn matches_shape(value: Value) -> Option<Vec<Value>> {
    match value {
        Value::Object(mut map) => match map.remove("matches") {
            Some(Value::Array(items)) => Some(items),
            _ => None,
        },
        _ => None,
    }
}

fn news_by_regex(content: &str) -> Option<Vec<Value>> {
    let literal = NEWS_LITERAL.captures(content)?.get(1)?.as_str();
    serde_json::from_str(literal).ok().and_then(news_shape)
}

fn news_by_scan(content: &str) -> Option<Vec<Value>> {
    NEWS_KEYS.iter().find_map(|key| {
        let literal = scan_literal(content, key, b'[', b']')?;
        serde_json::from_str(&unescape_literal(&literal))
            .ok()
            .and_then(news_shape)
    })
}

fn matches_by_regex(content: &str) -> Option<Vec<Value>> {
    let literal = MATCHES_LITERAL.captures(content)?.get(1)?.as_str();
    serde_json::from_str(literal).ok().and_then(matches_shape)
}

fn matches_by_scan(content: &str) -> Option<Vec<Value>> {
    MATCH_KEYS.iter().find_map(|key| {
        let literal = scan_literal(content, key, b'{', b'}')?;
        serde_json::from_str(&unescape_literal(&literal))
            .ok()
            .and_then(matches_shape)
    })
}

/// Locates the balanced bracket literal following `key` in `content`.
///
/// Finds the key's first occurrence, then the nearest `:` or `=` separator
/// after it, then walks forward to the opening bracket. Only whitespace,
/// backslashes and `=` may sit between separator and bracket; anything else
/// means the key is not followed by a literal here.
fn scan_literal(content: &str, key: &str, open: u8, close: u8) -> Option<String> {
    let key_index = content.find(key)?;
    let tail = &content[key_index..];

    let separator = match (tail.find(':'), tail.find('=')) {
        (Some(colon), Some(equals)) => colon.min(equals),
        (Some(colon), None) => colon,
        (None, Some(equals)) => equals,
        (None, None) => return None,
    };

    let bytes = tail.as_bytes();
    let mut start = None;
    for (i, &b) in bytes.iter().enumerate().skip(separator + 1) {
        if b == open {
            start = Some(i);
            break;
        }
        if !b.is_ascii_whitespace() && b != b'\\' && b != b'=' {
            break;
        }
    }
    let start = start?;
    let end = balanced_end(bytes, start, open, close)?;
    Some(tail[start..end].to_string())
}

/// Scans from `start` (which must sit on an `open` bracket) to the matching
/// close bracket, returning the exclusive end of the balanced span.
///
/// Bracket characters inside quoted strings (single or double) are ignored;
/// a backslash escapes the byte that follows it. Returns `None` when the
/// span never balances.
fn balanced_end(bytes: &[u8], start: usize, open: u8, close: u8) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escape_next = false;

    for (i, &b) in bytes.iter().enumerate().skip(start) {
        if escape_next {
            escape_next = false;
            continue;
        }
        if b == b'\\' {
            escape_next = true;
            continue;
        }
        if b == b'"' || b == b'\'' {
            in_string = !in_string;
            continue;
        }
        if in_string {
            continue;
        }
        if b == open {
            depth += 1;
        } else if b == close {
            depth -= 1;
            if depth == 0 {
                return Some(i + 1);
            }
        }
    }
    None
}

/// Undoes the escaping seen when a literal sits inside a JS string:
/// doubled backslashes, then escaped double and single quotes.
fn unescape_literal(literal: &str) -> String {
    literal
        .replace("\\\\", "\\")
        .replace("\\\"", "\"")
        .replace("\\'", "'")
}
