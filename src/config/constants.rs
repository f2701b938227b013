//! Configuration constants.
//!
//! This module defines the fixed operational parameters of the extraction
//! engine: the remote origin, network timeouts, and the truncation caps
//! applied while building snapshots.

/// The single remote origin every page is fetched from.
///
/// The engine never fetches any other origin; relative page paths and
/// relative `href`/`src` values are resolved against this URL. Can be
/// overridden per run via `--origin` (useful for testing against a local
/// server).
pub const DEFAULT_ORIGIN: &str = "https://www.cricbuzz.com";

/// Default per-request timeout in seconds.
///
/// Applied on the HTTP client as a whole-request deadline. A fetch that
/// exceeds it is treated as an ordinary fetch failure, not retried.
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

/// Default User-Agent string for HTTP requests.
///
/// The remote may reject clients that do not look like a browser, so the
/// default mimics a current desktop Chrome. Users can override this via the
/// `--user-agent` CLI flag.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36";

// Snapshot truncation caps. These are fixed contracts of the snapshot
// format, not tunables: downstream consumers rely on them.

/// Maximum characters of element text kept in an element descriptor.
pub const MAX_ELEMENT_TEXT_CHARS: usize = 200;
/// Maximum characters of serialized markup kept in an element descriptor.
pub const MAX_ELEMENT_HTML_CHARS: usize = 500;
/// Maximum characters of an inline script body kept as a preview.
///
/// The full length is preserved separately in the inventory entry.
pub const MAX_INLINE_SCRIPT_PREVIEW_CHARS: usize = 1000;
/// Minimum trimmed text length for an element to appear in `textContent`.
pub const MIN_TEXT_NODE_CHARS: usize = 10;

/// Default delay between successive page extractions in milliseconds.
///
/// Keeps the CLI polite toward the remote when extracting several pages in
/// one run.
pub const DEFAULT_PAGE_DELAY_MS: u64 = 2000;
