//! URL absolutization against the remote origin.

use url::Url;

/// Rewrites a possibly-relative URL to an absolute one against `origin`.
///
/// Values that already carry a scheme (`http...`) pass through unchanged;
/// everything else is resolved with RFC 3986 reference resolution, so
/// root-relative paths (`/img/logo.png`), document-relative paths and
/// protocol-relative URLs (`//cdn.example.com/x.js`) all come out absolute.
///
/// Resolution can only fail for pathological inputs; in that case the value
/// is prefixed with the origin as a last resort so the output is still
/// origin-qualified.
pub(crate) fn absolutize(origin: &Url, value: &str) -> String {
    if value.starts_with("http") {
        return value.to_string();
    }
    match origin.join(value) {
        Ok(resolved) => resolved.to_string(),
        Err(e) => {
            log::warn!("Could not resolve '{}' against {}: {}", value, origin, e);
            format!("{}{}", origin.as_str().trim_end_matches('/'), value)
        }
    }
}
