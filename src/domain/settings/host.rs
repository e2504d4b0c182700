//! Gerrit host URL normalization.

use url::Url;

use crate::domain::AppError;

const DEFAULT_SCHEME: &str = "https";

/// Normalize a configured Gerrit host into canonical URL form.
///
/// Scheme and host are lower-cased, the scheme's default port is dropped and
/// an empty path becomes `/`. A value without a scheme is treated as https.
pub fn normalize_host(raw: &str) -> Result<Url, AppError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(AppError::InvalidHost("value is empty".to_string()));
    }

    let candidate = if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("{}://{}", DEFAULT_SCHEME, trimmed)
    };

    let mut url = Url::parse(&candidate)
        .map_err(|e| AppError::InvalidHost(format!("'{}' is not a valid URL: {}", raw, e)))?;

    if url.cannot_be_a_base() || url.host_str().is_none_or(str::is_empty) {
        return Err(AppError::InvalidHost(format!("'{}' has no host component", raw)));
    }

    // Bare `?` and `#` carry nothing.
    if url.query() == Some("") {
        url.set_query(None);
    }
    if url.fragment() == Some("") {
        url.set_fragment(None);
    }

    Ok(url)
}
