//! Application state.
//!
//! Shared state for all request handlers.

use std::sync::Arc;

use axum::http::{HeaderMap, header};
use shelf_corpus::Corpus;

/// Application state shared across all handlers.
pub struct AppState {
    /// Documentation corpus, immutable after startup.
    pub(crate) corpus: Arc<Corpus>,
    /// Public URL overriding the request `Host` header.
    base_url: Option<String>,
    /// Authority used when a request carries no `Host` header.
    fallback_authority: String,
    /// Application version for `ETag`s.
    pub(crate) version: String,
}

impl AppState {
    /// Create state for a loaded corpus.
    ///
    /// `base_url` must not end with `/`.
    #[must_use]
    pub fn new(
        corpus: Arc<Corpus>,
        base_url: Option<String>,
        fallback_authority: String,
        version: String,
    ) -> Self {
        Self {
            corpus,
            base_url,
            fallback_authority,
            version,
        }
    }

    /// Host prefix for generated links, e.g. `http://localhost:8080`.
    ///
    /// Uses the configured base URL, otherwise the request `Host` header with an
    /// `http://` scheme unless it already carries one.
    pub(crate) fn host(&self, headers: &HeaderMap) -> String {
        if let Some(base_url) = &self.base_url {
            return base_url.clone();
        }

        let authority = headers
            .get(header::HOST)
            .and_then(|v| v.to_str().ok())
            .unwrap_or(&self.fallback_authority);
        if authority.contains("http://") || authority.contains("https://") {
            authority.to_owned()
        } else {
            format!("http://{authority}")
        }
    }
}

#[cfg(test)]
mod tests {
    static_assertions::assert_impl_all!(super::AppState: Send, Sync);

    use axum::http::HeaderValue;
    use shelf_corpus::Registry;

    use super::*;

    fn state(base_url: Option<&str>) -> AppState {
        let corpus = Corpus::new(Registry::default(), shelf_corpus::Children::new()).unwrap();
        AppState::new(
            Arc::new(corpus),
            base_url.map(ToOwned::to_owned),
            "0.0.0.0:8080".to_owned(),
            String::new(),
        )
    }

    fn headers(host: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::HOST, HeaderValue::from_str(host).unwrap());
        headers
    }

    #[test]
    fn test_host_from_header() {
        assert_eq!(state(None).host(&headers("docs.local:8080")), "http://docs.local:8080");
    }

    #[test]
    fn test_host_header_with_scheme_kept() {
        assert_eq!(state(None).host(&headers("https://docs.local")), "https://docs.local");
    }

    #[test]
    fn test_host_without_header_uses_fallback() {
        assert_eq!(state(None).host(&HeaderMap::new()), "http://0.0.0.0:8080");
    }

    #[test]
    fn test_base_url_overrides_header() {
        let state = state(Some("https://docs.example.com"));

        assert_eq!(state.host(&headers("internal:8080")), "https://docs.example.com");
    }
}
