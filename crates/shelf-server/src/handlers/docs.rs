//! Documentation browsing endpoint.
//!
//! Resolves the request path against the corpus and renders either the
//! namespace index or a node page. The whole body is rendered before the
//! response is built, so a failing node never produces a partial page.

use std::sync::Arc;

use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use md5::{Digest, Md5};
use percent_encoding::percent_decode_str;
use shelf_corpus::{Browse, BrowseError, render_node};
use shelf_render::{index, markdown_to_html, page};

use crate::error::ServerError;
use crate::state::AppState;

/// Handle any request.
///
/// The path is percent-decoded before resolution so keys with spaces or
/// non-ASCII characters match the links generated for them.
pub(crate) async fn get_docs(
    State(state): State<Arc<AppState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
) -> Result<Response, ServerError> {
    if method != Method::GET {
        return Err(ServerError::MethodNotAllowed(method));
    }

    let path = percent_decode_str(uri.path()).decode_utf8_lossy();
    let host = state.host(&headers);
    let html = render_path(&state, &host, &path).map_err(|err| {
        log_browse_error(&path, &err);
        ServerError::NotFound(path.to_string())
    })?;

    let etag = compute_etag(&state.version, &html);
    if let Some(if_none_match) = headers.get(header::IF_NONE_MATCH)
        && if_none_match.as_bytes() == etag.as_bytes()
    {
        return Ok(StatusCode::NOT_MODIFIED.into_response());
    }

    Ok((
        [
            (header::CONTENT_TYPE, "text/html; charset=utf-8".to_owned()),
            (header::ETAG, etag),
        ],
        html,
    )
        .into_response())
}

/// Resolve, render and wrap the page for `path`.
fn render_path(state: &AppState, host: &str, path: &str) -> Result<String, BrowseError> {
    match state.corpus.browse(path)? {
        Browse::Index => Ok(index(host, state.corpus.registry().iter())),
        Browse::Page {
            node, back_path, ..
        } => {
            let link_prefix = format!("{host}{}", path.trim_end_matches('/'));
            let content = render_node(node, &link_prefix)?;
            let body = markdown_to_html(&String::from_utf8_lossy(&content));
            Ok(page(host, &format!("{host}{back_path}"), &body))
        }
    }
}

/// Log the specific failure behind a generic not-found response.
fn log_browse_error(path: &str, err: &BrowseError) {
    match err {
        BrowseError::PathNotFound(_) => {
            tracing::debug!(path = %path, kind = err.kind(), "Path not found");
        }
        BrowseError::Decode { .. } | BrowseError::MalformedTree(_) => {
            tracing::warn!(path = %path, kind = err.kind(), error = %err, "Failed to render node");
        }
    }
}

/// Compute `ETag` from version and content.
///
/// Uses MD5 truncated to 64 bits (16 hex chars).
fn compute_etag(version: &str, content: &str) -> String {
    let hash = Md5::digest(format!("{version}:{content}").as_bytes());
    format!("\"{}\"", &hex::encode(hash)[..16])
}
