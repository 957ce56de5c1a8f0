//! Static asset serving module
//!
//! Serves CSS, JS, and image files from the configured static directory with
//! MIME detection, ETag-based conditional requests, and directory-traversal
//! protection.

use crate::handler::router::RequestContext;
use crate::http::{self, cache, mime};
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use std::path::Path;
use tokio::fs;

/// URL prefix under which assets are served
pub const STATIC_PREFIX: &str = "/static/";

/// Serve a static asset for the request path
///
/// Handles both `/static/...` paths and bare favicon paths, which map to
/// files directly under the static directory.
pub async fn serve(ctx: &RequestContext<'_>, static_dir: &str) -> Response<Full<Bytes>> {
    match load_asset(static_dir, ctx.path).await {
        Some((content, content_type)) => build_asset_response(
            &content,
            content_type,
            ctx.if_none_match.as_deref(),
            ctx.is_head,
        ),
        None => http::build_404_response(),
    }
}

/// Resolve a URL path to a file inside the static directory
///
/// Returns the file content and its Content-Type, or None when the file does
/// not exist or resolves outside the static directory.
pub async fn load_asset(static_dir: &str, path: &str) -> Option<(Vec<u8>, &'static str)> {
    let relative = path
        .strip_prefix(STATIC_PREFIX)
        .unwrap_or_else(|| path.trim_start_matches('/'));
    let clean = relative.replace("..", "");
    let file_path = Path::new(static_dir).join(&clean);

    let static_dir_canonical = match Path::new(static_dir).canonicalize() {
        Ok(p) => p,
        Err(e) => {
            logger::log_warning(&format!(
                "Static directory not found or inaccessible '{static_dir}': {e}"
            ));
            return None;
        }
    };

    // Missing file is an ordinary 404, no log needed
    let Ok(file_canonical) = file_path.canonicalize() else {
        return None;
    };
    if !file_canonical.starts_with(&static_dir_canonical) {
        logger::log_warning(&format!(
            "Path traversal attempt blocked: {} -> {}",
            path,
            file_canonical.display()
        ));
        return None;
    }
    if !file_canonical.is_file() {
        return None;
    }

    let content = match fs::read(&file_canonical).await {
        Ok(c) => c,
        Err(e) => {
            logger::log_error(&format!(
                "Failed to read file '{}': {}",
                file_canonical.display(),
                e
            ));
            return None;
        }
    };

    let content_type = mime::get_content_type(file_canonical.extension().and_then(|e| e.to_str()));
    Some((content, content_type))
}

/// Build asset response with `ETag` support
fn build_asset_response(
    data: &[u8],
    content_type: &str,
    if_none_match: Option<&str>,
    is_head: bool,
) -> Response<Full<Bytes>> {
    let etag = cache::generate_etag(data);

    if cache::check_etag_match(if_none_match, &etag) {
        return http::build_304_response(&etag);
    }

    http::response::build_cached_response(Bytes::from(data.to_owned()), content_type, &etag, is_head)
}
