//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: method validation, the fixed
//! path dispatch table, and access logging.

use crate::config::AppState;
use crate::handler::{api, pages, static_files};
use crate::http;
use crate::logger;
use http_body_util::Full;
use hyper::body::{Body as _, Bytes};
use hyper::header::HeaderValue;
use hyper::{HeaderMap, Method, Request, Response, Version};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

/// Request context encapsulating information needed for request processing
pub struct RequestContext<'a> {
    pub path: &'a str,
    pub is_head: bool,
    pub if_none_match: Option<String>,
}

/// Main entry point for HTTP request handling
pub async fn handle_request(
    req: Request<hyper::body::Incoming>,
    peer_addr: SocketAddr,
    state: Arc<AppState>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let started = Instant::now();
    let method = req.method().clone();
    let version = req.version();
    let uri = req.uri().clone();
    let path = uri.path();
    let is_head = method == Method::HEAD;

    // 1. Method and declared body size checks before any dispatch
    let early = check_http_method(&method, state.config.http.enable_cors)
        .or_else(|| check_body_size(req.headers(), state.config.http.max_body_size));

    let mut response = match early {
        Some(resp) => resp,
        None => {
            let ctx = RequestContext {
                path,
                is_head,
                if_none_match: header_string(req.headers(), "if-none-match"),
            };
            route_request(&ctx, &state).await
        }
    };

    set_server_header(&mut response, &state.config.http.server_name);

    if state.access_log {
        let mut entry = logger::AccessLogEntry::new(
            peer_addr.ip().to_string(),
            method.to_string(),
            path.to_string(),
        );
        entry.query = uri.query().map(ToString::to_string);
        entry.http_version = version_label(version).to_string();
        entry.status = response.status().as_u16();
        entry.body_bytes = response.body().size_hint().exact().unwrap_or(0);
        entry.referer = header_string(req.headers(), "referer");
        entry.user_agent = header_string(req.headers(), "user-agent");
        entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

/// Route request against the fixed dispatch table
pub async fn route_request(
    ctx: &RequestContext<'_>,
    state: &Arc<AppState>,
) -> Response<Full<Bytes>> {
    let resources = &state.config.resources;

    match ctx.path {
        "/" => pages::home(ctx, state),
        "/about" => pages::about(ctx, state),
        "/dashboard" => pages::dashboard(ctx, state),
        "/api/data" => api::chart_data(ctx),
        path if path.starts_with(static_files::STATIC_PREFIX)
            || resources.favicon_paths.iter().any(|p| path == p) =>
        {
            static_files::serve(ctx, &resources.static_dir).await
        }
        _ => pages::not_found(ctx, state),
    }
}

/// Check HTTP method and return appropriate response for non-GET/HEAD methods
fn check_http_method(method: &Method, enable_cors: bool) -> Option<Response<Full<Bytes>>> {
    match method {
        &Method::GET | &Method::HEAD => None,
        &Method::OPTIONS => Some(http::build_options_response(enable_cors)),
        _ => {
            logger::log_warning(&format!("Method not allowed: {method}"));
            Some(http::build_405_response())
        }
    }
}

/// Validate Content-Length header and return 413 if exceeded
fn check_body_size(headers: &HeaderMap, max_body_size: u64) -> Option<Response<Full<Bytes>>> {
    let content_length = headers.get("content-length")?;
    content_length.to_str().map_or_else(
        |_| {
            logger::log_warning("Content-Length header contains non-ASCII characters");
            None
        },
        |size_str| match size_str.parse::<u64>() {
            Ok(size) if size > max_body_size => {
                logger::log_error(&format!(
                    "Request body too large: {size} bytes (max: {max_body_size})"
                ));
                Some(http::build_413_response())
            }
            Err(_) => {
                logger::log_warning(&format!(
                    "Invalid Content-Length value: '{size_str}', skipping size check"
                ));
                None
            }
            _ => None,
        },
    )
}

fn header_string(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string)
}

fn set_server_header(response: &mut Response<Full<Bytes>>, server_name: &str) {
    if let Ok(value) = HeaderValue::from_str(server_name) {
        response.headers_mut().insert(hyper::header::SERVER, value);
    }
}

const fn version_label(version: Version) -> &'static str {
    match version {
        Version::HTTP_10 => "1.0",
        Version::HTTP_2 => "2",
        _ => "1.1",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{
        AppConfig, Config, HttpConfig, LoggingConfig, Mode, PerformanceConfig, ResourcesConfig,
        ServerConfig, DEV_SECRET_KEY,
    };
    use chrono::Datelike;
    use http_body_util::BodyExt;

    fn test_state() -> Arc<AppState> {
        let config = Config {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 5000,
                workers: None,
            },
            app: AppConfig {
                secret_key: DEV_SECRET_KEY.to_string(),
                env: Mode::Development,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                access_log: false,
                access_log_format: "combined".to_string(),
            },
            http: HttpConfig {
                server_name: "minidash/0.1".to_string(),
                enable_cors: false,
                max_body_size: 1_048_576,
            },
            performance: PerformanceConfig {
                keep_alive_timeout: 75,
                read_timeout: 30,
                write_timeout: 30,
            },
            resources: ResourcesConfig {
                template_dir: "templates".to_string(),
                static_dir: "static".to_string(),
                favicon_paths: vec!["/favicon.ico".to_string(), "/favicon.svg".to_string()],
            },
        };
        Arc::new(AppState::new(config))
    }

    fn ctx(path: &str) -> RequestContext<'_> {
        RequestContext {
            path,
            is_head: false,
            if_none_match: None,
        }
    }

    async fn body_string(response: Response<Full<Bytes>>) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_home_contains_current_year() {
        let state = test_state();
        let response = route_request(&ctx("/"), &state).await;
        assert_eq!(response.status(), 200);
        let body = body_string(response).await;
        assert!(body.contains(&chrono::Local::now().year().to_string()));
    }

    #[tokio::test]
    async fn test_about_lists_team() {
        let state = test_state();
        let response = route_request(&ctx("/about"), &state).await;
        assert_eq!(response.status(), 200);
        let body = body_string(response).await;
        for name in ["Alice", "Bob", "Carol"] {
            assert!(body.contains(name), "missing {name}");
        }
    }

    #[tokio::test]
    async fn test_dashboard_renders() {
        let state = test_state();
        let response = route_request(&ctx("/dashboard"), &state).await;
        assert_eq!(response.status(), 200);
        let body = body_string(response).await;
        assert!(body.contains("Data Dashboard"));
    }

    #[tokio::test]
    async fn test_api_data_shape() {
        let state = test_state();
        let response = route_request(&ctx("/api/data"), &state).await;
        assert_eq!(response.status(), 200);
        assert_eq!(response.headers()["content-type"], "application/json");
        let body = body_string(response).await;
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["labels"].as_array().unwrap().len(), 6);
        assert_eq!(json["values"].as_array().unwrap().len(), 6);
        let ts = json["timestamp"].as_str().unwrap();
        chrono::DateTime::parse_from_rfc3339(ts).unwrap();
    }

    #[tokio::test]
    async fn test_unknown_path_is_404() {
        let state = test_state();
        let response = route_request(&ctx("/nonexistent-path"), &state).await;
        assert_eq!(response.status(), 404);
    }

    #[tokio::test]
    async fn test_static_css_served() {
        let state = test_state();
        let response = route_request(&ctx("/static/css/style.css"), &state).await;
        assert_eq!(response.status(), 200);
        assert_eq!(response.headers()["content-type"], "text/css");
        assert!(response.headers().contains_key("etag"));
    }

    #[tokio::test]
    async fn test_favicon_served() {
        let state = test_state();
        let response = route_request(&ctx("/favicon.svg"), &state).await;
        assert_eq!(response.status(), 200);
        assert_eq!(response.headers()["content-type"], "image/svg+xml");
    }

    #[tokio::test]
    async fn test_head_request_has_empty_body() {
        let state = test_state();
        let head_ctx = RequestContext {
            path: "/",
            is_head: true,
            if_none_match: None,
        };
        let response = route_request(&head_ctx, &state).await;
        assert_eq!(response.status(), 200);
        assert_eq!(response.body().size_hint().exact(), Some(0));
    }

    #[test]
    fn test_check_http_method() {
        assert!(check_http_method(&Method::GET, false).is_none());
        assert!(check_http_method(&Method::HEAD, false).is_none());

        let options = check_http_method(&Method::OPTIONS, false).unwrap();
        assert_eq!(options.status(), 204);

        let post = check_http_method(&Method::POST, false).unwrap();
        assert_eq!(post.status(), 405);
        assert_eq!(post.headers()["allow"], "GET, HEAD, OPTIONS");
    }

    #[test]
    fn test_check_body_size() {
        let mut headers = HeaderMap::new();
        assert!(check_body_size(&headers, 1024).is_none());

        headers.insert("content-length", HeaderValue::from_static("512"));
        assert!(check_body_size(&headers, 1024).is_none());

        headers.insert("content-length", HeaderValue::from_static("2048"));
        let response = check_body_size(&headers, 1024).unwrap();
        assert_eq!(response.status(), 413);

        headers.insert("content-length", HeaderValue::from_static("not-a-number"));
        assert!(check_body_size(&headers, 1024).is_none());
    }

    #[test]
    fn test_version_label() {
        assert_eq!(version_label(Version::HTTP_11), "1.1");
        assert_eq!(version_label(Version::HTTP_10), "1.0");
        assert_eq!(version_label(Version::HTTP_2), "2");
    }
}
