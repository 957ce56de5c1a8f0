//! Page handlers
//!
//! Renders the site pages from file-based templates. Each handler passes its
//! variables to the template engine and wraps the result in an HTML response;
//! render failures become a 500 with an error log line.

use crate::config::AppState;
use crate::handler::router::RequestContext;
use crate::http;
use crate::logger;
use chrono::{Datelike, Local};
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};
use minijinja::{context, Value};
use serde::Serialize;
use std::sync::Arc;

/// Team roster shown on the about page
#[derive(Debug, Clone, Serialize)]
pub struct TeamMember {
    pub name: &'static str,
    pub role: &'static str,
}

pub const TEAM: [TeamMember; 3] = [
    TeamMember {
        name: "Alice",
        role: "Data Engineer",
    },
    TeamMember {
        name: "Bob",
        role: "ML Engineer",
    },
    TeamMember {
        name: "Carol",
        role: "Analytics Lead",
    },
];

/// Handle GET /
pub fn home(ctx: &RequestContext<'_>, state: &Arc<AppState>) -> Response<Full<Bytes>> {
    let current_year = Local::now().year();
    render_page(
        ctx,
        state,
        "index.html",
        context! { title => "Home", current_year => current_year },
    )
}

/// Handle GET /about
pub fn about(ctx: &RequestContext<'_>, state: &Arc<AppState>) -> Response<Full<Bytes>> {
    render_page(
        ctx,
        state,
        "about.html",
        context! { title => "About Us", team => TEAM },
    )
}

/// Handle GET /dashboard
///
/// The chart itself is drawn client-side from `/api/data`.
pub fn dashboard(ctx: &RequestContext<'_>, state: &Arc<AppState>) -> Response<Full<Bytes>> {
    render_page(ctx, state, "dashboard.html", context! { title => "Data Dashboard" })
}

/// Fallback for any unmatched path
///
/// Renders the 404 page; if that template is itself unavailable, degrades to
/// a plain-text 404.
pub fn not_found(ctx: &RequestContext<'_>, state: &Arc<AppState>) -> Response<Full<Bytes>> {
    match state
        .templates
        .render("404.html", context! { title => "Page Not Found" })
    {
        Ok(html) => http::response::build_html_response(html, StatusCode::NOT_FOUND, ctx.is_head),
        Err(e) => {
            logger::log_error(&format!("Failed to render 404 page: {e}"));
            http::build_404_response()
        }
    }
}

fn render_page(
    ctx: &RequestContext<'_>,
    state: &Arc<AppState>,
    name: &str,
    vars: Value,
) -> Response<Full<Bytes>> {
    match state.templates.render(name, vars) {
        Ok(html) => http::response::build_html_response(html, StatusCode::OK, ctx.is_head),
        Err(e) => {
            logger::log_error(&format!("Failed to render '{name}': {e}"));
            http::build_500_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_team_roster() {
        assert_eq!(TEAM.len(), 3);
        let names: Vec<&str> = TEAM.iter().map(|m| m.name).collect();
        assert_eq!(names, ["Alice", "Bob", "Carol"]);
    }

    #[test]
    fn test_team_serializes() {
        let json = serde_json::to_value(TEAM).unwrap();
        assert_eq!(json[0]["role"], "Data Engineer");
    }
}
