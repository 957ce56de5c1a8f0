//! JSON data endpoint
//!
//! `/api/data` returns the sample analytics record consumed by the dashboard
//! chart. The record is fixed apart from the timestamp, which is generated
//! fresh per call.

use crate::handler::router::RequestContext;
use crate::http;
use chrono::Local;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};
use serde::Serialize;

const MONTH_LABELS: [&str; 6] = ["January", "February", "March", "April", "May", "June"];
const MONTH_VALUES: [i64; 6] = [65, 59, 80, 81, 56, 55];

/// Analytics record returned by `/api/data`
#[derive(Debug, Serialize)]
pub struct ChartData {
    pub labels: Vec<&'static str>,
    pub values: Vec<i64>,
    pub timestamp: String,
}

impl ChartData {
    /// Build the sample record with a fresh RFC 3339 timestamp
    pub fn sample() -> Self {
        Self {
            labels: MONTH_LABELS.to_vec(),
            values: MONTH_VALUES.to_vec(),
            timestamp: Local::now().to_rfc3339(),
        }
    }
}

/// Handle GET /api/data
pub fn chart_data(ctx: &RequestContext<'_>) -> Response<Full<Bytes>> {
    http::response::build_json_response(StatusCode::OK, &ChartData::sample(), ctx.is_head)
}
