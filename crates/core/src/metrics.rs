//! Prometheus metrics for core components.
//!
//! Covers the upstream catalog client; HTTP server metrics live in the
//! server crate, which registers these alongside its own.

use once_cell::sync::Lazy;
use prometheus::{HistogramOpts, HistogramVec, IntCounter, IntCounterVec, Opts};

/// Catalog requests total by endpoint and HTTP status.
pub static CATALOG_REQUESTS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "earmark_catalog_requests_total",
            "Total requests to the upstream podcast catalog",
        ),
        &["endpoint", "status"],
    )
    .unwrap()
});

/// Catalog request duration in seconds.
pub static CATALOG_REQUEST_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "earmark_catalog_request_duration_seconds",
            "Duration of upstream catalog requests",
        )
        .buckets(vec![0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0]),
        &["endpoint"],
    )
    .unwrap()
});

/// Access-token refreshes against the catalog's auth endpoint.
pub static CATALOG_TOKEN_REFRESHES: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "earmark_catalog_token_refreshes_total",
        "Total access-token refreshes against the catalog auth endpoint",
    )
    .unwrap()
});

/// All core metrics, for registration in the server's registry.
pub fn all_metrics() -> Vec<Box<dyn prometheus::core::Collector>> {
    vec![
        Box::new(CATALOG_REQUESTS.clone()),
        Box::new(CATALOG_REQUEST_DURATION.clone()),
        Box::new(CATALOG_TOKEN_REFRESHES.clone()),
    ]
}
