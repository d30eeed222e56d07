use lazy_static::lazy_static;
use prometheus::{register_histogram_vec, register_int_counter_vec, HistogramVec, IntCounterVec};

lazy_static! {
    // HTTP Metrics
    pub static ref HTTP_REQUESTS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "http_requests_total",
        "Total HTTP requests",
        &["method", "path", "status"]
    )
    .unwrap();

    pub static ref HTTP_REQUEST_DURATION_SECONDS: HistogramVec = register_histogram_vec!(
        "http_request_duration_seconds",
        "HTTP request duration in seconds",
        &["method", "path"],
        vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0]
    )
    .unwrap();

    // Version discovery
    pub static ref VERSION_LISTINGS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "version_listings_total",
        "Total version discovery responses",
        &["v1_enabled"]
    )
    .unwrap();

    // Error taxonomy
    pub static ref ERROR_MESSAGE_FALLBACKS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "error_message_fallbacks_total",
        "Errors whose message template could not be rendered",
        &["kind"]  // kind: ErrorKind code, e.g. READONLY_PROPERTY
    )
    .unwrap();
}

/// Initialize all metrics (called on startup)
pub fn init_metrics() {
    // Force lazy_static initialization
    lazy_static::initialize(&HTTP_REQUESTS_TOTAL);
    lazy_static::initialize(&HTTP_REQUEST_DURATION_SECONDS);
    lazy_static::initialize(&VERSION_LISTINGS_TOTAL);
    lazy_static::initialize(&ERROR_MESSAGE_FALLBACKS_TOTAL);
}
