use once_cell::sync::Lazy;
use prometheus::{register_int_counter_vec, register_int_gauge, Encoder, IntCounterVec, IntGauge, TextEncoder};

// Prometheus metrics (default registry)
pub static REQUESTS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "roster_requests_total",
        "Roster operations handled, by operation",
        &["operation"]
    )
    .expect("register requests_total")
});

pub static ERRORS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "roster_errors_total",
        "Roster operations rejected, by error kind",
        &["kind"]
    )
    .expect("register errors_total")
});

pub static STUDENTS: Lazy<IntGauge> = Lazy::new(|| {
    register_int_gauge!("roster_students", "Students currently in the roster")
        .expect("register students")
});

pub fn record_request(operation: &str) {
    REQUESTS_TOTAL.with_label_values(&[operation]).inc();
}

pub fn record_error(kind: &str) {
    ERRORS_TOTAL.with_label_values(&[kind]).inc();
}

pub fn set_students(count: usize) {
    STUDENTS.set(i64::try_from(count).unwrap_or(i64::MAX));
}

pub fn encode_metrics() -> (axum::http::StatusCode, String) {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        return (
            axum::http::StatusCode::INTERNAL_SERVER_ERROR,
            format!("metrics encode error: {e}"),
        );
    }
    (
        axum::http::StatusCode::OK,
        String::from_utf8(buffer).unwrap_or_default(),
    )
}
