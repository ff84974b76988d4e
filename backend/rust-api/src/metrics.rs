use lazy_static::lazy_static;
use prometheus::{
    register_histogram_vec, register_int_counter_vec, Encoder, HistogramVec, IntCounterVec,
    TextEncoder,
};

use crate::models::{ContentFormat, LearningStyle};

lazy_static! {
    // HTTP Metrics
    pub static ref HTTP_REQUESTS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "http_requests_total",
        "Total number of HTTP requests",
        &["method", "path", "status"]
    )
    .unwrap();

    pub static ref HTTP_REQUEST_DURATION_SECONDS: HistogramVec = register_histogram_vec!(
        "http_request_duration_seconds",
        "HTTP request duration in seconds",
        &["method", "path"],
        vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]
    )
    .unwrap();

    // Business Metrics
    pub static ref ASSESSMENTS_SCORED_TOTAL: IntCounterVec = register_int_counter_vec!(
        "assessments_scored_total",
        "Total number of assessments classified, by resulting learning style",
        &["learning_style"]
    )
    .unwrap();

    pub static ref ASSESSMENTS_REJECTED_TOTAL: IntCounterVec = register_int_counter_vec!(
        "assessments_rejected_total",
        "Total number of rejected assessment submissions",
        &["reason"]
    )
    .unwrap();

    pub static ref FORMAT_RECOMMENDATIONS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "format_recommendations_total",
        "Total number of adaptive format recommendations",
        &["format", "usage_override"]
    )
    .unwrap();

    pub static ref INTERACTIONS_RECORDED_TOTAL: IntCounterVec = register_int_counter_vec!(
        "interactions_recorded_total",
        "Total number of content interactions recorded",
        &["format"]
    )
    .unwrap();
}

pub fn record_assessment_scored(style: LearningStyle) {
    ASSESSMENTS_SCORED_TOTAL
        .with_label_values(&[style.as_str()])
        .inc();
}

pub fn record_assessment_rejected(reason: &str) {
    ASSESSMENTS_REJECTED_TOTAL
        .with_label_values(&[reason])
        .inc();
}

pub fn record_recommendation(format: ContentFormat, usage_override: bool) {
    let overridden = if usage_override { "true" } else { "false" };
    FORMAT_RECOMMENDATIONS_TOTAL
        .with_label_values(&[format.as_str(), overridden])
        .inc();
}

pub fn record_interaction(format: ContentFormat) {
    INTERACTIONS_RECORDED_TOTAL
        .with_label_values(&[format.as_str()])
        .inc();
}

/// Render all registered metrics in Prometheus text format
pub fn render_metrics() -> Result<String, prometheus::Error> {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer)?;
    String::from_utf8(buffer)
        .map_err(|e| prometheus::Error::Msg(format!("Failed to convert metrics to UTF-8: {}", e)))
}
