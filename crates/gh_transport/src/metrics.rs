use once_cell::sync::Lazy;
use prometheus::{
    register_histogram, register_int_counter_vec, register_int_gauge, Histogram, IntCounterVec,
    IntGauge,
};

pub static REQUESTS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "gh_transport_requests_total",
        "Upstream GET requests grouped by outcome",
        &["outcome"]
    )
    .expect("requests total")
});

pub static REQUEST_LATENCY_SECONDS: Lazy<Histogram> = Lazy::new(|| {
    register_histogram!(
        "gh_transport_request_latency_seconds",
        "Latency of upstream GET requests"
    )
    .expect("request latency")
});

pub static RATE_REMAINING: Lazy<IntGauge> = Lazy::new(|| {
    register_int_gauge!(
        "gh_transport_rate_remaining",
        "Rate limit remaining reported by the most recent upstream response"
    )
    .expect("rate remaining")
});

pub fn record_outcome(outcome: &str) {
    REQUESTS_TOTAL.with_label_values(&[outcome]).inc();
}
