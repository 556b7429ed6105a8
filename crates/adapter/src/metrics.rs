use std::time::Instant;

use common::Result;
use once_cell::sync::Lazy;
use prometheus::{
    register_histogram_vec, register_int_counter_vec, HistogramVec, IntCounterVec,
};

pub static OPERATIONS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "adapter_operations_total",
        "Adapter operations grouped by operation and outcome",
        &["op", "outcome"]
    )
    .expect("adapter operations total")
});

pub static OPERATION_LATENCY_SECONDS: Lazy<HistogramVec> = Lazy::new(|| {
    register_histogram_vec!(
        "adapter_operation_latency_seconds",
        "End-to-end latency of adapter operations",
        &["op"]
    )
    .expect("adapter operation latency")
});

pub static NOT_FOUND_SKIPS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "adapter_not_found_skips_total",
        "Listings that returned 404 upstream and were served as empty",
        &["listing"]
    )
    .expect("adapter not found skips")
});

pub fn observe<T>(op: &str, started: Instant, result: &Result<T>) {
    let outcome = if result.is_ok() { "success" } else { "error" };
    OPERATIONS_TOTAL.with_label_values(&[op, outcome]).inc();
    OPERATION_LATENCY_SECONDS
        .with_label_values(&[op])
        .observe(started.elapsed().as_secs_f64());
}
