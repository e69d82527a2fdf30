//! Prometheus metrics for core components.
//!
//! This module provides metrics for:
//! - Search lifecycle (submissions, outcomes, superseded completions)
//! - The discovery service gateway (request latency by result)

use once_cell::sync::Lazy;
use prometheus::{Histogram, HistogramOpts, HistogramVec, IntCounter, IntCounterVec, Opts};

// =============================================================================
// Search Lifecycle Metrics
// =============================================================================

/// Searches accepted by the session.
pub static SEARCHES_SUBMITTED: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "leadfinder_searches_submitted_total",
        "Total searches submitted",
    )
    .unwrap()
});

/// Search completions applied to the session, by resulting status.
pub static SEARCH_OUTCOMES: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "leadfinder_search_outcomes_total",
            "Total search completions by resulting status",
        ),
        &["status"], // "populated", "empty", "failed"
    )
    .unwrap()
});

/// Completions dropped because a newer search superseded them.
pub static STALE_COMPLETIONS: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "leadfinder_stale_completions_total",
        "Search completions discarded because a newer search was pending",
    )
    .unwrap()
});

/// Leads received per applied search.
pub static LEADS_PER_SEARCH: Lazy<Histogram> = Lazy::new(|| {
    Histogram::with_opts(
        HistogramOpts::new(
            "leadfinder_leads_per_search",
            "Number of leads received per applied search",
        )
        .buckets(vec![0.0, 1.0, 5.0, 10.0, 25.0, 50.0, 100.0, 250.0]),
    )
    .unwrap()
});

// =============================================================================
// Gateway Metrics
// =============================================================================

/// Discovery service request duration in seconds.
pub static GATEWAY_REQUEST_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "leadfinder_gateway_request_duration_seconds",
            "Duration of lead discovery service requests",
        )
        .buckets(vec![0.5, 1.0, 2.5, 5.0, 10.0, 30.0, 60.0, 120.0, 300.0]),
        &["result"], // "ok", "not_found", "service_error", "network"
    )
    .unwrap()
});

/// All core metrics, for registration in a registry.
pub fn all_metrics() -> Vec<Box<dyn prometheus::core::Collector>> {
    vec![
        Box::new(SEARCHES_SUBMITTED.clone()),
        Box::new(SEARCH_OUTCOMES.clone()),
        Box::new(STALE_COMPLETIONS.clone()),
        Box::new(LEADS_PER_SEARCH.clone()),
        Box::new(GATEWAY_REQUEST_DURATION.clone()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use prometheus::Registry;

    #[test]
    fn test_all_metrics_register() {
        let registry = Registry::new();
        for metric in all_metrics() {
            registry.register(metric).unwrap();
        }

        SEARCHES_SUBMITTED.inc();
        SEARCH_OUTCOMES.with_label_values(&["empty"]).inc();
        GATEWAY_REQUEST_DURATION
            .with_label_values(&["ok"])
            .observe(0.2);

        let names: Vec<String> = registry
            .gather()
            .iter()
            .map(|family| family.get_name().to_string())
            .collect();
        assert!(names.contains(&"leadfinder_searches_submitted_total".to_string()));
        assert!(names.contains(&"leadfinder_search_outcomes_total".to_string()));
        assert!(names.contains(&"leadfinder_gateway_request_duration_seconds".to_string()));
    }
}
