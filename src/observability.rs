//! Tracing setup and in-process request counters

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info";

/// Install the global fmt subscriber; `RUST_LOG` overrides the default level
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    // A subscriber may already be installed (tests, embedding)
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Counters for served and failed requests
#[derive(Debug, Default)]
pub struct Metrics {
    definitions_served: AtomicU64,
    feeds_served: AtomicU64,
    articles_written: AtomicU64,
    chat_replies: AtomicU64,
    requests_rejected: AtomicU64,
    upstream_failures: AtomicU64,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn definition_served(&self) {
        Self::bump(&self.definitions_served, "definitions_served");
    }

    pub fn feed_served(&self) {
        Self::bump(&self.feeds_served, "feeds_served");
    }

    pub fn article_written(&self) {
        Self::bump(&self.articles_written, "articles_written");
    }

    pub fn chat_replied(&self) {
        Self::bump(&self.chat_replies, "chat_replies");
    }

    pub fn request_rejected(&self) {
        Self::bump(&self.requests_rejected, "requests_rejected");
    }

    pub fn upstream_failed(&self) {
        Self::bump(&self.upstream_failures, "upstream_failures");
    }

    fn bump(counter: &AtomicU64, name: &'static str) {
        counter.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(counter = name, "Metric incremented");
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            definitions_served: self.definitions_served.load(Ordering::Relaxed),
            feeds_served: self.feeds_served.load(Ordering::Relaxed),
            articles_written: self.articles_written.load(Ordering::Relaxed),
            chat_replies: self.chat_replies.load(Ordering::Relaxed),
            requests_rejected: self.requests_rejected.load(Ordering::Relaxed),
            upstream_failures: self.upstream_failures.load(Ordering::Relaxed),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub definitions_served: u64,
    pub feeds_served: u64,
    pub articles_written: u64,
    pub chat_replies: u64,
    pub requests_rejected: u64,
    pub upstream_failures: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_reflects_increments() {
        let metrics = Metrics::new();
        metrics.definition_served();
        metrics.definition_served();
        metrics.request_rejected();
        metrics.upstream_failed();

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.definitions_served, 2);
        assert_eq!(snapshot.requests_rejected, 1);
        assert_eq!(snapshot.upstream_failures, 1);
        assert_eq!(snapshot.feeds_served, 0);
    }

    #[test]
    fn snapshot_serializes_counter_names() {
        let value = serde_json::to_value(MetricsSnapshot::default()).unwrap();
        for key in [
            "definitions_served",
            "feeds_served",
            "articles_written",
            "chat_replies",
            "requests_rejected",
            "upstream_failures",
        ] {
            assert_eq!(value[key], 0, "missing {key}");
        }
    }
}
