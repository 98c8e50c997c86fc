//! Translation cache metrics.
//!
//! Counters are owned by each `TranslationCache` rather than kept in a global,
//! so independent service instances (and tests) never see each other's numbers.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Counters describing the work a translation cache has done.
#[derive(Debug, Default)]
pub struct CacheMetrics {
    /// Number of full tables computed (factory + overrides)
    merges: AtomicUsize,

    /// Number of languages skipped because they were already cached
    load_hits: AtomicUsize,

    /// Number of tables mirrored to the durable store
    mirror_writes: AtomicUsize,

    /// Number of mirror writes that failed
    mirror_failures: AtomicUsize,

    /// Number of times the store could not list its keys
    enumeration_failures: AtomicUsize,
}

impl CacheMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a freshly computed table.
    pub fn record_merge(&self) {
        self.merges.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a language that was already cached.
    pub fn record_load_hit(&self) {
        self.load_hits.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a successful mirror write.
    pub fn record_mirror_write(&self) {
        self.mirror_writes.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a failed mirror write.
    pub fn record_mirror_failure(&self) {
        self.mirror_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a store key listing that failed.
    pub fn record_enumeration_failure(&self) {
        self.enumeration_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn merges(&self) -> usize {
        self.merges.load(Ordering::Relaxed)
    }

    pub fn load_hits(&self) -> usize {
        self.load_hits.load(Ordering::Relaxed)
    }

    pub fn mirror_writes(&self) -> usize {
        self.mirror_writes.load(Ordering::Relaxed)
    }

    pub fn mirror_failures(&self) -> usize {
        self.mirror_failures.load(Ordering::Relaxed)
    }

    pub fn enumeration_failures(&self) -> usize {
        self.enumeration_failures.load(Ordering::Relaxed)
    }

    /// Generate a metrics report.
    pub fn report(&self) -> MetricsReport {
        let writes = self.mirror_writes();
        let failures = self.mirror_failures();
        let attempts = writes + failures;
        let mirror_success_rate = if attempts > 0 {
            (writes as f64 / attempts as f64) * 100.0
        } else {
            0.0
        };

        MetricsReport {
            merges: self.merges(),
            load_hits: self.load_hits(),
            mirror_writes: writes,
            mirror_failures: failures,
            mirror_success_rate,
            enumeration_failures: self.enumeration_failures(),
            generated_at: Utc::now(),
        }
    }
}

/// Snapshot of cache metrics.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsReport {
    /// Number of full tables computed
    pub merges: usize,

    /// Number of already-cached languages skipped
    pub load_hits: usize,

    /// Number of successful mirror writes
    pub mirror_writes: usize,

    /// Number of failed mirror writes
    pub mirror_failures: usize,

    /// Mirror success rate as a percentage (0-100)
    pub mirror_success_rate: f64,

    /// Number of failed store key listings; `CacheStats::stored_keys` is
    /// unreliable while this grows
    pub enumeration_failures: usize,

    /// When the report was taken
    pub generated_at: DateTime<Utc>,
}
