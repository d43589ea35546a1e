//! Storage backend metrics

use std::{
    sync::atomic::{AtomicU64, Ordering},
    time::{Duration, Instant},
};

/// Store primitive being measured
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Get,
    Query,
    Scan,
    Put,
    Delete,
}

impl Operation {
    const COUNT: usize = 5;

    fn index(self) -> usize {
        match self {
            Operation::Get => 0,
            Operation::Query => 1,
            Operation::Scan => 2,
            Operation::Put => 3,
            Operation::Delete => 4,
        }
    }
}

#[derive(Debug, Default)]
struct Counter {
    count: AtomicU64,
    latency_us: AtomicU64,
    errors: AtomicU64,
}

impl Counter {
    fn record(&self, duration: Duration, error: bool) {
        self.count.fetch_add(1, Ordering::Relaxed);
        self.latency_us.fetch_add(duration.as_micros() as u64, Ordering::Relaxed);
        if error {
            self.errors.fetch_add(1, Ordering::Relaxed);
        }
    }

    fn snapshot(&self) -> OpStats {
        let count = self.count.load(Ordering::Relaxed);
        let latency = self.latency_us.load(Ordering::Relaxed);
        OpStats {
            count,
            avg_latency_us: if count > 0 { latency / count } else { 0 },
            errors: self.errors.load(Ordering::Relaxed),
        }
    }

    fn reset(&self) {
        self.count.store(0, Ordering::Relaxed);
        self.latency_us.store(0, Ordering::Relaxed);
        self.errors.store(0, Ordering::Relaxed);
    }
}

/// Storage operation metrics
#[derive(Debug, Default)]
pub struct StoreMetrics {
    ops: [Counter; Operation::COUNT],

    // Key space metrics
    total_items: AtomicU64,
    total_bytes: AtomicU64,
}

impl StoreMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one primitive call
    pub fn record(&self, op: Operation, duration: Duration, error: bool) {
        self.ops[op.index()].record(duration, error);
    }

    /// Update key space metrics
    pub fn update_key_space(&self, items: u64, bytes: u64) {
        self.total_items.store(items, Ordering::Relaxed);
        self.total_bytes.store(bytes, Ordering::Relaxed);
    }

    /// Get metrics snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            get: self.ops[Operation::Get.index()].snapshot(),
            query: self.ops[Operation::Query.index()].snapshot(),
            scan: self.ops[Operation::Scan.index()].snapshot(),
            put: self.ops[Operation::Put.index()].snapshot(),
            delete: self.ops[Operation::Delete.index()].snapshot(),
            total_items: self.total_items.load(Ordering::Relaxed),
            total_bytes: self.total_bytes.load(Ordering::Relaxed),
        }
    }

    /// Reset operation counters; key space figures are left alone
    pub fn reset(&self) {
        for counter in &self.ops {
            counter.reset();
        }
    }
}

/// Counters for one operation kind
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OpStats {
    pub count: u64,
    pub avg_latency_us: u64,
    pub errors: u64,
}

/// Snapshot of metrics at a point in time
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub get: OpStats,
    pub query: OpStats,
    pub scan: OpStats,
    pub put: OpStats,
    pub delete: OpStats,
    pub total_items: u64,
    pub total_bytes: u64,
}

/// Helper to measure operation duration
pub struct OpTimer {
    start: Instant,
}

impl OpTimer {
    pub fn new() -> Self {
        Self { start: Instant::now() }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

impl Default for OpTimer {
    fn default() -> Self {
        Self::new()
    }
}
