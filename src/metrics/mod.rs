use crate::logging::{LogEvent, LogFields, LogLevel};
use serde_json::json;
use std::time::Duration;

/// Counters accumulated by a drag controller.
#[derive(Debug, Default, Clone)]
pub struct BoardMetrics {
    drags: u64,
    hovers: u64,
    commits: u64,
    skips: u64,
    cancels: u64,
    edits: u64,
    rows_created: u64,
    rows_pruned: u64,
}

impl BoardMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_drag(&mut self) {
        self.drags = self.drags.saturating_add(1);
    }

    pub fn record_hover(&mut self) {
        self.hovers = self.hovers.saturating_add(1);
    }

    pub fn record_commit(&mut self, rows_created: usize, rows_pruned: usize) {
        self.commits = self.commits.saturating_add(1);
        self.record_row_churn(rows_created, rows_pruned);
    }

    pub fn record_skip(&mut self) {
        self.skips = self.skips.saturating_add(1);
    }

    pub fn record_cancel(&mut self) {
        self.cancels = self.cancels.saturating_add(1);
    }

    pub fn record_edit(&mut self, rows_created: usize, rows_pruned: usize) {
        self.edits = self.edits.saturating_add(1);
        self.record_row_churn(rows_created, rows_pruned);
    }

    fn record_row_churn(&mut self, created: usize, pruned: usize) {
        self.rows_created = self.rows_created.saturating_add(created as u64);
        self.rows_pruned = self.rows_pruned.saturating_add(pruned as u64);
    }

    pub fn snapshot(&self, uptime: Duration) -> MetricSnapshot {
        MetricSnapshot {
            uptime_ms: uptime.as_millis() as u64,
            drags: self.drags,
            hovers: self.hovers,
            commits: self.commits,
            skips: self.skips,
            cancels: self.cancels,
            edits: self.edits,
            rows_created: self.rows_created,
            rows_pruned: self.rows_pruned,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricSnapshot {
    pub uptime_ms: u64,
    pub drags: u64,
    pub hovers: u64,
    pub commits: u64,
    pub skips: u64,
    pub cancels: u64,
    pub edits: u64,
    pub rows_created: u64,
    pub rows_pruned: u64,
}

impl MetricSnapshot {
    pub fn to_log_event(&self, target: &str) -> LogEvent {
        LogEvent::with_fields(LogLevel::Info, target, "board_metrics", self.as_fields())
    }

    pub fn as_fields(&self) -> LogFields {
        let mut map = LogFields::new();
        map.insert("uptime_ms".to_string(), json!(self.uptime_ms));
        map.insert("drags".to_string(), json!(self.drags));
        map.insert("hovers".to_string(), json!(self.hovers));
        map.insert("commits".to_string(), json!(self.commits));
        map.insert("skips".to_string(), json!(self.skips));
        map.insert("cancels".to_string(), json!(self.cancels));
        map.insert("edits".to_string(), json!(self.edits));
        map.insert("rows_created".to_string(), json!(self.rows_created));
        map.insert("rows_pruned".to_string(), json!(self.rows_pruned));
        map
    }
}
