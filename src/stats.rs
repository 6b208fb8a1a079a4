// Aggregate statistics over the issue collection

use crate::issue::{Issue, Priority};
use chrono::{DateTime, Duration, Utc};
use std::collections::BTreeMap;

/// Per-priority issue counts, zero-defaulted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PriorityCounts {
    pub low: u64,
    pub medium: u64,
    pub high: u64,
}

/// Aggregate snapshot of the collection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stats {
    pub total: u64,
    pub open: u64,
    pub resolved: u64,
    pub by_priority: PriorityCounts,
    /// Occurrence count per tag; keys only for tags seen at least once
    pub by_tag: BTreeMap<String, u64>,
    /// Issues created within the trailing 7-day window ending at `now`
    pub recent: u64,
    /// Percentage of resolved issues, rounded; 0 for an empty collection
    pub resolution_rate: u8,
}

impl Stats {
    /// Compute statistics for the collection as of `now`
    ///
    /// Single pass, never mutates the input.
    pub fn collect(issues: &[Issue], now: DateTime<Utc>) -> Self {
        let total = issues.len() as u64;
        let mut resolved = 0u64;
        let mut by_priority = PriorityCounts::default();
        let mut by_tag = BTreeMap::new();
        let mut recent = 0u64;
        let window_start = now - Duration::days(7);

        for issue in issues {
            if issue.resolved {
                resolved += 1;
            }

            match issue.priority {
                Priority::Low => by_priority.low += 1,
                Priority::Medium => by_priority.medium += 1,
                Priority::High => by_priority.high += 1,
            }

            for tag in &issue.tags {
                *by_tag.entry(tag.clone()).or_insert(0) += 1;
            }

            if issue.date >= window_start {
                recent += 1;
            }
        }

        let resolution_rate = if total == 0 {
            0
        } else {
            (resolved as f64 * 100.0 / total as f64).round() as u8
        };

        Stats {
            total,
            open: total - resolved,
            resolved,
            by_priority,
            by_tag,
            recent,
            resolution_rate,
        }
    }
}
