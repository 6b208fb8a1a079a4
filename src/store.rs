// Issue repository over single-key blob storage

use crate::error::{Error, Result};
use crate::export::{self, ExportFormat};
use crate::filter::IssueFilter;
use crate::issue::{Issue, NewIssue};
use crate::notify::{DEFAULT_NOTIFY_DURATION, Notifier, NullNotifier, Severity};
use crate::stats::Stats;
use crate::storage::BlobStorage;
use chrono::Utc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Storage key holding the entire issue collection
pub const STORAGE_KEY: &str = "issues";

/// Issue repository backed by a single JSON-array blob
///
/// Every operation loads the full collection from storage, works on it in
/// memory, and (for mutations) writes the full collection back. The blob is
/// the only durable state; concurrent writers resolve last-writer-wins.
pub struct IssueStore<S: BlobStorage> {
    storage: S,
    notifier: Box<dyn Notifier>,
    notify_duration: Duration,
}

impl<S: BlobStorage> IssueStore<S> {
    /// Create a store over the given storage backend
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            notifier: Box::new(NullNotifier),
            notify_duration: DEFAULT_NOTIFY_DURATION,
        }
    }

    /// Replace the notification sink
    pub fn with_notifier(mut self, notifier: Box<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    /// Override the auto-dismiss duration passed to the notifier
    pub fn with_notify_duration(mut self, duration: Duration) -> Self {
        self.notify_duration = duration;
        self
    }

    // ========================================================================
    // Load / save round-trip
    // ========================================================================

    /// Load the full collection
    ///
    /// An absent key is the empty collection; a present blob must decode as
    /// a JSON array of issues or the call fails with `CorruptData`.
    pub fn load(&self) -> Result<Vec<Issue>> {
        match self.storage.get(STORAGE_KEY)? {
            None => Ok(Vec::new()),
            Some(blob) => serde_json::from_str(&blob).map_err(|e| Error::CorruptData {
                reason: e.to_string(),
            }),
        }
    }

    /// Persist the full collection, replacing any prior value
    pub fn save(&mut self, issues: &[Issue]) -> Result<()> {
        let blob = serde_json::to_string(issues)?;
        if let Err(e) = self.storage.set(STORAGE_KEY, &blob) {
            warn!(error = %e, "save failed");
            self.notify("Failed to save issues", Severity::Warning);
            return Err(e);
        }
        debug!(count = issues.len(), "saved issue collection");
        Ok(())
    }

    // ========================================================================
    // CRUD operations
    // ========================================================================

    /// Create a new issue at the front of the collection (most recent first)
    pub fn create(&mut self, new: NewIssue) -> Result<Issue> {
        let mut issues = self.load()?;
        let issue = Issue::from_new(new, Utc::now());
        issues.insert(0, issue.clone());
        self.save(&issues)?;
        info!(id = %issue.id, "created issue");
        Ok(issue)
    }

    /// Delete the issue with the given id
    ///
    /// Returns `Ok(false)` without touching storage when the id is unknown.
    pub fn delete(&mut self, id: &str) -> Result<bool> {
        let mut issues = self.load()?;
        let before = issues.len();
        issues.retain(|issue| issue.id != id);
        if issues.len() == before {
            debug!(id, "delete: no matching issue");
            return Ok(false);
        }
        self.save(&issues)?;
        info!(id, "deleted issue");
        Ok(true)
    }

    /// Flip the resolved flag on the issue with the given id
    ///
    /// Leaves every other field and every other issue untouched. Same
    /// unknown-id contract as `delete`.
    pub fn toggle_resolve(&mut self, id: &str) -> Result<bool> {
        let mut issues = self.load()?;
        let Some(issue) = issues.iter_mut().find(|issue| issue.id == id) else {
            debug!(id, "toggle_resolve: no matching issue");
            return Ok(false);
        };
        issue.resolved = !issue.resolved;
        let resolved = issue.resolved;
        self.save(&issues)?;
        info!(id, resolved, "toggled issue resolution");
        Ok(true)
    }

    /// Increment the view counter on the issue with the given id
    pub fn record_view(&mut self, id: &str) -> Result<bool> {
        let mut issues = self.load()?;
        let Some(issue) = issues.iter_mut().find(|issue| issue.id == id) else {
            debug!(id, "record_view: no matching issue");
            return Ok(false);
        };
        issue.views += 1;
        self.save(&issues)?;
        Ok(true)
    }

    /// Fetch a single issue by id
    pub fn get(&self, id: &str) -> Result<Option<Issue>> {
        Ok(self.load()?.into_iter().find(|issue| issue.id == id))
    }

    /// List the full collection in stored order
    pub fn list(&self) -> Result<Vec<Issue>> {
        self.load()
    }

    /// List issues matching the filter, order preserved
    pub fn find(&self, filter: &IssueFilter) -> Result<Vec<Issue>> {
        Ok(self
            .load()?
            .into_iter()
            .filter(|issue| filter.matches(issue))
            .collect())
    }

    // ========================================================================
    // Statistics and export
    // ========================================================================

    /// Aggregate statistics for the current collection
    pub fn stats(&self) -> Result<Stats> {
        Ok(Stats::collect(&self.load()?, Utc::now()))
    }

    /// Export the collection as pretty-printed JSON
    pub fn export_json(&self) -> Result<String> {
        self.export(ExportFormat::Json)
    }

    /// Export the collection as CSV
    pub fn export_csv(&self) -> Result<String> {
        self.export(ExportFormat::Csv)
    }

    fn export(&self, format: ExportFormat) -> Result<String> {
        let result = self.load().and_then(|issues| match format {
            ExportFormat::Json => export::to_json(&issues),
            ExportFormat::Csv => Ok(export::to_csv(&issues)),
        });

        match &result {
            Ok(_) => self.notify("Issues exported successfully", Severity::Success),
            Err(e) => {
                warn!(error = %e, format = %format, "export failed");
                self.notify("Export failed", Severity::Warning);
            }
        }

        result
    }

    fn notify(&self, message: &str, severity: Severity) {
        self.notifier.notify(message, severity, self.notify_duration);
    }
}
