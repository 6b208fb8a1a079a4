// In-memory filtering over the issue collection

use crate::issue::{Issue, Priority};

/// Predicate set for narrowing a listing
///
/// Unset fields match everything; the default filter matches every issue.
#[derive(Debug, Clone, Default)]
pub struct IssueFilter {
    /// Match only this resolution state
    pub resolved: Option<bool>,
    /// Match only this priority
    pub priority: Option<Priority>,
    /// Match issues carrying this tag
    pub tag: Option<String>,
    /// Case-insensitive substring over title and description
    pub text: Option<String>,
}

impl IssueFilter {
    pub fn matches(&self, issue: &Issue) -> bool {
        if let Some(resolved) = self.resolved {
            if issue.resolved != resolved {
                return false;
            }
        }

        if let Some(priority) = self.priority {
            if issue.priority != priority {
                return false;
            }
        }

        if let Some(tag) = &self.tag {
            if !issue.tags.iter().any(|t| t == tag) {
                return false;
            }
        }

        if let Some(text) = &self.text {
            let needle = text.to_lowercase();
            if !issue.title.to_lowercase().contains(&needle)
                && !issue.description.to_lowercase().contains(&needle)
            {
                return false;
            }
        }

        true
    }
}
