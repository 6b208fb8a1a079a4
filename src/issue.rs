// Issue data model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Issue priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Default for Priority {
    fn default() -> Self {
        Self::Medium
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Priority::Low => write!(f, "low"),
            Priority::Medium => write!(f, "medium"),
            Priority::High => write!(f, "high"),
        }
    }
}

impl std::str::FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            other => Err(format!("unknown priority: {} (expected low/medium/high)", other)),
        }
    }
}

/// A single trackable issue record
///
/// `date` is stamped at creation and never changes; `tags` preserve insertion
/// order. Blobs written before the `views` counter existed decode with
/// `views = 0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    pub id: String,
    pub title: String,
    pub description: String,
    pub priority: Priority,
    #[serde(default)]
    pub tags: Vec<String>,
    pub date: DateTime<Utc>,
    pub resolved: bool,
    #[serde(default)]
    pub views: u64,
}

/// Input for creating an issue
#[derive(Debug, Clone, Default)]
pub struct NewIssue {
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub tags: Vec<String>,
}

impl Issue {
    /// Build a fresh issue from creation input
    ///
    /// Assigns a new id, stamps `date`, and collapses duplicate tags keeping
    /// the first occurrence.
    pub(crate) fn from_new(new: NewIssue, date: DateTime<Utc>) -> Self {
        let mut tags: Vec<String> = Vec::with_capacity(new.tags.len());
        for tag in new.tags {
            if !tags.contains(&tag) {
                tags.push(tag);
            }
        }

        Self {
            id: generate_id(),
            title: new.title,
            description: new.description,
            priority: new.priority,
            tags,
            date,
            resolved: false,
            views: 0,
        }
    }
}

/// Generate a fresh issue id
///
/// UUIDv7: a monotonically increasing time component followed by random
/// bits, unique with overwhelming probability within one store.
pub fn generate_id() -> String {
    Uuid::now_v7().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_serialization() {
        let json = serde_json::to_string(&Priority::Low).unwrap();
        assert_eq!(json, "\"low\"");

        let json = serde_json::to_string(&Priority::High).unwrap();
        assert_eq!(json, "\"high\"");
    }

    #[test]
    fn test_priority_from_str() {
        assert_eq!("high".parse::<Priority>().unwrap(), Priority::High);
        assert_eq!("MEDIUM".parse::<Priority>().unwrap(), Priority::Medium);
        assert!("urgent".parse::<Priority>().is_err());
    }

    #[test]
    fn test_issue_round_trip() {
        let issue = Issue {
            id: generate_id(),
            title: "Broken login".to_string(),
            description: "Login fails on submit".to_string(),
            priority: Priority::High,
            tags: vec!["bug".to_string(), "auth".to_string()],
            date: Utc::now(),
            resolved: false,
            views: 3,
        };

        let json = serde_json::to_string(&issue).unwrap();
        let back: Issue = serde_json::from_str(&json).unwrap();
        assert_eq!(back, issue);
    }

    #[test]
    fn test_issue_decodes_without_optional_fields() {
        // Blobs from the base variant carry neither tags nor views
        let json = r#"{
            "id": "abc",
            "title": "t",
            "description": "d",
            "priority": "low",
            "date": "2026-01-15T10:00:00Z",
            "resolved": true
        }"#;

        let issue: Issue = serde_json::from_str(json).unwrap();
        assert!(issue.tags.is_empty());
        assert_eq!(issue.views, 0);
        assert!(issue.resolved);
    }

    #[test]
    fn test_from_new_defaults_and_tag_dedup() {
        let new = NewIssue {
            title: "t".to_string(),
            description: "d".to_string(),
            priority: Priority::Low,
            tags: vec!["ui".to_string(), "bug".to_string(), "ui".to_string()],
        };

        let issue = Issue::from_new(new, Utc::now());
        assert!(!issue.resolved);
        assert_eq!(issue.views, 0);
        assert_eq!(issue.tags, vec!["ui".to_string(), "bug".to_string()]);
        assert!(!issue.id.is_empty());
    }

    #[test]
    fn test_generated_ids_are_unique() {
        let a = generate_id();
        let b = generate_id();
        assert_ne!(a, b);
    }
}
