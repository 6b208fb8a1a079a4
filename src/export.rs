// JSON and CSV export of the issue collection

use crate::error::Result;
use crate::issue::Issue;
use chrono::NaiveDate;
use std::fmt::Write;

const CSV_HEADER: &str = "ID,Title,Description,Priority,Tags,Status,Date Created";

/// Export file format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Csv,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension())
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "csv" => Ok(ExportFormat::Csv),
            other => Err(format!("unknown export format: {} (expected json/csv)", other)),
        }
    }
}

/// Pretty-printed JSON array of the full collection
///
/// Round-trips back into the same sequence via serde.
pub fn to_json(issues: &[Issue]) -> Result<String> {
    Ok(serde_json::to_string_pretty(issues)?)
}

/// CSV rendering of the full collection
///
/// Title and Description are double-quoted with internal quotes doubled; the
/// remaining fields are emitted bare for compatibility with the original
/// export format. Tags are joined by `;`.
pub fn to_csv(issues: &[Issue]) -> String {
    let mut out = String::from(CSV_HEADER);
    out.push('\n');

    for issue in issues {
        let status = if issue.resolved { "Resolved" } else { "Open" };
        // Infallible: writing to a String cannot error
        let _ = writeln!(
            out,
            "{},{},{},{},{},{},{}",
            issue.id,
            quote(&issue.title),
            quote(&issue.description),
            issue.priority,
            issue.tags.join(";"),
            status,
            issue.date.format("%Y-%m-%d %H:%M:%S"),
        );
    }

    out
}

/// Download filename for an export produced on `date`
pub fn export_filename(format: ExportFormat, date: NaiveDate) -> String {
    format!("issues_export_{}.{}", date.format("%Y-%m-%d"), format.extension())
}

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::issue::Priority;
    use chrono::{TimeZone, Utc};

    fn issue(title: &str, description: &str, tags: &[&str], resolved: bool) -> Issue {
        Issue {
            id: "issue-1".to_string(),
            title: title.to_string(),
            description: description.to_string(),
            priority: Priority::Medium,
            tags: tags.iter().map(|t| t.to_string()).collect(),
            date: Utc.with_ymd_and_hms(2026, 1, 15, 10, 30, 0).unwrap(),
            resolved,
            views: 0,
        }
    }

    #[test]
    fn test_json_round_trip() {
        let issues = vec![issue("a", "b", &["bug"], false), issue("c", "d", &[], true)];

        let json = to_json(&issues).unwrap();
        let back: Vec<Issue> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, issues);
    }

    #[test]
    fn test_csv_header_and_row() {
        let csv = to_csv(&[issue("Broken", "It fails", &["bug", "ui"], false)]);
        let mut lines = csv.lines();

        assert_eq!(
            lines.next().unwrap(),
            "ID,Title,Description,Priority,Tags,Status,Date Created"
        );
        assert_eq!(
            lines.next().unwrap(),
            "issue-1,\"Broken\",\"It fails\",medium,bug;ui,Open,2026-01-15 10:30:00"
        );
        assert!(lines.next().is_none());
    }

    #[test]
    fn test_csv_doubles_internal_quotes() {
        let csv = to_csv(&[issue("Say \"Hi\"", "d", &[], false)]);
        assert!(csv.contains("\"Say \"\"Hi\"\"\""));
    }

    #[test]
    fn test_csv_resolved_status() {
        let csv = to_csv(&[issue("t", "d", &[], true)]);
        assert!(csv.contains(",Resolved,"));
    }

    #[test]
    fn test_csv_empty_collection_is_header_only() {
        let csv = to_csv(&[]);
        assert_eq!(csv, format!("{}\n", CSV_HEADER));
    }

    #[test]
    fn test_export_filename() {
        let date = NaiveDate::from_ymd_opt(2026, 8, 7).unwrap();
        assert_eq!(
            export_filename(ExportFormat::Json, date),
            "issues_export_2026-08-07.json"
        );
        assert_eq!(
            export_filename(ExportFormat::Csv, date),
            "issues_export_2026-08-07.csv"
        );
    }
}
