//! Example: basic issue workflow
//!
//! Demonstrates creating issues, toggling resolution, computing statistics,
//! and exporting the collection.
//!
//! Run with: cargo run --example basic_workflow

use eyre::Result;
use issuestore::{FileStorage, IssueStore, NewIssue, Priority};

fn main() -> Result<()> {
    // Create a temporary directory for this example
    let temp_dir = tempfile::tempdir()?;

    println!("IssueStore Basic Workflow Example");
    println!("=================================\n");
    println!("Store path: {}\n", temp_dir.path().display());

    let storage = FileStorage::open(temp_dir.path())?;
    let mut store = IssueStore::new(storage);

    // CREATE: file a couple of issues
    println!("1. CREATE - Filing issues...");
    let login = store.create(NewIssue {
        title: "Login button unresponsive".to_string(),
        description: "Clicking submit does nothing on mobile".to_string(),
        priority: Priority::High,
        tags: vec!["bug".to_string(), "ui".to_string()],
    })?;
    let docs = store.create(NewIssue {
        title: "Document export formats".to_string(),
        description: "JSON and CSV need a reference page".to_string(),
        priority: Priority::Low,
        tags: vec!["docs".to_string()],
    })?;
    println!("   Created {} and {}\n", login.id, docs.id);

    // LIST: newest first
    println!("2. LIST - Current issues...");
    for issue in store.list()? {
        println!("   - [{}] {}", issue.priority, issue.title);
    }
    println!();

    // RESOLVE: toggle the login bug
    println!("3. RESOLVE - Marking the login bug resolved...");
    store.toggle_resolve(&login.id)?;
    let resolved = store.get(&login.id)?.expect("issue exists");
    println!("   Resolved = {}\n", resolved.resolved);

    // STATS: aggregate snapshot
    println!("4. STATS - Aggregates...");
    let stats = store.stats()?;
    println!("   Total: {}", stats.total);
    println!("   Open: {}, Resolved: {}", stats.open, stats.resolved);
    println!("   Resolution rate: {}%", stats.resolution_rate);
    for (tag, count) in &stats.by_tag {
        println!("   #{}: {}", tag, count);
    }
    println!();

    // EXPORT: CSV text
    println!("5. EXPORT - CSV output...");
    let csv = store.export_csv()?;
    for line in csv.lines() {
        println!("   {}", line);
    }

    println!("\nExample complete!");
    Ok(())
}
