use chrono::Utc;
use clap::{Parser, Subcommand};
use colored::Colorize;
use eyre::Result;
use issuestore::{
    Config, ExportFormat, FileStorage, Issue, IssueFilter, IssueStore, LogNotifier, NewIssue,
    Priority, export,
};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "issuestore")]
#[command(about = "IssueStore CLI - track issues in a single-blob local store")]
#[command(version)]
struct Cli {
    /// Path to the store directory (default: config value, then current directory)
    #[arg(short, long)]
    store_path: Option<PathBuf>,

    /// Path to a YAML config file (default: per-user config location)
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new issue
    Add {
        /// Issue title
        title: String,

        /// Longer description
        #[arg(short, long, default_value = "")]
        description: String,

        /// Priority: low, medium or high
        #[arg(short, long)]
        priority: Option<Priority>,

        /// Tag to attach (repeatable)
        #[arg(short, long = "tag")]
        tags: Vec<String>,
    },

    /// List issues, optionally filtered
    List {
        /// Only unresolved issues
        #[arg(long, conflicts_with = "resolved")]
        open: bool,

        /// Only resolved issues
        #[arg(long)]
        resolved: bool,

        /// Only issues with this priority
        #[arg(short, long)]
        priority: Option<Priority>,

        /// Only issues carrying this tag
        #[arg(short, long)]
        tag: Option<String>,

        /// Substring search over title and description
        #[arg(long)]
        search: Option<String>,
    },

    /// Toggle an issue between open and resolved
    Resolve {
        /// Issue id
        id: String,
    },

    /// Delete an issue
    Delete {
        /// Issue id
        id: String,
    },

    /// Show an issue in full and record a view
    View {
        /// Issue id
        id: String,
    },

    /// Show aggregate statistics
    Stats,

    /// Export issues to a file
    Export {
        /// Output format: json or csv
        format: ExportFormat,

        /// Output file (default: issues_export_<date>.<ext> in the current directory)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    // Setup tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => match Config::default_path() {
            Some(path) => Config::load(path)?,
            None => Config::default(),
        },
    };

    let store_path = cli
        .store_path
        .clone()
        .or_else(|| config.store_path.clone())
        .unwrap_or_else(|| PathBuf::from("."));

    let storage = FileStorage::open(&store_path)?;
    let mut store = IssueStore::new(storage).with_notifier(Box::new(LogNotifier));
    if let Some(ms) = config.notify_duration_ms {
        store = store.with_notify_duration(Duration::from_millis(ms));
    }

    match cli.command {
        Commands::Add {
            title,
            description,
            priority,
            tags,
        } => {
            let issue = store.create(NewIssue {
                title,
                description,
                priority: priority.or(config.default_priority).unwrap_or_default(),
                tags,
            })?;
            println!("Created issue {}", issue.id.bold());
        }

        Commands::List {
            open,
            resolved,
            priority,
            tag,
            search,
        } => {
            let filter = IssueFilter {
                resolved: if open {
                    Some(false)
                } else if resolved {
                    Some(true)
                } else {
                    None
                },
                priority,
                tag,
                text: search,
            };

            let issues = store.find(&filter)?;
            if issues.is_empty() {
                println!("No issues found");
            }
            for issue in &issues {
                print_issue_line(issue);
            }
        }

        Commands::Resolve { id } => {
            if store.toggle_resolve(&id)? {
                match store.get(&id)? {
                    Some(issue) if issue.resolved => {
                        println!("Issue {} marked {}", id.bold(), "resolved".green())
                    }
                    _ => println!("Issue {} reopened", id.bold()),
                }
            } else {
                println!("No issue with id {}", id.bold());
            }
        }

        Commands::Delete { id } => {
            if store.delete(&id)? {
                println!("Deleted issue {}", id.bold());
            } else {
                println!("No issue with id {}", id.bold());
            }
        }

        Commands::View { id } => {
            store.record_view(&id)?;
            match store.get(&id)? {
                Some(issue) => print_issue_full(&issue),
                None => println!("No issue with id {}", id.bold()),
            }
        }

        Commands::Stats => {
            let stats = store.stats()?;
            println!("Total:       {}", stats.total);
            println!("Open:        {}", stats.open.to_string().yellow());
            println!("Resolved:    {}", stats.resolved.to_string().green());
            println!(
                "By priority: {} high / {} medium / {} low",
                stats.by_priority.high.to_string().red(),
                stats.by_priority.medium.to_string().yellow(),
                stats.by_priority.low.to_string().green(),
            );
            println!("Last 7 days: {}", stats.recent);
            println!("Resolution:  {}%", stats.resolution_rate);
            if !stats.by_tag.is_empty() {
                println!("Tags:");
                for (tag, count) in &stats.by_tag {
                    println!("  {} {}", format!("#{}", tag).cyan(), count);
                }
            }
        }

        Commands::Export { format, output } => {
            let text = match format {
                ExportFormat::Json => store.export_json()?,
                ExportFormat::Csv => store.export_csv()?,
            };
            let path = output
                .unwrap_or_else(|| export::export_filename(format, Utc::now().date_naive()).into());
            fs::write(&path, &text)?;
            println!("Exported {} issues to {}", store.list()?.len(), path.display());
        }
    }

    Ok(())
}

fn print_issue_line(issue: &Issue) {
    let status = if issue.resolved {
        "done".green()
    } else {
        "open".yellow()
    };
    let tags = if issue.tags.is_empty() {
        String::new()
    } else {
        format!(
            " [{}]",
            issue
                .tags
                .iter()
                .map(|t| format!("#{}", t))
                .collect::<Vec<_>>()
                .join(" ")
        )
    };
    println!(
        "{} {} {} {}{}",
        issue.id.dimmed(),
        status,
        priority_colored(issue.priority),
        issue.title,
        tags.cyan(),
    );
}

fn print_issue_full(issue: &Issue) {
    println!("{}", issue.title.bold());
    println!("  id:       {}", issue.id);
    println!(
        "  status:   {}",
        if issue.resolved {
            "resolved".green()
        } else {
            "open".yellow()
        }
    );
    println!("  priority: {}", priority_colored(issue.priority));
    if !issue.tags.is_empty() {
        println!("  tags:     {}", issue.tags.join(", ").cyan());
    }
    println!("  created:  {}", issue.date.format("%Y-%m-%d %H:%M:%S"));
    println!("  views:    {}", issue.views);
    if !issue.description.is_empty() {
        println!("\n{}", issue.description);
    }
}

fn priority_colored(priority: Priority) -> colored::ColoredString {
    match priority {
        Priority::High => "high".red(),
        Priority::Medium => "medium".yellow(),
        Priority::Low => "low".green(),
    }
}
