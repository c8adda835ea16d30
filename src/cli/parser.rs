use crate::export::ExportFormat;
use clap::{Parser, Subcommand};

/// Command-line interface definition for fieldledger
/// Operational CLI over the presence & task distribution engine
#[derive(Parser)]
#[command(
    name = "fieldledger",
    version = env!("CARGO_PKG_VERSION"),
    about = "Workforce presence & task distribution: geofenced clock events, attendance summaries and least-loaded assignment over SQLite",
    long_about = None
)]
pub struct Cli {
    /// Override ledger database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Site file with projects, geofences and managers (YAML)
    #[arg(global = true, long = "site")]
    pub site: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the ledger database and configuration
    Init,

    /// Print the active configuration
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,
    },

    /// Record a clock-in for a manager
    ClockIn {
        /// Manager identifier
        manager: String,

        /// Event timestamp (RFC 3339 or "YYYY-MM-DD HH:MM"); defaults to now
        #[arg(long = "at", help = "Event timestamp, defaults to now")]
        at: Option<String>,

        /// GPS fix as "lat,lon"
        #[arg(long = "coord", help = "GPS fix as lat,lon")]
        coord: Option<String>,
    },

    /// Record a clock-out for a manager
    ClockOut {
        /// Manager identifier
        manager: String,

        /// Event timestamp (RFC 3339 or "YYYY-MM-DD HH:MM"); defaults to now
        #[arg(long = "at", help = "Event timestamp, defaults to now")]
        at: Option<String>,

        /// GPS fix as "lat,lon"
        #[arg(long = "coord", help = "GPS fix as lat,lon")]
        coord: Option<String>,
    },

    /// Daily attendance status for a manager
    Status {
        /// Manager identifier
        manager: String,

        /// Date (YYYY-MM-DD); defaults to today
        date: Option<String>,
    },

    /// Monthly attendance summary
    Summary {
        /// Manager identifier (omit with --all)
        manager: Option<String>,

        /// Month (YYYY-MM); defaults to the current month
        #[arg(long = "month", help = "Month to summarize (YYYY-MM)")]
        month: Option<String>,

        /// Summarize every manager in the site file
        #[arg(long = "all", conflicts_with = "manager")]
        all: bool,
    },

    /// Create a task and assign it to the least-loaded eligible manager
    Assign {
        /// Task identifier
        id: String,

        /// Task title
        title: String,

        /// Project the task belongs to
        #[arg(long = "project")]
        project: String,

        /// Task priority (low, normal, high, urgent)
        #[arg(long = "priority", default_value = "normal")]
        priority: String,
    },

    /// Close a task as completed, releasing the assignee's load
    Complete {
        /// Task identifier
        id: String,
    },

    /// Close a task as rejected, releasing the assignee's load
    Reject {
        /// Task identifier
        id: String,
    },

    /// Decrement a manager's open-task counter directly
    Release {
        /// Manager identifier
        manager: String,
    },

    /// List tasks and current per-manager load
    Tasks {
        /// Filter by project
        #[arg(long = "project")]
        project: Option<String>,
    },

    /// Print the engine's audit log
    Log {
        #[arg(long = "print", help = "Print rows from the audit log table")]
        print: bool,
    },

    /// Export sessions or monthly summaries
    Export {
        /// Output format
        #[arg(long = "format", value_enum, default_value = "csv")]
        format: ExportFormat,

        /// Output file path
        #[arg(long = "out")]
        out: String,

        /// Manager to export (required for --sessions)
        #[arg(long = "manager")]
        manager: Option<String>,

        /// Month to export (YYYY-MM); defaults to the current month
        #[arg(long = "month")]
        month: Option<String>,

        /// Export SESSIONS for one manager
        #[arg(long, conflicts_with = "summaries")]
        sessions: bool,

        /// Export monthly SUMMARIES for all managers
        #[arg(long, conflicts_with = "sessions")]
        summaries: bool,
    },
}
