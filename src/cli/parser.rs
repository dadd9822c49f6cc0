use crate::models::access_result::AccessResult;
use clap::{Parser, Subcommand};

/// Command-line interface definition for rAccessLog
/// CLI ledger of entries and exits, backed by SQLite
#[derive(Parser)]
#[command(
    name = "raccesslog",
    version = env!("CARGO_PKG_VERSION"),
    about = "A small access-control ledger: record entries and exits, list them, archive aged records to a server",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Override configuration file path
    #[arg(global = true, long = "config")]
    pub config: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Record that someone is entering (allowed or denied)
    Entry {
        /// Person name
        name: String,

        #[arg(long, value_enum, default_value = "allowed", help = "Entry decision")]
        result: AccessResult,

        #[arg(long, help = "Reason for a denied entry (prompted if missing)")]
        reason: Option<String>,
    },

    /// Record that someone is leaving
    Exit {
        /// Person name
        name: String,
    },

    /// List recorded entries
    List {
        #[arg(long, group = "period", help = "Show today's log (default)")]
        today: bool,

        #[arg(long, group = "period", help = "Show this week's log (from Monday)")]
        week: bool,

        #[arg(long, group = "period", help = "Show this month's log")]
        month: bool,

        #[arg(long, group = "period", value_name = "YYYY-MM-DD", help = "Show a specific date")]
        date: Option<String>,
    },

    /// Send records older than the retention window to the server, then delete them locally
    Archive {
        #[arg(long, short = 'y', help = "Do not ask for confirmation")]
        yes: bool,

        #[arg(long, value_name = "DAYS", help = "Override the retention window")]
        days: Option<i64>,
    },

    /// Show sync status and the number of records waiting for archival
    Status,

    /// Manage the configuration file (view, edit, server settings)
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(long = "editor", help = "Specify the editor to use (vim, nano, or custom path)")]
        editor: Option<String>,

        #[arg(long = "set-url", value_name = "URL", help = "Set the archive server URL")]
        set_url: Option<String>,

        #[arg(long = "set-key", value_name = "KEY", help = "Set the archive API key")]
        set_key: Option<String>,

        #[arg(long = "enable-sync", conflicts_with = "disable_sync", help = "Enable server sync")]
        enable_sync: bool,

        #[arg(long = "disable-sync", help = "Disable server sync")]
        disable_sync: bool,
    },

    /// Manage the database (migrations, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Print or manage the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Create a backup copy of the database
    Backup {
        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long)]
        compress: bool,

        #[arg(long, short = 'f', help = "Overwrite an existing backup without asking")]
        force: bool,
    },
}
