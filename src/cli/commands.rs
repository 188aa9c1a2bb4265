//! CLI command definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "moodlog")]
#[command(about = "Personal mood journal", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a new journal
    Init {
        /// Directory to initialize (default: current directory)
        #[arg(default_value = ".")]
        path: PathBuf,

        /// First day of the week (sunday, monday)
        #[arg(short, long, default_value = "sunday")]
        week_start: String,
    },

    /// Record the mood for a day (1 = very sad ... 5 = very happy)
    Log {
        #[arg(allow_hyphen_values = true)]
        mood: String,

        /// Day to record (e.g., today, yesterday, last monday, 2025-01-17)
        #[arg(short, long, default_value = "today")]
        date: String,

        /// Optional note
        #[arg(short, long)]
        note: Option<String>,
    },

    /// Show the entry for a day
    Show {
        #[arg(default_value = "today")]
        date: String,
    },

    /// Delete the entry for a day
    Delete { date: String },

    /// List entries, oldest first
    List {
        #[arg(long)]
        from: Option<String>,

        #[arg(long)]
        to: Option<String>,
    },

    /// Print a month grid
    Calendar {
        #[arg(long)]
        year: Option<i32>,

        #[arg(long)]
        month: Option<u32>,

        /// Step back this many months
        #[arg(long, default_value_t = 0)]
        prev: u32,

        /// Step forward this many months
        #[arg(long, default_value_t = 0)]
        next: u32,

        /// Day of the displayed month to select
        #[arg(long)]
        select: Option<u32>,
    },

    /// Summary and trend for a day, week or month
    Stats {
        /// day, week or month
        period: String,

        #[arg(short, long, default_value = "today")]
        date: String,

        /// Number of trend buckets (default: one per day)
        #[arg(short, long)]
        buckets: Option<usize>,
    },

    /// Show or switch the active theme
    Theme { id: Option<String> },

    /// View or modify configuration
    Config {
        /// Config key to get or set
        key: Option<String>,

        /// Value to set (if provided, sets the key)
        value: Option<String>,

        /// List all configuration
        #[arg(short, long)]
        list: bool,
    },
}
