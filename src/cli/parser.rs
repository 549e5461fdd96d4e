use clap::{Parser, Subcommand};

/// Command-line interface definition for rTimestore
#[derive(Parser)]
#[command(
    name = "rtimestore",
    version = env!("CARGO_PKG_VERSION"),
    about = "Track daily clock-in/out intervals, lunch breaks and internal company time",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

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

    /// Print the configuration
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,
    },

    /// Print the internal audit log
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Show one day in detail
    Show {
        /// Date of the record (YYYY-MM-DD)
        date: String,
    },

    /// List stored days
    List {
        #[arg(
            long,
            short,
            help = "Filter by year/month/day or a custom range (e.g. 2025-09 or 2025-01:2025-03)"
        )]
        period: Option<String>,
    },

    /// Append a clock-in/out interval
    Add {
        /// Date of the record (YYYY-MM-DD)
        date: String,

        #[arg(long = "in", help = "Clock-in time (HH:MM)")]
        start: String,

        #[arg(long = "out", help = "Clock-out time (HH:MM); omit for an open interval")]
        end: Option<String>,
    },

    /// Edit an existing interval
    Edit {
        /// Date of the record (YYYY-MM-DD)
        date: String,

        #[arg(long = "index", help = "Interval number as shown by `show` (1-based)")]
        index: usize,

        #[arg(long = "in", help = "Clock-in time (HH:MM)")]
        start: String,

        #[arg(long = "out", help = "Clock-out time (HH:MM); omit for an open interval")]
        end: Option<String>,
    },

    /// Replace all intervals of a day
    Durations {
        /// Date of the record (YYYY-MM-DD)
        date: String,

        #[arg(
            long = "pair",
            value_name = "IN-OUT",
            help = "Interval as HH:MM-HH:MM (repeatable); an unparsable end keeps the previous one"
        )]
        pairs: Vec<String>,
    },

    /// Set the lunch break
    Lunch {
        /// Date of the record (YYYY-MM-DD)
        date: String,

        #[arg(long = "start", help = "Lunch start (HH:MM); omit to keep the current one")]
        start: Option<String>,

        #[arg(long = "end", help = "Lunch end (HH:MM)")]
        end: Option<String>,
    },

    /// Set internal company time in decimal hours (e.g. 1,5)
    Internal {
        /// Date of the record (YYYY-MM-DD)
        date: String,

        /// Hours, comma or dot as decimal separator
        #[arg(allow_hyphen_values = true)]
        hours: Option<String>,
    },

    /// Delete a day
    Del {
        /// Date of the record (YYYY-MM-DD)
        date: String,
    },
}
