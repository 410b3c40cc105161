use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "tally")]
#[command(about = "Track item counts in a remote document store", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List tracked items
    #[command(alias = "ls")]
    List {
        /// Only show items whose name contains this text
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Add one unit of an item (creates it at quantity 1 if new)
    #[command(alias = "a")]
    Add {
        /// Item name, used verbatim as the record key
        name: String,
    },

    /// Remove one unit of an item (the last unit removes the record)
    #[command(alias = "rm")]
    Remove {
        /// Item name
        name: String,
    },

    /// Remove an item entirely, whatever its quantity
    Purge {
        /// Item name
        name: String,
    },

    /// Search items by name (dedicated command)
    Search { term: String },

    /// Get or set store configuration
    Config {
        /// Configuration key (base-url, collection, api-key, timeout,
        /// checked-writes)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}
