use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// `itinera` - plan, execute and book a trip from one sentence.
#[derive(Parser, Debug)]
#[command(name = "itinera")]
#[command(version)]
#[command(about = "Travel task planner and booking orchestrator.", long_about = None)]
pub struct Cli {
    /// Config file (default: ~/.itinera/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log at debug level regardless of config
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Plan, execute and confirm a booking for a request
    Book {
        /// The travel request, e.g. "Beijing to Wuhan on Oct 20, two nights"
        #[arg(short, long)]
        message: String,

        /// Passenger name on the confirmation
        #[arg(long)]
        passenger: Option<String>,

        /// Hotel nights to book
        #[arg(long)]
        nights: Option<u32>,

        /// Model to use
        #[arg(long)]
        model: Option<String>,
    },

    /// Print the plan for a request without executing it
    Plan {
        #[arg(short, long)]
        message: String,

        /// Model to use
        #[arg(long)]
        model: Option<String>,
    },

    /// Execute a saved plan, optionally resuming from a saved state
    Execute {
        /// Plan JSON file ({"tasks": [...]})
        #[arg(long)]
        plan: PathBuf,

        /// Execution state to resume from
        #[arg(long)]
        state: Option<PathBuf>,

        /// Where to write the final execution state
        #[arg(long)]
        save_state: Option<PathBuf>,

        /// Use a single forward pass instead of the worklist scheduler
        #[arg(long)]
        single_pass: bool,
    },

    /// List registered tools and their parameter schemas
    Tools,
}
