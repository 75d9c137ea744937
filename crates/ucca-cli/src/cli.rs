use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "ucca",
    about = "UCCA: enumerate unsafe combinations of control actions for a controller team",
    version
)]
pub struct Cli {
    /// Path to a ucca.toml config file (default: ./ucca.toml if present)
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Enable debug logging (otherwise RUST_LOG, default warn)
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check an authority document and report every violation
    Validate {
        /// Path to the authority document (JSON)
        #[arg(long)]
        authority: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Stream the UCCAs of an authority document
    Enumerate {
        /// Path to the authority document (JSON)
        #[arg(long)]
        authority: Option<String>,

        /// Restrict to a row (1-4 or a tag such as 2a.3-4); repeatable
        #[arg(long = "row")]
        rows: Vec<String>,

        /// Stop after emitting this many UCCAs
        #[arg(long)]
        limit: Option<usize>,

        /// Output as JSON lines
        #[arg(long)]
        json: bool,
    },

    /// Row counts, stream digest, and interchangeable classes
    Summary {
        /// Path to the authority document (JSON)
        #[arg(long)]
        authority: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}
