use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Probe the platform catalog for a username.
    Search {
        /// The username to look for (prompted for when omitted).
        username: Option<String>,

        /// Maximum simultaneous requests.
        #[clap(short, long)]
        concurrency: Option<usize>,

        /// Per-request timeout in seconds.
        #[clap(short, long)]
        timeout: Option<u64>,

        /// Print the report as pretty JSON instead of cards.
        #[clap(long, default_value = "false")]
        json: bool,

        /// Write the report to a CSV file.
        #[clap(long)]
        csv: Option<String>,

        /// Only display platforms where the profile was found.
        #[clap(short, long, default_value = "false")]
        found_only: bool,
    },

    /// List the assembled platform catalog.
    Platforms {},

    /// Query profile page metadata for a single url
    Meta {
        /// A url
        #[clap(allow_hyphen_values = true)]
        url: String,

        /// Per-request timeout in seconds.
        #[clap(short, long)]
        timeout: Option<u64>,
    },
}
