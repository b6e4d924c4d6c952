//! Command-line surface

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "wadash", version)]
#[command(about = "Operator console for the WhatsApp scraper admin API")]
pub struct Cli {
    /// Config file (TOML or JSON). Without it the working directory and its
    /// parent are probed.
    #[arg(long, global = true, env = "WADASH_CONFIG")]
    pub config: Option<PathBuf>,

    /// Print the raw response as JSON instead of a table
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show session and connection status once
    Status,
    /// Follow status changes until interrupted
    Watch {
        /// Wait for the pending QR code to be scanned instead
        #[arg(long)]
        qr: bool,
    },
    /// Manage the WhatsApp session
    #[command(subcommand)]
    Session(SessionCommand),
    /// List scraped messages
    Messages(ListArgs),
    /// List contacts seen in scraped messages
    Contacts(ListArgs),
    /// List members of synced groups
    Members(ListArgs),
    /// Show scrape statistics
    Stats,
    /// Probe backend liveness (no API key needed)
    Health,
    /// Manage the group allowlist
    #[command(subcommand)]
    Groups(GroupsCommand),
    /// Export group members
    #[command(subcommand)]
    Export(ExportCommand),
    /// Spreadsheet access
    #[command(subcommand)]
    Access(AccessCommand),
}

#[derive(Subcommand, Debug)]
pub enum SessionCommand {
    /// Start a session and fetch the pairing QR code
    Start {
        /// Write the QR image here when one is available
        #[arg(long)]
        qr_out: Option<PathBuf>,
    },
    Stop,
    /// Restart the session and fetch the pairing QR code
    Restart {
        #[arg(long)]
        qr_out: Option<PathBuf>,
    },
    /// Delete the session; the account must be paired again
    Delete,
    /// Save the current QR code image
    Qr {
        #[arg(long, short)]
        out: PathBuf,
    },
}

#[derive(Args, Debug, Clone)]
pub struct ListArgs {
    #[arg(long, default_value_t = 1)]
    pub page: u32,

    /// Rows per page (defaults depend on the list)
    #[arg(long)]
    pub limit: Option<u32>,

    #[arg(long)]
    pub search: Option<String>,

    /// Restrict to one group id (ignored for contacts)
    #[arg(long)]
    pub group: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum GroupsCommand {
    /// Show the allowlist and the scraping mode
    List,
    /// Add a group to the allowlist
    Add {
        group_id: String,
        #[arg(long, default_value = "")]
        name: String,
        #[arg(long, default_value = "")]
        notes: String,
    },
    /// Remove a group from the allowlist permanently
    Remove { group_id: String },
    /// List groups the connected account belongs to
    Discover {
        /// Case-insensitive filter on name or id
        #[arg(long)]
        filter: Option<String>,
        /// Add a discovered group to the allowlist (repeatable)
        #[arg(long = "add", value_name = "GROUP_ID")]
        add: Vec<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum ExportCommand {
    /// Download members as CSV
    Csv {
        #[arg(long)]
        group: Option<String>,
        /// Directory the file is written to
        #[arg(long, default_value = ".")]
        dir: PathBuf,
    },
    /// Copy members into the shared spreadsheet
    Sheet {
        #[arg(long)]
        group: Option<String>,
        #[arg(long)]
        tab: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum AccessCommand {
    Status,
    /// Share the data spreadsheet with an email address
    Request { email: String },
}
