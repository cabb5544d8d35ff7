//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::Parser;

/// Known-Hosts Manager - Reconcile a host's entry in a user's SSH
/// known-hosts file to a declared target state
///
/// Examples:
///   kh charlie github.com                      # ensure an entry exists
///   kh charlie github.com --state absent       # ensure it does not
///   kh charlie github.com --check --json       # predict changes for CI
#[derive(Parser, Debug)]
#[command(name = "kh")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Owner whose known-hosts file is targeted
    pub user: String,

    /// Hostname (or [host]:port) whose entry is added or removed
    pub host: String,

    /// Desired membership: present or absent
    #[arg(long, default_value = "present")]
    pub state: String,

    /// Override the file location (default: <home>/.ssh/known_hosts)
    #[arg(long)]
    pub path: Option<String>,

    /// Desired file mode as octal permission bits
    #[arg(long, default_value = "0600")]
    pub mode: String,

    /// Whether to create/own/mode the parent directory (true/false/yes/no)
    #[arg(long, default_value = "true")]
    pub manage_dir: String,

    /// Predict changes without mutating anything
    #[arg(long)]
    pub check: bool,

    /// Output the result record as JSON for scripting
    #[arg(long)]
    pub json: bool,

    /// Scan tool settings file (TOML)
    #[arg(long, env = "KH_SETTINGS")]
    pub settings: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}
