//! Reconcile command implementation
//!
//! Normalizes the string-typed CLI surface into the core's native types,
//! runs the engine, and renders the result record.

use colored::Colorize;

use kh_core::{DesiredState, ReconcileEngine, ReconcileOptions, ScanSettings};

use crate::cli::Cli;
use crate::error::{CliError, Result};

/// Run the reconcile command
pub fn run_reconcile(cli: &Cli) -> Result<()> {
    let desired = DesiredState {
        user: cli.user.clone(),
        host: cli.host.clone(),
        presence: cli.state.parse().map_err(CliError::Core)?,
        path: cli.path.clone(),
        mode: parse_mode(&cli.mode)?,
        manage_dir: parse_bool(&cli.manage_dir)?,
    };

    let settings = match &cli.settings {
        Some(path) => ScanSettings::load(path)?,
        None => ScanSettings::default(),
    };

    let engine = ReconcileEngine::with_system_defaults(settings);
    let options = ReconcileOptions { check: cli.check };
    let report = engine.reconcile(&desired, options)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let prefix = if cli.check { "[check] " } else { "" };
    if report.changed {
        println!(
            "{} {}{} {} in {}",
            "changed".yellow().bold(),
            prefix,
            report.host.cyan(),
            report.state,
            report.path
        );
    } else {
        println!(
            "{} {}{} already {} in {}",
            "ok".green().bold(),
            prefix,
            report.host.cyan(),
            report.state,
            report.path
        );
    }

    Ok(())
}

/// Parse the mode parameter as octal permission bits.
fn parse_mode(raw: &str) -> Result<u32> {
    let digits = raw.strip_prefix("0o").unwrap_or(raw);
    u32::from_str_radix(digits, 8)
        .map_err(|_| CliError::user(format!("Invalid mode {raw:?}: expected octal bits like 0600")))
}

/// Normalize a yes/no flag into a native bool at the boundary.
fn parse_bool(raw: &str) -> Result<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "true" | "yes" => Ok(true),
        "false" | "no" => Ok(false),
        _ => Err(CliError::user(format!(
            "Invalid boolean {raw:?}: expected true/false/yes/no"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn mode_parses_common_octal_forms() {
        assert_eq!(parse_mode("0600").unwrap(), 0o600);
        assert_eq!(parse_mode("600").unwrap(), 0o600);
        assert_eq!(parse_mode("0o644").unwrap(), 0o644);
        assert_eq!(parse_mode("0700").unwrap(), 0o700);
    }

    #[test]
    fn mode_rejects_non_octal() {
        assert!(parse_mode("0698").is_err());
        assert!(parse_mode("rw-------").is_err());
        assert!(parse_mode("").is_err());
    }

    #[test]
    fn manage_dir_accepts_yes_no_forms() {
        assert!(parse_bool("true").unwrap());
        assert!(parse_bool("YES").unwrap());
        assert!(!parse_bool("false").unwrap());
        assert!(!parse_bool("no").unwrap());
        assert!(parse_bool("maybe").is_err());
    }
}
