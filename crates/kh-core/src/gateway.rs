//! External host-key tool gateway
//!
//! Key scanning, lookup, and removal are delegated to the OpenSSH tools.
//! The gateway boundary keeps their invocation details out of the engine
//! and lets tests substitute a scripted fake.

use std::path::Path;
use std::process::{Command, Output};

use tracing::debug;

use crate::{Error, Result, ScanSettings};

/// External tools that scan, look up, and remove host keys.
///
/// Invocation failure and unexpected non-zero exits are fatal; "host not
/// found" is expressed only as empty lookup output, never as an error.
pub trait HostKeyGateway {
    /// Scan a host's public keys, returning the raw entry line(s).
    fn scan(&self, host: &str) -> Result<String>;

    /// Look up a host's entry in a known-hosts file. Empty output (after
    /// trimming) means the host has no entry.
    fn lookup(&self, host: &str, path: &Path) -> Result<String>;

    /// Rewrite the file in place, removing the host's entry and
    /// preserving all others.
    fn remove(&self, host: &str, path: &Path) -> Result<()>;
}

/// Gateway backed by `ssh-keyscan` and `ssh-keygen`.
#[derive(Debug, Clone, Default)]
pub struct OpenSshGateway {
    settings: ScanSettings,
}

impl OpenSshGateway {
    pub fn new(settings: ScanSettings) -> Self {
        Self { settings }
    }

    fn scan_command(&self, host: &str) -> Command {
        let mut command = Command::new(&self.settings.keyscan_bin);
        command.arg("-T").arg(self.settings.timeout_secs.to_string());
        if let Some(types) = &self.settings.key_types {
            command.arg("-t").arg(types);
        }
        if self.settings.hash_hosts {
            command.arg("-H");
        }
        command.arg(host);
        command
    }

    fn lookup_command(&self, host: &str, path: &Path) -> Command {
        let mut command = Command::new(&self.settings.keygen_bin);
        command.arg("-F").arg(host).arg("-f").arg(path);
        command
    }

    fn remove_command(&self, host: &str, path: &Path) -> Command {
        let mut command = Command::new(&self.settings.keygen_bin);
        command.arg("-R").arg(host).arg("-f").arg(path);
        command
    }

    /// Invoke a key tool, returning its rendered command line for error
    /// reporting alongside the captured output.
    fn run(&self, mut command: Command) -> Result<(String, Output)> {
        let rendered = render_command(&command);
        debug!(command = %rendered, "invoking key tool");
        let output = command.output().map_err(|e| Error::Collaborator {
            command: rendered.clone(),
            detail: e.to_string(),
        })?;
        Ok((rendered, output))
    }
}

impl HostKeyGateway for OpenSshGateway {
    fn scan(&self, host: &str) -> Result<String> {
        let (rendered, output) = self.run(self.scan_command(host))?;
        if !output.status.success() {
            return Err(collaborator_error(rendered, &output));
        }

        let keys = String::from_utf8_lossy(&output.stdout).into_owned();
        if keys.trim().is_empty() {
            // A scan that returns nothing would make the add a silent
            // no-op while still reporting convergence.
            return Err(Error::Collaborator {
                command: rendered,
                detail: "scan returned no keys".to_string(),
            });
        }
        Ok(keys)
    }

    fn lookup(&self, host: &str, path: &Path) -> Result<String> {
        let (rendered, output) = self.run(self.lookup_command(host, path))?;
        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();

        // ssh-keygen -F exits 1 with empty output when the host has no
        // entry; normalize that to "not found" here so the engine never
        // sees it as a failure.
        if !output.status.success() {
            if output.status.code() == Some(1) && stdout.trim().is_empty() {
                return Ok(String::new());
            }
            return Err(collaborator_error(rendered, &output));
        }
        Ok(stdout)
    }

    fn remove(&self, host: &str, path: &Path) -> Result<()> {
        let (rendered, output) = self.run(self.remove_command(host, path))?;
        if !output.status.success() {
            return Err(collaborator_error(rendered, &output));
        }
        Ok(())
    }
}

fn collaborator_error(command: String, output: &Output) -> Error {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let stderr = stderr.trim();
    let detail = if stderr.is_empty() {
        format!("exited with {}", output.status)
    } else {
        format!("exited with {}: {}", output.status, stderr)
    };
    Error::Collaborator { command, detail }
}

fn render_command(command: &Command) -> String {
    let mut rendered = command.get_program().to_string_lossy().into_owned();
    for arg in command.get_args() {
        rendered.push(' ');
        rendered.push_str(&arg.to_string_lossy());
    }
    rendered
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn settings_with(keyscan: &str, keygen: &str) -> ScanSettings {
        ScanSettings {
            keyscan_bin: keyscan.to_string(),
            keygen_bin: keygen.to_string(),
            ..ScanSettings::default()
        }
    }

    #[test]
    fn scan_failure_is_a_collaborator_error() {
        // `false` exits non-zero without output.
        let gateway = OpenSshGateway::new(settings_with("false", "false"));
        let err = gateway.scan("github.com").unwrap_err();
        assert!(matches!(err, Error::Collaborator { .. }));
    }

    #[test]
    fn scan_with_empty_output_is_a_collaborator_error() {
        let gateway = OpenSshGateway::new(settings_with("true", "true"));
        let err = gateway.scan("github.com").unwrap_err();
        let message = err.to_string();
        assert!(message.contains("no keys"), "got: {message}");
    }

    #[test]
    fn missing_binary_is_a_collaborator_error() {
        let gateway = OpenSshGateway::new(settings_with("kh-no-such-binary", "kh-no-such-binary"));
        let err = gateway.scan("github.com").unwrap_err();
        assert!(matches!(err, Error::Collaborator { .. }));
    }

    #[test]
    fn render_command_includes_arguments() {
        let mut command = Command::new("ssh-keygen");
        command.arg("-F").arg("github.com");
        assert_eq!(render_command(&command), "ssh-keygen -F github.com");
    }

    #[rstest]
    #[case::defaults(ScanSettings::default(), "ssh-keyscan -T 5 github.com")]
    #[case::custom_timeout(
        ScanSettings { timeout_secs: 10, ..ScanSettings::default() },
        "ssh-keyscan -T 10 github.com"
    )]
    #[case::key_types(
        ScanSettings { key_types: Some("rsa,ed25519".to_string()), ..ScanSettings::default() },
        "ssh-keyscan -T 5 -t rsa,ed25519 github.com"
    )]
    #[case::hashed_hosts(
        ScanSettings { hash_hosts: true, ..ScanSettings::default() },
        "ssh-keyscan -T 5 -H github.com"
    )]
    #[case::everything(
        ScanSettings {
            keyscan_bin: "/opt/ssh/bin/ssh-keyscan".to_string(),
            timeout_secs: 30,
            key_types: Some("ed25519".to_string()),
            hash_hosts: true,
            ..ScanSettings::default()
        },
        "/opt/ssh/bin/ssh-keyscan -T 30 -t ed25519 -H github.com"
    )]
    fn scan_command_reflects_settings(#[case] settings: ScanSettings, #[case] expected: &str) {
        let gateway = OpenSshGateway::new(settings);
        let command = gateway.scan_command("github.com");
        assert_eq!(render_command(&command), expected);
    }

    #[test]
    fn lookup_and_remove_commands_target_the_file() {
        let gateway = OpenSshGateway::new(ScanSettings::default());
        let path = Path::new("/home/charlie/.ssh/known_hosts");

        assert_eq!(
            render_command(&gateway.lookup_command("github.com", path)),
            "ssh-keygen -F github.com -f /home/charlie/.ssh/known_hosts"
        );
        assert_eq!(
            render_command(&gateway.remove_command("github.com", path)),
            "ssh-keygen -R github.com -f /home/charlie/.ssh/known_hosts"
        );
    }
}
