use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use thiserror::Error;
use tokio::process::Command;
use tokio::time;

use crate::config::PanelConfig;
use crate::schemas::ActionResult;

/// Power-state commands executed on the target. The command line for
/// each action is fixed at compile time; no request data is ever
/// interpolated into it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerAction {
    Sleep,
    Hibernate,
    Shutdown,
    Restart,
}

impl PowerAction {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "sleep" => Some(Self::Sleep),
            "hibernate" => Some(Self::Hibernate),
            "shutdown" => Some(Self::Shutdown),
            "restart" => Some(Self::Restart),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Sleep => "sleep",
            Self::Hibernate => "hibernate",
            Self::Shutdown => "shutdown",
            Self::Restart => "restart",
        }
    }

    fn command(&self) -> &'static str {
        match self {
            Self::Sleep => {
                r#"powershell.exe -Command "rundll32.exe powrprof.dll,SetSuspendState 0,1,0""#
            }
            Self::Hibernate => r#"powershell.exe -Command "shutdown /h""#,
            Self::Shutdown => r#"powershell.exe -Command "shutdown /s /t 0""#,
            Self::Restart => r#"powershell.exe -Command "shutdown /r /t 0""#,
        }
    }

    fn success_message(&self) -> &'static str {
        match self {
            Self::Sleep => "Sleep command successful! PC is now sleeping.",
            Self::Hibernate => "Hibernate command successful! PC is now hibernating.",
            Self::Shutdown => "Shutdown command successful! PC is shutting down.",
            Self::Restart => "Restart command successful! PC is restarting.",
        }
    }

    fn failure_message(&self) -> &'static str {
        match self {
            Self::Sleep => "Error: Failed to put PC to sleep. Please check connection.",
            Self::Hibernate => "Error: Failed to hibernate PC. Please check connection.",
            Self::Shutdown => "Error: Failed to shutdown PC. Please check connection.",
            Self::Restart => "Error: Failed to restart PC. Please check connection.",
        }
    }
}

#[derive(Debug, Error)]
enum RemoteError {
    #[error("failed to spawn ssh: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("remote command exited with status {code:?}: {stderr}")]
    NonZeroExit { code: Option<i32>, stderr: String },

    #[error("remote command timed out after {0:?}")]
    Timeout(Duration),
}

/// Runs one fixed command on the target per invocation over SSH and
/// maps the exit status to an [`ActionResult`].
pub struct RemoteExecutor {
    ssh_program: PathBuf,
    ssh_host: String,
    ssh_user: String,
    ssh_key_path: PathBuf,
    timeout: Duration,
}

impl RemoteExecutor {
    pub fn new(
        ssh_host: impl Into<String>,
        ssh_user: impl Into<String>,
        ssh_key_path: impl Into<PathBuf>,
        timeout: Duration,
    ) -> Self {
        Self {
            ssh_program: PathBuf::from("ssh"),
            ssh_host: ssh_host.into(),
            ssh_user: ssh_user.into(),
            ssh_key_path: ssh_key_path.into(),
            timeout,
        }
    }

    pub fn from_config(config: &PanelConfig) -> Self {
        Self::new(
            config.ssh_host.clone(),
            config.ssh_user.clone(),
            config.ssh_key_path.clone(),
            Duration::from_secs(config.remote_timeout_secs),
        )
    }

    #[cfg(test)]
    pub(crate) fn with_ssh_program(mut self, program: impl Into<PathBuf>) -> Self {
        self.ssh_program = program.into();
        self
    }

    pub async fn execute(&self, action: PowerAction) -> ActionResult {
        match self.run(action.command()).await {
            Ok(()) => {
                tracing::info!("Remote {} command succeeded", action.name());
                ActionResult::success(action.success_message())
            }
            Err(err) => {
                // Channel failure and remote failure surface the same
                // message; the distinction only reaches the log.
                tracing::warn!("Remote {} command failed: {}", action.name(), err);
                ActionResult::failure(action.failure_message())
            }
        }
    }

    /// Runs the keystroke script with a payload taken from the
    /// configured shortcut map. Callers must only pass payloads from
    /// that closed set, never request data.
    pub async fn execute_shortcut(&self, name: &str, script: &str, payload: &str) -> ActionResult {
        let command = format!("{script} {payload}");

        match self.run(&command).await {
            Ok(()) => {
                tracing::info!("Shortcut '{}' succeeded", name);
                ActionResult::success(format!("Shortcut '{name}' sent!"))
            }
            Err(err) => {
                tracing::warn!("Shortcut '{}' failed: {}", name, err);
                ActionResult::failure(format!(
                    "Error: Failed to run shortcut '{name}'. Please check connection."
                ))
            }
        }
    }

    async fn run(&self, remote_command: &str) -> Result<(), RemoteError> {
        let destination = format!("{}@{}", self.ssh_user, self.ssh_host);

        let output = Command::new(&self.ssh_program)
            .arg("-i")
            .arg(&self.ssh_key_path)
            .args(["-o", "BatchMode=yes"])
            .arg(&destination)
            .arg(remote_command)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output();

        match time::timeout(self.timeout, output).await {
            Ok(Ok(output)) if output.status.success() => Ok(()),
            Ok(Ok(output)) => Err(RemoteError::NonZeroExit {
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            }),
            Ok(Err(err)) => Err(RemoteError::Spawn(err)),
            Err(_) => Err(RemoteError::Timeout(self.timeout)),
        }
    }
}
