use std::net::IpAddr;
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;

use crate::config::PanelConfig;
use crate::gate::{AccessGate, NeighborTableGate};
use crate::probe;
use crate::remote::{PowerAction, RemoteExecutor};
use crate::schemas::{ActionResult, MacAddress};
use crate::wol;

/// Explicit 403-equivalent outcome, not a fault: the serving layer maps
/// it to a denial response.
#[derive(Debug, Error)]
#[error("access denied for {caller}")]
pub struct AccessDenied {
    pub caller: IpAddr,
    pub resolved_link_address: Option<MacAddress>,
}

/// The boundary consumed by the serving layer: maps a named action to
/// one of the network primitives and turns its result into a
/// user-facing outcome.
///
/// Holds no mutable state; concurrent dispatches are safe because the
/// configuration is immutable after load.
pub struct ActionDispatcher {
    config: Arc<PanelConfig>,
    executor: RemoteExecutor,
    gate: Option<Box<dyn AccessGate + Send + Sync>>,
}

impl ActionDispatcher {
    /// The gate is enabled only when the allow-list is non-empty; an
    /// empty list means every caller is trusted.
    pub fn new(config: Arc<PanelConfig>) -> Self {
        let executor = RemoteExecutor::from_config(&config);
        let gate: Option<Box<dyn AccessGate + Send + Sync>> = if config.allowed_macs.is_empty() {
            None
        } else {
            Some(Box::new(NeighborTableGate::new(config.allowed_macs.clone())))
        };

        Self {
            config,
            executor,
            gate,
        }
    }

    /// Swaps in a different authorization scheme.
    pub fn with_gate(mut self, gate: Box<dyn AccessGate + Send + Sync>) -> Self {
        self.gate = Some(gate);
        self
    }

    #[cfg(test)]
    fn with_executor(mut self, executor: RemoteExecutor) -> Self {
        self.executor = executor;
        self
    }

    /// Authorizes the caller (when a gate is configured), then runs the
    /// named action. Denial short-circuits before any side effect.
    pub async fn dispatch(
        &self,
        action_name: &str,
        caller: IpAddr,
    ) -> Result<ActionResult, AccessDenied> {
        if let Some(gate) = &self.gate {
            let decision = gate.authorize(caller);
            if !decision.allowed {
                return Err(AccessDenied {
                    caller,
                    resolved_link_address: decision.resolved_link_address,
                });
            }
        }

        Ok(self.run_action(action_name).await)
    }

    /// Side-channel status query; not gated, matching the status poll
    /// the page fires on load.
    pub async fn check_status(&self) -> bool {
        probe::is_online(
            self.config.target_ip,
            Duration::from_secs(self.config.probe_timeout_secs),
        )
        .await
    }

    async fn run_action(&self, action_name: &str) -> ActionResult {
        if action_name == "wake" {
            return self.wake();
        }

        if let Some(action) = PowerAction::from_name(action_name) {
            return self.executor.execute(action).await;
        }

        // Shortcut payloads come only from the configured map; a name
        // that matches nothing is ignored rather than rejected.
        if let Some(payload) = self.config.shortcuts.get(action_name) {
            return self
                .executor
                .execute_shortcut(action_name, &self.config.shortcut_script, payload)
                .await;
        }

        tracing::debug!("Ignoring unrecognized action '{}'", action_name);
        ActionResult::unchanged()
    }

    /// Reports success as soon as the datagram is sent; whether the
    /// machine actually wakes cannot be observed from here.
    fn wake(&self) -> ActionResult {
        match wol::broadcast_magic_packet(
            &self.config.target_mac,
            self.config.broadcast_addr,
            self.config.wol_port,
        ) {
            Ok(()) => {
                tracing::info!("Magic packet sent to {}", self.config.target_mac);
                ActionResult::success("Magic Packet Sent! PC should wake up shortly.")
            }
            Err(err) => {
                tracing::error!("Failed to send magic packet: {}", err);
                ActionResult::failure("Error: Failed to send magic packet.")
            }
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use std::io::Write;
    use std::net::Ipv4Addr;
    use std::os::unix::fs::PermissionsExt;
    use std::path::PathBuf;

    use tempfile::TempDir;

    use crate::gate::AccessDecision;

    use super::*;

    /// Fake ssh that records every invocation in a marker file.
    fn recording_ssh(dir: &TempDir) -> (PathBuf, PathBuf) {
        let marker = dir.path().join("invoked");
        let program = dir.path().join("fake-ssh");

        let mut file = std::fs::File::create(&program).unwrap();
        writeln!(file, "#!/bin/sh\necho \"$@\" >> {}\nexit 0", marker.display()).unwrap();
        drop(file);

        let mut permissions = std::fs::metadata(&program).unwrap().permissions();
        permissions.set_mode(0o755);
        std::fs::set_permissions(&program, permissions).unwrap();

        (program, marker)
    }

    fn test_config() -> PanelConfig {
        serde_json::from_str(
            r#"{
                "target_ip": "203.0.113.1",
                "target_mac": "01:02:03:04:05:06",
                "ssh_host": "203.0.113.1",
                "ssh_user": "pc",
                "ssh_key_path": "/tmp/key",
                "shortcuts": {"Open Media Player": "launch_media"},
                "broadcast_addr": "127.0.0.1"
            }"#,
        )
        .unwrap()
    }

    fn dispatcher_with_recorder(dir: &TempDir) -> (ActionDispatcher, PathBuf) {
        let (program, marker) = recording_ssh(dir);
        let config = Arc::new(test_config());
        let executor = RemoteExecutor::from_config(&config).with_ssh_program(&program);
        let dispatcher = ActionDispatcher::new(config).with_executor(executor);
        (dispatcher, marker)
    }

    struct DenyAll;

    impl AccessGate for DenyAll {
        fn authorize(&self, _caller: IpAddr) -> AccessDecision {
            AccessDecision {
                allowed: false,
                resolved_link_address: None,
            }
        }
    }

    struct AllowAll;

    impl AccessGate for AllowAll {
        fn authorize(&self, _caller: IpAddr) -> AccessDecision {
            AccessDecision {
                allowed: true,
                resolved_link_address: "AA:BB:CC:DD:EE:FF".parse().ok(),
            }
        }
    }

    fn caller() -> IpAddr {
        IpAddr::V4(Ipv4Addr::new(192, 168, 1, 23))
    }

    #[tokio::test]
    async fn unknown_action_is_a_no_op_with_no_side_effect() {
        let dir = TempDir::new().unwrap();
        let (dispatcher, marker) = dispatcher_with_recorder(&dir);

        let result = dispatcher.dispatch("unknown-action", caller()).await.unwrap();
        assert!(result.succeeded);
        assert_eq!(result.message, "No action taken.");
        assert!(!marker.exists(), "no remote call may happen");
    }

    #[tokio::test]
    async fn denied_caller_triggers_no_side_effect() {
        let dir = TempDir::new().unwrap();
        let (dispatcher, marker) = dispatcher_with_recorder(&dir);
        let dispatcher = dispatcher.with_gate(Box::new(DenyAll));

        let outcome = dispatcher.dispatch("shutdown", caller()).await;
        assert!(outcome.is_err());
        assert!(!marker.exists(), "denial must short-circuit the action");
    }

    #[tokio::test]
    async fn allowed_caller_reaches_the_executor() {
        let dir = TempDir::new().unwrap();
        let (dispatcher, marker) = dispatcher_with_recorder(&dir);
        let dispatcher = dispatcher.with_gate(Box::new(AllowAll));

        let result = dispatcher.dispatch("shutdown", caller()).await.unwrap();
        assert!(result.succeeded);
        assert!(marker.exists());
    }

    #[tokio::test]
    async fn shortcut_uses_only_the_configured_payload() {
        let dir = TempDir::new().unwrap();
        let (dispatcher, marker) = dispatcher_with_recorder(&dir);

        let result = dispatcher
            .dispatch("Open Media Player", caller())
            .await
            .unwrap();
        assert!(result.succeeded);

        let recorded = std::fs::read_to_string(&marker).unwrap();
        assert!(recorded.contains("launch_media"));
    }

    #[tokio::test]
    async fn free_form_command_text_is_never_executed() {
        let dir = TempDir::new().unwrap();
        let (dispatcher, marker) = dispatcher_with_recorder(&dir);

        let result = dispatcher
            .dispatch("powershell.exe -Command \"Remove-Item -Recurse C:\\\"", caller())
            .await
            .unwrap();
        assert_eq!(result.message, "No action taken.");
        assert!(!marker.exists());
    }

    #[tokio::test]
    async fn wake_reports_success_once_datagram_is_sent() {
        let dir = TempDir::new().unwrap();
        let (dispatcher, marker) = dispatcher_with_recorder(&dir);

        // broadcast_addr is loopback in the test config, so the send
        // path runs for real without leaving the machine.
        let result = dispatcher.dispatch("wake", caller()).await.unwrap();
        assert!(result.succeeded);
        assert_eq!(result.message, "Magic Packet Sent! PC should wake up shortly.");
        assert!(!marker.exists(), "wake must not open a remote channel");
    }
}
