use std::collections::HashMap;
use std::net::{IpAddr, Ipv4Addr};
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

use serde::Deserialize;
use thiserror::Error;

use crate::config::constants::{
    DEFAULT_BROADCAST_ADDR, DEFAULT_HTTP_PORT, DEFAULT_PROBE_TIMEOUT_SECS,
    DEFAULT_REMOTE_TIMEOUT_SECS, DEFAULT_SHORTCUT_SCRIPT, DEFAULT_WOL_PORT,
};
use crate::schemas::MacAddress;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Panel configuration, loaded once at startup and immutable afterwards.
///
/// Field aliases match the upper-case keys of the legacy `config.json`
/// layout, so existing configuration files keep working unchanged.
#[derive(Debug, Clone, Deserialize)]
pub struct PanelConfig {
    /// Reachability probe target.
    #[serde(alias = "TARGET_IP")]
    pub target_ip: IpAddr,

    /// Wake-on-LAN target.
    #[serde(alias = "TARGET_MAC")]
    pub target_mac: MacAddress,

    #[serde(alias = "SSH_HOST")]
    pub ssh_host: String,

    #[serde(alias = "SSH_USER")]
    pub ssh_user: String,

    #[serde(alias = "SSH_KEY_PATH")]
    pub ssh_key_path: PathBuf,

    /// Access-gate allow-list. Empty means the gate is disabled and
    /// every caller is trusted.
    #[serde(default, alias = "ALLOWED_MACS")]
    pub allowed_macs: Vec<MacAddress>,

    /// Display name -> opaque payload for the keystroke script. Closed
    /// set: only payloads from this map are ever sent to the target.
    #[serde(default, alias = "SHORTCUTS")]
    pub shortcuts: HashMap<String, String>,

    #[serde(default = "default_shortcut_script", alias = "SHORTCUT_SCRIPT")]
    pub shortcut_script: String,

    #[serde(default = "default_http_port", alias = "PORT")]
    pub port: u16,

    #[serde(default, alias = "DEBUG")]
    pub debug: bool,

    #[serde(default = "default_wol_port")]
    pub wol_port: u16,

    #[serde(default = "default_broadcast_addr")]
    pub broadcast_addr: Ipv4Addr,

    #[serde(default = "default_probe_timeout_secs")]
    pub probe_timeout_secs: u64,

    #[serde(default = "default_remote_timeout_secs")]
    pub remote_timeout_secs: u64,
}

fn default_shortcut_script() -> String {
    DEFAULT_SHORTCUT_SCRIPT.to_string()
}

fn default_http_port() -> u16 {
    DEFAULT_HTTP_PORT
}

fn default_wol_port() -> u16 {
    DEFAULT_WOL_PORT
}

fn default_broadcast_addr() -> Ipv4Addr {
    DEFAULT_BROADCAST_ADDR
}

fn default_probe_timeout_secs() -> u64 {
    DEFAULT_PROBE_TIMEOUT_SECS
}

fn default_remote_timeout_secs() -> u64 {
    DEFAULT_REMOTE_TIMEOUT_SECS
}

impl PanelConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&content)?)
    }
}

static GLOBAL_CONFIG: OnceLock<Arc<PanelConfig>> = OnceLock::new();

/// Installs the process-wide configuration. Only the first call takes
/// effect; later attempts are ignored so concurrent readers never see a
/// change.
pub fn set_global_config(config: PanelConfig) {
    if GLOBAL_CONFIG.set(Arc::new(config)).is_err() {
        tracing::warn!("Configuration already initialized, ignoring reload");
    }
}

pub fn get_global_config() -> Arc<PanelConfig> {
    GLOBAL_CONFIG
        .get()
        .cloned()
        .expect("configuration accessed before initialization")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_legacy_uppercase_keys() {
        let raw = r#"{
            "TARGET_IP": "192.168.1.50",
            "TARGET_MAC": "01:02:03:04:05:06",
            "SSH_HOST": "192.168.1.50",
            "SSH_USER": "admin",
            "SSH_KEY_PATH": "/home/panel/.ssh/id_ed25519",
            "ALLOWED_MACS": ["AA:BB:CC:DD:EE:FF"],
            "SHORTCUTS": {"Open Media Player": "launch_media"},
            "PORT": 8050,
            "DEBUG": true
        }"#;

        let config: PanelConfig = serde_json::from_str(raw).unwrap();
        assert_eq!(config.target_ip.to_string(), "192.168.1.50");
        assert_eq!(config.target_mac.to_string(), "01:02:03:04:05:06");
        assert_eq!(config.ssh_user, "admin");
        assert_eq!(config.allowed_macs.len(), 1);
        assert_eq!(
            config.shortcuts.get("Open Media Player").map(String::as_str),
            Some("launch_media")
        );
        assert_eq!(config.port, 8050);
        assert!(config.debug);
    }

    #[test]
    fn applies_defaults_for_omitted_fields() {
        let raw = r#"{
            "target_ip": "10.0.0.2",
            "target_mac": "aa:bb:cc:dd:ee:ff",
            "ssh_host": "10.0.0.2",
            "ssh_user": "pc",
            "ssh_key_path": "/keys/id_rsa"
        }"#;

        let config: PanelConfig = serde_json::from_str(raw).unwrap();
        assert!(config.allowed_macs.is_empty());
        assert!(config.shortcuts.is_empty());
        assert_eq!(config.wol_port, DEFAULT_WOL_PORT);
        assert_eq!(config.broadcast_addr, Ipv4Addr::BROADCAST);
        assert_eq!(config.probe_timeout_secs, DEFAULT_PROBE_TIMEOUT_SECS);
        assert_eq!(config.remote_timeout_secs, DEFAULT_REMOTE_TIMEOUT_SECS);
        assert_eq!(config.port, DEFAULT_HTTP_PORT);
        assert!(!config.debug);
    }

    #[test]
    fn rejects_malformed_target_mac() {
        let raw = r#"{
            "target_ip": "10.0.0.2",
            "target_mac": "not-a-mac",
            "ssh_host": "10.0.0.2",
            "ssh_user": "pc",
            "ssh_key_path": "/keys/id_rsa"
        }"#;

        assert!(serde_json::from_str::<PanelConfig>(raw).is_err());
    }
}
