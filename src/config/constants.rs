use std::net::Ipv4Addr;

/// Standard Wake-on-LAN discard port.
pub const DEFAULT_WOL_PORT: u16 = 9;

pub const DEFAULT_BROADCAST_ADDR: Ipv4Addr = Ipv4Addr::BROADCAST;

pub const DEFAULT_PROBE_TIMEOUT_SECS: u64 = 1;

/// Upper bound on a remote command; an unresponsive SSH channel must
/// not hang a dispatch indefinitely.
pub const DEFAULT_REMOTE_TIMEOUT_SECS: u64 = 30;

pub const DEFAULT_HTTP_PORT: u16 = 8090;

pub const DEFAULT_CONFIG_PATH: &str = "config.json";

/// Keystroke-injection entry point on the target; shortcut payloads are
/// appended as its single argument.
pub const DEFAULT_SHORTCUT_SCRIPT: &str = r"powershell.exe -File C:\scripts\send_keys.ps1";

/// Kernel neighbor table consulted by the access gate.
pub const NEIGHBOR_TABLE_PATH: &str = "/proc/net/arp";
