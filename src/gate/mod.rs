use std::net::IpAddr;
use std::path::PathBuf;

use crate::config::constants::NEIGHBOR_TABLE_PATH;
use crate::schemas::MacAddress;

/// Per-request authorization outcome. Derived fresh on every call;
/// neighbor tables are not trusted to stay static, so nothing is cached.
#[derive(Debug, Clone)]
pub struct AccessDecision {
    pub allowed: bool,
    pub resolved_link_address: Option<MacAddress>,
}

impl AccessDecision {
    fn denied(resolved: Option<MacAddress>) -> Self {
        Self {
            allowed: false,
            resolved_link_address: resolved,
        }
    }
}

/// Request-time authorization keyed on the caller's link-layer address.
///
/// This is a LAN-trust heuristic, not authentication: it believes the
/// local neighbor cache, which any host on the same broadcast segment
/// can poison. A stronger scheme can be swapped in behind this trait
/// without touching the dispatcher.
pub trait AccessGate {
    fn authorize(&self, caller: IpAddr) -> AccessDecision;
}

/// Gate backed by the kernel neighbor table (`/proc/net/arp`).
pub struct NeighborTableGate {
    allow_list: Vec<MacAddress>,
    table_path: PathBuf,
}

impl NeighborTableGate {
    pub fn new(allow_list: Vec<MacAddress>) -> Self {
        Self {
            allow_list,
            table_path: NEIGHBOR_TABLE_PATH.into(),
        }
    }

    #[cfg(test)]
    fn with_table_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.table_path = path.into();
        self
    }

    /// Looks up `caller` in the neighbor table. Incomplete entries
    /// (flags 0x0) and all-zero MACs are skipped; any read or parse
    /// problem yields `None`.
    fn resolve(&self, caller: IpAddr) -> Option<MacAddress> {
        let content = match std::fs::read_to_string(&self.table_path) {
            Ok(content) => content,
            Err(err) => {
                tracing::warn!(
                    "Failed to read neighbor table {}: {}",
                    self.table_path.display(),
                    err
                );
                return None;
            }
        };

        // Format: IP address  HW type  Flags  HW address  Mask  Device
        for line in content.lines().skip(1) {
            let fields: Vec<&str> = line.split_whitespace().collect();
            if fields.len() < 6 {
                continue;
            }

            let entry_ip: IpAddr = match fields[0].parse() {
                Ok(ip) => ip,
                Err(_) => continue,
            };
            if entry_ip != caller {
                continue;
            }

            if fields[2] == "0x0" {
                continue;
            }

            match fields[3].parse::<MacAddress>() {
                Ok(mac) if !mac.is_zero() => return Some(mac),
                _ => continue,
            }
        }

        None
    }
}

impl AccessGate for NeighborTableGate {
    /// Fail closed: no entry, unreadable table, or unparsable line all
    /// deny the request.
    fn authorize(&self, caller: IpAddr) -> AccessDecision {
        let Some(resolved) = self.resolve(caller) else {
            tracing::warn!("Could not resolve link address for {}", caller);
            return AccessDecision::denied(None);
        };

        let allowed = self.allow_list.contains(&resolved);
        if !allowed {
            tracing::warn!("Device {} ({}) is not on the allow-list", resolved, caller);
            return AccessDecision::denied(Some(resolved));
        }

        AccessDecision {
            allowed: true,
            resolved_link_address: Some(resolved),
        }
    }
}
