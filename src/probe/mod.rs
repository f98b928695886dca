use std::net::IpAddr;
use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;
use tokio::time;

/// Point-in-time reachability check: one ICMP echo via the system ping
/// utility, bounded by `timeout`.
///
/// Returns `true` only when a reply arrived in time. Every failure mode
/// (no reply, unreachable, missing binary, resolver hang) collapses to
/// `false` — the panel treats "unknown" and "offline" identically.
pub async fn is_online(target: IpAddr, timeout: Duration) -> bool {
    let mut command = Command::new("ping");

    #[cfg(windows)]
    {
        let wait_millis = timeout.as_millis().to_string();
        command.args(["-n", "1", "-w", wait_millis.as_str()]);
    }
    #[cfg(not(windows))]
    {
        let wait_secs = timeout.as_secs().max(1).to_string();
        command.args(["-c", "1", "-W", wait_secs.as_str()]);
    }

    command
        .arg(target.to_string())
        .stdout(Stdio::null())
        .stderr(Stdio::null());

    // The utility enforces its own wait limit; the outer guard covers a
    // ping binary that ignores it.
    let guard = timeout + Duration::from_secs(1);

    match time::timeout(guard, command.output()).await {
        Ok(Ok(output)) => output.status.success(),
        Ok(Err(err)) => {
            tracing::warn!("Failed to run ping for {}: {}", target, err);
            false
        }
        Err(_) => {
            tracing::warn!("Reachability probe for {} timed out", target);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unreachable_target_reports_offline() {
        // TEST-NET-3 is reserved and never routed.
        let target: IpAddr = "203.0.113.1".parse().unwrap();
        assert!(!is_online(target, Duration::from_secs(1)).await);
    }

    #[tokio::test]
    async fn probe_returns_within_its_bound() {
        let target: IpAddr = "203.0.113.1".parse().unwrap();

        let started = std::time::Instant::now();
        let online = is_online(target, Duration::from_secs(1)).await;

        assert!(!online);
        assert!(started.elapsed() < Duration::from_secs(5));
    }
}
