use std::net::{Ipv4Addr, SocketAddrV4, UdpSocket};

use thiserror::Error;

use crate::schemas::MacAddress;

/// 6 bytes of 0xFF followed by the target MAC repeated 16 times.
pub const MAGIC_PACKET_LEN: usize = 102;

#[derive(Debug, Error)]
pub enum WolError {
    #[error("failed to send magic packet: {0}")]
    Send(#[from] std::io::Error),
}

pub fn build_magic_packet(mac: &MacAddress) -> [u8; MAGIC_PACKET_LEN] {
    let mut packet = [0xFFu8; MAGIC_PACKET_LEN];
    let octets = mac.octets();

    for repetition in 0..16 {
        let base = 6 + repetition * 6;
        packet[base..base + 6].copy_from_slice(&octets);
    }

    packet
}

/// Sends one magic packet as a UDP broadcast datagram. Fire-and-forget:
/// success means the local send completed, not that the target woke up.
/// The socket lives only for the duration of the call.
pub fn broadcast_magic_packet(
    mac: &MacAddress,
    broadcast: Ipv4Addr,
    port: u16,
) -> Result<(), WolError> {
    let packet = build_magic_packet(mac);

    let socket = UdpSocket::bind((Ipv4Addr::UNSPECIFIED, 0))?;
    socket.set_broadcast(true)?;
    socket.send_to(&packet, SocketAddrV4::new(broadcast, port))?;

    tracing::debug!("Sent magic packet for {} to {}:{}", mac, broadcast, port);
    Ok(())
}
