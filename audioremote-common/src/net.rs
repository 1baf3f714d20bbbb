//! Local network address discovery
//!
//! The mobile client needs the machine's LAN address, not the `0.0.0.0`
//! bind address. Discovery is best effort and never fails.

use std::net::{IpAddr, Ipv4Addr, ToSocketAddrs, UdpSocket};
use std::process::Command;

use tracing::debug;

/// Address used when nothing better can be determined
pub const LOOPBACK: IpAddr = IpAddr::V4(Ipv4Addr::LOCALHOST);

/// Determine the address other machines on the LAN can reach us at
///
/// Order of attempts:
/// 1. Local address of a UDP socket "connected" to a private-range address
///    (connecting a UDP socket sends no packets, it only selects a route)
/// 2. First IPv4 address the machine hostname resolves to
/// 3. [`LOOPBACK`]
pub fn local_ip() -> IpAddr {
    route_ip()
        .or_else(hostname_ip)
        .unwrap_or_else(|| {
            debug!("Local IP discovery failed, falling back to loopback");
            LOOPBACK
        })
}

fn route_ip() -> Option<IpAddr> {
    let socket = UdpSocket::bind((Ipv4Addr::UNSPECIFIED, 0)).ok()?;
    socket.connect((Ipv4Addr::new(10, 255, 255, 255), 1)).ok()?;
    let ip = socket.local_addr().ok()?.ip();

    (!ip.is_unspecified()).then_some(ip)
}

fn hostname_ip() -> Option<IpAddr> {
    let hostname = gethostname()?;

    (hostname.as_str(), 0)
        .to_socket_addrs()
        .ok()?
        .map(|addr| addr.ip())
        .find(|ip| ip.is_ipv4())
}

fn gethostname() -> Option<String> {
    Command::new("hostname")
        .output()
        .ok()
        .and_then(|o| String::from_utf8(o.stdout).ok())
        .map(|s| s.trim().to_owned())
        .filter(|s| !s.is_empty())
}
