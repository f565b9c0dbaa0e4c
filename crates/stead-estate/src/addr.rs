//! Address resolution for estate records.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, ToSocketAddrs};

use crate::error::{EstateError, Result};

/// Default port estates address when none is supplied.
pub const DEFAULT_PORT: u16 = 7530;

/// Default port remote estates are addressed on in loopback test setups.
pub const DEFAULT_TEST_PORT: u16 = 7531;

/// Resolve `host` to a numeric address.
///
/// An empty host resolves as the any-address. Numeric literals parse
/// directly; names go through the system resolver and the first returned
/// address wins.
pub fn resolve_host(host: &str, port: u16) -> Result<IpAddr> {
    let host = if host.is_empty() { "0.0.0.0" } else { host };
    if let Ok(ip) = host.parse::<IpAddr>() {
        return Ok(ip);
    }
    let mut addrs = (host, port)
        .to_socket_addrs()
        .map_err(|e| EstateError::AddressResolutionFailure {
            host: host.to_string(),
            reason: e.to_string(),
        })?;
    addrs
        .next()
        .map(|sa| sa.ip())
        .ok_or_else(|| EstateError::AddressResolutionFailure {
            host: host.to_string(),
            reason: "resolver returned no addresses".to_string(),
        })
}

/// The host name shown for a resolved address.
///
/// The any-address is not routable as a name, so it renders via the
/// loopback address of the same family. Display only; the stored numeric
/// address is untouched.
pub fn display_host(ip: IpAddr) -> String {
    let shown = if ip.is_unspecified() {
        match ip {
            IpAddr::V4(_) => IpAddr::V4(Ipv4Addr::LOCALHOST),
            IpAddr::V6(_) => IpAddr::V6(Ipv6Addr::LOCALHOST),
        }
    } else {
        ip
    };
    shown.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_numeric_literal() {
        let ip = resolve_host("127.0.0.1", DEFAULT_PORT).unwrap();
        assert_eq!(ip, IpAddr::V4(Ipv4Addr::LOCALHOST));
    }

    #[test]
    fn test_resolve_empty_is_any_address() {
        let ip = resolve_host("", DEFAULT_PORT).unwrap();
        assert!(ip.is_unspecified());
    }

    #[test]
    fn test_resolve_garbage_fails() {
        let err = resolve_host("not a host###", DEFAULT_PORT).unwrap_err();
        assert!(matches!(err, EstateError::AddressResolutionFailure { .. }));
    }

    #[test]
    fn test_display_host_routes_any_via_loopback() {
        let any = "0.0.0.0".parse::<IpAddr>().unwrap();
        assert_eq!(display_host(any), "127.0.0.1");

        let any6 = "::".parse::<IpAddr>().unwrap();
        assert_eq!(display_host(any6), "::1");
    }

    #[test]
    fn test_display_host_passes_concrete_addresses() {
        let ip = "192.0.2.7".parse::<IpAddr>().unwrap();
        assert_eq!(display_host(ip), "192.0.2.7");
    }
}
