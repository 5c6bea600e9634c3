//! Address family abstraction.
//!
//! Every algorithm in [`crate::config`] is written once, generic over an
//! [`AddressFamily`]. The two families are zero-sized markers:
//!
//! ```ignore
//! use ipconf::{IpConfig, Ipv4, Ipv6};
//!
//! let v4: IpConfig<Ipv4> = IpConfig::new();
//! let v6: IpConfig<Ipv6> = IpConfig::new();
//! ```

use std::fmt;
use std::hash::Hash;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use crate::util::addr::{ipv4_in_prefix, ipv6_in_prefix};

/// Address class buckets used by the address ordering.
///
/// The derived ordering is the sort order: mapped addresses first, global
/// addresses last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AddressClass {
    /// IPv4-mapped IPv6 address (`::ffff:a.b.c.d`).
    Mapped,
    /// IPv4-compatible IPv6 address (`::a.b.c.d`, deprecated).
    Compat,
    /// The unspecified address.
    Unspecified,
    /// Loopback.
    Loopback,
    /// Link-local (`fe80::/10`, `169.254.0.0/16`).
    LinkLocal,
    /// Site-local (`fec0::/10`) or IPv4 private ranges.
    SiteLocal,
    /// Everything else.
    Global,
}

/// An IP address family.
pub trait AddressFamily:
    fmt::Debug + Clone + Copy + Default + PartialEq + Eq + Hash + Send + Sync + 'static
{
    /// The address type of this family.
    type Addr: fmt::Debug + fmt::Display + Clone + Copy + PartialEq + Eq + PartialOrd + Ord + Hash + Send + Sync + 'static;

    /// Family name for display ("IPv4" / "IPv6").
    const NAME: &'static str;

    /// Host prefix length (32 / 128).
    const MAX_PREFIX: u8;

    /// The all-zeros address.
    const UNSPECIFIED: Self::Addr;

    /// Default prefix for exported object paths.
    const EXPORT_PREFIX: &'static str;

    /// Classify an address into its ordering bucket.
    fn class(addr: &Self::Addr) -> AddressClass;

    /// Check whether `addr` lies within `prefix_addr/prefix_len`.
    fn in_prefix(addr: &Self::Addr, prefix_addr: &Self::Addr, prefix_len: u8) -> bool;

    /// Narrow a generic IP address to this family.
    fn from_ip(ip: IpAddr) -> Option<Self::Addr>;

    /// Widen an address of this family to a generic IP address.
    fn to_ip(addr: &Self::Addr) -> IpAddr;

    /// Check for the all-zeros address.
    fn is_unspecified(addr: &Self::Addr) -> bool {
        *addr == Self::UNSPECIFIED
    }

    /// Check for a link-local address.
    fn is_link_local(addr: &Self::Addr) -> bool {
        Self::class(addr) == AddressClass::LinkLocal
    }
}

/// IPv4 marker.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Ipv4;

/// IPv6 marker.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Ipv6;

impl AddressFamily for Ipv4 {
    type Addr = Ipv4Addr;

    const NAME: &'static str = "IPv4";
    const MAX_PREFIX: u8 = 32;
    const UNSPECIFIED: Ipv4Addr = Ipv4Addr::UNSPECIFIED;
    const EXPORT_PREFIX: &'static str = "/org/freedesktop/NetworkManager/IP4Config";

    fn class(addr: &Ipv4Addr) -> AddressClass {
        if addr.is_unspecified() {
            AddressClass::Unspecified
        } else if addr.is_loopback() {
            AddressClass::Loopback
        } else if addr.is_link_local() {
            AddressClass::LinkLocal
        } else if addr.is_private() {
            AddressClass::SiteLocal
        } else {
            AddressClass::Global
        }
    }

    fn in_prefix(addr: &Ipv4Addr, prefix_addr: &Ipv4Addr, prefix_len: u8) -> bool {
        ipv4_in_prefix(*addr, *prefix_addr, prefix_len)
    }

    fn from_ip(ip: IpAddr) -> Option<Ipv4Addr> {
        match ip {
            IpAddr::V4(v4) => Some(v4),
            IpAddr::V6(_) => None,
        }
    }

    fn to_ip(addr: &Ipv4Addr) -> IpAddr {
        IpAddr::V4(*addr)
    }
}

impl AddressFamily for Ipv6 {
    type Addr = Ipv6Addr;

    const NAME: &'static str = "IPv6";
    const MAX_PREFIX: u8 = 128;
    const UNSPECIFIED: Ipv6Addr = Ipv6Addr::UNSPECIFIED;
    const EXPORT_PREFIX: &'static str = "/org/freedesktop/NetworkManager/IP6Config";

    fn class(addr: &Ipv6Addr) -> AddressClass {
        let seg = addr.segments();
        let high_zero = seg[..5].iter().all(|&s| s == 0);

        if high_zero && seg[5] == 0xffff {
            AddressClass::Mapped
        } else if high_zero && seg[5] == 0 && (seg[6] != 0 || seg[7] > 1) {
            AddressClass::Compat
        } else if addr.is_unspecified() {
            AddressClass::Unspecified
        } else if addr.is_loopback() {
            AddressClass::Loopback
        } else if seg[0] & 0xffc0 == 0xfe80 {
            AddressClass::LinkLocal
        } else if seg[0] & 0xffc0 == 0xfec0 {
            AddressClass::SiteLocal
        } else {
            AddressClass::Global
        }
    }

    fn in_prefix(addr: &Ipv6Addr, prefix_addr: &Ipv6Addr, prefix_len: u8) -> bool {
        ipv6_in_prefix(*addr, *prefix_addr, prefix_len)
    }

    fn from_ip(ip: IpAddr) -> Option<Ipv6Addr> {
        match ip {
            IpAddr::V6(v6) => Some(v6),
            IpAddr::V4(_) => None,
        }
    }

    fn to_ip(addr: &Ipv6Addr) -> IpAddr {
        IpAddr::V6(*addr)
    }
}
