//! Address and route entries as stored in an [`IpConfig`](crate::IpConfig).

use std::cmp::Ordering;
use std::fmt;

use crate::family::AddressFamily;

/// Lifetime value meaning "never expires" (0xFFFFFFFF).
pub const LIFETIME_PERMANENT: u32 = u32::MAX;

/// Address flags (IFA_F_*).
pub mod ifa_flags {
    pub const SECONDARY: u32 = 0x01;
    pub const TEMPORARY: u32 = 0x01; // Alias for SECONDARY
    pub const NODAD: u32 = 0x02;
    pub const OPTIMISTIC: u32 = 0x04;
    pub const DADFAILED: u32 = 0x08;
    pub const HOMEADDRESS: u32 = 0x10;
    pub const DEPRECATED: u32 = 0x20;
    pub const TENTATIVE: u32 = 0x40;
    pub const PERMANENT: u32 = 0x80;
    pub const MANAGETEMPADDR: u32 = 0x100;
    pub const NOPREFIXROUTE: u32 = 0x200;
}

/// Which subsystem contributed an entry.
///
/// The derived ordering is the conflict-resolution priority: when two
/// contributions describe the same entry, the higher source is kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Source {
    /// Provenance not known.
    #[default]
    Unknown,
    /// Read back from the kernel.
    Kernel,
    /// Static configuration owned by another program.
    Static,
    /// VPN plugin.
    Vpn,
    /// IPv6 router discovery.
    Rdisc,
    /// DHCP lease.
    Dhcp,
    /// User-declared connection setting.
    User,
}

impl Source {
    /// Short lowercase name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::Kernel => "kernel",
            Self::Static => "static",
            Self::Vpn => "vpn",
            Self::Rdisc => "rdisc",
            Self::Dhcp => "dhcp",
            Self::User => "user",
        }
    }
}

/// Preference between privacy-extension (temporary) and stable addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Privacy {
    /// No preference configured.
    #[default]
    Unknown,
    /// Privacy extensions disabled.
    Disabled,
    /// Generate temporary addresses but prefer the stable one.
    PreferPublic,
    /// Generate temporary addresses and prefer them.
    PreferTemporary,
}

/// An IP address assigned to a link.
///
/// `timestamp` anchors `lifetime` and `preferred` (seconds on a monotonic
/// clock). A `lifetime` of [`LIFETIME_PERMANENT`] never expires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlatformAddress<F: AddressFamily> {
    /// The address itself.
    pub address: F::Addr,
    /// Prefix length.
    pub prefix_len: u8,
    /// Anchor for the lifetimes.
    pub timestamp: u32,
    /// Valid lifetime in seconds.
    pub lifetime: u32,
    /// Preferred lifetime in seconds.
    pub preferred: u32,
    /// `IFA_F_*` flags.
    pub flags: u32,
    /// Contributor.
    pub source: Source,
}

impl<F: AddressFamily> PlatformAddress<F> {
    /// Create a permanent address with no flags and unknown source.
    pub fn new(address: F::Addr, prefix_len: u8) -> Self {
        Self {
            address,
            prefix_len,
            timestamp: 0,
            lifetime: LIFETIME_PERMANENT,
            preferred: LIFETIME_PERMANENT,
            flags: 0,
            source: Source::Unknown,
        }
    }

    /// Set the source.
    pub fn source(mut self, source: Source) -> Self {
        self.source = source;
        self
    }

    /// Set a finite lifetime anchored at `timestamp`.
    pub fn lifetime(mut self, timestamp: u32, lifetime: u32, preferred: u32) -> Self {
        self.timestamp = timestamp;
        self.lifetime = lifetime;
        self.preferred = preferred;
        self
    }

    /// Set the `IFA_F_*` flags.
    pub fn flags(mut self, flags: u32) -> Self {
        self.flags = flags;
        self
    }

    /// Check if this address never expires.
    pub fn is_permanent(&self) -> bool {
        self.lifetime == LIFETIME_PERMANENT
    }

    /// Check if duplicate address detection is still running.
    pub fn is_tentative(&self) -> bool {
        self.flags & ifa_flags::TENTATIVE != 0
    }

    /// Check if this is a temporary (privacy) address.
    pub fn is_temporary(&self) -> bool {
        self.flags & ifa_flags::TEMPORARY != 0
    }

    /// Check if this address takes part in privacy extensions at all.
    pub fn has_privacy_flags(&self) -> bool {
        self.flags & (ifa_flags::TEMPORARY | ifa_flags::MANAGETEMPADDR) != 0
    }

    /// Check if the kernel was told not to add a prefix route.
    pub fn is_noprefixroute(&self) -> bool {
        self.flags & ifa_flags::NOPREFIXROUTE != 0
    }

    /// Absolute expiry, `None` meaning never.
    ///
    /// A zero lifetime is treated like a permanent one.
    pub fn expiry(&self) -> Option<u64> {
        if self.lifetime == LIFETIME_PERMANENT || self.lifetime == 0 {
            None
        } else {
            Some(u64::from(self.timestamp) + u64::from(self.lifetime))
        }
    }

    /// Compare expiries; `Greater` means `self` expires later.
    pub fn cmp_expiry(&self, other: &Self) -> Ordering {
        match (self.expiry(), other.expiry()) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Greater,
            (Some(_), None) => Ordering::Less,
            (Some(a), Some(b)) => a.cmp(&b),
        }
    }
}

impl<F: AddressFamily> fmt::Display for PlatformAddress<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.address, self.prefix_len)?;
        if self.is_permanent() {
            write!(f, " lft forever")?;
        } else {
            write!(
                f,
                " lft {}sec pref {}sec lifetime {}",
                self.lifetime, self.preferred, self.timestamp
            )?;
        }
        if self.is_tentative() {
            write!(f, " tentative")?;
        }
        write!(f, " src {}", self.source.name())
    }
}

/// A route through a link.
///
/// An unspecified `gateway` means the destination is directly reachable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlatformRoute<F: AddressFamily> {
    /// Destination network.
    pub network: F::Addr,
    /// Destination prefix length.
    pub prefix_len: u8,
    /// Next hop.
    pub gateway: F::Addr,
    /// Route metric (priority).
    pub metric: u32,
    /// Advertised MSS, 0 if unset.
    pub mss: u32,
    /// Contributor.
    pub source: Source,
}

impl<F: AddressFamily> PlatformRoute<F> {
    /// Create an on-link route with metric 0 and unknown source.
    pub fn new(network: F::Addr, prefix_len: u8) -> Self {
        Self {
            network,
            prefix_len,
            gateway: F::UNSPECIFIED,
            metric: 0,
            mss: 0,
            source: Source::Unknown,
        }
    }

    /// Create a default route (`0/0`) via `gateway`.
    pub fn default_via(gateway: F::Addr, metric: u32) -> Self {
        Self::new(F::UNSPECIFIED, 0).gateway(gateway).metric(metric)
    }

    /// Set the next hop.
    pub fn gateway(mut self, gateway: F::Addr) -> Self {
        self.gateway = gateway;
        self
    }

    /// Set the metric.
    pub fn metric(mut self, metric: u32) -> Self {
        self.metric = metric;
        self
    }

    /// Set the source.
    pub fn source(mut self, source: Source) -> Self {
        self.source = source;
        self
    }

    /// Check if the destination network is the all-zeros network.
    pub fn is_default(&self) -> bool {
        F::is_unspecified(&self.network)
    }

    /// Check if the route has a next hop.
    pub fn has_gateway(&self) -> bool {
        !F::is_unspecified(&self.gateway)
    }

    /// Check if `other` has the same `(network, prefix_len)` key.
    pub fn same_destination(&self, other: &Self) -> bool {
        self.network == other.network && self.prefix_len == other.prefix_len
    }
}

impl<F: AddressFamily> fmt::Display for PlatformRoute<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.network, self.prefix_len)?;
        if self.has_gateway() {
            write!(f, " via {}", self.gateway)?;
        }
        write!(f, " metric {}", self.metric)?;
        if self.mss != 0 {
            write!(f, " mss {}", self.mss)?;
        }
        write!(f, " src {}", self.source.name())
    }
}
