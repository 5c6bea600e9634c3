//! The IP configuration aggregate.
//!
//! An [`IpConfig`] holds one address family's configuration of one
//! interface: addresses, routes, the default gateway, resolver data and a
//! few flags. It is built by [`IpConfig::capture`] from live platform state
//! or assembled from contributions ([`IpConfig::merge`],
//! [`IpConfig::merge_setting`]), and written back with [`IpConfig::commit`].
//!
//! # Example
//!
//! ```ignore
//! use ipconf::{IpConfig, Ipv4, PlatformAddress, PlatformRoute, Source};
//! use std::net::Ipv4Addr;
//!
//! let mut config = IpConfig::<Ipv4>::new();
//! let changes = config.add_address(
//!     PlatformAddress::new(Ipv4Addr::new(192, 168, 1, 10), 24).source(Source::Dhcp),
//! );
//! assert!(!changes.is_empty());
//!
//! config.set_gateway(Some(Ipv4Addr::new(192, 168, 1, 1)));
//! config.add_route(PlatformRoute::new(Ipv4Addr::new(10, 0, 0, 0), 8).gateway(Ipv4Addr::new(192, 168, 1, 254)));
//! ```

mod capture;
mod changes;
mod commit;
mod project;
mod reconcile;
pub mod sort;
mod upsert;

use std::fmt;

use tracing::debug;

use crate::family::AddressFamily;
use crate::types::{PlatformAddress, PlatformRoute, Privacy};

pub use changes::{ConfigChanges, ConfigField};
pub use commit::CommitResult;
pub use reconcile::{ConfigProjection, ReplaceOutcome};

/// IP configuration of one interface for one address family.
#[derive(Debug, Clone, Default)]
pub struct IpConfig<F: AddressFamily> {
    addresses: Vec<PlatformAddress<F>>,
    routes: Vec<PlatformRoute<F>>,
    gateway: Option<F::Addr>,
    nameservers: Vec<F::Addr>,
    domains: Vec<String>,
    searches: Vec<String>,
    never_default: bool,
    mss: u32,
    privacy: Privacy,
    export_path: Option<String>,
}

impl<F: AddressFamily> IpConfig<F> {
    /// Create an empty configuration.
    pub fn new() -> Self {
        Self {
            addresses: Vec::new(),
            routes: Vec::new(),
            gateway: None,
            nameservers: Vec::new(),
            domains: Vec::new(),
            searches: Vec::new(),
            never_default: false,
            mss: 0,
            privacy: Privacy::Unknown,
            export_path: None,
        }
    }

    /// Create an empty configuration with a privacy preference.
    pub fn with_privacy(privacy: Privacy) -> Self {
        Self {
            privacy,
            ..Self::new()
        }
    }

    /// Addresses, in list order.
    pub fn addresses(&self) -> &[PlatformAddress<F>] {
        &self.addresses
    }

    /// Number of addresses.
    pub fn num_addresses(&self) -> usize {
        self.addresses.len()
    }

    /// Address at `index`.
    pub fn address(&self, index: usize) -> Option<&PlatformAddress<F>> {
        self.addresses.get(index)
    }

    /// Routes, excluding the default route.
    pub fn routes(&self) -> &[PlatformRoute<F>] {
        &self.routes
    }

    /// Number of routes.
    pub fn num_routes(&self) -> usize {
        self.routes.len()
    }

    /// Route at `index`.
    pub fn route(&self, index: usize) -> Option<&PlatformRoute<F>> {
        self.routes.get(index)
    }

    /// Default gateway.
    pub fn gateway(&self) -> Option<F::Addr> {
        self.gateway
    }

    /// Resolver addresses.
    pub fn nameservers(&self) -> &[F::Addr] {
        &self.nameservers
    }

    /// DNS domains.
    pub fn domains(&self) -> &[String] {
        &self.domains
    }

    /// DNS search suffixes.
    pub fn searches(&self) -> &[String] {
        &self.searches
    }

    /// Whether this configuration may never supply the default route.
    pub fn never_default(&self) -> bool {
        self.never_default
    }

    /// TCP MSS override, 0 if unset.
    pub fn mss(&self) -> u32 {
        self.mss
    }

    /// Privacy-extension preference used for address ordering.
    pub fn privacy(&self) -> Privacy {
        self.privacy
    }

    /// Object path, once exported.
    pub fn export_path(&self) -> Option<&str> {
        self.export_path.as_deref()
    }

    pub(crate) fn set_export_path(&mut self, path: String) {
        self.export_path = Some(path);
    }

    /// Check if the configuration holds no published data.
    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty()
            && self.routes.is_empty()
            && self.gateway.is_none()
            && self.nameservers.is_empty()
            && self.domains.is_empty()
            && self.searches.is_empty()
    }

    /// Log the full contents at debug level, each line prefixed by `detail`.
    pub fn dump(&self, detail: &str) {
        debug!("--------- {} IpConfig ({})", F::NAME, detail);
        if let Some(path) = &self.export_path {
            debug!("   path: {}", path);
        }
        for addr in &self.addresses {
            debug!("      a: {}", addr);
        }
        if let Some(gw) = &self.gateway {
            debug!("     gw: {}", gw);
        }
        for route in &self.routes {
            debug!("     rt: {}", route);
        }
        for ns in &self.nameservers {
            debug!("     ns: {}", ns);
        }
        for domain in &self.domains {
            debug!(" domain: {}", domain);
        }
        for search in &self.searches {
            debug!(" search: {}", search);
        }
        debug!("    mss: {}", self.mss);
        debug!("n-dflt: {}", self.never_default);
    }
}

impl<F: AddressFamily> fmt::Display for IpConfig<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} config:", F::NAME)?;
        for addr in &self.addresses {
            writeln!(f, "  address {}", addr)?;
        }
        if let Some(gw) = &self.gateway {
            writeln!(f, "  gateway {}", gw)?;
        }
        for route in &self.routes {
            writeln!(f, "  route {}", route)?;
        }
        for ns in &self.nameservers {
            writeln!(f, "  nameserver {}", ns)?;
        }
        if !self.domains.is_empty() {
            writeln!(f, "  domains {}", self.domains.join(" "))?;
        }
        if !self.searches.is_empty() {
            writeln!(f, "  search {}", self.searches.join(" "))?;
        }
        if self.mss != 0 {
            writeln!(f, "  mss {}", self.mss)?;
        }
        if self.never_default {
            writeln!(f, "  never-default")?;
        }
        Ok(())
    }
}
