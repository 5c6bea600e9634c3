//! Declared IP settings.
//!
//! An [`IpSetting`] is the user's intent for one address family of a
//! connection: how addresses are obtained, static addresses and routes, and
//! resolver overrides. It is merged into a live configuration with
//! [`IpConfig::merge_setting`](crate::IpConfig::merge_setting) and derived
//! from one with [`IpConfig::to_setting`](crate::IpConfig::to_setting).
//!
//! # Example
//!
//! ```ignore
//! use ipconf::{IpSetting, Ipv4, Method};
//!
//! let setting = IpSetting::<Ipv4>::new(Method::Manual)
//!     .address("192.168.1.10/24")?
//!     .address_via("10.0.0.2/8", "10.0.0.1")?
//!     .route("172.16.0.0/12", |r| r.via("10.0.0.254").metric(50))?
//!     .dns("1.1.1.1")?
//!     .dns_search("example.com")
//!     .ignore_auto_dns();
//! ```

use std::fmt;
use std::net::IpAddr;

use crate::family::AddressFamily;
use crate::util::addr::{AddrError, parse_addr, parse_prefix};

/// How addresses are obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Method {
    /// No addressing for this family.
    #[default]
    Disabled,
    /// Link-local addressing only.
    LinkLocal,
    /// Automatic (DHCP, router advertisements).
    Auto,
    /// Static addresses.
    Manual,
}

impl Method {
    /// Setting value string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Disabled => "disabled",
            Self::LinkLocal => "link-local",
            Self::Auto => "auto",
            Self::Manual => "manual",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A declared static address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SettingAddress<F: AddressFamily> {
    pub address: F::Addr,
    pub prefix_len: u8,
    pub gateway: Option<F::Addr>,
}

/// A declared static route.
///
/// A metric of 0 means "use the connection's default metric".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SettingRoute<F: AddressFamily> {
    pub destination: F::Addr,
    pub prefix_len: u8,
    pub next_hop: Option<F::Addr>,
    pub metric: u32,
}

/// Declared IP setting for one address family.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IpSetting<F: AddressFamily> {
    method: Method,
    addresses: Vec<SettingAddress<F>>,
    routes: Vec<SettingRoute<F>>,
    dns: Vec<F::Addr>,
    dns_searches: Vec<String>,
    never_default: bool,
    ignore_auto_routes: bool,
    ignore_auto_dns: bool,
}

impl<F: AddressFamily> Default for IpSetting<F> {
    fn default() -> Self {
        Self::new(Method::default())
    }
}

impl<F: AddressFamily> IpSetting<F> {
    /// Create an empty setting with the given method.
    pub fn new(method: Method) -> Self {
        Self {
            method,
            addresses: Vec::new(),
            routes: Vec::new(),
            dns: Vec::new(),
            dns_searches: Vec::new(),
            never_default: false,
            ignore_auto_routes: false,
            ignore_auto_dns: false,
        }
    }

    /// The setting of an interface without configuration.
    pub fn disabled() -> Self {
        Self::new(Method::Disabled)
    }

    /// Add a static address in CIDR notation (e.g. "192.168.1.1/24").
    pub fn address(self, addr: &str) -> Result<Self, AddressParseError> {
        self.parse_address(addr, None)
    }

    /// Add a static address with a gateway.
    pub fn address_via(self, addr: &str, gateway: &str) -> Result<Self, AddressParseError> {
        let gw = parse_family_addr::<F>(gateway)
            .map_err(|_| AddressParseError::InvalidGateway(gateway.to_string()))?;
        self.parse_address(addr, Some(gw))
    }

    fn parse_address(mut self, addr: &str, gateway: Option<F::Addr>) -> Result<Self, AddressParseError> {
        if !addr.contains('/') {
            return Err(AddressParseError::MissingPrefix(addr.to_string()));
        }
        let (ip, prefix_len) = parse_prefix(addr)?;
        let address = F::from_ip(ip).ok_or_else(|| AddressParseError::WrongFamily {
            address: addr.to_string(),
            family: F::NAME,
        })?;
        self.addresses.push(SettingAddress {
            address,
            prefix_len,
            gateway,
        });
        Ok(self)
    }

    /// Add a static route.
    ///
    /// The destination is in CIDR notation (e.g. "10.0.0.0/8").
    ///
    /// # Example
    ///
    /// ```ignore
    /// let setting = IpSetting::<Ipv4>::new(Method::Manual)
    ///     .route("10.0.0.0/8", |r| r.via("192.168.1.1"))?
    ///     .route("172.16.0.0/12", |r| r.metric(20))?;
    /// ```
    pub fn route(
        mut self,
        dst: &str,
        f: impl FnOnce(SettingRouteBuilder) -> SettingRouteBuilder,
    ) -> Result<Self, RouteParseError> {
        let builder = f(SettingRouteBuilder::new(dst)?);
        self.routes.push(builder.build::<F>()?);
        Ok(self)
    }

    /// Add a nameserver.
    pub fn dns(mut self, nameserver: &str) -> Result<Self, AddressParseError> {
        let addr = parse_family_addr::<F>(nameserver)?;
        self.dns.push(addr);
        Ok(self)
    }

    /// Add a DNS search suffix.
    pub fn dns_search(mut self, search: &str) -> Self {
        self.dns_searches.push(search.to_string());
        self
    }

    /// Never use this connection for the default route.
    pub fn never_default(mut self) -> Self {
        self.never_default = true;
        self
    }

    /// Ignore routes obtained automatically.
    pub fn ignore_auto_routes(mut self) -> Self {
        self.ignore_auto_routes = true;
        self
    }

    /// Ignore resolver data obtained automatically.
    pub fn ignore_auto_dns(mut self) -> Self {
        self.ignore_auto_dns = true;
        self
    }

    pub(crate) fn set_method(&mut self, method: Method) {
        self.method = method;
    }

    pub(crate) fn push_address(&mut self, address: SettingAddress<F>) {
        self.addresses.push(address);
    }

    pub(crate) fn push_route(&mut self, route: SettingRoute<F>) {
        self.routes.push(route);
    }

    pub(crate) fn push_dns(&mut self, nameserver: F::Addr) {
        self.dns.push(nameserver);
    }

    /// Get the method.
    pub fn method(&self) -> Method {
        self.method
    }

    /// Get the static addresses.
    pub fn addresses(&self) -> &[SettingAddress<F>] {
        &self.addresses
    }

    /// Get the static routes.
    pub fn routes(&self) -> &[SettingRoute<F>] {
        &self.routes
    }

    /// Get the nameservers.
    pub fn dns_servers(&self) -> &[F::Addr] {
        &self.dns
    }

    /// Get the DNS search suffixes.
    pub fn dns_searches(&self) -> &[String] {
        &self.dns_searches
    }

    /// Check the never-default flag.
    pub fn is_never_default(&self) -> bool {
        self.never_default
    }

    /// Check if automatic routes are ignored.
    pub fn ignores_auto_routes(&self) -> bool {
        self.ignore_auto_routes
    }

    /// Check if automatic resolver data is ignored.
    pub fn ignores_auto_dns(&self) -> bool {
        self.ignore_auto_dns
    }
}

fn parse_family_addr<F: AddressFamily>(s: &str) -> Result<F::Addr, AddressParseError> {
    let ip = parse_addr(s)?;
    F::from_ip(ip).ok_or_else(|| AddressParseError::WrongFamily {
        address: s.to_string(),
        family: F::NAME,
    })
}

/// Error parsing a declared address.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AddressParseError {
    /// Address is missing prefix (no "/").
    #[error("address missing prefix: {0} (expected format: 192.168.1.1/24)")]
    MissingPrefix(String),
    /// Invalid IP address.
    #[error("invalid IP address: {0}")]
    InvalidAddress(String),
    /// Invalid prefix length.
    #[error("invalid prefix length: {0}")]
    InvalidPrefix(String),
    /// Prefix length too large.
    #[error("prefix length {prefix} exceeds maximum {max}")]
    PrefixTooLarge { prefix: u8, max: u8 },
    /// Invalid gateway address.
    #[error("invalid gateway address: {0}")]
    InvalidGateway(String),
    /// Address belongs to the other family.
    #[error("{address} is not an {family} address")]
    WrongFamily { address: String, family: &'static str },
}

impl From<AddrError> for AddressParseError {
    fn from(err: AddrError) -> Self {
        match err {
            AddrError::InvalidAddress(s) => Self::InvalidAddress(s),
            AddrError::InvalidPrefix(s) => Self::InvalidPrefix(s),
            AddrError::PrefixTooLarge { prefix, max } => Self::PrefixTooLarge { prefix, max },
        }
    }
}

/// Error parsing a declared route.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouteParseError {
    /// Destination is missing prefix.
    #[error("destination missing prefix: {0} (expected format: 10.0.0.0/8)")]
    MissingPrefix(String),
    /// Invalid destination address.
    #[error("invalid destination address: {0}")]
    InvalidDestination(String),
    /// Invalid prefix length.
    #[error("invalid prefix length: {0}")]
    InvalidPrefix(String),
    /// Prefix length too large.
    #[error("prefix length {prefix} exceeds maximum {max}")]
    PrefixTooLarge { prefix: u8, max: u8 },
    /// Invalid gateway address.
    #[error("invalid gateway address: {0}")]
    InvalidGateway(String),
    /// Destination or next hop belongs to the other family.
    #[error("{address} is not an {family} address")]
    WrongFamily { address: String, family: &'static str },
}

impl From<AddrError> for RouteParseError {
    fn from(err: AddrError) -> Self {
        match err {
            AddrError::InvalidAddress(s) => Self::InvalidDestination(s),
            AddrError::InvalidPrefix(s) => Self::InvalidPrefix(s),
            AddrError::PrefixTooLarge { prefix, max } => Self::PrefixTooLarge { prefix, max },
        }
    }
}

/// Builder for a declared route.
#[derive(Debug)]
pub struct SettingRouteBuilder {
    destination: IpAddr,
    dst: String,
    prefix_len: u8,
    via: Option<String>,
    metric: u32,
}

impl SettingRouteBuilder {
    fn new(dst: &str) -> Result<Self, RouteParseError> {
        if !dst.contains('/') {
            return Err(RouteParseError::MissingPrefix(dst.to_string()));
        }
        let (destination, prefix_len) = parse_prefix(dst)?;
        Ok(Self {
            destination,
            dst: dst.to_string(),
            prefix_len,
            via: None,
            metric: 0,
        })
    }

    /// Set the next hop.
    pub fn via(mut self, gateway: &str) -> Self {
        self.via = Some(gateway.to_string());
        self
    }

    /// Set the route metric (0 = connection default).
    pub fn metric(mut self, metric: u32) -> Self {
        self.metric = metric;
        self
    }

    fn build<F: AddressFamily>(self) -> Result<SettingRoute<F>, RouteParseError> {
        let wrong_family = |address: &str| RouteParseError::WrongFamily {
            address: address.to_string(),
            family: F::NAME,
        };

        let destination = F::from_ip(self.destination).ok_or_else(|| wrong_family(&self.dst))?;
        let next_hop = match &self.via {
            Some(via) => {
                let ip = parse_addr(via).map_err(|_| RouteParseError::InvalidGateway(via.clone()))?;
                Some(F::from_ip(ip).ok_or_else(|| wrong_family(via))?)
            }
            None => None,
        };

        Ok(SettingRoute {
            destination,
            prefix_len: self.prefix_len,
            next_hop,
            metric: self.metric,
        })
    }
}
