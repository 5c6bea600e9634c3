//! Whole-configuration operations: merge, subtract, replace and equality.
//!
//! Equality, change classification in [`IpConfig::replace`] and hashing all
//! go through [`ConfigProjection`], the published view of a configuration.
//! Lifetimes, sources, MSS and the never-default flag are not part of it.

use std::hash::{Hash, Hasher};

use tracing::trace;

use super::{ConfigChanges, ConfigField, IpConfig};
use crate::family::AddressFamily;
use crate::setting::IpSetting;
use crate::types::{PlatformAddress, PlatformRoute, Source};

/// The published, comparable view of an [`IpConfig`].
///
/// Lists keep their order, so two configurations with the same entries in a
/// different order are not equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConfigProjection<F: AddressFamily> {
    pub gateway: Option<F::Addr>,
    /// `(address, prefix_len)`
    pub addresses: Vec<(F::Addr, u8)>,
    /// `(network, prefix_len, gateway, metric)`
    pub routes: Vec<(F::Addr, u8, F::Addr, u32)>,
    pub nameservers: Vec<F::Addr>,
    pub domains: Vec<String>,
    pub searches: Vec<String>,
}

impl<F: AddressFamily> ConfigProjection<F> {
    /// Fields that differ between two projections.
    pub fn changed_fields(&self, other: &Self) -> ConfigChanges {
        let mut changes = ConfigChanges::none();
        changes |= ConfigChanges::field_if(ConfigField::Gateway, self.gateway != other.gateway);
        changes |= ConfigChanges::field_if(ConfigField::Addresses, self.addresses != other.addresses);
        changes |= ConfigChanges::field_if(ConfigField::Routes, self.routes != other.routes);
        changes |= ConfigChanges::field_if(
            ConfigField::Nameservers,
            self.nameservers != other.nameservers,
        );
        changes |= ConfigChanges::field_if(ConfigField::Domains, self.domains != other.domains);
        changes |= ConfigChanges::field_if(ConfigField::Searches, self.searches != other.searches);
        changes
    }

    /// Feed only the resolver part into `state`.
    pub fn hash_dns<H: Hasher>(&self, state: &mut H) {
        self.nameservers.hash(state);
        self.domains.hash(state);
        self.searches.hash(state);
    }
}

/// Result of [`IpConfig::replace`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplaceOutcome {
    /// Published fields that changed. Consumers must be told about these.
    pub relevant: ConfigChanges,
    /// Whether anything at all changed, bookkeeping included.
    pub any_changed: bool,
}

impl ReplaceOutcome {
    /// Check if any published field changed.
    pub fn relevant_changed(&self) -> bool {
        !self.relevant.is_empty()
    }
}

impl<F: AddressFamily> IpConfig<F> {
    /// The published view of this configuration.
    pub fn projection(&self) -> ConfigProjection<F> {
        ConfigProjection {
            gateway: self.gateway,
            addresses: self
                .addresses
                .iter()
                .map(|a| (a.address, a.prefix_len))
                .collect(),
            routes: self
                .routes
                .iter()
                .map(|r| (r.network, r.prefix_len, r.gateway, r.metric))
                .collect(),
            nameservers: self.nameservers.clone(),
            domains: self.domains.clone(),
            searches: self.searches.clone(),
        }
    }

    /// Check if two configurations publish the same data.
    pub fn equal(&self, other: &Self) -> bool {
        self.projection() == other.projection()
    }

    /// Feed the published data into `state`. With `dns_only` only the
    /// nameservers, domains and searches are hashed.
    pub fn hash_into<H: Hasher>(&self, state: &mut H, dns_only: bool) {
        let projection = self.projection();
        if dns_only {
            projection.hash_dns(state);
        } else {
            projection.hash(state);
        }
    }

    /// Apply a declared setting on top of this configuration.
    ///
    /// Declared entries are added with [`Source::User`]. Declared routes
    /// with metric 0 get `default_route_metric`.
    pub fn merge_setting(&mut self, setting: &IpSetting<F>, default_route_metric: u32) -> ConfigChanges {
        let mut changes = ConfigChanges::none();

        if setting.is_never_default() {
            self.set_never_default(true);
        } else if setting.ignores_auto_routes() {
            self.set_never_default(false);
        }

        if let Some(gw) = setting
            .addresses()
            .iter()
            .filter_map(|a| a.gateway)
            .find(|gw| !F::is_unspecified(gw))
        {
            changes |= self.set_gateway(Some(gw));
        }

        for declared in setting.addresses() {
            changes |= self.add_address(
                PlatformAddress::new(declared.address, declared.prefix_len).source(Source::User),
            );
        }

        if setting.ignores_auto_routes() {
            changes |= self.reset_routes();
        }
        for declared in setting.routes() {
            let metric = if declared.metric == 0 {
                default_route_metric
            } else {
                declared.metric
            };
            changes |= self.add_route(
                PlatformRoute::new(declared.destination, declared.prefix_len)
                    .gateway(declared.next_hop.unwrap_or(F::UNSPECIFIED))
                    .metric(metric)
                    .source(Source::User),
            );
        }

        if setting.ignores_auto_dns() {
            changes |= self.reset_nameservers();
            changes |= self.reset_domains();
            changes |= self.reset_searches();
        }
        for ns in setting.dns_servers() {
            changes |= self.add_nameserver(*ns);
        }
        for search in setting.dns_searches() {
            changes |= self.add_search(search);
        }

        trace!("merged {} setting: {}", F::NAME, changes.summary());
        changes
    }

    /// Add every entry of `src`.
    ///
    /// The gateway and MSS of `src` are only taken when unset here.
    pub fn merge(&mut self, src: &Self) -> ConfigChanges {
        let mut changes = ConfigChanges::none();

        for addr in &src.addresses {
            changes |= self.add_address(*addr);
        }
        for ns in &src.nameservers {
            changes |= self.add_nameserver(*ns);
        }
        if self.gateway.is_none() {
            changes |= self.set_gateway(src.gateway);
        }
        for route in &src.routes {
            changes |= self.add_route(*route);
        }
        for domain in &src.domains {
            changes |= self.add_domain(domain);
        }
        for search in &src.searches {
            changes |= self.add_search(search);
        }
        if self.mss == 0 {
            self.set_mss(src.mss);
        }

        changes
    }

    /// Remove every entry of `src`.
    ///
    /// Addresses match by value, routes by destination, resolver entries by
    /// value. Gateway and MSS are cleared when equal to those of `src`.
    pub fn subtract(&mut self, src: &Self) -> ConfigChanges {
        let mut changes = ConfigChanges::none();

        for addr in &src.addresses {
            if let Some(i) = self.addresses.iter().position(|a| a.address == addr.address) {
                changes |= self.del_address(i);
            }
        }
        for ns in &src.nameservers {
            if let Some(i) = self.nameservers.iter().position(|n| n == ns) {
                changes |= self.del_nameserver(i);
            }
        }
        if src.gateway.is_some() && self.gateway == src.gateway {
            changes |= self.set_gateway(None);
        }
        for route in &src.routes {
            if let Some(i) = self.routes.iter().position(|r| r.same_destination(route)) {
                changes |= self.del_route(i);
            }
        }
        for domain in &src.domains {
            if let Some(i) = self.domains.iter().position(|d| d == domain) {
                changes |= self.del_domain(i);
            }
        }
        for search in &src.searches {
            if let Some(i) = self.searches.iter().position(|s| s == search) {
                changes |= self.del_search(i);
            }
        }
        if src.mss != 0 && self.mss == src.mss {
            self.set_mss(0);
        }

        changes
    }

    /// Make this configuration equal to `src`.
    ///
    /// Lifetimes, sources, MSS, never-default and privacy are copied too, but
    /// only published fields are reported in [`ReplaceOutcome::relevant`].
    /// The export path is kept.
    pub fn replace(&mut self, src: &Self) -> ReplaceOutcome {
        let relevant = self.projection().changed_fields(&src.projection());

        let any_changed = !relevant.is_empty()
            || self.addresses != src.addresses
            || self.routes != src.routes
            || self.mss != src.mss
            || self.never_default != src.never_default
            || self.privacy != src.privacy;

        if any_changed {
            self.addresses.clone_from(&src.addresses);
            self.routes.clone_from(&src.routes);
            self.gateway = src.gateway;
            self.nameservers.clone_from(&src.nameservers);
            self.domains.clone_from(&src.domains);
            self.searches.clone_from(&src.searches);
            self.mss = src.mss;
            self.never_default = src.never_default;
            self.privacy = src.privacy;
        }

        trace!(
            "replaced {} config: relevant [{}], any changed {}",
            F::NAME,
            relevant.summary(),
            any_changed
        );
        ReplaceOutcome {
            relevant,
            any_changed,
        }
    }
}
