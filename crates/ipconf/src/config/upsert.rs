//! Insert, update and delete operations.
//!
//! Each operation keeps the collection invariants (no duplicate address, no
//! duplicate route destination, no duplicate resolver entry) and reports the
//! fields whose published value changed.

use std::cmp::Ordering;

use tracing::trace;

use super::sort::sort_addresses;
use super::{ConfigChanges, ConfigField, IpConfig};
use crate::family::AddressFamily;
use crate::types::{PlatformAddress, PlatformRoute, Privacy, Source};

/// Combine an existing address entry with a new report of the same address.
///
/// Values and flags come from `new`, the source is the higher of the two.
/// The lifetime triple stays with `old` when `old` expires strictly later,
/// or when `new` is a kernel report for an entry owned by another source
/// that does not extend it.
fn updated_address<F: AddressFamily>(
    old: &PlatformAddress<F>,
    new: &PlatformAddress<F>,
) -> PlatformAddress<F> {
    let keep_lifetime = match old.cmp_expiry(new) {
        Ordering::Greater => true,
        Ordering::Equal => new.source == Source::Kernel && old.source != Source::Kernel,
        Ordering::Less => false,
    };

    let mut merged = *new;
    merged.source = old.source.max(new.source);
    if keep_lifetime {
        merged.timestamp = old.timestamp;
        merged.lifetime = old.lifetime;
        merged.preferred = old.preferred;
    }
    merged
}

fn add_unique<T: PartialEq>(list: &mut Vec<T>, value: T) -> bool {
    if list.contains(&value) {
        return false;
    }
    list.push(value);
    true
}

impl<F: AddressFamily> IpConfig<F> {
    /// Add an address, or update the entry with the same address.
    pub fn add_address(&mut self, new: PlatformAddress<F>) -> ConfigChanges {
        match self.addresses.iter().position(|a| a.address == new.address) {
            Some(i) => {
                let merged = updated_address(&self.addresses[i], &new);
                if merged == self.addresses[i] {
                    trace!("address {} unchanged", new.address);
                    return ConfigChanges::none();
                }
                trace!("address {} updated: {}", new.address, merged);
                self.addresses[i] = merged;
            }
            None => {
                trace!("address {} added", new);
                self.addresses.push(new);
            }
        }
        sort_addresses(&mut self.addresses, self.privacy);
        ConfigChanges::field(ConfigField::Addresses)
    }

    /// Remove the address at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn del_address(&mut self, index: usize) -> ConfigChanges {
        self.addresses.remove(index);
        ConfigChanges::field(ConfigField::Addresses)
    }

    /// Remove all addresses.
    pub fn reset_addresses(&mut self) -> ConfigChanges {
        let changed = !self.addresses.is_empty();
        self.addresses.clear();
        ConfigChanges::field_if(ConfigField::Addresses, changed)
    }

    /// Add a route, or update the entry with the same destination.
    pub fn add_route(&mut self, new: PlatformRoute<F>) -> ConfigChanges {
        match self.routes.iter().position(|r| r.same_destination(&new)) {
            Some(i) => {
                let mut merged = new;
                merged.source = self.routes[i].source.max(new.source);
                if merged == self.routes[i] {
                    trace!("route {}/{} unchanged", new.network, new.prefix_len);
                    return ConfigChanges::none();
                }
                trace!("route {}/{} updated: {}", new.network, new.prefix_len, merged);
                self.routes[i] = merged;
            }
            None => {
                trace!("route {} added", new);
                self.routes.push(new);
            }
        }
        ConfigChanges::field(ConfigField::Routes)
    }

    /// Remove the route at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn del_route(&mut self, index: usize) -> ConfigChanges {
        self.routes.remove(index);
        ConfigChanges::field(ConfigField::Routes)
    }

    /// Remove all routes.
    pub fn reset_routes(&mut self) -> ConfigChanges {
        let changed = !self.routes.is_empty();
        self.routes.clear();
        ConfigChanges::field_if(ConfigField::Routes, changed)
    }

    /// Add a nameserver unless already present.
    pub fn add_nameserver(&mut self, nameserver: F::Addr) -> ConfigChanges {
        ConfigChanges::field_if(
            ConfigField::Nameservers,
            add_unique(&mut self.nameservers, nameserver),
        )
    }

    /// Remove the nameserver at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn del_nameserver(&mut self, index: usize) -> ConfigChanges {
        self.nameservers.remove(index);
        ConfigChanges::field(ConfigField::Nameservers)
    }

    /// Remove all nameservers.
    pub fn reset_nameservers(&mut self) -> ConfigChanges {
        let changed = !self.nameservers.is_empty();
        self.nameservers.clear();
        ConfigChanges::field_if(ConfigField::Nameservers, changed)
    }

    /// Add a DNS domain unless empty or already present.
    pub fn add_domain(&mut self, domain: &str) -> ConfigChanges {
        let added = !domain.is_empty() && add_unique(&mut self.domains, domain.to_string());
        ConfigChanges::field_if(ConfigField::Domains, added)
    }

    /// Remove the domain at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn del_domain(&mut self, index: usize) -> ConfigChanges {
        self.domains.remove(index);
        ConfigChanges::field(ConfigField::Domains)
    }

    /// Remove all domains.
    pub fn reset_domains(&mut self) -> ConfigChanges {
        let changed = !self.domains.is_empty();
        self.domains.clear();
        ConfigChanges::field_if(ConfigField::Domains, changed)
    }

    /// Add a DNS search suffix unless empty or already present.
    pub fn add_search(&mut self, search: &str) -> ConfigChanges {
        let added = !search.is_empty() && add_unique(&mut self.searches, search.to_string());
        ConfigChanges::field_if(ConfigField::Searches, added)
    }

    /// Remove the search suffix at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn del_search(&mut self, index: usize) -> ConfigChanges {
        self.searches.remove(index);
        ConfigChanges::field(ConfigField::Searches)
    }

    /// Remove all search suffixes.
    pub fn reset_searches(&mut self) -> ConfigChanges {
        let changed = !self.searches.is_empty();
        self.searches.clear();
        ConfigChanges::field_if(ConfigField::Searches, changed)
    }

    /// Set the default gateway. The unspecified address clears it.
    pub fn set_gateway(&mut self, gateway: Option<F::Addr>) -> ConfigChanges {
        let gateway = gateway.filter(|gw| !F::is_unspecified(gw));
        let changed = self.gateway != gateway;
        self.gateway = gateway;
        ConfigChanges::field_if(ConfigField::Gateway, changed)
    }

    /// Set the never-default flag.
    pub fn set_never_default(&mut self, never_default: bool) {
        self.never_default = never_default;
    }

    /// Set the MSS override, 0 to unset.
    pub fn set_mss(&mut self, mss: u32) {
        self.mss = mss;
    }

    /// Change the privacy preference and re-sort the addresses.
    pub fn set_privacy(&mut self, privacy: Privacy) -> ConfigChanges {
        self.privacy = privacy;
        self.sort_addresses()
    }

    /// Re-sort the addresses, reporting a change only if the order moved.
    pub fn sort_addresses(&mut self) -> ConfigChanges {
        ConfigChanges::field_if(
            ConfigField::Addresses,
            sort_addresses(&mut self.addresses, self.privacy),
        )
    }

    /// Check if an address with this value and prefix length is present.
    pub fn address_exists(&self, address: &F::Addr, prefix_len: u8) -> bool {
        self.addresses
            .iter()
            .any(|a| a.address == *address && a.prefix_len == prefix_len)
    }

    /// Check if `network/prefix_len` is covered by the prefix route of one
    /// of the addresses.
    ///
    /// Addresses flagged `NOPREFIXROUTE` have no prefix route and never
    /// count.
    pub fn destination_is_direct(&self, network: &F::Addr, prefix_len: u8) -> bool {
        self.addresses.iter().any(|a| {
            a.prefix_len <= prefix_len
                && F::in_prefix(network, &a.address, a.prefix_len)
                && !a.is_noprefixroute()
        })
    }
}
