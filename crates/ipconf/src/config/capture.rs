//! Building a configuration from live platform state.

use tracing::{debug, warn};

use super::IpConfig;
use super::sort::sort_addresses;
use crate::family::AddressFamily;
use crate::platform::Platform;
use crate::resolv::NameserverSource;
use crate::types::Privacy;

impl<F: AddressFamily> IpConfig<F> {
    /// Capture the live configuration of a link.
    ///
    /// The default routes are folded into the gateway (lowest metric wins,
    /// first seen on ties) and the on-link host route to that gateway is
    /// dropped. When `resolver` is given and the link has addresses and a
    /// default route, the resolver's nameservers of this family are imported.
    ///
    /// Returns `None` for links enslaved to a master. Platform read errors
    /// are logged and treated as empty state.
    pub fn capture<P>(
        platform: &P,
        ifindex: u32,
        resolver: Option<&dyn NameserverSource>,
        privacy: Privacy,
    ) -> Option<Self>
    where
        P: Platform<F> + ?Sized,
    {
        let has_master = platform.link_has_master(ifindex).unwrap_or_else(|e| {
            warn!("ifindex {}: failed to query master: {}", ifindex, e);
            false
        });
        if has_master {
            debug!("ifindex {}: link has a master, no {} config", ifindex, F::NAME);
            return None;
        }

        let mut config = Self::with_privacy(privacy);
        config.addresses = platform.addresses(ifindex).unwrap_or_else(|e| {
            warn!("ifindex {}: failed to read {} addresses: {}", ifindex, F::NAME, e);
            Vec::new()
        });
        config.routes = platform.routes(ifindex).unwrap_or_else(|e| {
            warn!("ifindex {}: failed to read {} routes: {}", ifindex, F::NAME, e);
            Vec::new()
        });

        let mut default_route: Option<(F::Addr, u32)> = None;
        config.routes.retain(|route| {
            if !route.is_default() {
                return true;
            }
            if default_route.is_none_or(|(_, metric)| route.metric < metric) {
                default_route = Some((route.gateway, route.metric));
            }
            false
        });

        if let Some((gateway, _)) = default_route {
            config.routes.retain(|route| {
                !(route.prefix_len == F::MAX_PREFIX
                    && route.network == gateway
                    && !route.has_gateway())
            });
            config.set_gateway(Some(gateway));
        }

        if let Some(resolver) = resolver
            && default_route.is_some()
            && !config.addresses.is_empty()
        {
            match resolver.nameservers() {
                Ok(servers) => {
                    let before = config.nameservers.len();
                    for ns in servers.into_iter().filter_map(F::from_ip) {
                        if !F::is_unspecified(&ns) {
                            config.add_nameserver(ns);
                        }
                    }
                    debug!(
                        "ifindex {}: imported {} {} nameservers",
                        ifindex,
                        config.nameservers.len() - before,
                        F::NAME
                    );
                }
                Err(e) => warn!("ifindex {}: failed to read nameservers: {}", ifindex, e),
            }
        }

        sort_addresses(&mut config.addresses, privacy);
        Some(config)
    }
}
