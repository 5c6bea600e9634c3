//! Writing a configuration to the platform.

use tracing::{debug, warn};

use super::IpConfig;
use crate::family::AddressFamily;
use crate::platform::Platform;
use crate::types::PlatformRoute;

/// Result of [`IpConfig::commit`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CommitResult {
    /// Whether the address sync succeeded.
    pub addresses: bool,
    /// Whether the route sync succeeded.
    pub routes: bool,
}

impl CommitResult {
    /// Check if both syncs succeeded.
    pub fn is_success(&self) -> bool {
        self.addresses && self.routes
    }
}

impl<F: AddressFamily> IpConfig<F> {
    /// Routes to install for this configuration.
    ///
    /// Leaves out on-link routes the kernel already installs as prefix
    /// routes of the addresses, and default routes when this configuration
    /// must never supply one.
    pub fn routes_to_commit(&self) -> Vec<PlatformRoute<F>> {
        self.routes
            .iter()
            .filter(|route| {
                route.has_gateway() || !self.destination_is_direct(&route.network, route.prefix_len)
            })
            .filter(|route| !self.never_default || route.prefix_len != 0)
            .copied()
            .collect()
    }

    /// Push the addresses and routes to the link.
    ///
    /// Failures are logged and reported in the result. Nothing is rolled
    /// back.
    pub fn commit<P>(&self, platform: &P, ifindex: u32) -> CommitResult
    where
        P: Platform<F> + ?Sized,
    {
        let addresses = match platform.sync_addresses(ifindex, &self.addresses) {
            Ok(()) => true,
            Err(e) => {
                warn!("ifindex {}: failed to sync {} addresses: {}", ifindex, F::NAME, e);
                false
            }
        };

        let routes = self.routes_to_commit();
        debug!(
            "ifindex {}: committing {} of {} {} routes",
            ifindex,
            routes.len(),
            self.routes.len(),
            F::NAME
        );
        let routes = match platform.sync_routes(ifindex, &routes) {
            Ok(()) => true,
            Err(e) => {
                warn!("ifindex {}: failed to sync {} routes: {}", ifindex, F::NAME, e);
                false
            }
        };

        CommitResult { addresses, routes }
    }
}
