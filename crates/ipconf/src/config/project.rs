//! Deriving a declared setting from a configuration.

use super::IpConfig;
use crate::family::AddressFamily;
use crate::setting::{IpSetting, Method, SettingAddress, SettingRoute};
use crate::types::Source;

impl<F: AddressFamily> IpConfig<F> {
    /// Describe this configuration as a declared setting.
    ///
    /// The method is inferred from the addresses in list order:
    /// link-local addresses imply [`Method::LinkLocal`], finite lifetimes
    /// imply [`Method::Auto`], and permanent addresses imply
    /// [`Method::Manual`] unless a stronger method was already seen. Only
    /// permanent, non-link-local addresses are emitted, each carrying the
    /// configuration's gateway. Only user routes are emitted, except
    /// link-local and default ones.
    pub fn to_setting(&self) -> IpSetting<F> {
        let mut setting = IpSetting::new(Method::Disabled);
        let mut method = None;

        for addr in &self.addresses {
            if F::is_link_local(&addr.address) {
                method.get_or_insert(Method::LinkLocal);
                continue;
            }
            if !addr.is_permanent() {
                method = Some(Method::Auto);
                continue;
            }
            if matches!(method, None | Some(Method::LinkLocal)) {
                method = Some(Method::Manual);
            }
            setting.push_address(SettingAddress {
                address: addr.address,
                prefix_len: addr.prefix_len,
                gateway: self.gateway,
            });
        }
        setting.set_method(method.unwrap_or(Method::Disabled));

        for route in &self.routes {
            if F::is_link_local(&route.network) || route.prefix_len == 0 || route.source != Source::User {
                continue;
            }
            setting.push_route(SettingRoute {
                destination: route.network,
                prefix_len: route.prefix_len,
                next_hop: route.has_gateway().then_some(route.gateway),
                metric: route.metric,
            });
        }

        for ns in &self.nameservers {
            setting.push_dns(*ns);
        }
        for search in &self.searches {
            setting = setting.dns_search(search);
        }

        setting
    }
}
