//! JSON rendering of the published configuration fields.
//!
//! Enabled by the `output` feature.

use serde::Serialize;

use crate::config::IpConfig;
use crate::family::AddressFamily;

/// Published view of an address.
#[derive(Debug, Serialize)]
pub struct AddressJson {
    pub address: String,
    pub prefix: u8,
    pub gateway: String,
}

/// Published view of a route.
#[derive(Debug, Serialize)]
pub struct RouteJson {
    pub dest: String,
    pub prefix: u8,
    #[serde(rename = "next-hop")]
    pub next_hop: String,
    pub metric: u32,
}

/// Published view of a configuration.
#[derive(Debug, Serialize)]
pub struct IpConfigJson {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gateway: Option<String>,
    pub addresses: Vec<AddressJson>,
    pub routes: Vec<RouteJson>,
    pub nameservers: Vec<String>,
    pub domains: Vec<String>,
    pub searches: Vec<String>,
}

impl<F: AddressFamily> IpConfig<F> {
    /// Snapshot of the published fields.
    ///
    /// Every address carries the configuration's gateway, or the
    /// unspecified address when there is none.
    pub fn to_json_value(&self) -> IpConfigJson {
        let gateway = self.gateway().unwrap_or(F::UNSPECIFIED).to_string();
        IpConfigJson {
            path: self.export_path().map(str::to_string),
            gateway: self.gateway().map(|gw| gw.to_string()),
            addresses: self
                .addresses()
                .iter()
                .map(|a| AddressJson {
                    address: a.address.to_string(),
                    prefix: a.prefix_len,
                    gateway: gateway.clone(),
                })
                .collect(),
            routes: self
                .routes()
                .iter()
                .map(|r| RouteJson {
                    dest: r.network.to_string(),
                    prefix: r.prefix_len,
                    next_hop: r.gateway.to_string(),
                    metric: r.metric,
                })
                .collect(),
            nameservers: self.nameservers().iter().map(|ns| ns.to_string()).collect(),
            domains: self.domains().to_vec(),
            searches: self.searches().to_vec(),
        }
    }

    /// Render the published fields as JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.to_json_value())
    }

    /// Render the published fields as indented JSON.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.to_json_value())
    }
}
