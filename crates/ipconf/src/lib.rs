//! IP configuration state model and reconciliation engine.
//!
//! This crate models the IP configuration of one network interface for one
//! address family (addresses, routes, default gateway, resolver data) and
//! provides the algorithms a network manager needs to keep it consistent:
//! capturing live state, merging contributions from several sources
//! (kernel, DHCP, router discovery, VPN, user settings), withdrawing a
//! contribution, replacing a configuration while classifying the change,
//! and writing the result back.
//!
//! The kernel is reached through the [`Platform`] trait; this crate does no
//! netlink programming of its own.
//!
//! # Features
//!
//! - `output` - JSON rendering of the published fields
//! - `full` - All features enabled
//!
//! # Example
//!
//! ```ignore
//! use ipconf::{InMemoryPlatform, IpConfig, IpSetting, Ipv4, Method, Privacy, ResolvConf};
//!
//! let platform = InMemoryPlatform::<Ipv4>::new();
//! platform.add_link(2);
//!
//! let resolver = ResolvConf::system();
//! let mut config = IpConfig::capture(&platform, 2, Some(&resolver), Privacy::Unknown)
//!     .unwrap_or_default();
//!
//! let setting = IpSetting::<Ipv4>::new(Method::Manual)
//!     .address("192.168.1.10/24")?
//!     .dns("192.168.1.1")?;
//! let changes = config.merge_setting(&setting, 100);
//! for field in changes.iter() {
//!     println!("{} changed", field);
//! }
//!
//! let result = config.commit(&platform, 2);
//! assert!(result.is_success());
//! ```
//!
//! # Change notification
//!
//! Every mutating operation returns a [`ConfigChanges`] set naming the
//! published fields whose value changed. Re-applying identical state
//! returns an empty set, so callers can forward changes without
//! deduplicating them.

pub mod config;
pub mod error;
pub mod export;
pub mod family;
pub mod platform;
pub mod resolv;
pub mod setting;
pub mod types;
pub mod util;

#[cfg(feature = "output")]
pub mod output;

pub use config::{
    CommitResult, ConfigChanges, ConfigField, ConfigProjection, IpConfig, ReplaceOutcome,
};
pub use error::{Error, Result};
pub use export::ExportPathAllocator;
pub use family::{AddressClass, AddressFamily, Ipv4, Ipv6};
pub use platform::{InMemoryPlatform, Platform};
pub use resolv::{NameserverSource, ResolvConf};
pub use setting::{
    AddressParseError, IpSetting, Method, RouteParseError, SettingAddress, SettingRoute,
};
pub use types::{LIFETIME_PERMANENT, PlatformAddress, PlatformRoute, Privacy, Source, ifa_flags};
