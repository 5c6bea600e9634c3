//! Platform abstraction.
//!
//! The engine never talks to the kernel itself. Capture reads live state and
//! commit writes desired state through a [`Platform`] implementation; a
//! netlink-backed one lives outside this crate. [`InMemoryPlatform`] keeps
//! per-link tables in memory.

mod memory;

pub use memory::InMemoryPlatform;

use crate::error::Result;
use crate::family::AddressFamily;
use crate::types::{PlatformAddress, PlatformRoute};

/// Access to the addresses and routes of one address family.
pub trait Platform<F: AddressFamily> {
    /// Check if the link is enslaved to a master (bond, bridge, team).
    fn link_has_master(&self, ifindex: u32) -> Result<bool>;

    /// Get the addresses currently assigned to the link.
    fn addresses(&self, ifindex: u32) -> Result<Vec<PlatformAddress<F>>>;

    /// Get the routes currently going through the link.
    fn routes(&self, ifindex: u32) -> Result<Vec<PlatformRoute<F>>>;

    /// Make the link's addresses exactly `addresses`.
    fn sync_addresses(&self, ifindex: u32, addresses: &[PlatformAddress<F>]) -> Result<()>;

    /// Make the link's routes exactly `routes`.
    fn sync_routes(&self, ifindex: u32, routes: &[PlatformRoute<F>]) -> Result<()>;
}
