//! In-memory platform.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use super::Platform;
use crate::error::{Error, Result};
use crate::family::AddressFamily;
use crate::types::{PlatformAddress, PlatformRoute};

#[derive(Debug)]
struct Link<F: AddressFamily> {
    master: Option<u32>,
    addresses: Vec<PlatformAddress<F>>,
    routes: Vec<PlatformRoute<F>>,
}

impl<F: AddressFamily> Default for Link<F> {
    fn default() -> Self {
        Self {
            master: None,
            addresses: Vec::new(),
            routes: Vec::new(),
        }
    }
}

#[derive(Debug)]
struct State<F: AddressFamily> {
    links: HashMap<u32, Link<F>>,
    fail_reads: bool,
    fail_writes: bool,
}

/// Platform keeping per-link address and route tables in memory.
///
/// Syncing replaces a link's table wholesale. Reads and writes can be made
/// to fail for exercising error paths.
///
/// # Example
///
/// ```ignore
/// use ipconf::{InMemoryPlatform, Ipv4, PlatformRoute};
/// use std::net::Ipv4Addr;
///
/// let platform = InMemoryPlatform::<Ipv4>::new();
/// platform.add_link(2);
/// platform.set_routes(2, vec![PlatformRoute::default_via(Ipv4Addr::new(10, 0, 0, 1), 100)]);
/// ```
#[derive(Debug)]
pub struct InMemoryPlatform<F: AddressFamily> {
    state: Mutex<State<F>>,
}

impl<F: AddressFamily> Default for InMemoryPlatform<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: AddressFamily> InMemoryPlatform<F> {
    /// Create a platform without links.
    pub fn new() -> Self {
        Self {
            state: Mutex::new(State {
                links: HashMap::new(),
                fail_reads: false,
                fail_writes: false,
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, State<F>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Add a link without addresses or routes.
    pub fn add_link(&self, ifindex: u32) {
        self.lock().links.entry(ifindex).or_default();
    }

    /// Add a link enslaved to `master`.
    pub fn add_slave(&self, ifindex: u32, master: u32) {
        self.lock().links.entry(ifindex).or_default().master = Some(master);
    }

    /// Remove a link.
    pub fn remove_link(&self, ifindex: u32) {
        self.lock().links.remove(&ifindex);
    }

    /// Replace a link's addresses, adding the link if needed.
    pub fn set_addresses(&self, ifindex: u32, addresses: Vec<PlatformAddress<F>>) {
        self.lock().links.entry(ifindex).or_default().addresses = addresses;
    }

    /// Replace a link's routes, adding the link if needed.
    pub fn set_routes(&self, ifindex: u32, routes: Vec<PlatformRoute<F>>) {
        self.lock().links.entry(ifindex).or_default().routes = routes;
    }

    /// Snapshot of a link's addresses (empty for unknown links).
    pub fn link_addresses(&self, ifindex: u32) -> Vec<PlatformAddress<F>> {
        self.lock()
            .links
            .get(&ifindex)
            .map(|l| l.addresses.clone())
            .unwrap_or_default()
    }

    /// Snapshot of a link's routes (empty for unknown links).
    pub fn link_routes(&self, ifindex: u32) -> Vec<PlatformRoute<F>> {
        self.lock()
            .links
            .get(&ifindex)
            .map(|l| l.routes.clone())
            .unwrap_or_default()
    }

    /// Make every read fail.
    pub fn fail_reads(&self, fail: bool) {
        self.lock().fail_reads = fail;
    }

    /// Make every sync fail.
    pub fn fail_writes(&self, fail: bool) {
        self.lock().fail_writes = fail;
    }

    fn read<T>(&self, ifindex: u32, operation: &str, f: impl FnOnce(&Link<F>) -> T) -> Result<T> {
        let state = self.lock();
        if state.fail_reads {
            return Err(Error::platform("read refused").with_context(operation));
        }
        state
            .links
            .get(&ifindex)
            .map(f)
            .ok_or(Error::LinkNotFound { ifindex })
    }

    fn write(&self, ifindex: u32, operation: &str, f: impl FnOnce(&mut Link<F>)) -> Result<()> {
        let mut state = self.lock();
        if state.fail_writes {
            return Err(Error::platform("write refused").with_context(operation));
        }
        let link = state
            .links
            .get_mut(&ifindex)
            .ok_or(Error::LinkNotFound { ifindex })?;
        f(link);
        Ok(())
    }
}

impl<F: AddressFamily> Platform<F> for InMemoryPlatform<F> {
    fn link_has_master(&self, ifindex: u32) -> Result<bool> {
        self.read(ifindex, "get link", |l| l.master.is_some())
    }

    fn addresses(&self, ifindex: u32) -> Result<Vec<PlatformAddress<F>>> {
        self.read(ifindex, "get addresses", |l| l.addresses.clone())
    }

    fn routes(&self, ifindex: u32) -> Result<Vec<PlatformRoute<F>>> {
        self.read(ifindex, "get routes", |l| l.routes.clone())
    }

    fn sync_addresses(&self, ifindex: u32, addresses: &[PlatformAddress<F>]) -> Result<()> {
        self.write(ifindex, "sync addresses", |l| l.addresses = addresses.to_vec())
    }

    fn sync_routes(&self, ifindex: u32, routes: &[PlatformRoute<F>]) -> Result<()> {
        self.write(ifindex, "sync routes", |l| l.routes = routes.to_vec())
    }
}
