//! Common test utilities for integration tests.
//!
//! Provides `TestLink` for a link on an in-memory platform with a unique
//! interface index, address helpers and assertion macros.

#![allow(dead_code)]

use ipconf::{AddressFamily, InMemoryPlatform, PlatformAddress, PlatformRoute, Source};
use std::net::{Ipv4Addr, Ipv6Addr};
use std::sync::Once;
use std::sync::atomic::{AtomicU32, Ordering};
use tracing_subscriber::EnvFilter;

/// Global counter for unique interface indexes.
static IFINDEX_COUNTER: AtomicU32 = AtomicU32::new(100);

static TRACING: Once = Once::new();

/// Install a test-writer subscriber once per test binary.
///
/// Honours `RUST_LOG`; defaults to warnings.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into()),
            )
            .with_test_writer()
            .try_init();
    });
}

/// A link on its own in-memory platform.
///
/// # Example
///
/// ```ignore
/// let link = TestLink::<Ipv4>::new();
/// link.platform.set_routes(link.ifindex, vec![...]);
/// let config = IpConfig::capture(&link.platform, link.ifindex, None, Privacy::Unknown);
/// ```
pub struct TestLink<F: AddressFamily> {
    pub ifindex: u32,
    pub platform: InMemoryPlatform<F>,
}

impl<F: AddressFamily> TestLink<F> {
    /// Create a link with a unique interface index.
    pub fn new() -> Self {
        init_tracing();
        let ifindex = IFINDEX_COUNTER.fetch_add(1, Ordering::SeqCst);
        let platform = InMemoryPlatform::new();
        platform.add_link(ifindex);
        Self { ifindex, platform }
    }

    /// Set the link's live addresses.
    pub fn with_addresses(self, addresses: Vec<PlatformAddress<F>>) -> Self {
        self.platform.set_addresses(self.ifindex, addresses);
        self
    }

    /// Set the link's live routes.
    pub fn with_routes(self, routes: Vec<PlatformRoute<F>>) -> Self {
        self.platform.set_routes(self.ifindex, routes);
        self
    }
}

pub fn v4(s: &str) -> Ipv4Addr {
    s.parse().expect("valid IPv4 literal")
}

pub fn v6(s: &str) -> Ipv6Addr {
    s.parse().expect("valid IPv6 literal")
}

/// Permanent IPv4 address with the given source.
pub fn addr4(s: &str, prefix_len: u8, source: Source) -> PlatformAddress<ipconf::Ipv4> {
    PlatformAddress::new(v4(s), prefix_len).source(source)
}

/// Permanent IPv6 address with the given source.
pub fn addr6(s: &str, prefix_len: u8, source: Source) -> PlatformAddress<ipconf::Ipv6> {
    PlatformAddress::new(v6(s), prefix_len).source(source)
}

/// IPv4 route; `via` of `None` means on-link.
pub fn route4(dst: &str, prefix_len: u8, via: Option<&str>, metric: u32) -> PlatformRoute<ipconf::Ipv4> {
    let route = PlatformRoute::new(v4(dst), prefix_len).metric(metric);
    match via {
        Some(gw) => route.gateway(v4(gw)),
        None => route,
    }
}

/// All permutations of `items` (Heap's algorithm).
pub fn permutations<T: Clone>(items: &[T]) -> Vec<Vec<T>> {
    fn heap<T: Clone>(k: usize, items: &mut Vec<T>, out: &mut Vec<Vec<T>>) {
        if k <= 1 {
            out.push(items.clone());
            return;
        }
        heap(k - 1, items, out);
        for i in 0..k - 1 {
            if k % 2 == 0 {
                items.swap(i, k - 1);
            } else {
                items.swap(0, k - 1);
            }
            heap(k - 1, items, out);
        }
    }

    let mut items = items.to_vec();
    let mut out = Vec::new();
    let len = items.len();
    heap(len, &mut items, &mut out);
    out
}

/// Deterministic pseudo-random index stream.
pub struct Lcg(u64);

impl Lcg {
    pub fn new(seed: u64) -> Self {
        Self(seed)
    }

    pub fn next_below(&mut self, bound: usize) -> usize {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        ((self.0 >> 33) as usize) % bound
    }
}

/// Assert that a `ConfigChanges` contains exactly the listed fields.
#[macro_export]
macro_rules! assert_fields {
    ($changes:expr $(,)?) => {
        assert!($changes.is_empty(), "expected no changes, got {}", $changes.summary());
    };
    ($changes:expr, $($field:ident),+ $(,)?) => {{
        let expected: ipconf::ConfigChanges = [$(ipconf::ConfigField::$field),+].into_iter().collect();
        assert_eq!(
            $changes,
            expected,
            "expected [{}], got [{}]",
            expected.summary(),
            $changes.summary()
        );
    }};
}
