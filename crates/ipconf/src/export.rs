//! Object path allocation for published configurations.

use std::sync::atomic::{AtomicU32, Ordering};

use crate::config::IpConfig;
use crate::family::AddressFamily;

/// Hands out unique object paths.
///
/// One allocator is shared by everything that exports configurations. Paths
/// are `<prefix>/<n>` with `n` counting up from 0 across all families.
#[derive(Debug, Default)]
pub struct ExportPathAllocator {
    prefix: Option<String>,
    next: AtomicU32,
}

impl ExportPathAllocator {
    /// Allocator using each family's default prefix.
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocator using `prefix` for every family.
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: Some(prefix.into()),
            next: AtomicU32::new(0),
        }
    }

    /// Allocate the next path for family `F`.
    pub fn allocate<F: AddressFamily>(&self) -> String {
        let id = self.next.fetch_add(1, Ordering::Relaxed);
        let prefix = self.prefix.as_deref().unwrap_or(F::EXPORT_PREFIX);
        format!("{}/{}", prefix.trim_end_matches('/'), id)
    }
}

impl<F: AddressFamily> IpConfig<F> {
    /// Assign an object path, once. Later calls return the same path.
    pub fn export(&mut self, allocator: &ExportPathAllocator) -> &str {
        if self.export_path().is_none() {
            self.set_export_path(allocator.allocate::<F>());
        }
        self.export_path().unwrap_or_default()
    }
}
