//! Address ordering.
//!
//! The address list handed to consumers has a fixed, reproducible order.
//! Keys, each consulted only when all previous ones compare equal:
//!
//! 1. non-tentative before tentative
//! 2. [`AddressClass`](crate::family::AddressClass) bucket, global last
//! 3. privacy preference, if either address takes part in privacy extensions
//! 4. source, highest first
//! 5. permanent before finite lifetime
//! 6. address bytes, then every remaining field

use std::cmp::Ordering;

use crate::family::AddressFamily;
use crate::types::{PlatformAddress, Privacy};

/// Compare two addresses for the address list order.
pub fn compare_addresses<F: AddressFamily>(
    a: &PlatformAddress<F>,
    b: &PlatformAddress<F>,
    privacy: Privacy,
) -> Ordering {
    a.is_tentative()
        .cmp(&b.is_tentative())
        .then_with(|| F::class(&a.address).cmp(&F::class(&b.address)))
        .then_with(|| compare_privacy(a, b, privacy))
        .then_with(|| b.source.cmp(&a.source))
        .then_with(|| b.is_permanent().cmp(&a.is_permanent()))
        .then_with(|| a.address.cmp(&b.address))
        .then_with(|| compare_entry(a, b))
}

fn compare_privacy<F: AddressFamily>(
    a: &PlatformAddress<F>,
    b: &PlatformAddress<F>,
    privacy: Privacy,
) -> Ordering {
    if !a.has_privacy_flags() && !b.has_privacy_flags() {
        return Ordering::Equal;
    }

    // Stable (public) addresses sort first unless temporary ones are preferred.
    let order = a.is_temporary().cmp(&b.is_temporary());
    if privacy == Privacy::PreferTemporary {
        order.reverse()
    } else {
        order
    }
}

fn compare_entry<F: AddressFamily>(a: &PlatformAddress<F>, b: &PlatformAddress<F>) -> Ordering {
    (a.prefix_len, a.timestamp, a.lifetime, a.preferred, a.flags, a.source).cmp(&(
        b.prefix_len,
        b.timestamp,
        b.lifetime,
        b.preferred,
        b.flags,
        b.source,
    ))
}

/// Sort `addresses` in place. Returns `true` if the order changed.
pub fn sort_addresses<F: AddressFamily>(addresses: &mut [PlatformAddress<F>], privacy: Privacy) -> bool {
    if addresses.is_sorted_by(|a, b| compare_addresses(a, b, privacy) != Ordering::Greater) {
        return false;
    }
    addresses.sort_by(|a, b| compare_addresses(a, b, privacy));
    true
}
