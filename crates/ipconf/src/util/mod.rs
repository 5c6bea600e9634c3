//! Shared utilities for ipconf.

pub mod addr;

pub use addr::{ipv4_in_prefix, ipv6_in_prefix, parse_addr, parse_prefix};
