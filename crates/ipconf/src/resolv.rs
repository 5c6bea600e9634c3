//! System resolver snapshot.
//!
//! Capture can import the system's nameservers when the captured link holds
//! the default route. They come from a [`NameserverSource`], normally a
//! [`ResolvConf`].

use std::fs;
use std::net::IpAddr;
use std::path::{Path, PathBuf};

use tracing::trace;
use winnow::ascii::{space0, space1};
use winnow::error::ContextError;
use winnow::prelude::*;
use winnow::token::{literal, take_till};

use crate::error::Result;

/// Result type for winnow parsers.
type PResult<T> = core::result::Result<T, winnow::error::ErrMode<ContextError>>;

/// Source of system nameservers.
pub trait NameserverSource {
    /// Get the configured nameservers, in order.
    fn nameservers(&self) -> Result<Vec<IpAddr>>;
}

#[derive(Debug, Clone)]
enum Origin {
    Path(PathBuf),
    Contents(String),
}

/// A `resolv.conf` file, read on demand, or its contents.
#[derive(Debug, Clone)]
pub struct ResolvConf {
    origin: Origin,
}

impl ResolvConf {
    /// Default location of the system resolver configuration.
    pub const DEFAULT_PATH: &'static str = "/etc/resolv.conf";

    /// The system resolver configuration.
    pub fn system() -> Self {
        Self::from_path(Self::DEFAULT_PATH)
    }

    /// A resolver configuration file at `path`.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self {
            origin: Origin::Path(path.into()),
        }
    }

    /// Resolver configuration text supplied by the caller.
    pub fn from_contents(contents: impl Into<String>) -> Self {
        Self {
            origin: Origin::Contents(contents.into()),
        }
    }

    /// The file path, if this reads a file.
    pub fn path(&self) -> Option<&Path> {
        match &self.origin {
            Origin::Path(path) => Some(path),
            Origin::Contents(_) => None,
        }
    }
}

impl NameserverSource for ResolvConf {
    fn nameservers(&self) -> Result<Vec<IpAddr>> {
        match &self.origin {
            Origin::Path(path) => Ok(parse_nameservers(&fs::read_to_string(path)?)),
            Origin::Contents(contents) => Ok(parse_nameservers(contents)),
        }
    }
}

/// `nameserver <value>`, returning the value.
fn nameserver_value<'i>(input: &mut &'i str) -> PResult<&'i str> {
    space0.parse_next(input)?;
    literal("nameserver").parse_next(input)?;
    space1.parse_next(input)?;
    take_till(1.., |c: char| c.is_whitespace() || c == '#' || c == ';').parse_next(input)
}

/// Extract the nameserver addresses from resolver configuration text.
///
/// Comments, other keywords and values that are not plain IP addresses are
/// skipped.
pub fn parse_nameservers(contents: &str) -> Vec<IpAddr> {
    let mut servers = Vec::new();
    for line in contents.lines() {
        let trimmed = line.trim_start();
        if trimmed.starts_with('#') || trimmed.starts_with(';') {
            continue;
        }

        let mut input = trimmed;
        let Ok(value) = nameserver_value(&mut input) else {
            continue;
        };
        match value.parse::<IpAddr>() {
            Ok(addr) => servers.push(addr),
            Err(_) => trace!("skipping nameserver entry {:?}", value),
        }
    }
    servers
}
