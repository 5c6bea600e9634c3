//! Change notification.
//!
//! Every mutating call on [`IpConfig`](super::IpConfig) returns the set of
//! published fields whose value changed. Callers forward these to whatever
//! consumers they serve.

use std::fmt;
use std::ops::{BitOr, BitOrAssign};

/// A published field of an IP configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigField {
    Gateway,
    Addresses,
    Routes,
    Nameservers,
    Domains,
    Searches,
}

impl ConfigField {
    /// All fields, in publication order.
    pub const ALL: [ConfigField; 6] = [
        ConfigField::Gateway,
        ConfigField::Addresses,
        ConfigField::Routes,
        ConfigField::Nameservers,
        ConfigField::Domains,
        ConfigField::Searches,
    ];

    /// Property name as published to consumers.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Gateway => "gateway",
            Self::Addresses => "addresses",
            Self::Routes => "routes",
            Self::Nameservers => "nameservers",
            Self::Domains => "domains",
            Self::Searches => "searches",
        }
    }

    fn bit(self) -> u8 {
        1 << self as u8
    }
}

impl fmt::Display for ConfigField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Set of changed fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ConfigChanges {
    bits: u8,
}

impl ConfigChanges {
    /// No changes.
    pub const fn none() -> Self {
        Self { bits: 0 }
    }

    /// A single changed field.
    pub fn field(field: ConfigField) -> Self {
        Self { bits: field.bit() }
    }

    /// A single field if `changed`, nothing otherwise.
    pub fn field_if(field: ConfigField, changed: bool) -> Self {
        if changed {
            Self::field(field)
        } else {
            Self::none()
        }
    }

    /// Mark a field as changed.
    pub fn insert(&mut self, field: ConfigField) {
        self.bits |= field.bit();
    }

    /// Check if a field changed.
    pub fn contains(&self, field: ConfigField) -> bool {
        self.bits & field.bit() != 0
    }

    /// Check if nothing changed.
    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    /// Number of changed fields.
    pub fn len(&self) -> usize {
        self.bits.count_ones() as usize
    }

    /// Iterate the changed fields in publication order.
    pub fn iter(&self) -> impl Iterator<Item = ConfigField> + '_ {
        ConfigField::ALL.into_iter().filter(|f| self.contains(*f))
    }

    /// Get a human-readable summary of the changes.
    pub fn summary(&self) -> String {
        if self.is_empty() {
            return "no changes".to_string();
        }
        self.iter().map(|f| f.name()).collect::<Vec<_>>().join(", ")
    }
}

impl From<ConfigField> for ConfigChanges {
    fn from(field: ConfigField) -> Self {
        Self::field(field)
    }
}

impl BitOr for ConfigChanges {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self {
            bits: self.bits | rhs.bits,
        }
    }
}

impl BitOrAssign for ConfigChanges {
    fn bitor_assign(&mut self, rhs: Self) {
        self.bits |= rhs.bits;
    }
}

impl FromIterator<ConfigField> for ConfigChanges {
    fn from_iter<I: IntoIterator<Item = ConfigField>>(iter: I) -> Self {
        let mut changes = Self::none();
        for field in iter {
            changes.insert(field);
        }
        changes
    }
}
