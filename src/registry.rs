use std::collections::HashMap;

use compact_str::CompactString;
use thiserror::Error;

use crate::suggestion::did_you_mean;
use crate::unit::Unit;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Unit '{0}' is already registered")]
    EntryExists(String),

    #[error("Unknown identifier '{0}'")]
    UnknownEntry(String, Option<String>),
}

type Result<T> = std::result::Result<T, RegistryError>;

/// The set of units an expression can refer to, keyed by name.
///
/// A unit may be registered under several names (symbol, full name,
/// aliases); each name maps to its own entry and resolves independently.
#[derive(Debug, Clone, Default)]
pub struct UnitRegistry {
    units: HashMap<CompactString, Unit>,
}

impl UnitRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_unit(&mut self, name: &str, unit: Unit) -> Result<()> {
        if self.units.contains_key(name) {
            return Err(RegistryError::EntryExists(name.to_owned()));
        }

        self.units.insert(CompactString::from(name), unit);
        Ok(())
    }

    pub fn lookup(&self, name: &str) -> Result<&Unit> {
        self.units.get(name).ok_or_else(|| {
            RegistryError::UnknownEntry(name.to_owned(), did_you_mean(self.units.keys(), name))
        })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.units.contains_key(name)
    }
}
