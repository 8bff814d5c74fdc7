use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a module type in the module catalog.
///
/// Ids start at 1; the built-in catalog numbers its 18 modules `1..=18`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct ModuleId(pub u64);

impl ModuleId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for ModuleId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
