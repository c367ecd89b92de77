//! Object identity.

use serde::{Deserialize, Serialize};

/// A 64-bit world object identifier.
///
/// Players, creatures, game objects and items all share this id space; the
/// upper bits encode the object kind. A raw value of zero means "nothing".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObjectGuid(pub u64);

impl ObjectGuid {
    /// The empty guid.
    pub const EMPTY: ObjectGuid = ObjectGuid(0);

    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(self) -> u64 {
        self.0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Low 32 bits (the per-kind counter).
    pub fn counter(self) -> u32 {
        (self.0 & 0xFFFF_FFFF) as u32
    }
}

impl From<u64> for ObjectGuid {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

impl std::fmt::Display for ObjectGuid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "0x{:016X}", self.0)
    }
}
