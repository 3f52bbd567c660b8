//! Identifiers for HIR nodes.

use std::fmt;

/// Identifier of a HIR node: a declaration, an item, or a type annotation.
///
/// Ids are handed out by the lowering pass and stay valid for the whole
/// compilation. Resolution values refer to declarations only through these
/// handles, never by owning the node.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct HirId(pub u32);

impl HirId {
    /// Create a new HirId.
    #[inline]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw index.
    #[inline]
    pub const fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for HirId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HirId({})", self.0)
    }
}

impl fmt::Display for HirId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HirId({})", self.0)
    }
}

impl From<u32> for HirId {
    #[inline]
    fn from(id: u32) -> Self {
        Self(id)
    }
}
