//! The type cache written by the type-checking pass.

use std::cell::Cell;

use rustc_hash::FxHashMap;

use super::Ty;
use crate::hir::HirId;

/// Types computed so far, keyed by the node they belong to.
///
/// Probing only reads from the cache. A node that has not been visited by
/// type checking yet simply has no entry.
#[derive(Debug, Default)]
pub struct TypeCheckContext {
    types: FxHashMap<HirId, Ty>,
    /// Error tags are handed out downwards from `u32::MAX` so they never
    /// collide with ids assigned by lowering.
    issued_error_tags: Cell<u32>,
}

impl TypeCheckContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the type of a node, replacing any previous entry.
    pub fn insert_type(&mut self, id: HirId, ty: Ty) {
        self.types.insert(id, ty);
    }

    /// The type of a node, if it has been type-checked.
    pub fn lookup_type(&self, id: HirId) -> Option<&Ty> {
        self.types.get(&id)
    }

    /// A new error type with a tag no other error type carries.
    ///
    /// Bumps the tag counter, the only state probing ever writes. Tags wrap
    /// after `u32::MAX` calls.
    pub fn fresh_error(&self) -> Ty {
        let issued = self.issued_error_tags.get();
        self.issued_error_tags.set(issued.wrapping_add(1));
        Ty::Error(HirId::new(u32::MAX - issued))
    }

    /// Number of typed nodes.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}
