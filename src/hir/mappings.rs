//! The declaration registry.
//!
//! [`Mappings`] is the single source of truth for every `impl` block,
//! impl item, trait and trait item known to the compilation, plus the
//! name-resolution table that says which declaration a path node points
//! at. It is populated by lowering and then only read by the probes.
//!
//! Blocks and items are kept in `IndexMap`s so iteration follows
//! registration order, which makes probe results deterministic for a
//! given registry.

use std::ops::ControlFlow;

use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use tracing::trace;

use super::{HirId, ImplBlock, ImplItem, Trait, TraitItem};
use crate::error::{RegistryError, Result};

/// Registry of all lowered declarations.
#[derive(Clone, Debug, Default)]
pub struct Mappings {
    /// Impl blocks by id, in registration order.
    impl_blocks: IndexMap<HirId, ImplBlock>,
    /// Impl item id -> (owning block id, index into the block's items).
    impl_items: IndexMap<HirId, (HirId, usize)>,
    /// Traits by id, in registration order.
    traits: IndexMap<HirId, Trait>,
    /// Trait item id -> (owning trait id, index into the trait's items).
    trait_items: FxHashMap<HirId, (HirId, usize)>,
    /// Path node id -> id of the declaration it resolves to.
    resolved_paths: FxHashMap<HirId, HirId>,
}

impl Mappings {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // REGISTRATION
    // ========================================================================

    /// Register an impl block together with all of its items.
    ///
    /// Nothing is inserted if the block id or any item id is already taken.
    pub fn insert_impl_block(&mut self, block: ImplBlock) -> Result<()> {
        if self.impl_blocks.contains_key(&block.id) {
            return Err(RegistryError::DuplicateImplBlock(block.id));
        }
        for (idx, item) in block.items.iter().enumerate() {
            if let Some(&(owner, _)) = self.impl_items.get(&item.id) {
                return Err(RegistryError::DuplicateImplItem { item: item.id, owner });
            }
            if block.items[..idx].iter().any(|prev| prev.id == item.id) {
                return Err(RegistryError::DuplicateImplItem {
                    item: item.id,
                    owner: block.id,
                });
            }
        }

        trace!(block = %block.id, items = block.items.len(), "registering impl block");
        for (idx, item) in block.items.iter().enumerate() {
            self.impl_items.insert(item.id, (block.id, idx));
        }
        self.impl_blocks.insert(block.id, block);
        Ok(())
    }

    /// Register a trait together with all of its items.
    pub fn insert_trait(&mut self, def: Trait) -> Result<()> {
        if self.traits.contains_key(&def.id) {
            return Err(RegistryError::DuplicateTrait(def.id));
        }
        for (idx, item) in def.items.iter().enumerate() {
            if let Some(&(owner, _)) = self.trait_items.get(&item.id) {
                return Err(RegistryError::DuplicateTraitItem { item: item.id, owner });
            }
            if def.items[..idx].iter().any(|prev| prev.id == item.id) {
                return Err(RegistryError::DuplicateTraitItem {
                    item: item.id,
                    owner: def.id,
                });
            }
        }

        trace!(trait_id = %def.id, name = %def.name, "registering trait");
        for (idx, item) in def.items.iter().enumerate() {
            self.trait_items.insert(item.id, (def.id, idx));
        }
        self.traits.insert(def.id, def);
        Ok(())
    }

    /// Record that the path node `path` resolves to the declaration `target`.
    ///
    /// Later records for the same path replace earlier ones.
    pub fn insert_resolved_path(&mut self, path: HirId, target: HirId) {
        self.resolved_paths.insert(path, target);
    }

    // ========================================================================
    // LOOKUP
    // ========================================================================

    /// Look up an impl block by id.
    pub fn lookup_impl_block(&self, id: HirId) -> Option<&ImplBlock> {
        self.impl_blocks.get(&id)
    }

    /// Look up an impl item and the block that owns it.
    pub fn lookup_impl_item(&self, id: HirId) -> Option<(&ImplItem, &ImplBlock)> {
        let &(owner, idx) = self.impl_items.get(&id)?;
        let block = self.impl_blocks.get(&owner)?;
        block.items.get(idx).map(|item| (item, block))
    }

    /// Look up a trait by id.
    pub fn lookup_trait(&self, id: HirId) -> Option<&Trait> {
        self.traits.get(&id)
    }

    /// Look up a trait item and the trait that owns it.
    pub fn lookup_trait_item(&self, id: HirId) -> Option<(&TraitItem, &Trait)> {
        let &(owner, idx) = self.trait_items.get(&id)?;
        let def = self.traits.get(&owner)?;
        def.items.get(idx).map(|item| (item, def))
    }

    /// The declaration a path node resolves to, if name resolution found one.
    pub fn lookup_resolved_path(&self, path: HirId) -> Option<HirId> {
        self.resolved_paths.get(&path).copied()
    }

    // ========================================================================
    // ITERATION
    // ========================================================================

    /// Visit every impl block in registration order.
    ///
    /// Stops as soon as the visitor returns `ControlFlow::Break`.
    pub fn iterate_impl_blocks<'m, F>(&'m self, mut visit: F)
    where
        F: FnMut(HirId, &'m ImplBlock) -> ControlFlow<()>,
    {
        for (&id, block) in &self.impl_blocks {
            if visit(id, block).is_break() {
                return;
            }
        }
    }

    /// Visit every impl item with its owning block, in registration order.
    ///
    /// Stops as soon as the visitor returns `ControlFlow::Break`.
    pub fn iterate_impl_items<'m, F>(&'m self, mut visit: F)
    where
        F: FnMut(HirId, &'m ImplItem, &'m ImplBlock) -> ControlFlow<()>,
    {
        for (&id, &(owner, idx)) in &self.impl_items {
            let Some(block) = self.impl_blocks.get(&owner) else {
                continue;
            };
            let Some(item) = block.items.get(idx) else {
                continue;
            };
            if visit(id, item, block).is_break() {
                return;
            }
        }
    }

    /// Number of registered impl blocks.
    pub fn impl_block_count(&self) -> usize {
        self.impl_blocks.len()
    }

    /// Number of registered impl items across all blocks.
    pub fn impl_item_count(&self) -> usize {
        self.impl_items.len()
    }

    /// Number of registered traits.
    pub fn trait_count(&self) -> usize {
        self.traits.len()
    }
}
