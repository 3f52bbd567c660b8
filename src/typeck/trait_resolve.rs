//! Trait-path resolution.
//!
//! Turns the trait path of an `impl Trait for Ty` block into a
//! [`TraitReference`]. Name resolution has already recorded which
//! declaration the path points at; this layer builds the per-item view of
//! that trait once and hands out shared copies afterwards.

use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use tracing::trace;

use super::{TraitItemReference, TraitItemType, TraitReference};
use crate::hir::{HirId, Mappings, Trait, TypePath};
use crate::ty::{mappings_for, Ty};

/// Resolves trait paths to trait references.
///
/// Unresolvable paths yield [`TraitReference::error_node`], never a panic.
pub trait ResolveTraitPath {
    fn resolve_trait_path(&self, path: &TypePath) -> Arc<TraitReference>;
}

/// Memoizing resolver over a [`Mappings`] registry.
///
/// References are cached per trait declaration, so two different paths
/// naming the same trait share one [`TraitReference`].
pub struct TraitResolver<'a> {
    mappings: &'a Mappings,
    cache: RwLock<FxHashMap<HirId, Arc<TraitReference>>>,
}

impl<'a> TraitResolver<'a> {
    pub fn new(mappings: &'a Mappings) -> Self {
        Self {
            mappings,
            cache: RwLock::new(FxHashMap::default()),
        }
    }

    /// Resolve a trait by its declaration id.
    pub fn resolve_trait(&self, trait_id: HirId) -> Arc<TraitReference> {
        // Fast path: already built (read lock)
        if let Some(cached) = self.cache.read().get(&trait_id) {
            return Arc::clone(cached);
        }

        let Some(def) = self.mappings.lookup_trait(trait_id) else {
            trace!(target_id = %trait_id, "path target is not a trait");
            return TraitReference::error_node();
        };

        // Slow path: build and insert (write lock), keeping a racing entry
        let mut cache = self.cache.write();
        Arc::clone(
            cache
                .entry(trait_id)
                .or_insert_with(|| Arc::new(build_trait_reference(def))),
        )
    }

    /// Number of traits resolved so far.
    pub fn cached_count(&self) -> usize {
        self.cache.read().len()
    }
}

impl ResolveTraitPath for TraitResolver<'_> {
    fn resolve_trait_path(&self, path: &TypePath) -> Arc<TraitReference> {
        match self.mappings.lookup_resolved_path(path.id) {
            Some(target) => self.resolve_trait(target),
            None => {
                trace!(path = %path.as_string(), "trait path was not resolved");
                TraitReference::error_node()
            }
        }
    }
}

/// Build the item view of a trait declaration.
///
/// Every item shares the trait's implicit `Self` parameter and inherits the
/// trait's own generic parameters.
pub fn build_trait_reference(def: &Trait) -> TraitReference {
    let self_ty = Ty::param(def.id, "Self");
    let inherited = mappings_for(&def.generics);

    let items = def
        .items
        .iter()
        .map(|item| {
            TraitItemReference::new(
                item.name.clone(),
                item.has_default(),
                TraitItemType::of(&item.kind),
                item.id,
                self_ty.clone(),
                inherited.clone(),
                item.location,
            )
        })
        .collect();

    TraitReference::new(def.id, def.name.clone(), def.location, items)
}
