//! Bound probing: which traits does a type implement?

use std::ops::ControlFlow;
use std::sync::Arc;

use tracing::{debug, trace};

use super::{ProbeContext, TraitReference};
use crate::hir::TypePath;
use crate::ty::Ty;

/// Finds every trait a receiver type is known to implement.
///
/// A trait counts when some `impl Trait for SelfTy` block exists whose
/// `SelfTy` is loosely compatible with the receiver. Results follow
/// registry order and are not deduplicated: two blocks implementing the
/// same trait for overlapping types give two entries.
pub struct TypeBoundsProbe<'a> {
    cx: ProbeContext<'a>,
    receiver: &'a Ty,
    trait_references: Vec<Arc<TraitReference>>,
}

impl<'a> TypeBoundsProbe<'a> {
    /// Traits satisfied by `receiver`. Never contains the error sentinel.
    pub fn probe(cx: ProbeContext<'a>, receiver: &'a Ty) -> Vec<Arc<TraitReference>> {
        let mut probe = TypeBoundsProbe {
            cx,
            receiver,
            trait_references: Vec::new(),
        };
        probe.scan();
        probe.trait_references
    }

    fn scan(&mut self) {
        let mappings = self.cx.mappings;
        let mut possible_trait_paths: Vec<&TypePath> = Vec::new();

        mappings.iterate_impl_blocks(|id, block| {
            let Some(trait_path) = &block.trait_ref else {
                return ControlFlow::Continue(());
            };

            let Some(impl_ty) = self.cx.types.lookup_type(block.self_ty.id) else {
                trace!(block = %id, "impl self type not yet type-checked, skipping");
                return ControlFlow::Continue(());
            };

            if !self.receiver.can_eq(impl_ty, false) {
                return ControlFlow::Continue(());
            }

            possible_trait_paths.push(trait_path);
            ControlFlow::Continue(())
        });

        for trait_path in possible_trait_paths {
            let trait_ref = self.cx.traits.resolve_trait_path(trait_path);
            if trait_ref.is_error() {
                trace!(path = %trait_path.as_string(), "dropping unresolved bound");
                continue;
            }
            self.trait_references.push(trait_ref);
        }

        debug!(
            receiver = %self.receiver,
            bounds = self.trait_references.len(),
            "scanned type bounds"
        );
    }
}
