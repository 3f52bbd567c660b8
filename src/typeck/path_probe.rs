//! Path probing: what can `Receiver::name` refer to?
//!
//! [`PathProbeType`] collects every declaration an identifier could name
//! given a receiver type, from two sources:
//!
//! 1. **Impl items** - items of any `impl` block whose self type is loosely
//!    compatible with the receiver.
//! 2. **Trait defaults** - optional (default-bodied) items of the traits
//!    the receiver implements, as found by [`TypeBoundsProbe`].
//!
//! No candidate is preferred over another. Callers classify the result
//! with [`PathProbeResult`] and report ambiguity themselves.

use std::fmt;
use std::ops::ControlFlow;
use std::sync::Arc;

use tracing::{debug, trace};

use super::{ProbeContext, TraitItemReference, TraitItemType, TraitReference, TypeBoundsProbe};
use crate::hir::{HirId, ImplBlock, ImplItem, ImplItemKind};
use crate::ty::Ty;

// ============================================================================
// CANDIDATES
// ============================================================================

/// An item declared in an `impl` block that matched the query.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImplItemCandidate {
    /// The matched item.
    pub item: HirId,
    /// The `impl` block owning it.
    pub parent: HirId,
    /// The item's type as computed by the type checker.
    pub ty: Ty,
}

/// A default-bodied trait item reachable through a satisfied bound.
#[derive(Clone, Debug)]
pub struct TraitItemCandidate {
    trait_ref: Arc<TraitReference>,
    item_index: usize,
    ty: Ty,
}

impl TraitItemCandidate {
    /// The trait the receiver satisfies.
    pub fn trait_ref(&self) -> &TraitReference {
        &self.trait_ref
    }

    /// The matched item of that trait.
    pub fn item_ref(&self) -> &TraitItemReference {
        &self.trait_ref.trait_items()[self.item_index]
    }

    pub fn ty(&self) -> &Ty {
        &self.ty
    }
}

impl PartialEq for TraitItemCandidate {
    fn eq(&self, other: &Self) -> bool {
        self.trait_ref.trait_id() == other.trait_ref.trait_id()
            && self.item_index == other.item_index
            && self.ty == other.ty
    }
}

impl Eq for TraitItemCandidate {}

/// Discriminant of a [`PathProbeCandidate`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum CandidateKind {
    ImplConst,
    ImplTypeAlias,
    ImplFunc,
    TraitItemConst,
    TraitTypeAlias,
    TraitFunc,
}

/// One possible resolution of a path segment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PathProbeCandidate {
    ImplConst(ImplItemCandidate),
    ImplTypeAlias(ImplItemCandidate),
    ImplFunc(ImplItemCandidate),
    TraitItemConst(TraitItemCandidate),
    TraitTypeAlias(TraitItemCandidate),
    TraitFunc(TraitItemCandidate),
}

impl PathProbeCandidate {
    pub fn kind(&self) -> CandidateKind {
        match self {
            PathProbeCandidate::ImplConst(_) => CandidateKind::ImplConst,
            PathProbeCandidate::ImplTypeAlias(_) => CandidateKind::ImplTypeAlias,
            PathProbeCandidate::ImplFunc(_) => CandidateKind::ImplFunc,
            PathProbeCandidate::TraitItemConst(_) => CandidateKind::TraitItemConst,
            PathProbeCandidate::TraitTypeAlias(_) => CandidateKind::TraitTypeAlias,
            PathProbeCandidate::TraitFunc(_) => CandidateKind::TraitFunc,
        }
    }

    /// The candidate's resolved type.
    pub fn ty(&self) -> &Ty {
        match self {
            PathProbeCandidate::ImplConst(c)
            | PathProbeCandidate::ImplTypeAlias(c)
            | PathProbeCandidate::ImplFunc(c) => &c.ty,
            PathProbeCandidate::TraitItemConst(c)
            | PathProbeCandidate::TraitTypeAlias(c)
            | PathProbeCandidate::TraitFunc(c) => &c.ty,
        }
    }

    /// The impl payload, for the three impl variants.
    pub fn as_impl(&self) -> Option<&ImplItemCandidate> {
        match self {
            PathProbeCandidate::ImplConst(c)
            | PathProbeCandidate::ImplTypeAlias(c)
            | PathProbeCandidate::ImplFunc(c) => Some(c),
            _ => None,
        }
    }

    /// The trait payload, for the three trait variants.
    pub fn as_trait(&self) -> Option<&TraitItemCandidate> {
        match self {
            PathProbeCandidate::TraitItemConst(c)
            | PathProbeCandidate::TraitTypeAlias(c)
            | PathProbeCandidate::TraitFunc(c) => Some(c),
            _ => None,
        }
    }

    pub fn is_impl_candidate(&self) -> bool {
        self.as_impl().is_some()
    }

    pub fn is_trait_candidate(&self) -> bool {
        self.as_trait().is_some()
    }
}

impl fmt::Display for PathProbeCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.as_impl(), self.as_trait()) {
            (Some(c), _) => write!(f, "{:?} {} in impl {}: {}", self.kind(), c.item, c.parent, c.ty),
            (_, Some(c)) => write!(
                f,
                "{:?} {} from trait {}: {}",
                self.kind(),
                c.item_ref(),
                c.trait_ref().name(),
                c.ty
            ),
            (None, None) => unreachable!(),
        }
    }
}

// ============================================================================
// RESULT
// ============================================================================

/// Classification of a probe's candidates.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PathProbeResult {
    /// No declaration matched.
    NotFound,
    /// Exactly one declaration matched.
    Unique(PathProbeCandidate),
    /// Two or more declarations matched.
    Ambiguous(Vec<PathProbeCandidate>),
}

impl PathProbeResult {
    pub fn from_candidates(mut candidates: Vec<PathProbeCandidate>) -> Self {
        match candidates.len() {
            0 => PathProbeResult::NotFound,
            1 => PathProbeResult::Unique(candidates.remove(0)),
            _ => PathProbeResult::Ambiguous(candidates),
        }
    }

    /// The candidate if resolution was unique.
    pub fn candidate(&self) -> Option<&PathProbeCandidate> {
        match self {
            PathProbeResult::Unique(c) => Some(c),
            _ => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, PathProbeResult::Unique(_))
    }

    pub fn is_ambiguous(&self) -> bool {
        matches!(self, PathProbeResult::Ambiguous(_))
    }
}

// ============================================================================
// PROBE
// ============================================================================

/// Candidate generator for `receiver::segment`.
pub struct PathProbeType<'a> {
    cx: ProbeContext<'a>,
    receiver: &'a Ty,
    search: &'a str,
    candidates: Vec<PathProbeCandidate>,
}

impl<'a> PathProbeType<'a> {
    /// Every declaration `segment` could name on `receiver`.
    ///
    /// Impl items come first, then trait defaults, each in registry order.
    pub fn probe(cx: ProbeContext<'a>, receiver: &'a Ty, segment: &'a str) -> Vec<PathProbeCandidate> {
        let mut probe = PathProbeType {
            cx,
            receiver,
            search: segment,
            candidates: Vec::new(),
        };
        probe.process_impl_items_for_candidates();
        probe.process_traits_for_candidates(TypeBoundsProbe::probe(cx, receiver));

        debug!(
            receiver = %receiver,
            segment,
            candidates = probe.candidates.len(),
            "probed path"
        );
        probe.candidates
    }

    fn process_impl_items_for_candidates(&mut self) {
        let mappings = self.cx.mappings;
        mappings.iterate_impl_items(|_, item, block| {
            self.process_impl_item_candidate(item, block);
            ControlFlow::Continue(())
        });
    }

    fn process_impl_item_candidate(&mut self, item: &ImplItem, block: &ImplBlock) {
        let Some(impl_block_ty) = self.cx.types.lookup_type(block.self_ty.id) else {
            trace!(block = %block.id, "impl self type not yet type-checked, skipping");
            return;
        };
        if !self.receiver.can_eq(impl_block_ty, false) {
            return;
        }
        if item.name != self.search {
            return;
        }

        let Some(ty) = self.cx.types.lookup_type(item.id) else {
            trace!(item = %item.id, "impl item not yet type-checked, skipping");
            return;
        };

        let candidate = ImplItemCandidate {
            item: item.id,
            parent: block.id,
            ty: ty.clone(),
        };
        self.candidates.push(match item.kind {
            ImplItemKind::Constant => PathProbeCandidate::ImplConst(candidate),
            ImplItemKind::TypeAlias => PathProbeCandidate::ImplTypeAlias(candidate),
            ImplItemKind::Function => PathProbeCandidate::ImplFunc(candidate),
        });
    }

    fn process_traits_for_candidates(&mut self, traits: Vec<Arc<TraitReference>>) {
        for trait_ref in traits {
            let Some(item_index) = trait_ref.position_of(self.search) else {
                continue;
            };
            let item_ref = &trait_ref.trait_items()[item_index];

            // Only items the trait provides a default for resolve this way
            if !item_ref.is_optional() {
                trace!(
                    trait_name = trait_ref.name(),
                    item = item_ref.identifier(),
                    "skipping required trait item"
                );
                continue;
            }

            let Some(ty) = item_ref.try_get_tyty(self.cx.mappings, self.cx.types) else {
                trace!(
                    trait_name = trait_ref.name(),
                    item = item_ref.identifier(),
                    "trait item not yet type-checked, skipping"
                );
                continue;
            };
            let kind = item_ref.kind();
            let candidate = TraitItemCandidate {
                trait_ref,
                item_index,
                ty,
            };
            self.candidates.push(match kind {
                TraitItemType::Fn => PathProbeCandidate::TraitFunc(candidate),
                TraitItemType::Const => PathProbeCandidate::TraitItemConst(candidate),
                TraitItemType::TypeAlias => PathProbeCandidate::TraitTypeAlias(candidate),
                TraitItemType::Error => unreachable!("error trait item inside a resolved trait"),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::{FileId, Location};
    use crate::hir::{Mappings, Trait, TraitItem, TraitItemKind, TypeNode, TypePath};
    use crate::ty::{FnSig, TypeCheckContext};
    use crate::typeck::TraitResolver;

    fn loc(start: u32) -> Location {
        Location::from_offsets(FileId::new(0), start, start + 1)
    }

    fn foo() -> Ty {
        Ty::adt(HirId::new(500), "Foo", Vec::new())
    }

    fn fn_ty(id: u32, name: &str) -> Ty {
        Ty::FnDef(FnSig {
            id: HirId::new(id),
            name: name.into(),
            params: Vec::new(),
            ret: Box::new(Ty::unit()),
            substitutions: Vec::new(),
        })
    }

    #[test]
    fn test_impl_item_kinds_map_to_variants() {
        let mut mappings = Mappings::new();
        let mut types = TypeCheckContext::new();
        let node = TypeNode::new(HirId::new(2), loc(0));
        let block = ImplBlock::inherent(HirId::new(1), node, loc(0))
            .with_item(ImplItem::new(HirId::new(10), "x", ImplItemKind::Constant, loc(1)))
            .with_item(ImplItem::new(HirId::new(11), "x", ImplItemKind::TypeAlias, loc(2)))
            .with_item(ImplItem::new(HirId::new(12), "x", ImplItemKind::Function, loc(3)));
        mappings.insert_impl_block(block).unwrap();
        types.insert_type(node.id, foo());
        types.insert_type(HirId::new(10), Ty::Bool);
        types.insert_type(HirId::new(11), Ty::Char);
        types.insert_type(HirId::new(12), fn_ty(12, "x"));

        let resolver = TraitResolver::new(&mappings);
        let cx = ProbeContext::new(&mappings, &types, &resolver);
        let receiver = foo();
        let candidates = PathProbeType::probe(cx, &receiver, "x");

        let kinds: Vec<_> = candidates.iter().map(PathProbeCandidate::kind).collect();
        assert_eq!(
            kinds,
            vec![CandidateKind::ImplConst, CandidateKind::ImplTypeAlias, CandidateKind::ImplFunc]
        );
        assert!(candidates.iter().all(PathProbeCandidate::is_impl_candidate));
        assert_eq!(candidates[1].ty(), &Ty::Char);
        assert_eq!(candidates[0].as_impl().map(|c| c.parent), Some(HirId::new(1)));
    }

    #[test]
    fn test_untyped_items_are_skipped() {
        let mut mappings = Mappings::new();
        let mut types = TypeCheckContext::new();
        let node = TypeNode::new(HirId::new(2), loc(0));
        let block = ImplBlock::inherent(HirId::new(1), node, loc(0))
            .with_item(ImplItem::new(HirId::new(10), "x", ImplItemKind::Function, loc(1)));
        mappings.insert_impl_block(block).unwrap();
        types.insert_type(node.id, foo());

        let resolver = TraitResolver::new(&mappings);
        let cx = ProbeContext::new(&mappings, &types, &resolver);
        let receiver = foo();
        assert!(PathProbeType::probe(cx, &receiver, "x").is_empty());
    }

    #[test]
    fn test_untyped_trait_defaults_are_skipped() {
        let mut mappings = Mappings::new();
        let mut types = TypeCheckContext::new();
        let def = Trait::new(HirId::new(1), "T", loc(0)).with_item(TraitItem::new(
            HirId::new(2),
            "C",
            TraitItemKind::Const {
                ty: TypeNode::new(HirId::new(3), loc(1)),
                default_expr: Some(HirId::new(4)),
            },
            loc(1),
        ));
        mappings.insert_trait(def).unwrap();

        let path = TypePath::new(HirId::new(10), &["T"], loc(2));
        mappings.insert_resolved_path(path.id, HirId::new(1));
        let node = TypeNode::new(HirId::new(11), loc(2));
        mappings
            .insert_impl_block(ImplBlock::for_trait(HirId::new(12), path, node, loc(2)))
            .unwrap();
        types.insert_type(node.id, Ty::Bool);

        let resolver = TraitResolver::new(&mappings);
        let cx = ProbeContext::new(&mappings, &types, &resolver);
        assert!(PathProbeType::probe(cx, &Ty::Bool, "C").is_empty());

        // Once the const's type is known the default resolves
        types.insert_type(HirId::new(3), Ty::Char);
        let cx = ProbeContext::new(&mappings, &types, &resolver);
        let candidates = PathProbeType::probe(cx, &Ty::Bool, "C");
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].kind(), CandidateKind::TraitItemConst);
        assert_eq!(candidates[0].ty(), &Ty::Char);
    }

    #[test]
    fn test_result_classification() {
        let candidate = PathProbeCandidate::ImplFunc(ImplItemCandidate {
            item: HirId::new(1),
            parent: HirId::new(2),
            ty: Ty::unit(),
        });

        assert_eq!(PathProbeResult::from_candidates(Vec::new()), PathProbeResult::NotFound);

        let unique = PathProbeResult::from_candidates(vec![candidate.clone()]);
        assert!(unique.is_found());
        assert_eq!(unique.candidate(), Some(&candidate));

        let ambiguous = PathProbeResult::from_candidates(vec![candidate.clone(), candidate]);
        assert!(ambiguous.is_ambiguous());
        assert!(ambiguous.candidate().is_none());
    }

    #[test]
    fn test_candidate_display() {
        let candidate = PathProbeCandidate::ImplConst(ImplItemCandidate {
            item: HirId::new(4),
            parent: HirId::new(3),
            ty: Ty::Bool,
        });
        assert_eq!(candidate.to_string(), "ImplConst HirId(4) in impl HirId(3): bool");
    }
}
