//! End-to-end tests for path probing.
//!
//! Each test lowers a small program into a `Mappings` registry plus a
//! `TypeCheckContext`, then probes `Receiver::name` the way the type checker
//! would.

use rstest::{fixture, rstest};
use rustfe::base::{FileId, Location};
use rustfe::hir::{
    codes, DiagnosticCollector, HirId, ImplBlock, ImplItem, ImplItemKind, Mappings, SelfParam,
    Trait, TraitItem, TraitItemKind, TypeNode, TypePath,
};
use rustfe::ty::{Mutability, Ty, TypeCheckContext};
use rustfe::typeck::{
    probe_path, resolve_path_segment, scan_bounds, CandidateKind, PathProbeCandidate,
    PathProbeResult, ProbeContext, TraitReference, TraitResolver,
};

// ============================================================================
// HELPERS
// ============================================================================

const FOO_DEF: u32 = 9_000;

fn loc(start: u32) -> Location {
    Location::from_offsets(FileId::new(1), start, start + 2)
}

fn foo() -> Ty {
    Ty::adt(HirId::new(FOO_DEF), "Foo", Vec::new())
}

fn unit_fn(item: u32, name: &str) -> Ty {
    Ty::FnDef(rustfe::ty::FnSig {
        id: HirId::new(item),
        name: name.into(),
        params: Vec::new(),
        ret: Box::new(Ty::unit()),
        substitutions: Vec::new(),
    })
}

/// A registry under construction. Ids are handed out sequentially.
struct Program {
    mappings: Mappings,
    types: TypeCheckContext,
    next_id: u32,
}

impl Program {
    fn new() -> Self {
        Self {
            mappings: Mappings::new(),
            types: TypeCheckContext::new(),
            next_id: 1,
        }
    }

    fn fresh(&mut self) -> HirId {
        let id = HirId::new(self.next_id);
        self.next_id += 1;
        id
    }

    fn self_node(&mut self, self_ty: Ty) -> TypeNode {
        let node = TypeNode::new(self.fresh(), loc(0));
        self.types.insert_type(node.id, self_ty);
        node
    }

    /// `impl SelfTy { fn name() {} ... }`, returning the item ids.
    fn inherent_fns(&mut self, self_ty: Ty, names: &[&str]) -> Vec<HirId> {
        let node = self.self_node(self_ty);
        let block_id = self.fresh();
        let mut block = ImplBlock::inherent(block_id, node, loc(block_id.0 * 10));
        let mut ids = Vec::new();
        for name in names {
            let id = self.fresh();
            block = block.with_item(ImplItem::new(id, name, ImplItemKind::Function, loc(id.0 * 10)));
            self.types.insert_type(id, unit_fn(id.0, name));
            ids.push(id);
        }
        self.mappings.insert_impl_block(block).unwrap();
        ids
    }

    /// `trait Name { fn optional(&self) {} ... fn mandatory(&self); ... }`
    fn declare_trait(&mut self, name: &str, optional: &[&str], mandatory: &[&str]) -> HirId {
        let trait_id = self.fresh();
        let mut def = Trait::new(trait_id, name, loc(trait_id.0 * 10));
        for (names, has_body) in [(optional, true), (mandatory, false)] {
            for item_name in names {
                let id = self.fresh();
                let body = has_body.then(|| HirId::new(id.0 + 50_000));
                def = def.with_item(TraitItem::new(
                    id,
                    item_name,
                    TraitItemKind::Func {
                        generics: Vec::new(),
                        self_param: Some(SelfParam::Ref),
                        params: Vec::new(),
                        ret: None,
                        body,
                    },
                    loc(id.0 * 10),
                ));
            }
        }
        self.mappings.insert_trait(def).unwrap();
        trait_id
    }

    /// `impl Trait for SelfTy { fn name() {} ... }`, returning the block id.
    fn implement(&mut self, trait_id: HirId, self_ty: Ty, overrides: &[&str]) -> HirId {
        let path = TypePath::new(self.fresh(), &["Bound"], loc(0));
        self.mappings.insert_resolved_path(path.id, trait_id);
        let node = self.self_node(self_ty);
        let block_id = self.fresh();
        let mut block = ImplBlock::for_trait(block_id, path, node, loc(block_id.0 * 10));
        for name in overrides {
            let id = self.fresh();
            block = block.with_item(ImplItem::new(id, name, ImplItemKind::Function, loc(id.0 * 10)));
            self.types.insert_type(id, unit_fn(id.0, name));
        }
        self.mappings.insert_impl_block(block).unwrap();
        block_id
    }

    fn probe(&self, receiver: &Ty, name: &str) -> Vec<PathProbeCandidate> {
        let resolver = TraitResolver::new(&self.mappings);
        probe_path(ProbeContext::new(&self.mappings, &self.types, &resolver), receiver, name)
    }

    fn bounds(&self, receiver: &Ty) -> Vec<String> {
        let resolver = TraitResolver::new(&self.mappings);
        scan_bounds(ProbeContext::new(&self.mappings, &self.types, &resolver), receiver)
            .iter()
            .map(|t| t.name().to_string())
            .collect()
    }
}

#[fixture]
fn program() -> Program {
    Program::new()
}

// ============================================================================
// SCENARIOS
// ============================================================================

#[rstest]
fn test_unique_inherent_function(mut program: Program) {
    let ids = program.inherent_fns(foo(), &["bar", "other"]);

    let candidates = program.probe(&foo(), "bar");

    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0].kind(), CandidateKind::ImplFunc);
    let payload = candidates[0].as_impl().unwrap();
    assert_eq!(payload.item, ids[0]);
    let (_, block) = program.mappings.lookup_impl_item(ids[0]).unwrap();
    assert_eq!(payload.parent, block.id);
}

#[rstest]
fn test_only_optional_trait_items_resolve(mut program: Program) {
    let t = program.declare_trait("T", &["baz"], &["qux"]);
    program.implement(t, foo(), &["qux"]);

    let baz = program.probe(&foo(), "baz");
    assert_eq!(baz.len(), 1);
    assert_eq!(baz[0].kind(), CandidateKind::TraitFunc);
    let trait_candidate = baz[0].as_trait().unwrap();
    assert_eq!(trait_candidate.trait_ref().name(), "T");
    assert_eq!(trait_candidate.item_ref().identifier(), "baz");
    assert!(matches!(baz[0].ty(), Ty::FnDef(sig) if sig.name == "baz"));

    // `qux` resolves only through the impl block's own item
    let qux = program.probe(&foo(), "qux");
    assert_eq!(qux.len(), 1);
    assert!(qux[0].is_impl_candidate());
}

#[rstest]
fn test_mandatory_item_without_impl_is_not_found(mut program: Program) {
    let t = program.declare_trait("T", &["baz"], &["qux"]);
    program.implement(t, foo(), &[]);

    assert!(program.probe(&foo(), "qux").is_empty());
}

#[rstest]
fn test_duplicate_inherent_items_are_reported(mut program: Program) {
    let first = program.inherent_fns(foo(), &["run"]);
    let second = program.inherent_fns(foo(), &["run"]);
    let resolver = TraitResolver::new(&program.mappings);
    let cx = ProbeContext::new(&program.mappings, &program.types, &resolver);
    let mut collector = DiagnosticCollector::new();

    let result = resolve_path_segment(cx, &foo(), "run", loc(500), &mut collector);

    let PathProbeResult::Ambiguous(candidates) = result else {
        panic!("expected an ambiguous result, got {:?}", result);
    };
    assert_eq!(candidates.len(), 2);

    assert_eq!(collector.diagnostics().len(), 1);
    let diag = &collector.diagnostics()[0];
    assert_eq!(diag.code.as_deref(), Some(codes::AMBIGUOUS_REFERENCE));
    assert!(diag.message.contains("run"));
    assert_eq!(diag.location.primary(), loc(500));
    for id in first.iter().chain(&second) {
        let (item, _) = program.mappings.lookup_impl_item(*id).unwrap();
        assert!(diag.location.covers(item.location));
    }
}

#[rstest]
fn test_override_and_default_are_both_candidates(mut program: Program) {
    let t = program.declare_trait("T", &["baz"], &[]);
    program.implement(t, foo(), &["baz"]);

    let kinds: Vec<_> = program.probe(&foo(), "baz").iter().map(|c| c.kind()).collect();
    assert_eq!(kinds, vec![CandidateKind::ImplFunc, CandidateKind::TraitFunc]);
}

#[rstest]
fn test_override_and_default_report_covers_both(mut program: Program) {
    let t = program.declare_trait("T", &["baz"], &[]);
    program.implement(t, foo(), &["baz"]);
    let resolver = TraitResolver::new(&program.mappings);
    let cx = ProbeContext::new(&program.mappings, &program.types, &resolver);
    let mut collector = DiagnosticCollector::new();

    let result = resolve_path_segment(cx, &foo(), "baz", loc(700), &mut collector);

    let PathProbeResult::Ambiguous(candidates) = result else {
        panic!("expected an ambiguous result, got {:?}", result);
    };
    let impl_item = candidates[0].as_impl().unwrap().item;
    let (impl_decl, _) = program.mappings.lookup_impl_item(impl_item).unwrap();
    let trait_site = candidates[1].as_trait().unwrap().item_ref().location();
    assert_ne!(impl_decl.location, trait_site);

    assert_eq!(collector.diagnostics().len(), 1);
    let diag = &collector.diagnostics()[0];
    assert_eq!(diag.location.primary(), loc(700));
    assert!(diag.location.covers(impl_decl.location));
    assert!(diag.location.covers(trait_site));
    assert_eq!(diag.location.ranges(), &[impl_decl.location, trait_site]);
}

#[rstest]
fn test_unrelated_receiver_finds_nothing(mut program: Program) {
    program.inherent_fns(Ty::Bool, &["bar"]);
    let t = program.declare_trait("T", &["bar"], &[]);
    program.implement(t, Ty::Char, &[]);

    assert!(program.probe(&foo(), "bar").is_empty());
    assert!(program.bounds(&foo()).is_empty());

    let resolver = TraitResolver::new(&program.mappings);
    let cx = ProbeContext::new(&program.mappings, &program.types, &resolver);
    let mut collector = DiagnosticCollector::new();
    let result = resolve_path_segment(cx, &foo(), "bar", loc(0), &mut collector);
    assert_eq!(result, PathProbeResult::NotFound);
    assert!(!collector.has_errors());
}

#[rstest]
fn test_bounds_from_separate_blocks(mut program: Program) {
    let a = program.declare_trait("A", &[], &[]);
    let b = program.declare_trait("B", &[], &[]);
    program.implement(a, foo(), &[]);
    program.implement(b, foo(), &[]);

    let mut names = program.bounds(&foo());
    names.sort();
    assert_eq!(names, vec!["A", "B"]);
}

#[rstest]
fn test_unique_result_through_glue(mut program: Program) {
    program.inherent_fns(foo(), &["bar"]);
    let resolver = TraitResolver::new(&program.mappings);
    let cx = ProbeContext::new(&program.mappings, &program.types, &resolver);
    let mut collector = DiagnosticCollector::new();

    let result = resolve_path_segment(cx, &foo(), "bar", loc(0), &mut collector);

    assert!(result.is_found());
    assert_eq!(result.candidate().map(|c| c.kind()), Some(CandidateKind::ImplFunc));
    assert!(collector.diagnostics().is_empty());
}

// ============================================================================
// COMPATIBILITY
// ============================================================================

#[rstest]
#[case::same_adt(foo(), foo(), true)]
#[case::ref_mutability_ignored(
    Ty::reference(Mutability::Mut, foo()),
    Ty::reference(Mutability::Not, foo()),
    true
)]
#[case::generic_impl(foo(), Ty::param(HirId::new(7), "T"), true)]
#[case::different_adt(foo(), Ty::adt(HirId::new(1), "Bar", Vec::new()), false)]
#[case::ref_vs_value(Ty::reference(Mutability::Not, foo()), foo(), false)]
#[case::error_self_type(foo(), Ty::Error(HirId::new(3)), false)]
fn test_receiver_compatibility(
    mut program: Program,
    #[case] receiver: Ty,
    #[case] self_ty: Ty,
    #[case] expected: bool,
) {
    program.inherent_fns(self_ty.clone(), &["go"]);
    let t = program.declare_trait("T", &[], &[]);
    program.implement(t, self_ty, &[]);

    assert_eq!(program.probe(&receiver, "go").len() == 1, expected);
    assert_eq!(program.bounds(&receiver).len() == 1, expected);
}

// ============================================================================
// SENTINELS
// ============================================================================

#[rstest]
fn test_sentinels_are_stable(mut program: Program) {
    let t = program.declare_trait("T", &["baz"], &[]);
    let resolver = TraitResolver::new(&program.mappings);
    let trait_ref = resolver.resolve_trait(t);

    let missing = trait_ref.lookup_trait_item("nope");
    assert!(missing.is_error());
    assert!(std::ptr::eq(missing, rustfe::typeck::TraitItemReference::error_node()));

    let error_trait = TraitReference::error_node();
    assert!(error_trait.is_error());
    assert!(std::sync::Arc::ptr_eq(&error_trait, &TraitReference::error_node()));
    assert!(error_trait.lookup_trait_item("baz").is_error());
}
