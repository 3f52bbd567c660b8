//! Trait and impl probing for path resolution.
//!
//! - [`TraitReference`], [`TraitItemReference`] - Per-item view of a trait
//! - [`ResolveTraitPath`], [`TraitResolver`] - Trait path to trait reference
//! - [`TypeBoundsProbe`] - Traits a receiver type implements
//! - [`PathProbeType`] - Every declaration `Receiver::name` could refer to
//! - [`ReportMultipleCandidateError`] - Ambiguity diagnostic
//!
//! Probing is read-only against the registry and the type cache. Anything
//! not yet type-checked is skipped rather than reported.

mod bounds;
mod path_probe;
mod report;
mod trait_ref;
mod trait_resolve;

pub use bounds::TypeBoundsProbe;
pub use path_probe::{
    CandidateKind, ImplItemCandidate, PathProbeCandidate, PathProbeResult, PathProbeType,
    TraitItemCandidate,
};
pub use report::ReportMultipleCandidateError;
pub use trait_ref::{TraitItemReference, TraitItemType, TraitReference};
pub use trait_resolve::{build_trait_reference, ResolveTraitPath, TraitResolver};

use std::sync::Arc;

use tracing::debug;

use crate::base::Location;
use crate::hir::{DiagnosticCollector, Mappings};
use crate::ty::{Ty, TypeCheckContext};

/// Everything a probe reads: the registry, the type cache, and a trait
/// path resolver.
#[derive(Clone, Copy)]
pub struct ProbeContext<'a> {
    pub mappings: &'a Mappings,
    pub types: &'a TypeCheckContext,
    pub traits: &'a dyn ResolveTraitPath,
}

impl<'a> ProbeContext<'a> {
    #[inline]
    pub fn new(mappings: &'a Mappings, types: &'a TypeCheckContext, traits: &'a dyn ResolveTraitPath) -> Self {
        Self {
            mappings,
            types,
            traits,
        }
    }
}

/// Traits satisfied by `receiver`.
pub fn scan_bounds(cx: ProbeContext<'_>, receiver: &Ty) -> Vec<Arc<TraitReference>> {
    TypeBoundsProbe::probe(cx, receiver)
}

/// Every candidate `segment` could name on `receiver`.
pub fn probe_path(cx: ProbeContext<'_>, receiver: &Ty, segment: &str) -> Vec<PathProbeCandidate> {
    PathProbeType::probe(cx, receiver, segment)
}

/// Report an ambiguous path at `use_site`.
pub fn report_multiple_candidates(
    mappings: &Mappings,
    candidates: &[PathProbeCandidate],
    query: &str,
    use_site: Location,
    collector: &mut DiagnosticCollector,
) {
    ReportMultipleCandidateError::report(mappings, candidates, query, use_site, collector);
}

/// Resolve `receiver::segment` the way the type checker does.
///
/// Ambiguous results are reported into `collector` before being returned.
/// An empty result is returned as-is; the caller decides how to report it.
pub fn resolve_path_segment(
    cx: ProbeContext<'_>,
    receiver: &Ty,
    segment: &str,
    use_site: Location,
    collector: &mut DiagnosticCollector,
) -> PathProbeResult {
    let result = PathProbeResult::from_candidates(probe_path(cx, receiver, segment));
    match &result {
        PathProbeResult::Ambiguous(candidates) => {
            report_multiple_candidates(cx.mappings, candidates, segment, use_site, collector);
        }
        PathProbeResult::NotFound => debug!(segment, receiver = %receiver, "no candidates"),
        PathProbeResult::Unique(_) => {}
    }
    result
}
