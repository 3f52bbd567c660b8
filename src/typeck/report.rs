//! Ambiguity reporting for path probes.

use tracing::debug;

use super::PathProbeCandidate;
use crate::base::Location;
use crate::hir::{DiagnosticCollector, Mappings, RichLocation};

/// Emits the "multiple applicable items" diagnostic.
///
/// Aggregation only: the diagnostic is anchored at the use site and carries
/// the definition site of every candidate as a secondary range.
pub struct ReportMultipleCandidateError;

impl ReportMultipleCandidateError {
    pub fn report(
        mappings: &Mappings,
        candidates: &[PathProbeCandidate],
        query: &str,
        query_locus: Location,
        collector: &mut DiagnosticCollector,
    ) {
        let mut rich = RichLocation::new(query_locus);
        for candidate in candidates {
            rich.add_range(Self::definition_site(mappings, candidate));
        }

        debug!(query, candidates = candidates.len(), at = %query_locus, "reporting ambiguous path");
        collector.ambiguous_reference(rich, query);
    }

    fn definition_site(mappings: &Mappings, candidate: &PathProbeCandidate) -> Location {
        if let Some(c) = candidate.as_impl() {
            match mappings.lookup_impl_item(c.item) {
                Some((item, _)) => item.location,
                None => panic!("impl candidate {} is not in the registry", c.item),
            }
        } else if let Some(c) = candidate.as_trait() {
            c.item_ref().location()
        } else {
            unreachable!()
        }
    }
}
