//! # rustfe-probe
//!
//! Trait and impl path probing for a Rust compiler front end: given a
//! receiver type and a name, find every declaration `Receiver::name` could
//! refer to, and report the ambiguous ones.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! typeck  → Trait references, bound probing, path probing, ambiguity reports
//!   ↓
//! ty      → Type representation, compatibility, type cache
//!   ↓
//! hir     → Declarations, registry (Mappings), diagnostics
//!   ↓
//! base    → Primitives (FileId, Location)
//! ```

/// Foundation types: FileId, Location
pub mod base;

/// Registry and diagnostic errors
pub mod error;

/// High-level IR: lowered declarations and the registry
pub mod hir;

/// Types and the type cache
pub mod ty;

/// Probing: trait references, bounds, candidates
pub mod typeck;

pub use base::{FileId, Location, TextRange, TextSize};
pub use error::{RegistryError, Result};
pub use hir::{Diagnostic, DiagnosticCollector, HirId, Mappings};
pub use ty::{Ty, TypeCheckContext};
pub use typeck::{
    PathProbeCandidate, PathProbeResult, PathProbeType, ProbeContext, ReportMultipleCandidateError,
    ResolveTraitPath, TraitItemReference, TraitReference, TraitResolver, TypeBoundsProbe,
};
