//! High-level IR: the declaration model the type checker works on.
//!
//! - [`HirId`] - Handles naming declarations and type nodes
//! - [`ImplBlock`], [`Trait`] and their items - Lowered declarations
//! - [`Mappings`] - Registry of every declaration, with ordered iteration
//! - [`Diagnostic`], [`DiagnosticCollector`] - Error reporting

mod diagnostics;
mod ids;
mod items;
mod mappings;

pub use diagnostics::{codes, Diagnostic, DiagnosticCollector, RichLocation, Severity};
pub use ids::HirId;
pub use items::{
    FnParam, GenericParam, ImplBlock, ImplItem, ImplItemKind, SelfParam, Trait, TraitItem,
    TraitItemKind, TypeNode, TypePath,
};
pub use mappings::Mappings;
