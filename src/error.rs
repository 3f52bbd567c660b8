//! Error types for registry construction.
//!
//! Probing itself never fails: misses are skipped and unresolved names
//! collapse to error sentinels. The only fallible surface is populating
//! the [`Mappings`](crate::hir::Mappings) registry.

use thiserror::Error;

use crate::hir::HirId;

/// Errors raised while registering declarations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("impl block {0} is already registered")]
    DuplicateImplBlock(HirId),

    #[error("impl item {item} is already registered (owned by impl block {owner})")]
    DuplicateImplItem { item: HirId, owner: HirId },

    #[error("trait {0} is already registered")]
    DuplicateTrait(HirId),

    #[error("trait item {item} is already registered (owned by trait {owner})")]
    DuplicateTraitItem { item: HirId, owner: HirId },
}

/// Result alias for registry operations.
pub type Result<T, E = RegistryError> = std::result::Result<T, E>;
