//! Types: representation, structural compatibility, and the type cache.
//!
//! - [`Ty`] - The type representation, with [`Ty::can_eq`] for compatibility
//! - [`SubstitutionParamMapping`] - Generic parameters of a signature
//! - [`TypeCheckContext`] - Node id to type cache

mod context;
mod subst;
mod tyty;

pub use context::TypeCheckContext;
pub use subst::{mappings_for, SubstitutionParamMapping};
pub use tyty::{AdtTy, FloatTy, FnSig, InferKind, IntTy, Mutability, ParamTy, RefTy, Ty, UintTy};
