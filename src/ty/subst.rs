//! Substitution parameter lists.
//!
//! Solving substitutions is not done here; these mappings only record which
//! generic parameters a signature is generic over, so callers can
//! instantiate them.

use super::{ParamTy, Ty};
use crate::hir::GenericParam;

/// One generic parameter a type or signature is generic over.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SubstitutionParamMapping {
    /// The declaring generic parameter.
    pub generic: GenericParam,
    /// The placeholder type standing for it until substituted.
    pub param: ParamTy,
}

impl SubstitutionParamMapping {
    pub fn new(generic: GenericParam) -> Self {
        let param = ParamTy {
            id: generic.id,
            symbol: generic.name.clone(),
        };
        Self { generic, param }
    }

    /// The placeholder as a type.
    pub fn param_ty(&self) -> Ty {
        Ty::Param(self.param.clone())
    }
}

/// Mappings for every parameter in `generics`, in declaration order.
pub fn mappings_for(generics: &[GenericParam]) -> Vec<SubstitutionParamMapping> {
    generics.iter().cloned().map(SubstitutionParamMapping::new).collect()
}
