//! Resolved views of traits and their items.
//!
//! A [`TraitReference`] is what the type checker works with once a trait
//! path has been resolved: the trait's identity plus one
//! [`TraitItemReference`] per declared item, in declaration order. Neither
//! owns the underlying declaration; both point at it by [`HirId`] and keep
//! only the per-item metadata (identifier, optionality, substitutions).
//!
//! Failure is represented by shared error sentinels rather than `Option`:
//! [`TraitItemReference::error_node`] and [`TraitReference::error_node`].
//! Accessors that need a real declaration panic on the sentinels, so call
//! sites check `is_error()` first.

use std::fmt;
use std::sync::{Arc, LazyLock, OnceLock};

use smol_str::SmolStr;

use crate::base::Location;
use crate::hir::{HirId, Mappings, SelfParam, TraitItemKind};
use crate::ty::{mappings_for, FnSig, Mutability, SubstitutionParamMapping, Ty, TypeCheckContext};

static ERROR_ITEM: LazyLock<TraitItemReference> = LazyLock::new(TraitItemReference::error);

static ERROR_TRAIT: LazyLock<Arc<TraitReference>> =
    LazyLock::new(|| Arc::new(TraitReference::error()));

// ============================================================================
// TRAIT ITEM REFERENCE
// ============================================================================

/// Kind of a trait item as seen by probing.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TraitItemType {
    Fn,
    Const,
    TypeAlias,
    Error,
}

impl TraitItemType {
    pub fn as_str(self) -> &'static str {
        match self {
            TraitItemType::Fn => "FN",
            TraitItemType::Const => "CONST",
            TraitItemType::TypeAlias => "TYPE",
            TraitItemType::Error => "ERROR",
        }
    }

    /// The probing kind of a declared trait item.
    pub fn of(kind: &TraitItemKind) -> Self {
        match kind {
            TraitItemKind::Const { .. } => TraitItemType::Const,
            TraitItemKind::Type { .. } => TraitItemType::TypeAlias,
            TraitItemKind::Func { .. } => TraitItemType::Fn,
        }
    }
}

impl fmt::Display for TraitItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One item of a resolved trait.
#[derive(Clone, Debug)]
pub struct TraitItemReference {
    identifier: SmolStr,
    /// The trait provides a default for this item.
    optional: bool,
    kind: TraitItemType,
    decl: Option<HirId>,
    /// The implicit `Self` parameter of the owning trait.
    self_ty: Option<Ty>,
    inherited_substitutions: Vec<SubstitutionParamMapping>,
    location: Location,
    tyty: OnceLock<Ty>,
}

impl TraitItemReference {
    pub fn new(
        identifier: impl Into<SmolStr>,
        optional: bool,
        kind: TraitItemType,
        decl: HirId,
        self_ty: Ty,
        inherited_substitutions: Vec<SubstitutionParamMapping>,
        location: Location,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            optional,
            kind,
            decl: Some(decl),
            self_ty: Some(self_ty),
            inherited_substitutions,
            location,
            tyty: OnceLock::new(),
        }
    }

    /// A fresh error value. Prefer [`TraitItemReference::error_node`].
    pub fn error() -> Self {
        Self {
            identifier: SmolStr::default(),
            optional: false,
            kind: TraitItemType::Error,
            decl: None,
            self_ty: None,
            inherited_substitutions: Vec::new(),
            location: Location::DUMMY,
            tyty: OnceLock::new(),
        }
    }

    /// The shared "no such item" sentinel.
    pub fn error_node() -> &'static TraitItemReference {
        &ERROR_ITEM
    }

    pub fn is_error(&self) -> bool {
        self.kind == TraitItemType::Error && self.decl.is_none()
    }

    pub fn is_optional(&self) -> bool {
        self.optional
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn kind(&self) -> TraitItemType {
        self.kind
    }

    pub fn location(&self) -> Location {
        self.location
    }

    pub fn inherited_substitutions(&self) -> &[SubstitutionParamMapping] {
        &self.inherited_substitutions
    }

    /// The trait item declaration.
    ///
    /// # Panics
    /// Panics on the error sentinel.
    pub fn decl(&self) -> HirId {
        match self.decl {
            Some(id) => id,
            None => panic!("decl() called on the trait item error node"),
        }
    }

    /// The implicit `Self` type parameter.
    ///
    /// # Panics
    /// Panics on the error sentinel.
    pub fn self_ty(&self) -> &Ty {
        match &self.self_ty {
            Some(ty) => ty,
            None => panic!("self_ty() called on the trait item error node"),
        }
    }

    /// The type of this item, computed on first use.
    ///
    /// Consts give their declared type, type aliases their default (or a
    /// placeholder parameter when there is none), functions their signature.
    /// Error items give a fresh error type on every call.
    ///
    /// # Panics
    /// Panics if the declaration is not registered in `mappings` or one of
    /// its type nodes has no entry in `types`: the item must already have
    /// been type-checked.
    pub fn get_tyty(&self, mappings: &Mappings, types: &TypeCheckContext) -> Ty {
        match self.resolve_tyty(mappings, types) {
            Ok(ty) => ty,
            Err(missing) => panic!("no type recorded for {}", missing),
        }
    }

    /// Like [`get_tyty`](Self::get_tyty), but `None` when a type node of the
    /// declaration has not been type-checked yet. Only successes are memoized.
    pub fn try_get_tyty(&self, mappings: &Mappings, types: &TypeCheckContext) -> Option<Ty> {
        self.resolve_tyty(mappings, types).ok()
    }

    /// The item's type, or the id of the first type node missing from `types`.
    fn resolve_tyty(&self, mappings: &Mappings, types: &TypeCheckContext) -> Result<Ty, HirId> {
        if self.kind == TraitItemType::Error {
            return Ok(types.fresh_error());
        }
        if let Some(ty) = self.tyty.get() {
            return Ok(ty.clone());
        }
        let ty = self.compute_tyty(mappings, types)?;
        Ok(self.tyty.get_or_init(|| ty).clone())
    }

    fn compute_tyty(&self, mappings: &Mappings, types: &TypeCheckContext) -> Result<Ty, HirId> {
        let decl = self.decl();
        let Some((item, _)) = mappings.lookup_trait_item(decl) else {
            panic!("trait item {} is not registered", decl);
        };

        match (self.kind, &item.kind) {
            (TraitItemType::Const, TraitItemKind::Const { ty, .. }) => type_of(types, ty.id),
            (TraitItemType::TypeAlias, TraitItemKind::Type { default }) => match default {
                Some(node) => type_of(types, node.id),
                None => Ok(Ty::param(item.id, &item.name)),
            },
            (
                TraitItemType::Fn,
                TraitItemKind::Func {
                    generics,
                    self_param,
                    params,
                    ret,
                    ..
                },
            ) => {
                let mut substitutions = self.inherited_substitutions.clone();
                substitutions.extend(mappings_for(generics));

                let mut sig_params = Vec::with_capacity(params.len() + 1);
                if let Some(self_param) = self_param {
                    let self_ty = self.self_ty().clone();
                    let ty = match self_param {
                        SelfParam::Value => self_ty,
                        SelfParam::Ref => Ty::reference(Mutability::Not, self_ty),
                        SelfParam::RefMut => Ty::reference(Mutability::Mut, self_ty),
                    };
                    sig_params.push((SmolStr::new_static("self"), ty));
                }
                for param in params {
                    sig_params.push((param.name.clone(), type_of(types, param.ty.id)?));
                }
                let ret = match ret {
                    Some(node) => type_of(types, node.id)?,
                    None => Ty::unit(),
                };

                Ok(Ty::FnDef(FnSig {
                    id: item.id,
                    name: item.name.clone(),
                    params: sig_params,
                    ret: Box::new(ret),
                    substitutions,
                }))
            }
            (kind, _) => unreachable!(
                "trait item {} is recorded as {} but declared as {:?}",
                decl, kind, item.kind
            ),
        }
    }
}

fn type_of(types: &TypeCheckContext, id: HirId) -> Result<Ty, HirId> {
    types.lookup_type(id).cloned().ok_or(id)
}

impl fmt::Display for TraitItemReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({} {})", self.kind, self.identifier)
    }
}

// ============================================================================
// TRAIT REFERENCE
// ============================================================================

/// A resolved trait and its items.
#[derive(Clone, Debug)]
pub struct TraitReference {
    trait_id: Option<HirId>,
    name: SmolStr,
    location: Location,
    items: Vec<TraitItemReference>,
}

impl TraitReference {
    pub fn new(
        trait_id: HirId,
        name: impl Into<SmolStr>,
        location: Location,
        items: Vec<TraitItemReference>,
    ) -> Self {
        Self {
            trait_id: Some(trait_id),
            name: name.into(),
            location,
            items,
        }
    }

    /// A fresh error value. Prefer [`TraitReference::error_node`].
    pub fn error() -> Self {
        Self {
            trait_id: None,
            name: SmolStr::default(),
            location: Location::DUMMY,
            items: Vec::new(),
        }
    }

    /// The shared "unresolved trait" sentinel.
    pub fn error_node() -> Arc<TraitReference> {
        Arc::clone(&ERROR_TRAIT)
    }

    pub fn is_error(&self) -> bool {
        self.trait_id.is_none()
    }

    /// The trait declaration, `None` for the error sentinel.
    pub fn trait_id(&self) -> Option<HirId> {
        self.trait_id
    }

    /// # Panics
    /// Panics on the error sentinel.
    pub fn name(&self) -> &str {
        assert!(!self.is_error(), "name() called on the trait error node");
        &self.name
    }

    /// # Panics
    /// Panics on the error sentinel.
    pub fn location(&self) -> Location {
        assert!(!self.is_error(), "location() called on the trait error node");
        self.location
    }

    /// The first item named `ident`, of any kind, or the item error node.
    pub fn lookup_trait_item(&self, ident: &str) -> &TraitItemReference {
        match self.position_of(ident) {
            Some(idx) => &self.items[idx],
            None => TraitItemReference::error_node(),
        }
    }

    /// The first item named `ident` of the given kind, or the item error node.
    pub fn lookup_trait_item_of_kind(&self, ident: &str, kind: TraitItemType) -> &TraitItemReference {
        self.items
            .iter()
            .find(|item| item.kind == kind && item.identifier == ident)
            .unwrap_or_else(|| TraitItemReference::error_node())
    }

    /// Index of the first item named `ident`.
    pub(crate) fn position_of(&self, ident: &str) -> Option<usize> {
        self.items.iter().position(|item| item.identifier == ident)
    }

    pub fn size(&self) -> usize {
        self.items.len()
    }

    pub fn trait_items(&self) -> &[TraitItemReference] {
        &self.items
    }
}

impl fmt::Display for TraitReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(id) = self.trait_id else {
            return f.write_str("<trait-ref-error-node>");
        };
        write!(f, "Trait {}->{} [", self.name, id)?;
        for (i, item) in self.items.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", item)?;
        }
        f.write_str("]")
    }
}
