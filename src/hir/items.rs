//! Declaration nodes consumed by the type checker.
//!
//! These are the lowered forms of `impl` blocks, traits and their items.
//! Parsing and lowering live elsewhere; this module only describes the
//! shape the probes need: identifiers, kinds, source locations, and the
//! ids of type annotation nodes whose types sit in the type cache.

use smol_str::SmolStr;

use super::HirId;
use crate::base::Location;

/// A path naming a trait, e.g. the `fmt::Display` in `impl fmt::Display for Foo`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypePath {
    pub id: HirId,
    pub segments: Vec<SmolStr>,
    pub location: Location,
}

impl TypePath {
    pub fn new(id: HirId, segments: &[&str], location: Location) -> Self {
        Self {
            id,
            segments: segments.iter().map(|s| SmolStr::new(s)).collect(),
            location,
        }
    }

    /// The path rendered with `::` separators.
    pub fn as_string(&self) -> String {
        self.segments.join("::")
    }
}

/// A type annotation. Its resolved type is stored in the type cache under `id`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TypeNode {
    pub id: HirId,
    pub location: Location,
}

impl TypeNode {
    pub const fn new(id: HirId, location: Location) -> Self {
        Self { id, location }
    }
}

/// A generic type parameter declaration (`T` in `impl<T>` or `fn f<T>`).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct GenericParam {
    pub id: HirId,
    pub name: SmolStr,
    pub location: Location,
}

impl GenericParam {
    pub fn new(id: HirId, name: &str, location: Location) -> Self {
        Self {
            id,
            name: SmolStr::new(name),
            location,
        }
    }
}

// ============================================================================
// IMPL BLOCKS
// ============================================================================

/// Kind of an item declared inside an `impl` block.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ImplItemKind {
    Constant,
    TypeAlias,
    Function,
}

/// An item declared inside an `impl` block.
///
/// The item's type is computed by the type checker and cached under `id`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImplItem {
    pub id: HirId,
    pub name: SmolStr,
    pub kind: ImplItemKind,
    pub location: Location,
}

impl ImplItem {
    pub fn new(id: HirId, name: &str, kind: ImplItemKind, location: Location) -> Self {
        Self {
            id,
            name: SmolStr::new(name),
            kind,
            location,
        }
    }
}

/// An `impl` block: `impl<generics> [Trait for] SelfTy { items }`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImplBlock {
    pub id: HirId,
    pub generics: Vec<GenericParam>,
    pub self_ty: TypeNode,
    /// `None` for inherent blocks.
    pub trait_ref: Option<TypePath>,
    pub items: Vec<ImplItem>,
    pub location: Location,
}

impl ImplBlock {
    /// An inherent block (no trait).
    pub fn inherent(id: HirId, self_ty: TypeNode, location: Location) -> Self {
        Self {
            id,
            generics: Vec::new(),
            self_ty,
            trait_ref: None,
            items: Vec::new(),
            location,
        }
    }

    /// A block implementing `trait_ref` for `self_ty`.
    pub fn for_trait(id: HirId, trait_ref: TypePath, self_ty: TypeNode, location: Location) -> Self {
        Self {
            trait_ref: Some(trait_ref),
            ..Self::inherent(id, self_ty, location)
        }
    }

    pub fn with_generic(mut self, param: GenericParam) -> Self {
        self.generics.push(param);
        self
    }

    pub fn with_item(mut self, item: ImplItem) -> Self {
        self.items.push(item);
        self
    }

    pub fn has_trait_ref(&self) -> bool {
        self.trait_ref.is_some()
    }
}

// ============================================================================
// TRAITS
// ============================================================================

/// The receiver form of a method's `self` parameter.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SelfParam {
    /// `self`
    Value,
    /// `&self`
    Ref,
    /// `&mut self`
    RefMut,
}

/// A non-self function parameter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FnParam {
    pub name: SmolStr,
    pub ty: TypeNode,
}

impl FnParam {
    pub fn new(name: &str, ty: TypeNode) -> Self {
        Self {
            name: SmolStr::new(name),
            ty,
        }
    }
}

/// Per-kind payload of a trait item.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TraitItemKind {
    /// `const NAME: ty [= expr];`
    Const {
        ty: TypeNode,
        default_expr: Option<HirId>,
    },
    /// `type Name [= default];`
    Type { default: Option<TypeNode> },
    /// `fn name<generics>(self_param, params) [-> ret] [{ body }]`
    Func {
        generics: Vec<GenericParam>,
        self_param: Option<SelfParam>,
        params: Vec<FnParam>,
        ret: Option<TypeNode>,
        body: Option<HirId>,
    },
}

/// An item declared inside a trait.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TraitItem {
    pub id: HirId,
    pub name: SmolStr,
    pub kind: TraitItemKind,
    pub location: Location,
}

impl TraitItem {
    pub fn new(id: HirId, name: &str, kind: TraitItemKind, location: Location) -> Self {
        Self {
            id,
            name: SmolStr::new(name),
            kind,
            location,
        }
    }

    /// Whether the trait provides a default for this item.
    pub fn has_default(&self) -> bool {
        match &self.kind {
            TraitItemKind::Const { default_expr, .. } => default_expr.is_some(),
            TraitItemKind::Type { default } => default.is_some(),
            TraitItemKind::Func { body, .. } => body.is_some(),
        }
    }
}

/// A trait declaration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Trait {
    pub id: HirId,
    pub name: SmolStr,
    pub generics: Vec<GenericParam>,
    pub items: Vec<TraitItem>,
    pub location: Location,
}

impl Trait {
    pub fn new(id: HirId, name: &str, location: Location) -> Self {
        Self {
            id,
            name: SmolStr::new(name),
            generics: Vec::new(),
            items: Vec::new(),
            location,
        }
    }

    pub fn with_generic(mut self, param: GenericParam) -> Self {
        self.generics.push(param);
        self
    }

    pub fn with_item(mut self, item: TraitItem) -> Self {
        self.items.push(item);
        self
    }
}
