//! The type representation used by the type checker.

use std::fmt;

use smol_str::SmolStr;

use super::SubstitutionParamMapping;
use crate::hir::HirId;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum IntTy {
    I8,
    I16,
    I32,
    I64,
    I128,
    Isize,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum UintTy {
    U8,
    U16,
    U32,
    U64,
    U128,
    Usize,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum FloatTy {
    F32,
    F64,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Mutability {
    Not,
    Mut,
}

/// What an unresolved inference variable may still become.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum InferKind {
    /// Any type.
    General,
    /// Some integer type (from an unsuffixed integer literal).
    Integral,
    /// Some float type (from an unsuffixed float literal).
    Float,
}

/// A nominal type: struct, enum or union, with its generic arguments.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct AdtTy {
    pub def: HirId,
    pub name: SmolStr,
    pub args: Vec<Ty>,
}

/// A reference type `&T` / `&mut T`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct RefTy {
    pub mutability: Mutability,
    pub inner: Box<Ty>,
}

/// A generic type parameter, identified by the declaration that introduced it.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ParamTy {
    pub id: HirId,
    pub symbol: SmolStr,
}

/// The signature of a function item.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FnSig {
    /// The function declaration.
    pub id: HirId,
    pub name: SmolStr,
    pub params: Vec<(SmolStr, Ty)>,
    pub ret: Box<Ty>,
    pub substitutions: Vec<SubstitutionParamMapping>,
}

/// A type.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Ty {
    Bool,
    Char,
    Str,
    Never,
    Int(IntTy),
    Uint(UintTy),
    Float(FloatTy),
    /// The unit type is the empty tuple.
    Tuple(Vec<Ty>),
    Adt(AdtTy),
    Ref(RefTy),
    Param(ParamTy),
    FnDef(FnSig),
    Infer(InferKind),
    /// A type that failed to resolve, tagged with the node it stands for.
    Error(HirId),
}

impl Ty {
    pub fn unit() -> Ty {
        Ty::Tuple(Vec::new())
    }

    pub fn adt(def: HirId, name: &str, args: Vec<Ty>) -> Ty {
        Ty::Adt(AdtTy {
            def,
            name: SmolStr::new(name),
            args,
        })
    }

    pub fn reference(mutability: Mutability, inner: Ty) -> Ty {
        Ty::Ref(RefTy {
            mutability,
            inner: Box::new(inner),
        })
    }

    pub fn param(id: HirId, symbol: &str) -> Ty {
        Ty::Param(ParamTy {
            id,
            symbol: SmolStr::new(symbol),
        })
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Ty::Error(_))
    }

    pub fn is_unit(&self) -> bool {
        matches!(self, Ty::Tuple(elems) if elems.is_empty())
    }

    fn is_integral(&self) -> bool {
        matches!(self, Ty::Int(_) | Ty::Uint(_) | Ty::Infer(InferKind::Integral))
    }

    fn is_floating(&self) -> bool {
        matches!(self, Ty::Float(_) | Ty::Infer(InferKind::Float))
    }

    /// Structural compatibility between `self` and `other`.
    ///
    /// Strict mode is plain structural equality modulo inference
    /// variables. Non-strict mode is what bound and path probing use: type
    /// parameters accept any type and reference mutability is ignored.
    /// Error types are compatible with nothing, not even themselves.
    pub fn can_eq(&self, other: &Ty, strict: bool) -> bool {
        match (self, other) {
            (Ty::Error(_), _) | (_, Ty::Error(_)) => false,

            (Ty::Infer(InferKind::General), _) | (_, Ty::Infer(InferKind::General)) => true,
            (Ty::Infer(InferKind::Integral), t) | (t, Ty::Infer(InferKind::Integral)) => {
                t.is_integral() || (!strict && matches!(t, Ty::Param(_)))
            }
            (Ty::Infer(InferKind::Float), t) | (t, Ty::Infer(InferKind::Float)) => {
                t.is_floating() || (!strict && matches!(t, Ty::Param(_)))
            }

            (Ty::Param(a), Ty::Param(b)) if strict => a == b,
            (Ty::Param(_), _) | (_, Ty::Param(_)) => !strict,

            (Ty::Ref(a), Ty::Ref(b)) => {
                (!strict || a.mutability == b.mutability) && a.inner.can_eq(&b.inner, strict)
            }
            (Ty::Adt(a), Ty::Adt(b)) => a.def == b.def && all_can_eq(&a.args, &b.args, strict),
            (Ty::Tuple(a), Ty::Tuple(b)) => all_can_eq(a, b, strict),
            (Ty::FnDef(a), Ty::FnDef(b)) => {
                a.params.len() == b.params.len()
                    && a.params
                        .iter()
                        .zip(&b.params)
                        .all(|((_, x), (_, y))| x.can_eq(y, strict))
                    && a.ret.can_eq(&b.ret, strict)
            }

            (a, b) => a == b,
        }
    }
}

fn all_can_eq(a: &[Ty], b: &[Ty], strict: bool) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.can_eq(y, strict))
}

fn write_list(f: &mut fmt::Formatter<'_>, tys: &[Ty]) -> fmt::Result {
    for (i, ty) in tys.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{}", ty)?;
    }
    Ok(())
}

impl fmt::Display for IntTy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            IntTy::I8 => "i8",
            IntTy::I16 => "i16",
            IntTy::I32 => "i32",
            IntTy::I64 => "i64",
            IntTy::I128 => "i128",
            IntTy::Isize => "isize",
        })
    }
}

impl fmt::Display for UintTy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            UintTy::U8 => "u8",
            UintTy::U16 => "u16",
            UintTy::U32 => "u32",
            UintTy::U64 => "u64",
            UintTy::U128 => "u128",
            UintTy::Usize => "usize",
        })
    }
}

impl fmt::Display for FloatTy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FloatTy::F32 => "f32",
            FloatTy::F64 => "f64",
        })
    }
}

impl fmt::Display for Ty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ty::Bool => f.write_str("bool"),
            Ty::Char => f.write_str("char"),
            Ty::Str => f.write_str("str"),
            Ty::Never => f.write_str("!"),
            Ty::Int(i) => write!(f, "{}", i),
            Ty::Uint(u) => write!(f, "{}", u),
            Ty::Float(x) => write!(f, "{}", x),
            Ty::Tuple(elems) => {
                f.write_str("(")?;
                write_list(f, elems)?;
                if elems.len() == 1 {
                    f.write_str(",")?;
                }
                f.write_str(")")
            }
            Ty::Adt(adt) => {
                f.write_str(&adt.name)?;
                if !adt.args.is_empty() {
                    f.write_str("<")?;
                    write_list(f, &adt.args)?;
                    f.write_str(">")?;
                }
                Ok(())
            }
            Ty::Ref(r) => match r.mutability {
                Mutability::Not => write!(f, "&{}", r.inner),
                Mutability::Mut => write!(f, "&mut {}", r.inner),
            },
            Ty::Param(p) => f.write_str(&p.symbol),
            Ty::FnDef(sig) => {
                write!(f, "fn {}", sig.name)?;
                if !sig.substitutions.is_empty() {
                    f.write_str("<")?;
                    for (i, subst) in sig.substitutions.iter().enumerate() {
                        if i > 0 {
                            f.write_str(", ")?;
                        }
                        f.write_str(&subst.generic.name)?;
                    }
                    f.write_str(">")?;
                }
                f.write_str("(")?;
                for (i, (name, ty)) in sig.params.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}: {}", name, ty)?;
                }
                write!(f, ") -> {}", sig.ret)
            }
            Ty::Infer(InferKind::General) => f.write_str("_"),
            Ty::Infer(InferKind::Integral) => f.write_str("{integer}"),
            Ty::Infer(InferKind::Float) => f.write_str("{float}"),
            Ty::Error(_) => f.write_str("<tyty::error>"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn foo() -> Ty {
        Ty::adt(HirId::new(1), "Foo", Vec::new())
    }

    fn vec_of(arg: Ty) -> Ty {
        Ty::adt(HirId::new(2), "Vec", vec![arg])
    }

    #[test]
    fn test_adt_compatibility() {
        assert!(foo().can_eq(&foo(), true));
        assert!(!foo().can_eq(&Ty::adt(HirId::new(3), "Foo", Vec::new()), false));
        assert!(vec_of(Ty::Bool).can_eq(&vec_of(Ty::Bool), true));
        assert!(!vec_of(Ty::Bool).can_eq(&vec_of(Ty::Char), false));
    }

    #[test]
    fn test_params_only_match_loosely() {
        let t = Ty::param(HirId::new(9), "T");
        assert!(foo().can_eq(&t, false));
        assert!(vec_of(Ty::Bool).can_eq(&vec_of(t.clone()), false));
        assert!(!foo().can_eq(&t, true));
        assert!(t.can_eq(&t, true));
    }

    #[test]
    fn test_reference_mutability() {
        let shared = Ty::reference(Mutability::Not, foo());
        let unique = Ty::reference(Mutability::Mut, foo());
        assert!(shared.can_eq(&unique, false));
        assert!(!shared.can_eq(&unique, true));
        assert!(!shared.can_eq(&foo(), false));
    }

    #[test]
    fn test_inference_variables() {
        let int_var = Ty::Infer(InferKind::Integral);
        assert!(int_var.can_eq(&Ty::Int(IntTy::I32), true));
        assert!(Ty::Uint(UintTy::U8).can_eq(&int_var, true));
        assert!(!int_var.can_eq(&Ty::Float(FloatTy::F64), false));
        assert!(Ty::Infer(InferKind::General).can_eq(&foo(), true));
        assert!(Ty::Infer(InferKind::Float).can_eq(&Ty::Float(FloatTy::F32), true));
    }

    #[test]
    fn test_error_is_never_compatible() {
        let err = Ty::Error(HirId::new(4));
        assert!(!err.can_eq(&err, false));
        assert!(!err.can_eq(&Ty::Infer(InferKind::General), false));
        assert!(!Ty::param(HirId::new(9), "T").can_eq(&err, false));
    }

    #[test]
    fn test_display() {
        assert_eq!(Ty::unit().to_string(), "()");
        assert_eq!(Ty::Tuple(vec![Ty::Bool]).to_string(), "(bool,)");
        assert_eq!(vec_of(Ty::Int(IntTy::I64)).to_string(), "Vec<i64>");
        assert_eq!(Ty::reference(Mutability::Mut, Ty::Str).to_string(), "&mut str");
    }
}
