//! The hint vocabulary.
//!
//! Every value the resolver can be handed is a [`Hint`]. The set of shapes is
//! closed: anything the registration layer cannot express with the other
//! variants travels as [`Hint::Opaque`] and is passed through unresolved.

use std::fmt::{self, Write as _};
use std::sync::Arc;

use crate::pool::Builtin;
use crate::{Idx, TypeRef};

/// A type hint, possibly containing unresolved references.
///
/// Equality is structural except for [`Hint::Ref`] and [`Hint::Opaque`],
/// which compare by identity of the shared object.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Hint {
    /// The `None` leaf.
    None,
    /// The "any type" sentinel.
    Any,
    /// The `...` sentinel.
    Ellipsis,
    /// A concrete type.
    Type(Idx),
    /// A placeholder that may or may not be delivered yet.
    Ref(TypeRef),
    /// A tuple of hints, e.g. a parameter list.
    Tuple(Vec<Hint>),
    /// A list of hints.
    List(Vec<Hint>),
    /// A composite type expression.
    Expr(TypeExpr),
    /// A value with no hint structure.
    Opaque(Opaque),
}

/// A composite built from a constructor and type arguments.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TypeExpr {
    /// A constructor used without arguments, e.g. bare `Callable`.
    Bare(Form),
    /// One of the alternatives. Build with [`Hint::union`] to normalize.
    Union(Vec<Hint>),
    /// Fixed-length tuple type, `Tuple[A, B]`. Empty is `Tuple[()]`.
    Tuple(Vec<Hint>),
    /// Variable-length homogeneous sequence, `Sequence[A]`.
    Sequence(Box<Hint>),
    /// `Callable[[A, B], R]` or `Callable[..., R]`.
    Callable {
        params: CallableParams,
        ret: Box<Hint>,
    },
    /// A parameterized class, e.g. `list[int]` or `dict[str, A]`.
    Generic { origin: Idx, args: Vec<Hint> },
}

/// Special-form constructors.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Form {
    Union,
    Tuple,
    Sequence,
    Callable,
}

impl Form {
    pub const fn name(self) -> &'static str {
        match self {
            Form::Union => "Union",
            Form::Tuple => "Tuple",
            Form::Sequence => "Sequence",
            Form::Callable => "Callable",
        }
    }
}

/// Parameter side of a callable expression.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CallableParams {
    /// `...`: any parameters.
    Any,
    List(Vec<Hint>),
}

/// An arbitrary value carried through resolution untouched.
#[derive(Clone)]
pub struct Opaque(Arc<dyn fmt::Debug + Send + Sync>);

impl Opaque {
    pub fn new(value: impl fmt::Debug + Send + Sync + 'static) -> Self {
        Opaque(Arc::new(value))
    }

    pub fn ptr_eq(&self, other: &Opaque) -> bool {
        std::ptr::addr_eq(Arc::as_ptr(&self.0), Arc::as_ptr(&other.0))
    }
}

impl PartialEq for Opaque {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for Opaque {}

impl fmt::Debug for Opaque {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Opaque({:?})", self.0)
    }
}

impl Hint {
    /// `Union[members...]`, normalized.
    ///
    /// Nested unions are flattened, repeated members dropped (first wins)
    /// and a single surviving member is returned on its own. An empty
    /// member list stays an empty union.
    pub fn union(members: impl IntoIterator<Item = Hint>) -> Hint {
        let mut flat = Vec::new();
        for member in members {
            flatten_union_member(member, &mut flat);
        }
        if flat.len() == 1 {
            if let Some(only) = flat.pop() {
                return only;
            }
        }
        Hint::Expr(TypeExpr::Union(flat))
    }

    /// `Tuple[elems...]` as a type expression.
    pub fn tuple_type(elems: impl IntoIterator<Item = Hint>) -> Hint {
        Hint::Expr(TypeExpr::Tuple(elems.into_iter().collect()))
    }

    /// `Sequence[elem]`.
    pub fn sequence(elem: impl Into<Hint>) -> Hint {
        Hint::Expr(TypeExpr::Sequence(Box::new(elem.into())))
    }

    /// `Callable[[params...], ret]`.
    pub fn callable(params: impl IntoIterator<Item = Hint>, ret: impl Into<Hint>) -> Hint {
        Hint::Expr(TypeExpr::Callable {
            params: CallableParams::List(params.into_iter().collect()),
            ret: Box::new(ret.into()),
        })
    }

    /// `Callable[..., ret]`.
    pub fn callable_any(ret: impl Into<Hint>) -> Hint {
        Hint::Expr(TypeExpr::Callable {
            params: CallableParams::Any,
            ret: Box::new(ret.into()),
        })
    }

    /// `origin[args...]`.
    pub fn generic(origin: impl Into<Idx>, args: impl IntoIterator<Item = Hint>) -> Hint {
        Hint::Expr(TypeExpr::Generic {
            origin: origin.into(),
            args: args.into_iter().collect(),
        })
    }

    pub fn bare(form: Form) -> Hint {
        Hint::Expr(TypeExpr::Bare(form))
    }

    pub fn opaque(value: impl fmt::Debug + Send + Sync + 'static) -> Hint {
        Hint::Opaque(Opaque::new(value))
    }

    /// `None`, `Any` or `...`.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        matches!(self, Hint::None | Hint::Any | Hint::Ellipsis)
    }

    pub fn as_type(&self) -> Option<Idx> {
        match self {
            Hint::Type(idx) => Some(*idx),
            _ => None,
        }
    }

    pub fn as_reference(&self) -> Option<&TypeRef> {
        match self {
            Hint::Ref(reference) => Some(reference),
            _ => None,
        }
    }

    /// Render with `type_name` deciding how concrete types are spelled.
    pub(crate) fn render(&self, out: &mut String, type_name: &dyn Fn(Idx, &mut String)) {
        match self {
            Hint::None => out.push_str("None"),
            Hint::Any => out.push_str("Any"),
            Hint::Ellipsis => out.push_str("..."),
            Hint::Type(idx) => type_name(*idx, out),
            Hint::Ref(reference) => out.push_str(&reference.display_name()),
            Hint::Tuple(elems) => {
                out.push('(');
                render_list(elems, out, type_name);
                if elems.len() == 1 {
                    out.push(',');
                }
                out.push(')');
            }
            Hint::List(elems) => {
                out.push('[');
                render_list(elems, out, type_name);
                out.push(']');
            }
            Hint::Expr(expr) => expr.render(out, type_name),
            Hint::Opaque(opaque) => {
                let _ = write!(out, "<opaque {:?}>", opaque.0);
            }
        }
    }
}

impl TypeExpr {
    fn render(&self, out: &mut String, type_name: &dyn Fn(Idx, &mut String)) {
        match self {
            TypeExpr::Bare(form) => out.push_str(form.name()),
            TypeExpr::Union(members) => {
                out.push_str("Union[");
                render_list(members, out, type_name);
                out.push(']');
            }
            TypeExpr::Tuple(elems) => {
                out.push_str("Tuple[");
                if elems.is_empty() {
                    out.push_str("()");
                } else {
                    render_list(elems, out, type_name);
                }
                out.push(']');
            }
            TypeExpr::Sequence(elem) => {
                out.push_str("Sequence[");
                elem.render(out, type_name);
                out.push(']');
            }
            TypeExpr::Callable { params, ret } => {
                out.push_str("Callable[");
                match params {
                    CallableParams::Any => out.push_str("..."),
                    CallableParams::List(params) => {
                        out.push('[');
                        render_list(params, out, type_name);
                        out.push(']');
                    }
                }
                out.push_str(", ");
                ret.render(out, type_name);
                out.push(']');
            }
            TypeExpr::Generic { origin, args } => {
                type_name(*origin, out);
                out.push('[');
                render_list(args, out, type_name);
                out.push(']');
            }
        }
    }
}

fn render_list(hints: &[Hint], out: &mut String, type_name: &dyn Fn(Idx, &mut String)) {
    for (i, hint) in hints.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        hint.render(out, type_name);
    }
}

fn flatten_union_member(member: Hint, flat: &mut Vec<Hint>) {
    match member {
        Hint::Expr(TypeExpr::Union(inner)) => {
            for m in inner {
                flatten_union_member(m, flat);
            }
        }
        other => {
            if !flat.contains(&other) {
                flat.push(other);
            }
        }
    }
}

impl fmt::Display for Hint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut buf = String::new();
        self.render(&mut buf, &|idx, out| {
            let _ = write!(out, "{idx}");
        });
        f.write_str(&buf)
    }
}

impl From<Idx> for Hint {
    fn from(idx: Idx) -> Self {
        Hint::Type(idx)
    }
}

impl From<Builtin> for Hint {
    fn from(builtin: Builtin) -> Self {
        Hint::Type(builtin.idx())
    }
}

impl From<Builtin> for Idx {
    fn from(builtin: Builtin) -> Self {
        builtin.idx()
    }
}

impl From<TypeRef> for Hint {
    fn from(reference: TypeRef) -> Self {
        Hint::Ref(reference)
    }
}

impl From<&TypeRef> for Hint {
    fn from(reference: &TypeRef) -> Self {
        Hint::Ref(reference.clone())
    }
}

impl From<TypeExpr> for Hint {
    fn from(expr: TypeExpr) -> Self {
        Hint::Expr(expr)
    }
}
