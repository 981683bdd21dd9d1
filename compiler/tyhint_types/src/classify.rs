//! Structural classification of hints.
//!
//! None of these functions resolve anything or touch reference bindings
//! beyond reading them; they are safe to call on any hint.

use crate::stack::ensure_sufficient_stack;
use crate::{CallableParams, Hint, TypeExpr};

/// Coarse shape of a hint.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum HintKind {
    /// `None`, `Any` or `...`.
    Leaf,
    /// A concrete type.
    Concrete,
    /// A type reference.
    Reference,
    /// A tuple or list of hints.
    Container,
    /// A composite type expression.
    Expression,
    /// Anything else.
    Opaque,
}

impl HintKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            HintKind::Leaf => "leaf",
            HintKind::Concrete => "concrete",
            HintKind::Reference => "reference",
            HintKind::Container => "container",
            HintKind::Expression => "expression",
            HintKind::Opaque => "opaque",
        }
    }
}

pub fn classify(hint: &Hint) -> HintKind {
    match hint {
        Hint::None | Hint::Any | Hint::Ellipsis => HintKind::Leaf,
        Hint::Type(_) => HintKind::Concrete,
        Hint::Ref(_) => HintKind::Reference,
        Hint::Tuple(_) | Hint::List(_) => HintKind::Container,
        Hint::Expr(_) => HintKind::Expression,
        Hint::Opaque(_) => HintKind::Opaque,
    }
}

/// Whether `hint` is a constructor-plus-arguments type expression,
/// including a bare constructor such as `Callable`.
///
/// Plain types, references, containers and opaque values are not.
#[inline]
pub fn is_type_expression(hint: &Hint) -> bool {
    classify(hint) == HintKind::Expression
}

/// Whether `hint` mentions a type reference anywhere, bound or not.
///
/// A hint returned by the resolver is free of references unless some
/// reference was never delivered.
pub fn contains_references(hint: &Hint) -> bool {
    ensure_sufficient_stack(|| match hint {
        Hint::Ref(_) => true,
        Hint::None | Hint::Any | Hint::Ellipsis | Hint::Type(_) | Hint::Opaque(_) => false,
        Hint::Tuple(elems) | Hint::List(elems) => elems.iter().any(contains_references),
        Hint::Expr(expr) => match expr {
            TypeExpr::Bare(_) => false,
            TypeExpr::Union(args) | TypeExpr::Tuple(args) | TypeExpr::Generic { args, .. } => {
                args.iter().any(contains_references)
            }
            TypeExpr::Sequence(elem) => contains_references(elem),
            TypeExpr::Callable { params, ret } => {
                let in_params = match params {
                    CallableParams::Any => false,
                    CallableParams::List(params) => params.iter().any(contains_references),
                };
                in_params || contains_references(ret)
            }
        },
    })
}

#[cfg(test)]
mod tests;
