//! Hint resolution.
//!
//! Rebuilds a hint with every reference replaced by what it resolves to,
//! keeping the shape of everything around it.
//!
//! # Cases
//!
//! | Input | Output |
//! |-------|--------|
//! | `None`, `Any`, `...`, concrete type | unchanged |
//! | reference | its resolution, itself resolved; unbound stays as-is |
//! | tuple / list of hints | same container, elements resolved |
//! | type expression | same constructor, arguments resolved |
//! | opaque value | unchanged, plus one [`HintWarning`] |
//!
//! Unbound module references are retrieved on the way, including ones
//! reached through other references' deliveries. A reference met
//! again while its own resolution is being expanded is a cycle.

use crate::stack::ensure_sufficient_stack;
use crate::{
    CallableParams, Hint, HintWarning, ResolveError, ResolverConfig, TypeExpr, TypeRef,
};

/// Resolve `hint` with default settings, discarding warnings.
pub fn resolve_hint(hint: &Hint) -> Result<Hint, ResolveError> {
    HintResolver::default().resolve(hint)
}

/// A reusable resolver that accumulates warnings across calls.
#[derive(Debug, Default)]
pub struct HintResolver {
    config: ResolverConfig,
    warnings: Vec<HintWarning>,
    /// References whose targets are being expanded, outermost first.
    in_progress: Vec<TypeRef>,
}

impl HintResolver {
    pub fn new(config: ResolverConfig) -> Self {
        Self {
            config,
            warnings: Vec::new(),
            in_progress: Vec::new(),
        }
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Resolve `hint`.
    ///
    /// # Errors
    ///
    /// - [`ResolveError::Cycle`] if a reference ends up inside its own
    ///   resolution
    /// - [`ResolveError::DepthExceeded`] past `max_depth` levels of nesting
    /// - [`ResolveError::Lookup`] if retrieving a module reference fails
    #[tracing::instrument(level = "trace", skip_all, fields(hint = %hint))]
    pub fn resolve(&mut self, hint: &Hint) -> Result<Hint, ResolveError> {
        let result = self.resolve_at(hint, 0);
        // An error unwinds past the pops.
        self.in_progress.clear();
        result
    }

    /// Warnings recorded so far, oldest first.
    pub fn warnings(&self) -> &[HintWarning] {
        &self.warnings
    }

    pub fn take_warnings(&mut self) -> Vec<HintWarning> {
        std::mem::take(&mut self.warnings)
    }

    fn resolve_at(&mut self, hint: &Hint, depth: usize) -> Result<Hint, ResolveError> {
        if depth > self.config.max_depth {
            return Err(ResolveError::DepthExceeded {
                limit: self.config.max_depth,
            });
        }
        ensure_sufficient_stack(|| match hint {
            Hint::None | Hint::Any | Hint::Ellipsis | Hint::Type(_) => Ok(hint.clone()),
            Hint::Ref(reference) => self.resolve_reference(reference, depth),
            Hint::Tuple(elems) => Ok(Hint::Tuple(self.resolve_all(elems, depth)?)),
            Hint::List(elems) => Ok(Hint::List(self.resolve_all(elems, depth)?)),
            Hint::Expr(expr) => self.resolve_expr(expr, depth),
            Hint::Opaque(_) => {
                self.unrecognized(hint, depth);
                Ok(hint.clone())
            }
        })
    }

    fn resolve_reference(&mut self, reference: &TypeRef, depth: usize) -> Result<Hint, ResolveError> {
        if self.in_progress.contains(reference) {
            let chain = self
                .in_progress
                .iter()
                .chain(std::iter::once(reference))
                .map(TypeRef::display_name)
                .collect();
            return Err(ResolveError::Cycle { chain });
        }

        if reference.is_module() && !reference.is_resolved() {
            reference.retrieve()?;
        }

        let target = reference.resolve()?;
        if let Hint::Ref(unbound) = &target {
            // A module reference at the end of the chain has not been
            // retrieved yet; resolving it below retrieves it.
            if !unbound.is_module() || unbound == reference {
                tracing::trace!(reference = %reference, unbound = %unbound, "left unresolved");
                return Ok(target);
            }
        }

        self.in_progress.push(reference.clone());
        let resolved = self.resolve_at(&target, depth + 1);
        self.in_progress.pop();
        resolved
    }

    fn resolve_expr(&mut self, expr: &TypeExpr, depth: usize) -> Result<Hint, ResolveError> {
        let resolved = match expr {
            TypeExpr::Bare(form) => return Ok(Hint::bare(*form)),
            TypeExpr::Union(members) => return Ok(Hint::union(self.resolve_all(members, depth)?)),
            TypeExpr::Tuple(elems) => TypeExpr::Tuple(self.resolve_all(elems, depth)?),
            TypeExpr::Sequence(elem) => {
                TypeExpr::Sequence(Box::new(self.resolve_at(elem, depth + 1)?))
            }
            TypeExpr::Callable { params, ret } => {
                let params = match params {
                    CallableParams::Any => CallableParams::Any,
                    CallableParams::List(params) => {
                        CallableParams::List(self.resolve_all(params, depth)?)
                    }
                };
                TypeExpr::Callable {
                    params,
                    ret: Box::new(self.resolve_at(ret, depth + 1)?),
                }
            }
            TypeExpr::Generic { origin, args } => TypeExpr::Generic {
                origin: *origin,
                args: self.resolve_all(args, depth)?,
            },
        };
        Ok(Hint::Expr(resolved))
    }

    /// Resolve each of `hints`, which sit one level below `depth`.
    fn resolve_all(&mut self, hints: &[Hint], depth: usize) -> Result<Vec<Hint>, ResolveError> {
        hints
            .iter()
            .map(|hint| self.resolve_at(hint, depth + 1))
            .collect()
    }

    fn unrecognized(&mut self, hint: &Hint, depth: usize) {
        if !self.config.warn_on_unrecognized {
            return;
        }
        let warning = HintWarning::unrecognized(hint, depth);
        tracing::warn!(code = %warning.code(), depth, "{}", warning.message());
        self.warnings.push(warning);
    }
}

#[cfg(test)]
mod tests;
