//! Errors raised while building, retrieving or resolving references.
//!
//! An unresolved reference is not an error, and neither is an unrecognized
//! hint (that is a [`HintWarning`](crate::HintWarning)). What remains are
//! configuration mistakes the caller has to fix: a type that cannot be
//! found, or references delivered to each other in a loop.

/// A module-qualified lookup failed.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    /// A module reference was built with an empty module or attribute.
    #[error("module-qualified reference needs a non-empty {what} name")]
    EmptyName { what: &'static str },

    /// No candidate module name has a namespace.
    #[error("no module named `{module}` (tried {})", .tried.join(", "))]
    ModuleNotFound { module: String, tried: Vec<String> },

    /// The module exists under some name, but no candidate has the attribute.
    #[error("module `{module}` has no attribute `{attribute}`")]
    AttributeNotFound { module: String, attribute: String },
}

/// Resolution could not produce a hint.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    /// Following deliveries came back to a reference already on the path.
    /// `chain` lists display names in visiting order, ending with the repeat.
    #[error("cyclic type reference: {}", .chain.join(" -> "))]
    Cycle { chain: Vec<String> },

    /// The hint is nested deeper than the configured limit.
    #[error("type hint nesting exceeds the configured depth limit of {limit}")]
    DepthExceeded { limit: usize },

    /// A module reference met during resolution could not be retrieved.
    #[error(transparent)]
    Lookup(#[from] LookupError),
}

/// The type pool is full.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("type pool exceeded capacity: {len} types, max is {}", u32::MAX)]
pub struct PoolError {
    pub len: usize,
}
