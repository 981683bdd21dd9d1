//! Type references: placeholders that are delivered a real type later.
//!
//! A [`TypeRef`] is a handle to a shared cell. Every signature that mentions
//! the placeholder holds a clone of the same handle, so one `deliver` is seen
//! by all of them.
//!
//! # Lifecycle
//!
//! ```text
//! Unbound --deliver(T)--> Bound(T) --deliver(U)--> Bound(U) ...
//! ```
//!
//! Delivery is last-write-wins. `resolve` follows bindings through other
//! references until it reaches a non-reference hint or an unbound reference.

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashSet;

use crate::{Hint, LookupError, ResolveError, TypeSource};

/// Which kind of placeholder a [`TypeRef`] is.
pub enum RefKind {
    /// A plain named placeholder.
    Resolvable { name: String },
    /// A forward declaration the declaring module delivers itself.
    Promised { name: String },
    /// An attribute of a module, looked up through `source` on
    /// [`retrieve`](TypeRef::retrieve).
    Module {
        module: String,
        attribute: String,
        source: Arc<dyn TypeSource>,
        /// Lookup failures leave the reference unbound instead of erroring.
        allow_fail: bool,
    },
}

impl fmt::Debug for RefKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RefKind::Resolvable { name } => f.debug_struct("Resolvable").field("name", name).finish(),
            RefKind::Promised { name } => f.debug_struct("Promised").field("name", name).finish(),
            RefKind::Module {
                module,
                attribute,
                allow_fail,
                ..
            } => f
                .debug_struct("Module")
                .field("module", module)
                .field("attribute", attribute)
                .field("allow_fail", allow_fail)
                .finish_non_exhaustive(),
        }
    }
}

struct RefSlot {
    kind: RefKind,
    binding: RwLock<Option<Hint>>,
}

/// Shared handle to a type placeholder.
///
/// Cloning is cheap and yields the same placeholder; equality is identity.
#[derive(Clone)]
pub struct TypeRef(Arc<RefSlot>);

impl TypeRef {
    fn with_kind(kind: RefKind) -> Self {
        TypeRef(Arc::new(RefSlot {
            kind,
            binding: RwLock::new(None),
        }))
    }

    /// A plain placeholder named `name`.
    pub fn resolvable(name: impl Into<String>) -> Self {
        Self::with_kind(RefKind::Resolvable { name: name.into() })
    }

    /// A forward declaration named `name`.
    ///
    /// Each call makes a new placeholder. Use
    /// [`RefRegistry::promised`](crate::RefRegistry::promised) to share one
    /// by name.
    pub fn promised(name: impl Into<String>) -> Self {
        Self::with_kind(RefKind::Promised { name: name.into() })
    }

    /// A reference to `module.attribute`, looked up through `source`.
    pub fn module(
        source: impl TypeSource + 'static,
        module: &str,
        attribute: &str,
    ) -> Result<Self, LookupError> {
        Self::module_with(Arc::new(source), module, attribute, false)
    }

    /// Like [`module`](Self::module), but a failed lookup in
    /// [`retrieve`](Self::retrieve) leaves the reference unbound.
    pub fn module_allow_fail(
        source: impl TypeSource + 'static,
        module: &str,
        attribute: &str,
    ) -> Result<Self, LookupError> {
        Self::module_with(Arc::new(source), module, attribute, true)
    }

    pub(crate) fn module_with(
        source: Arc<dyn TypeSource>,
        module: &str,
        attribute: &str,
        allow_fail: bool,
    ) -> Result<Self, LookupError> {
        if module.is_empty() {
            return Err(LookupError::EmptyName { what: "module" });
        }
        if attribute.is_empty() {
            return Err(LookupError::EmptyName { what: "attribute" });
        }
        Ok(Self::with_kind(RefKind::Module {
            module: module.to_owned(),
            attribute: attribute.to_owned(),
            source,
            allow_fail,
        }))
    }

    pub fn kind(&self) -> &RefKind {
        &self.0.kind
    }

    /// Name used in diagnostics. Delivery does not change it.
    ///
    /// - resolvable: the name itself
    /// - promised: `PromisedType[name]`
    /// - module: `ModuleType[module.attribute]`
    pub fn display_name(&self) -> String {
        match &self.0.kind {
            RefKind::Resolvable { name } => name.clone(),
            RefKind::Promised { name } => format!("PromisedType[{name}]"),
            RefKind::Module {
                module, attribute, ..
            } => format!("ModuleType[{module}.{attribute}]"),
        }
    }

    #[inline]
    pub fn is_module(&self) -> bool {
        matches!(self.0.kind, RefKind::Module { .. })
    }

    /// Whether this reference itself has a binding. The binding may be
    /// another, still unbound, reference.
    pub fn is_resolved(&self) -> bool {
        self.0.binding.read().is_some()
    }

    /// Identity comparison.
    #[inline]
    pub fn ptr_eq(&self, other: &TypeRef) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    fn addr(&self) -> usize {
        Arc::as_ptr(&self.0) as usize
    }

    /// Bind this reference to `target`, replacing any earlier binding.
    ///
    /// Returns the reference itself so declarations can chain.
    ///
    /// The binding holds strong handles. Delivering a reference to itself,
    /// or to a hint that leads back to it, keeps the cycle alive after every
    /// outside handle is dropped; redelivering any member to a non-cyclic
    /// target releases it.
    pub fn deliver(&self, target: impl Into<Hint>) -> TypeRef {
        let target = target.into();
        tracing::debug!(reference = %self.display_name(), target = %target, "deliver");
        *self.0.binding.write() = Some(target);
        self.clone()
    }

    /// Follow bindings to the first hint that is not a bound reference.
    ///
    /// Unbound references resolve to themselves. A chain that revisits a
    /// reference is reported as [`ResolveError::Cycle`].
    pub fn resolve(&self) -> Result<Hint, ResolveError> {
        let mut visited = FxHashSet::default();
        let mut chain = Vec::new();
        let mut current = self.clone();
        loop {
            chain.push(current.display_name());
            if !visited.insert(current.addr()) {
                return Err(ResolveError::Cycle { chain });
            }
            // Clone out so no lock is held while following the chain.
            let binding = current.0.binding.read().clone();
            match binding {
                None => return Ok(Hint::Ref(current)),
                Some(Hint::Ref(next)) => current = next,
                Some(hint) => return Ok(hint),
            }
        }
    }

    /// Look the module attribute up and deliver it to this reference.
    ///
    /// Every call repeats the lookup. Returns the reference itself, not the
    /// looked-up type; call [`resolve`](Self::resolve) for that. Plain and
    /// promised references have nothing to retrieve and are returned as-is.
    pub fn retrieve(&self) -> Result<TypeRef, LookupError> {
        let RefKind::Module {
            module,
            attribute,
            source,
            allow_fail,
        } = &self.0.kind
        else {
            return Ok(self.clone());
        };

        match source.lookup(module, attribute) {
            Ok(hint) => Ok(self.deliver(hint)),
            Err(err) if *allow_fail => {
                tracing::debug!(reference = %self.display_name(), error = %err, "lookup failed, left unbound");
                Ok(self.clone())
            }
            Err(err) => Err(err),
        }
    }
}

impl PartialEq for TypeRef {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for TypeRef {}

impl fmt::Debug for TypeRef {
    // Never prints the target: bindings may form cycles.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = if self.is_resolved() { "bound" } else { "unbound" };
        write!(f, "TypeRef({}, {state})", self.display_name())
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_name())
    }
}
