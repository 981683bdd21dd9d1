//! Type identity registry.
//!
//! Forward references are only useful if every signature that says
//! "`Node`, to be delivered later" ends up holding the same placeholder.
//! The registry interns references by key so that holds without the caller
//! threading handles around.
//!
//! # Keys
//!
//! - promised references: the promise name
//! - module references: the `(module, attribute)` pair
//!
//! Keys are interned [`Name`]s; entries are `TypeRef` clones, so the
//! registry keeps every registered reference alive.

use std::collections::BTreeMap;
use std::sync::Arc;

use parking_lot::RwLock;
use tyhint_ir::{Name, SharedInterner};

use crate::{Hint, LookupError, TypeRef, TypeSource};

#[derive(Default)]
pub struct RefRegistry {
    interner: SharedInterner,
    promised: RwLock<BTreeMap<Name, TypeRef>>,
    modules: RwLock<BTreeMap<(Name, Name), TypeRef>>,
}

impl RefRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `interner` for keys, e.g. the one the type pool shares.
    pub fn with_interner(interner: SharedInterner) -> Self {
        Self {
            interner,
            promised: RwLock::default(),
            modules: RwLock::default(),
        }
    }

    /// The promised reference named `name`, created on first request.
    pub fn promised(&self, name: &str) -> TypeRef {
        let key = self.interner.intern(name);
        if let Some(existing) = self.promised.read().get(&key) {
            return existing.clone();
        }
        self.promised
            .write()
            .entry(key)
            .or_insert_with(|| {
                tracing::debug!(name, "registered promised type");
                TypeRef::promised(name)
            })
            .clone()
    }

    /// The module reference for `module.attribute`, created on first
    /// request. A later request with a different `source` gets the
    /// existing reference, still bound to the first source.
    pub fn module(
        &self,
        source: impl TypeSource + 'static,
        module: &str,
        attribute: &str,
    ) -> Result<TypeRef, LookupError> {
        self.module_entry(Arc::new(source), module, attribute, false)
    }

    /// Allow-fail variant of [`module`](Self::module); see
    /// [`TypeRef::module_allow_fail`].
    pub fn module_allow_fail(
        &self,
        source: impl TypeSource + 'static,
        module: &str,
        attribute: &str,
    ) -> Result<TypeRef, LookupError> {
        self.module_entry(Arc::new(source), module, attribute, true)
    }

    fn module_entry(
        &self,
        source: Arc<dyn TypeSource>,
        module: &str,
        attribute: &str,
        allow_fail: bool,
    ) -> Result<TypeRef, LookupError> {
        let key = (self.interner.intern(module), self.interner.intern(attribute));
        if let Some(existing) = self.modules.read().get(&key) {
            return Ok(existing.clone());
        }
        let mut modules = self.modules.write();
        if let Some(existing) = modules.get(&key) {
            return Ok(existing.clone());
        }
        let reference = TypeRef::module_with(source, module, attribute, allow_fail)?;
        tracing::debug!(module, attribute, "registered module type");
        modules.insert(key, reference.clone());
        Ok(reference)
    }

    pub fn get_promised(&self, name: &str) -> Option<TypeRef> {
        let key = self.interner.get(name)?;
        self.promised.read().get(&key).cloned()
    }

    pub fn get_module(&self, module: &str, attribute: &str) -> Option<TypeRef> {
        let key = (self.interner.get(module)?, self.interner.get(attribute)?);
        self.modules.read().get(&key).cloned()
    }

    pub fn len(&self) -> usize {
        self.promised.read().len() + self.modules.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Registered references that do not resolve to a real type yet,
    /// promises first, each group ordered by interned key.
    ///
    /// A reference counts as unresolved when following its deliveries ends at
    /// a placeholder or at a cycle, not only when it has no binding itself.
    pub fn unresolved(&self) -> Vec<TypeRef> {
        let promised = self.promised.read();
        let modules = self.modules.read();
        promised
            .values()
            .chain(modules.values())
            .filter(|reference| !resolves_to_type(reference))
            .cloned()
            .collect()
    }

    /// Retrieve every registered module reference, stopping at the first
    /// lookup error.
    pub fn retrieve_all(&self) -> Result<(), LookupError> {
        // Snapshot so retrieval does not run under the registry lock.
        let references: Vec<TypeRef> = self.modules.read().values().cloned().collect();
        for reference in references {
            reference.retrieve()?;
        }
        Ok(())
    }
}

fn resolves_to_type(reference: &TypeRef) -> bool {
    match reference.resolve() {
        Ok(Hint::Ref(_)) | Err(_) => false,
        Ok(_) => true,
    }
}

impl std::fmt::Debug for RefRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RefRegistry")
            .field("promised", &self.promised.read().len())
            .field("modules", &self.modules.read().len())
            .finish_non_exhaustive()
    }
}
