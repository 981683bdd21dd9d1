//! Namespaces that module-qualified references look types up in.
//!
//! The host fills a [`Namespaces`] table at startup: one attribute table per
//! module name, plus aliases for modules known under more than one name
//! (`__builtin__` and `__builtins__` both mean `builtins`). Module references
//! only see the [`TypeSource`] trait, so a host can plug in its own lookup.

use std::collections::BTreeMap;
use std::sync::Arc;

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::pool::Builtin;
use crate::{Form, Hint, Idx, LookupError, Pool};

/// Something that can produce the hint bound to `module.attribute`.
pub trait TypeSource: Send + Sync {
    fn lookup(&self, module: &str, attribute: &str) -> Result<Hint, LookupError>;
}

/// Attribute tables keyed by module name.
#[derive(Clone, Debug, Default)]
pub struct Namespaces {
    modules: FxHashMap<String, BTreeMap<String, Hint>>,
    /// Alias -> the module names it stands for.
    aliases: FxHashMap<String, SmallVec<[String; 2]>>,
}

impl Namespaces {
    pub fn new() -> Self {
        Self::default()
    }

    /// Namespaces preloaded with `builtins`, `typing` and `collections.abc`.
    pub fn with_builtins() -> Self {
        let mut ns = Self::new();

        for builtin in Builtin::ALL {
            ns.define("builtins", builtin.name(), builtin);
        }
        ns.alias("__builtin__", "builtins");
        ns.alias("__builtins__", "builtins");

        ns.define("typing", "Any", Hint::Any);
        for form in [Form::Union, Form::Tuple, Form::Sequence, Form::Callable] {
            ns.define("typing", form.name(), Hint::bare(form));
        }
        for (name, idx) in [
            ("List", Idx::LIST),
            ("Dict", Idx::DICT),
            ("Set", Idx::SET),
            ("FrozenSet", Idx::FROZENSET),
            ("Type", Idx::TYPE),
        ] {
            ns.define("typing", name, idx);
        }

        ns.define("collections.abc", "Callable", Hint::bare(Form::Callable));
        ns.define("collections.abc", "Sequence", Hint::bare(Form::Sequence));
        ns
    }

    /// Make sure `module` exists, even with no attributes.
    pub fn declare_module(&mut self, module: &str) {
        self.modules.entry(module.to_owned()).or_default();
    }

    /// Bind `module.attribute` to `hint`, returning the previous binding.
    pub fn define(&mut self, module: &str, attribute: &str, hint: impl Into<Hint>) -> Option<Hint> {
        self.modules
            .entry(module.to_owned())
            .or_default()
            .insert(attribute.to_owned(), hint.into())
    }

    /// Intern the class `module.name` and bind it under that name.
    pub fn define_class(&mut self, pool: &mut Pool, module: &str, name: &str) -> Idx {
        let idx = pool.class(module, name);
        self.define(module, name, idx);
        idx
    }

    /// Register `alias` as another name for `canonical`.
    pub fn alias(&mut self, alias: &str, canonical: &str) {
        let targets = self.aliases.entry(alias.to_owned()).or_default();
        if !targets.iter().any(|t| t == canonical) {
            targets.push(canonical.to_owned());
        }
    }

    pub fn has_module(&self, module: &str) -> bool {
        self.modules.contains_key(module)
    }

    /// Attribute names of `module` in sorted order.
    pub fn attributes(&self, module: &str) -> Option<Vec<&str>> {
        self.modules
            .get(module)
            .map(|table| table.keys().map(String::as_str).collect())
    }

    /// Module names to try for `module`, most specific first: the name
    /// itself, what it is an alias of, then aliases that point at it.
    fn candidates<'a>(&'a self, module: &'a str) -> SmallVec<[&'a str; 4]> {
        let mut names: SmallVec<[&'a str; 4]> = SmallVec::new();
        names.push(module);

        if let Some(targets) = self.aliases.get(module) {
            for target in targets {
                if !names.contains(&target.as_str()) {
                    names.push(target.as_str());
                }
            }
        }

        let mut reverse: SmallVec<[&'a str; 4]> = self
            .aliases
            .iter()
            .filter(|(_, targets)| targets.iter().any(|t| t == module))
            .map(|(alias, _)| alias.as_str())
            .collect();
        // Map iteration order is unspecified.
        reverse.sort_unstable();
        for alias in reverse {
            if !names.contains(&alias) {
                names.push(alias);
            }
        }
        names
    }
}

impl TypeSource for Namespaces {
    fn lookup(&self, module: &str, attribute: &str) -> Result<Hint, LookupError> {
        let candidates = self.candidates(module);
        let mut saw_module = false;

        for name in &candidates {
            let Some(table) = self.modules.get(*name) else {
                continue;
            };
            saw_module = true;
            if let Some(hint) = table.get(attribute) {
                tracing::trace!(module, attribute, found_in = *name, "namespace lookup");
                return Ok(hint.clone());
            }
        }

        if saw_module {
            Err(LookupError::AttributeNotFound {
                module: module.to_owned(),
                attribute: attribute.to_owned(),
            })
        } else {
            Err(LookupError::ModuleNotFound {
                module: module.to_owned(),
                tried: candidates.iter().map(|s| (*s).to_owned()).collect(),
            })
        }
    }
}

/// Cloneable handle to one [`Namespaces`] table.
///
/// This is what module references normally hold, so modules defined after
/// the reference was created are still found on `retrieve`.
#[derive(Clone, Debug, Default)]
pub struct SharedNamespaces(Arc<RwLock<Namespaces>>);

impl SharedNamespaces {
    pub fn new(namespaces: Namespaces) -> Self {
        SharedNamespaces(Arc::new(RwLock::new(namespaces)))
    }

    pub fn with_builtins() -> Self {
        Self::new(Namespaces::with_builtins())
    }

    pub fn read(&self) -> RwLockReadGuard<'_, Namespaces> {
        self.0.read()
    }

    pub fn write(&self) -> RwLockWriteGuard<'_, Namespaces> {
        self.0.write()
    }
}

impl TypeSource for SharedNamespaces {
    fn lookup(&self, module: &str, attribute: &str) -> Result<Hint, LookupError> {
        self.0.read().lookup(module, attribute)
    }
}
