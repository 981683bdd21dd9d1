//! String interner for registry keys.
//!
//! Registration is a load-time activity with little contention, so a single
//! table behind one `RwLock` is enough. Reads (the common case once every
//! module has registered its names) only take the shared lock.

use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::Name;

/// Error when interning a string fails.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InternError {
    /// The table already holds `u32::MAX` strings.
    #[error("string interner exceeded capacity: {count} strings, max is {}", u32::MAX)]
    Overflow { count: usize },
}

#[derive(Default)]
struct InternTable {
    map: FxHashMap<Arc<str>, Name>,
    strings: Vec<Arc<str>>,
}

impl InternTable {
    fn insert(&mut self, s: &str) -> Result<Name, InternError> {
        if let Some(&name) = self.map.get(s) {
            return Ok(name);
        }
        let raw = u32::try_from(self.strings.len()).map_err(|_| InternError::Overflow {
            count: self.strings.len(),
        })?;
        let name = Name::from_raw(raw);
        let stored: Arc<str> = Arc::from(s);
        self.strings.push(Arc::clone(&stored));
        self.map.insert(stored, name);
        Ok(name)
    }
}

/// Interner mapping strings to [`Name`] handles.
///
/// The empty string is always [`Name::EMPTY`]. Module names that the
/// builtin namespaces use are interned up front.
pub struct StringInterner {
    table: RwLock<InternTable>,
}

impl StringInterner {
    pub fn new() -> Self {
        let interner = Self {
            table: RwLock::new(InternTable::default()),
        };
        interner.pre_intern_well_known();
        interner
    }

    /// Intern a string, returning its existing name when already present.
    pub fn try_intern(&self, s: &str) -> Result<Name, InternError> {
        {
            let guard = self.table.read();
            if let Some(&name) = guard.map.get(s) {
                return Ok(name);
            }
        }
        // Another writer may have inserted between the two locks; `insert`
        // re-checks under the write lock.
        self.table.write().insert(s)
    }

    /// Intern a string.
    ///
    /// # Panics
    /// Panics if the table is full. Use [`try_intern`](Self::try_intern) to
    /// handle that case.
    pub fn intern(&self, s: &str) -> Name {
        self.try_intern(s).unwrap_or_else(|e| panic!("{e}"))
    }

    /// Look up a name without interning. Returns `None` for unseen strings.
    pub fn get(&self, s: &str) -> Option<Name> {
        self.table.read().map.get(s).copied()
    }

    /// The string behind a name, or `None` if the name came from another
    /// interner and is out of range here.
    pub fn lookup(&self, name: Name) -> Option<Arc<str>> {
        self.table.read().strings.get(name.index()).cloned()
    }

    fn pre_intern_well_known(&self) {
        const WELL_KNOWN: &[&str] = &[
            "",
            "builtins",
            "__builtin__",
            "__builtins__",
            "typing",
            "collections.abc",
        ];
        let mut table = self.table.write();
        for s in WELL_KNOWN {
            // Fresh table well below capacity.
            let _ = table.insert(s);
        }
    }

    pub fn len(&self) -> usize {
        self.table.read().strings.len()
    }

    /// True when only the pre-interned strings are present.
    pub fn is_empty(&self) -> bool {
        self.len() <= 6
    }
}

impl Default for StringInterner {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for StringInterner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StringInterner")
            .field("len", &self.len())
            .finish()
    }
}

/// Cloneable handle to one interner shared by the pool and the registry.
#[derive(Clone, Debug, Default)]
pub struct SharedInterner(Arc<StringInterner>);

impl SharedInterner {
    pub fn new() -> Self {
        SharedInterner(Arc::new(StringInterner::new()))
    }
}

impl std::ops::Deref for SharedInterner {
    type Target = StringInterner;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
