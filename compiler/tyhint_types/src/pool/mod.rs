//! Interned storage for concrete types.
//!
//! A dispatcher compares parameter types by identity, so every concrete
//! type a hint can resolve to is interned here once and handed out as an
//! [`Idx`]. Builtins are pre-interned at the fixed indices declared on
//! `Idx`; classes are interned on first mention.

mod format;

use std::sync::Arc;

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use rustc_hash::FxHashMap;
use tyhint_ir::{Name, SharedInterner};

use crate::{Idx, PoolError};

/// Builtin types known without any registration.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Builtin {
    Object,
    Int,
    Float,
    Complex,
    Bool,
    Str,
    Bytes,
    NoneType,
    Type,
    List,
    Tuple,
    Dict,
    Set,
    FrozenSet,
}

impl Builtin {
    /// Every builtin, in `Idx` order.
    pub const ALL: [Builtin; Idx::BUILTIN_COUNT as usize] = [
        Builtin::Object,
        Builtin::Int,
        Builtin::Float,
        Builtin::Complex,
        Builtin::Bool,
        Builtin::Str,
        Builtin::Bytes,
        Builtin::NoneType,
        Builtin::Type,
        Builtin::List,
        Builtin::Tuple,
        Builtin::Dict,
        Builtin::Set,
        Builtin::FrozenSet,
    ];

    #[inline]
    pub const fn idx(self) -> Idx {
        Idx::from_raw(self as u32)
    }

    pub const fn name(self) -> &'static str {
        match self {
            Builtin::Object => "object",
            Builtin::Int => "int",
            Builtin::Float => "float",
            Builtin::Complex => "complex",
            Builtin::Bool => "bool",
            Builtin::Str => "str",
            Builtin::Bytes => "bytes",
            Builtin::NoneType => "NoneType",
            Builtin::Type => "type",
            Builtin::List => "list",
            Builtin::Tuple => "tuple",
            Builtin::Dict => "dict",
            Builtin::Set => "set",
            Builtin::FrozenSet => "frozenset",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|b| b.name() == name)
    }
}

/// What an [`Idx`] stands for.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum TypeData {
    Builtin(Builtin),
    /// A nominal type defined in a module.
    Class { module: Name, name: Name },
}

/// The type pool.
pub struct Pool {
    interner: SharedInterner,
    types: Vec<TypeData>,
    map: FxHashMap<TypeData, Idx>,
}

impl Pool {
    /// Create a pool with its own interner.
    pub fn new() -> Self {
        Self::with_interner(SharedInterner::new())
    }

    /// Create a pool that interns class names through `interner`.
    pub fn with_interner(interner: SharedInterner) -> Self {
        let mut pool = Pool {
            interner,
            types: Vec::with_capacity(64),
            map: FxHashMap::default(),
        };
        for builtin in Builtin::ALL {
            let data = TypeData::Builtin(builtin);
            pool.map.insert(data.clone(), builtin.idx());
            pool.types.push(data);
        }
        pool
    }

    pub fn interner(&self) -> &SharedInterner {
        &self.interner
    }

    /// Intern `data`, returning the existing handle if it was seen before.
    pub fn try_intern(&mut self, data: TypeData) -> Result<Idx, PoolError> {
        if let Some(&idx) = self.map.get(&data) {
            return Ok(idx);
        }
        let raw = u32::try_from(self.types.len()).map_err(|_| PoolError {
            len: self.types.len(),
        })?;
        let idx = Idx::from_raw(raw);
        self.types.push(data.clone());
        self.map.insert(data, idx);
        Ok(idx)
    }

    /// Intern `data`.
    ///
    /// # Panics
    /// Panics if the pool already holds `u32::MAX` types.
    pub fn intern(&mut self, data: TypeData) -> Idx {
        self.try_intern(data).unwrap_or_else(|e| panic!("{e}"))
    }

    /// The class `module.name`, interned on first use.
    pub fn class(&mut self, module: &str, name: &str) -> Idx {
        let module = self.interner.intern(module);
        let name = self.interner.intern(name);
        self.intern(TypeData::Class { module, name })
    }

    /// The class `module.name` if it has been interned.
    pub fn find_class(&self, module: &str, name: &str) -> Option<Idx> {
        let module = self.interner.get(module)?;
        let name = self.interner.get(name)?;
        self.map.get(&TypeData::Class { module, name }).copied()
    }

    /// What `idx` stands for, or `None` if it did not come from this pool.
    pub fn get(&self, idx: Idx) -> Option<&TypeData> {
        self.types.get(idx.index())
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// True when only the builtins are present.
    pub fn is_empty(&self) -> bool {
        self.types.len() <= Idx::BUILTIN_COUNT as usize
    }
}

impl Default for Pool {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Pool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pool").field("len", &self.len()).finish()
    }
}

/// Cloneable, lockable handle to one pool.
#[derive(Clone, Debug, Default)]
pub struct SharedPool(Arc<RwLock<Pool>>);

impl SharedPool {
    pub fn new() -> Self {
        SharedPool(Arc::new(RwLock::new(Pool::new())))
    }

    pub fn from_pool(pool: Pool) -> Self {
        SharedPool(Arc::new(RwLock::new(pool)))
    }

    pub fn read(&self) -> RwLockReadGuard<'_, Pool> {
        self.0.read()
    }

    pub fn write(&self) -> RwLockWriteGuard<'_, Pool> {
        self.0.write()
    }
}
