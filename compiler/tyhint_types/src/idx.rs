//! Concrete type handle.
//!
//! `Idx` is the identity a dispatcher compares. Builtin types sit at fixed
//! indices so they can be named without a pool; user classes get indices
//! from [`Pool::class`](crate::Pool::class).

use std::fmt;

/// A 32-bit index into the type [`Pool`](crate::Pool).
///
/// Equality is index equality: two handles from the same pool name the same
/// type exactly when they are equal.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct Idx(u32);

impl Idx {
    // === Builtin types (indices 0-13) ===
    pub const OBJECT: Self = Self(0);
    pub const INT: Self = Self(1);
    pub const FLOAT: Self = Self(2);
    pub const COMPLEX: Self = Self(3);
    pub const BOOL: Self = Self(4);
    pub const STR: Self = Self(5);
    pub const BYTES: Self = Self(6);
    /// The type of `None`.
    pub const NONE_TYPE: Self = Self(7);
    /// The type of types.
    pub const TYPE: Self = Self(8);
    pub const LIST: Self = Self(9);
    pub const TUPLE: Self = Self(10);
    pub const DICT: Self = Self(11);
    pub const SET: Self = Self(12);
    pub const FROZENSET: Self = Self(13);

    /// Number of pre-interned builtin types.
    pub const BUILTIN_COUNT: u32 = 14;

    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub const fn is_builtin(self) -> bool {
        self.0 < Self::BUILTIN_COUNT
    }

    /// Name of a builtin type, or `None` for pool-allocated classes.
    #[inline]
    pub const fn builtin_name(self) -> Option<&'static str> {
        match self.0 {
            0 => Some("object"),
            1 => Some("int"),
            2 => Some("float"),
            3 => Some("complex"),
            4 => Some("bool"),
            5 => Some("str"),
            6 => Some("bytes"),
            7 => Some("NoneType"),
            8 => Some("type"),
            9 => Some("list"),
            10 => Some("tuple"),
            11 => Some("dict"),
            12 => Some("set"),
            13 => Some("frozenset"),
            _ => None,
        }
    }
}

impl fmt::Debug for Idx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.builtin_name() {
            Some(name) => write!(f, "Idx({name})"),
            None => write!(f, "Idx({})", self.0),
        }
    }
}

/// Pool-free rendering. Classes print as `type#N`; use
/// [`Pool::format_type`](crate::Pool::format_type) for their full names.
impl fmt::Display for Idx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.builtin_name() {
            Some(name) => f.write_str(name),
            None => write!(f, "type#{}", self.0),
        }
    }
}

const _: () = assert!(std::mem::size_of::<Idx>() == 4);
