//! Identifiers shared by the tyhint crates.
//!
//! Module names, attribute names and promise names show up as registry keys
//! over and over during registration. Interning them once gives each a
//! 32-bit [`Name`] with O(1) equality and hashing.

mod interner;
mod name;

pub use interner::{InternError, SharedInterner, StringInterner};
pub use name::Name;
