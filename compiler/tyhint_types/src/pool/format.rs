//! Human-readable rendering of pool types and hints.
//!
//! `Hint`'s own `Display` has no pool to consult, so classes show up as
//! `type#N`. These methods spell them `module.Name` instead.

use std::fmt::Write as _;

use super::{Pool, TypeData};
use crate::{Hint, Idx};

impl Pool {
    pub fn format_type(&self, idx: Idx) -> String {
        let mut buf = String::with_capacity(16);
        self.format_type_into(idx, &mut buf);
        buf
    }

    pub fn format_type_into(&self, idx: Idx, out: &mut String) {
        match self.get(idx) {
            Some(TypeData::Builtin(builtin)) => out.push_str(builtin.name()),
            Some(TypeData::Class { module, name }) => {
                match self.interner.lookup(*module) {
                    Some(module) => out.push_str(&module),
                    None => out.push('?'),
                }
                out.push('.');
                match self.interner.lookup(*name) {
                    Some(name) => out.push_str(&name),
                    None => out.push('?'),
                }
            }
            None => {
                let _ = write!(out, "<unknown type#{}>", idx.raw());
            }
        }
    }

    pub fn format_hint(&self, hint: &Hint) -> String {
        let mut buf = String::with_capacity(32);
        self.format_hint_into(hint, &mut buf);
        buf
    }

    pub fn format_hint_into(&self, hint: &Hint, out: &mut String) {
        hint.render(out, &|idx, out| self.format_type_into(idx, out));
    }
}

#[cfg(test)]
mod tests;
