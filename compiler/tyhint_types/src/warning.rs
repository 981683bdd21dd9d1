//! Advisory diagnostics from hint resolution.
//!
//! Warnings never stop resolution. The offending value is passed through
//! unchanged and a [`HintWarning`] is recorded for whoever drives the
//! resolver, in addition to a `tracing` event.

use std::fmt;

use crate::Hint;

/// Stable code for each warning kind.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum WarningCode {
    /// A value with no hint structure was passed through.
    W0001,
}

impl WarningCode {
    pub const fn as_str(self) -> &'static str {
        match self {
            WarningCode::W0001 => "W0001",
        }
    }
}

impl fmt::Display for WarningCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A resolver warning.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct HintWarning {
    /// Nesting depth at which the value was found (0 = the top-level hint).
    pub depth: usize,
    pub kind: HintWarningKind,
}

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum HintWarningKind {
    /// The value is not a type, reference, container or type expression.
    Unrecognized {
        /// Rendering of the value.
        hint: String,
    },
}

impl HintWarning {
    pub fn unrecognized(hint: &Hint, depth: usize) -> Self {
        Self {
            depth,
            kind: HintWarningKind::Unrecognized {
                hint: hint.to_string(),
            },
        }
    }

    pub fn code(&self) -> WarningCode {
        match &self.kind {
            HintWarningKind::Unrecognized { .. } => WarningCode::W0001,
        }
    }

    pub fn message(&self) -> String {
        match &self.kind {
            HintWarningKind::Unrecognized { hint } => {
                format!("could not resolve the type hint `{hint}`; leaving it as-is")
            }
        }
    }
}

impl fmt::Display for HintWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "warning[{}]: {}", self.code(), self.message())
    }
}

#[cfg(test)]
mod tests;
