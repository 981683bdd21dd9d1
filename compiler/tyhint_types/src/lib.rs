//! Deferred type references and type-hint resolution.
//!
//! Dispatch tables are declared before every type they mention exists. This
//! crate lets a signature name a type that will be delivered later, and turns
//! such signatures into concrete hints once everything is registered.
//!
//! # Pieces
//!
//! - [`TypeRef`]: a shared placeholder (plain, promised, or module-qualified)
//! - [`RefRegistry`]: one placeholder per promise name or module attribute
//! - [`Namespaces`]: module attribute tables that module references look in
//! - [`Pool`]: interned concrete types, referred to by [`Idx`]
//! - [`classify`] and friends: structural questions about a [`Hint`]
//! - [`HintResolver`]: rebuilds a hint with every reference resolved
//!
//! # Debug Environment Variables
//!
//! - `RUST_LOG=tyhint_types=debug`: log deliveries and retrievals.
//! - `RUST_LOG=tyhint_types=trace`: also trace each resolver call.
//! - `TYHINT_MAX_DEPTH`: nesting limit used by [`ResolverConfig::from_env`].

mod classify;
mod config;
mod error;
mod hint;
mod idx;
mod namespace;
mod pool;
mod reference;
mod registry;
mod resolve;
mod stack;
mod warning;

use std::sync::Once;

pub use classify::{classify, contains_references, is_type_expression, HintKind};
pub use config::{ResolverConfig, DEFAULT_MAX_DEPTH, MAX_DEPTH_ENV};
pub use error::{LookupError, PoolError, ResolveError};
pub use hint::{CallableParams, Form, Hint, Opaque, TypeExpr};
pub use idx::Idx;
pub use namespace::{Namespaces, SharedNamespaces, TypeSource};
pub use pool::{Builtin, Pool, SharedPool, TypeData};
pub use reference::{RefKind, TypeRef};
pub use registry::RefRegistry;
pub use resolve::{resolve_hint, HintResolver};
pub use warning::{HintWarning, HintWarningKind, WarningCode};

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Safe to call multiple times. Does nothing unless `RUST_LOG` is set.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(EnvFilter::from_default_env())
                .init();
        }
    });
}

// Hints hold references inline; keep the handle a single pointer.
const _: () = assert!(std::mem::size_of::<TypeRef>() == std::mem::size_of::<usize>());
