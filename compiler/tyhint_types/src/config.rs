//! Resolver configuration.

/// Environment variable overriding [`ResolverConfig::max_depth`].
pub const MAX_DEPTH_ENV: &str = "TYHINT_MAX_DEPTH";

/// Default nesting limit. Real annotations rarely exceed a dozen levels.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Settings for a [`HintResolver`](crate::HintResolver).
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct ResolverConfig {
    /// Deepest nesting the resolver descends into before giving up with
    /// [`ResolveError::DepthExceeded`](crate::ResolveError::DepthExceeded).
    pub max_depth: usize,
    /// Record and log a warning for each unrecognized hint.
    pub warn_on_unrecognized: bool,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            warn_on_unrecognized: true,
        }
    }
}

impl ResolverConfig {
    /// Defaults, with `max_depth` taken from `TYHINT_MAX_DEPTH` when set.
    pub fn from_env() -> Self {
        let raw = std::env::var(MAX_DEPTH_ENV).ok();
        Self::default().with_env_override(raw.as_deref())
    }

    fn with_env_override(self, raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return self;
        };
        match parse_max_depth(raw) {
            Some(max_depth) => self.with_max_depth(max_depth),
            None => {
                tracing::warn!(
                    value = raw,
                    fallback = self.max_depth,
                    "ignoring invalid {MAX_DEPTH_ENV}"
                );
                self
            }
        }
    }

    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    #[must_use]
    pub fn with_unrecognized_warnings(mut self, enabled: bool) -> Self {
        self.warn_on_unrecognized = enabled;
        self
    }
}

/// A positive integer, surrounding whitespace allowed.
fn parse_max_depth(raw: &str) -> Option<usize> {
    raw.trim().parse::<usize>().ok().filter(|&depth| depth > 0)
}
