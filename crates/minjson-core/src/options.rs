//! Per-call configuration for dumping and loading.

/// Default maximum object nesting depth.
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// How the parser treats a `\uXXXX` escape in the surrogate range D800..=DFFF.
///
/// Escapes are always decoded one at a time; a high/low pair is never
/// recombined into a supplementary code point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SurrogatePolicy {
    /// Decode each surrogate escape to U+FFFD.
    #[default]
    Replace,
    /// Fail with `InvalidStringEscape`.
    Reject,
}

/// Limits and policies applied by a single `dumps_with` / `loads_with` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    /// Maximum object nesting depth. The root object is depth 1.
    pub max_depth: usize,
    /// Handling of surrogate `\u` escapes (parser only).
    pub surrogates: SurrogatePolicy,
}

impl Options {
    pub const fn new() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            surrogates: SurrogatePolicy::Replace,
        }
    }

    /// Tighter limits for untrusted input.
    pub const fn strict() -> Self {
        Self {
            max_depth: 128,
            surrogates: SurrogatePolicy::Reject,
        }
    }

    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub const fn with_surrogates(mut self, surrogates: SurrogatePolicy) -> Self {
        self.surrogates = surrogates;
        self
    }
}

impl Default for Options {
    fn default() -> Self {
        Self::new()
    }
}
