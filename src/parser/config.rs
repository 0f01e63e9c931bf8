//! Parser limits and strictness

/// Configuration for the parser
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    /// Maximum nesting depth of arrays and objects (0 means unlimited)
    pub max_depth: u16,
    /// Maximum input size in bytes (0 means unlimited)
    pub max_size: usize,
    /// Report malformed fragments as errors instead of dropping them
    pub strict: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_depth: 128,
            max_size: 10 * 1024 * 1024,
            strict: false,
        }
    }
}

impl Config {
    /// Create a new config with unlimited depth and size
    pub const fn unlimited() -> Self {
        Self {
            max_depth: 0,
            max_size: 0,
            strict: false,
        }
    }

    /// Create a new config with specific limits
    pub const fn new(max_depth: u16, max_size: usize) -> Self {
        Self {
            max_depth,
            max_size,
            strict: false,
        }
    }

    pub const fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub(crate) const fn exceeds_size(self, len: usize) -> bool {
        self.max_size > 0 && len > self.max_size
    }

    pub(crate) const fn exceeds_depth(self, depth: u16) -> bool {
        self.max_depth > 0 && depth > self.max_depth
    }
}
