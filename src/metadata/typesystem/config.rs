//! Type model configuration
//!
//! Options controlling how the type model renders names and how deep it is willing to follow
//! nested usage records before giving up on a malformed image.

/// How pointer types are named
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, strum::Display)]
pub enum PointerNaming {
    /// Derive the name from the pointee and append `*`, e.g. `Int32*`
    #[default]
    Pointee,
    /// Render every pointer as `void *`, regardless of the pointee
    VoidPlaceholder,
}

/// Configuration for a [`crate::TypeModel`]
///
/// # Examples
///
/// ```rust
/// use il2scope::{ModelConfig, PointerNaming};
///
/// let config = ModelConfig::default();
/// assert_eq!(config.pointer_naming, PointerNaming::Pointee);
/// assert_eq!(config.max_recursion_depth, 100);
///
/// let legacy = ModelConfig::legacy();
/// assert_eq!(legacy.pointer_naming, PointerNaming::VoidPlaceholder);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelConfig {
    /// Naming scheme for pointer types (default: derived from the pointee)
    pub pointer_naming: PointerNaming,

    /// Maximum nesting of usage records followed by one request (default: 100)
    /// Exceeding it fails the request with [`crate::Error::RecursionLimit`]
    pub max_recursion_depth: usize,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            pointer_naming: PointerNaming::Pointee,
            max_recursion_depth: 100,
        }
    }
}

impl ModelConfig {
    /// Creates a configuration rendering names the way older inspection tools did
    ///
    /// Every pointer is named `void *`; everything else matches [`ModelConfig::default`].
    #[must_use]
    pub fn legacy() -> Self {
        Self {
            pointer_naming: PointerNaming::VoidPlaceholder,
            ..Self::default()
        }
    }

    /// Replaces the pointer naming scheme
    #[must_use]
    pub fn with_pointer_naming(mut self, pointer_naming: PointerNaming) -> Self {
        self.pointer_naming = pointer_naming;
        self
    }

    /// Replaces the recursion limit
    #[must_use]
    pub fn with_max_recursion_depth(mut self, max_recursion_depth: usize) -> Self {
        self.max_recursion_depth = max_recursion_depth;
        self
    }
}
