//! Matcher configuration.
//!
//! The scoring weights are compile-time constants (see
//! [`crate::matcher::score`]). Configuration only covers input the matcher
//! cannot interpret as-is: malformed glob syntax and non-string JSON values.

/// How a malformed glob value is treated once registered.
///
/// A glob is malformed when it contains an unterminated character class
/// (`[abc`), an unknown named class (`[[:bogus:]]`) or ends with a dangling
/// escape (`abc\`).
///
/// # Examples
///
/// ```rust
/// use pattern_recognition::{InvalidGlobPolicy, MatcherConfig};
///
/// // an unclosed `[` is literal text, as in glibc `fnmatch`; a trailing `\`
/// // is a literal backslash, where `fnmatch` would never match
/// let permissive = MatcherConfig::default();
/// assert_eq!(permissive.invalid_glob, InvalidGlobPolicy::Literal);
///
/// // reject the glob channel for that field entirely
/// let strict = MatcherConfig::strict();
/// assert_eq!(strict.invalid_glob, InvalidGlobPolicy::NeverMatch);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InvalidGlobPolicy {
    /// Malformed constructs are matched as the literal characters they
    /// consist of.
    #[default]
    Literal,

    /// The glob channel never qualifies for a field holding a malformed
    /// glob. The exact channel still compares the raw value.
    NeverMatch,
}

/// How non-string JSON values are turned into field values.
///
/// `null`, arrays and objects are rejected under every policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValueCoercion {
    /// Numbers and booleans are converted to their textual form
    /// (`1`, `2.5`, `true`).
    #[default]
    Stringify,

    /// Only JSON strings are accepted.
    StringsOnly,
}

/// Configuration for a [`crate::Matcher`].
///
/// # Examples
///
/// ```rust
/// use pattern_recognition::{InvalidGlobPolicy, MatcherConfig, ValueCoercion};
///
/// let config = MatcherConfig::new()
///     .with_invalid_glob(InvalidGlobPolicy::NeverMatch)
///     .with_value_coercion(ValueCoercion::StringsOnly);
///
/// assert_eq!(config, MatcherConfig::strict());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MatcherConfig {
    /// Treatment of malformed glob values.
    ///
    /// **Default**: [`InvalidGlobPolicy::Literal`]
    pub invalid_glob: InvalidGlobPolicy,

    /// Treatment of non-string values at the JSON boundary.
    ///
    /// **Default**: [`ValueCoercion::Stringify`]
    pub value_coercion: ValueCoercion,
}

impl MatcherConfig {
    /// Create a new configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Lenient configuration: malformed globs match literally, scalars are
    /// stringified. Same as the default.
    pub fn permissive() -> Self {
        Self {
            invalid_glob: InvalidGlobPolicy::Literal,
            value_coercion: ValueCoercion::Stringify,
        }
    }

    /// Strict configuration: malformed globs never glob-match, only JSON
    /// strings are accepted as values.
    pub fn strict() -> Self {
        Self {
            invalid_glob: InvalidGlobPolicy::NeverMatch,
            value_coercion: ValueCoercion::StringsOnly,
        }
    }

    /// Set the malformed glob policy.
    pub fn with_invalid_glob(mut self, policy: InvalidGlobPolicy) -> Self {
        self.invalid_glob = policy;
        self
    }

    /// Set the JSON value coercion policy.
    pub fn with_value_coercion(mut self, coercion: ValueCoercion) -> Self {
        self.value_coercion = coercion;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_permissive() {
        assert_eq!(MatcherConfig::default(), MatcherConfig::permissive());
        assert_eq!(MatcherConfig::new(), MatcherConfig::permissive());
    }

    #[test]
    fn test_strict_preset() {
        let config = MatcherConfig::strict();
        assert_eq!(config.invalid_glob, InvalidGlobPolicy::NeverMatch);
        assert_eq!(config.value_coercion, ValueCoercion::StringsOnly);
    }

    #[test]
    fn test_builder_methods() {
        let config = MatcherConfig::strict().with_invalid_glob(InvalidGlobPolicy::Literal);
        assert_eq!(config.invalid_glob, InvalidGlobPolicy::Literal);
        assert_eq!(config.value_coercion, ValueCoercion::StringsOnly);

        let config = config.with_value_coercion(ValueCoercion::Stringify);
        assert_eq!(config, MatcherConfig::permissive());
    }
}
