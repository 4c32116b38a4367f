//! Compiled pattern form used during scoring.

use crate::config::InvalidGlobPolicy;
use crate::matcher::glob::Glob;
use crate::pattern::Pattern;
use tracing::warn;

/// One field of a compiled pattern.
#[derive(Debug, Clone)]
pub struct CompiledField {
    /// Field name looked up in the subject
    pub name: String,

    /// Raw value, compared verbatim by the exact channel
    pub value: String,

    /// Pre-parsed glob for the glob channel; `None` when the value is a
    /// malformed glob under [`InvalidGlobPolicy::NeverMatch`]
    pub glob: Option<Glob>,
}

/// A registered pattern with every field value pre-parsed as a glob.
///
/// Compilation happens once per registration so that `find` never re-parses
/// glob syntax.
///
/// # Examples
///
/// ```rust
/// use pattern_recognition::{InvalidGlobPolicy, Pattern};
/// use pattern_recognition::matcher::CompiledPattern;
///
/// let pattern = Pattern::from([("host", "web-*"), ("env", "prod")]);
/// let compiled = CompiledPattern::compile(&pattern, InvalidGlobPolicy::Literal);
///
/// assert_eq!(compiled.len(), 2);
/// assert!(!compiled.is_literal_only());
/// ```
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    fields: Box<[CompiledField]>,
    literal_only: bool,
}

impl CompiledPattern {
    /// Compile `pattern`, handling malformed globs according to `policy`.
    pub fn compile(pattern: &Pattern, policy: InvalidGlobPolicy) -> Self {
        let fields: Box<[CompiledField]> = pattern
            .iter()
            .map(|(name, value)| CompiledField {
                name: name.to_string(),
                value: value.to_string(),
                glob: compile_glob(name, value, policy),
            })
            .collect();
        let literal_only = fields.iter().all(CompiledField::is_literal);

        Self {
            fields,
            literal_only,
        }
    }

    /// Number of declared fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// True for the root (empty) pattern.
    pub fn is_root(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn fields(&self) -> &[CompiledField] {
        &self.fields
    }

    /// True when the glob channel can never beat the exact channel: every
    /// field's glob either matches only its raw value or is disabled.
    ///
    /// Scoring skips glob evaluation for such patterns.
    pub fn is_literal_only(&self) -> bool {
        self.literal_only
    }
}

impl CompiledField {
    fn is_literal(&self) -> bool {
        self.glob
            .as_ref()
            .map_or(true, |glob| glob.as_literal() == Some(self.value.as_str()))
    }
}

fn compile_glob(field: &str, value: &str, policy: InvalidGlobPolicy) -> Option<Glob> {
    match policy {
        InvalidGlobPolicy::Literal => Some(Glob::new_lenient(value)),
        InvalidGlobPolicy::NeverMatch => match Glob::new(value) {
            Ok(glob) => Some(glob),
            Err(err) => {
                warn!(field = %field, error = %err, "malformed glob will never glob-match");
                None
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compile_keeps_sorted_fields() {
        let pattern = Pattern::from([("b", "2"), ("a", "1")]);
        let compiled = CompiledPattern::compile(&pattern, InvalidGlobPolicy::Literal);

        let names: Vec<&str> = compiled.fields().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);
        assert_eq!(compiled.fields()[1].value, "2");
    }

    #[test]
    fn test_root_compiles_empty() {
        let compiled = CompiledPattern::compile(&Pattern::root(), InvalidGlobPolicy::Literal);
        assert!(compiled.is_root());
        assert!(compiled.is_empty());
        assert!(compiled.is_literal_only());
    }

    #[test]
    fn test_literal_only_detection() {
        let literal = CompiledPattern::compile(
            &Pattern::from([("a", "1"), ("b", "x")]),
            InvalidGlobPolicy::Literal,
        );
        assert!(literal.is_literal_only());

        let wildcard = CompiledPattern::compile(
            &Pattern::from([("a", "1"), ("b", "x*")]),
            InvalidGlobPolicy::Literal,
        );
        assert!(!wildcard.is_literal_only());

        // escapes make the glob text differ from the raw value
        let escaped = CompiledPattern::compile(
            &Pattern::from([("a", "x\\*y")]),
            InvalidGlobPolicy::Literal,
        );
        assert!(!escaped.is_literal_only());

        let disabled = CompiledPattern::compile(
            &Pattern::from([("a", "[oops")]),
            InvalidGlobPolicy::NeverMatch,
        );
        assert!(disabled.is_literal_only());
    }

    #[test]
    fn test_malformed_glob_policies() {
        let pattern = Pattern::from([("a", "[oops")]);

        let lenient = CompiledPattern::compile(&pattern, InvalidGlobPolicy::Literal);
        let glob = lenient.fields()[0].glob.as_ref().unwrap();
        assert!(glob.is_match("[oops"));

        let strict = CompiledPattern::compile(&pattern, InvalidGlobPolicy::NeverMatch);
        assert!(strict.fields()[0].glob.is_none());
        assert_eq!(strict.fields()[0].value, "[oops");
    }
}
