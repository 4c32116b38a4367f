//! Primary pattern matcher interface.
//!
//! This module provides [`Matcher`], which owns the pattern registry and
//! answers "which registered pattern is the most specific match for this
//! subject" queries.

use crate::config::MatcherConfig;
use crate::error::{PatternError, Result};
use crate::matcher::{evaluate, MatchKind, Score, Specificity, Subject};
use crate::pattern::Pattern;
use crate::registry::{Entry, MatchEntry, Registry};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use tracing::{debug, trace};

/// The winning registration for a subject.
///
/// Serializes as `{"pattern", "data", "kind", "score"}`, with `kind` one of
/// `"root"`, `"glob"` or `"exact"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MatchResult<'a, T> {
    /// Registered pattern that won
    pub pattern: &'a Pattern,

    /// Its payload
    pub data: &'a T,

    /// Channel that qualified the pattern
    pub kind: MatchKind,

    /// Specificity score of the pattern for the subject
    pub score: Score,
}

/// Specificity-ranked pattern matcher.
///
/// Patterns are registered with a payload; [`Matcher::find`] returns the
/// payload of the single most specific registered pattern compatible with a
/// subject.
///
/// # Ranking
///
/// A pattern is compatible with a subject when every one of its fields is
/// present in the subject and matches, either verbatim (exact) or as a glob.
/// Extra subject fields are ignored. Among compatible patterns:
///
/// - more matched fields rank higher;
/// - for the same field count, exact beats glob;
/// - the empty (root) pattern matches everything and ranks lowest;
/// - on equal score, the earlier registration wins.
///
/// # Examples
///
/// ## Basic Usage
/// ```rust
/// use pattern_recognition::{Matcher, Pattern};
///
/// let mut matcher = Matcher::new();
/// matcher
///     .add([("a", "1")], "A")
///     .add([("b", "2")], "B");
///
/// assert_eq!(matcher.find(&Pattern::from([("a", "1")])), Some(&"A"));
/// assert_eq!(matcher.find(&Pattern::from([("a", "2")])), None);
/// assert_eq!(matcher.find(&Pattern::from([("b", "2"), ("c", "3")])), Some(&"B"));
/// ```
///
/// ## Glob and Root Patterns
/// ```rust
/// use pattern_recognition::{Matcher, Pattern};
///
/// let matcher = Matcher::new()
///     .with(Pattern::root(), "fallback")
///     .with([("a", "0")], "exact")
///     .with([("a", "*")], "glob");
///
/// assert_eq!(matcher.find(&Pattern::from([("a", "0")])), Some(&"exact"));
/// assert_eq!(matcher.find(&Pattern::from([("a", "7")])), Some(&"glob"));
/// assert_eq!(matcher.find(&Pattern::from([("b", "1")])), Some(&"fallback"));
/// ```
#[derive(Debug, Clone)]
pub struct Matcher<T> {
    registry: Registry<T>,
    config: MatcherConfig,
}

impl<T> Default for Matcher<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Matcher<T> {
    /// Create an empty matcher with default configuration.
    pub fn new() -> Self {
        Self::with_config(MatcherConfig::default())
    }

    /// Create an empty matcher with custom configuration.
    pub fn with_config(config: MatcherConfig) -> Self {
        Self {
            registry: Registry::new(config.invalid_glob),
            config,
        }
    }

    pub fn config(&self) -> &MatcherConfig {
        &self.config
    }

    /// Register `pattern` with `data`, overwriting the payload of an equal
    /// pattern if one is already registered.
    ///
    /// An overwritten registration keeps its original position.
    pub fn add(&mut self, pattern: impl Into<Pattern>, data: T) -> &mut Self {
        let pattern = pattern.into();
        debug!(pattern = %pattern, "registering pattern");

        if self.registry.insert(pattern, data).is_some() {
            debug!("overwrote existing registration");
        }
        self
    }

    /// By-value [`Matcher::add`], for building a matcher in one expression.
    pub fn with(mut self, pattern: impl Into<Pattern>, data: T) -> Self {
        self.add(pattern, data);
        self
    }

    /// Remove the registration for `pattern`, if any.
    pub fn remove(&mut self, pattern: impl Into<Pattern>) -> &mut Self {
        self.take(&pattern.into());
        self
    }

    /// Remove the registration for `pattern` and return its payload.
    pub fn take(&mut self, pattern: &Pattern) -> Option<T> {
        let removed = self.registry.remove(pattern);
        debug!(pattern = %pattern, removed = removed.is_some(), "removing pattern");
        removed
    }

    /// Return the payload of the most specific pattern matching `subject`.
    pub fn find<S: Subject + ?Sized>(&self, subject: &S) -> Option<&T> {
        self.find_match(subject).map(|m| m.data)
    }

    /// Like [`Matcher::find`], also reporting the winning pattern, its
    /// score and the channel it qualified through.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pattern_recognition::{MatchKind, Matcher, Pattern};
    ///
    /// let matcher = Matcher::new().with([("a", "*"), ("b", "*")], "AB");
    /// let result = matcher.find_match(&Pattern::from([("a", "1"), ("b", "2")])).unwrap();
    ///
    /// assert_eq!(result.data, &"AB");
    /// assert_eq!(result.kind, MatchKind::Glob);
    /// assert_eq!(result.score, 4);
    /// ```
    pub fn find_match<S: Subject + ?Sized>(&self, subject: &S) -> Option<MatchResult<'_, T>> {
        let mut best: Option<(&Entry<T>, Specificity)> = None;

        for entry in &self.registry {
            let Some(specificity) = evaluate(entry.compiled(), subject) else {
                continue;
            };
            trace!(
                pattern = %entry.pattern(),
                score = specificity.score,
                kind = %specificity.kind,
                "candidate qualified"
            );

            // strict comparison: earlier registrations win ties
            if best.map_or(true, |(_, top)| specificity.score > top.score) {
                best = Some((entry, specificity));
            }
        }

        match best {
            Some((entry, specificity)) => {
                debug!(
                    pattern = %entry.pattern(),
                    score = specificity.score,
                    kind = %specificity.kind,
                    candidates = self.registry.len(),
                    "pattern matched"
                );
                Some(MatchResult {
                    pattern: entry.pattern(),
                    data: entry.data(),
                    kind: specificity.kind,
                    score: specificity.score,
                })
            }
            None => {
                debug!(candidates = self.registry.len(), "no pattern matched");
                None
            }
        }
    }

    /// Run [`Matcher::find`] for each subject.
    pub fn find_batch<S: Subject>(&self, subjects: &[S]) -> Vec<Option<&T>> {
        subjects.iter().map(|subject| self.find(subject)).collect()
    }

    /// Payload registered for exactly `pattern`'s identity.
    pub fn get(&self, pattern: &Pattern) -> Option<&T> {
        self.registry.get(pattern).map(Entry::data)
    }

    pub fn contains(&self, pattern: &Pattern) -> bool {
        self.registry.contains(pattern)
    }

    /// Number of registered patterns.
    pub fn len(&self) -> usize {
        self.registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    pub fn clear(&mut self) {
        self.registry.clear();
    }

    /// Registrations in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&Pattern, &T)> + '_ {
        self.registry.iter().map(|e| (e.pattern(), e.data()))
    }

    pub fn registry(&self) -> &Registry<T> {
        &self.registry
    }

    /// Snapshot of all registrations in registration order.
    pub fn to_vec(&self) -> Vec<MatchEntry<T>>
    where
        T: Clone,
    {
        self.iter()
            .map(|(pattern, data)| MatchEntry {
                pattern: pattern.clone(),
                data: data.clone(),
            })
            .collect()
    }

    /// Build a matcher from serialized registrations, in order.
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = MatchEntry<T>>,
    {
        let mut matcher = Self::new();
        matcher.extend(entries.into_iter().map(|e| (e.pattern, e.data)));
        matcher
    }

    /// Encode the registrations as a JSON array of `{"match", "data"}`.
    pub fn to_json_string(&self) -> Result<String>
    where
        T: Serialize,
    {
        Ok(serde_json::to_string(self)?)
    }

    /// Decode a JSON array of `{"match", "data"}` with default configuration.
    pub fn from_json_str(json: &str) -> Result<Self>
    where
        T: DeserializeOwned,
    {
        let value: Value = serde_json::from_str(json)?;
        Self::from_json_value(&value, MatcherConfig::default())
    }

    /// Decode a JSON array of `{"match", "data"}`.
    ///
    /// Field values in each `match` object are coerced according to
    /// `config.value_coercion`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pattern_recognition::{Matcher, MatcherConfig, Pattern};
    /// use serde_json::json;
    ///
    /// let value = json!([{"match": {"a": 1}, "data": "A"}]);
    /// let matcher: Matcher<String> = Matcher::from_json_value(&value, MatcherConfig::default())?;
    ///
    /// assert_eq!(matcher.find(&Pattern::from([("a", "1")])), Some(&"A".to_string()));
    /// assert!(Matcher::<String>::from_json_value(&value, MatcherConfig::strict()).is_err());
    /// # Ok::<(), pattern_recognition::PatternError>(())
    /// ```
    pub fn from_json_value(value: &Value, config: MatcherConfig) -> Result<Self>
    where
        T: DeserializeOwned,
    {
        let items = value.as_array().ok_or_else(|| {
            PatternError::Serialization("expected an array of match entries".to_string())
        })?;

        let mut matcher = Self::with_config(config);
        for (i, item) in items.iter().enumerate() {
            let pattern = item
                .get("match")
                .ok_or_else(|| missing_key(i, "match"))
                .and_then(|m| Pattern::from_json(m, config.value_coercion))?;
            let data = item.get("data").ok_or_else(|| missing_key(i, "data"))?;

            matcher.add(pattern, T::deserialize(data)?);
        }

        Ok(matcher)
    }
}

fn missing_key(index: usize, key: &str) -> PatternError {
    PatternError::Serialization(format!("entry {index} is missing '{key}'"))
}

impl<T> Extend<(Pattern, T)> for Matcher<T> {
    fn extend<I: IntoIterator<Item = (Pattern, T)>>(&mut self, iter: I) {
        for (pattern, data) in iter {
            self.add(pattern, data);
        }
    }
}

impl<T> FromIterator<(Pattern, T)> for Matcher<T> {
    fn from_iter<I: IntoIterator<Item = (Pattern, T)>>(iter: I) -> Self {
        let mut matcher = Self::new();
        matcher.extend(iter);
        matcher
    }
}

#[derive(Serialize)]
struct EntryRef<'a, T> {
    #[serde(rename = "match")]
    pattern: &'a Pattern,
    data: &'a T,
}

impl<T: Serialize> Serialize for Matcher<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_seq(self.registry.iter().map(|e| EntryRef {
            pattern: e.pattern(),
            data: e.data(),
        }))
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Matcher<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let entries = Vec::<MatchEntry<T>>::deserialize(deserializer)?;
        Ok(Self::from_entries(entries))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::InvalidGlobPolicy;
    use crate::matcher::{EXACT_WEIGHT, ROOT_WEIGHT};
    use serde_json::json;

    fn p<const N: usize>(pairs: [(&str, &str); N]) -> Pattern {
        Pattern::from(pairs)
    }

    #[test]
    fn test_empty_matcher_finds_nothing() {
        let matcher: Matcher<&str> = Matcher::new();
        assert!(matcher.is_empty());
        assert_eq!(matcher.find(&p([])), None);
        assert_eq!(matcher.find(&p([("a", "1")])), None);
    }

    #[test]
    fn test_chained_add() {
        let mut matcher = Matcher::new();
        matcher.add([("a", "1")], "A").add([("b", "2")], "B");
        assert_eq!(matcher.len(), 2);
    }

    #[test]
    fn test_earlier_registration_wins_ties() {
        let matcher = Matcher::new()
            .with([("a", "1")], "first")
            .with([("b", "2")], "second");

        let subject = p([("a", "1"), ("b", "2")]);
        let result = matcher.find_match(&subject).unwrap();
        assert_eq!(result.data, &"first");
        assert_eq!(result.score, 1 + EXACT_WEIGHT);
    }

    #[test]
    fn test_glob_with_more_fields_ties_with_exact() {
        // 2-field glob (2+2) vs 1-field exact (1+3): tie, registration order decides
        let matcher = Matcher::new()
            .with([("a", "*"), ("b", "*")], "AB")
            .with([("a", "1")], "A");
        assert_eq!(matcher.find(&p([("a", "1"), ("b", "2")])), Some(&"AB"));

        let matcher = Matcher::new()
            .with([("a", "1")], "A")
            .with([("a", "*"), ("b", "*")], "AB");
        assert_eq!(matcher.find(&p([("a", "1"), ("b", "2")])), Some(&"A"));
    }

    #[test]
    fn test_find_match_reports_root() {
        let matcher = Matcher::new().with(Pattern::root(), "R");
        let result = matcher.find_match(&p([("x", "1")])).unwrap();

        assert_eq!(result.kind, MatchKind::Root);
        assert_eq!(result.score, ROOT_WEIGHT);
        assert!(result.pattern.is_root());
    }

    #[test]
    fn test_take_returns_payload() {
        let mut matcher = Matcher::new().with([("a", "1")], "A");
        assert_eq!(matcher.take(&p([("a", "1")])), Some("A"));
        assert_eq!(matcher.take(&p([("a", "1")])), None);
    }

    #[test]
    fn test_get_and_contains_use_identity() {
        let matcher = Matcher::new().with([("a", "0"), ("b", "1")], "AB");

        assert!(matcher.contains(&p([("b", "1"), ("a", "0")])));
        assert_eq!(matcher.get(&p([("b", "1"), ("a", "0")])), Some(&"AB"));
        assert_eq!(matcher.get(&p([("a", "0")])), None);
    }

    #[test]
    fn test_find_batch() {
        let matcher = Matcher::new().with([("a", "1")], "A");
        let subjects = vec![p([("a", "1")]), p([("a", "2")])];

        assert_eq!(matcher.find_batch(&subjects), vec![Some(&"A"), None]);
    }

    #[test]
    fn test_clear() {
        let mut matcher = Matcher::new().with([("a", "1")], "A");
        matcher.clear();
        assert!(matcher.is_empty());
        assert_eq!(matcher.find(&p([("a", "1")])), None);
    }

    #[test]
    fn test_with_config_applies_glob_policy() {
        let config = MatcherConfig::default().with_invalid_glob(InvalidGlobPolicy::NeverMatch);
        let matcher = Matcher::with_config(config).with([("a", "[x*")], "A");

        assert_eq!(matcher.config(), &config);
        assert_eq!(matcher.find(&p([("a", "[xyz")])), None);
        assert_eq!(matcher.find(&p([("a", "[x*")])), Some(&"A"));

        let lenient = Matcher::new().with([("a", "[x*")], "A");
        assert_eq!(lenient.find(&p([("a", "[xyz")])), Some(&"A"));
    }

    #[test]
    fn test_from_iterator_and_extend() {
        let mut matcher: Matcher<u32> = vec![(p([("a", "1")]), 1), (p([("b", "1")]), 2)]
            .into_iter()
            .collect();
        matcher.extend(vec![(p([("a", "1")]), 10)]);

        assert_eq!(matcher.len(), 2);
        assert_eq!(matcher.find(&p([("a", "1")])), Some(&10));
    }

    #[test]
    fn test_to_vec_in_registration_order() {
        let matcher = Matcher::new().with([("a", "1")], "A").with([("b", "2")], "B");

        assert_eq!(
            matcher.to_vec(),
            vec![
                MatchEntry::new([("a", "1")], "A"),
                MatchEntry::new([("b", "2")], "B"),
            ]
        );
    }

    #[test]
    fn test_match_result_serializes() {
        let matcher = Matcher::new()
            .with(Pattern::root(), "R")
            .with([("a", "*"), ("b", "2")], "AB");

        let result = matcher.find_match(&p([("a", "1"), ("b", "2")])).unwrap();
        assert_eq!(
            serde_json::to_value(result).unwrap(),
            json!({"pattern": {"a": "*", "b": "2"}, "data": "AB", "kind": "glob", "score": 4})
        );

        let result = matcher.find_match(&p([("c", "3")])).unwrap();
        assert_eq!(
            serde_json::to_value(result).unwrap(),
            json!({"pattern": {}, "data": "R", "kind": "root", "score": 1})
        );
    }

    #[test]
    fn test_matcher_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Matcher<String>>();
    }

    #[test]
    fn test_json_value_errors() {
        let err = Matcher::<String>::from_json_value(&json!({}), MatcherConfig::default())
            .unwrap_err();
        assert!(matches!(err, PatternError::Serialization(_)));

        let err = Matcher::<String>::from_json_value(
            &json!([{"data": "A"}]),
            MatcherConfig::default(),
        )
        .unwrap_err();
        assert_eq!(
            err,
            PatternError::Serialization("entry 0 is missing 'match'".to_string())
        );

        let err = Matcher::<String>::from_json_value(
            &json!([{"match": {"a": [1]}, "data": "A"}]),
            MatcherConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, PatternError::UnsupportedValue { .. }));
    }
}
