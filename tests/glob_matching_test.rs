//! Glob syntax as seen through the matcher.

use pattern_recognition::{
    glob_match, Glob, InvalidGlobPolicy, MatchKind, Matcher, MatcherConfig, Pattern,
};

fn p<const N: usize>(pairs: [(&str, &str); N]) -> Pattern {
    Pattern::from(pairs)
}

#[test]
fn test_star_matches_any_run() {
    let matcher = Matcher::new().with([("path", "/api/*")], "api");

    assert_eq!(matcher.find(&p([("path", "/api/")])), Some(&"api"));
    assert_eq!(matcher.find(&p([("path", "/api/v1/users")])), Some(&"api"));
    assert_eq!(matcher.find(&p([("path", "/web/index")])), None);
}

#[test]
fn test_question_mark_matches_one_character() {
    let matcher = Matcher::new().with([("code", "4??")], "client-error");

    assert_eq!(matcher.find(&p([("code", "404")])), Some(&"client-error"));
    assert_eq!(matcher.find(&p([("code", "4040")])), None);
    assert_eq!(matcher.find(&p([("code", "40")])), None);
}

#[test]
fn test_character_classes() {
    let matcher = Matcher::new()
        .with([("version", "v[0-9]")], "single-digit")
        .with([("version", "v[!0-9]*")], "named");

    assert_eq!(matcher.find(&p([("version", "v7")])), Some(&"single-digit"));
    assert_eq!(matcher.find(&p([("version", "vnext")])), Some(&"named"));
    assert_eq!(matcher.find(&p([("version", "v10")])), None);
}

#[test]
fn test_posix_named_classes() {
    let matcher = Matcher::new()
        .with([("n", "[[:digit:]]")], "digit")
        .with([("n", "[[:alpha:]_][[:alnum:]_]*")], "identifier");

    assert_eq!(matcher.find(&p([("n", "5")])), Some(&"digit"));
    assert_eq!(matcher.find(&p([("n", "d]")])), None);
    assert_eq!(matcher.find(&p([("n", "x")])), Some(&"identifier"));
    assert_eq!(matcher.find(&p([("n", "_tmp9")])), Some(&"identifier"));
    assert_eq!(matcher.find(&p([("n", "9lives")])), None);
}

#[test]
fn test_unknown_named_class_never_match_policy() {
    let config = MatcherConfig::new().with_invalid_glob(InvalidGlobPolicy::NeverMatch);
    let matcher = Matcher::with_config(config).with([("n", "[[:bogus:]]")], "N");

    assert_eq!(matcher.find(&p([("n", "b]")])), None);
    assert_eq!(matcher.find(&p([("n", "[[:bogus:]]")])), Some(&"N"));
}

#[test]
fn test_trailing_backslash_is_literal() {
    let matcher = Matcher::new().with([("path", "ab*\\")], "A");

    assert_eq!(matcher.find(&p([("path", "abzz\\")])), Some(&"A"));
    assert_eq!(matcher.find(&p([("path", "abzz")])), None);
}

#[test]
fn test_escaped_wildcards_match_literally() {
    let matcher = Matcher::new().with([("name", "a\\*b")], "literal-star");

    let result = matcher.find_match(&p([("name", "a*b")])).unwrap();
    assert_eq!(result.data, &"literal-star");
    assert_eq!(result.kind, MatchKind::Glob);

    assert_eq!(matcher.find(&p([("name", "axb")])), None);
}

#[test]
fn test_glob_is_case_sensitive() {
    let matcher = Matcher::new().with([("env", "prod*")], "prod");

    assert_eq!(matcher.find(&p([("env", "production")])), Some(&"prod"));
    assert_eq!(matcher.find(&p([("env", "Production")])), None);
}

#[test]
fn test_subject_values_are_never_globs() {
    // wildcards only have meaning on the pattern side
    let matcher = Matcher::new().with([("a", "xyz")], "A");
    assert_eq!(matcher.find(&p([("a", "x*")])), None);
}

#[test]
fn test_mixed_literal_and_glob_fields() {
    let matcher = Matcher::new()
        .with([("method", "GET"), ("path", "/static/*")], "static")
        .with([("method", "GET")], "get");

    // 2-field glob ties with the 1-field exact rule; earlier registration wins
    let result = matcher
        .find_match(&p([("method", "GET"), ("path", "/static/app.js")]))
        .unwrap();
    assert_eq!(result.data, &"static");
    assert_eq!(result.kind, MatchKind::Glob);

    assert_eq!(
        matcher.find(&p([("method", "POST"), ("path", "/static/app.js")])),
        None
    );
}

#[test]
fn test_malformed_glob_literal_policy() {
    let matcher = Matcher::new().with([("a", "[abc")], "A");

    assert_eq!(matcher.find(&p([("a", "[abc")])), Some(&"A"));
    assert_eq!(matcher.find(&p([("a", "a")])), None);
}

#[test]
fn test_malformed_glob_never_match_policy() {
    let config = MatcherConfig::new().with_invalid_glob(InvalidGlobPolicy::NeverMatch);
    let matcher = Matcher::with_config(config)
        .with([("a", "[ab*")], "A")
        .with([("b", "ok*")], "B");

    // the malformed glob can still match exactly
    assert_eq!(matcher.find(&p([("a", "[ab*")])), Some(&"A"));
    assert_eq!(matcher.find(&p([("a", "[abzz")])), None);
    // well-formed globs are unaffected
    assert_eq!(matcher.find(&p([("b", "okay")])), Some(&"B"));
}

#[test]
fn test_standalone_glob_api() {
    assert!(glob_match("x*y", "xhy"));
    assert!(!glob_match("x?z", "xyyz"));

    let glob = Glob::new("release-[0-9]*").unwrap();
    assert!(!glob.is_literal());
    assert!(glob.is_match("release-2024"));
    assert!(!glob.is_match("release-next"));
    assert_eq!(glob.as_str(), "release-[0-9]*");
}
