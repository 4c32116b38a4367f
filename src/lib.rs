//! # Pattern Recognition
//!
//! A specificity-ranked key/value pattern matcher. Register patterns (maps of
//! field name to field value, where values may be shell-style globs) with a
//! payload, then query with a concrete subject to get the payload of the
//! single most specific compatible pattern.
//!
//! Typical uses are in-memory dispatch tables: routing rules, feature-flag
//! targeting, tag-based selection.
//!
//! ## Quick Start
//!
//! ### Basic Usage
//!
//! ```rust
//! use pattern_recognition::{Matcher, Pattern};
//!
//! let mut matcher = Matcher::new();
//! matcher
//!     .add(Pattern::root(), "default")
//!     .add([("env", "prod")], "prod")
//!     .add([("env", "prod"), ("region", "eu-west-1")], "prod-eu-west")
//!     .add([("region", "eu-*")], "eu");
//!
//! let subject = Pattern::from([("env", "prod"), ("region", "eu-west-1")]);
//! assert_eq!(matcher.find(&subject), Some(&"prod-eu-west"));
//!
//! let subject = Pattern::from([("env", "prod"), ("region", "us-east-1")]);
//! assert_eq!(matcher.find(&subject), Some(&"prod"));
//!
//! let subject = Pattern::from([("env", "staging"), ("region", "eu-central-1")]);
//! assert_eq!(matcher.find(&subject), Some(&"eu"));
//!
//! let subject = Pattern::from([("env", "staging")]);
//! assert_eq!(matcher.find(&subject), Some(&"default"));
//! ```
//!
//! ### Ranking Rules
//!
//! A pattern only matches when *all* of its fields are present in the
//! subject and match, either verbatim or as a glob. Extra subject fields are
//! ignored. Among matching patterns the score is
//!
//! | Match | Score |
//! |-------|-------|
//! | root (empty) pattern | `ROOT_WEIGHT` = 1 |
//! | every field as a glob | fields + `GLOB_WEIGHT` (2) |
//! | every field verbatim | fields + `EXACT_WEIGHT` (3) |
//!
//! The highest score wins; on equal score the earlier registration wins.
//! Note that a two-field glob match (`2 + 2`) ties with a one-field exact
//! match (`1 + 3`).
//!
//! ### Serialization
//!
//! ```rust
//! use pattern_recognition::Matcher;
//!
//! let matcher = Matcher::new()
//!     .with([("a", "1")], "A")
//!     .with([("b", "2")], "B");
//!
//! let json = matcher.to_json_string()?;
//! assert_eq!(json, r#"[{"match":{"a":"1"},"data":"A"},{"match":{"b":"2"},"data":"B"}]"#);
//!
//! let restored: Matcher<String> = Matcher::from_json_str(&json)?;
//! assert_eq!(restored.len(), 2);
//! # Ok::<(), pattern_recognition::PatternError>(())
//! ```
//!
//! ## Concurrency
//!
//! A [`Matcher`] does no internal synchronization. `find` takes `&self`, so
//! a matcher that is only read can be shared freely; callers that mutate it
//! concurrently wrap it in their own lock.

pub mod config;
pub mod engine;
pub mod error;
pub mod matcher;
pub mod pattern;
pub mod registry;

// Primary matcher interface
pub use engine::{MatchResult, Matcher};

// Configuration
pub use config::{InvalidGlobPolicy, MatcherConfig, ValueCoercion};

// Core types and errors
pub use error::{PatternError, Result};
pub use pattern::Pattern;
pub use registry::{Entry, MatchEntry, Registry};

// Scoring engine
pub use matcher::{
    glob_match, Glob, MatchKind, Score, Subject, EXACT_WEIGHT, GLOB_WEIGHT, ROOT_WEIGHT,
};
