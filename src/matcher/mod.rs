//! Scoring engine for specificity-ranked pattern matching.
//!
//! The matcher system separates compilation from evaluation:
//! - **Compilation Phase**: every field value of a registered pattern is
//!   parsed once into a [`Glob`] ([`CompiledPattern`])
//! - **Evaluation Phase**: [`score::evaluate`] walks the compiled fields and
//!   looks them up in the query [`Subject`]
//!
//! ## Core Components
//!
//! - [`Glob`] - self-contained shell-style glob over one string value
//! - [`CompiledPattern`] - pre-parsed pattern ready for scoring
//! - [`Subject`] - field lookup seam for query subjects
//! - [`score`] - exact/glob channel scoring and the weight constants
//!
//! ## Example Usage
//!
//! ```rust
//! use pattern_recognition::{InvalidGlobPolicy, Pattern};
//! use pattern_recognition::matcher::{evaluate, CompiledPattern, MatchKind, GLOB_WEIGHT};
//!
//! let compiled = CompiledPattern::compile(
//!     &Pattern::from([("region", "eu-*")]),
//!     InvalidGlobPolicy::Literal,
//! );
//!
//! let subject = Pattern::from([("region", "eu-west-1"), ("tier", "gold")]);
//! let specificity = evaluate(&compiled, &subject).unwrap();
//!
//! assert_eq!(specificity.kind, MatchKind::Glob);
//! assert_eq!(specificity.score, 1 + GLOB_WEIGHT);
//! ```

pub mod compiled;
pub mod glob;
pub mod score;
pub mod types;

pub use compiled::{CompiledField, CompiledPattern};
pub use glob::{glob_match, Glob};
pub use score::{
    channel_score, evaluate, score, MatchKind, Score, Specificity, EXACT_WEIGHT, GLOB_WEIGHT,
    ROOT_WEIGHT,
};
pub use types::Subject;
