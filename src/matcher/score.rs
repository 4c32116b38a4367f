//! Specificity scoring of a compiled pattern against a subject.
//!
//! A pattern is scored through two independent channels over its declared
//! fields:
//!
//! - the **exact** channel counts fields whose subject value equals the
//!   pattern value verbatim;
//! - the **glob** channel counts fields whose pattern value, read as a glob,
//!   matches the subject value.
//!
//! A channel only qualifies when it covers every declared field. A
//! qualifying channel scores `fields + weight`, and the pattern's score is
//! the larger of the two channels. Fields are never blended across
//! channels: a pattern mixing literal and wildcard values can only qualify
//! through the glob channel.
//!
//! The root pattern always scores [`ROOT_WEIGHT`], below any qualifying
//! non-empty pattern. A score of `0` means the pattern is incompatible with
//! the subject.

use crate::matcher::compiled::CompiledPattern;
use crate::matcher::types::Subject;
use serde::Serialize;
use std::fmt;

/// Specificity of a pattern for a subject; higher is more specific.
pub type Score = usize;

/// Score of the root (empty) pattern.
pub const ROOT_WEIGHT: Score = 1;

/// Bonus added to a qualifying glob channel.
pub const GLOB_WEIGHT: Score = 2;

/// Bonus added to a qualifying exact channel.
pub const EXACT_WEIGHT: Score = 3;

/// Which channel produced a pattern's score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchKind {
    /// The empty pattern
    Root,
    /// Every field matched as a glob
    Glob,
    /// Every field matched verbatim
    Exact,
}

impl fmt::Display for MatchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchKind::Root => write!(f, "root"),
            MatchKind::Glob => write!(f, "glob"),
            MatchKind::Exact => write!(f, "exact"),
        }
    }
}

/// A non-zero score together with the channel that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Specificity {
    pub kind: MatchKind,
    pub score: Score,
}

/// Score of one channel: `count + weight` when `count` covers all
/// `field_count` fields, otherwise `0`.
pub fn channel_score(count: usize, field_count: usize, weight: Score) -> Score {
    if count > 0 && count >= field_count {
        count + weight
    } else {
        0
    }
}

/// Evaluate `pattern` against `subject`.
///
/// Returns `None` when the pattern is incompatible with the subject. When
/// both channels qualify the exact channel wins, since it always carries the
/// larger weight for the same field count.
pub fn evaluate<S: Subject + ?Sized>(
    pattern: &CompiledPattern,
    subject: &S,
) -> Option<Specificity> {
    if pattern.is_root() {
        return Some(Specificity {
            kind: MatchKind::Root,
            score: ROOT_WEIGHT,
        });
    }

    let mut exact = 0;
    let mut glob = 0;
    let check_glob = !pattern.is_literal_only();

    for field in pattern.fields() {
        // a missing field disqualifies both channels
        let value = subject.get_field(&field.name)?;

        let exact_hit = value == field.value;
        let glob_hit = check_glob && field.glob.as_ref().map_or(false, |g| g.is_match(value));

        if !exact_hit && !glob_hit {
            return None;
        }
        exact += usize::from(exact_hit);
        glob += usize::from(glob_hit);
    }

    let field_count = pattern.len();
    let exact_score = channel_score(exact, field_count, EXACT_WEIGHT);
    let glob_score = channel_score(glob, field_count, GLOB_WEIGHT);

    match (exact_score, glob_score) {
        (0, 0) => None,
        (e, g) if e >= g => Some(Specificity {
            kind: MatchKind::Exact,
            score: e,
        }),
        (_, g) => Some(Specificity {
            kind: MatchKind::Glob,
            score: g,
        }),
    }
}

/// Score of `pattern` against `subject`, `0` when incompatible.
pub fn score<S: Subject + ?Sized>(pattern: &CompiledPattern, subject: &S) -> Score {
    evaluate(pattern, subject).map_or(0, |s| s.score)
}
