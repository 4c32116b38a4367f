//! Shell-style glob matching over a single string value.
//!
//! | Pattern   | Matches                                              |
//! |-----------|------------------------------------------------------|
//! | `*`       | any run of characters, including the empty run       |
//! | `?`       | exactly one character                                |
//! | `[abc]`   | one of the listed characters                         |
//! | `[a-z]`   | one character in the range                           |
//! | `[!a-z]`  | one character *not* in the class (`[^a-z]` also)     |
//! | `[[:digit:]]` | one character in a POSIX named class             |
//! | `\x`      | the character `x` literally                          |
//!
//! A `]` directly after the opening `[` (or `[!`) is a class member, and a
//! `-` at either end of a class is literal. Matching is case-sensitive and
//! works on Unicode scalar values; `/` and leading `.` have no special
//! meaning since values are not paths.
//!
//! Named classes (`alnum`, `alpha`, `blank`, `cntrl`, `digit`, `graph`,
//! `lower`, `print`, `punct`, `space`, `upper`, `xdigit`) use their ASCII
//! definitions, as in the C locale, and may be mixed with other members:
//! `[[:alpha:]_]`.
//!
//! Globs are parsed once when a pattern is registered and evaluated many
//! times, so [`Glob`] keeps a pre-parsed token list and a fast path for
//! values without any wildcard.

use crate::error::{PatternError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Literal(char),
    AnyChar,
    AnyRun,
    Class { negated: bool, items: Vec<ClassItem> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ClassItem {
    Char(char),
    Range(char, char),
    Named(NamedClass),
}

impl ClassItem {
    fn contains(self, c: char) -> bool {
        match self {
            ClassItem::Char(x) => x == c,
            // reversed ranges are empty
            ClassItem::Range(lo, hi) => lo <= c && c <= hi,
            ClassItem::Named(class) => class.contains(c),
        }
    }
}

/// POSIX `[:name:]` character classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NamedClass {
    Alnum,
    Alpha,
    Blank,
    Cntrl,
    Digit,
    Graph,
    Lower,
    Print,
    Punct,
    Space,
    Upper,
    Xdigit,
}

impl NamedClass {
    fn from_name(name: &str) -> Option<Self> {
        let class = match name {
            "alnum" => NamedClass::Alnum,
            "alpha" => NamedClass::Alpha,
            "blank" => NamedClass::Blank,
            "cntrl" => NamedClass::Cntrl,
            "digit" => NamedClass::Digit,
            "graph" => NamedClass::Graph,
            "lower" => NamedClass::Lower,
            "print" => NamedClass::Print,
            "punct" => NamedClass::Punct,
            "space" => NamedClass::Space,
            "upper" => NamedClass::Upper,
            "xdigit" => NamedClass::Xdigit,
            _ => return None,
        };
        Some(class)
    }

    fn contains(self, c: char) -> bool {
        match self {
            NamedClass::Alnum => c.is_ascii_alphanumeric(),
            NamedClass::Alpha => c.is_ascii_alphabetic(),
            NamedClass::Blank => matches!(c, ' ' | '\t'),
            NamedClass::Cntrl => c.is_ascii_control(),
            NamedClass::Digit => c.is_ascii_digit(),
            NamedClass::Graph => c.is_ascii_graphic(),
            NamedClass::Lower => c.is_ascii_lowercase(),
            NamedClass::Print => c.is_ascii_graphic() || c == ' ',
            NamedClass::Punct => c.is_ascii_punctuation(),
            NamedClass::Space => matches!(c, ' ' | '\t' | '\n' | '\x0B' | '\x0C' | '\r'),
            NamedClass::Upper => c.is_ascii_uppercase(),
            NamedClass::Xdigit => c.is_ascii_hexdigit(),
        }
    }
}

/// Why a bracket expression could not be parsed.
enum ClassError {
    Unterminated,
    UnknownName,
}

impl Token {
    fn matches(&self, c: char) -> bool {
        match self {
            Token::Literal(l) => *l == c,
            Token::AnyChar | Token::AnyRun => true,
            Token::Class { negated, items } => {
                items.iter().any(|item| item.contains(c)) != *negated
            }
        }
    }
}

/// A compiled glob expression.
///
/// # Examples
///
/// ```rust
/// use pattern_recognition::Glob;
///
/// let glob = Glob::new("x?z")?;
/// assert!(glob.is_match("xyz"));
/// assert!(!glob.is_match("xyyz"));
///
/// // malformed syntax: strict parsing fails, lenient parsing goes literal
/// assert!(Glob::new("[abc").is_err());
/// assert!(Glob::new_lenient("[abc").is_match("[abc"));
/// # Ok::<(), pattern_recognition::PatternError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Glob {
    source: String,
    tokens: Box<[Token]>,
    /// Unescaped text when the glob has no wildcard tokens.
    literal: Option<String>,
}

impl Glob {
    /// Parse a glob, rejecting unterminated classes, unknown `[:name:]`
    /// classes and dangling escapes.
    pub fn new(pattern: &str) -> Result<Self> {
        Self::parse(pattern, true)
    }

    /// Parse a glob, treating malformed constructs as literal characters.
    ///
    /// An unknown `[:name:]` inside a class is read as plain members.
    pub fn new_lenient(pattern: &str) -> Self {
        Self::parse(pattern, false).unwrap_or_else(|_| Self::verbatim(pattern))
    }

    /// The pattern text this glob was parsed from.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// True when the glob contains no wildcard or class, i.e. it only
    /// matches one exact string.
    pub fn is_literal(&self) -> bool {
        self.literal.is_some()
    }

    /// The single string this glob matches, when it has no wildcard.
    pub fn as_literal(&self) -> Option<&str> {
        self.literal.as_deref()
    }

    /// Test whether `text` matches the whole glob.
    pub fn is_match(&self, text: &str) -> bool {
        if let Some(literal) = &self.literal {
            return literal == text;
        }

        let text: Vec<char> = text.chars().collect();
        let tokens = &self.tokens;

        let mut t = 0;
        let mut s = 0;
        // (token after the last `*`, text position that `*` currently ends at)
        let mut backtrack: Option<(usize, usize)> = None;

        while s < text.len() {
            if let Some(token) = tokens.get(t) {
                if *token == Token::AnyRun {
                    backtrack = Some((t + 1, s));
                    t += 1;
                    continue;
                }
                if token.matches(text[s]) {
                    t += 1;
                    s += 1;
                    continue;
                }
            }

            match backtrack {
                Some((star_next, star_end)) => {
                    t = star_next;
                    s = star_end + 1;
                    backtrack = Some((star_next, star_end + 1));
                }
                None => return false,
            }
        }

        tokens[t..].iter().all(|token| *token == Token::AnyRun)
    }

    fn parse(pattern: &str, strict: bool) -> Result<Self> {
        let chars: Vec<char> = pattern.chars().collect();
        let mut tokens = Vec::with_capacity(chars.len());
        let mut i = 0;

        while i < chars.len() {
            match chars[i] {
                '*' => {
                    // collapse runs of `*`
                    if tokens.last() != Some(&Token::AnyRun) {
                        tokens.push(Token::AnyRun);
                    }
                    i += 1;
                }
                '?' => {
                    tokens.push(Token::AnyChar);
                    i += 1;
                }
                '\\' => match chars.get(i + 1) {
                    Some(&escaped) => {
                        tokens.push(Token::Literal(escaped));
                        i += 2;
                    }
                    None if strict => return Err(invalid(pattern, "dangling escape")),
                    None => {
                        tokens.push(Token::Literal('\\'));
                        i += 1;
                    }
                },
                '[' => match parse_class(&chars, i + 1, strict) {
                    Ok((token, next)) => {
                        tokens.push(token);
                        i = next;
                    }
                    Err(ClassError::UnknownName) => {
                        return Err(invalid(pattern, "unknown character class name"))
                    }
                    Err(ClassError::Unterminated) if strict => {
                        return Err(invalid(pattern, "unterminated character class"))
                    }
                    Err(ClassError::Unterminated) => {
                        tokens.push(Token::Literal('['));
                        i += 1;
                    }
                },
                c => {
                    tokens.push(Token::Literal(c));
                    i += 1;
                }
            }
        }

        Ok(Self::from_tokens(pattern, tokens))
    }

    fn from_tokens(pattern: &str, tokens: Vec<Token>) -> Self {
        let literal = tokens
            .iter()
            .map(|token| match token {
                Token::Literal(c) => Some(*c),
                _ => None,
            })
            .collect::<Option<String>>();

        Self {
            source: pattern.to_string(),
            tokens: tokens.into_boxed_slice(),
            literal,
        }
    }

    /// A glob matching exactly `pattern`, with no special characters.
    fn verbatim(pattern: &str) -> Self {
        Self::from_tokens(pattern, pattern.chars().map(Token::Literal).collect())
    }
}

/// Parse a bracket expression whose body starts at `start` (just past `[`).
/// Returns the class token and the index after the closing `]`.
///
/// Unknown `[:name:]` classes are an error only when `strict`; otherwise
/// their characters are read as plain members.
fn parse_class(
    chars: &[char],
    start: usize,
    strict: bool,
) -> std::result::Result<(Token, usize), ClassError> {
    let mut i = start;
    let negated = matches!(chars.get(i), Some('!') | Some('^'));
    if negated {
        i += 1;
    }

    let mut items = Vec::new();
    let mut first = true;

    loop {
        let c = *chars.get(i).ok_or(ClassError::Unterminated)?;
        if c == ']' && !first {
            return Ok((Token::Class { negated, items }, i + 1));
        }
        first = false;

        if let Some((name, after)) = class_name(chars, i) {
            match NamedClass::from_name(&name) {
                Some(class) => {
                    items.push(ClassItem::Named(class));
                    i = after;
                    continue;
                }
                None if strict => return Err(ClassError::UnknownName),
                None => {}
            }
        }

        let (lo, after) = class_char(chars, i).ok_or(ClassError::Unterminated)?;
        let is_range = chars.get(after) == Some(&'-')
            && chars.get(after + 1).map_or(false, |&next| next != ']');

        if is_range {
            let (hi, after_hi) = class_char(chars, after + 1).ok_or(ClassError::Unterminated)?;
            items.push(ClassItem::Range(lo, hi));
            i = after_hi;
        } else {
            items.push(ClassItem::Char(lo));
            i = after;
        }
    }
}

/// Read a `[:name:]` starting at `i`, returning the name and the index past
/// the closing `:]`.
fn class_name(chars: &[char], i: usize) -> Option<(String, usize)> {
    if chars.get(i) != Some(&'[') || chars.get(i + 1) != Some(&':') {
        return None;
    }

    let start = i + 2;
    let mut j = start;
    while let Some(&c) = chars.get(j) {
        match c {
            ':' if chars.get(j + 1) == Some(&']') => {
                return Some((chars[start..j].iter().collect(), j + 2));
            }
            ']' => return None,
            _ => j += 1,
        }
    }
    None
}

fn class_char(chars: &[char], i: usize) -> Option<(char, usize)> {
    match *chars.get(i)? {
        '\\' => chars.get(i + 1).map(|&c| (c, i + 2)),
        c => Some((c, i + 1)),
    }
}

fn invalid(pattern: &str, reason: &str) -> PatternError {
    PatternError::InvalidGlob {
        pattern: pattern.to_string(),
        reason: reason.to_string(),
    }
}

/// Match `text` against `pattern` using lenient glob parsing.
///
/// Convenience for one-off checks; registered patterns pre-compile their
/// globs instead.
pub fn glob_match(pattern: &str, text: &str) -> bool {
    Glob::new_lenient(pattern).is_match(text)
}
