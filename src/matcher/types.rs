//! Core type definitions shared by the scoring engine.

use crate::pattern::Pattern;
use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

/// Field lookup for a query subject.
///
/// Scoring only ever asks a subject for the value of a field a registered
/// pattern declares, so any map-like structure can be queried directly
/// without first being copied into a [`Pattern`].
///
/// # Example
/// ```rust
/// use pattern_recognition::{Matcher, Subject};
///
/// struct Request<'a> {
///     method: &'a str,
///     path: &'a str,
/// }
///
/// impl Subject for Request<'_> {
///     fn get_field(&self, field: &str) -> Option<&str> {
///         match field {
///             "method" => Some(self.method),
///             "path" => Some(self.path),
///             _ => None,
///         }
///     }
/// }
///
/// let mut matcher = Matcher::new();
/// matcher.add([("method", "GET"), ("path", "/api/*")], "api-read");
///
/// let request = Request { method: "GET", path: "/api/users" };
/// assert_eq!(matcher.find(&request), Some(&"api-read"));
/// ```
pub trait Subject {
    /// Value of `field` in the subject, or `None` when absent.
    fn get_field(&self, field: &str) -> Option<&str>;
}

impl Subject for Pattern {
    fn get_field(&self, field: &str) -> Option<&str> {
        self.get(field)
    }
}

impl Subject for BTreeMap<String, String> {
    fn get_field(&self, field: &str) -> Option<&str> {
        self.get(field).map(String::as_str)
    }
}

impl<S: BuildHasher> Subject for HashMap<String, String, S> {
    fn get_field(&self, field: &str) -> Option<&str> {
        self.get(field).map(String::as_str)
    }
}

impl<T: Subject + ?Sized> Subject for &T {
    fn get_field(&self, field: &str) -> Option<&str> {
        (**self).get_field(field)
    }
}
