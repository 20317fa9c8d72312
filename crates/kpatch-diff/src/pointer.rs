//! JSON Pointer (RFC 6901) segment escaping.
//!
//! Map keys become pointer segments by escaping `~` as `~0` and `/` as `~1`.
//! The tilde substitution must run first: escaping `/` first would turn the
//! `~` of the freshly written `~1` into `~01`.

use std::borrow::Cow;

/// Escape a single raw key into a pointer segment.
///
/// Apply this exactly once per raw key. Escaping already-escaped output is
/// not the identity (`~0` would become `~00`).
///
/// # Examples
///
/// ```
/// use kpatch_diff::pointer::escape;
///
/// assert_eq!(escape("a/b"), "a~1b");
/// assert_eq!(escape("a~b"), "a~0b");
/// assert_eq!(escape("a~1b"), "a~01b");
/// assert_eq!(escape("plain"), "plain");
/// ```
pub fn escape(segment: &str) -> Cow<'_, str> {
    if !segment.contains(['~', '/']) {
        return Cow::Borrowed(segment);
    }
    Cow::Owned(segment.replace('~', "~0").replace('/', "~1"))
}

/// Reverse [`escape`]: `~1` becomes `/`, then `~0` becomes `~`.
pub fn unescape(segment: &str) -> Cow<'_, str> {
    if !segment.contains('~') {
        return Cow::Borrowed(segment);
    }
    Cow::Owned(segment.replace("~1", "/").replace("~0", "~"))
}

/// Strip every trailing `/` so joining never produces `//`.
pub fn normalize_prefix(prefix: &str) -> &str {
    prefix.trim_end_matches('/')
}

/// Append a raw key to an already normalized prefix.
pub fn join(prefix: &str, key: &str) -> String {
    let segment = escape(key);
    let mut path = String::with_capacity(prefix.len() + 1 + segment.len());
    path.push_str(prefix);
    path.push('/');
    path.push_str(&segment);
    path
}

/// Split a pointer into its unescaped segments.
///
/// The empty pointer addresses the root and has no segments. A pointer
/// without a leading `/` is treated as if it had one.
pub fn split(pointer: &str) -> Vec<String> {
    if pointer.is_empty() {
        return Vec::new();
    }
    let body = pointer.strip_prefix('/').unwrap_or(pointer);
    body.split('/').map(|s| unescape(s).into_owned()).collect()
}
