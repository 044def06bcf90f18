//! HTTP header map with case-insensitive name lookup.
//!
//! Header names compare case-insensitively per RFC 9110 §5; insertion order
//! is preserved for serialization.

use std::fmt;

/// An order-preserving HTTP header map with case-insensitive name lookup.
///
/// # Examples
///
/// ```
/// use kerangka::http::Headers;
///
/// let mut headers = Headers::new();
/// headers.insert("Content-Type", "text/html");
/// assert_eq!(headers.get("content-type"), Some("text/html"));
///
/// headers.set("Content-Type", "application/json");
/// assert_eq!(headers.get("CONTENT-TYPE"), Some("application/json"));
/// assert_eq!(headers.len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Headers {
    inner: Vec<(String, String)>,
}

impl Headers {
    /// Creates an empty header map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a header map with pre-allocated capacity for `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            inner: Vec::with_capacity(capacity),
        }
    }

    /// Appends a header entry without touching existing entries of the same name.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.inner.push((name.into(), value.into()));
    }

    /// Replaces the value of `name`, or appends it if absent.
    ///
    /// All existing entries with the same name are dropped first, so the map
    /// holds exactly one entry for `name` afterwards.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        self.inner.retain(|(k, _)| !k.eq_ignore_ascii_case(&name));
        self.inner.push((name, value.into()));
    }

    /// Returns the first value for `name` (case-insensitive), or `None`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.inner
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Removes all entries named `name` (case-insensitive).
    ///
    /// Returns `true` if any entry was removed.
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.inner.len();
        self.inner.retain(|(k, _)| !k.eq_ignore_ascii_case(name));
        self.inner.len() < before
    }

    /// Returns `true` if the map contains at least one entry named `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.inner.iter().any(|(k, _)| k.eq_ignore_ascii_case(name))
    }

    /// Returns the number of header entries.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns `true` if there are no header entries.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Returns an iterator over all `(name, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.inner.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl fmt::Display for Headers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, value) in &self.inner {
            write!(f, "{name}: {value}\r\n")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_is_case_insensitive() {
        let mut h = Headers::new();
        h.insert("X-Requested-With", "XMLHttpRequest");
        assert_eq!(h.get("x-requested-with"), Some("XMLHttpRequest"));
        assert_eq!(h.get("X-REQUESTED-WITH"), Some("XMLHttpRequest"));
    }

    #[test]
    fn insert_appends() {
        let mut h = Headers::new();
        h.insert("X-Tag", "a");
        h.insert("X-Tag", "b");
        assert_eq!(h.len(), 2);
        // First entry wins on lookup
        assert_eq!(h.get("x-tag"), Some("a"));
    }

    #[test]
    fn set_replaces_all() {
        let mut h = Headers::new();
        h.insert("Location", "/old");
        h.insert("location", "/older");
        h.set("Location", "/new");
        assert_eq!(h.len(), 1);
        assert_eq!(h.get("location"), Some("/new"));
    }

    #[test]
    fn remove_drops_every_entry() {
        let mut h = Headers::new();
        h.insert("X-Foo", "1");
        h.insert("x-foo", "2");
        assert!(h.remove("X-FOO"));
        assert!(h.is_empty());
        assert!(!h.remove("x-foo"));
    }

    #[test]
    fn contains_and_missing() {
        let mut h = Headers::new();
        h.insert("Referer", "/foo");
        assert!(h.contains("referer"));
        assert!(!h.contains("host"));
        assert_eq!(h.get("host"), None);
    }
}
