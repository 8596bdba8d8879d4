//! HTTP request headers.

/// An ordered list of header name/value pairs.
///
/// Lookup is case-insensitive per RFC 9110; insertion order and
/// duplicates are preserved, since some headers legitimately repeat.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers {
    pairs: Vec<(String, String)>,
}

impl Headers {
    /// Creates an empty header set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates headers from already-parsed name/value pairs.
    #[must_use]
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        Self { pairs }
    }

    /// Appends a header, keeping any existing values for the same name.
    pub fn add(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.pairs.push((name.into(), value.into()));
    }

    /// Returns the first value for `name`, case-insensitive.
    #[must_use]
    pub fn value_of(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Returns every value for `name` in insertion order.
    #[must_use]
    pub fn all_values(&self, name: &str) -> Vec<&str> {
        self.pairs
            .iter()
            .filter(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
            .collect()
    }

    /// Returns the `Content-Type` header value, if present.
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.value_of("content-type")
    }

    /// Returns the parsed `Content-Length`, if present and numeric.
    #[must_use]
    pub fn content_length(&self) -> Option<usize> {
        self.value_of("content-length")
            .and_then(|v| v.trim().parse().ok())
    }

    /// Returns the number of header pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Returns true if there are no headers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Iterates over name/value pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_case_insensitive() {
        let mut headers = Headers::new();
        headers.add("Content-Type", "text/plain");
        assert_eq!(headers.value_of("content-type"), Some("text/plain"));
        assert_eq!(headers.value_of("CONTENT-TYPE"), Some("text/plain"));
        assert_eq!(headers.content_type(), Some("text/plain"));
    }

    #[test]
    fn duplicates_keep_order() {
        let mut headers = Headers::new();
        headers.add("Set-Cookie", "a=1");
        headers.add("Set-Cookie", "b=2");
        assert_eq!(headers.all_values("set-cookie"), vec!["a=1", "b=2"]);
        assert_eq!(headers.value_of("set-cookie"), Some("a=1"));
    }

    #[test]
    fn content_length_parsing() {
        let mut headers = Headers::new();
        headers.add("Content-Length", " 42 ");
        assert_eq!(headers.content_length(), Some(42));

        let mut bad = Headers::new();
        bad.add("Content-Length", "not a number");
        assert_eq!(bad.content_length(), None);
        assert_eq!(Headers::new().content_length(), None);
    }
}
