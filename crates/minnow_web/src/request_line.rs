//! The first line of an HTTP request.

use std::fmt;

/// Parsed request line: method, path, and protocol version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestLine {
    method: String,
    path: String,
    version: String,
}

impl RequestLine {
    /// Creates a request line from its three parts.
    pub fn new(
        method: impl Into<String>,
        path: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
            version: version.into(),
        }
    }

    /// Returns the HTTP method, e.g. `GET`.
    #[must_use]
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Returns the request path, e.g. `/photos?page=2`.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the protocol version, e.g. `HTTP/1.1`.
    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }
}

impl fmt::Display for RequestLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.method, self.path, self.version)
    }
}
