//! Body types and the decoder seam.
//!
//! The gate in [`Request`](crate::Request) owns *when* the stream may be
//! read; the [`BodyDecoder`] owns *how* the bytes become structured
//! data. Concrete decoders live outside this crate.

use std::io::Read;

use crate::error::WebResult;
use crate::headers::Headers;

/// The raw byte stream backing a request body.
///
/// Single-pass: there is no seek, and re-reading yields garbage. The
/// gate hands ownership of this out at most once.
pub type BodyStream = Box<dyn Read + Send>;

/// A lazy, single-pass sequence of url-encoded form fields.
pub type UrlEncodedIter = Box<dyn Iterator<Item = WebResult<UrlEncodedPair>> + Send>;

/// A lazy, single-pass sequence of multipart partitions.
pub type MultipartIter = Box<dyn Iterator<Item = WebResult<MultipartPartition>> + Send>;

/// A fully-materialized request body.
///
/// Holds the raw bytes plus the decoder's key/value view of them (form
/// fields for url-encoded or multipart bodies, empty otherwise).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Body {
    raw: Vec<u8>,
    fields: Vec<(String, Vec<u8>)>,
}

impl Body {
    /// Creates a body from raw bytes and decoded fields.
    #[must_use]
    pub fn new(raw: Vec<u8>, fields: Vec<(String, Vec<u8>)>) -> Self {
        Self { raw, fields }
    }

    /// Creates an empty body.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns the raw body bytes.
    #[must_use]
    pub fn raw(&self) -> &[u8] {
        &self.raw
    }

    /// Returns the first field value for `name`, if the decoder found one.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&[u8]> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_slice())
    }

    /// Returns the field value for `name` as UTF-8 text, if valid.
    #[must_use]
    pub fn field_str(&self, name: &str) -> Option<&str> {
        self.field(name).and_then(|v| std::str::from_utf8(v).ok())
    }

    /// Returns true if there are no bytes and no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty() && self.fields.is_empty()
    }
}

/// One key/value pair from a url-encoded form body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlEncodedPair {
    /// Field name.
    pub name: String,
    /// Decoded field value.
    pub value: String,
}

impl UrlEncodedPair {
    /// Creates a pair.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// One section of a multipart body, delimited by the boundary marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultipartPartition {
    headers: Headers,
    data: Vec<u8>,
}

impl MultipartPartition {
    /// Creates a partition from its sub-headers and content bytes.
    #[must_use]
    pub fn new(headers: Headers, data: Vec<u8>) -> Self {
        Self { headers, data }
    }

    /// Returns the partition's own headers.
    #[must_use]
    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    /// Returns the partition content bytes.
    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Returns the `name` parameter of the `Content-Disposition` header.
    #[must_use]
    pub fn name(&self) -> Option<String> {
        self.disposition_param("name")
    }

    /// Returns the `filename` parameter of the `Content-Disposition`
    /// header, present for file uploads.
    #[must_use]
    pub fn filename(&self) -> Option<String> {
        self.disposition_param("filename")
    }

    fn disposition_param(&self, param: &str) -> Option<String> {
        let disposition = self.headers.value_of("content-disposition")?;
        for part in disposition.split(';') {
            let part = part.trim();
            if let Some(rest) = part.strip_prefix(param) {
                if let Some(value) = rest.strip_prefix('=') {
                    return Some(value.trim_matches('"').to_string());
                }
            }
        }
        None
    }
}

/// Turns raw body bytes into structured data.
///
/// Implemented by the protocol decoders; the gate only decides when the
/// stream may be read and then delegates here. Iterator-returning
/// methods must be lazy and single-pass: they own the stream and cannot
/// restart it.
pub trait BodyDecoder: Send + Sync {
    /// Reads the whole body from the stream, guided by the headers, and
    /// materializes it.
    fn extract_data(&self, stream: &mut dyn Read, headers: &Headers) -> WebResult<Body>;

    /// Streams url-encoded key/value pairs out of the body.
    fn url_encoded_iter(
        &self,
        stream: BodyStream,
        content_length: Option<usize>,
    ) -> UrlEncodedIter;

    /// Streams multipart partitions out of the body, split on `boundary`.
    fn multipart_iter(
        &self,
        stream: BodyStream,
        boundary: &str,
        content_length: Option<usize>,
    ) -> MultipartIter;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_field_lookup() {
        let body = Body::new(
            b"ignored".to_vec(),
            vec![
                ("name".to_string(), b"alice".to_vec()),
                ("photo".to_string(), vec![0xff, 0xd8]),
            ],
        );
        assert_eq!(body.field_str("name"), Some("alice"));
        assert_eq!(body.field("photo"), Some(&[0xff, 0xd8][..]));
        assert_eq!(body.field("missing"), None);
        // Non-UTF-8 field is readable as bytes but not as text.
        assert_eq!(body.field_str("photo"), None);
    }

    #[test]
    fn empty_body() {
        assert!(Body::empty().is_empty());
        assert!(!Body::new(b"x".to_vec(), vec![]).is_empty());
    }

    #[test]
    fn partition_disposition_parsing() {
        let mut headers = Headers::new();
        headers.add(
            "Content-Disposition",
            r#"form-data; name="upload"; filename="cat.webp""#,
        );
        let partition = MultipartPartition::new(headers, vec![1, 2, 3]);
        assert_eq!(partition.name().as_deref(), Some("upload"));
        assert_eq!(partition.filename().as_deref(), Some("cat.webp"));
        assert_eq!(partition.data(), &[1, 2, 3]);
    }

    #[test]
    fn partition_without_disposition() {
        let partition = MultipartPartition::new(Headers::new(), vec![]);
        assert_eq!(partition.name(), None);
        assert_eq!(partition.filename(), None);
    }
}
