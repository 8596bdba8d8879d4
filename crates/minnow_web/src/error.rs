//! Error types for request handling.

use std::io;
use thiserror::Error;

/// Result type for request operations.
pub type WebResult<T> = Result<T, WebError>;

/// Errors that can occur while accessing a request.
#[derive(Debug, Error)]
pub enum WebError {
    /// The body was already materialized with `body()`; reading the
    /// stream on another path afterwards would produce invalid data.
    #[error(
        "the request body was already read with body(); \
         if you intend to work with the stream directly, do not use body()"
    )]
    BodyAlreadyRead,

    /// The underlying stream was already handed off for reading
    /// elsewhere; any further read would be incorrect.
    #[error("the request's input stream has already begun processing elsewhere; results would be invalid")]
    StreamConsumed,

    /// The request was not sent with the content type an access path
    /// requires.
    #[error("this request was not sent with a content type of {expected}; the content type was: {actual:?}")]
    ContentTypeMismatch {
        /// Content type the access path requires.
        expected: &'static str,
        /// Content type the request actually carried.
        actual: String,
    },

    /// No usable boundary parameter was found for a multipart body.
    #[error("did not find a valid boundary value for the multipart input; header was: {content_type:?}")]
    MissingBoundary {
        /// The raw content-type header value.
        content_type: String,
    },

    /// A decoder failed to make sense of the body bytes.
    #[error("body decoding failed: {0}")]
    Decode(String),

    /// An I/O error occurred while reading the stream.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl WebError {
    /// Returns true if this error signals a caller mixing consumption
    /// paths, as opposed to bad request data.
    #[must_use]
    pub fn is_access_conflict(&self) -> bool {
        matches!(self, WebError::BodyAlreadyRead | WebError::StreamConsumed)
    }
}
