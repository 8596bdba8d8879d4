//! # minnow_web
//!
//! Request-side types for the minnow HTTP stack.
//!
//! The centerpiece is [`Request`]: it wraps a request's metadata and the
//! single-pass byte stream behind it, and guarantees the stream is
//! consumed exactly once no matter which access path a handler picks
//! (structured [`Body`], raw stream, multipart iteration, url-encoded
//! iteration). Mixing paths fails loudly instead of yielding truncated
//! or duplicated data.
//!
//! Actual byte decoding is delegated to a [`BodyDecoder`]; this crate
//! owns the gate, not the codecs.

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod body;
mod content_type;
mod error;
mod headers;
mod request;
mod request_line;

pub use body::{
    Body, BodyDecoder, BodyStream, MultipartIter, MultipartPartition, UrlEncodedIter,
    UrlEncodedPair,
};
pub use content_type::ContentType;
pub use error::{WebError, WebResult};
pub use headers::Headers;
pub use request::Request;
pub use request_line::RequestLine;
