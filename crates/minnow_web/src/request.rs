//! The request and its single-pass body access gate.

use std::mem;
use std::net::SocketAddr;
use std::sync::Arc;

use tracing::debug;

use crate::body::{Body, BodyDecoder, BodyStream, MultipartIter, UrlEncodedIter};
use crate::error::{WebError, WebResult};
use crate::headers::Headers;
use crate::request_line::RequestLine;

const URL_ENCODED_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";
const MULTIPART_CONTENT_TYPE: &str = "multipart/form-data";
const BOUNDARY_KEY: &str = "boundary=";

/// Where the request's byte stream currently lives.
///
/// Terminal states never transition back to `Unconsumed`; ownership of
/// the stream moves out exactly once.
enum BodyState {
    /// Nothing has read the stream yet.
    Unconsumed(BodyStream),
    /// `body()` materialized and cached the body; the stream is spent.
    BodyCached(Body),
    /// The raw stream was handed to a consumer; nothing else may read.
    StreamHandedOff,
}

/// An incoming HTTP request.
///
/// Beyond the immutable metadata (headers, request line, peer address),
/// a request guards the one thing that cannot be shared: the underlying
/// byte stream. Exactly one of the consumption paths may succeed:
///
/// - [`body`](Request::body) - materialize and cache the structured body
///   (repeat calls return the cache)
/// - [`take_stream`](Request::take_stream) - raw escape hatch
/// - [`url_encoded_iter`](Request::url_encoded_iter) - streaming form fields
/// - [`multipart_iter`](Request::multipart_iter) - streaming multipart
///   partitions
///
/// Crossing paths fails with an access-conflict error instead of
/// silently producing corrupt data, because the stream has no seek and
/// a second read would observe leftovers of the first.
pub struct Request {
    headers: Headers,
    request_line: RequestLine,
    remote_addr: SocketAddr,
    decoder: Arc<dyn BodyDecoder>,
    state: BodyState,
}

impl Request {
    /// Wraps a request's metadata and its unread byte stream.
    pub fn new(
        headers: Headers,
        request_line: RequestLine,
        remote_addr: SocketAddr,
        stream: BodyStream,
        decoder: Arc<dyn BodyDecoder>,
    ) -> Self {
        Self {
            headers,
            request_line,
            remote_addr,
            decoder,
            state: BodyState::Unconsumed(stream),
        }
    }

    /// Returns the request headers.
    #[must_use]
    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    /// Returns the request line.
    #[must_use]
    pub fn request_line(&self) -> &RequestLine {
        &self.request_line
    }

    /// Returns the address the request came from.
    #[must_use]
    pub fn remote_addr(&self) -> SocketAddr {
        self.remote_addr
    }

    /// Materializes the body via the decoder, caching it for repeat
    /// calls.
    ///
    /// # Errors
    ///
    /// Fails with [`WebError::StreamConsumed`] if the stream was already
    /// handed off through another path, or with whatever the decoder
    /// reports.
    pub fn body(&mut self) -> WebResult<&Body> {
        if matches!(self.state, BodyState::StreamHandedOff) {
            return Err(WebError::StreamConsumed);
        }

        if matches!(self.state, BodyState::Unconsumed(_)) {
            let state = mem::replace(&mut self.state, BodyState::StreamHandedOff);
            let BodyState::Unconsumed(mut stream) = state else {
                return Err(WebError::StreamConsumed);
            };
            // On decoder failure the stream is spent anyway, so the
            // state stays handed-off rather than pretending otherwise.
            let body = self.decoder.extract_data(&mut stream, &self.headers)?;
            debug!(
                request = %self.request_line,
                bytes = body.raw().len(),
                "request body materialized"
            );
            self.state = BodyState::BodyCached(body);
        }

        match &self.state {
            BodyState::BodyCached(body) => Ok(body),
            _ => Err(WebError::StreamConsumed),
        }
    }

    /// Hands out the raw byte stream, the escape hatch for handlers
    /// that do their own reading.
    ///
    /// Irreversible: after this, every other consumption path fails.
    ///
    /// # Errors
    ///
    /// Fails with [`WebError::BodyAlreadyRead`] if `body()` already ran,
    /// or [`WebError::StreamConsumed`] if the stream is already gone.
    pub fn take_stream(&mut self) -> WebResult<BodyStream> {
        self.check_unconsumed()?;
        let state = mem::replace(&mut self.state, BodyState::StreamHandedOff);
        match state {
            BodyState::Unconsumed(stream) => Ok(stream),
            // check_unconsumed already ruled these out.
            BodyState::BodyCached(_) => Err(WebError::BodyAlreadyRead),
            BodyState::StreamHandedOff => Err(WebError::StreamConsumed),
        }
    }

    /// Returns a lazy, single-pass iterator of url-encoded form fields.
    ///
    /// # Errors
    ///
    /// Fails on an access conflict, or with
    /// [`WebError::ContentTypeMismatch`] if the request's content type
    /// does not contain `application/x-www-form-urlencoded`.
    pub fn url_encoded_iter(&mut self) -> WebResult<UrlEncodedIter> {
        self.check_unconsumed()?;

        let content_type = self.headers.content_type().unwrap_or_default().to_string();
        if !content_type.contains(URL_ENCODED_CONTENT_TYPE) {
            return Err(WebError::ContentTypeMismatch {
                expected: URL_ENCODED_CONTENT_TYPE,
                actual: content_type,
            });
        }

        let content_length = self.headers.content_length();
        let decoder = Arc::clone(&self.decoder);
        let stream = self.take_stream()?;
        Ok(decoder.url_encoded_iter(stream, content_length))
    }

    /// Returns a lazy, single-pass iterator of multipart partitions.
    ///
    /// The boundary is everything after `boundary=` in the content-type
    /// header, exactly as the client sent it.
    ///
    /// # Errors
    ///
    /// Fails on an access conflict, with
    /// [`WebError::ContentTypeMismatch`] for a non-multipart content
    /// type, or with [`WebError::MissingBoundary`] when the boundary
    /// parameter is absent or blank.
    pub fn multipart_iter(&mut self) -> WebResult<MultipartIter> {
        self.check_unconsumed()?;

        let content_type = self.headers.content_type().unwrap_or_default().to_string();
        if !content_type.contains(MULTIPART_CONTENT_TYPE) {
            return Err(WebError::ContentTypeMismatch {
                expected: MULTIPART_CONTENT_TYPE,
                actual: content_type,
            });
        }

        let boundary = match content_type.find(BOUNDARY_KEY) {
            Some(idx) => content_type[idx + BOUNDARY_KEY.len()..].to_string(),
            None => {
                return Err(WebError::MissingBoundary { content_type });
            }
        };
        if boundary.trim().is_empty() {
            return Err(WebError::MissingBoundary { content_type });
        }

        let content_length = self.headers.content_length();
        let decoder = Arc::clone(&self.decoder);
        let stream = self.take_stream()?;
        Ok(decoder.multipart_iter(stream, &boundary, content_length))
    }

    /// Verifies the stream is still available before any hand-off.
    ///
    /// The cached-body case reports differently from the handed-off
    /// case: the caller's fix is different (stop mixing paths vs. stop
    /// reading twice).
    fn check_unconsumed(&self) -> WebResult<()> {
        match self.state {
            BodyState::Unconsumed(_) => Ok(()),
            BodyState::BodyCached(_) => Err(WebError::BodyAlreadyRead),
            BodyState::StreamHandedOff => Err(WebError::StreamConsumed),
        }
    }
}
