//! Mime types the stack serves to clients.

/// Content types used when describing response data to clients.
///
/// See <https://developer.mozilla.org/en-US/docs/Web/HTTP/Headers/Content-Type>.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentType {
    /// `text/html; charset=UTF-8`
    TextHtml,
    /// `text/css`
    TextCss,
    /// `text/plain`
    TextPlain,
    /// `application/javascript`
    ApplicationJavascript,
    /// `image/webp`
    ImageWebp,
    /// Used when no body is returned, e.g. 204 and 303 statuses.
    None,
}

impl ContentType {
    /// Returns the full header line for this content type, or an empty
    /// string for [`ContentType::None`].
    #[must_use]
    pub fn header_line(&self) -> &'static str {
        match self {
            ContentType::TextHtml => "Content-Type: text/html; charset=UTF-8",
            ContentType::TextCss => "Content-Type: text/css",
            ContentType::TextPlain => "Content-Type: text/plain",
            ContentType::ApplicationJavascript => "Content-Type: application/javascript",
            ContentType::ImageWebp => "Content-Type: image/webp",
            ContentType::None => "",
        }
    }

    /// Returns just the mime type, without the header name.
    #[must_use]
    pub fn mime(&self) -> &'static str {
        match self {
            ContentType::TextHtml => "text/html; charset=UTF-8",
            ContentType::TextCss => "text/css",
            ContentType::TextPlain => "text/plain",
            ContentType::ApplicationJavascript => "application/javascript",
            ContentType::ImageWebp => "image/webp",
            ContentType::None => "",
        }
    }
}
