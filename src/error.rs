//! Error types for hash fragment decoding and URL handling.

use thiserror::Error;

/// Errors that can occur while reading or writing hash parameters.
///
/// Numeric parse failures are not represented here: unparseable numbers
/// decode to `f64::NAN`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HashParamError {
    /// The stored value is not valid base64.
    #[error("Invalid base64 data: {0}")]
    InvalidBase64(String),

    /// The decoded bytes are not valid UTF-8.
    #[error("Decoded value is not valid UTF-8")]
    InvalidUtf8,

    /// A percent-escape sequence is malformed or decodes to invalid UTF-8.
    #[error("Malformed URI sequence: {0}")]
    MalformedUri(String),

    /// JSON serialization or parsing failed.
    #[error("JSON error: {0}")]
    Json(String),

    /// URL parsing failed using the url crate.
    #[error("URL parsing error: {0}")]
    UrlParseError(String),
}

impl From<url::ParseError> for HashParamError {
    fn from(err: url::ParseError) -> Self {
        HashParamError::UrlParseError(err.to_string())
    }
}

impl From<base64::DecodeError> for HashParamError {
    fn from(err: base64::DecodeError) -> Self {
        HashParamError::InvalidBase64(err.to_string())
    }
}

impl From<serde_json::Error> for HashParamError {
    fn from(err: serde_json::Error) -> Self {
        HashParamError::Json(err.to_string())
    }
}

impl From<std::string::FromUtf8Error> for HashParamError {
    fn from(_: std::string::FromUtf8Error) -> Self {
        HashParamError::InvalidUtf8
    }
}
