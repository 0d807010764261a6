//! Error types for token encoding and decoding.

use std::fmt;

use thiserror::Error;

/// Result type alias for codec operations.
pub type Result<T> = std::result::Result<T, CodecError>;

/// The two payloads carried by a token, in wire order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frame {
    Code,
    Map,
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Frame::Code => f.write_str("code"),
            Frame::Map => f.write_str("map"),
        }
    }
}

/// Errors produced by [`encode`](crate::encode) and [`decode`](crate::decode).
#[derive(Debug, Error)]
pub enum CodecError {
    /// The source map could not be serialized to JSON.
    #[error("failed to serialize source map: {0}")]
    SerializeMap(#[source] serde_json::Error),

    /// The token does not follow the length-prefixed framing.
    #[error("malformed token: {0}")]
    MalformedToken(#[from] MalformedToken),
}

/// Reasons a token can fail to decode.
#[derive(Debug, Error)]
pub enum MalformedToken {
    #[error("token is not valid base64: {0}")]
    InvalidBase64(#[from] base64::DecodeError),

    /// No NUL byte terminates the length prefix of this frame.
    #[error("{frame} frame has no NUL-terminated length prefix")]
    MissingLengthPrefix { frame: Frame },

    /// The bytes before the NUL are empty or not ASCII digits.
    #[error("{frame} frame length prefix {prefix:?} is not a decimal number")]
    InvalidLength { frame: Frame, prefix: String },

    /// The declared length runs past the end of the token.
    #[error("{frame} frame declares {declared} bytes but only {remaining} remain")]
    LengthOutOfBounds {
        frame: Frame,
        declared: usize,
        remaining: usize,
    },

    #[error("{frame} frame is not valid UTF-8")]
    InvalidUtf8 { frame: Frame },

    #[error("map frame is not valid JSON: {0}")]
    InvalidMapJson(#[source] serde_json::Error),
}

impl miette::Diagnostic for CodecError {
    fn code(&self) -> Option<Box<dyn fmt::Display + '_>> {
        Some(Box::new(match self {
            CodecError::SerializeMap(_) => "SERIALIZE_MAP",
            CodecError::MalformedToken(_) => "MALFORMED_TOKEN",
        }))
    }

    fn severity(&self) -> Option<miette::Severity> {
        Some(miette::Severity::Error)
    }

    fn help(&self) -> Option<Box<dyn fmt::Display + '_>> {
        match self {
            CodecError::SerializeMap(_) => Some(Box::new(
                "The transform returned a source map that cannot be represented as JSON.",
            )),
            CodecError::MalformedToken(MalformedToken::InvalidBase64(_)) => Some(Box::new(
                "Tokens are standard base64. Make sure the whole URL fragment was copied.",
            )),
            CodecError::MalformedToken(_) => Some(Box::new(
                "The token may be truncated. Re-open the link from the generated report.",
            )),
        }
    }
}
