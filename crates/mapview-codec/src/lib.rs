//! # mapview-codec
//!
//! Packs a transform result (code plus source map) into a single token that
//! <https://evanw.github.io/source-map-visualization> accepts as its URL
//! fragment, and unpacks such tokens again.
//!
//! ## Wire format
//!
//! ```text
//! base64( len(code) NUL code  len(map) NUL map )
//! ```
//!
//! Lengths are ASCII decimal byte counts, payloads are UTF-8 and the map is
//! compact JSON. The explicit length prefix lets either payload contain NUL
//! bytes, unicode or base64 characters without corrupting the framing.
//!
//! ## Example
//!
//! ```
//! use serde_json::json;
//!
//! let map = json!({ "version": 3, "sources": ["a.js"], "mappings": "AAAA" });
//! let token = mapview_codec::encode("const x = 1;", &map)?;
//!
//! let decoded = mapview_codec::decode(&token)?;
//! assert_eq!(decoded.code, "const x = 1;");
//! assert_eq!(decoded.map["sources"][0], "a.js");
//! # Ok::<(), mapview_codec::CodecError>(())
//! ```

mod error;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub use error::{CodecError, Frame, MalformedToken, Result};

/// Base URL of the external visualizer. Tokens go after a `#`.
pub const VISUALIZER_URL: &str = "https://evanw.github.io/source-map-visualization";

const LENGTH_TERMINATOR: u8 = 0;

/// A decoded token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecodedFrame {
    pub code: String,
    pub map: Value,
}

impl DecodedFrame {
    /// Map rendered with two-space indentation, as shown by the JSON view.
    pub fn pretty_map(&self) -> String {
        // Serializing a `Value` cannot fail.
        serde_json::to_string_pretty(&self.map).unwrap_or_else(|_| self.map.to_string())
    }
}

/// Encode `code` and `map` into a token.
///
/// `map` is anything serde can turn into JSON. Pass `&None::<Value>` (or
/// `&Value::Null`) when the transform produced no map; it is framed as `null`.
///
/// The token is a pure function of its inputs.
pub fn encode<M>(code: &str, map: &M) -> Result<String>
where
    M: Serialize + ?Sized,
{
    let map = serde_json::to_string(map).map_err(CodecError::SerializeMap)?;

    let mut framed = Vec::with_capacity(code.len() + map.len() + 2 * 21);
    write_frame(&mut framed, code.as_bytes());
    write_frame(&mut framed, map.as_bytes());

    Ok(STANDARD.encode(framed))
}

/// Build the external visualizer link for a token.
pub fn visualizer_link(token: &str) -> String {
    format!("{VISUALIZER_URL}#{token}")
}

/// Decode a token produced by [`encode`].
///
/// Fails with [`CodecError::MalformedToken`] when a length prefix is missing,
/// is not a decimal number, or declares more bytes than remain. Anything
/// after the map frame is ignored.
pub fn decode(token: &str) -> Result<DecodedFrame> {
    let bytes = STANDARD
        .decode(token)
        .map_err(MalformedToken::InvalidBase64)?;

    let mut reader = FrameReader::new(&bytes);
    let code = reader.next_frame(Frame::Code)?;
    let map = reader.next_frame(Frame::Map)?;

    let code = std::str::from_utf8(code)
        .map_err(|_| MalformedToken::InvalidUtf8 { frame: Frame::Code })?
        .to_owned();
    let map = std::str::from_utf8(map).map_err(|_| MalformedToken::InvalidUtf8 { frame: Frame::Map })?;
    let map = serde_json::from_str(map).map_err(MalformedToken::InvalidMapJson)?;

    Ok(DecodedFrame { code, map })
}

fn write_frame(buf: &mut Vec<u8>, payload: &[u8]) {
    buf.extend_from_slice(payload.len().to_string().as_bytes());
    buf.push(LENGTH_TERMINATOR);
    buf.extend_from_slice(payload);
}

struct FrameReader<'a> {
    bytes: &'a [u8],
    offset: usize,
}

impl<'a> FrameReader<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, offset: 0 }
    }

    fn next_frame(&mut self, frame: Frame) -> std::result::Result<&'a [u8], MalformedToken> {
        let rest = &self.bytes[self.offset..];

        let terminator = rest
            .iter()
            .position(|byte| *byte == LENGTH_TERMINATOR)
            .ok_or(MalformedToken::MissingLengthPrefix { frame })?;

        let prefix = &rest[..terminator];
        let declared = parse_length(prefix).ok_or_else(|| MalformedToken::InvalidLength {
            frame,
            prefix: String::from_utf8_lossy(&prefix[..prefix.len().min(32)]).into_owned(),
        })?;

        let start = terminator + 1;
        let remaining = rest.len() - start;
        if declared > remaining {
            return Err(MalformedToken::LengthOutOfBounds {
                frame,
                declared,
                remaining,
            });
        }

        self.offset += start + declared;
        Ok(&rest[start..start + declared])
    }
}

fn parse_length(prefix: &[u8]) -> Option<usize> {
    if prefix.is_empty() || !prefix.iter().all(u8::is_ascii_digit) {
        return None;
    }
    // Digits only, so this is ASCII; parse rejects overflow.
    std::str::from_utf8(prefix).ok()?.parse().ok()
}
