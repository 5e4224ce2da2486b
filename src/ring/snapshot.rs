//! Snapshot decoding
//!
//! A snapshot is `N` colours as six hex digits each, concatenated with no
//! delimiter. Some backends wrap the string as a JSON string literal, so the
//! body arrives with surrounding quotes. Decoding is all-or-nothing: a
//! malformed body is rejected and never partially applied.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use super::color::Rgb;
use crate::consts::HEX_PER_SLOT;
use crate::error::SnapshotError;

/// How the snapshot string is framed in the response body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WireFormat {
    /// Bare hex digits
    Raw,
    /// A JSON string literal containing the hex digits
    JsonString,
    /// JSON string if the body starts with a quote, bare otherwise
    #[default]
    Auto,
}

/// One decoded full-ring colour set, in index order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    colors: Vec<Rgb>,
}

impl Snapshot {
    pub fn colors(&self) -> &[Rgb] {
        &self.colors
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Rgb> {
        self.colors.get(index).copied()
    }
}

/// Decoder for a ring of fixed size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnapshotCodec {
    count: usize,
    format: WireFormat,
}

impl SnapshotCodec {
    pub fn new(count: usize, format: WireFormat) -> Self {
        Self { count, format }
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// Exact payload length a valid snapshot must have
    pub fn expected_len(&self) -> usize {
        self.count * HEX_PER_SLOT
    }

    pub fn decode(&self, body: &str) -> Result<Snapshot, SnapshotError> {
        let payload = self.unwrap_payload(body)?;
        let expected = self.expected_len();
        if payload.len() != expected {
            return Err(SnapshotError::WrongLength {
                expected,
                actual: payload.len(),
                slots: self.count,
            });
        }

        let colors = payload
            .as_bytes()
            .chunks_exact(HEX_PER_SLOT)
            .enumerate()
            .map(|(slot, chunk)| {
                std::str::from_utf8(chunk)
                    .ok()
                    .and_then(Rgb::from_hex)
                    .ok_or(SnapshotError::InvalidHex { slot })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Snapshot { colors })
    }

    fn unwrap_payload<'a>(&self, body: &'a str) -> Result<Cow<'a, str>, SnapshotError> {
        let body = body.trim();
        let quoted = match self.format {
            WireFormat::Raw => false,
            WireFormat::JsonString => true,
            WireFormat::Auto => body.starts_with('"'),
        };
        if !quoted {
            return Ok(Cow::Borrowed(body));
        }
        serde_json::from_str::<String>(body)
            .map(Cow::Owned)
            .map_err(|e| SnapshotError::Json(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FOUR: &str = "ff000000ff000000ffffffff";

    #[test]
    fn test_decode_in_index_order() {
        let codec = SnapshotCodec::new(4, WireFormat::Raw);
        let snap = codec.decode(FOUR).unwrap();
        assert_eq!(
            snap.colors(),
            &[
                Rgb::new(255, 0, 0),
                Rgb::new(0, 255, 0),
                Rgb::new(0, 0, 255),
                Rgb::WHITE
            ]
        );
    }

    #[test]
    fn test_auto_unwraps_json_string() {
        let codec = SnapshotCodec::new(4, WireFormat::Auto);
        let quoted = format!("\"{FOUR}\"");
        assert_eq!(codec.decode(&quoted).unwrap(), codec.decode(FOUR).unwrap());
    }

    #[test]
    fn test_raw_keeps_quotes_and_fails_length() {
        let codec = SnapshotCodec::new(4, WireFormat::Raw);
        let quoted = format!("\"{FOUR}\"");
        assert_eq!(
            codec.decode(&quoted),
            Err(SnapshotError::WrongLength {
                expected: 24,
                actual: 26,
                slots: 4
            })
        );
    }

    #[test]
    fn test_json_format_requires_json() {
        let codec = SnapshotCodec::new(4, WireFormat::JsonString);
        assert!(matches!(codec.decode(FOUR), Err(SnapshotError::Json(_))));
    }

    #[test]
    fn test_wrong_length_rejected() {
        let codec = SnapshotCodec::new(4, WireFormat::Auto);
        assert!(matches!(
            codec.decode(&FOUR[..23]),
            Err(SnapshotError::WrongLength { actual: 23, .. })
        ));
        assert!(matches!(
            codec.decode(""),
            Err(SnapshotError::WrongLength { actual: 0, .. })
        ));
    }

    #[test]
    fn test_invalid_hex_names_slot() {
        let codec = SnapshotCodec::new(4, WireFormat::Raw);
        let body = "ff000000ff00zz00ffffffff";
        assert_eq!(codec.decode(body), Err(SnapshotError::InvalidHex { slot: 2 }));
    }

    #[test]
    fn test_multibyte_body_rejected_without_panic() {
        let codec = SnapshotCodec::new(1, WireFormat::Raw);
        assert_eq!(codec.decode("ffé00"), Err(SnapshotError::InvalidHex { slot: 0 }));
    }

    #[test]
    fn test_trailing_newline_tolerated() {
        let codec = SnapshotCodec::new(4, WireFormat::Auto);
        assert_eq!(codec.decode(&format!("{FOUR}\n")).unwrap().len(), 4);
    }
}
