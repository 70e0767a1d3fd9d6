//! @ai:module:intent Convert byte offsets within a line to host column units
//! @ai:module:layer domain
//! @ai:module:public_api PositionEncoding
//! @ai:module:stateless true

use serde::{Deserialize, Serialize};

/// @ai:intent Unit in which finding columns are counted
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum PositionEncoding {
    /// Bytes of UTF-8
    #[serde(rename = "utf-8")]
    Utf8,
    /// UTF-16 code units, the editor default
    #[default]
    #[serde(rename = "utf-16")]
    Utf16,
    /// Unicode scalar values
    #[serde(rename = "utf-32")]
    Utf32,
}

impl PositionEncoding {
    /// @ai:intent Length of a string slice in this encoding
    /// @ai:example (Utf16, "é") -> 1
    /// @ai:example (Utf8, "é") -> 2
    /// @ai:effects pure
    pub fn len(&self, text: &str) -> usize {
        match self {
            PositionEncoding::Utf8 => text.len(),
            PositionEncoding::Utf16 => text.encode_utf16().count(),
            PositionEncoding::Utf32 => text.chars().count(),
        }
    }

    /// @ai:intent Column of a byte offset within a line
    /// @ai:pre byte_offset lies on a char boundary of line
    /// @ai:effects pure
    pub fn column(&self, line: &str, byte_offset: usize) -> usize {
        self.len(&line[..byte_offset])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_is_identical_in_all_encodings() {
        for enc in [PositionEncoding::Utf8, PositionEncoding::Utf16, PositionEncoding::Utf32] {
            assert_eq!(enc.column("abc TODO", 4), 4);
        }
    }

    #[test]
    fn test_astral_character_counts() {
        let line = "😀 TODO";
        assert_eq!(PositionEncoding::Utf8.column(line, 5), 5);
        assert_eq!(PositionEncoding::Utf16.column(line, 5), 3);
        assert_eq!(PositionEncoding::Utf32.column(line, 5), 2);
    }

    #[test]
    fn test_deserializes_hyphenated_names() {
        #[derive(Deserialize)]
        struct Wrap {
            enc: PositionEncoding,
        }
        let w: Wrap = toml::from_str("enc = \"utf-32\"").unwrap();
        assert_eq!(w.enc, PositionEncoding::Utf32);
    }
}
