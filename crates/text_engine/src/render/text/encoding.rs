//! Character encodings and atlas alphabets
//!
//! An atlas covers exactly the characters its encoding can represent. The
//! candidate range is every UTF-16 code unit value from `U+0000` up to but
//! not including `U+FFFF`; surrogate code units (`U+D800..=U+DFFF`) are
//! skipped because they are not characters on their own.

use encoding_rs::{EncoderResult, Encoding, UTF_16BE, UTF_16LE};

use super::error::{FontError, FontResult};

/// Exclusive upper bound of the enumerated code point range
pub const CODE_POINT_LIMIT: u32 = 0xFFFF;

/// A character-to-byte mapping, reduced to the question the atlas asks of it
pub trait CharacterEncoding {
    /// Canonical encoding name
    fn name(&self) -> &str;

    /// Whether `ch` has a byte representation in this encoding
    fn can_encode(&self, ch: char) -> bool;
}

/// Labels naming 7-bit US-ASCII
const ASCII_LABELS: &[&str] = &[
    "us-ascii", "ascii", "ansi_x3.4-1968", "iso646-us", "iso-ir-6", "cp367", "ibm367", "csascii", "us", "646",
];

/// Labels naming ISO-8859-1 proper (U+0000..=U+00FF)
const LATIN1_LABELS: &[&str] = &[
    "iso-8859-1", "iso8859-1", "iso88591", "iso_8859-1", "iso_8859-1:1987", "iso-ir-100", "latin1", "l1",
    "cp819", "ibm819", "csisolatin1",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Repertoire {
    /// Encoder-backed encoding from `encoding_rs`
    Registry(&'static Encoding),
    /// Charset whose repertoire is exactly `U+0000..=max`
    Prefix { name: &'static str, max: char },
}

/// Encoding resolved by [`EncodingRegistry`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegisteredEncoding(Repertoire);

impl RegisteredEncoding {
    /// Underlying `encoding_rs` encoding, if the charset is encoder-backed
    pub fn encoding(&self) -> Option<&'static Encoding> {
        match self.0 {
            Repertoire::Registry(encoding) => Some(encoding),
            Repertoire::Prefix { .. } => None,
        }
    }
}

impl CharacterEncoding for RegisteredEncoding {
    fn name(&self) -> &str {
        match self.0 {
            Repertoire::Registry(encoding) => encoding.name(),
            Repertoire::Prefix { name, .. } => name,
        }
    }

    fn can_encode(&self, ch: char) -> bool {
        let encoding = match self.0 {
            Repertoire::Registry(encoding) => encoding,
            Repertoire::Prefix { max, .. } => return ch <= max,
        };
        let mut utf8 = [0u8; 4];
        let src = ch.encode_utf8(&mut utf8);
        // Stateful encoders (ISO-2022-JP) may add escape sequences around the character
        let mut dst = [0u8; 16];
        let mut encoder = encoding.new_encoder();
        let (result, _, _) = encoder.encode_from_utf8_without_replacement(src, &mut dst, true);
        matches!(result, EncoderResult::InputEmpty)
    }
}

/// Resolves encoding labels
///
/// `US-ASCII` and `ISO-8859-1` (and their aliases) resolve to their own
/// repertoires. Every other label follows the WHATWG Encoding Standard and
/// matches case-insensitively, so `"UTF-8"`, `"utf8"` and
/// `"unicode-1-1-utf-8"` all resolve to UTF-8.
///
/// Labels whose WHATWG encoding has no encoder of its own are rejected:
/// `iso-2022-kr`, `hz-gb-2312` and friends map to the decode-only
/// `replacement` encoding, which would otherwise accept every character.
/// UTF-16 is kept since it represents every scalar value.
pub struct EncodingRegistry;

impl EncodingRegistry {
    /// Resolve a label to an encoding
    pub fn resolve(label: &str) -> FontResult<RegisteredEncoding> {
        let normalized = label.trim().to_ascii_lowercase();
        if ASCII_LABELS.contains(&normalized.as_str()) {
            return Ok(RegisteredEncoding(Repertoire::Prefix { name: "US-ASCII", max: '\u{7F}' }));
        }
        if LATIN1_LABELS.contains(&normalized.as_str()) {
            return Ok(RegisteredEncoding(Repertoire::Prefix { name: "ISO-8859-1", max: '\u{FF}' }));
        }

        let encoding = Encoding::for_label(normalized.as_bytes())
            .ok_or_else(|| FontError::UnsupportedEncoding(label.to_string()))?;
        if encoding.output_encoding() != encoding && encoding != UTF_16BE && encoding != UTF_16LE {
            log::warn!("Encoding label '{}' maps to decode-only {}", label, encoding.name());
            return Err(FontError::UnsupportedEncoding(label.to_string()));
        }
        Ok(RegisteredEncoding(Repertoire::Registry(encoding)))
    }
}

/// Explicit, named set of characters
///
/// Useful for atlases restricted to a handful of glyphs (score digits,
/// debug labels) where a full encoding would waste texture space.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterSet {
    name: String,
    chars: Vec<char>,
}

impl CharacterSet {
    /// Create a set from the characters of `chars`
    pub fn new(name: impl Into<String>, chars: &str) -> Self {
        let mut chars: Vec<char> = chars.chars().collect();
        chars.sort_unstable();
        chars.dedup();
        Self {
            name: name.into(),
            chars,
        }
    }
}

impl CharacterEncoding for CharacterSet {
    fn name(&self) -> &str {
        &self.name
    }

    fn can_encode(&self, ch: char) -> bool {
        self.chars.binary_search(&ch).is_ok()
    }
}

/// Every character in `U+0000..U+FFFF` the encoding can represent, ascending
pub fn representable_chars(encoding: &dyn CharacterEncoding) -> Vec<char> {
    (0..CODE_POINT_LIMIT)
        .filter_map(char::from_u32)
        .filter(|&ch| encoding.can_encode(ch))
        .collect()
}
