//
// Copyright (c) 2024 Jeff Garzik
//
// This file is part of the posixutils-rs project covered under
// the MIT License.  For the full license text, please see the LICENSE
// file in the root directory of this project.
// SPDX-License-Identifier: MIT
//

//! Codeset conversion
//!
//! Every conversion pivots through UCS-4: the source codeset is decoded
//! into code points with its `to_ucs4`, then the target codeset encodes
//! them with its `from_ucs4` into a bounded output buffer.

use std::str::FromStr;

use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};

pub mod ascii;
pub mod iso_8859_1;
pub mod utf_16;
pub mod utf_32;
pub mod utf_8;

use utf_16::UTF16Variant;
use utf_32::UTF32Variant;

/// Growth factor of the output buffer relative to the input length.
/// Four bytes per input byte covers a single-byte codeset widened to UCS-4.
pub const OUTPUT_FACTOR: usize = 4;

/// Failure of a single decode or encode step
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum IconvError {
    #[error("invalid byte 0x{byte:02X} at offset {offset}")]
    InvalidByte { offset: usize, byte: u8 },
    #[error("incomplete multibyte sequence at offset {0}")]
    Incomplete(usize),
    #[error("invalid multibyte sequence at offset {0}")]
    InvalidSequence(usize),
    #[error("code point U+{0:04X} cannot be represented in the target codeset")]
    Unrepresentable(u32),
    #[error("output buffer of {0} bytes is too small")]
    BufferFull(usize),
}

/// Failure to convert text between two named charsets
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ConversionError {
    #[error("unsupported conversion: {from} => {to}")]
    Unsupported { from: String, to: String },
    #[error(
        "error while converting ({from} -> {to}) text \"{}\": {source}",
        String::from_utf8_lossy(.text)
    )]
    Invalid {
        text: Vec<u8>,
        from: String,
        to: String,
        #[source]
        source: IconvError,
    },
}

#[allow(non_camel_case_types, clippy::upper_case_acronyms)]
#[derive(EnumString, EnumIter, Display, Debug, Clone, Copy, PartialEq, Eq)]
#[strum(ascii_case_insensitive)]
pub enum Encodings {
    #[strum(
        to_string = "ASCII",
        serialize = "US-ASCII",
        serialize = "ANSI_X3.4-1968"
    )]
    ASCII,
    #[strum(
        to_string = "ISO-8859-1",
        serialize = "ISO8859-1",
        serialize = "ISO_8859-1",
        serialize = "LATIN1",
        serialize = "L1"
    )]
    ISO_8859_1,
    #[strum(to_string = "UTF-8", serialize = "UTF8")]
    UTF_8,
    #[strum(to_string = "UTF-16")]
    UTF_16,
    #[strum(to_string = "UTF-16LE")]
    UTF_16LE,
    #[strum(to_string = "UTF-16BE")]
    UTF_16BE,
    #[strum(to_string = "UTF-32")]
    UTF_32,
    #[strum(to_string = "UTF-32LE")]
    UTF_32LE,
    #[strum(to_string = "UTF-32BE")]
    UTF_32BE,
}

impl Encodings {
    /// Look up a charset by name, ignoring ASCII case and surrounding quotes.
    pub fn parse(name: &str) -> Option<Self> {
        Encodings::from_str(name.trim().trim_matches('"')).ok()
    }

    fn decode(self, input: &[u8]) -> Result<Vec<u32>, IconvError> {
        match self {
            Encodings::ASCII => ascii::to_ucs4(input),
            Encodings::ISO_8859_1 => iso_8859_1::to_ucs4(input),
            Encodings::UTF_8 => utf_8::to_ucs4(input),
            Encodings::UTF_16 => utf_16::to_ucs4(input, UTF16Variant::UTF16),
            Encodings::UTF_16LE => utf_16::to_ucs4(input, UTF16Variant::UTF16LE),
            Encodings::UTF_16BE => utf_16::to_ucs4(input, UTF16Variant::UTF16BE),
            Encodings::UTF_32 => utf_32::to_ucs4(input, UTF32Variant::UTF32),
            Encodings::UTF_32LE => utf_32::to_ucs4(input, UTF32Variant::UTF32LE),
            Encodings::UTF_32BE => utf_32::to_ucs4(input, UTF32Variant::UTF32BE),
        }
    }

    fn encode(self, input: &[u32], out: &mut OutputBuffer) -> Result<(), IconvError> {
        match self {
            Encodings::ASCII => ascii::from_ucs4(input, out),
            Encodings::ISO_8859_1 => iso_8859_1::from_ucs4(input, out),
            Encodings::UTF_8 => utf_8::from_ucs4(input, out),
            Encodings::UTF_16 => utf_16::from_ucs4(input, out, UTF16Variant::UTF16),
            Encodings::UTF_16LE => utf_16::from_ucs4(input, out, UTF16Variant::UTF16LE),
            Encodings::UTF_16BE => utf_16::from_ucs4(input, out, UTF16Variant::UTF16BE),
            Encodings::UTF_32 => utf_32::from_ucs4(input, out, UTF32Variant::UTF32),
            Encodings::UTF_32LE => utf_32::from_ucs4(input, out, UTF32Variant::UTF32LE),
            Encodings::UTF_32BE => utf_32::from_ucs4(input, out, UTF32Variant::UTF32BE),
        }
    }
}

/// Names of every supported charset, canonical spelling first.
pub fn list_encodings() -> Vec<String> {
    Encodings::iter().map(|e| e.to_string()).collect()
}

/// Fixed-size output area for one conversion.
///
/// The buffer is allocated up front and never grows; writing past its end
/// fails with [`IconvError::BufferFull`]. [`OutputBuffer::into_bytes`]
/// trims the unused tail.
#[derive(Debug)]
pub struct OutputBuffer {
    buffer: Vec<u8>,
    written: usize,
}

impl OutputBuffer {
    pub fn with_size(size: usize) -> Self {
        OutputBuffer {
            buffer: vec![0; size],
            written: 0,
        }
    }

    pub fn write(&mut self, bytes: &[u8]) -> Result<(), IconvError> {
        let end = self.written + bytes.len();
        if end > self.buffer.len() {
            return Err(IconvError::BufferFull(self.buffer.len()));
        }
        self.buffer[self.written..end].copy_from_slice(bytes);
        self.written = end;
        Ok(())
    }

    pub fn into_bytes(mut self) -> Vec<u8> {
        self.buffer.truncate(self.written);
        self.buffer
    }
}

/// Conversion context for one (from, to) charset pair
#[derive(Debug)]
pub struct Iconv {
    from_name: String,
    to_name: String,
    from: Encodings,
    to: Encodings,
}

impl Iconv {
    pub fn open(from_charset: &str, to_charset: &str) -> Result<Self, ConversionError> {
        match (Encodings::parse(from_charset), Encodings::parse(to_charset)) {
            (Some(from), Some(to)) => Ok(Iconv {
                from_name: from_charset.to_string(),
                to_name: to_charset.to_string(),
                from,
                to,
            }),
            _ => Err(ConversionError::Unsupported {
                from: from_charset.to_string(),
                to: to_charset.to_string(),
            }),
        }
    }

    fn is_pair(&self, from_charset: &str, to_charset: &str) -> bool {
        self.from_name == from_charset && self.to_name == to_charset
    }

    /// Convert `input` into a freshly allocated buffer of
    /// `OUTPUT_FACTOR * input.len()` bytes.
    pub fn convert(&self, input: &[u8]) -> Result<Vec<u8>, IconvError> {
        let ucs4 = self.from.decode(input)?;
        let mut out = OutputBuffer::with_size(OUTPUT_FACTOR * input.len());
        self.to.encode(&ucs4, &mut out)?;
        Ok(out.into_bytes())
    }

    fn convert_text(&self, text: &[u8]) -> Result<Vec<u8>, ConversionError> {
        self.convert(text).map_err(|source| ConversionError::Invalid {
            text: text.to_vec(),
            from: self.from_name.clone(),
            to: self.to_name.clone(),
            source,
        })
    }
}

/// Convert `text` from `from_charset` to `to_charset` with a one-off
/// [`IconvConverter`].
pub fn convert(
    text: &[u8],
    from_charset: &str,
    to_charset: &str,
) -> Result<Vec<u8>, ConversionError> {
    IconvConverter::new().convert(text, from_charset, to_charset)
}

/// Pluggable charset conversion backend
pub trait CharsetConverter {
    fn convert(
        &mut self,
        text: &[u8],
        from_charset: &str,
        to_charset: &str,
    ) -> Result<Vec<u8>, ConversionError>;
}

impl<C: CharsetConverter + ?Sized> CharsetConverter for &mut C {
    fn convert(
        &mut self,
        text: &[u8],
        from_charset: &str,
        to_charset: &str,
    ) -> Result<Vec<u8>, ConversionError> {
        (**self).convert(text, from_charset, to_charset)
    }
}

/// Converter backed by [`Iconv`], keeping the context of the last pair
/// it was asked for.
#[derive(Debug, Default)]
pub struct IconvConverter {
    context: Option<Iconv>,
}

impl IconvConverter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CharsetConverter for IconvConverter {
    fn convert(
        &mut self,
        text: &[u8],
        from_charset: &str,
        to_charset: &str,
    ) -> Result<Vec<u8>, ConversionError> {
        // identical names short-circuit: the text is returned unchanged
        // and no context is opened
        if from_charset == to_charset {
            return Ok(text.to_vec());
        }

        let cd = match self.context.take() {
            Some(cd) if cd.is_pair(from_charset, to_charset) => cd,
            _ => Iconv::open(from_charset, to_charset)?,
        };
        let result = cd.convert_text(text);
        self.context = Some(cd);
        result
    }
}
