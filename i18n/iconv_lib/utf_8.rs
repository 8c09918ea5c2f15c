//
// Copyright (c) 2024 Jeff Garzik
//
// This file is part of the posixutils-rs project covered under
// the MIT License.  For the full license text, please see the LICENSE
// file in the root directory of this project.
// SPDX-License-Identifier: MIT
//

use super::{IconvError, OutputBuffer};

#[inline]
fn is_continuation(byte: u8) -> bool {
    (byte & 0xC0) == 0x80
}

/// Convert UTF-8 to UCS-4
pub fn to_ucs4(input: &[u8]) -> Result<Vec<u32>, IconvError> {
    let mut ucs4 = Vec::with_capacity(input.len());
    let mut index = 0;

    while index < input.len() {
        let byte = input[index];

        let (len, min, initial) = match byte {
            0x00..=0x7F => {
                ucs4.push(byte as u32);
                index += 1;
                continue;
            }
            0xC0..=0xDF => (2, 0x80, byte as u32 & 0x1F),
            0xE0..=0xEF => (3, 0x800, byte as u32 & 0x0F),
            0xF0..=0xF4 => (4, 0x10000, byte as u32 & 0x07),
            _ => {
                return Err(IconvError::InvalidByte {
                    offset: index,
                    byte,
                })
            }
        };

        if index + len > input.len() {
            // a truncated tail is only incomplete if what is there could
            // still become a valid sequence
            if input[index + 1..].iter().all(|&b| is_continuation(b)) {
                return Err(IconvError::Incomplete(index));
            }
            return Err(IconvError::InvalidSequence(index));
        }

        let sequence = &input[index + 1..index + len];
        if !sequence.iter().all(|&b| is_continuation(b)) {
            return Err(IconvError::InvalidSequence(index));
        }

        let code_point = sequence
            .iter()
            .fold(initial, |acc, &b| (acc << 6) | (b as u32 & 0x3F));

        // overlong forms, surrogates and anything past U+10FFFF
        if code_point < min || (0xD800..=0xDFFF).contains(&code_point) || code_point > 0x10FFFF {
            return Err(IconvError::InvalidSequence(index));
        }

        ucs4.push(code_point);
        index += len;
    }

    Ok(ucs4)
}

/// Convert UCS-4 to UTF-8
pub fn from_ucs4(input: &[u32], out: &mut OutputBuffer) -> Result<(), IconvError> {
    for &code_point in input {
        if code_point <= 0x7F {
            out.write(&[code_point as u8])?;
        } else if code_point <= 0x7FF {
            out.write(&[
                0xC0 | ((code_point >> 6) as u8),
                0x80 | ((code_point & 0x3F) as u8),
            ])?;
        } else if code_point <= 0xFFFF {
            if (0xD800..=0xDFFF).contains(&code_point) {
                return Err(IconvError::Unrepresentable(code_point));
            }
            out.write(&[
                0xE0 | ((code_point >> 12) as u8),
                0x80 | (((code_point >> 6) & 0x3F) as u8),
                0x80 | ((code_point & 0x3F) as u8),
            ])?;
        } else if code_point <= 0x10FFFF {
            out.write(&[
                0xF0 | ((code_point >> 18) as u8),
                0x80 | (((code_point >> 12) & 0x3F) as u8),
                0x80 | (((code_point >> 6) & 0x3F) as u8),
                0x80 | ((code_point & 0x3F) as u8),
            ])?;
        } else {
            return Err(IconvError::Unrepresentable(code_point));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_mixed_widths() {
        let text = "aé€😀";
        assert_eq!(
            to_ucs4(text.as_bytes()),
            Ok(vec![0x61, 0xE9, 0x20AC, 0x1F600])
        );
    }

    #[test]
    fn test_decode_errors() {
        assert_eq!(to_ucs4(b"ab\xc3"), Err(IconvError::Incomplete(2)));
        assert_eq!(to_ucs4(b"\xc3("), Err(IconvError::InvalidSequence(0)));
        // overlong '/'
        assert_eq!(to_ucs4(b"\xc0\xaf"), Err(IconvError::InvalidSequence(0)));
        // encoded surrogate
        assert_eq!(
            to_ucs4(b"\xed\xa0\x80"),
            Err(IconvError::InvalidSequence(0))
        );
        assert_eq!(
            to_ucs4(b"x\x80"),
            Err(IconvError::InvalidByte {
                offset: 1,
                byte: 0x80
            })
        );
    }

    #[test]
    fn test_encode_matches_std() {
        let text = "naïve — 😀";
        let ucs4: Vec<u32> = text.chars().map(|c| c as u32).collect();
        let mut out = OutputBuffer::with_size(64);
        from_ucs4(&ucs4, &mut out).unwrap();
        assert_eq!(out.into_bytes(), text.as_bytes());
    }

    #[test]
    fn test_encode_rejects_surrogate() {
        let mut out = OutputBuffer::with_size(8);
        assert_eq!(
            from_ucs4(&[0xD800], &mut out),
            Err(IconvError::Unrepresentable(0xD800))
        );
    }
}
