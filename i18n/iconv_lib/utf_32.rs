//
// Copyright (c) 2024 Jeff Garzik
//
// This file is part of the posixutils-rs project covered under
// the MIT License.  For the full license text, please see the LICENSE
// file in the root directory of this project.
// SPDX-License-Identifier: MIT
//

use byteorder::{BigEndian, ByteOrder, LittleEndian};

use super::{IconvError, OutputBuffer};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UTF32Variant {
    UTF32LE,
    UTF32BE,
    UTF32,
}

const BOM: u32 = 0x0000FEFF;
const BOM_OE: u32 = 0xFFFE0000;

fn native() -> UTF32Variant {
    if cfg!(target_endian = "little") {
        UTF32Variant::UTF32LE
    } else {
        UTF32Variant::UTF32BE
    }
}

pub fn to_ucs4(input: &[u8], variant: UTF32Variant) -> Result<Vec<u32>, IconvError> {
    let (variant, start_index) = match variant {
        UTF32Variant::UTF32 if input.len() >= 4 => match BigEndian::read_u32(&input[0..4]) {
            BOM => (UTF32Variant::UTF32BE, 4),
            BOM_OE => (UTF32Variant::UTF32LE, 4),
            _ => (native(), 0),
        },
        UTF32Variant::UTF32 => (native(), 0),
        other => (other, 0),
    };

    let mut ucs4: Vec<u32> = Vec::with_capacity(input.len() / 4);
    let mut index = start_index;

    while index < input.len() {
        if index + 4 > input.len() {
            return Err(IconvError::Incomplete(index));
        }
        let code_point = match variant {
            UTF32Variant::UTF32LE => LittleEndian::read_u32(&input[index..index + 4]),
            _ => BigEndian::read_u32(&input[index..index + 4]),
        };

        if code_point >= 0x110000 || (0xD800..=0xDFFF).contains(&code_point) {
            return Err(IconvError::InvalidSequence(index));
        }
        ucs4.push(code_point);
        index += 4;
    }

    Ok(ucs4)
}

pub fn from_ucs4(
    input: &[u32],
    out: &mut OutputBuffer,
    variant: UTF32Variant,
) -> Result<(), IconvError> {
    let (variant, include_bom) = match variant {
        UTF32Variant::UTF32 => (native(), true),
        other => (other, false),
    };

    if include_bom && !input.is_empty() {
        write_u32(out, BOM, variant)?;
    }

    for &code_point in input {
        if code_point > 0x10FFFF || (0xD800..=0xDFFF).contains(&code_point) {
            return Err(IconvError::Unrepresentable(code_point));
        }
        write_u32(out, code_point, variant)?;
    }

    Ok(())
}

fn write_u32(out: &mut OutputBuffer, value: u32, variant: UTF32Variant) -> Result<(), IconvError> {
    let mut temp = [0u8; 4];
    match variant {
        UTF32Variant::UTF32LE => LittleEndian::write_u32(&mut temp, value),
        _ => BigEndian::write_u32(&mut temp, value),
    }
    out.write(&temp)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_with_bom() {
        assert_eq!(
            to_ucs4(b"\x00\x00\xfe\xff\x00\x00\x00A", UTF32Variant::UTF32),
            Ok(vec![0x41])
        );
        assert_eq!(
            to_ucs4(b"\xff\xfe\x00\x00A\x00\x00\x00", UTF32Variant::UTF32),
            Ok(vec![0x41])
        );
    }

    #[test]
    fn test_decode_errors() {
        assert_eq!(
            to_ucs4(b"A\x00\x00\x00B\x00", UTF32Variant::UTF32LE),
            Err(IconvError::Incomplete(4))
        );
        assert_eq!(
            to_ucs4(b"\x00\x11\x00\x00", UTF32Variant::UTF32BE),
            Err(IconvError::InvalidSequence(0))
        );
    }

    #[test]
    fn test_encode_le() {
        let mut out = OutputBuffer::with_size(8);
        from_ucs4(&[0xE9, 0x1F600], &mut out, UTF32Variant::UTF32LE).unwrap();
        assert_eq!(out.into_bytes(), b"\xe9\x00\x00\x00\x00\xf6\x01\x00");
    }
}
