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
pub enum UTF16Variant {
    UTF16LE,
    UTF16BE,
    UTF16,
}

const BOM: u16 = 0xFEFF;
const BOM_SWAPPED: u16 = 0xFFFE;

fn native() -> UTF16Variant {
    if cfg!(target_endian = "little") {
        UTF16Variant::UTF16LE
    } else {
        UTF16Variant::UTF16BE
    }
}

fn read_unit(bytes: &[u8], variant: UTF16Variant) -> u16 {
    match variant {
        UTF16Variant::UTF16LE => LittleEndian::read_u16(bytes),
        _ => BigEndian::read_u16(bytes),
    }
}

// Convert UTF-16 to UCS-4
pub fn to_ucs4(input: &[u8], variant: UTF16Variant) -> Result<Vec<u32>, IconvError> {
    let mut index = 0;

    let variant = match variant {
        UTF16Variant::UTF16 if input.len() >= 2 => match BigEndian::read_u16(&input[0..2]) {
            BOM => {
                index = 2;
                UTF16Variant::UTF16BE
            }
            BOM_SWAPPED => {
                index = 2;
                UTF16Variant::UTF16LE
            }
            _ => native(),
        },
        UTF16Variant::UTF16 => native(),
        other => other,
    };

    let mut ucs4 = Vec::with_capacity(input.len() / 2);

    while index < input.len() {
        if index + 2 > input.len() {
            return Err(IconvError::Incomplete(index));
        }
        let code_unit = read_unit(&input[index..index + 2], variant);

        // Surrogate pair
        if (0xD800..=0xDBFF).contains(&code_unit) {
            if index + 4 > input.len() {
                return Err(IconvError::Incomplete(index));
            }
            let low_surrogate = read_unit(&input[index + 2..index + 4], variant);
            if !(0xDC00..=0xDFFF).contains(&low_surrogate) {
                return Err(IconvError::InvalidSequence(index));
            }

            let high = u32::from(code_unit - 0xD800);
            let low = u32::from(low_surrogate - 0xDC00);
            ucs4.push((high << 10) + low + 0x10000);
            index += 4;

        // Unpaired low surrogate
        } else if (0xDC00..=0xDFFF).contains(&code_unit) {
            return Err(IconvError::InvalidSequence(index));
        } else {
            ucs4.push(u32::from(code_unit));
            index += 2;
        }
    }

    Ok(ucs4)
}

/// Convert UCS-4 to UTF-16
pub fn from_ucs4(
    input: &[u32],
    out: &mut OutputBuffer,
    variant: UTF16Variant,
) -> Result<(), IconvError> {
    let (variant, include_bom) = match variant {
        UTF16Variant::UTF16 => (native(), true),
        other => (other, false),
    };

    if include_bom && !input.is_empty() {
        write_unit(out, BOM, variant)?;
    }

    for &code_point in input {
        if code_point <= 0xD7FF || (0xE000..=0xFFFF).contains(&code_point) {
            write_unit(out, code_point as u16, variant)?;
        } else if (0x10000..=0x10FFFF).contains(&code_point) {
            let code_point = code_point - 0x10000;
            write_unit(out, ((code_point >> 10) as u16) + 0xD800, variant)?;
            write_unit(out, ((code_point & 0x3FF) as u16) + 0xDC00, variant)?;
        } else {
            // isolated surrogate or out of range
            return Err(IconvError::Unrepresentable(code_point));
        }
    }

    Ok(())
}

#[inline]
fn write_unit(out: &mut OutputBuffer, unit: u16, variant: UTF16Variant) -> Result<(), IconvError> {
    let mut temp = [0u8; 2];
    match variant {
        UTF16Variant::UTF16LE => LittleEndian::write_u16(&mut temp, unit),
        _ => BigEndian::write_u16(&mut temp, unit),
    }
    out.write(&temp)
}
