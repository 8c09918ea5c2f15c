//
// Copyright (c) 2024 Jeff Garzik
//
// This file is part of the posixutils-rs project covered under
// the MIT License.  For the full license text, please see the LICENSE
// file in the root directory of this project.
// SPDX-License-Identifier: MIT
//

use super::{IconvError, OutputBuffer};

// Convert ASCII to UCS-4
pub fn to_ucs4(input: &[u8]) -> Result<Vec<u32>, IconvError> {
    input
        .iter()
        .enumerate()
        .map(|(offset, &byte)| {
            if byte <= 127 {
                Ok(byte as u32)
            } else {
                Err(IconvError::InvalidByte { offset, byte })
            }
        })
        .collect()
}

pub fn from_ucs4(input: &[u32], out: &mut OutputBuffer) -> Result<(), IconvError> {
    for &code_point in input {
        if code_point > 127 {
            return Err(IconvError::Unrepresentable(code_point));
        }
        out.write(&[code_point as u8])?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_high_bit_rejected() {
        assert_eq!(to_ucs4(b"ok"), Ok(vec![0x6F, 0x6B]));
        assert_eq!(
            to_ucs4(b"a\x80"),
            Err(IconvError::InvalidByte {
                offset: 1,
                byte: 0x80
            })
        );
    }
}
