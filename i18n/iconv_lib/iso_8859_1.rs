//
// Copyright (c) 2024 Jeff Garzik
//
// This file is part of the posixutils-rs project covered under
// the MIT License.  For the full license text, please see the LICENSE
// file in the root directory of this project.
// SPDX-License-Identifier: MIT
//

//! ISO-8859-1 maps every byte to the code point of the same value.

use super::{IconvError, OutputBuffer};

pub fn to_ucs4(input: &[u8]) -> Result<Vec<u32>, IconvError> {
    Ok(input.iter().map(|&byte| byte as u32).collect())
}

pub fn from_ucs4(input: &[u32], out: &mut OutputBuffer) -> Result<(), IconvError> {
    for &code_point in input {
        if code_point > 0xFF {
            return Err(IconvError::Unrepresentable(code_point));
        }
        out.write(&[code_point as u8])?;
    }
    Ok(())
}
