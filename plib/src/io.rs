//
// Copyright (c) 2024 Jeff Garzik
//
// This file is part of the posixutils-rs project covered under
// the MIT License.  For the full license text, please see the LICENSE
// file in the root directory of this project.
// SPDX-License-Identifier: MIT
//

use std::fs;
use std::io::{self, Read};
use std::path::Path;

/// Open `pathname` for reading.
///
/// With `dashed_stdin`, the name `-` means standard input; otherwise an
/// empty path does.
pub fn input_stream(pathname: &Path, dashed_stdin: bool) -> io::Result<Box<dyn Read>> {
    let path_str = pathname.as_os_str();
    let is_stdin = if dashed_stdin {
        path_str == "-"
    } else {
        path_str.is_empty()
    };

    if is_stdin {
        Ok(Box::new(io::stdin().lock()))
    } else {
        Ok(Box::new(fs::File::open(pathname)?))
    }
}
