//
// Copyright (c) 2024 Jeff Garzik
//
// This file is part of the posixutils-rs project covered under
// the MIT License.  For the full license text, please see the LICENSE
// file in the root directory of this project.
// SPDX-License-Identifier: MIT
//

//! Helpers shared by the workspace binaries and their integration tests

pub mod io;
pub mod testing;

pub use testing::*;
