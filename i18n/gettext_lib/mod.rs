//
// Copyright (c) 2026 Jeff Garzik
//
// This file is part of the posixutils-rs project covered under
// the MIT License.  For the full license text, please see the LICENSE
// file in the root directory of this project.
// SPDX-License-Identifier: MIT
//

//! gettext catalog reading
//!
//! `po_file` splits a .po stream into tokens, `po_reader` assembles them
//! into entries and hands converted translations to a `catalog::Dictionary`.

pub mod catalog;
pub mod po_file;
pub mod po_reader;
