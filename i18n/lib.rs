//
// Copyright (c) 2026 Jeff Garzik
//
// This file is part of the posixutils-rs project covered under
// the MIT License.  For the full license text, please see the LICENSE
// file in the root directory of this project.
// SPDX-License-Identifier: MIT
//

//! posixutils-po library
//!
//! Reading gettext .po catalogs into a translation dictionary:
//! - gettext_lib: .po tokenizer, entry parser and message catalog
//! - iconv_lib: charset conversion of translated text

pub mod gettext_lib;
pub mod iconv_lib;
