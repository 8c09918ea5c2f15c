//
// Copyright (c) 2026 Jeff Garzik
//
// This file is part of the posixutils-rs project covered under
// the MIT License.  For the full license text, please see the LICENSE
// file in the root directory of this project.
// SPDX-License-Identifier: MIT
//

//! .po file reader
//!
//! Drives the [`Tokenizer`] and assembles its tokens into entries:
//!
//! ```text
//! msgid "..."                 singular entry
//! msgstr "..."
//!
//! msgid "..."                 plural entry
//! msgid_plural "..."
//! msgstr[0] "..."
//! msgstr[1] "..."
//! ```
//!
//! Every msgstr is converted from the charset declared in the header entry
//! (`msgid ""`) to the charset of the [`Dictionary`] before it is added.
//! Syntax problems are collected in the [`ReadReport`] and skipped; a
//! conversion failure aborts the read.

use std::collections::BTreeMap;
use std::io::{self, Read};

use crate::gettext_lib::catalog::Dictionary;
use crate::gettext_lib::po_file::{Diagnostic, DiagnosticKind, Token, Tokenizer};
use crate::iconv_lib::{CharsetConverter, ConversionError, IconvConverter};

/// Charset assumed when the header does not name one
pub const DEFAULT_CHARSET: &str = "ISO-8859-1";

const CONTENT_TYPE_PREFIX: &[u8] = b"Content-Type: text/plain; charset=";

/// Fatal error while reading a .po file
#[derive(thiserror::Error, Debug)]
pub enum PoError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("line {line}: {source}")]
    Conversion {
        line: usize,
        #[source]
        source: ConversionError,
    },
}

/// Source and target charset of one .po file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharsetPair {
    pub from_charset: String,
    pub to_charset: String,
}

/// Outcome of a successful read
#[derive(Debug, Clone, Default)]
pub struct ReadReport {
    /// Non-fatal problems, in file order
    pub diagnostics: Vec<Diagnostic>,
    /// Number of singular translations added
    pub translations: usize,
    /// Number of plural translations added
    pub plural_translations: usize,
    /// Charsets resolved from the header entry
    pub charsets: Option<CharsetPair>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    WantMsgid,
    WantMsgidPlural,
    WantMsgstr,
    WantMsgstrPlural,
}

/// Reads .po files into a [`Dictionary`]
pub struct PoReader<D, C = IconvConverter> {
    dict: D,
    converter: C,
    state: State,
    charsets: Option<CharsetPair>,
    current_msgid: Vec<u8>,
    current_msgid_plural: Vec<u8>,
    msgstr_plural: BTreeMap<usize, Vec<u8>>,
    report: ReadReport,
}

impl<D: Dictionary> PoReader<D> {
    pub fn new(dict: D) -> Self {
        Self::with_converter(dict, IconvConverter::new())
    }
}

impl<D: Dictionary, C: CharsetConverter> PoReader<D, C> {
    pub fn with_converter(dict: D, converter: C) -> Self {
        PoReader {
            dict,
            converter,
            state: State::WantMsgid,
            charsets: None,
            current_msgid: Vec::new(),
            current_msgid_plural: Vec::new(),
            msgstr_plural: BTreeMap::new(),
            report: ReadReport::default(),
        }
    }

    /// Read a whole .po file, adding every entry to the dictionary.
    pub fn read<R: Read>(mut self, input: R) -> Result<ReadReport, PoError> {
        let mut tokenizer = Tokenizer::new(input);
        let mut diagnostics = Vec::new();
        let mut last_line = 1;

        while let Some(token) = tokenizer.next_token(&mut diagnostics)? {
            self.report.diagnostics.append(&mut diagnostics);
            if !token.is_eof() {
                last_line = token.line;
            }
            self.add_token(token)?;
        }
        self.report.diagnostics.append(&mut diagnostics);

        if self.charsets.is_none() {
            self.diagnose(last_line, DiagnosticKind::MissingHeader);
        }

        Ok(self.report)
    }

    fn diagnose(&mut self, line: usize, kind: DiagnosticKind) {
        self.report.diagnostics.push(Diagnostic::new(line, kind));
    }

    fn add_token(&mut self, token: Token) -> Result<(), PoError> {
        match self.state {
            State::WantMsgid => {
                if token.keyword == "msgid" {
                    self.current_msgid = token.content;
                    self.state = State::WantMsgidPlural;
                } else if !token.is_eof() {
                    let kind = DiagnosticKind::UnexpectedKeyword(token.keyword);
                    self.diagnose(token.line, kind);
                }
            }

            State::WantMsgidPlural => {
                if token.keyword == "msgid_plural" {
                    self.current_msgid_plural = token.content;
                    self.msgstr_plural.clear();
                    self.state = State::WantMsgstrPlural;
                } else {
                    self.state = State::WantMsgstr;
                    return self.add_token(token);
                }
            }

            State::WantMsgstr => {
                if token.keyword == "msgstr" {
                    if self.current_msgid.is_empty() {
                        // .po header is hidden in the msgid with the empty string
                        self.parse_header(&token.content, token.line);
                    } else {
                        let msgstr = self.convert(&token.content, token.line)?;
                        let msgid = std::mem::take(&mut self.current_msgid);
                        log::debug!("translation for '{}'", String::from_utf8_lossy(&msgid));
                        self.dict.add_translation(msgid, msgstr);
                        self.report.translations += 1;
                    }
                } else if token.is_eof() {
                    self.diagnose(token.line, DiagnosticKind::UnexpectedEof);
                } else {
                    self.diagnose(token.line, DiagnosticKind::ExpectedMsgstr(token.keyword));
                }
                self.state = State::WantMsgid;
            }

            State::WantMsgstrPlural => {
                if token.keyword.starts_with("msgstr[") {
                    match parse_plural_index(&token.keyword) {
                        Some(index) => {
                            let msgstr = self.convert(&token.content, token.line)?;
                            self.msgstr_plural.insert(index, msgstr);
                        }
                        None => {
                            let kind = DiagnosticKind::InvalidPluralIndex(token.keyword);
                            self.diagnose(token.line, kind);
                        }
                    }
                } else {
                    let msgid = std::mem::take(&mut self.current_msgid);
                    let msgid_plural = std::mem::take(&mut self.current_msgid_plural);
                    let msgstrs = std::mem::take(&mut self.msgstr_plural);
                    log::debug!(
                        "plural translation for '{}' with {} forms",
                        String::from_utf8_lossy(&msgid),
                        msgstrs.len()
                    );
                    self.dict.add_plural_translation(msgid, msgid_plural, msgstrs);
                    self.report.plural_translations += 1;

                    self.state = State::WantMsgid;
                    return self.add_token(token);
                }
            }
        }
        Ok(())
    }

    /// Resolve the charset pair from the header entry's msgstr.
    fn parse_header(&mut self, header: &[u8], line: usize) {
        if self.charsets.is_some() {
            self.diagnose(line, DiagnosticKind::DuplicateHeader);
            return;
        }

        let mut from_charset = String::new();
        for header_line in header.split_inclusive(|&b| b == b'\n') {
            let Some(header_line) = header_line.strip_suffix(b"\n") else {
                continue;
            };
            if let Some(charset) = header_line.strip_prefix(CONTENT_TYPE_PREFIX) {
                from_charset = String::from_utf8_lossy(charset).trim().to_string();
            }
        }

        if from_charset.is_empty() || from_charset == "CHARSET" {
            self.diagnose(line, DiagnosticKind::MissingCharset);
            from_charset = DEFAULT_CHARSET.to_string();
        }

        let mut to_charset = self.dict.charset().to_string();
        if to_charset.is_empty() {
            // no charset requested from the dictionary, so use the one from the .po
            to_charset = from_charset.clone();
            self.dict.set_charset(&from_charset);
        }

        log::debug!("converting from {} to {}", from_charset, to_charset);
        let pair = CharsetPair {
            from_charset,
            to_charset,
        };
        self.report.charsets = Some(pair.clone());
        self.charsets = Some(pair);
    }

    fn convert(&mut self, text: &[u8], line: usize) -> Result<Vec<u8>, PoError> {
        let (from_charset, to_charset) = match &self.charsets {
            Some(pair) => (pair.from_charset.as_str(), pair.to_charset.as_str()),
            // entries ahead of the header get the fallback charset
            None => match self.dict.charset() {
                "" => (DEFAULT_CHARSET, DEFAULT_CHARSET),
                charset => (DEFAULT_CHARSET, charset),
            },
        };
        let result = self.converter.convert(text, from_charset, to_charset);
        result.map_err(|source| PoError::Conversion { line, source })
    }
}

/// Parse the index out of a `msgstr[N]` keyword.
fn parse_plural_index(keyword: &str) -> Option<usize> {
    let digits = keyword.strip_prefix("msgstr[")?.strip_suffix(']')?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// Read `input` into `dict` with the built-in converter.
pub fn read_po<R: Read, D: Dictionary>(input: R, dict: D) -> Result<ReadReport, PoError> {
    PoReader::new(dict).read(input)
}
