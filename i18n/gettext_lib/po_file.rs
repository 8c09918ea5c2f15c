//
// Copyright (c) 2026 Jeff Garzik
//
// This file is part of the posixutils-rs project covered under
// the MIT License.  For the full license text, please see the LICENSE
// file in the root directory of this project.
// SPDX-License-Identifier: MIT
//

//! .po (Portable Object) file tokenizer
//!
//! Splits a .po byte stream into `(keyword, content)` tokens:
//! - `#` starts a comment that runs to the end of the line
//! - a keyword is any run of non-whitespace bytes (`msgid`, `msgstr[1]`, ...)
//! - the content is the concatenation of every quoted literal that follows
//!   the keyword, with `\n`, `\t`, `\r` and `\"` decoded
//!
//! Content is kept as raw bytes; the charset it is written in is only known
//! once the header entry has been read.

use std::fmt;
use std::io::{self, BufReader, Bytes, Read};

/// Problem found while reading a .po file that does not stop the read
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticKind {
    #[error("expected 'msgid' keyword, got '{0}'")]
    UnexpectedKeyword(String),
    #[error("expected 'msgstr' keyword, got '{0}'")]
    ExpectedMsgstr(String),
    #[error("expected 'msgstr' keyword, got end of input")]
    UnexpectedEof,
    #[error("couldn't parse plural index: {0}")]
    InvalidPluralIndex(String),
    #[error("unhandled escape character: {}", .0.escape_ascii())]
    UnknownEscape(u8),
    #[error("unterminated string")]
    UnterminatedString,
    #[error("charset not specified for .po, fallback to ISO-8859-1")]
    MissingCharset,
    #[error("duplicate header entry ignored")]
    DuplicateHeader,
    #[error("no header entry found")]
    MissingHeader,
}

/// A diagnostic together with the line it was found on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub line: usize,
    pub kind: DiagnosticKind,
}

impl Diagnostic {
    pub fn new(line: usize, kind: DiagnosticKind) -> Self {
        log::warn!("line {}: {}", line, kind);
        Diagnostic { line, kind }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.kind)
    }
}

/// One keyword and its decoded content
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Token {
    /// Keyword; empty only for the end-of-input token
    pub keyword: String,
    /// Concatenated content of the quoted literals after the keyword
    pub content: Vec<u8>,
    /// Line on which the keyword starts
    pub line: usize,
}

impl Token {
    pub fn is_eof(&self) -> bool {
        self.keyword.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    ReadKeyword,
    ReadContent,
    ReadContentInString,
    SkipComment,
}

/// Pull tokenizer over a byte stream
pub struct Tokenizer<R> {
    bytes: Bytes<BufReader<R>>,
    pushback: Option<u8>,
    line: usize,
    state: State,
    token: Option<Token>,
    eof: bool,
    finished: bool,
}

impl<R: Read> Tokenizer<R> {
    pub fn new(reader: R) -> Self {
        Tokenizer {
            bytes: BufReader::new(reader).bytes(),
            pushback: None,
            line: 1,
            state: State::ReadKeyword,
            token: None,
            eof: false,
            finished: false,
        }
    }

    /// Current line number (1-based)
    pub fn line(&self) -> usize {
        self.line
    }

    fn getc(&mut self) -> io::Result<Option<u8>> {
        if let Some(c) = self.pushback.take() {
            return Ok(Some(c));
        }
        // never poll the reader again once it reported end of input
        if self.eof {
            return Ok(None);
        }
        match self.bytes.next() {
            Some(Ok(c)) => {
                if c == b'\n' {
                    self.line += 1;
                }
                Ok(Some(c))
            }
            Some(Err(e)) => Err(e),
            None => {
                self.eof = true;
                Ok(None)
            }
        }
    }

    fn push_content(&mut self, c: u8) {
        if let Some(token) = self.token.as_mut() {
            token.content.push(c);
        }
    }

    /// Return the next token.
    ///
    /// At end of input the pending token (if any) is returned first, then a
    /// single token with an empty keyword. After that `None` is returned.
    pub fn next_token(&mut self, diagnostics: &mut Vec<Diagnostic>) -> io::Result<Option<Token>> {
        loop {
            if self.finished {
                return Ok(None);
            }

            let c = match self.getc()? {
                Some(c) => c,
                None => return Ok(Some(self.finish(diagnostics))),
            };

            match self.state {
                State::ReadKeyword => {
                    if c == b'#' {
                        self.state = State::SkipComment;
                    } else if !c.is_ascii_whitespace() {
                        let line = self.line;
                        let mut keyword = vec![c];
                        while let Some(c) = self.getc()? {
                            if c.is_ascii_whitespace() {
                                break;
                            }
                            keyword.push(c);
                        }
                        self.token = Some(Token {
                            keyword: String::from_utf8_lossy(&keyword).into_owned(),
                            content: Vec::new(),
                            line,
                        });
                        self.state = State::ReadContent;
                    }
                }

                State::ReadContent => {
                    if c == b'"' {
                        self.state = State::ReadContentInString;
                    } else if !c.is_ascii_whitespace() {
                        // start of the next keyword or comment
                        self.pushback = Some(c);
                        self.state = State::ReadKeyword;
                        if let Some(token) = self.token.take() {
                            log::trace!("token '{}' at line {}", token.keyword, token.line);
                            return Ok(Some(token));
                        }
                    }
                }

                State::ReadContentInString => match c {
                    b'\\' => match self.getc()? {
                        Some(b'n') => self.push_content(b'\n'),
                        Some(b't') => self.push_content(b'\t'),
                        Some(b'r') => self.push_content(b'\r'),
                        Some(b'"') => self.push_content(b'"'),
                        Some(other) => {
                            diagnostics.push(Diagnostic::new(
                                self.line,
                                DiagnosticKind::UnknownEscape(other),
                            ));
                        }
                        None => {
                            diagnostics.push(Diagnostic::new(
                                self.line,
                                DiagnosticKind::UnterminatedString,
                            ));
                            self.state = State::ReadContent;
                        }
                    },
                    b'"' => self.state = State::ReadContent,
                    _ => self.push_content(c),
                },

                State::SkipComment => {
                    if c == b'\n' {
                        self.state = State::ReadKeyword;
                    }
                }
            }
        }
    }

    fn finish(&mut self, diagnostics: &mut Vec<Diagnostic>) -> Token {
        if self.state == State::ReadContentInString {
            diagnostics.push(Diagnostic::new(
                self.line,
                DiagnosticKind::UnterminatedString,
            ));
        }
        self.state = State::ReadKeyword;

        match self.token.take() {
            Some(token) => token,
            None => {
                self.finished = true;
                Token {
                    line: self.line,
                    ..Token::default()
                }
            }
        }
    }
}
