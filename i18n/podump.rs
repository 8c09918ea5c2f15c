//
// Copyright (c) 2026 Jeff Garzik
//
// This file is part of the posixutils-rs project covered under
// the MIT License.  For the full license text, please see the LICENSE
// file in the root directory of this project.
// SPDX-License-Identifier: MIT
//

//! podump - load message catalogs and print their translations
//!
//! Reads one or more .po files into a single message catalog, converting
//! every translation into the catalog charset, and prints the result in
//! .po syntax.

use clap::Parser;
use log::LevelFilter;
use plib::io::input_stream;
use posixutils_po::gettext_lib::catalog::MessageCatalog;
use posixutils_po::gettext_lib::po_reader::{read_po, PoError, DEFAULT_CHARSET};
use posixutils_po::iconv_lib::list_encodings;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process::exit;

/// podump - load message catalogs and print their translations
#[derive(Parser)]
#[command(
    version,
    about = "podump - load message catalogs and print their translations"
)]
struct Args {
    #[arg(
        short = 't',
        long = "to-code",
        help = "Convert translations to this charset instead of the one declared by the first file"
    )]
    to_code: Option<String>,

    #[arg(short = 'l', long = "list", help = "List all supported charsets")]
    list: bool,

    #[arg(
        short = 'v',
        action = clap::ArgAction::Count,
        help = "Increase log verbosity"
    )]
    verbose: u8,

    #[arg(
        required_unless_present = "list",
        help = "Input .po files (- for standard input)"
    )]
    files: Vec<PathBuf>,
}

fn log_level(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Error,
        1 => LevelFilter::Warn,
        2 => LevelFilter::Info,
        3 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Write `text` as a quoted .po string
fn write_quoted<W: Write>(out: &mut W, text: &[u8]) -> io::Result<()> {
    out.write_all(b"\"")?;
    for &byte in text {
        match byte {
            b'\n' => out.write_all(b"\\n")?,
            b'\t' => out.write_all(b"\\t")?,
            b'\r' => out.write_all(b"\\r")?,
            b'"' => out.write_all(b"\\\"")?,
            _ => out.write_all(&[byte])?,
        }
    }
    out.write_all(b"\"")
}

fn write_field<W: Write>(out: &mut W, keyword: &str, text: &[u8]) -> io::Result<()> {
    write!(out, "{} ", keyword)?;
    write_quoted(out, text)?;
    writeln!(out)
}

fn dump_catalog<W: Write>(out: &mut W, catalog: &MessageCatalog) -> io::Result<()> {
    // without any header the entries were stored in the fallback charset
    let charset = match catalog.charset.as_str() {
        "" => DEFAULT_CHARSET,
        charset => charset,
    };
    writeln!(out, "charset: {}", charset)?;

    for (msgid, msgstr) in &catalog.messages {
        writeln!(out)?;
        write_field(out, "msgid", msgid)?;
        write_field(out, "msgstr", msgstr)?;
    }

    for ((msgid, msgid_plural), msgstrs) in &catalog.plural_messages {
        writeln!(out)?;
        write_field(out, "msgid", msgid)?;
        write_field(out, "msgid_plural", msgid_plural)?;
        for (index, msgstr) in msgstrs {
            write_field(out, &format!("msgstr[{}]", index), msgstr)?;
        }
    }

    out.flush()
}

fn main() {
    let args = Args::parse();

    env_logger::Builder::new()
        .filter_level(log_level(args.verbose))
        .parse_default_env()
        .init();

    if args.list {
        for name in list_encodings() {
            println!("{}", name);
        }
        exit(0);
    }

    let mut exit_code = 0;
    let mut catalog = match args.to_code {
        Some(ref charset) => MessageCatalog::with_charset(charset),
        None => MessageCatalog::new(),
    };

    for path in &args.files {
        let input = match input_stream(path, true) {
            Ok(input) => input,
            Err(e) => {
                eprintln!("podump: {}: {}", path.display(), e);
                exit_code = 1;
                continue;
            }
        };

        match read_po(input, &mut catalog) {
            Ok(report) => {
                for diag in &report.diagnostics {
                    eprintln!(
                        "podump: {}:{}: warning: {}",
                        path.display(),
                        diag.line,
                        diag.kind
                    );
                }
            }
            Err(e @ PoError::Conversion { .. }) => {
                eprintln!("podump: {}: conversion failed: {}", path.display(), e);
                exit_code = 1;
            }
            Err(e) => {
                eprintln!("podump: {}: {}", path.display(), e);
                exit_code = 1;
            }
        }
    }

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    if let Err(e) = dump_catalog(&mut out, &catalog) {
        eprintln!("podump: {}", e);
        exit_code = 1;
    }

    exit(exit_code);
}
