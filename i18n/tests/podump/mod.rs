//
// Copyright (c) 2026 Jeff Garzik
//
// This file is part of the posixutils-rs project covered under
// the MIT License.  For the full license text, please see the LICENSE
// file in the root directory of this project.
// SPDX-License-Identifier: MIT
//

use plib::testing::{run_test, run_test_u8, TestPlan, TestPlanU8};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const UTF8_HEADER: &str = r#"msgid ""
msgstr ""
"Content-Type: text/plain; charset=UTF-8\n"
"#;

/// Write `content` to a .po file inside a fresh temporary directory
fn create_temp_po_file(name: &str, content: &[u8]) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let po_path = temp_dir.path().join(name);
    fs::write(&po_path, content).unwrap();
    (temp_dir, po_path)
}

fn path_arg(path: &PathBuf) -> String {
    path.to_str().unwrap().to_string()
}

fn podump_test(args: Vec<String>, stdin: &str, out: &str, err: &str, exit_code: i32) {
    run_test(TestPlan {
        cmd: String::from("podump"),
        args,
        stdin_data: String::from(stdin),
        expected_out: String::from(out),
        expected_err: String::from(err),
        expected_exit_code: exit_code,
    });
}

#[test]
fn test_podump_simple() {
    let po_content = format!(
        r#"{UTF8_HEADER}
msgid "Hello"
msgstr "Bonjour"

msgid "cat"
msgid_plural "cats"
msgstr[0] "chat"
msgstr[1] "chats"
"#
    );
    let (_temp_dir, po_path) = create_temp_po_file("fr.po", po_content.as_bytes());

    podump_test(
        vec![path_arg(&po_path)],
        "",
        r#"charset: UTF-8

msgid "Hello"
msgstr "Bonjour"

msgid "cat"
msgid_plural "cats"
msgstr[0] "chat"
msgstr[1] "chats"
"#,
        "",
        0,
    );
}

#[test]
fn test_podump_list() {
    podump_test(
        vec![String::from("-l")],
        "",
        "ASCII\nISO-8859-1\nUTF-8\nUTF-16\nUTF-16LE\nUTF-16BE\nUTF-32\nUTF-32LE\nUTF-32BE\n",
        "",
        0,
    );
}

#[test]
fn test_podump_stdin_escapes() {
    let input = format!(
        "{UTF8_HEADER}msgid \"tab\"\nmsgstr \"a\\tb\\n\" \"\\\"c\\\"\"\n"
    );
    podump_test(
        vec![String::from("-")],
        &input,
        "charset: UTF-8\n\nmsgid \"tab\"\nmsgstr \"a\\tb\\n\\\"c\\\"\"\n",
        "",
        0,
    );
}

#[test]
fn test_podump_latin1_to_utf8() {
    let po_content: &[u8] = b"msgid \"\"\n\
msgstr \"Content-Type: text/plain; charset=ISO-8859-1\\n\"\n\
msgid \"coffee\"\n\
msgstr \"caf\xe9\"\n";
    let (_temp_dir, po_path) = create_temp_po_file("latin1.po", po_content);

    let expected_out = b"charset: UTF-8\n\nmsgid \"coffee\"\nmsgstr \"caf\xc3\xa9\"\n";

    run_test_u8(TestPlanU8 {
        cmd: String::from("podump"),
        args: vec![
            String::from("-t"),
            String::from("UTF-8"),
            path_arg(&po_path),
        ],
        stdin_data: Vec::new(),
        expected_out: expected_out.to_vec(),
        expected_err: Vec::new(),
        expected_exit_code: 0,
    });
}

#[test]
fn test_podump_warnings() {
    let po_content = format!(
        "{UTF8_HEADER}msgid \"file\"\nmsgid_plural \"files\"\nmsgstr[0] \"fichier\"\nmsgstr[x] \"oops\"\nmsgstr[1] \"fichiers\"\n"
    );
    let (_temp_dir, po_path) = create_temp_po_file("plural.po", po_content.as_bytes());
    let path = path_arg(&po_path);

    podump_test(
        vec![path.clone()],
        "",
        r#"charset: UTF-8

msgid "file"
msgid_plural "files"
msgstr[0] "fichier"
msgstr[1] "fichiers"
"#,
        &format!(
            "podump: {path}:7: warning: couldn't parse plural index: msgstr[x]\n"
        ),
        0,
    );
}

#[test]
fn test_podump_no_header() {
    podump_test(
        vec![String::from("-")],
        "msgid \"a\"\nmsgstr \"b\"\n",
        "charset: ISO-8859-1\n\nmsgid \"a\"\nmsgstr \"b\"\n",
        "podump: -:2: warning: no header entry found\n",
        0,
    );
}

#[test]
fn test_podump_merges_files() {
    let first = format!("{UTF8_HEADER}msgid \"one\"\nmsgstr \"un\"\n");
    let second = format!(
        "{UTF8_HEADER}msgid \"two\"\nmsgstr \"deux\"\nmsgid \"one\"\nmsgstr \"une\"\n"
    );
    let (_first_dir, first_path) = create_temp_po_file("a.po", first.as_bytes());
    let (_second_dir, second_path) = create_temp_po_file("b.po", second.as_bytes());

    podump_test(
        vec![path_arg(&first_path), path_arg(&second_path)],
        "",
        "charset: UTF-8\n\nmsgid \"one\"\nmsgstr \"une\"\n\nmsgid \"two\"\nmsgstr \"deux\"\n",
        "",
        0,
    );
}

#[test]
fn test_podump_missing_file() {
    let po_content = format!("{UTF8_HEADER}msgid \"Hello\"\nmsgstr \"Hola\"\n");
    let (temp_dir, po_path) = create_temp_po_file("es.po", po_content.as_bytes());
    let missing = path_arg(&temp_dir.path().join("missing.po"));

    podump_test(
        vec![missing.clone(), path_arg(&po_path)],
        "",
        "charset: UTF-8\n\nmsgid \"Hello\"\nmsgstr \"Hola\"\n",
        &format!(
            "podump: {missing}: No such file or directory (os error 2)\n"
        ),
        1,
    );
}

#[test]
fn test_podump_conversion_failure() {
    let po_content: &[u8] = b"msgid \"\"\n\
msgstr \"Content-Type: text/plain; charset=UTF-8\\n\"\n\
msgid \"bad\"\n\
msgstr \"\xff\"\n";
    let (_temp_dir, po_path) = create_temp_po_file("bad.po", po_content);
    let path = path_arg(&po_path);

    let expected_err = format!(
        "podump: {path}: conversion failed: line 4: error while converting \
         (UTF-8 -> ISO-8859-1) text \"\u{FFFD}\": invalid byte 0xFF at offset 0\n"
    );

    run_test_u8(TestPlanU8 {
        cmd: String::from("podump"),
        args: vec![String::from("-t"), String::from("ISO-8859-1"), path],
        stdin_data: Vec::new(),
        expected_out: b"charset: ISO-8859-1\n".to_vec(),
        expected_err: expected_err.into_bytes(),
        expected_exit_code: 1,
    });
}
