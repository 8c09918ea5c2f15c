//
// Copyright (c) 2024 Hemi Labs, Inc.
//
// This file is part of the posixutils-rs project covered under
// the MIT License.  For the full license text, please see the LICENSE
// file in the root directory of this project.
// SPDX-License-Identifier: MIT
//

//! Integration test harness: run a workspace binary and compare its output

use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};

/// Expected behaviour of one run, with text input and output
pub struct TestPlan {
    pub cmd: String,
    pub args: Vec<String>,
    pub stdin_data: String,
    pub expected_out: String,
    pub expected_err: String,
    pub expected_exit_code: i32,
}

/// Like [`TestPlan`], for binaries reading or writing arbitrary bytes
pub struct TestPlanU8 {
    pub cmd: String,
    pub args: Vec<String>,
    pub stdin_data: Vec<u8>,
    pub expected_out: Vec<u8>,
    pub expected_err: Vec<u8>,
    pub expected_exit_code: i32,
}

fn binary_path(cmd: &str) -> PathBuf {
    let profile = if cfg!(debug_assertions) {
        "debug"
    } else {
        "release"
    };
    // tests run from the package directory, binaries live under the workspace root
    std::env::current_dir()
        .unwrap()
        .parent()
        .unwrap()
        .join("target")
        .join(profile)
        .join(cmd)
}

/// Run `cmd` with `args`, feeding `stdin_data` on standard input.
///
/// `RUST_LOG` is cleared so log records never end up in the captured
/// stderr.
pub fn run_test_base(cmd: &str, args: &[String], stdin_data: &[u8]) -> Output {
    let mut child = Command::new(binary_path(cmd))
        .args(args)
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap_or_else(|e| panic!("failed to spawn command {cmd}: {e}"));

    if let Some(mut stdin) = child.stdin.take() {
        // the child may exit without reading, e.g. on a usage error
        let _ = stdin.write_all(stdin_data);
    }

    child.wait_with_output().expect("failed to wait for child")
}

fn check_status(output: &Output, expected_exit_code: i32) {
    assert_eq!(output.status.code(), Some(expected_exit_code));
    if expected_exit_code == 0 {
        assert!(output.status.success());
    }
}

pub fn run_test(plan: TestPlan) {
    let output = run_test_base(&plan.cmd, &plan.args, plan.stdin_data.as_bytes());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout, plan.expected_out);

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(stderr, plan.expected_err);

    check_status(&output, plan.expected_exit_code);
}

pub fn run_test_u8(plan: TestPlanU8) {
    let output = run_test_base(&plan.cmd, &plan.args, &plan.stdin_data);

    assert_eq!(output.stdout, plan.expected_out);
    assert_eq!(output.stderr, plan.expected_err);

    check_status(&output, plan.expected_exit_code);
}
