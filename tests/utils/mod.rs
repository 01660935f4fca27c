#![allow(dead_code)]

use std::fs;

/// Read sample text into string
pub fn read_sample_file() -> String {
    fs::read_to_string("tests/sample_text.txt").unwrap()
}

/// Read sample rules into string
pub fn read_sample_rules() -> String {
    fs::read_to_string("tests/rules.txt").unwrap()
}

/// Read what sample rules are expected to turn sample text into
pub fn read_expected_output() -> String {
    fs::read_to_string("tests/expected_output.txt").unwrap()
}
