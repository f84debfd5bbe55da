// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! `devtester subject` maps a test item back to the file it tests.

use crate::prelude::*;

#[test]
fn prints_subject_of_test_item() {
    let calc = fixture("calc");
    devtester(&["subject", "src/calc/UnitTests/Add_UnitTest.py"])
        .pwd(&calc)
        .passes()
        .stdout_has("src/calc/Add.py");
}

#[test]
fn test_item_without_subject_fails() {
    let calc = fixture("calc");
    devtester(&["subject", "src/calc/UnitTests/Sub_UnitTest.py"])
        .pwd(&calc)
        .fails()
        .stderr_has("no subject found for src/calc/UnitTests/Sub_UnitTest.py");
}

#[test]
fn subject_file_is_not_a_test_item() {
    let calc = fixture("calc");
    devtester(&["subject", "src/calc/Add.py"]).pwd(&calc).fails();
}

#[test]
fn json_reports_item_and_subject() {
    let calc = fixture("calc");
    let json = devtester(&["subject", "src/calc/UnitTests/Add_UnitTest.py"])
        .json()
        .pwd(&calc)
        .passes()
        .json();

    assert_eq!(json["test_item"], "src/calc/UnitTests/Add_UnitTest.py");
    let subject = json["subject"].as_str().unwrap();
    assert!(subject.ends_with("src/calc/Add.py"), "{subject}");
    assert!(std::path::Path::new(subject).is_absolute());
}

#[test]
fn json_reports_null_subject() {
    let calc = fixture("calc");
    let json = devtester(&["subject", "src/calc/UnitTests/Sub_UnitTest.py"])
        .json()
        .pwd(&calc)
        .fails()
        .json();

    assert!(json["subject"].is_null());
}
