// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! `devtester lint` verifies a pylint score.

use crate::prelude::*;

#[test]
fn missing_file_is_skipped() {
    let temp = Project::empty();
    devtester(&["lint", "Gone.py"])
        .pwd(temp.path())
        .passes()
        .stdout_eq("SKIP    Gone.py: Skipped (file does not exist)\n");
}

#[test]
fn package_init_is_skipped() {
    let temp = Project::calc();
    devtester(&["lint", "src/calc/__init__.py"])
        .pwd(temp.path())
        .passes()
        .stdout_has("Skipped (__init__.py)");
}

#[test]
fn test_item_without_subject_is_skipped() {
    let temp = Project::calc();
    temp.file("src/calc/UnitTests/Sub_UnitTest.py", "");
    devtester(&["lint", "src/calc/UnitTests/Sub_UnitTest.py"])
        .pwd(temp.path())
        .passes()
        .stdout_has("Skipped (test item)");
}

#[test]
fn out_of_range_passing_score_is_rejected() {
    let temp = Project::calc();
    devtester(&["lint", "src/calc/Add.py", "--passing-score", "11"])
        .pwd(temp.path())
        .exits(2)
        .stderr_has("out of range");
}

#[cfg(unix)]
mod with_fake_pylint {
    use crate::prelude::*;

    fn project(score: &str) -> Project {
        let temp = Project::calc();
        temp.fake_tool(
            "python",
            &format!(
                "echo '************* Module calc.Add'\n\
                 echo 'Your code has been rated at {score}/10 (previous run: 7.00/10, +1.50)'\n\
                 exit 16"
            ),
        );
        temp
    }

    #[test]
    fn score_below_default_fails() {
        let temp = project("8.50");
        devtester(&["lint", "src/calc/Add.py"])
            .pwd(temp.path())
            .with_tools(&temp)
            .fails()
            .stdout_eq("FAIL    src/calc/Add.py: 8.5 < 9.0\n");
    }

    #[test]
    fn perfect_score_passes() {
        let temp = project("10.00");
        devtester(&["lint", "src/calc/Add.py"])
            .pwd(temp.path())
            .with_tools(&temp)
            .passes()
            .stdout_eq("PASS    src/calc/Add.py: 10.0 >= 9.0\n");
    }

    #[test]
    fn test_item_lints_its_subject() {
        let temp = project("9.50");
        devtester(&["lint", "src/calc/UnitTests/Add_UnitTest.py"])
            .pwd(temp.path())
            .with_tools(&temp)
            .passes()
            .stdout_has("src/calc/Add.py: 9.5 >= 9.0");
    }

    #[test]
    fn passing_score_flag_overrides_config() {
        let temp = project("8.50");
        temp.config("[lint]\npassing_score = 9.5\n");
        devtester(&["lint", "src/calc/Add.py", "--passing-score", "8"])
            .pwd(temp.path())
            .with_tools(&temp)
            .passes()
            .stdout_has("8.5 >= 8.0");
    }

    #[test]
    fn passing_score_from_config() {
        let temp = project("8.50");
        temp.config("[lint]\npassing_score = 8.0\n");
        devtester(&["lint", "src/calc/Add.py"])
            .pwd(temp.path())
            .with_tools(&temp)
            .passes();
    }

    #[test]
    fn missing_score_is_invalid_output() {
        let temp = Project::calc();
        temp.fake_tool("python", "echo 'No module named pylint'\nexit 1");
        devtester(&["lint", "src/calc/Add.py"])
            .pwd(temp.path())
            .with_tools(&temp)
            .fails()
            .stdout_has("Invalid pylint output");
    }

    #[test]
    fn json_reports_score() {
        let temp = project("8.50");
        let json = devtester(&["lint", "src/calc/Add.py"])
            .json()
            .pwd(temp.path())
            .with_tools(&temp)
            .fails()
            .json();

        assert_eq!(json["result"], -1);
        assert_eq!(json["score"], 8.5);
        assert_eq!(json["max_score"], 10.0);
        assert_eq!(json["passing_score"], 9.0);
        assert_eq!(json["explicit_passing_score"], false);
    }
}
