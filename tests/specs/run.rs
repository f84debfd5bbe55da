// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! `devtester run` discovers test items and runs each through pytest.

use crate::prelude::*;

#[test]
fn empty_project_has_no_test_items() {
    let temp = Project::empty();
    devtester(&["run"])
        .pwd(temp.path())
        .passes()
        .stdout_eq("no test items found\n");
}

#[test]
fn missing_path_is_an_argument_error() {
    let temp = Project::empty();
    devtester(&["run", "nowhere"])
        .pwd(temp.path())
        .exits(2)
        .stderr_has("path does not exist: nowhere");
}

#[test]
fn invalid_test_type_is_an_argument_error() {
    let temp = Project::empty();
    devtester(&["run", "--test-type", "Unit_Test"])
        .pwd(temp.path())
        .exits(2)
        .stderr_has("argument error");
}

#[test]
fn json_for_empty_project() {
    let temp = Project::empty();
    let json = devtester(&["run"]).json().pwd(temp.path()).passes().json();

    assert_eq!(json["passed"], true);
    assert_eq!(json["items"].as_array().unwrap().len(), 0);
}

#[cfg(unix)]
mod with_fake_pytest {
    use crate::prelude::*;

    const FAKE_PYTEST: &str = r#"case "$4" in
  *Add_UnitTest.py)
    echo "Add_UnitTest.py::test_add PASSED"
    echo "Add_UnitTest.py::test_zero PASSED"
    ;;
  *Sub_UnitTest.py)
    echo "Sub_UnitTest.py::test_sub FAILED"
    exit 1
    ;;
  *)
    echo "ERROR: file not found"
    exit 4
    ;;
esac"#;

    fn project() -> Project {
        let temp = Project::calc();
        temp.fake_tool("pytest", FAKE_PYTEST);
        temp
    }

    #[test]
    fn passing_item_passes() {
        let temp = project();
        devtester(&["run"])
            .pwd(temp.path())
            .with_tools(&temp)
            .passes()
            .stdout_has("PASS    ")
            .stdout_has("Add_UnitTest.py: 2 tests passed")
            .stdout_has("1 item passed");
    }

    #[test]
    fn failing_item_fails_the_run() {
        let temp = project();
        temp.file("src/calc/Sub.py", "def sub(a, b):\n    return a - b\n");
        temp.file("src/calc/UnitTests/Sub_UnitTest.py", "def test_sub():\n    assert False\n");

        devtester(&["run"])
            .pwd(temp.path())
            .with_tools(&temp)
            .fails()
            .stdout_has("Add_UnitTest.py: 2 tests passed")
            .stdout_has("Sub_UnitTest.py: 1 test failed")
            .stdout_has("    test_sub: FAIL")
            .stdout_has("1 of 2 items failed");
    }

    #[test]
    fn parallel_jobs_report_in_path_order() {
        let temp = project();
        temp.file("src/calc/UnitTests/Sub_UnitTest.py", "");

        let stdout = devtester(&["run", "-j", "4"])
            .pwd(temp.path())
            .with_tools(&temp)
            .fails()
            .stdout();

        let add = stdout.find("Add_UnitTest.py").unwrap();
        let sub = stdout.find("Sub_UnitTest.py").unwrap();
        assert!(add < sub, "items out of order:\n{stdout}");
    }

    #[test]
    fn unrecognized_output_is_invalid() {
        let temp = project();
        temp.file("src/calc/UnitTests/Mul_UnitTest.py", "");

        devtester(&["run", "src/calc/UnitTests/Mul_UnitTest.py"])
            .pwd(temp.path())
            .with_tools(&temp)
            .fails()
            .stdout_has("INVALID ")
            .stdout_has("Mul_UnitTest.py: Invalid test output");
    }

    #[test]
    fn other_test_types_are_not_run() {
        let temp = project();
        temp.file("src/calc/IntegrationTests/Add_IntegrationTest.py", "");

        devtester(&["run", "--test-type", "IntegrationTests"])
            .pwd(temp.path())
            .with_tools(&temp)
            .fails()
            .stdout_has("Add_IntegrationTest.py: Invalid test output")
            .stdout_lacks("Add_UnitTest.py");
    }

    #[test]
    fn test_type_comes_from_config() {
        let temp = project();
        temp.config("[test]\ntest_type = \"IntegrationTest\"\n");

        devtester(&["run"])
            .pwd(temp.path())
            .with_tools(&temp)
            .passes()
            .stdout_eq("no test items found\n");
    }

    #[test]
    fn json_reports_each_item() {
        let temp = project();
        let json = devtester(&["run"])
            .json()
            .pwd(temp.path())
            .with_tools(&temp)
            .passes()
            .json();

        assert_eq!(json["passed"], true);
        let item = &json["items"][0];
        assert!(
            item["test_item"]
                .as_str()
                .unwrap()
                .ends_with("src/calc/UnitTests/Add_UnitTest.py")
        );
        assert_eq!(item["verdict"]["code"], 0);
        assert_eq!(item["verdict"]["status"], "2 tests passed");
        assert_eq!(item["test"]["subtests"]["test_zero"]["result"], 0);
    }

    const FAKE_COVERAGE: &str = r#"case "$1" in
  run)
    echo "Add_UnitTest.py::test_add PASSED"
    ;;
  xml)
    cat > "$3" <<'XML'
<?xml version="1.0" ?>
<coverage line-rate="0.85">
  <packages>
    <package name="calc">
      <classes>
        <class name="Add.py" filename="calc/Add.py" line-rate="0.9"></class>
      </classes>
    </package>
  </packages>
</coverage>
XML
    ;;
esac"#;

    #[test]
    fn coverage_extends_the_status() {
        let temp = project();
        temp.fake_tool("coverage", FAKE_COVERAGE);

        devtester(&["run", "--coverage"])
            .pwd(temp.path())
            .with_tools(&temp)
            .passes()
            .stdout_has("Add_UnitTest.py: 1 test passed, coverage 85.0%");

        assert!(
            temp.path()
                .join(".devtester/src/calc/UnitTests/Add_UnitTest/coverage.xml")
                .is_file()
        );
    }

    #[test]
    fn coverage_enabled_in_config() {
        let temp = project();
        temp.fake_tool("coverage", FAKE_COVERAGE);
        temp.config("[coverage]\nenabled = true\noutput_dir = \"reports\"\n");

        devtester(&["run"])
            .pwd(temp.path())
            .with_tools(&temp)
            .passes()
            .stdout_has("coverage 85.0%");

        assert!(
            temp.path()
                .join("reports/src/calc/UnitTests/Add_UnitTest/coverage.xml")
                .is_file()
        );
    }

    #[test]
    fn failed_coverage_export_keeps_test_verdict() {
        let temp = project();
        temp.fake_tool(
            "coverage",
            r#"case "$1" in
  run) echo "Add_UnitTest.py::test_add PASSED" ;;
  *) echo "No data to report." ; exit 1 ;;
esac"#,
        );

        devtester(&["run", "--coverage"])
            .pwd(temp.path())
            .with_tools(&temp)
            .passes()
            .stdout_has("Add_UnitTest.py: 1 test passed, coverage failed");
    }
}
