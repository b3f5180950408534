use speculoos::prelude::*;
use tempfile::TempDir;

mod common;

use common::*;

#[test]
fn test_validate_without_solution_exits_zero() {
    let tmpdir = TempDir::new().unwrap();
    let output = run_binary(tmpdir.path(), &["validate"]);
    assert_that!(output.status.code()).is_equal_to(Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    assert_that!(stdout).contains("Working directory: ");
    assert_that!(stdout).contains("No usable solution files found!");
    assert_that!(stdout).contains("- Python: Required for .py files");
    assert_that!(stdout).contains("- Java JDK: Required for .java files");
    assert_that!(stdout).contains("- GCC: Required for .c files");
    assert_that!(stdout).contains("- G++: Required for .cpp files");
    assert_that!(stdout).contains("No valid solution file available for validation");
}

#[test]
fn test_both_without_solution_exits_one() {
    let tmpdir = TempDir::new().unwrap();
    let output = run_binary(tmpdir.path(), &["both"]);
    assert_that!(output.status.code()).is_equal_to(Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    assert_that!(stdout).contains("Test case generation failed. Skipping validation.");
    assert_that!(stdout).does_not_contain("Starting Test Case Validation");
}

#[test]
fn test_invalid_arguments() {
    let tmpdir = TempDir::new().unwrap();
    let output = run_binary(tmpdir.path(), &["generate", "--num-files", "0"]);
    assert_that!(output.status.success()).is_false();
    let output = run_binary(tmpdir.path(), &["frobnicate"]);
    assert_that!(output.status.success()).is_false();
}

#[test]
fn test_missing_working_directory() {
    let tmpdir = TempDir::new().unwrap();
    let output = run_binary(tmpdir.path(), &["validate", "-d", "does-not-exist"]);
    assert_that!(output.status.code()).is_equal_to(Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    assert_that!(stderr).contains("Error: Invalid working directory does-not-exist");
    assert_that!(stderr).contains("Caused by:");
}

#[test]
fn test_python_end_to_end() {
    if which_python().is_none() {
        return;
    }
    let tmpdir = TempDir::new().unwrap();
    std::fs::write(
        tmpdir.path().join("solution.py"),
        "t = int(input())\nfor _ in range(t):\n    a, b = map(int, input().split())\n    print(a + b)\n",
    )
    .unwrap();
    let output = run_binary(
        tmpdir.path(),
        &["both", "-s", "solution.py", "--num-files", "2", "--max-cases", "3"],
    );
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    assert_that!(output.status.code()).is_equal_to(Some(0));
    assert_that!(stdout).contains("Generated all 2 test case files successfully!");
    assert_that!(stdout).contains("All test cases passed successfully!");
    assert_that!(tmpdir.path().join("in01.txt").exists()).is_true();
    assert_that!(tmpdir.path().join("out01.txt").exists()).is_true();
}

fn which_python() -> Option<std::path::PathBuf> {
    ["python3", "python"]
        .iter()
        .find_map(|name| which::which(name).ok())
}
