use std::time::Duration;

use pretty_assertions::assert_eq;
use speculoos::prelude::*;
use tempfile::TempDir;

use testcase_maker_format::testcase::{input_file_name, output_file_name};
use testcase_maker_format::*;
use testcase_maker_lang::{ExecutionOptions, TEMP_INPUT_NAME};

mod utils;

use utils::*;

fn config(max_cases: u32, num_files: u32) -> GeneratorConfig {
    GeneratorConfig {
        max_cases,
        num_files,
        seed: None,
    }
}

#[test]
fn test_generate_pairs() {
    let tmpdir = TempDir::new().unwrap();
    write_solution(tmpdir.path(), SUM_SOLUTION);
    let mut session = session(tmpdir.path(), "1\n");
    let outcome = generate_testcases(&mut session, &config(20, 4)).unwrap();
    assert_that!(outcome.is_success()).is_true();

    let mut expected = vec!["solution.sh".to_string()];
    for i in 0..4 {
        expected.push(input_file_name(i));
        expected.push(output_file_name(i));
    }
    expected.sort();
    assert_eq!(file_names(tmpdir.path()), expected);

    for i in 0..4 {
        let input = read(tmpdir.path().join(input_file_name(i)));
        let output = read(tmpdir.path().join(output_file_name(i)));
        assert_eq!(output, expected_sums(&input));
        let cases: u32 = input.lines().next().unwrap().parse().unwrap();
        assert_that!(cases).is_greater_than_or_equal_to(1);
        assert_that!(cases).is_less_than_or_equal_to(20);
        assert_that!(input.lines().count()).is_equal_to(cases as usize + 1);
        assert_that!(input.ends_with('\n')).is_false();
    }

    let printed = printed(&session);
    assert_that!(printed).contains("Found solution.sh (Shell 1.0 found)");
    assert_that!(printed).contains("Selected solution: solution.sh");
    assert_that!(printed).contains("Generated test case 03");
    assert_that!(printed).contains("Generated all 4 test case files successfully!");
}

#[test]
fn test_generate_single_case() {
    let tmpdir = TempDir::new().unwrap();
    write_solution(tmpdir.path(), SUM_SOLUTION);
    let mut session = session(tmpdir.path(), "1\n");
    let outcome = generate_testcases(&mut session, &config(1, 1)).unwrap();
    match outcome {
        GenerationOutcome::Completed(report) => {
            assert_that!(report.generated).is_equal_to(1);
            assert_that!(report.requested).is_equal_to(1);
        }
        other => panic!("unexpected outcome: {:?}", other),
    }
    let input = read(tmpdir.path().join("in00.txt"));
    let lines: Vec<_> = input.lines().collect();
    assert_that!(lines.len()).is_equal_to(2);
    assert_eq!(lines[0], "1");
    assert_eq!(read(tmpdir.path().join("out00.txt")), expected_sums(&input));
}

#[test]
fn test_generate_seeded_is_reproducible() {
    let first = TempDir::new().unwrap();
    let second = TempDir::new().unwrap();
    for dir in [first.path(), second.path()] {
        write_solution(dir, SUM_SOLUTION);
        let mut session = session(dir, "1\n");
        let config = GeneratorConfig {
            seed: Some(42),
            ..config(50, 3)
        };
        assert_that!(generate_testcases(&mut session, &config).unwrap().is_success()).is_true();
    }
    for i in 0..3 {
        assert_eq!(
            read(first.path().join(input_file_name(i))),
            read(second.path().join(input_file_name(i)))
        );
    }
}

#[test]
fn test_generate_no_solution() {
    let tmpdir = TempDir::new().unwrap();
    let mut session = session(tmpdir.path(), "");
    let outcome = generate_testcases(&mut session, &config(10, 3)).unwrap();
    assert_that!(outcome).is_equal_to(GenerationOutcome::NoSolution);
    assert_that!(file_names(tmpdir.path())).is_empty();
    let printed = printed(&session);
    assert_that!(printed).contains("No usable solution files found!");
    assert_that!(printed).contains("Please ensure you have the required language support installed:");
    assert_that!(printed).contains("- Shell: Required for .sh files");
}

#[test]
fn test_generate_crashing_solution_writes_nothing() {
    let tmpdir = TempDir::new().unwrap();
    write_solution(tmpdir.path(), CRASHING_SOLUTION);
    let mut session = session(tmpdir.path(), "1\n");
    let outcome = generate_testcases(&mut session, &config(5, 3)).unwrap();
    match &outcome {
        GenerationOutcome::Completed(report) => {
            assert_that!(report.generated).is_equal_to(0);
            assert_that!(report.failures).has_length(3);
        }
        other => panic!("unexpected outcome: {:?}", other),
    }
    assert_that!(outcome.is_success()).is_false();
    assert_eq!(file_names(tmpdir.path()), vec!["solution.sh"]);
    let printed = printed(&session);
    assert_that!(printed).contains("Failed to generate test case 00");
    assert_that!(printed).contains("oops");
    assert_that!(printed).contains("[WARN] Generated 0 out of 3 test case files");
}

#[test]
fn test_generate_hanging_solution_times_out() {
    let tmpdir = TempDir::new().unwrap();
    write_solution(tmpdir.path(), HANGING_SOLUTION);
    let mut session = session(tmpdir.path(), "1\n").with_execution_options(ExecutionOptions {
        time_limit: Some(Duration::from_millis(300)),
        build_time_limit: None,
    });
    let outcome = generate_testcases(&mut session, &config(5, 1)).unwrap();
    assert_that!(outcome.is_success()).is_false();
    assert_that!(printed(&session)).contains("did not terminate");
    assert_eq!(file_names(tmpdir.path()), vec!["solution.sh"]);
}

#[test]
fn test_generate_leaves_no_temp_file() {
    let tmpdir = TempDir::new().unwrap();
    write_solution(tmpdir.path(), SUM_SOLUTION);
    let mut session = session(tmpdir.path(), "1\n");
    generate_testcases(&mut session, &config(3, 2)).unwrap();
    assert_that!(tmpdir.path().join(TEMP_INPUT_NAME).exists()).is_false();
}

#[test]
fn test_generate_overwrites_existing() {
    let tmpdir = TempDir::new().unwrap();
    write_solution(tmpdir.path(), SUM_SOLUTION);
    std::fs::write(tmpdir.path().join("in00.txt"), "old").unwrap();
    std::fs::write(tmpdir.path().join("out00.txt"), "old").unwrap();
    let mut session = session(tmpdir.path(), "1\n");
    generate_testcases(&mut session, &config(3, 1)).unwrap();
    let input = read(tmpdir.path().join("in00.txt"));
    assert_that!(input).is_not_equal_to("old".to_string());
    assert_eq!(read(tmpdir.path().join("out00.txt")), expected_sums(&input));
}
