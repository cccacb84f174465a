//! Desired-state loading: file errors, parse errors, and validation rules.
//!
//! Each `#[case]` is isolated — no shared state.

use assert_fs::prelude::*;
use chrono::NaiveDate;
use ghconf_core::{config, ConfigError, MilestoneState, RepoName, ValidationError};
use predicates::prelude::predicate;
use rstest::rstest;

fn write_config(dir: &assert_fs::TempDir, yaml: &str) -> assert_fs::fixture::ChildPath {
    let file = dir.child("github.yml");
    file.write_str(yaml).expect("write config");
    file
}

fn validation_error(yaml: &str) -> ValidationError {
    let dir = assert_fs::TempDir::new().expect("tempdir");
    let file = write_config(&dir, yaml);
    match config::load(file.path()).unwrap_err() {
        ConfigError::Validation { source, .. } => source,
        other => panic!("expected validation error, got: {other}"),
    }
}

// ---------------------------------------------------------------------------
// 1. Successful load
// ---------------------------------------------------------------------------

#[test]
fn load_full_document() {
    let dir = assert_fs::TempDir::new().expect("tempdir");
    let file = write_config(
        &dir,
        r##"
repositories:
  - acme/api
  - web
milestones:
  - title: MVP
    description: First usable release
    state: open
    due_on: "2025-05-04"
  - title: Beta
    state: closed
labels:
  - name: bug
    color: "#D73A4A"
    description: Something isn't working
  - name: chore
    color: a2a9b1
"##,
    );
    file.assert(predicate::path::is_file());

    let state = config::load(file.path()).expect("load");
    assert_eq!(
        state.repositories,
        vec![RepoName::from("acme/api"), RepoName::from("web")]
    );
    assert_eq!(state.milestone_specs().len(), 2);
    assert_eq!(state.milestone_specs()[0].title, "MVP");
    assert_eq!(state.milestone_specs()[0].due_on, NaiveDate::from_ymd_opt(2025, 5, 4));
    assert_eq!(state.milestone_specs()[1].state, MilestoneState::Closed);
    assert!(state.milestone_specs()[1].due_on.is_none());
    assert_eq!(state.label_specs()[0].name, "bug");
    assert_eq!(state.label_specs()[0].color, "d73a4a");
    assert_eq!(state.label_specs()[1].description, "");
}

#[test]
fn label_name_casing_is_preserved() {
    let dir = assert_fs::TempDir::new().expect("tempdir");
    let file = write_config(&dir, "labels:\n  - name: Needs Triage\n    color: ededed\n");
    let state = config::load(file.path()).expect("load");
    assert_eq!(state.label_specs()[0].name, "Needs Triage");
}

// ---------------------------------------------------------------------------
// 2. File and parse errors
// ---------------------------------------------------------------------------

#[test]
fn missing_file_returns_io_error_with_path() {
    let dir = assert_fs::TempDir::new().expect("tempdir");
    let path = dir.path().join("absent.yml");
    let err = config::load(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }), "got: {err}");
    assert!(err.to_string().contains("absent.yml"));
}

#[test]
fn corrupt_yaml_returns_parse_error_with_path() {
    let dir = assert_fs::TempDir::new().expect("tempdir");
    let file = write_config(&dir, ": : corrupt : yaml : !!!\n  - broken: [unclosed");
    let err = config::load(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }), "got: {err}");
    assert!(err.to_string().contains("github.yml"));
}

#[rstest]
#[case::milestone_without_title("milestones:\n  - description: no title\n")]
#[case::label_without_name("labels:\n  - color: ffffff\n")]
#[case::label_without_color("labels:\n  - name: bug\n")]
#[case::unknown_milestone_state("milestones:\n  - title: MVP\n    state: archived\n")]
#[case::top_level_list("- just\n- a list\n")]
fn structural_problems_are_parse_errors(#[case] yaml: &str) {
    let dir = assert_fs::TempDir::new().expect("tempdir");
    let file = write_config(&dir, yaml);
    let err = config::load(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }), "got: {err}");
}

// ---------------------------------------------------------------------------
// 3. Validation rules
// ---------------------------------------------------------------------------

#[rstest]
#[case("04-05-2025")]
#[case("2025/05/04")]
#[case("May 04, 2025")]
#[case("2025-02-30")]
fn due_date_must_be_iso_date(#[case] value: &str) {
    let err = validation_error(&format!(
        "milestones:\n  - title: MVP\n    due_on: \"{value}\"\n"
    ));
    assert_eq!(
        err,
        ValidationError::InvalidDueDate {
            title: "MVP".to_string(),
            value: value.to_string(),
        }
    );
}

#[rstest]
#[case("red")]
#[case("#fff")]
#[case("gggggg")]
#[case("1234567")]
fn color_must_be_six_hex_digits(#[case] value: &str) {
    let err = validation_error(&format!("labels:\n  - name: bug\n    color: \"{value}\"\n"));
    assert!(
        matches!(err, ValidationError::InvalidColor { ref name, .. } if name == "bug"),
        "got: {err}"
    );
}

#[test]
fn duplicate_milestone_titles_are_rejected() {
    let err = validation_error("milestones:\n  - title: MVP\n  - title: MVP\n");
    assert_eq!(
        err,
        ValidationError::DuplicateMilestone {
            title: "MVP".to_string()
        }
    );
}

#[test]
fn milestone_titles_are_case_sensitive() {
    let dir = assert_fs::TempDir::new().expect("tempdir");
    let file = write_config(&dir, "milestones:\n  - title: MVP\n  - title: mvp\n");
    let state = config::load(file.path()).expect("distinct titles");
    assert_eq!(state.milestone_specs().len(), 2);
}

#[test]
fn duplicate_label_names_are_rejected_case_insensitively() {
    let err = validation_error(
        "labels:\n  - name: Bug\n    color: ffffff\n  - name: bug\n    color: 000000\n",
    );
    assert_eq!(
        err,
        ValidationError::DuplicateLabel {
            first: "Bug".to_string(),
            second: "bug".to_string(),
        }
    );
}

#[rstest]
#[case::blank_title("milestones:\n  - title: \"  \"\n", ValidationError::EmptyMilestoneTitle { index: 0 })]
#[case::blank_label("labels:\n  - name: \"\"\n    color: ffffff\n", ValidationError::EmptyLabelName { index: 0 })]
#[case::blank_repo("repositories:\n  - acme/api\n  - \"\"\n", ValidationError::EmptyRepository { index: 1 })]
fn blank_keys_are_rejected(#[case] yaml: &str, #[case] expected: ValidationError) {
    assert_eq!(validation_error(yaml), expected);
}

#[test]
fn validation_error_message_contains_path() {
    let dir = assert_fs::TempDir::new().expect("tempdir");
    let file = write_config(&dir, "milestones:\n  - title: MVP\n  - title: MVP\n");
    let msg = config::load(file.path()).unwrap_err().to_string();
    assert!(msg.contains("github.yml"), "got: {msg}");
    assert!(msg.contains("duplicate milestone title 'MVP'"), "got: {msg}");
}
