//! Tests for command dispatch against a temp data file

use clap::Parser;
use tempfile::TempDir;

use forensic::cli::commands::execute_command;
use forensic::cli::Cli;
use forensic::config::Settings;
use forensic::exitcode;
use forensic::infrastructure::di::ServiceContainer;

const SAMPLE: &str = "AAATTT\nGCGC\n3\nJane Doe 2 AA 1 GC 2\nJohn Roe 1 TT 4\nAnn Moe 0\n";

fn setup() -> (TempDir, String) {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("people.txt");
    std::fs::write(&path, SAMPLE).expect("write data file");
    let path = path.to_string_lossy().into_owned();
    (temp, path)
}

fn run(args: &[&str], settings: Settings) -> Result<(), i32> {
    let cli = Cli::try_parse_from(args).expect("valid arguments");
    let container = ServiceContainer::new(settings);
    execute_command(&cli, &container).map_err(|e| e.exit_code())
}

#[test]
fn given_data_file_when_running_queries_then_succeed() {
    let (_temp, path) = setup();

    for command in ["flag", "count", "unmarked", "cleanup", "tree"] {
        let result = run(&["forensic", "-f", &path, command], Settings::default());
        assert_eq!(result, Ok(()), "command {} failed", command);
    }
}

#[test]
fn given_names_when_removing_then_succeeds_even_if_absent() {
    let (_temp, path) = setup();

    let result = run(
        &["forensic", "-f", &path, "remove", "Doe, Jane", "Nobody, Here"],
        Settings::default(),
    );

    assert_eq!(result, Ok(()));
}

#[test]
fn given_name_without_comma_when_removing_then_usage_error() {
    let (_temp, path) = setup();

    let result = run(
        &["forensic", "-f", &path, "remove", "Doe, Jane", "Jane Doe"],
        Settings::default(),
    );

    assert_eq!(result, Err(exitcode::USAGE));
}

#[test]
fn given_configured_data_file_when_no_flag_then_uses_config() {
    let (_temp, path) = setup();
    let settings = Settings {
        data_file: Some(path.into()),
        auto_flag: false,
    };

    assert_eq!(run(&["forensic", "count", "--unflagged"], settings), Ok(()));
}

#[test]
fn given_no_data_file_when_running_then_usage_error() {
    let result = run(&["forensic", "flag"], Settings::default());

    assert_eq!(result, Err(exitcode::USAGE));
}

#[test]
fn given_missing_data_file_when_running_then_noinput() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("absent.txt");

    let result = run(
        &["forensic", "-f", path.to_str().unwrap(), "flag"],
        Settings::default(),
    );

    assert_eq!(result, Err(exitcode::NOINPUT));
}

#[test]
fn given_malformed_data_file_when_running_then_dataerr() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("broken.txt");
    std::fs::write(&path, "AAAA\nCCCC\n1\nJane\n").unwrap();

    let result = run(
        &["forensic", "-f", path.to_str().unwrap(), "unmarked"],
        Settings::default(),
    );

    assert_eq!(result, Err(exitcode::DATAERR));
}

#[test]
fn given_config_template_when_running_then_succeeds() {
    assert_eq!(
        run(&["forensic", "config", "template"], Settings::default()),
        Ok(())
    );
}
