//! End-to-end CLI tests for chatlens.
//!
//! These tests verify the complete CLI workflow by running the actual binary
//! with various arguments and checking the output.
//!
//! # Test Categories
//!
//! - **Basic functionality**: parsing and on-screen reports
//! - **Output formats**: text, JSON, CSV files
//! - **Flags**: filter, locale and cutoff options
//! - **Error handling**: proper messages for bad input
//!
//! # Running Tests
//!
//! ```bash
//! cargo test --test cli_e2e
//! ```

#![cfg(feature = "cli")]

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::{TempDir, tempdir};

// ============================================================================
// Test Fixtures
// ============================================================================

/// Creates a temporary directory with transcript fixtures.
fn setup_fixtures() -> TempDir {
    let dir = tempdir().expect("Failed to create temp dir");

    let chat = "\
12/08/23, 14:05 - Alice: Hello there
12/08/23, 14:06 - Bob: Hi Alice! 🍕
12/08/23, 14:07 - Bob: <Media omitted>
12/08/23, 14:08 - Alice: see http://a.co and http://b.co
12/08/23, 14:09 - Alice added Carol";
    fs::write(dir.path().join("chat.txt"), chat).unwrap();

    let us_chat = "\
1/15/24, 10:30 AM - Alice: Hello everyone!
1/15/24, 10:31 AM - Bob: Hi Alice!
1/15/24, 9:45 PM - Alice: good night";
    fs::write(dir.path().join("us_chat.txt"), us_chat).unwrap();

    let german_chat = "12/08/23, 14:05 - Bob: <Medien ausgeschlossen>";
    fs::write(dir.path().join("german_chat.txt"), german_chat).unwrap();

    let notes = "shopping list\nmilk\neggs";
    fs::write(dir.path().join("notes.txt"), notes).unwrap();

    fs::write(dir.path().join("stopwords.txt"), "hello\nthere\n").unwrap();

    dir
}

fn chatlens_cmd() -> Command {
    let cmd = std::process::Command::new(env!("CARGO_BIN_EXE_chatlens"));
    Command::from_std(cmd)
}

fn output_path(dir: &TempDir, name: &str) -> PathBuf {
    dir.path().join(name)
}

// ============================================================================
// Basic Functionality Tests
// ============================================================================

mod basic_functionality {
    use super::*;

    #[test]
    fn test_text_report_to_stdout() {
        let fixtures = setup_fixtures();
        let input = fixtures.path().join("chat.txt");

        chatlens_cmd()
            .arg(input.to_str().unwrap())
            .assert()
            .success()
            .stdout(predicate::str::contains("chatlens v"))
            .stdout(predicate::str::contains("Found 5 messages"))
            .stdout(predicate::str::contains("Chat analysis for Overall"))
            .stdout(predicate::str::contains("Messages:  5"))
            .stdout(predicate::str::contains("Busiest senders"));
    }

    #[test]
    fn test_user_filter() {
        let fixtures = setup_fixtures();
        let input = fixtures.path().join("chat.txt");

        chatlens_cmd()
            .args([input.to_str().unwrap(), "--user", "Alice"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Chat analysis for Alice"))
            .stdout(predicate::str::contains("Messages:  2"))
            .stdout(predicate::str::contains("Busiest senders").not());
    }

    #[test]
    fn test_unknown_user_warns_but_succeeds() {
        let fixtures = setup_fixtures();
        let input = fixtures.path().join("chat.txt");

        chatlens_cmd()
            .args([input.to_str().unwrap(), "--user", "Nobody"])
            .assert()
            .success()
            .stdout(predicate::str::contains("No messages from 'Nobody'"))
            .stdout(predicate::str::contains("Messages:  0"));
    }

    #[test]
    fn test_month_first_flag() {
        let fixtures = setup_fixtures();
        let input = fixtures.path().join("us_chat.txt");

        chatlens_cmd()
            .args([input.to_str().unwrap(), "--month-first"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Found 3 messages"))
            .stdout(predicate::str::contains("January 2024"));
    }

    #[test]
    fn test_media_placeholder_flag() {
        let fixtures = setup_fixtures();
        let input = fixtures.path().join("german_chat.txt");

        chatlens_cmd()
            .args([
                input.to_str().unwrap(),
                "--media-placeholder",
                "<Medien ausgeschlossen>",
            ])
            .assert()
            .success()
            .stdout(predicate::str::contains("Media:     1"));
    }
}

// ============================================================================
// Output Format Tests
// ============================================================================

mod output_formats {
    use super::*;

    #[test]
    fn test_text_report_to_file() {
        let fixtures = setup_fixtures();
        let input = fixtures.path().join("chat.txt");
        let output = output_path(&fixtures, "report.txt");

        chatlens_cmd()
            .args([input.to_str().unwrap(), "-o", output.to_str().unwrap()])
            .assert()
            .success()
            .stdout(predicate::str::contains("Done! Report saved to"))
            .stdout(predicate::str::contains("Summary:"));

        let content = fs::read_to_string(&output).unwrap();
        assert!(content.contains("Chat analysis for Overall"));
        assert!(content.contains("August 2023"));
    }

    #[cfg(feature = "json-output")]
    #[test]
    fn test_json_report_to_file() {
        let fixtures = setup_fixtures();
        let input = fixtures.path().join("chat.txt");
        let output = output_path(&fixtures, "report.json");

        chatlens_cmd()
            .args([
                input.to_str().unwrap(),
                "--format",
                "json",
                "-o",
                output.to_str().unwrap(),
            ])
            .assert()
            .success();

        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
        assert_eq!(value["filter"], "Overall");
        assert_eq!(value["stats"]["message_count"], 5);
        assert_eq!(value["stats"]["media_count"], 1);
        assert_eq!(value["stats"]["link_count"], 2);
    }

    #[cfg(feature = "csv-output")]
    #[test]
    fn test_csv_report_to_file() {
        let fixtures = setup_fixtures();
        let input = fixtures.path().join("chat.txt");
        let output = output_path(&fixtures, "report.csv");

        chatlens_cmd()
            .args([
                input.to_str().unwrap(),
                "--format",
                "csv",
                "-o",
                output.to_str().unwrap(),
            ])
            .assert()
            .success();

        let content = fs::read_to_string(&output).unwrap();
        assert!(content.starts_with("section,label,value"));
        assert!(content.contains("stats,message_count,5"));
        assert!(content.contains("busy_users,Alice,2"));
    }

    #[cfg(feature = "json-output")]
    #[test]
    fn test_json_to_stdout() {
        let fixtures = setup_fixtures();
        let input = fixtures.path().join("chat.txt");

        let assert = chatlens_cmd()
            .args([input.to_str().unwrap(), "--format", "json"])
            .assert()
            .success();

        let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
        let json_start = stdout.find('{').unwrap();
        let value: serde_json::Value = serde_json::from_str(&stdout[json_start..]).unwrap();
        assert_eq!(value["stats"]["message_count"], 5);
    }

    #[test]
    fn test_txt_format_alias() {
        let fixtures = setup_fixtures();
        let input = fixtures.path().join("chat.txt");

        chatlens_cmd()
            .args([input.to_str().unwrap(), "--format", "txt"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Chat analysis for Overall"));
    }
}

// ============================================================================
// Cutoff and Stop-Word Flags
// ============================================================================

#[cfg(feature = "json-output")]
mod cutoff_flags {
    use super::*;

    #[test]
    fn test_top_words_override() {
        let fixtures = setup_fixtures();
        let input = fixtures.path().join("chat.txt");
        let output = output_path(&fixtures, "report.json");

        chatlens_cmd()
            .args([
                input.to_str().unwrap(),
                "--format",
                "json",
                "--top-words",
                "1",
                "-o",
                output.to_str().unwrap(),
            ])
            .assert()
            .success();

        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
        assert_eq!(value["top_words"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_top_senders_override() {
        let fixtures = setup_fixtures();
        let input = fixtures.path().join("chat.txt");
        let output = output_path(&fixtures, "report.json");

        chatlens_cmd()
            .args([
                input.to_str().unwrap(),
                "--format",
                "json",
                "--top-senders",
                "1",
                "-o",
                output.to_str().unwrap(),
            ])
            .assert()
            .success();

        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
        let top = value["busy_users"]["top"].as_array().unwrap();
        assert_eq!(top.len(), 1);
        assert_eq!(top[0][0], "Alice");
        // Shares stay complete regardless of the cutoff.
        assert_eq!(value["busy_users"]["shares"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_stopwords_file() {
        let fixtures = setup_fixtures();
        let input = fixtures.path().join("chat.txt");
        let stopwords = fixtures.path().join("stopwords.txt");
        let output = output_path(&fixtures, "report.json");

        chatlens_cmd()
            .args([
                input.to_str().unwrap(),
                "--format",
                "json",
                "--stopwords",
                stopwords.to_str().unwrap(),
                "-o",
                output.to_str().unwrap(),
            ])
            .assert()
            .success()
            .stdout(predicate::str::contains("Stop words: 2 entries"));

        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
        let words: Vec<&str> = value["top_words"]
            .as_array()
            .unwrap()
            .iter()
            .map(|pair| pair[0].as_str().unwrap())
            .collect();
        assert!(!words.contains(&"hello"));
        assert!(words.contains(&"alice"));
    }
}

// ============================================================================
// Error Handling Tests
// ============================================================================

mod error_handling {
    use super::*;

    #[test]
    fn test_missing_input_file() {
        chatlens_cmd()
            .arg("/nonexistent/chat.txt")
            .assert()
            .failure()
            .stderr(predicate::str::contains("Error"));
    }

    #[test]
    fn test_headerless_file_fails() {
        let fixtures = setup_fixtures();
        let input = fixtures.path().join("notes.txt");

        chatlens_cmd()
            .arg(input.to_str().unwrap())
            .assert()
            .failure()
            .stderr(predicate::str::contains("header"));
    }

    #[test]
    fn test_invalid_format_value() {
        let fixtures = setup_fixtures();
        let input = fixtures.path().join("chat.txt");

        chatlens_cmd()
            .args([input.to_str().unwrap(), "--format", "yaml"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("invalid value"));
    }

    #[test]
    fn test_no_args_shows_usage() {
        chatlens_cmd()
            .assert()
            .failure()
            .stderr(predicate::str::contains("Usage"));
    }

    #[test]
    fn test_help_shows_examples() {
        chatlens_cmd()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("EXAMPLES:"))
            .stdout(predicate::str::contains("--user"));
    }

    #[test]
    fn test_version() {
        chatlens_cmd()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    }
}
