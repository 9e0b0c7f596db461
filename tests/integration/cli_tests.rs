/*!
 * Tests for the engsub command line interface
 */

use std::fs;
use std::process::{Command, Output};
use anyhow::Result;
use crate::common;

fn engsub(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_engsub"))
        .args(args)
        .output()
        .expect("Failed to run engsub binary")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

#[test]
fn test_cli_withoutArguments_shouldPrintUsageAndExitOne() {
    let output = engsub(&[]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).contains("usage: engsub <input_file> [output_file]"));
}

#[test]
fn test_cli_withInputOnly_shouldWriteDefaultOutput() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_subtitle(temp_dir.path(), "movie.ass")?;

    let output = engsub(&[input.to_str().unwrap()]);

    assert!(output.status.success());
    let expected_path = temp_dir.path().join("movie_english.txt");
    let out = stdout(&output);
    assert!(out.contains("extracted 3 lines"));
    assert!(out.contains(&format!("output file: {}", expected_path.display())));
    assert_eq!(fs::read_to_string(expected_path)?, "Hello\nHow are you, friend?\nBye.\n");
    Ok(())
}

#[test]
fn test_cli_withExplicitOutput_shouldWriteThere() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_subtitle(temp_dir.path(), "movie.ass")?;
    let target = temp_dir.path().join("lines.txt");

    let output = engsub(&[input.to_str().unwrap(), target.to_str().unwrap()]);

    assert!(output.status.success());
    assert!(target.exists());
    assert!(!temp_dir.path().join("movie_english.txt").exists());
    Ok(())
}

#[test]
fn test_cli_withMissingInput_shouldFailWithoutOutput() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = temp_dir.path().join("nope.ass");

    let output = engsub(&[input.to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("input file not found"));
    assert!(!temp_dir.path().join("nope_english.txt").exists());
    Ok(())
}

#[test]
fn test_cli_withConfigSuffix_shouldApplyIt() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_subtitle(temp_dir.path(), "movie.ass")?;
    let config = common::create_test_file(temp_dir.path(), "conf.json", r#"{ "output_suffix": ".en.txt" }"#)?;

    let output = engsub(&["--config", config.to_str().unwrap(), input.to_str().unwrap()]);

    assert!(output.status.success());
    assert!(temp_dir.path().join("movie.en.txt").exists());
    Ok(())
}

#[test]
fn test_cli_batch_shouldProcessFolder() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::create_test_subtitle(temp_dir.path(), "a.ass")?;
    common::create_test_subtitle(temp_dir.path(), "b.ssa")?;

    let output = engsub(&["batch", temp_dir.path().to_str().unwrap()]);

    assert!(output.status.success());
    assert!(stdout(&output).contains("processed 2 files (0 failed), extracted 6 lines"));
    assert!(temp_dir.path().join("a_english.txt").exists());
    assert!(temp_dir.path().join("b_english.txt").exists());
    Ok(())
}

#[test]
fn test_cli_completions_shouldPrintScript() {
    let output = engsub(&["completions", "bash"]);

    assert!(output.status.success());
    let script = stdout(&output);
    assert!(!script.is_empty());
    assert!(script.contains("engsub"));
}
