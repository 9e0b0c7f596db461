/*!
 * Tests for error types and conversions
 */

use std::error::Error;
use std::io;
use std::path::PathBuf;
use engsub::errors::ExtractError;

#[test]
fn test_inputNotFound_shouldDisplayPath() {
    let error = ExtractError::InputNotFound(PathBuf::from("nope.ass"));
    let display = format!("{}", error);
    assert!(display.contains("input file not found"));
    assert!(display.contains("nope.ass"));
    assert!(error.is_not_found());
}

#[test]
fn test_processing_shouldDisplayPathAndKeepSource() {
    let error = ExtractError::processing(
        "out/english.txt",
        io::Error::new(io::ErrorKind::PermissionDenied, "access denied"),
    );
    let display = format!("{}", error);
    assert!(display.contains("out/english.txt"));
    assert!(display.contains("access denied"));
    assert!(!error.is_not_found());

    let source = error.source().expect("processing error keeps its source");
    assert!(source.to_string().contains("access denied"));
}

#[test]
fn test_config_shouldDisplayMessage() {
    let error = ExtractError::Config("output suffix must not be empty".to_string());
    assert_eq!(error.to_string(), "invalid configuration: output suffix must not be empty");
}

#[test]
fn test_extractError_intoAnyhow_shouldDowncast() {
    let error: anyhow::Error = ExtractError::InputNotFound(PathBuf::from("x.ass")).into();
    assert!(matches!(error.downcast_ref::<ExtractError>(), Some(ExtractError::InputNotFound(_))));
}
