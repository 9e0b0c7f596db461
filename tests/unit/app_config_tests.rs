/*!
 * Tests for application configuration
 */

use anyhow::Result;
use engsub::app_config::{Config, LogLevel};
use engsub::errors::ExtractError;
use log::LevelFilter;
use crate::common;

#[test]
fn test_default_config_shouldBeValid() {
    let config = Config::default();
    assert_eq!(config.output_suffix, "_english.txt");
    assert_eq!(config.subtitle_extensions, vec!["ass".to_string(), "ssa".to_string()]);
    assert_eq!(config.log_level, LogLevel::Info);
    assert!(config.validate().is_ok());
}

#[test]
fn test_from_file_withPartialJson_shouldFillDefaults() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "conf.json", r#"{ "log_level": "debug" }"#)?;

    let config = Config::from_file(&path)?;
    assert_eq!(config.log_level, LogLevel::Debug);
    assert_eq!(config.output_suffix, "_english.txt");
    Ok(())
}

#[test]
fn test_from_file_withAllFields_shouldLoadThem() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let json = r#"{ "output_suffix": ".en.txt", "subtitle_extensions": ["ass"], "log_level": "warn" }"#;
    let path = common::create_test_file(temp_dir.path(), "conf.json", json)?;

    let config = Config::from_file(&path)?;
    assert_eq!(config.output_suffix, ".en.txt");
    assert_eq!(config.subtitle_extensions, vec!["ass".to_string()]);
    assert_eq!(config.log_level, LogLevel::Warn);
    Ok(())
}

#[test]
fn test_from_file_withMissingOrBrokenFile_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    assert!(Config::from_file(temp_dir.path().join("missing.json")).is_err());

    let path = common::create_test_file(temp_dir.path(), "broken.json", "{ not json")?;
    let err = Config::from_file(&path).unwrap_err();
    assert!(format!("{:#}", err).contains("Failed to parse config file"));
    Ok(())
}

#[test]
fn test_validate_withBadValues_shouldReturnConfigError() {
    let bad_configs = [
        Config { output_suffix: String::new(), ..Config::default() },
        Config { output_suffix: "/english.txt".to_string(), ..Config::default() },
        Config { subtitle_extensions: Vec::new(), ..Config::default() },
        Config { subtitle_extensions: vec![".".to_string()], ..Config::default() },
    ];

    for config in bad_configs {
        let err = config.validate().unwrap_err();
        assert!(
            matches!(err.downcast_ref::<ExtractError>(), Some(ExtractError::Config(_))),
            "expected config error for {:?}",
            config
        );
    }
}

#[test]
fn test_log_level_toLevelFilter_shouldMapEachLevel() {
    assert_eq!(LogLevel::Error.to_level_filter(), LevelFilter::Error);
    assert_eq!(LogLevel::Warn.to_level_filter(), LevelFilter::Warn);
    assert_eq!(LogLevel::Info.to_level_filter(), LevelFilter::Info);
    assert_eq!(LogLevel::Debug.to_level_filter(), LevelFilter::Debug);
    assert_eq!(LogLevel::Trace.to_level_filter(), LevelFilter::Trace);
}
