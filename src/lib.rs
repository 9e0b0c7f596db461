/*!
 * # engsub - English dialogue extractor for bilingual subtitles
 *
 * Bilingual ASS/SSA subtitles often carry the English line after a forced
 * break and two style overrides, e.g.
 * `こんにちは\N{\fn微软雅黑}{\fs14}Hello there`. This crate pulls those
 * English runs out into a plain text file, one utterance per line.
 *
 * ## Architecture
 *
 * - `subtitle_processor`: dialogue record parsing and English run extraction
 * - `file_utils`: output path derivation, file discovery and writing
 * - `app_config`: optional JSON configuration
 * - `app_controller`: single file and folder runs
 * - `errors`: error types for the library
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod errors;
pub mod file_utils;
pub mod subtitle_processor;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::{Controller, ExtractionSummary, FolderSummary};
pub use errors::{ExtractError, ExtractResult};
pub use subtitle_processor::{extract, extract_to, extract_english_run, extract_line, split_lines, DialogueRecord, EnglishLines};
