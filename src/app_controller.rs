use anyhow::Result;
use log::{error, info, warn, debug};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use indicatif::{ProgressBar, ProgressStyle};
use crate::app_config::Config;
use crate::errors::ExtractError;
use crate::file_utils::FileManager;
use crate::subtitle_processor::extract_to;

// @module: Application controller for subtitle extraction

/// Outcome of extracting a single file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionSummary {
    pub input: PathBuf,
    pub output: PathBuf,
    pub extracted: usize,
}

/// Outcome of a folder run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FolderSummary {
    /// Files extracted successfully
    pub processed: usize,
    /// Files that failed; their errors were logged
    pub failed: usize,
    /// Lines written across all processed files
    pub extracted: usize,
}

/// Main application controller for English dialogue extraction
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Output path used when the caller gives none
    pub fn default_output_path(&self, input_file: &Path) -> PathBuf {
        FileManager::generate_output_path(input_file, &self.config.output_suffix)
    }

    /// Extract one subtitle file, overwriting the output
    pub fn run(&self, input_file: PathBuf, output_file: Option<PathBuf>) -> Result<ExtractionSummary> {
        let output = output_file.unwrap_or_else(|| self.default_output_path(&input_file));

        let lines = extract_to(&input_file, &output)?;

        if lines.is_empty() {
            warn!("No English dialogue found in {:?}", input_file);
        }
        debug!("Wrote {} lines to {:?}", lines.len(), output);

        Ok(ExtractionSummary {
            input: input_file,
            output,
            extracted: lines.len(),
        })
    }

    /// Extract every subtitle file found under a directory.
    ///
    /// Files are processed in path order. A failing file is logged and
    /// counted; the rest of the folder still runs. Two inputs sharing a stem
    /// (`movie.ass`, `movie.ssa`) map to the same output; only the first is
    /// extracted and the later one counts as failed.
    pub fn run_folder(&self, input_dir: PathBuf) -> Result<FolderSummary> {
        if !FileManager::dir_exists(&input_dir) {
            return Err(ExtractError::InputNotFound(input_dir).into());
        }

        let files = FileManager::find_files(&input_dir, &self.config.subtitle_extensions)?;
        if files.is_empty() {
            warn!("No subtitle files found in directory: {:?}", input_dir);
            return Ok(FolderSummary::default());
        }

        info!("Found {} subtitle file(s) in {:?}", files.len(), input_dir);

        let progress_bar = ProgressBar::new(files.len() as u64);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress_bar.set_style(style.progress_chars("█▓▒░"));

        let mut summary = FolderSummary::default();
        let mut claimed_outputs: HashSet<PathBuf> = HashSet::new();
        for file in files {
            progress_bar.set_message(
                file.file_name().map(|n| n.to_string_lossy().to_string()).unwrap_or_default()
            );

            let output = self.default_output_path(&file);
            if !claimed_outputs.insert(output.clone()) {
                progress_bar.suspend(|| {
                    error!("Skipping {:?}: output {:?} already written by another file in this batch", file, output)
                });
                summary.failed += 1;
                progress_bar.inc(1);
                continue;
            }

            match self.run(file.clone(), Some(output)) {
                Ok(result) => {
                    progress_bar.suspend(|| {
                        info!("{:?}: {} lines -> {:?}", file, result.extracted, result.output)
                    });
                    summary.processed += 1;
                    summary.extracted += result.extracted;
                }
                Err(e) => {
                    progress_bar.suspend(|| error!("Error processing file {:?}: {:#}", file, e));
                    summary.failed += 1;
                }
            }

            progress_bar.inc(1);
        }
        progress_bar.finish_and_clear();

        Ok(summary)
    }
}
