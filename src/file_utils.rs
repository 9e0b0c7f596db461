use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;
use crate::errors::{ExtractError, ExtractResult};

// @module: File and directory utilities

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_file()
    }

    // @checks: Directory existence
    pub fn dir_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_dir()
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> ExtractResult<()> {
        let path = path.as_ref();
        if !path.as_os_str().is_empty() && !path.exists() {
            fs::create_dir_all(path).map_err(|e| ExtractError::processing(path, e))?;
        }
        Ok(())
    }

    // @generates: Sibling output path, final extension replaced by the suffix
    // @example: movie.ass + "_english.txt" -> movie_english.txt
    pub fn generate_output_path<P: AsRef<Path>>(input_file: P, suffix: &str) -> PathBuf {
        let input_file = input_file.as_ref();
        let stem = input_file.file_stem().unwrap_or_default();

        let mut output_filename = stem.to_string_lossy().to_string();
        output_filename.push_str(suffix);

        input_file.with_file_name(output_filename)
    }

    /// Find files whose extension is one of `extensions` (case-insensitive,
    /// with or without the leading dot), sorted by path
    pub fn find_files<P: AsRef<Path>>(dir: P, extensions: &[String]) -> ExtractResult<Vec<PathBuf>> {
        let dir = dir.as_ref();
        let normalized: Vec<&str> = extensions
            .iter()
            .map(|ext| ext.trim_start_matches('.'))
            .collect();

        let mut result = Vec::new();
        for entry in WalkDir::new(dir).follow_links(true).sort_by_file_name() {
            let entry = entry.map_err(|e| {
                let path = e.path().map(Path::to_path_buf).unwrap_or_else(|| dir.to_path_buf());
                ExtractError::processing(path, e.into())
            })?;
            let path = entry.path();

            if path.is_file() {
                if let Some(ext) = path.extension() {
                    let ext = ext.to_string_lossy();
                    if normalized.iter().any(|wanted| ext.eq_ignore_ascii_case(wanted)) {
                        result.push(path.to_path_buf());
                    }
                }
            }
        }

        Ok(result)
    }

    /// Write lines to a file, one per line, replacing any previous content
    pub fn write_lines<P: AsRef<Path>, S: AsRef<str>>(path: P, lines: &[S]) -> ExtractResult<()> {
        let path = path.as_ref();

        // Ensure the parent directory exists
        if let Some(parent) = path.parent() {
            Self::ensure_dir(parent)?;
        }

        let write = || -> std::io::Result<()> {
            let mut writer = BufWriter::new(File::create(path)?);
            for line in lines {
                writeln!(writer, "{}", line.as_ref())?;
            }
            writer.flush()
        };

        write().map_err(|e| ExtractError::processing(path, e))
    }
}
