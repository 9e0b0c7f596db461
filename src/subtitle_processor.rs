use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use regex::Regex;
use once_cell::sync::Lazy;
use log::{debug, trace};
use crate::errors::{ExtractError, ExtractResult};
use crate::file_utils::FileManager;

// @module: ASS/SSA dialogue parsing and English run extraction

/// Prefix identifying subtitle event lines
pub const DIALOGUE_PREFIX: &str = "Dialogue:";

/// Number of comma separated fields in a dialogue record, text included
pub const DIALOGUE_FIELD_COUNT: usize = 10;

/// Suffix appended to the input stem when no output path is given
pub const DEFAULT_OUTPUT_SUFFIX: &str = "_english.txt";

const BYTE_ORDER_MARK: char = '\u{feff}';

// @const: `\N` followed by two style tag groups, capturing the rest of the payload
static ENGLISH_RUN_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\\N\{[^}]+\}\{[^}]+\}(.+?)$").unwrap()
});


/// A `Dialogue:` line split into its metadata fields and text payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogueRecord<'a> {
    fields: [&'a str; DIALOGUE_FIELD_COUNT - 1],
    payload: &'a str,
}

impl<'a> DialogueRecord<'a> {
    /// Parse a subtitle line as a dialogue record.
    ///
    /// Returns `None` for lines without the `Dialogue:` prefix and for
    /// records with fewer than ten fields. Only the first nine commas split,
    /// so commas inside the text payload survive.
    pub fn parse(line: &'a str) -> Option<Self> {
        if !is_dialogue_line(line) {
            return None;
        }

        let mut parts = line.splitn(DIALOGUE_FIELD_COUNT, ',');
        let mut fields = [""; DIALOGUE_FIELD_COUNT - 1];
        for field in fields.iter_mut() {
            *field = parts.next()?;
        }
        let payload = parts.next()?.trim();

        Some(Self { fields, payload })
    }

    /// Metadata fields (layer, start, end, style, ...) exactly as written
    pub fn fields(&self) -> &[&'a str] {
        &self.fields
    }

    /// Trimmed text payload
    pub fn payload(&self) -> &'a str {
        self.payload
    }
}

/// Check for the dialogue prefix
pub fn is_dialogue_line(line: &str) -> bool {
    line.starts_with(DIALOGUE_PREFIX)
}

/// True when the text has nothing worth keeping: no letter, number or `_`.
///
/// Numbers include vulgar fractions and other `No` characters; a lone
/// combining mark does not count as a word character.
pub fn is_degenerate(text: &str) -> bool {
    !text.chars().any(is_word_char)
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Split text into lines on `\r\n`, `\n` or a lone `\r`.
///
/// Terminators are dropped and a trailing terminator does not produce an
/// extra empty line, as with `str::lines`.
pub fn split_lines(text: &str) -> SplitLines<'_> {
    SplitLines { rest: text }
}

/// Iterator returned by [`split_lines`]
#[derive(Debug, Clone)]
pub struct SplitLines<'a> {
    rest: &'a str,
}

impl<'a> Iterator for SplitLines<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        if self.rest.is_empty() {
            return None;
        }

        match self.rest.find(['\r', '\n']) {
            None => {
                let line = self.rest;
                self.rest = "";
                Some(line)
            }
            Some(end) => {
                let line = &self.rest[..end];
                let terminator = if self.rest[end..].starts_with("\r\n") { 2 } else { 1 };
                self.rest = &self.rest[end + terminator..];
                Some(line)
            }
        }
    }
}

/// Pull the English run out of a dialogue payload.
///
/// The run is whatever follows the first `\N{...}{...}` sequence, trimmed.
/// Degenerate runs yield `None`.
pub fn extract_english_run(payload: &str) -> Option<&str> {
    let text = capture_english_run(payload)?;
    if is_degenerate(text) {
        None
    } else {
        Some(text)
    }
}

fn capture_english_run(payload: &str) -> Option<&str> {
    ENGLISH_RUN_REGEX
        .captures(payload)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
}

/// What happened to a single input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineOutcome {
    /// Not a `Dialogue:` line
    NotDialogue,
    /// Dialogue line with fewer than ten fields
    Malformed,
    /// Payload carries no `\N{...}{...}` marker
    NoEnglishRun,
    /// Marker found but the run is empty or punctuation only
    Degenerate,
    /// English text kept for output
    Extracted(String),
}

impl LineOutcome {
    /// Classify one subtitle line
    pub fn classify(line: &str) -> Self {
        if !is_dialogue_line(line) {
            return Self::NotDialogue;
        }

        let Some(record) = DialogueRecord::parse(line) else {
            return Self::Malformed;
        };

        match capture_english_run(record.payload()) {
            None => Self::NoEnglishRun,
            Some(text) if is_degenerate(text) => Self::Degenerate,
            Some(text) => Self::Extracted(text.to_string()),
        }
    }
}

/// Extract the English text of a single line, if it has any
pub fn extract_line(line: &str) -> Option<String> {
    match LineOutcome::classify(line) {
        LineOutcome::Extracted(text) => Some(text),
        _ => None,
    }
}

/// Counters collected during one extraction pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractionStats {
    pub lines: usize,
    pub dialogue_lines: usize,
    pub malformed: usize,
    pub unmatched: usize,
    pub degenerate: usize,
    pub extracted: usize,
}

impl ExtractionStats {
    fn record(&mut self, outcome: &LineOutcome) {
        self.lines += 1;
        match outcome {
            LineOutcome::NotDialogue => return,
            LineOutcome::Malformed => self.malformed += 1,
            LineOutcome::NoEnglishRun => self.unmatched += 1,
            LineOutcome::Degenerate => self.degenerate += 1,
            LineOutcome::Extracted(_) => self.extracted += 1,
        }
        self.dialogue_lines += 1;
    }
}

impl fmt::Display for ExtractionStats {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} lines, {} dialogue, {} extracted ({} malformed, {} without English run, {} degenerate)",
            self.lines, self.dialogue_lines, self.extracted,
            self.malformed, self.unmatched, self.degenerate
        )
    }
}

/// Ordered English lines pulled from one subtitle file
#[derive(Debug, Default)]
pub struct EnglishLines {
    /// Source filename, when read from disk
    pub source_file: Option<PathBuf>,

    /// Extracted lines in input order
    pub lines: Vec<String>,

    /// Counters for the pass that produced `lines`
    pub stats: ExtractionStats,
}

impl EnglishLines {
    /// Create an empty collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Read and extract from a subtitle file
    pub fn from_file<P: AsRef<Path>>(path: P) -> ExtractResult<Self> {
        let path = path.as_ref();
        if !FileManager::file_exists(path) {
            return Err(ExtractError::InputNotFound(path.to_path_buf()));
        }

        let file = File::open(path).map_err(|e| ExtractError::processing(path, e))?;
        let mut lines = Self::from_reader(BufReader::new(file))
            .map_err(|e| ExtractError::processing(path, e))?;
        lines.source_file = Some(path.to_path_buf());

        debug!("{:?}: {}", path, lines.stats);
        Ok(lines)
    }

    /// Extract from any buffered reader; fails on I/O or invalid UTF-8.
    ///
    /// Input is consumed one `\n`-terminated chunk at a time; a `\r\n` pair
    /// always stays inside one chunk, so lone `\r` breaks split correctly.
    pub fn from_reader<R: BufRead>(mut reader: R) -> std::io::Result<Self> {
        let mut collection = Self::new();
        let mut buf = Vec::new();
        let mut index = 0;

        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            let chunk = std::str::from_utf8(&buf)
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
            for line in split_lines(chunk) {
                collection.push_line(index, line);
                index += 1;
            }
        }

        Ok(collection)
    }

    /// Extract from subtitle content already in memory
    pub fn parse_str(content: &str) -> Self {
        let mut collection = Self::new();
        for (index, line) in split_lines(content).enumerate() {
            collection.push_line(index, line);
        }
        collection
    }

    fn push_line(&mut self, index: usize, line: &str) {
        let line = if index == 0 {
            line.trim_start_matches(BYTE_ORDER_MARK)
        } else {
            line
        };

        let outcome = LineOutcome::classify(line);
        self.stats.record(&outcome);
        match outcome {
            LineOutcome::Extracted(text) => self.lines.push(text),
            LineOutcome::NotDialogue => {}
            skipped => trace!("Line {} skipped: {:?}", index + 1, skipped),
        }
    }

    /// Write one line per entry, each newline terminated
    pub fn write_to_file<P: AsRef<Path>>(&self, path: P) -> ExtractResult<()> {
        FileManager::write_lines(path, self.lines.as_slice())
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }
}

impl fmt::Display for EnglishLines {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for line in &self.lines {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

/// Extract English dialogue from `input_path` into `output_path`.
///
/// Without an output path the result goes next to the input, named
/// `<stem>_english.txt`. The output is only created once the whole input
/// has been read, so a missing or unreadable input leaves nothing behind.
/// Returns the number of lines written.
pub fn extract<P: AsRef<Path>>(input_path: P, output_path: Option<&Path>) -> ExtractResult<usize> {
    let input_path = input_path.as_ref();
    let output_path = match output_path {
        Some(path) => path.to_path_buf(),
        None => FileManager::generate_output_path(input_path, DEFAULT_OUTPUT_SUFFIX),
    };

    extract_to(input_path, &output_path).map(|lines| lines.len())
}

/// Read `input_path` completely, then write its English lines to
/// `output_path`. Returns the collection that was written.
pub fn extract_to(input_path: &Path, output_path: &Path) -> ExtractResult<EnglishLines> {
    let lines = EnglishLines::from_file(input_path)?;
    lines.write_to_file(output_path)?;
    Ok(lines)
}
