//! Output formatting module

use anyhow::{Context, Result};
use proza_engine::ChunkRow;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Trait for chunk row formatters
pub trait RowFormatter {
    /// Format and output a single row
    fn write_row(&mut self, row: &ChunkRow) -> Result<()>;

    /// Finalize output (e.g., close JSON array)
    fn finish(&mut self) -> Result<()>;
}

pub mod csv;
pub mod json;
pub mod tsv;

pub use self::csv::CsvFormatter;
pub use json::JsonFormatter;
pub use tsv::TsvFormatter;

/// Column names shared by the delimited formats
pub const COLUMNS: [&str; 5] = ["doc_id", "chunk_id", "term", "pos", "frequency"];

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Tab-separated values with a header line
    Tsv,
    /// Comma-separated values with RFC 4180 quoting
    Csv,
    /// JSON array of row objects
    Json,
}

impl OutputFormat {
    /// All formats with a short description
    pub const ALL: [(OutputFormat, &'static str); 3] = [
        (OutputFormat::Tsv, "tab-separated rows (default)"),
        (OutputFormat::Csv, "comma-separated rows, RFC 4180 quoting"),
        (OutputFormat::Json, "JSON array of row objects"),
    ];

    /// Name as accepted on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Tsv => "tsv",
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
        }
    }
}

/// Build the formatter for `format` on top of `writer`
pub fn create_formatter<'w, W: Write + 'w>(
    format: OutputFormat,
    writer: W,
    header: bool,
) -> Box<dyn RowFormatter + 'w> {
    match format {
        OutputFormat::Tsv => Box::new(TsvFormatter::new(writer, header)),
        OutputFormat::Csv => Box::new(CsvFormatter::new(writer, header)),
        OutputFormat::Json => Box::new(JsonFormatter::new(writer)),
    }
}

/// Buffered writer to `path`, or stdout when no path is given
pub fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>> {
    match path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(BufWriter::new(io::stdout().lock()))),
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use proza_engine::ChunkRow;

    pub fn row(term: &str, frequency: usize) -> ChunkRow {
        ChunkRow {
            doc_id: "boek".to_string(),
            chunk_id: "boek-chunk-001".to_string(),
            term: term.to_string(),
            pos: "NOUN".to_string(),
            frequency,
        }
    }
}
