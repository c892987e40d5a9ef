//! JSON output formatter

use super::RowFormatter;
use anyhow::Result;
use proza_engine::ChunkRow;
use std::io::Write;

/// JSON formatter - outputs rows as JSON array
pub struct JsonFormatter<W: Write> {
    writer: W,
    rows: Vec<ChunkRow>,
}

impl<W: Write> JsonFormatter<W> {
    /// Create a new JSON formatter
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            rows: Vec::new(),
        }
    }
}

impl<W: Write> RowFormatter for JsonFormatter<W> {
    fn write_row(&mut self, row: &ChunkRow) -> Result<()> {
        self.rows.push(row.clone());
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        serde_json::to_writer_pretty(&mut self.writer, &self.rows)?;
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}
