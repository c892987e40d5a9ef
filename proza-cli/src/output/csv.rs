//! Comma-separated output formatter

use super::{RowFormatter, COLUMNS};
use ::csv::{Terminator, Writer, WriterBuilder};
use anyhow::Result;
use proza_engine::ChunkRow;
use std::io::Write;

/// CSV formatter with RFC 4180 quoting and CRLF line ends
pub struct CsvFormatter<W: Write> {
    writer: Writer<W>,
    header_pending: bool,
}

impl<W: Write> CsvFormatter<W> {
    /// Create a new CSV formatter
    pub fn new(writer: W, header: bool) -> Self {
        let writer = WriterBuilder::new()
            .terminator(Terminator::CRLF)
            .has_headers(false)
            .from_writer(writer);
        Self {
            writer,
            header_pending: header,
        }
    }

    fn write_header(&mut self) -> Result<()> {
        if self.header_pending {
            self.writer.write_record(COLUMNS)?;
            self.header_pending = false;
        }
        Ok(())
    }
}

impl<W: Write> RowFormatter for CsvFormatter<W> {
    fn write_row(&mut self, row: &ChunkRow) -> Result<()> {
        self.write_header()?;
        let frequency = row.frequency.to_string();
        self.writer
            .write_record([&row.doc_id, &row.chunk_id, &row.term, &row.pos, &frequency])?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.write_header()?;
        self.writer.flush()?;
        Ok(())
    }
}
