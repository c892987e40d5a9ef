//! Tab-separated output formatter

use super::{RowFormatter, COLUMNS};
use anyhow::Result;
use csv::{QuoteStyle, Writer, WriterBuilder};
use proza_engine::ChunkRow;
use std::io::Write;

/// TSV formatter - one row per line
///
/// Fields holding a tab, a quote or a line break are quoted the way
/// spreadsheet tools read them back.
pub struct TsvFormatter<W: Write> {
    writer: Writer<W>,
    header_pending: bool,
}

impl<W: Write> TsvFormatter<W> {
    /// Create a new TSV formatter
    pub fn new(writer: W, header: bool) -> Self {
        let writer = WriterBuilder::new()
            .delimiter(b'\t')
            .quote_style(QuoteStyle::Necessary)
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

impl<W: Write> RowFormatter for TsvFormatter<W> {
    fn write_row(&mut self, row: &ChunkRow) -> Result<()> {
        self.write_header()?;
        let frequency = row.frequency.to_string();
        self.writer
            .write_record([&row.doc_id, &row.chunk_id, &row.term, &row.pos, &frequency])?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        // an empty result still gets its header
        self.write_header()?;
        self.writer.flush()?;
        Ok(())
    }
}
