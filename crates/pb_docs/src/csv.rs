use anyhow::{Context, Result};
use pb_core::ExportError;
use std::io::Write;

fn output(err: impl std::fmt::Display) -> ExportError {
    ExportError::Output(err.to_string())
}

/// Streaming CSV writer for exports.
///
/// Fields are quoted only when they contain a delimiter, quote or line break;
/// records end with `\n`. `None` fields are written empty.
pub struct CsvOutput<W: Write> {
    writer: csv::Writer<W>,
    rows: usize,
}

impl<W: Write> CsvOutput<W> {
    pub fn new(out: W) -> Self {
        let writer = csv::WriterBuilder::new()
            .has_headers(false)
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(out);
        Self { writer, rows: 0 }
    }

    /// Writes the header record. Not counted as a row.
    pub fn header(&mut self, headers: &[&str]) -> Result<()> {
        self.writer
            .write_record(headers)
            .map_err(output)
            .context("Failed to write header record")
    }

    /// Writes one data record.
    pub fn row(&mut self, fields: &[Option<&str>]) -> Result<()> {
        self.writer
            .write_record(fields.iter().map(|field| field.unwrap_or_default()))
            .map_err(output)
            .context("Failed to write data record")?;
        self.rows += 1;
        Ok(())
    }

    /// Flushes buffered output and returns the number of data records.
    pub fn finish(mut self) -> Result<usize> {
        self.writer
            .flush()
            .map_err(output)
            .context("Failed to flush CSV writer")?;
        Ok(self.rows)
    }
}

/// Parse a CSV string into headers and rows.
///
/// The first record is treated as the header row.
pub fn parse_csv(input: &str) -> Result<(Vec<String>, Vec<Vec<String>>)> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(input.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .context("Failed to read CSV headers")?
        .iter()
        .map(String::from)
        .collect();

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result.context("Failed to read CSV record")?;
        let row: Vec<String> = record.iter().map(String::from).collect();
        rows.push(row);
    }

    Ok((headers, rows))
}
