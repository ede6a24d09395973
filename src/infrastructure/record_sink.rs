//! Record sinks
//!
//! Extracted listings are written one JSON object per line, UTF-8, with
//! non-ASCII text kept as-is.

#![allow(clippy::uninlined_format_args)]

use std::fs::OpenOptions;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};

use crate::domain::ListingRecord;
use crate::infrastructure::config::OutputConfig;

/// Destination for extracted listings
pub trait RecordSink: Send {
    fn write(&mut self, record: &ListingRecord) -> Result<()>;

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}

/// JSON lines writer over any `Write`
pub struct JsonLinesSink<W: Write + Send> {
    writer: W,
    written: usize,
}

impl<W: Write + Send> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, written: 0 }
    }

    /// Records written so far
    pub fn written(&self) -> usize {
        self.written
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl JsonLinesSink<Box<dyn Write + Send>> {
    /// Open the configured output; `-` is stdout
    pub fn open(config: &OutputConfig) -> Result<Self> {
        let writer: Box<dyn Write + Send> = if config.path == Path::new("-") {
            Box::new(BufWriter::new(io::stdout()))
        } else {
            let file = OpenOptions::new()
                .create(true)
                .write(true)
                .append(config.append)
                .truncate(!config.append)
                .open(&config.path)
                .with_context(|| format!("Failed to open output file {}", config.path.display()))?;
            Box::new(BufWriter::new(file))
        };

        tracing::info!("Writing records to {}", config.path.display());
        Ok(Self::new(writer))
    }
}

impl<W: Write + Send> RecordSink for JsonLinesSink<W> {
    fn write(&mut self, record: &ListingRecord) -> Result<()> {
        serde_json::to_writer(&mut self.writer, record)
            .with_context(|| format!("Failed to serialize record {}", record.url))?;
        self.writer.write_all(b"\n").context("Failed to write record separator")?;
        self.written += 1;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush().context("Failed to flush output")
    }
}

/// Collects records in memory
#[derive(Debug, Default)]
pub struct MemorySink {
    pub records: Vec<ListingRecord>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RecordSink for MemorySink {
    fn write(&mut self, record: &ListingRecord) -> Result<()> {
        self.records.push(record.clone());
        Ok(())
    }
}
