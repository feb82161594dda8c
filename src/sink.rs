use crate::format::LineFormat;
use crate::record::Record;
use std::error::Error;
use std::io::Write;

/// Synchronous destination for admitted [`Record`]s.
///
/// Implementations own the rendering and transport of one record at a time;
/// the driver loop calls `emit` in arrival order and `flush` once the stream
/// ends, on both the clean and the error path.
pub trait RecordSink {
    /// Write a single admitted record.
    ///
    /// **Returns**
    /// - `Ok(())` if the record was written.
    /// - `Err(..)` if the destination failed. The driver treats this as
    ///   fatal; there is no retry.
    fn emit(&mut self, record: &Record) -> Result<(), Box<dyn Error + Send + Sync>>;

    /// Flush anything the destination buffers. Default is a no-op.
    fn flush(&mut self) -> Result<(), Box<dyn Error + Send + Sync>> {
        Ok(())
    }
}

/// Writes one formatted line per record to an output stream.
pub struct LineSink<W: Write, F: LineFormat> {
    out: W,
    format: F,
}

impl<W: Write, F: LineFormat> LineSink<W, F> {
    /// Unbuffered writers should be wrapped in a `BufWriter`; every record
    /// costs two writes.
    pub fn new(out: W, format: F) -> Self {
        LineSink { out, format }
    }
}

impl<W: Write, F: LineFormat> RecordSink for LineSink<W, F> {
    fn emit(&mut self, record: &Record) -> Result<(), Box<dyn Error + Send + Sync>> {
        let line = self.format.format_line(record);
        self.out.write_all(line.as_bytes())?;
        self.out.write_all(b"\n")?;
        Ok(())
    }

    fn flush(&mut self) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.out.flush()?;
        Ok(())
    }
}

/// A sink that simply drops all records.
///
/// Useful for measuring the overhead of the pipeline itself without any
/// output I/O, and for tests that only care about admission counts.
#[derive(Clone, Copy, Default)]
pub struct DiscardSink;

impl RecordSink for DiscardSink {
    fn emit(&mut self, _record: &Record) -> Result<(), Box<dyn Error + Send + Sync>> {
        Ok(())
    }
}
