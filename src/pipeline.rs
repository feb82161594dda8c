use crate::decode::{DecodeError, EventStream};
use crate::filter::SeverityFilter;
use crate::mapping::RecordMapper;
use crate::sink::RecordSink;
use std::error::Error;
use std::io;

/// Counters kept by one pipeline run, reported once the stream stops.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    /// Events decoded off the input stream.
    pub decoded: u64,
    /// Records that passed the severity filter and were emitted.
    pub admitted: u64,
    /// Records the filter discarded.
    pub suppressed: u64,
    /// Field-validation warnings across all events.
    pub warnings: u64,
}

/// Fatal condition that stopped the pipeline. Output emitted before the
/// failure has already been flushed and remains valid.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("decoding the log stream failed: {0}")]
    Decode(#[from] DecodeError),
    #[error("writing a rendered record failed: {0}")]
    Sink(#[source] Box<dyn Error + Send + Sync>),
}

impl PipelineError {
    /// True when the output consumer went away mid-stream (e.g. piped into
    /// `head`), which callers conventionally treat as a quiet success.
    pub fn is_broken_pipe(&self) -> bool {
        match self {
            PipelineError::Sink(err) => err
                .downcast_ref::<io::Error>()
                .is_some_and(|io_err| io_err.kind() == io::ErrorKind::BrokenPipe),
            PipelineError::Decode(_) => false,
        }
    }
}

/// Drive the decode → map → filter → emit loop until the input stream ends
/// or a fatal error stops it.
///
/// Exactly one event is in flight at a time; a fresh [`crate::decode::RawEvent`]
/// is produced per decode, so nothing carries over between iterations.
/// Mapper warnings are logged to the diagnostic channel and never interrupt
/// the stream. The sink is flushed on every exit path.
pub fn run<R: io::Read>(
    input: R,
    mapper: &RecordMapper,
    filter: &SeverityFilter,
    sink: &mut dyn RecordSink,
) -> Result<RunStats, PipelineError> {
    let mut events = EventStream::new(input);
    let mut stats = RunStats::default();

    loop {
        let event = match events.next_event() {
            Ok(Some(event)) => event,
            Ok(None) => break,
            Err(err) => {
                let _ = sink.flush();
                return Err(err.into());
            }
        };
        stats.decoded += 1;

        let (record, warnings) = mapper.map(event);
        for warning in &warnings {
            tracing::warn!(
                key = warning.key(),
                raw_val = %warning.raw(),
                raw_type = warning.raw_type(),
                "{warning}"
            );
        }
        stats.warnings += warnings.len() as u64;

        if !filter.admits(&record) {
            stats.suppressed += 1;
            continue;
        }
        if let Err(err) = sink.emit(&record) {
            let _ = sink.flush();
            return Err(PipelineError::Sink(err));
        }
        stats.admitted += 1;
    }

    sink.flush().map_err(PipelineError::Sink)?;
    Ok(stats)
}
