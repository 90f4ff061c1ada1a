//! Single-pass run loop: source -> transformer -> sink, one record at a time.

use crate::error::{FastqError, SynthbarError, TransformError};
use crate::policy::{ReaderOptions, ShortReadPolicy};
use crate::reader::FastqReader;
use crate::record::FastqRecord;
use crate::transform::RecordTransformer;
use crate::writer::FastqSink;

use std::path::Path;
use std::time::{Duration, Instant};

/// Open the input FASTQ, mapping a failed open to [`SynthbarError::Open`].
pub fn open_input(path: &Path, opts: ReaderOptions) -> Result<FastqReader, SynthbarError> {
    FastqReader::from_path(path, opts).map_err(|e| match e {
        FastqError::Io { source, .. } => SynthbarError::Open {
            what: "input",
            path: path.display().to_string(),
            source,
        },
        other => other.into(),
    })
}

/// Open the output sink; `None` or `-` is stdout.
pub fn open_output(path: Option<&Path>) -> Result<FastqSink, SynthbarError> {
    FastqSink::create(path).map_err(|source| SynthbarError::Open {
        what: "output",
        path: path.map_or_else(|| "-".to_string(), |p| p.display().to_string()),
        source,
    })
}

/// Counts and timing for a completed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub records: u64,
    pub skipped: u64,
    pub elapsed: Duration,
}

/// Transform every record of `records` into `sink`.
///
/// Output order equals input order. With [`ShortReadPolicy::Abort`] the first
/// short read ends the run; what was already written stays written (the sink
/// is flushed before the error is returned).
pub fn run<I>(
    records: I,
    transformer: &mut RecordTransformer,
    sink: &mut FastqSink,
    policy: ShortReadPolicy,
) -> Result<RunSummary, SynthbarError>
where
    I: IntoIterator<Item = Result<FastqRecord, FastqError>>,
{
    let start = Instant::now();
    let mut summary = RunSummary {
        records: 0,
        skipped: 0,
        elapsed: Duration::ZERO,
    };

    let outcome = process(records, transformer, sink, policy, &mut summary);
    let flushed = sink.finish().map_err(SynthbarError::Output);
    summary.elapsed = start.elapsed();
    outcome?;
    flushed?;

    log::debug!(
        "wrote {} records ({} skipped) to {}",
        summary.records,
        summary.skipped,
        sink.dest()
            .map_or_else(|| "stdout".to_string(), |p| p.display().to_string())
    );
    Ok(summary)
}

fn process<I>(
    records: I,
    transformer: &mut RecordTransformer,
    sink: &mut FastqSink,
    policy: ShortReadPolicy,
    summary: &mut RunSummary,
) -> Result<(), SynthbarError>
where
    I: IntoIterator<Item = Result<FastqRecord, FastqError>>,
{
    for rec in records {
        let rec = rec?;
        match transformer.transform(&rec) {
            Ok(bytes) => {
                sink.write_record(bytes).map_err(SynthbarError::Output)?;
                summary.records += 1;
            }
            Err(err @ TransformError::ReadTooShort { .. }) if policy == ShortReadPolicy::Skip => {
                log::warn!("skipping: {err}");
                summary.skipped += 1;
            }
            Err(err) => return Err(err.into()),
        }
    }
    Ok(())
}

/// Wall time as `S.mmm seconds`.
pub fn format_duration(d: Duration) -> String {
    format!("{:.3} seconds", d.as_secs_f64())
}
