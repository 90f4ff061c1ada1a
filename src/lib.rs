//! Splice a synthetic barcode into every read of a FASTQ stream.
//!
//! - Plain and `.gz` input (auto-detect), `.gz` or plain output.
//! - Streaming, record-by-record, one reusable output buffer.
//! - Optional UMI relocation next to the barcode and linker removal.
//! - Reads too short for UMI + linker abort the run (or are skipped on request).
//! - `zlib` feature for the system zlib backend, `mmap` for mapped plain input.

pub mod buffer;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod policy;
pub mod reader;
pub mod record;
pub mod transform;
pub mod writer;
mod util;

pub use crate::buffer::OutputBuffer;
pub use crate::config::{TransformConfig, TransformConfigBuilder, checked_length};
pub use crate::error::{
    ConfigError, FastqError, FormatError, IoContext, SynthbarError, TransformError,
};
pub use crate::pipeline::{RunSummary, format_duration, open_input, open_output, run};
pub use crate::policy::{ErrorPolicy, LineMode, ReaderOptions, ShortReadPolicy};
pub use crate::reader::FastqReader;
pub use crate::record::FastqRecord;
pub use crate::transform::{BARCODE_QUALITY, RecordTransformer, ShortRead, SpliceLayout};
pub use crate::writer::FastqSink;
