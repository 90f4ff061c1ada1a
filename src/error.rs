use std::collections::TryReserveError;
use std::io;
use thiserror::Error;

#[derive(Debug, Clone, Copy)]
pub struct IoContext {
    pub byte_pos: u64,
    pub line_num: u64,
}

impl IoContext {
    pub(crate) const START: Self = Self {
        byte_pos: 0,
        line_num: 0,
    };
}

#[derive(Debug, Error)]
pub enum FormatError {
    #[error("expected header '@' at start of record")]
    MissingHeader,
    #[error("found FASTA header '>' where FASTQ '@' expected")]
    FastaHeaderDetected,
    #[error("missing '+' separator line")]
    MissingPlus,
    #[error("unexpected EOF inside record")]
    UnexpectedEof,
    #[error("quality length ({qual}) does not match sequence length ({seq})")]
    LengthMismatch { seq: usize, qual: usize },
    #[error("gzip input found but crate built without the `gzip` feature")]
    GzipDisabled,
}

/// Errors raised while pulling records from the input stream.
#[derive(Debug, Error)]
pub enum FastqError {
    #[error("I/O error at {ctx:?}: {source}")]
    Io {
        #[source]
        source: io::Error,
        ctx: IoContext,
    },
    #[error("format error at {ctx:?}: {source}")]
    Format {
        #[source]
        source: FormatError,
        ctx: IoContext,
    },
}

impl FastqError {
    pub(crate) fn io_err(source: io::Error, ctx: IoContext) -> Self {
        Self::Io { source, ctx }
    }
    pub(crate) fn fmt_err(source: FormatError, ctx: IoContext) -> Self {
        Self::Format { source, ctx }
    }
}

/// Invalid run configuration, detected before any record is read.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("barcode must not be empty")]
    EmptyBarcode,
    #[error("--{option} must be >= 0 (got {value})")]
    NegativeLength { option: &'static str, value: i64 },
    #[error("--{option} is too large (got {value})")]
    LengthOverflow { option: &'static str, value: i64 },
}

#[derive(Debug, Error)]
pub enum TransformError {
    #[error(
        "read {name} not long enough for UMI and linker lengths provided ({len}<{required})"
    )]
    ReadTooShort {
        name: String,
        len: usize,
        required: usize,
    },
    #[error("read {name} quality length ({qual}) does not match sequence length ({seq})")]
    LengthMismatch {
        name: String,
        seq: usize,
        qual: usize,
    },
    #[error("failed to grow output buffer: {0}")]
    Allocation(#[from] TryReserveError),
}

/// Top-level error of a synthbar run. Every variant is fatal.
#[derive(Debug, Error)]
pub enum SynthbarError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("cannot open {what} {path}: {source}")]
    Open {
        what: &'static str,
        path: String,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Input(#[from] FastqError),
    #[error(transparent)]
    Transform(#[from] TransformError),
    #[error("failed writing output: {0}")]
    Output(#[source] io::Error),
}
