/// What the reader does with a malformed record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorPolicy {
    /// Skip malformed records and resync at the next `@` line.
    Skip,
    /// Return the first error to the caller (strict).
    Return,
}

/// How sequence/quality lines are laid out in FASTQ.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineMode {
    /// Sequence and quality occupy exactly one line each.
    Single,
    /// Sequence/quality may span multiple lines (general FASTQ).
    Multi,
}

#[derive(Debug, Clone)]
pub struct ReaderOptions {
    pub error_policy: ErrorPolicy,
    pub line_mode: LineMode,
}

impl Default for ReaderOptions {
    fn default() -> Self {
        Self {
            error_policy: ErrorPolicy::Return,
            line_mode: LineMode::Multi,
        }
    }
}

/// What the run loop does with a read shorter than `umi_length + linker_length`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShortReadPolicy {
    /// Stop the run at the first short read.
    #[default]
    Abort,
    /// Log the read, drop it and keep going.
    Skip,
}
