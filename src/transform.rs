//! Per-record splice of the synthetic barcode into a read.
//!
//! For a read of length `L` with UMI length `U` and linker length `K`:
//!
//! ```text
//! input:   [ UMI (U) ][ linker (K) ][ rest ................ ]
//! output:  [ barcode ][ UMI ][ tail ]      (umi_first = false)
//!          [ UMI ][ barcode ][ tail ]      (umi_first = true)
//! ```
//!
//! `tail` starts after the UMI, or after UMI + linker when the linker is
//! removed. Quality strings follow the same layout with a run of `I` under
//! the barcode.

use crate::buffer::OutputBuffer;
use crate::config::TransformConfig;
use crate::error::TransformError;
use crate::record::FastqRecord;

/// Phred+33 quality assigned to every synthetic barcode base (Q40).
pub const BARCODE_QUALITY: u8 = b'I';

/// A read too short to hold UMI + linker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShortRead {
    pub len: usize,
    pub required: usize,
}

/// Where the UMI ends and the carried-through tail starts within one read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpliceLayout {
    pub umi_end: usize,
    pub tail_start: usize,
}

impl SpliceLayout {
    /// Compute the layout for a read of `len` bases.
    ///
    /// Fails with `ReadTooShort` when the linker is removed and the read cannot
    /// hold UMI + linker. Without linker removal a read shorter than the UMI is
    /// taken whole as the UMI and the tail is empty.
    pub fn new(config: &TransformConfig, len: usize) -> Result<Self, ShortRead> {
        if config.remove_linker() && len < config.required_length() {
            return Err(ShortRead {
                len,
                required: config.required_length(),
            });
        }
        Ok(Self {
            umi_end: config.umi_length().min(len),
            tail_start: config.skip().min(len),
        })
    }

    /// Length of the spliced sequence (and quality) line.
    #[inline]
    pub fn spliced_len(&self, barcode_len: usize, len: usize) -> usize {
        self.umi_end + barcode_len + (len - self.tail_start)
    }
}

/// Stateless (modulo config) record transformer owning one reusable output
/// buffer.
#[derive(Debug)]
pub struct RecordTransformer {
    config: TransformConfig,
    barcode_qual: Vec<u8>,
    out: OutputBuffer,
}

impl RecordTransformer {
    pub fn new(config: TransformConfig) -> Self {
        let barcode_qual = vec![BARCODE_QUALITY; config.barcode().len()];
        Self {
            config,
            barcode_qual,
            out: OutputBuffer::with_capacity(1024),
        }
    }

    /// Format one output record. The returned slice borrows the internal
    /// buffer and is valid until the next call.
    pub fn transform(&mut self, rec: &FastqRecord) -> Result<&[u8], TransformError> {
        let len = rec.len();
        if rec.qual.len() != len {
            return Err(TransformError::LengthMismatch {
                name: rec.name_lossy(),
                seq: len,
                qual: rec.qual.len(),
            });
        }
        let layout = SpliceLayout::new(&self.config, len).map_err(|ShortRead { len, required }| {
            TransformError::ReadTooShort {
                name: rec.name_lossy(),
                len,
                required,
            }
        })?;

        let spliced = layout.spliced_len(self.barcode_qual.len(), len);
        self.out.clear();
        // header + seq + "\n+\n" + qual + "\n"
        self.out.reserve(rec.header_len() + 2 * spliced + 4)?;

        rec.header_into(self.out.as_vec_mut());
        splice(
            &mut self.out,
            &rec.seq,
            self.config.barcode(),
            layout,
            self.config.umi_first(),
        );
        self.out.extend(b"\n+\n");
        splice(
            &mut self.out,
            &rec.qual,
            &self.barcode_qual,
            layout,
            self.config.umi_first(),
        );
        self.out.push(b'\n');

        Ok(self.out.as_bytes())
    }
}

fn splice(
    out: &mut OutputBuffer,
    src: &[u8],
    insert: &[u8],
    layout: SpliceLayout,
    umi_first: bool,
) {
    let umi = &src[..layout.umi_end];
    if umi_first {
        out.extend(umi);
        out.extend(insert);
    } else {
        out.extend(insert);
        out.extend(umi);
    }
    out.extend(&src[layout.tail_start..]);
}
