use crate::error::{FastqError, FormatError, IoContext};
use crate::policy::{ErrorPolicy, LineMode, ReaderOptions};
use crate::record::FastqRecord;
use crate::util::{has_gz_extension, looks_like_gzip, open_file, trim_newline};

#[cfg(feature = "gzip")]
use flate2::read::MultiGzDecoder;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

const READ_BUFFER: usize = 256 * 1024;

/// Sync FASTQ reader (plain/.gz), streaming.
pub struct FastqReader {
    rdr: Box<dyn BufRead + Send>,
    opts: ReaderOptions,
    line_num: u64,
    byte_pos: u64,
    // To support resync after skip: keep a pre-read header if found.
    pending_header: Option<Vec<u8>>,
    line: Vec<u8>,
}

impl FastqReader {
    /// Open from a file path. Auto-detect `.gz` by extension or magic bytes.
    pub fn from_path<P: AsRef<Path>>(path: P, opts: ReaderOptions) -> Result<Self, FastqError> {
        let path = path.as_ref();
        let f = open_file(path).map_err(|e| FastqError::io_err(e, IoContext::START))?;

        let is_gz = has_gz_extension(path) || looks_like_gzip(&f).unwrap_or(false);

        let rdr: Box<dyn BufRead + Send> = if is_gz {
            #[cfg(feature = "gzip")]
            {
                let dec = MultiGzDecoder::new(f);
                Box::new(BufReader::with_capacity(READ_BUFFER, dec))
            }
            #[cfg(not(feature = "gzip"))]
            {
                return Err(FastqError::fmt_err(
                    FormatError::GzipDisabled,
                    IoContext::START,
                ));
            }
        } else {
            #[cfg(feature = "mmap")]
            {
                use memmap2::Mmap;
                use std::io::Cursor;
                // SAFETY: the file is opened read-only and only read through the map.
                let mmap = unsafe { Mmap::map(&f) }
                    .map_err(|e| FastqError::io_err(e, IoContext::START))?;
                Box::new(BufReader::with_capacity(2 * READ_BUFFER, Cursor::new(mmap)))
            }
            #[cfg(not(feature = "mmap"))]
            {
                Box::new(BufReader::with_capacity(READ_BUFFER, f))
            }
        };
        log::debug!(
            "opened {} ({})",
            path.display(),
            if is_gz { "gzip" } else { "plain" }
        );

        Ok(Self::with_reader(rdr, opts))
    }

    /// Wrap an arbitrary `BufRead` (stdin, etc.).
    pub fn from_bufread<R: BufRead + Send + 'static>(reader: R, opts: ReaderOptions) -> Self {
        Self::with_reader(Box::new(reader), opts)
    }

    fn with_reader(rdr: Box<dyn BufRead + Send>, opts: ReaderOptions) -> Self {
        Self {
            rdr,
            opts,
            line_num: 0,
            byte_pos: 0,
            pending_header: None,
            line: Vec::with_capacity(256),
        }
    }

    /// Iterator-style `next` record.
    pub fn next(&mut self) -> Option<Result<FastqRecord, FastqError>> {
        loop {
            match self.read_one() {
                Ok(Some(rec)) => return Some(Ok(rec)),
                Ok(None) => return None,
                Err(err) => {
                    if self.opts.error_policy == ErrorPolicy::Skip {
                        log::warn!("skipping malformed record: {err}");
                        match self.resync_to_next_header() {
                            Ok(true) => continue,
                            Ok(false) => return None, // EOF
                            Err(e) => return Some(Err(e)),
                        }
                    } else {
                        return Some(Err(err));
                    }
                }
            }
        }
    }

    fn read_line(rdr: &mut dyn BufRead, buf: &mut Vec<u8>) -> io::Result<usize> {
        buf.clear();
        let n = rdr.read_until(b'\n', buf)?;
        trim_newline(buf);
        Ok(n)
    }

    /// Read the next line into `self.line`; `UnexpectedEof` at end of input.
    fn next_line(&mut self) -> Result<(), FastqError> {
        let n = Self::read_line(self.rdr.as_mut(), &mut self.line)
            .map_err(|e| FastqError::io_err(e, self.ctx()))?;
        if n == 0 {
            return Err(FastqError::fmt_err(FormatError::UnexpectedEof, self.ctx()));
        }
        self.advance(n);
        Ok(())
    }

    #[inline]
    fn advance(&mut self, n: usize) {
        self.line_num += 1;
        self.byte_pos += n as u64;
    }

    fn read_one(&mut self) -> Result<Option<FastqRecord>, FastqError> {
        let header = match self.pending_header.take() {
            Some(h) => h,
            None => {
                // seek first non-empty line
                let mut h = Vec::with_capacity(128);
                loop {
                    let n = Self::read_line(self.rdr.as_mut(), &mut h)
                        .map_err(|e| FastqError::io_err(e, self.ctx()))?;
                    if n == 0 {
                        return Ok(None);
                    }
                    self.advance(n);
                    if !h.is_empty() {
                        break;
                    }
                }
                h
            }
        };

        match header.first() {
            Some(b'@') => {}
            Some(b'>') => {
                return Err(FastqError::fmt_err(
                    FormatError::FastaHeaderDetected,
                    self.ctx(),
                ));
            }
            _ => return Err(FastqError::fmt_err(FormatError::MissingHeader, self.ctx())),
        }
        let (name, comment) = split_header(&header[1..]);

        let (seq, qual) = match self.opts.line_mode {
            LineMode::Single => {
                self.next_line()?;
                let seq = self.line.clone();

                self.next_line()?;
                if self.line.first() != Some(&b'+') {
                    return Err(FastqError::fmt_err(FormatError::MissingPlus, self.ctx()));
                }

                self.next_line()?;
                (seq, self.line.clone())
            }
            LineMode::Multi => {
                // Sequence runs until the '+' line.
                let mut seq = Vec::<u8>::with_capacity(256);
                loop {
                    self.next_line()?;
                    if self.line.first() == Some(&b'+') {
                        break;
                    }
                    seq.extend_from_slice(&self.line);
                }

                // Quality runs until it is as long as the sequence.
                let mut qual = Vec::<u8>::with_capacity(seq.len());
                while qual.len() < seq.len() {
                    self.next_line()?;
                    qual.extend_from_slice(&self.line);
                }
                (seq, qual)
            }
        };

        if qual.len() != seq.len() {
            return Err(FastqError::fmt_err(
                FormatError::LengthMismatch {
                    seq: seq.len(),
                    qual: qual.len(),
                },
                self.ctx(),
            ));
        }

        Ok(Some(FastqRecord {
            name,
            comment,
            seq,
            qual,
        }))
    }

    /// Resynchronize to next header line starting with '@'.
    /// Returns true if a header was found and stored in `pending_header`,
    /// false at EOF. Read failures are passed on, never treated as EOF.
    fn resync_to_next_header(&mut self) -> Result<bool, FastqError> {
        let mut buf = Vec::with_capacity(256);
        loop {
            let n = Self::read_line(self.rdr.as_mut(), &mut buf)
                .map_err(|e| FastqError::io_err(e, self.ctx()))?;
            if n == 0 {
                return Ok(false);
            }
            self.advance(n);
            if buf.first() == Some(&b'@') {
                self.pending_header = Some(buf);
                return Ok(true);
            }
        }
    }

    #[inline]
    fn ctx(&self) -> IoContext {
        IoContext {
            byte_pos: self.byte_pos,
            line_num: self.line_num,
        }
    }
}

/// Split a header (without `@`) at its first space or tab into name and comment.
fn split_header(header: &[u8]) -> (Vec<u8>, Vec<u8>) {
    match header.iter().position(|&b| b == b' ' || b == b'\t') {
        Some(i) => {
            (header[..i].to_vec(), header[i + 1..].to_vec())
        }
        None => (header.to_vec(), Vec::new()),
    }
}

impl Iterator for FastqReader {
    type Item = Result<FastqRecord, FastqError>;
    fn next(&mut self) -> Option<Self::Item> {
        FastqReader::next(self)
    }
}

#[cfg(test)]
mod tests {
    use super::split_header;

    #[test]
    fn header_split_at_first_whitespace() {
        assert_eq!(
            split_header(b"r1 1:N:0:ACGT  rest "),
            (b"r1".to_vec(), b"1:N:0:ACGT  rest ".to_vec())
        );
        assert_eq!(split_header(b"r1\tx"), (b"r1".to_vec(), b"x".to_vec()));
        assert_eq!(split_header(b"r1"), (b"r1".to_vec(), Vec::new()));
        assert_eq!(split_header(b"r1 "), (b"r1".to_vec(), Vec::new()));
    }
}
