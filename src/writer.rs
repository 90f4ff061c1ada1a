use crate::util::{has_gz_extension, is_std_stream};

use flate2::Compression;
use flate2::write::GzEncoder;
use std::fs::File;
use std::io::{self, BufWriter, Stdout, Write};
use std::path::{Path, PathBuf};

const WRITE_BUFFER: usize = 256 * 1024;

/// Destination for formatted records: stdout, a plain file, or a `.gz` file.
pub struct FastqSink {
    dest: Option<PathBuf>,
    inner: SinkInner,
}

enum SinkInner {
    Stdout(BufWriter<Stdout>),
    File(BufWriter<File>),
    Gzip(GzEncoder<BufWriter<File>>),
    Memory(Vec<u8>),
}

impl FastqSink {
    /// Open the output. `None` or `-` selects stdout; a `.gz` path is gzip
    /// compressed on the fly.
    pub fn create(path: Option<&Path>) -> io::Result<Self> {
        let Some(path) = path.filter(|p| !is_std_stream(p)) else {
            return Ok(Self {
                dest: None,
                inner: SinkInner::Stdout(BufWriter::with_capacity(WRITE_BUFFER, io::stdout())),
            });
        };
        let f = BufWriter::with_capacity(WRITE_BUFFER, File::create(path)?);
        let inner = if has_gz_extension(path) {
            SinkInner::Gzip(GzEncoder::new(f, Compression::default()))
        } else {
            SinkInner::File(f)
        };
        Ok(Self {
            dest: Some(path.to_path_buf()),
            inner,
        })
    }

    /// Collect output in memory (tests, embedding).
    pub fn memory() -> Self {
        Self {
            dest: None,
            inner: SinkInner::Memory(Vec::new()),
        }
    }

    pub fn dest(&self) -> Option<&Path> {
        self.dest.as_deref()
    }

    /// Bytes written so far when backed by memory.
    pub fn contents(&self) -> Option<&[u8]> {
        match &self.inner {
            SinkInner::Memory(v) => Some(v),
            _ => None,
        }
    }

    #[inline]
    pub fn write_record(&mut self, bytes: &[u8]) -> io::Result<()> {
        match &mut self.inner {
            SinkInner::Stdout(w) => w.write_all(bytes),
            SinkInner::File(w) => w.write_all(bytes),
            SinkInner::Gzip(w) => w.write_all(bytes),
            SinkInner::Memory(v) => {
                v.extend_from_slice(bytes);
                Ok(())
            }
        }
    }

    /// Flush buffers and write the gzip trailer if any.
    pub fn finish(&mut self) -> io::Result<()> {
        match &mut self.inner {
            SinkInner::Stdout(w) => w.flush(),
            SinkInner::File(w) => w.flush(),
            SinkInner::Gzip(w) => {
                w.try_finish()?;
                w.get_mut().flush()
            }
            SinkInner::Memory(_) => Ok(()),
        }
    }
}
