/// One raw FASTQ record as produced by [`FastqReader`](crate::FastqReader).
///
/// Name and comment are kept as bytes; an empty `comment` means the header
/// carried none.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FastqRecord {
    pub name: Vec<u8>,
    pub comment: Vec<u8>,
    pub seq: Vec<u8>,
    pub qual: Vec<u8>,
}

impl FastqRecord {
    #[inline]
    pub fn len(&self) -> usize {
        self.seq.len()
    }
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.seq.is_empty()
    }
    #[inline]
    pub fn has_comment(&self) -> bool {
        !self.comment.is_empty()
    }

    /// Lossy UTF-8 view of the name, for diagnostics.
    pub fn name_lossy(&self) -> String {
        String::from_utf8_lossy(&self.name).into_owned()
    }

    /// Append `@name[ comment]\n` to `out`.
    pub fn header_into(&self, out: &mut Vec<u8>) {
        out.push(b'@');
        out.extend_from_slice(&self.name);
        if self.has_comment() {
            out.push(b' ');
            out.extend_from_slice(&self.comment);
        }
        out.push(b'\n');
    }

    /// Number of bytes [`header_into`](Self::header_into) writes.
    #[inline]
    pub fn header_len(&self) -> usize {
        let comment = if self.has_comment() {
            self.comment.len() + 1
        } else {
            0
        };
        self.name.len() + comment + 2
    }
}
