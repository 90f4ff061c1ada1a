use synthbar::{ErrorPolicy, FastqReader, LineMode, ReaderOptions};
use std::io::{self, BufReader, Read};

const SAMPLE: &str = "\
@read1 desc more
ACGTN
+
!!!!!
@read2
ACGT
+read2
####";

fn opts(error_policy: ErrorPolicy, line_mode: LineMode) -> ReaderOptions {
    ReaderOptions {
        error_policy,
        line_mode,
    }
}

#[test]
fn parse_two_records_single_line() {
    let rdr = BufReader::new(SAMPLE.as_bytes());
    let mut fq = FastqReader::from_bufread(rdr, opts(ErrorPolicy::Return, LineMode::Single));

    let r1 = fq.next().unwrap().unwrap();
    assert_eq!(r1.name, b"read1");
    assert_eq!(r1.comment, b"desc more");
    assert_eq!(r1.seq, b"ACGTN");
    assert_eq!(r1.qual, b"!!!!!");

    let r2 = fq.next().unwrap().unwrap();
    assert_eq!(r2.name, b"read2");
    assert!(!r2.has_comment());
    assert_eq!(r2.seq, b"ACGT");
    assert_eq!(r2.qual, b"####");

    assert!(fq.next().is_none());
}

#[test]
fn multi_line_records_joined() {
    let wrapped = "\
@r1
ACG
T
+
##
##
@r2
A
+
@
";
    let rdr = BufReader::new(wrapped.as_bytes());
    let recs: Vec<_> = FastqReader::from_bufread(rdr, ReaderOptions::default())
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(recs.len(), 2);
    assert_eq!(recs[0].seq, b"ACGT");
    assert_eq!(recs[0].qual, b"####");
    // a quality line starting with '@' is not a header
    assert_eq!(recs[1].qual, b"@");
}

#[test]
fn multi_line_rejected_in_single_mode() {
    let bad = "\
@r1
ACG
T
+
####
";
    let rdr = BufReader::new(bad.as_bytes());
    let mut fq = FastqReader::from_bufread(rdr, opts(ErrorPolicy::Return, LineMode::Single));
    // second seq line will cause MissingPlus error
    let err = fq.next().unwrap().unwrap_err();
    match err {
        synthbar::FastqError::Format {
            source: synthbar::FormatError::MissingPlus,
            ..
        } => {}
        other => panic!("expected missing '+' error, got {other}"),
    }
}

#[test]
fn length_mismatch_skipped_in_skip_mode() {
    let bad = "\
@r1
ACGT
+
###
@r2
A
+
#";
    let rdr = BufReader::new(bad.as_bytes());
    let mut fq = FastqReader::from_bufread(rdr, opts(ErrorPolicy::Skip, LineMode::Single));

    // r1 malformed -> resync to @r2
    let r = fq.next().unwrap().unwrap();
    assert_eq!(r.name, b"r2");
    assert_eq!(r.seq, b"A");
    assert_eq!(r.qual, b"#");
    assert!(fq.next().is_none());
}

#[test]
fn crlf_and_blank_lines_tolerated() {
    let data = "\r\n@r1 c\r\nAC\r\n+\r\nII\r\n\r\n";
    let rdr = BufReader::new(data.as_bytes());
    let recs: Vec<_> = FastqReader::from_bufread(rdr, ReaderOptions::default())
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(recs.len(), 1);
    assert_eq!(recs[0].comment, b"c");
    assert_eq!(recs[0].seq, b"AC");
    assert_eq!(recs[0].qual, b"II");
}

#[test]
fn truncated_record_is_an_error() {
    let rdr = BufReader::new("@r1\nACGT\n+\n".as_bytes());
    let err = FastqReader::from_bufread(rdr, ReaderOptions::default())
        .next()
        .unwrap()
        .unwrap_err();
    assert!(matches!(
        err,
        synthbar::FastqError::Format {
            source: synthbar::FormatError::UnexpectedEof,
            ..
        }
    ));
}

#[test]
fn fasta_header_rejected() {
    let rdr = BufReader::new(">r1\nACGT\n".as_bytes());
    let err = FastqReader::from_bufread(rdr, ReaderOptions::default())
        .next()
        .unwrap()
        .unwrap_err();
    assert!(matches!(
        err,
        synthbar::FastqError::Format {
            source: synthbar::FormatError::FastaHeaderDetected,
            ..
        }
    ));
}

#[test]
fn comment_trailing_whitespace_kept() {
    let rdr = BufReader::new("@r1 a b \nAC\n+\nII\n".as_bytes());
    let rec = FastqReader::from_bufread(rdr, ReaderOptions::default())
        .next()
        .unwrap()
        .unwrap();
    assert_eq!(rec.name, b"r1");
    assert_eq!(rec.comment, b"a b ");

    let mut header = Vec::new();
    rec.header_into(&mut header);
    assert_eq!(header, b"@r1 a b \n");
}

/// Hands out `data` once, then fails every read.
struct FailAfter {
    data: Option<&'static [u8]>,
}

impl Read for FailAfter {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self.data.take() {
            Some(d) => {
                buf[..d.len()].copy_from_slice(d);
                Ok(d.len())
            }
            None => Err(io::Error::new(io::ErrorKind::InvalidData, "corrupt deflate stream")),
        }
    }
}

#[test]
fn read_error_while_resyncing_is_reported() {
    let rdr = BufReader::new(FailAfter {
        data: Some(b"@r1\nACGT\n+\n###\n"),
    });
    let mut fq = FastqReader::from_bufread(rdr, opts(ErrorPolicy::Skip, LineMode::Single));

    // r1 malformed -> resync hits the failing read
    match fq.next() {
        Some(Err(synthbar::FastqError::Io { source, .. })) => {
            assert_eq!(source.kind(), io::ErrorKind::InvalidData);
        }
        other => panic!("expected I/O error, got {other:?}"),
    }
}
