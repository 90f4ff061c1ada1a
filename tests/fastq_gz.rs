use synthbar::{
    FastqReader, ReaderOptions, RecordTransformer, ShortReadPolicy, TransformConfig, open_output,
    run,
};
use std::fs::File;
use std::io::{Read, Write};
use tempfile::tempdir;

#[cfg(feature = "gzip")]
#[test]
fn parse_gz_file_multi_member() {
    let dir = tempdir().unwrap();
    // no .gz extension: detection must come from the magic bytes
    let path = dir.path().join("sample.fastq");
    {
        let mut f = File::create(&path).unwrap();
        for (name, seq) in [("x", "ACGT"), ("y", "GG")] {
            let mut enc = flate2::write::GzEncoder::new(Vec::new(), flate2::Compression::fast());
            writeln!(enc, "@{name}").unwrap();
            writeln!(enc, "{seq}").unwrap();
            writeln!(enc, "+").unwrap();
            writeln!(enc, "{}", "!".repeat(seq.len())).unwrap();
            f.write_all(&enc.finish().unwrap()).unwrap();
        }
    }

    let mut fq = FastqReader::from_path(&path, ReaderOptions::default()).expect("open gz");

    let rec = fq.next().unwrap().unwrap();
    assert_eq!(rec.name, b"x");
    assert_eq!(rec.seq, b"ACGT");
    assert_eq!(rec.qual, b"!!!!");
    let rec = fq.next().unwrap().unwrap();
    assert_eq!(rec.name, b"y");
    assert!(fq.next().is_none());
}

#[cfg(feature = "gzip")]
#[test]
fn gz_in_gz_out() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("in.fastq.gz");
    let output = dir.path().join("out.fastq.gz");
    {
        let f = File::create(&input).unwrap();
        let mut enc = flate2::write::GzEncoder::new(f, flate2::Compression::fast());
        write!(enc, "@r1 1:N:0\nAAAACCCGGGG\n+\nABCDEFGHIJK\n").unwrap();
        enc.finish().unwrap();
    }

    let config = TransformConfig::builder()
        .barcode("TT")
        .umi_length(4)
        .linker_length(3)
        .remove_linker(true)
        .build()
        .unwrap();
    let reader = FastqReader::from_path(&input, ReaderOptions::default()).unwrap();
    let mut sink = open_output(Some(output.as_path())).unwrap();
    let mut t = RecordTransformer::new(config);
    let summary = run(reader, &mut t, &mut sink, ShortReadPolicy::Abort).unwrap();
    assert_eq!(summary.records, 1);
    drop(sink);

    let mut text = String::new();
    flate2::read::MultiGzDecoder::new(File::open(&output).unwrap())
        .read_to_string(&mut text)
        .unwrap();
    assert_eq!(text, "@r1 1:N:0\nTTAAAAGGGG\n+\nIIABCDHIJK\n");
}
