#![no_main]
use std::io;

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use nextline::{Descriptor, LineReader, ReaderOptions, Source};

#[derive(Debug, Arbitrary)]
struct Input {
    buffer_size: u16,
    line_capacity: u8,
    /// Sizes of successive reads; zero entries are bumped to one.
    splits: Vec<u8>,
    /// Index of a read that fails instead of returning data.
    fail_at: Option<u8>,
    payload: Vec<u8>,
}

/// Serves `payload` in the read sizes picked by the fuzzer.
struct SplitSource<'a> {
    payload: &'a [u8],
    splits: &'a [u8],
    fail_at: Option<usize>,
    reads: usize,
}

impl Source for SplitSource<'_> {
    fn descriptor(&self) -> Descriptor {
        Descriptor::new(1)
    }

    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let index = self.reads;
        self.reads += 1;
        if self.fail_at == Some(index) {
            return Err(io::Error::other("injected"));
        }
        let want = self
            .splits
            .get(index)
            .map_or(usize::MAX, |&s| usize::from(s).max(1));
        let n = want.min(buf.len()).min(self.payload.len());
        buf[..n].copy_from_slice(&self.payload[..n]);
        self.payload = &self.payload[n..];
        Ok(n)
    }
}

fn run(input: &Input) {
    let mut reader = LineReader::with_options(ReaderOptions {
        buffer_size: usize::from(input.buffer_size),
        initial_line_capacity: usize::from(input.line_capacity),
    });
    let mut source = SplitSource {
        payload: &input.payload,
        splits: &input.splits,
        fail_at: input.fail_at.map(usize::from),
        reads: 0,
    };

    let mut rejoined = Vec::with_capacity(input.payload.len());
    let mut failed = false;
    loop {
        let result = reader.read_line(&mut source);
        reader.assert_invariants();
        match result {
            Ok(line) => {
                assert!(!line.as_bytes().contains(&b'\n'));
                rejoined.extend_from_slice(line.as_bytes());
                if line.is_final() {
                    break;
                }
                rejoined.push(b'\n');
            }
            Err(err) => {
                // The partial line is gone, so the output can no longer be
                // compared against the payload.
                assert!(err.discarded() <= input.payload.len());
                assert_eq!(reader.failed(), Some(err.kind()));
                let reads = source.reads;
                assert!(reader.read_line(&mut source).is_err());
                assert_eq!(source.reads, reads);
                failed = true;
                break;
            }
        }
    }

    if !failed {
        assert_eq!(rejoined, input.payload);
    }
}

fuzz_target!(|input: Input| run(&input));
