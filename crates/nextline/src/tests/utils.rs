use std::{collections::VecDeque, io};

use bstr::BString;

use crate::{Descriptor, Line, LineReader, ReaderOptions, Source};

/// In-memory source that hands out its payload in preset read sizes.
///
/// Once `splits` runs out every read returns as much as fits.
#[derive(Debug)]
pub(crate) struct ChunkedSource {
    descriptor: Descriptor,
    data: Vec<u8>,
    pos: usize,
    splits: VecDeque<usize>,
    pub(crate) reads: usize,
}

impl ChunkedSource {
    pub(crate) fn new(descriptor: i32, data: &[u8]) -> Self {
        Self::with_splits(descriptor, data, [])
    }

    pub(crate) fn with_splits(
        descriptor: i32,
        data: &[u8],
        splits: impl IntoIterator<Item = usize>,
    ) -> Self {
        Self {
            descriptor: Descriptor::from(descriptor),
            data: data.to_vec(),
            pos: 0,
            splits: splits.into_iter().collect(),
            reads: 0,
        }
    }

    pub(crate) fn remaining(&self) -> &[u8] {
        &self.data[self.pos..]
    }
}

impl Source for ChunkedSource {
    fn descriptor(&self) -> Descriptor {
        self.descriptor
    }

    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.reads += 1;
        let want = self.splits.pop_front().unwrap_or(usize::MAX).max(1);
        let n = want.min(buf.len()).min(self.data.len() - self.pos);
        buf[..n].copy_from_slice(&self.data[self.pos..self.pos + n]);
        self.pos += n;
        Ok(n)
    }
}

/// Source that serves `data`, then fails `failures` times, then reports end
/// of input.
#[derive(Debug)]
pub(crate) struct FlakySource {
    inner: ChunkedSource,
    failures: usize,
    kind: io::ErrorKind,
}

impl FlakySource {
    pub(crate) fn new(data: &[u8], failures: usize, kind: io::ErrorKind) -> Self {
        Self {
            inner: ChunkedSource::new(3, data),
            failures,
            kind,
        }
    }
}

impl FlakySource {
    pub(crate) fn reads(&self) -> usize {
        self.inner.reads
    }
}

impl Source for FlakySource {
    fn descriptor(&self) -> Descriptor {
        self.inner.descriptor()
    }

    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.inner.remaining().is_empty() && self.failures > 0 {
            self.failures -= 1;
            return Err(io::Error::new(self.kind, "injected failure"));
        }
        self.inner.read(buf)
    }
}

pub(crate) fn reader_with_buffer(buffer_size: usize) -> LineReader {
    LineReader::with_options(ReaderOptions {
        buffer_size,
        ..Default::default()
    })
}

/// Call `read_line` until the final line and return every result.
pub(crate) fn read_all<S: Source>(reader: &mut LineReader, mut source: S) -> Vec<Line> {
    let mut out = Vec::new();
    loop {
        let line = reader.read_line(&mut source).unwrap();
        reader.assert_invariants();
        let done = line.is_final();
        out.push(line);
        if done {
            return out;
        }
    }
}

pub(crate) fn complete(s: &str) -> Line {
    Line::Complete(BString::from(s))
}

pub(crate) fn last(s: &str) -> Line {
    Line::Final(BString::from(s))
}
