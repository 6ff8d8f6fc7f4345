//! Retained read buffer and line assembly.
//!
//! Overview
//! - `buffer` is a fixed window filled by one `Source::read` per refill.
//!   `buffer[cursor..count]` is the unread part and is the only state that
//!   carries over from one `read_line` call to the next.
//! - Each `read_line` call assembles into a fresh `LineBuilder`, so a long
//!   line grows the builder and never the window.
//! - The window belongs to the descriptor it was filled from. Presenting a
//!   different descriptor drops the unread part before anything is read.
//!
//! Errors
//! - A failed read empties the window and marks the reader as failed. Until
//!   the descriptor changes or the reader is reset, every refill reports the
//!   same error kind without touching the source.

use std::{io, iter::FusedIterator};

use bstr::{BString, ByteSlice};
use tracing::{debug, trace};

use crate::{Descriptor, Line, LineBuilder, ReadError, ReaderOptions, Source};

/// Line reader state that persists across calls.
///
/// Owns a fixed-size read buffer plus the cursor into it. Create one per
/// stream and hand it the same [`Source`] on every call; see
/// [`read_line`](Self::read_line).
#[derive(Debug, Clone)]
pub struct LineReader {
    descriptor: Option<Descriptor>,
    buffer: Box<[u8]>,
    cursor: usize,
    count: usize,
    failed: Option<io::ErrorKind>,
    line_capacity: usize,
}

impl Default for LineReader {
    fn default() -> Self {
        Self::new()
    }
}

impl LineReader {
    /// Create a reader with [`ReaderOptions::default`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_options(ReaderOptions::default())
    }

    /// Create a reader with the given options.
    #[must_use]
    pub fn with_options(options: ReaderOptions) -> Self {
        Self {
            descriptor: None,
            buffer: vec![0; options.effective_buffer_size()].into_boxed_slice(),
            cursor: 0,
            count: 0,
            failed: None,
            line_capacity: options.initial_line_capacity,
        }
    }

    /// Size of the fixed read buffer.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    /// Descriptor the buffered bytes belong to, if any call has been made.
    #[must_use]
    pub fn descriptor(&self) -> Option<Descriptor> {
        self.descriptor
    }

    /// Bytes read from the source but not yet handed out.
    #[must_use]
    pub fn buffered(&self) -> &[u8] {
        &self.buffer[self.cursor..self.count]
    }

    /// Kind of the read error that put this reader in the failed state.
    #[must_use]
    pub fn failed(&self) -> Option<io::ErrorKind> {
        self.failed
    }

    /// Forget the bound descriptor, drop any buffered bytes, and clear a
    /// previous read failure.
    pub fn reset(&mut self) {
        trace!(discarded = self.count - self.cursor, "resetting line reader");
        self.descriptor = None;
        self.cursor = 0;
        self.count = 0;
        self.failed = None;
    }

    /// Associate the buffer with `descriptor`.
    ///
    /// A no-op when `descriptor` is already bound. Otherwise the unread bytes
    /// of the previous descriptor are discarded and a previous read failure
    /// is cleared.
    pub fn bind(&mut self, descriptor: Descriptor) {
        if self.descriptor == Some(descriptor) {
            return;
        }
        trace!(
            from = ?self.descriptor,
            to = %descriptor,
            discarded = self.count - self.cursor,
            "rebinding line reader"
        );
        self.cursor = 0;
        self.count = 0;
        self.failed = None;
        self.descriptor = Some(descriptor);
    }

    /// Read the next chunk from `source` into the buffer.
    ///
    /// Only reads once the buffer is fully consumed; while unread bytes
    /// remain it returns their number without touching the source. Returns
    /// `Ok(0)` at end of input.
    ///
    /// # Errors
    ///
    /// Propagates the source's error, leaving the buffer empty. Once a read
    /// has failed, later refills on the same descriptor fail with the same
    /// error kind and do not read.
    pub fn refill<S: Source + ?Sized>(&mut self, source: &mut S) -> io::Result<usize> {
        self.bind(source.descriptor());
        if let Some(kind) = self.failed {
            return Err(io::Error::new(kind, "an earlier read from this descriptor failed"));
        }
        if self.cursor < self.count {
            return Ok(self.count - self.cursor);
        }

        self.cursor = 0;
        self.count = 0;
        let read = source.read(&mut self.buffer).inspect_err(|err| {
            self.failed = Some(err.kind());
        })?;
        self.count = read.min(self.buffer.len());
        trace!(descriptor = %source.descriptor(), read = self.count, "refilled line buffer");
        Ok(self.count)
    }

    /// Move buffered bytes into `builder` up to the next newline.
    ///
    /// Returns `true` once a newline has been consumed; the newline itself is
    /// not appended. Returns `false` after moving every buffered byte, and
    /// keeps returning `false` without side effects until the next refill.
    pub fn drain_into(&mut self, builder: &mut LineBuilder) -> bool {
        let pending = &self.buffer[self.cursor..self.count];
        if let Some(at) = pending.find_byte(b'\n') {
            builder.extend_from_slice(&pending[..at]);
            self.cursor += at + 1;
            true
        } else {
            builder.extend_from_slice(pending);
            self.cursor = self.count;
            false
        }
    }

    /// Read the next line from `source`.
    ///
    /// Returns [`Line::Complete`] for every newline-terminated line and
    /// [`Line::Final`] once the source reports end of input. The final line
    /// holds the bytes after the last newline and may be empty. Calling again
    /// after [`Line::Final`] reads the source again, which for a regular file
    /// yields another empty final line.
    ///
    /// If `source` has a different descriptor than the previous call, bytes
    /// buffered from the previous source are discarded.
    ///
    /// # Errors
    ///
    /// Returns [`ReadError`] if a read fails. The partially assembled line is
    /// dropped. The failure sticks: later calls with the same descriptor
    /// return an error without reading until [`bind`](Self::bind) sees a
    /// different descriptor or [`reset`](Self::reset) is called.
    pub fn read_line<S: Source>(&mut self, mut source: S) -> Result<Line, ReadError> {
        let descriptor = source.descriptor();
        self.bind(descriptor);
        let mut builder = LineBuilder::with_capacity(self.line_capacity);
        loop {
            if self.drain_into(&mut builder) {
                return Ok(Line::Complete(builder.finish()));
            }
            match self.refill(&mut source) {
                Ok(0) => return Ok(Line::Final(builder.finish())),
                Ok(_) => {}
                Err(err) => {
                    debug!(
                        %descriptor,
                        discarded = builder.len(),
                        error = %err,
                        "line read failed"
                    );
                    return Err(ReadError {
                        source: err,
                        descriptor,
                        discarded: builder.len(),
                    });
                }
            }
        }
    }

    /// Iterate over the remaining lines of `source`.
    ///
    /// Yields lines the way [`std::io::BufRead::lines`] does: input that ends
    /// with a newline does not produce a trailing empty line. Iteration stops
    /// after end of input or after the first error.
    pub fn lines<S: Source>(&mut self, source: S) -> Lines<'_, S> {
        Lines {
            reader: self,
            source,
            done: false,
        }
    }

    /// Check the cursor/count bookkeeping.
    ///
    /// # Panics
    ///
    /// Panics if the cursor runs past the valid bytes or the valid bytes run
    /// past the buffer.
    #[cfg(any(test, feature = "fuzzing"))]
    pub fn assert_invariants(&self) {
        assert!(self.cursor <= self.count, "{} > {}", self.cursor, self.count);
        assert!(self.count <= self.buffer.len());
    }
}

/// Iterator returned by [`LineReader::lines`].
#[derive(Debug)]
pub struct Lines<'a, S> {
    reader: &'a mut LineReader,
    source: S,
    done: bool,
}

impl<S: Source> Iterator for Lines<'_, S> {
    type Item = Result<BString, ReadError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.reader.read_line(&mut self.source) {
            Ok(Line::Complete(line)) => Some(Ok(line)),
            Ok(Line::Final(line)) => {
                self.done = true;
                (!line.is_empty()).then_some(Ok(line))
            }
            Err(err) => {
                self.done = true;
                Some(Err(err))
            }
        }
    }
}

impl<S: Source> FusedIterator for Lines<'_, S> {}
