use std::io;

use thiserror::Error;

use crate::Descriptor;

/// A refill failed while a line was being assembled.
///
/// The partial line is dropped. The reader's buffer is left empty, so calling
/// [`LineReader::read_line`](crate::LineReader::read_line) again retries the
/// source.
#[derive(Error, Debug)]
#[error("read from descriptor {descriptor} failed after {discarded} pending bytes: {source}")]
pub struct ReadError {
    #[source]
    pub(crate) source: io::Error,
    pub(crate) descriptor: Descriptor,
    pub(crate) discarded: usize,
}

impl ReadError {
    /// Kind of the underlying I/O error.
    #[must_use]
    pub fn kind(&self) -> io::ErrorKind {
        self.source.kind()
    }

    /// Descriptor the failing read was issued against.
    #[must_use]
    pub fn descriptor(&self) -> Descriptor {
        self.descriptor
    }

    /// Bytes of the unfinished line that were thrown away.
    #[must_use]
    pub fn discarded(&self) -> usize {
        self.discarded
    }

    /// Unwrap into the underlying I/O error.
    #[must_use]
    pub fn into_io(self) -> io::Error {
        self.source
    }
}

impl From<ReadError> for io::Error {
    fn from(err: ReadError) -> Self {
        err.source
    }
}
