//! A buffered line reader with state that survives between calls.
//!
//! [`LineReader`] owns a fixed-size read buffer. Each call to
//! [`LineReader::read_line`] drains that buffer into a fresh [`LineBuilder`]
//! until a `\n` is found, refilling from the [`Source`] whenever the buffer
//! runs dry. Bytes read past the end of one line stay in the buffer and are
//! served by the next call.
//!
//! ```rust
//! use nextline::{IoSource, Line, LineReader};
//!
//! let mut source = IoSource::new(7, &b"ab\ncde\n"[..]);
//! let mut reader = LineReader::new();
//!
//! assert_eq!(reader.read_line(&mut source)?, Line::Complete("ab".into()));
//! assert_eq!(reader.read_line(&mut source)?, Line::Complete("cde".into()));
//! assert_eq!(reader.read_line(&mut source)?, Line::Final("".into()));
//! # Ok::<(), nextline::ReadError>(())
//! ```
//!
//! A reader remembers the [`Descriptor`] it last read from. Handing it a
//! source with a different descriptor throws away whatever was still
//! buffered, so keep one reader per stream.

mod builder;
mod error;
mod line;
mod options;
mod reader;
mod source;

#[cfg(test)]
mod tests;

pub use builder::LineBuilder;
pub use error::ReadError;
pub use line::{Line, Status};
pub use options::{DEFAULT_BUFFER_SIZE, DEFAULT_LINE_CAPACITY, ReaderOptions};
pub use reader::{LineReader, Lines};
pub use source::{Descriptor, IoSource, Source};

pub use bstr::{BStr, BString};
