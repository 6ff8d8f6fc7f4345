/// Number of bytes requested from the source on every refill.
pub const DEFAULT_BUFFER_SIZE: usize = 4096;

/// Initial capacity of the builder that assembles each line.
pub const DEFAULT_LINE_CAPACITY: usize = 100;

/// Configuration options for [`LineReader`](crate::LineReader).
///
/// Neither option changes which lines are produced; both only trade memory
/// for fewer reads or fewer reallocations.
///
/// # Examples
///
/// ```rust
/// use nextline::{LineReader, ReaderOptions};
///
/// let reader = LineReader::with_options(ReaderOptions {
///     buffer_size: 64 * 1024,
///     ..Default::default()
/// });
/// assert_eq!(reader.capacity(), 64 * 1024);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReaderOptions {
    /// Size of the fixed read buffer, in bytes.
    ///
    /// The buffer is allocated once when the reader is built and never
    /// resized. Lines longer than the buffer are assembled across several
    /// refills. A value of zero is treated as one.
    ///
    /// # Default
    ///
    /// [`DEFAULT_BUFFER_SIZE`]
    pub buffer_size: usize,

    /// Capacity each line builder starts with.
    ///
    /// Picking a value above the typical line length avoids any reallocation
    /// for common input. Longer lines still grow without bound.
    ///
    /// # Default
    ///
    /// [`DEFAULT_LINE_CAPACITY`]
    pub initial_line_capacity: usize,
}

impl Default for ReaderOptions {
    fn default() -> Self {
        Self {
            buffer_size: DEFAULT_BUFFER_SIZE,
            initial_line_capacity: DEFAULT_LINE_CAPACITY,
        }
    }
}

impl ReaderOptions {
    /// Buffer size actually used by the reader.
    pub(crate) fn effective_buffer_size(&self) -> usize {
        self.buffer_size.max(1)
    }
}
