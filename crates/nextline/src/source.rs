use std::{fmt, io};
#[cfg(unix)]
use std::{
    fs::File,
    os::fd::{AsRawFd, BorrowedFd, RawFd},
};

/// Opaque identity of an input source.
///
/// A [`LineReader`](crate::LineReader) only compares descriptors; it never
/// opens, validates, or closes them. Negative values are legal and simply
/// fail on the first read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Descriptor(i64);

impl Descriptor {
    /// Wrap a raw descriptor value.
    #[must_use]
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// The raw descriptor value.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl From<i32> for Descriptor {
    fn from(raw: i32) -> Self {
        Self(i64::from(raw))
    }
}

impl fmt::Display for Descriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Something a [`LineReader`](crate::LineReader) can pull bytes from.
///
/// `read` follows the [`io::Read::read`] contract: `Ok(0)` is end of input,
/// any other `Ok(n)` means `n` bytes were written to the front of `buf`.
/// Implementations should not retry on [`io::ErrorKind::Interrupted`]; the
/// reader reports every error to its caller.
pub trait Source {
    /// Identity used to decide whether buffered bytes still belong to this
    /// source.
    fn descriptor(&self) -> Descriptor;

    /// Read up to `buf.len()` bytes, blocking until at least one byte, end of
    /// input, or an error.
    ///
    /// # Errors
    ///
    /// Whatever the underlying input reports.
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize>;
}

impl<S: Source + ?Sized> Source for &mut S {
    fn descriptor(&self) -> Descriptor {
        (**self).descriptor()
    }

    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        (**self).read(buf)
    }
}

#[cfg(unix)]
fn read_fd(fd: RawFd, buf: &mut [u8]) -> io::Result<usize> {
    // SAFETY: `buf` is valid for writes of `buf.len()` bytes for the whole
    // call. `read` reports a bad `fd` through `errno` rather than faulting.
    let n = unsafe { libc::read(fd, buf.as_mut_ptr().cast::<libc::c_void>(), buf.len()) };
    usize::try_from(n).map_err(|_| io::Error::last_os_error())
}

/// A raw file descriptor, read with `read(2)` and never validated or closed.
#[cfg(unix)]
impl Source for RawFd {
    fn descriptor(&self) -> Descriptor {
        Descriptor::from(*self)
    }

    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        read_fd(*self, buf)
    }
}

#[cfg(unix)]
impl Source for BorrowedFd<'_> {
    fn descriptor(&self) -> Descriptor {
        Descriptor::from(self.as_raw_fd())
    }

    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        read_fd(self.as_raw_fd(), buf)
    }
}

#[cfg(unix)]
impl Source for &File {
    fn descriptor(&self) -> Descriptor {
        Descriptor::from(self.as_raw_fd())
    }

    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        io::Read::read(self, buf)
    }
}

/// Any [`io::Read`] paired with a descriptor chosen by the caller.
///
/// Useful for pipes, sockets, in-memory data, and anything else that has no
/// raw file descriptor of its own.
///
/// ```rust
/// use nextline::{IoSource, LineReader};
///
/// let mut stdin = IoSource::new(0, std::io::stdin());
/// let mut reader = LineReader::new();
/// # let _ = (&mut stdin, &mut reader);
/// ```
#[derive(Debug, Clone)]
pub struct IoSource<R> {
    descriptor: Descriptor,
    inner: R,
}

impl<R> IoSource<R> {
    /// Pair `inner` with `descriptor`.
    pub fn new(descriptor: impl Into<Descriptor>, inner: R) -> Self {
        Self {
            descriptor: descriptor.into(),
            inner,
        }
    }

    /// Borrow the wrapped reader.
    pub fn get_ref(&self) -> &R {
        &self.inner
    }

    /// Mutably borrow the wrapped reader.
    pub fn get_mut(&mut self) -> &mut R {
        &mut self.inner
    }

    /// Unwrap the reader.
    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: io::Read> Source for IoSource<R> {
    fn descriptor(&self) -> Descriptor {
        self.descriptor
    }

    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.inner.read(buf)
    }
}
