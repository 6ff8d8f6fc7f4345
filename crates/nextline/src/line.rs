use std::ffi::{CString, NulError};

use bstr::{BStr, BString};

/// What a successful [`LineReader::read_line`](crate::LineReader::read_line)
/// call tells the caller about the stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// A newline-terminated line was extracted; more may follow.
    Available,
    /// The source reported end of input; this was the final line.
    EndOfInput,
}

/// One line, with its newline stripped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    /// The line ended with `\n`.
    Complete(BString),
    /// End of input was reached. Holds whatever followed the last `\n`,
    /// which is empty when the input ended on a newline or was empty.
    Final(BString),
}

impl Line {
    /// Status of the stream after this line.
    #[must_use]
    pub fn status(&self) -> Status {
        match self {
            Self::Complete(_) => Status::Available,
            Self::Final(_) => Status::EndOfInput,
        }
    }

    /// Returns `true` if this is the last line of the input.
    #[must_use]
    pub fn is_final(&self) -> bool {
        matches!(self, Self::Final(_))
    }

    /// Bytes of the line.
    #[must_use]
    pub fn as_bstr(&self) -> &BStr {
        match self {
            Self::Complete(bytes) | Self::Final(bytes) => BStr::new(bytes),
        }
    }

    /// Bytes of the line.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        self.as_bstr()
    }

    /// Take ownership of the bytes of the line.
    #[must_use]
    pub fn into_bytes(self) -> BString {
        match self {
            Self::Complete(bytes) | Self::Final(bytes) => bytes,
        }
    }

    /// Convert into a NUL-terminated string.
    ///
    /// # Errors
    ///
    /// Fails if the line itself contains a NUL byte.
    pub fn into_c_string(self) -> Result<CString, NulError> {
        CString::new(Vec::from(self.into_bytes()))
    }
}

impl AsRef<[u8]> for Line {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}
