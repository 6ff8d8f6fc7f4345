use bstr::BString;

/// Smallest capacity the builder grows to once it has to grow at all.
const MIN_GROWTH: usize = 16;

/// Growable accumulator for the bytes of one line.
///
/// A thin layer over `Vec<u8>` that owns its growth policy: whenever an
/// append does not fit, capacity at least doubles, so a long line costs a
/// logarithmic number of reallocations rather than one per append.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineBuilder {
    data: Vec<u8>,
}

impl LineBuilder {
    /// Create an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self { data: Vec::new() }
    }

    /// Create an empty builder that can hold `capacity` bytes before growing.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
        }
    }

    /// Append a single byte.
    pub fn push(&mut self, byte: u8) {
        self.grow_for(1);
        self.data.push(byte);
    }

    /// Append a run of bytes.
    pub fn extend_from_slice(&mut self, bytes: &[u8]) {
        if bytes.is_empty() {
            return;
        }
        self.grow_for(bytes.len());
        self.data.extend_from_slice(bytes);
    }

    /// Number of bytes assembled so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether nothing has been appended yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Bytes the builder can hold without reallocating.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.data.capacity()
    }

    /// Bytes assembled so far.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Hand the assembled bytes over to the caller.
    #[must_use]
    pub fn finish(self) -> BString {
        BString::from(self.data)
    }

    fn grow_for(&mut self, additional: usize) {
        let len = self.data.len();
        let capacity = self.data.capacity();
        if capacity - len >= additional {
            return;
        }
        let target = (capacity * 2).max(len + additional).max(MIN_GROWTH);
        self.data.reserve_exact(target - len);
    }
}

impl From<LineBuilder> for BString {
    fn from(builder: LineBuilder) -> Self {
        builder.finish()
    }
}
