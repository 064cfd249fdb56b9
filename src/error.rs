use core::fmt;

/// Error returned when a growth operation requests more elements than the
/// element type can address.
///
/// See [`SpillVec::try_resize`](crate::SpillVec::try_resize) and
/// [`SpillVec::max_len`](crate::SpillVec::max_len). The operation that
/// produced this error left the container unmodified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LengthError {
    requested: usize,
    max: usize,
}

impl LengthError {
    #[inline]
    pub(crate) const fn new(requested: usize, max: usize) -> Self {
        Self { requested, max }
    }

    /// The length the caller asked for.
    #[inline]
    pub const fn requested(&self) -> usize {
        self.requested
    }

    /// The maximum representable element count for the element type.
    #[inline]
    pub const fn max(&self) -> usize {
        self.max
    }
}

impl fmt::Display for LengthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "requested length {} exceeds the maximum of {} elements",
            self.requested, self.max
        )
    }
}

impl core::error::Error for LengthError {}
