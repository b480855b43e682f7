/// Inclusive index range `[low, high]` that may still contain the key.
///
/// `high` is signed because narrowing below index 0 leaves `high = -1`. An
/// interval with `low == high + 1` is empty; the next step reports it as
/// exhausted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct SearchInterval {
    low: i32,
    high: i32,
}

impl SearchInterval {
    /// Creates an interval from explicit bounds.
    #[must_use]
    pub const fn new(low: i32, high: i32) -> Self {
        Self { low, high }
    }

    /// Interval covering every index of an array of `len` elements.
    #[must_use]
    pub fn spanning(len: usize) -> Self {
        let len = i32::try_from(len).unwrap_or(i32::MAX);
        Self::new(0, len - 1)
    }

    /// Lower bound.
    #[must_use]
    pub const fn low(self) -> i32 {
        self.low
    }

    /// Upper bound.
    #[must_use]
    pub const fn high(self) -> i32 {
        self.high
    }

    /// `true` once `low > high`.
    #[must_use]
    pub const fn is_exhausted(self) -> bool {
        self.low > self.high
    }

    /// `high - low`; strictly decreases on every narrowing step.
    #[must_use]
    pub fn span(self) -> i64 {
        i64::from(self.high) - i64::from(self.low)
    }

    /// Floor of `(low + high) / 2`, or `None` for an exhausted interval.
    #[must_use]
    pub fn midpoint(self) -> Option<usize> {
        if self.is_exhausted() || self.low < 0 {
            return None;
        }
        let mid = (i64::from(self.low) + i64::from(self.high)) / 2;
        usize::try_from(mid).ok()
    }

    /// Keeps the upper half: `low = mid + 1`.
    #[must_use]
    pub fn above(self, mid: usize) -> Self {
        Self::new(index_to_bound(mid).saturating_add(1), self.high)
    }

    /// Keeps the lower half: `high = mid - 1`.
    #[must_use]
    pub fn below(self, mid: usize) -> Self {
        Self::new(self.low, index_to_bound(mid).saturating_sub(1))
    }
}

fn index_to_bound(index: usize) -> i32 {
    i32::try_from(index).unwrap_or(i32::MAX)
}
