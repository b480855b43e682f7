/// Terminal result of a search run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum SearchResult {
    /// Key matched the probed element at this index.
    Found(usize),
    /// Interval was exhausted without a match.
    NotFound,
}

impl SearchResult {
    /// Sentinel index reported for [`SearchResult::NotFound`].
    pub const NOT_FOUND_SENTINEL: i64 = -1;

    /// Returns the matched index, or `-1` when the key was not found.
    #[must_use]
    pub fn as_index(self) -> i64 {
        match self {
            Self::Found(index) => i64::try_from(index).unwrap_or(i64::MAX),
            Self::NotFound => Self::NOT_FOUND_SENTINEL,
        }
    }
}

/// Lifecycle of one simulation run.
///
/// `Finished` is the only state that carries a [`SearchResult`], so a result
/// cannot exist before the run terminates and cannot be cleared afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum RunState {
    /// Default snapshot before `initialize`.
    #[default]
    Ready,
    /// Initialized and accepting steps.
    Searching,
    /// Terminated; further steps are no-ops.
    Finished(SearchResult),
}

impl RunState {
    /// Returns `true` once `initialize` has run.
    #[must_use]
    pub const fn is_initialized(self) -> bool {
        !matches!(self, Self::Ready)
    }

    /// Returns `true` for terminal states.
    #[must_use]
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Finished(_))
    }

    /// Returns the terminal result, if the run has finished.
    #[must_use]
    pub const fn result(self) -> Option<SearchResult> {
        match self {
            Self::Finished(result) => Some(result),
            Self::Ready | Self::Searching => None,
        }
    }
}
