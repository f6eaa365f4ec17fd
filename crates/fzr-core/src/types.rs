/// Fixed sizing for a [`CandidateStore`](crate::CandidateStore) and its
/// alignment scratch. Everything the store allocates derives from these
/// bounds; exceeding them at load or query time is a typed error, never a
/// silent truncation.
#[derive(Debug, Clone, Copy)]
pub struct Limits {
    /// Maximum number of candidate names the store accepts.
    pub max_candidates: usize,
    /// Maximum byte length of a single candidate name (exclusive).
    pub max_name_len: usize,
    /// Maximum byte length of a query pattern (inclusive).
    pub max_pattern_len: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_candidates: 1024 * 1024,
            max_name_len: 512,
            max_pattern_len: 32,
        }
    }
}

/// Byte range of one name inside the store's packed arena. Stable for the
/// arena's lifetime; names are only ever appended.
#[derive(Debug, Clone, Copy)]
pub(crate) struct NameSpan {
    pub offset: usize,
    pub len: usize,
}

impl NameSpan {
    #[inline]
    pub fn range(&self) -> std::ops::Range<usize> {
        self.offset..self.offset + self.len
    }
}

/// One stored candidate: an arena view plus the mutable per-query fields.
#[derive(Debug, Clone)]
pub(crate) struct Candidate {
    pub name: NameSpan,
    /// Recomputed on every query edit; for the empty query this is
    /// `capacity - insertion_index` so discovery order is the default rank.
    pub score: i32,
    /// Monotonic-failure cache: `Some(len)` means the length-`len` prefix of
    /// the current query already failed against this name, so any strictly
    /// longer extension of it must fail too. `None` means the last test
    /// succeeded and the candidate is always retested.
    pub last_failed: Option<u32>,
}

/// A shortlist row as handed to front-ends: the candidate's stable index,
/// its name and its score for the active query.
#[derive(Debug, Clone, Copy)]
pub struct ShortlistEntry<'a> {
    pub index: usize,
    pub name: &'a str,
    pub score: i32,
}
