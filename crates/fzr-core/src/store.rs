//! Candidate storage.
//!
//! All names live packed in one owned arena in discovery order; candidate
//! records hold byte ranges into it. The store also owns the alignment
//! scratch so a `rerank` never allocates matrix space, and the shortlist of
//! candidates passing the active query, kept sorted for display.

use crate::error::{Error, Result};
use crate::rank;
use crate::score::ScoreScratch;
use crate::types::{Candidate, Limits, NameSpan, ShortlistEntry};

pub struct CandidateStore {
    pub(crate) limits: Limits,
    pub(crate) arena: String,
    pub(crate) candidates: Vec<Candidate>,
    pub(crate) shortlist: Vec<u32>,
    pub(crate) scratch: ScoreScratch,
}

impl std::fmt::Debug for CandidateStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CandidateStore")
            .field("limits", &self.limits)
            .field("candidates", &self.candidates.len())
            .field("shortlist", &self.shortlist.len())
            .finish_non_exhaustive()
    }
}

impl CandidateStore {
    pub fn new(limits: Limits) -> Result<Self> {
        Ok(Self {
            limits,
            arena: String::new(),
            candidates: Vec::new(),
            shortlist: Vec::new(),
            scratch: ScoreScratch::new(&limits)?,
        })
    }

    pub fn limits(&self) -> &Limits {
        &self.limits
    }

    /// Bulk-append candidate names in discovery order and build the initial
    /// shortlist (empty-query ranking). On any error the store is rolled
    /// back to its state before the call; nothing is partially loaded.
    pub fn load<I>(&mut self, names: I) -> Result<()>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let arena_mark = self.arena.len();
        let count_mark = self.candidates.len();

        let result = self.append_names(names);
        if result.is_err() {
            self.arena.truncate(arena_mark);
            self.candidates.truncate(count_mark);
        }
        result?;

        tracing::debug!(total = self.candidates.len(), "loaded candidate names");
        self.rerank("")
    }

    fn append_names<I>(&mut self, names: I) -> Result<()>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        for name in names {
            let name = name.as_ref();
            if self.candidates.len() == self.limits.max_candidates {
                return Err(Error::TooManyCandidates {
                    capacity: self.limits.max_candidates,
                });
            }
            if name.len() >= self.limits.max_name_len {
                return Err(Error::NameTooLong {
                    len: name.len(),
                    limit: self.limits.max_name_len - 1,
                });
            }

            self.arena.try_reserve(name.len())?;
            self.candidates.try_reserve(1)?;
            self.shortlist.try_reserve(1)?;

            let index = self.candidates.len();
            let offset = self.arena.len();
            self.arena.push_str(name);
            self.candidates.push(Candidate {
                name: NameSpan {
                    offset,
                    len: name.len(),
                },
                score: (self.limits.max_candidates - index) as i32,
                last_failed: None,
            });
        }
        Ok(())
    }

    /// Drop every candidate and release the backing storage. The scratch
    /// buffers stay, sized by the construction-time limits.
    pub fn clear(&mut self) {
        self.arena = String::new();
        self.candidates = Vec::new();
        self.shortlist = Vec::new();
    }

    /// Total number of loaded candidates, matching or not.
    pub fn total(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Re-filter and re-sort the shortlist for a new query. Runs to
    /// completion before returning; cost scales with the candidate count
    /// except where the monotonic-failure cache skips re-alignment.
    pub fn rerank(&mut self, query: &str) -> Result<()> {
        rank::rerank(self, query)
    }

    /// Candidates passing the active query, best first.
    pub fn shortlist(&self) -> impl ExactSizeIterator<Item = ShortlistEntry<'_>> {
        self.shortlist.iter().map(|&index| {
            let candidate = &self.candidates[index as usize];
            ShortlistEntry {
                index: index as usize,
                name: &self.arena[candidate.name.range()],
                score: candidate.score,
            }
        })
    }

    pub fn shortlist_len(&self) -> usize {
        self.shortlist.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_store() -> CandidateStore {
        CandidateStore::new(Limits {
            max_candidates: 4,
            max_name_len: 16,
            max_pattern_len: 8,
        })
        .unwrap()
    }

    #[test]
    fn load_preserves_discovery_order() {
        let mut store = small_store();
        store.load(["b.rs", "a.rs", "c.rs"]).unwrap();

        let names: Vec<_> = store.shortlist().map(|e| e.name.to_string()).collect();
        assert_eq!(names, ["b.rs", "a.rs", "c.rs"]);

        let scores: Vec<_> = store.shortlist().map(|e| e.score).collect();
        assert_eq!(scores, [4, 3, 2], "empty query scores are capacity - index");
    }

    #[test]
    fn load_rejects_too_many_candidates() {
        let mut store = small_store();
        let names = ["a", "b", "c", "d", "e"];
        assert!(matches!(
            store.load(names),
            Err(Error::TooManyCandidates { capacity: 4 })
        ));
        assert!(store.is_empty(), "failed load must roll back");
    }

    #[test]
    fn load_rejects_overlong_name() {
        let mut store = small_store();
        assert!(matches!(
            store.load(["ok", "a-name-that-is-way-too-long"]),
            Err(Error::NameTooLong { limit: 15, .. })
        ));
        assert!(store.is_empty());
    }

    #[test]
    fn clear_releases_everything() {
        let mut store = small_store();
        store.load(["a.rs", "b.rs"]).unwrap();
        store.clear();
        assert!(store.is_empty());
        assert_eq!(store.shortlist_len(), 0);

        // the store is reusable after clear
        store.load(["c.rs"]).unwrap();
        assert_eq!(store.total(), 1);
    }
}
