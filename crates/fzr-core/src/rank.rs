//! Incremental filter and ranking.
//!
//! A query edit retests every candidate except those the monotonic-failure
//! cache proves still fail: once a candidate failed a length-`L` query, any
//! strict extension of that query fails too, so while the user keeps typing
//! the failing set only ever shrinks the work. Erasing characters makes the
//! cached length no longer strictly smaller than the query, which forces a
//! real retest.

use std::cmp::Ordering;

use crate::error::{Error, Result};
use crate::store::CandidateStore;
use crate::types::Candidate;

pub(crate) fn rerank(store: &mut CandidateStore, query: &str) -> Result<()> {
    if query.len() > store.limits.max_pattern_len {
        return Err(Error::PatternTooLong {
            len: query.len(),
            limit: store.limits.max_pattern_len,
        });
    }

    let capacity = store.limits.max_candidates;
    let CandidateStore {
        arena,
        candidates,
        shortlist,
        scratch,
        ..
    } = store;

    shortlist.clear();

    if query.is_empty() {
        // every candidate passes without alignment; discovery order is the
        // default ranking
        for (index, candidate) in candidates.iter_mut().enumerate() {
            candidate.score = (capacity - index) as i32;
            candidate.last_failed = None;
            shortlist.push(index as u32);
        }
    } else {
        for (index, candidate) in candidates.iter_mut().enumerate() {
            if candidate
                .last_failed
                .is_some_and(|failed| (failed as usize) < query.len())
            {
                // inherited failure, no re-alignment needed
                continue;
            }

            let name = &arena[candidate.name.range()];
            match scratch.align(query, name)? {
                Some(alignment) => {
                    candidate.score = alignment.score;
                    candidate.last_failed = None;
                    shortlist.push(index as u32);
                }
                None => {
                    candidate.last_failed = Some(query.len() as u32);
                }
            }
        }
    }

    shortlist.sort_unstable_by(|&a, &b| {
        compare_candidates(arena, &candidates[a as usize], &candidates[b as usize])
    });

    tracing::debug!(
        query,
        matched = shortlist.len(),
        total = candidates.len(),
        "rerank completed"
    );
    Ok(())
}

/// Shortlist order: score descending, then name length ascending (shorter
/// names win ties), then name content descending. The descending final leg
/// is historical behavior and rankings are defined by it; names from one
/// directory tree are unique, so the order is total.
fn compare_candidates(arena: &str, a: &Candidate, b: &Candidate) -> Ordering {
    b.score.cmp(&a.score).then_with(|| {
        let a_name = &arena[a.name.range()];
        let b_name = &arena[b.name.range()];
        a_name
            .len()
            .cmp(&b_name.len())
            .then_with(|| b_name.cmp(a_name))
    })
}
