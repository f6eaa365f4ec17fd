//! fzr-core - interactive fuzzy file-name search engine
//!
//! Given a query that grows and shrinks character by character, this crate
//! ranks a fixed-at-load-time pool of candidate names by alignment score and
//! exposes which positions matched for highlighting. The engine is
//! single-threaded and fully synchronous by contract: `rerank` runs to
//! completion per query-edit event, and all scratch state is owned, never
//! shared.

pub mod error;
mod rank;
pub mod score;
pub mod store;
pub mod types;
pub mod walk;

pub use error::{Error, Result};
pub use score::{Alignment, ScoreScratch};
pub use store::CandidateStore;
pub use types::{Limits, ShortlistEntry};
pub use walk::{WalkMode, collect_names};
