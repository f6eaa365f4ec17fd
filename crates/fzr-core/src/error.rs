use std::collections::TryReserveError;

#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("candidate capacity exceeded: cannot hold more than {capacity} names")]
    TooManyCandidates { capacity: usize },
    #[error("candidate name too long: {len} bytes, limit {limit}")]
    NameTooLong { len: usize, limit: usize },
    #[error("pattern too long: {len} bytes, limit {limit}")]
    PatternTooLong { len: usize, limit: usize },
    #[error("failed to reserve candidate storage: {0}")]
    Allocation(#[from] TryReserveError),
    #[error("invalid base path {0}")]
    InvalidPath(std::path::PathBuf),
}

pub type Result<T> = std::result::Result<T, Error>;
