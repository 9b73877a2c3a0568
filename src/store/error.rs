use thiserror::Error;

/// Failures surfaced by the profile store. Construction problems are their
/// own variant so a store that could never complete an operation fails
/// loudly at startup instead of swallowing every later call.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing database could not be located or opened.
    #[error("profile store unavailable: {0}")]
    Unavailable(String),

    /// The underlying store rejected a write.
    #[error("failed to commit write: {0}")]
    Commit(String),

    /// Reading the persisted profiles failed.
    #[error("failed to fetch profiles: {0}")]
    Fetch(String),

    /// The data directory could not be created.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
