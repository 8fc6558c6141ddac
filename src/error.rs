use std::path::PathBuf;

use thiserror::Error;

/// Faults the image assigner does not recover from.
///
/// A missing media directory is not one of them; it yields an empty
/// candidate set instead.
#[derive(Debug, Error)]
pub enum AssignError {
    #[error("failed to list media directory {}", .path.display())]
    ListDirectory {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("failed to load records")]
    LoadRecords(#[source] sqlx::Error),

    #[error("failed to save record {id} ({name})")]
    SaveRecord {
        id: i64,
        name: String,
        #[source]
        source: sqlx::Error,
    },
}
