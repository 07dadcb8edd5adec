//! Core trait for the persisted timetable entry collection.
//!
//! The entry set is the only mutable state the core owns. It is written
//! exclusively through [`TimetableRepository::replace_entries`] and
//! [`TimetableRepository::clear_entries`]; there is no partial update.

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::models::TimetableEntry;

/// Repository trait for the committed timetable grid.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to work with async Rust.
#[async_trait]
pub trait TimetableRepository: Send + Sync {
    /// Number of persisted entries.
    async fn count_entries(&self) -> RepositoryResult<usize>;

    /// All persisted entries as a snapshot-consistent list.
    async fn list_entries(&self) -> RepositoryResult<Vec<TimetableEntry>>;

    /// Atomically replace the whole grid with `entries`.
    ///
    /// Concurrent readers observe either the previous complete set or the new
    /// one, never a mix. On error the previous set is guaranteed intact.
    ///
    /// # Returns
    /// * `Ok(usize)` - number of entries stored
    async fn replace_entries(&self, entries: Vec<TimetableEntry>) -> RepositoryResult<usize>;

    /// Delete all entries. Idempotent: clearing an empty store succeeds.
    ///
    /// # Returns
    /// * `Ok(usize)` - number of entries removed (0 when already empty)
    async fn clear_entries(&self) -> RepositoryResult<usize>;
}
