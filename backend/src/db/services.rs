//! High-level database service layer.
//!
//! Repository-agnostic operations that work with any implementation of the
//! repository traits: assembling and validating the catalog snapshot, listing
//! entries, and resolving entry identifiers to display names. Business logic
//! that must behave the same regardless of the storage backend lives here.

use log::{info, warn};

use super::repository::{FullRepository, RepositoryError, RepositoryResult};
use crate::models::{Catalog, CatalogError, TimetableEntry};
use crate::services::projection::{self, ResolvedEntry};

/// Why a catalog snapshot could not be produced.
#[derive(Debug, thiserror::Error)]
pub enum CatalogLoadError {
    /// The store could not be read.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    /// The reference data violates a referential invariant.
    #[error(transparent)]
    Invalid(#[from] CatalogError),
}

// ==================== Health & Connection ====================

/// Check if the store connection is healthy.
pub async fn health_check<R: FullRepository + ?Sized>(repo: &R) -> RepositoryResult<bool> {
    repo.health_check().await
}

// ==================== Catalog Operations ====================

/// Assemble a validated catalog snapshot from the active reference data.
///
/// Reads the four reference lists and runs the referential-invariant checks.
/// A validation failure names the offending record and aborts before any
/// assignment work starts.
///
/// # Arguments
/// * `repo` - Repository implementation
///
/// # Returns
/// * `Ok(Catalog)` - validated snapshot
/// * `Err(CatalogLoadError)` - store failure or invariant violation
pub async fn load_catalog<R: FullRepository + ?Sized>(
    repo: &R,
) -> Result<Catalog, CatalogLoadError> {
    let courses = repo.list_active_courses().await?;
    let subjects = repo.list_active_subjects().await?;
    let staff = repo.list_active_staff().await?;
    let periods = repo.list_periods().await?;

    info!(
        "Service layer: catalog snapshot with {} courses, {} subjects, {} staff, {} periods",
        courses.len(),
        subjects.len(),
        staff.len(),
        periods.len()
    );

    let catalog = Catalog::new(courses, subjects, staff, periods)?;
    Ok(catalog)
}

// ==================== Entry Operations ====================

/// Number of persisted timetable entries.
pub async fn count_entries<R: FullRepository + ?Sized>(repo: &R) -> RepositoryResult<usize> {
    repo.count_entries().await
}

/// All persisted timetable entries.
pub async fn list_entries<R: FullRepository + ?Sized>(
    repo: &R,
) -> RepositoryResult<Vec<TimetableEntry>> {
    repo.list_entries().await
}

/// Resolve entry identifiers against the current active reference view.
///
/// Entries whose references no longer resolve (a record deactivated after
/// generation) are dropped with a warning rather than failing the read.
pub async fn resolve_entries<R: FullRepository + ?Sized>(
    repo: &R,
    entries: &[TimetableEntry],
) -> RepositoryResult<Vec<ResolvedEntry>> {
    let courses = repo.list_active_courses().await?;
    let subjects = repo.list_active_subjects().await?;
    let staff = repo.list_active_staff().await?;
    let periods = repo.list_periods().await?;

    let resolved = projection::resolve_entries(entries, &courses, &subjects, &staff, &periods);
    if resolved.len() < entries.len() {
        warn!(
            "Service layer: dropped {} entries with dangling references during resolution",
            entries.len() - resolved.len()
        );
    }
    Ok(resolved)
}

/// List all persisted entries with names resolved.
pub async fn resolved_entries<R: FullRepository + ?Sized>(
    repo: &R,
) -> RepositoryResult<Vec<ResolvedEntry>> {
    let entries = repo.list_entries().await?;
    resolve_entries(repo, &entries).await
}
