//! Read-side trait for the reference-data collaborator.
//!
//! Course, subject, staff, and period records are managed elsewhere; the core
//! only ever reads the active view of them. Implementations must present a
//! consistent view: subjects listed here belong to a listed course, and
//! teaches-sets only reference listed subjects.

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::models::{Course, Period, Staff, Subject};

/// Repository trait for reading reference data.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to work with async Rust.
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// Check if the store is reachable.
    ///
    /// # Returns
    /// - `Ok(true)` if the store is healthy
    /// - `Ok(false)` if unhealthy but no error occurred
    /// - `Err(RepositoryError)` if the check itself failed
    async fn health_check(&self) -> RepositoryResult<bool>;

    /// List active courses, ordered by id.
    async fn list_active_courses(&self) -> RepositoryResult<Vec<Course>>;

    /// List active subjects whose owning course is also active, with course
    /// references, ordered by id.
    async fn list_active_subjects(&self) -> RepositoryResult<Vec<Subject>>;

    /// List active staff with their teaches-sets restricted to the active
    /// subject view, ordered by id.
    async fn list_active_staff(&self) -> RepositoryResult<Vec<Staff>>;

    /// List all periods, ordered by ascending start time.
    async fn list_periods(&self) -> RepositoryResult<Vec<Period>>;
}
