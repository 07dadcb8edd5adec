//! Repository trait definitions for storage operations.
//!
//! Responsibilities are split across two focused traits so implementations
//! stay testable:
//!
//! - [`error`]: Error types for repository operations
//! - [`catalog`]: Read-only access to the externally managed reference data
//! - [`timetable`]: The persisted entry collection with atomic replace-all
//!
//! # Convenience Trait Bound
//!
//! For functions that need both capabilities, use the [`FullRepository`]
//! trait bound:
//!
//! ```ignore
//! async fn my_service<R: FullRepository>(repo: &R) -> RepositoryResult<()> {
//!     let periods = repo.list_periods().await?;
//!     let count = repo.count_entries().await?;
//!     Ok(())
//! }
//! ```

pub mod catalog;
pub mod error;
pub mod timetable;

// Re-export error types
pub use error::{ErrorContext, RepositoryError, RepositoryResult};

// Re-export traits
pub use catalog::CatalogRepository;
pub use timetable::TimetableRepository;

/// Composite trait bound for a complete repository implementation.
///
/// Automatically implemented for any type that implements both repository
/// traits.
pub trait FullRepository: CatalogRepository + TimetableRepository {}

// Blanket implementation: both traits together are a full repository
impl<T> FullRepository for T where T: CatalogRepository + TimetableRepository {}
