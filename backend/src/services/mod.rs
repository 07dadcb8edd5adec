//! Business logic above the repository layer.
//!
//! - [`controller`]: the regeneration workflow (generate, conflict, clear)
//! - [`projection`]: read-side reshaping of entries for presentation

pub mod controller;
pub mod projection;

pub use controller::{GenerateError, GenerateOutcome, GenerationConfig, RegenerationController};
pub use projection::{
    course_grid, group_by_course, CourseBucket, CourseGrid, GridCell, GridRow, ResolvedEntry,
    NO_CLASS,
};
