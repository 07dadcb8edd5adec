//! Timetable generation engine.
//!
//! Two layers: [`constraints`] holds the pure rule checks a candidate
//! assignment must pass, [`generator`] runs the single forward pass that
//! fills the weekly grid for every active course. The engine never touches
//! persistence; the regeneration controller feeds it a validated
//! [`crate::models::Catalog`] snapshot and stores the result.

pub mod constraints;
pub mod generator;

pub use constraints::{Candidate, CommittedState, ConstraintSet, ConstraintViolation};
pub use generator::{fill_grid, GenerationParams, GenerationReport};
