//! Data Transfer Objects for the HTTP API.
//!
//! These DTOs are used for response serialization in the REST API. The grid
//! and bucket projections are re-exported from the services module since they
//! already derive Serialize/Deserialize.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::services::ResolvedEntry;

// Re-export projection DTOs that are already serializable
pub use crate::services::{CourseBucket, CourseGrid, GridCell, GridRow};

/// A referenced record rendered as id plus display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefDto {
    pub id: i64,
    pub name: String,
}

/// A period's time range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodTimesDto {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

/// One committed timetable entry with references resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimetableEntryDto {
    pub course: RefDto,
    pub day: String,
    pub period: PeriodTimesDto,
    pub subject: RefDto,
    pub staff: RefDto,
}

impl From<ResolvedEntry> for TimetableEntryDto {
    fn from(entry: ResolvedEntry) -> Self {
        Self {
            course: RefDto {
                id: entry.course.value(),
                name: entry.course_name,
            },
            day: entry.day.name().to_string(),
            period: PeriodTimesDto {
                start: entry.period_start,
                end: entry.period_end,
            },
            subject: RefDto {
                id: entry.subject.value(),
                name: entry.subject_name,
            },
            staff: RefDto {
                id: entry.staff.value(),
                name: entry.staff_name,
            },
        }
    }
}

/// Response for the generate endpoint: a fresh grid or a conflict the caller
/// must confirm by clearing first.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum GenerateResponse {
    Generated {
        entries: Vec<TimetableEntryDto>,
        unfilled_slot_count: usize,
    },
    Conflict {
        existing_count: usize,
    },
}

/// Response for the clear endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClearResponse {
    /// Always `"cleared"`; clearing is idempotent.
    pub status: String,
    /// Number of entries removed (0 when the store was already empty).
    pub removed: usize,
}

/// Full entry listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimetableListResponse {
    pub entries: Vec<TimetableEntryDto>,
    pub total: usize,
}

/// Entry listing grouped by course for the course-selector view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ByCourseResponse {
    pub courses: Vec<CourseBucket>,
    pub total: usize,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,
    /// Version of the API
    pub version: String,
    /// Store connection status
    pub database: String,
}
