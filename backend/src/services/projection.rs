//! Read-side projections over the flat entry list.
//!
//! Pure and read-only: these functions reshape already-valid entries for
//! presentation and perform no validation of their own. The course a grid is
//! built for is always an explicit parameter, never shared selection state.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::models::{
    Course, CourseId, Day, Period, PeriodId, Staff, StaffId, Subject, SubjectId, TimetableEntry,
};

/// Sentinel rendered for a `(period, day)` cell with no committed entry.
pub const NO_CLASS: &str = "No Class";

/// A timetable entry with its identifiers resolved to display data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedEntry {
    pub course: CourseId,
    pub course_name: String,
    pub day: Day,
    pub period: PeriodId,
    pub period_start: NaiveTime,
    pub period_end: NaiveTime,
    pub subject: SubjectId,
    pub subject_name: String,
    pub staff: StaffId,
    pub staff_name: String,
}

impl ResolvedEntry {
    /// `"start - end"` label of the entry's period.
    pub fn period_label(&self) -> String {
        format!(
            "{} - {}",
            self.period_start.format("%H:%M:%S"),
            self.period_end.format("%H:%M:%S")
        )
    }
}

/// One grid row: a period with one cell per weekday, Monday to Friday.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridRow {
    /// `"start - end"` period label.
    pub period: String,
    pub days: Vec<GridCell>,
}

/// One grid cell: the subject taught on a day, or the no-class sentinel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridCell {
    pub day: String,
    pub subject: String,
}

/// A single course's weekly grid, rows ordered by period start time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseGrid {
    pub course: CourseId,
    pub course_name: String,
    pub rows: Vec<GridRow>,
}

/// All entries of one course, for the course-selector view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseBucket {
    pub course: CourseId,
    pub course_name: String,
    pub entries: Vec<ResolvedEntry>,
}

/// Join raw entries against the reference lists.
///
/// Entries with a reference that no longer resolves are skipped; the caller
/// decides whether that is worth a warning.
pub fn resolve_entries(
    entries: &[TimetableEntry],
    courses: &[Course],
    subjects: &[Subject],
    staff: &[Staff],
    periods: &[Period],
) -> Vec<ResolvedEntry> {
    let courses: HashMap<CourseId, &Course> = courses.iter().map(|c| (c.id, c)).collect();
    let subjects: HashMap<SubjectId, &Subject> = subjects.iter().map(|s| (s.id, s)).collect();
    let staff: HashMap<StaffId, &Staff> = staff.iter().map(|s| (s.id, s)).collect();
    let periods: HashMap<PeriodId, &Period> = periods.iter().map(|p| (p.id, p)).collect();

    entries
        .iter()
        .filter_map(|entry| {
            let course = courses.get(&entry.course)?;
            let subject = subjects.get(&entry.subject)?;
            let member = staff.get(&entry.staff)?;
            let period = periods.get(&entry.period)?;
            Some(ResolvedEntry {
                course: entry.course,
                course_name: course.name.clone(),
                day: entry.day,
                period: entry.period,
                period_start: period.start,
                period_end: period.end,
                subject: entry.subject,
                subject_name: subject.name.clone(),
                staff: entry.staff,
                staff_name: member.name.clone(),
            })
        })
        .collect()
}

/// Build the day-by-period grid for one course.
///
/// Rows cover the periods that appear in the course's entries, sorted by
/// start time; each row has a cell for every weekday with the subject name or
/// [`NO_CLASS`].
pub fn course_grid(course: &Course, entries: &[ResolvedEntry]) -> CourseGrid {
    let mut row_periods: Vec<(NaiveTime, PeriodId, String)> = Vec::new();
    let mut cells: HashMap<(PeriodId, Day), String> = HashMap::new();

    for entry in entries.iter().filter(|e| e.course == course.id) {
        if !row_periods.iter().any(|(_, id, _)| *id == entry.period) {
            row_periods.push((entry.period_start, entry.period, entry.period_label()));
        }
        cells.insert((entry.period, entry.day), entry.subject_name.clone());
    }
    row_periods.sort_by_key(|(start, id, _)| (*start, *id));

    let rows = row_periods
        .into_iter()
        .map(|(_, period_id, label)| GridRow {
            period: label,
            days: Day::ALL
                .iter()
                .map(|day| GridCell {
                    day: day.name().to_string(),
                    subject: cells
                        .get(&(period_id, *day))
                        .cloned()
                        .unwrap_or_else(|| NO_CLASS.to_string()),
                })
                .collect(),
        })
        .collect();

    CourseGrid {
        course: course.id,
        course_name: course.name.clone(),
        rows,
    }
}

/// Group the flat entry list into per-course buckets, ordered by course id.
pub fn group_by_course(entries: &[ResolvedEntry]) -> Vec<CourseBucket> {
    let mut buckets: Vec<CourseBucket> = Vec::new();
    for entry in entries {
        match buckets.iter_mut().find(|b| b.course == entry.course) {
            Some(bucket) => bucket.entries.push(entry.clone()),
            None => buckets.push(CourseBucket {
                course: entry.course,
                course_name: entry.course_name.clone(),
                entries: vec![entry.clone()],
            }),
        }
    }
    buckets.sort_by_key(|b| b.course);
    buckets
}
