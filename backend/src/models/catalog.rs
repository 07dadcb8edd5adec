//! Reference-data records and the validated catalog snapshot.
//!
//! The catalog is an immutable snapshot of the active reference data taken
//! just before a generation run. Construction validates the referential
//! invariants, so the assignment engine can assume every subject points at a
//! known course and every teaches-set entry points at a known subject.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::day::Day;
use super::ids::{CourseId, PeriodId, StaffId, SubjectId};

/// A cohort with its own weekly grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    pub id: CourseId,
    pub name: String,
    pub active: bool,
}

/// A teachable unit tied to exactly one course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    pub id: SubjectId,
    pub name: String,
    pub course: CourseId,
    pub active: bool,
}

/// A person who may teach the subjects in their teaches-set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Staff {
    pub id: StaffId,
    pub name: String,
    pub teaches: Vec<SubjectId>,
    pub active: bool,
}

/// An ordered time slot shared across all courses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    pub id: PeriodId,
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl Period {
    /// Create a period, rejecting an empty or inverted time range.
    pub fn new(id: PeriodId, start: NaiveTime, end: NaiveTime) -> Result<Self, CatalogError> {
        if start >= end {
            return Err(CatalogError::InvalidPeriod { period: id, start, end });
        }
        Ok(Self { id, start, end })
    }

    /// `"start - end"` label used by grid projections.
    pub fn label(&self) -> String {
        format!(
            "{} - {}",
            self.start.format("%H:%M:%S"),
            self.end.format("%H:%M:%S")
        )
    }
}

/// Referential-invariant violation in the reference data.
///
/// Each variant names the offending record so the caller can fix it; a run
/// that hits one of these is rejected before any slot is assigned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("subject {subject} ({name}) references unknown course {course}")]
    SubjectWithoutCourse {
        subject: SubjectId,
        name: String,
        course: CourseId,
    },

    #[error("staff {staff} ({name}) teaches unknown subject {subject}")]
    StaffTeachesUnknownSubject {
        staff: StaffId,
        name: String,
        subject: SubjectId,
    },

    #[error("period {period} has start {start} not before end {end}")]
    InvalidPeriod {
        period: PeriodId,
        start: NaiveTime,
        end: NaiveTime,
    },

    #[error("active course name \"{name}\" is shared by courses {first} and {second}")]
    DuplicateCourseName {
        name: String,
        first: CourseId,
        second: CourseId,
    },
}

/// Immutable, validated snapshot of the reference data for one generation run.
///
/// Lists are normalized on construction:
/// - courses sorted by id (the stable course iteration order),
/// - periods sorted by ascending start time, then id,
/// - per-course subject lists and per-subject qualified-staff lists sorted by
///   id, which is the deterministic candidate order.
#[derive(Debug, Clone)]
pub struct Catalog {
    courses: Vec<Course>,
    subjects: Vec<Subject>,
    staff: Vec<Staff>,
    periods: Vec<Period>,
    subjects_by_course: HashMap<CourseId, Vec<usize>>,
    staff_by_subject: HashMap<SubjectId, Vec<usize>>,
    course_index: HashMap<CourseId, usize>,
    subject_index: HashMap<SubjectId, usize>,
    staff_index: HashMap<StaffId, usize>,
}

impl Catalog {
    /// Build and validate a snapshot.
    ///
    /// # Errors
    ///
    /// Returns the first [`CatalogError`] found, naming the offending record.
    pub fn new(
        mut courses: Vec<Course>,
        mut subjects: Vec<Subject>,
        mut staff: Vec<Staff>,
        mut periods: Vec<Period>,
    ) -> Result<Self, CatalogError> {
        courses.sort_by_key(|c| c.id);
        subjects.sort_by_key(|s| s.id);
        staff.sort_by_key(|s| s.id);
        periods.sort_by_key(|p| (p.start, p.id));

        let course_index: HashMap<CourseId, usize> =
            courses.iter().enumerate().map(|(i, c)| (c.id, i)).collect();
        let subject_index: HashMap<SubjectId, usize> =
            subjects.iter().enumerate().map(|(i, s)| (s.id, i)).collect();
        let staff_index: HashMap<StaffId, usize> =
            staff.iter().enumerate().map(|(i, s)| (s.id, i)).collect();

        let mut names_seen: HashMap<&str, CourseId> = HashMap::new();
        for course in courses.iter().filter(|c| c.active) {
            if let Some(&first) = names_seen.get(course.name.as_str()) {
                return Err(CatalogError::DuplicateCourseName {
                    name: course.name.clone(),
                    first,
                    second: course.id,
                });
            }
            names_seen.insert(course.name.as_str(), course.id);
        }

        for period in &periods {
            if period.start >= period.end {
                return Err(CatalogError::InvalidPeriod {
                    period: period.id,
                    start: period.start,
                    end: period.end,
                });
            }
        }

        let mut subjects_by_course: HashMap<CourseId, Vec<usize>> = HashMap::new();
        for (i, subject) in subjects.iter().enumerate() {
            if !course_index.contains_key(&subject.course) {
                return Err(CatalogError::SubjectWithoutCourse {
                    subject: subject.id,
                    name: subject.name.clone(),
                    course: subject.course,
                });
            }
            subjects_by_course.entry(subject.course).or_default().push(i);
        }

        let mut staff_by_subject: HashMap<SubjectId, Vec<usize>> = HashMap::new();
        for (i, member) in staff.iter().enumerate() {
            for subject in &member.teaches {
                if !subject_index.contains_key(subject) {
                    return Err(CatalogError::StaffTeachesUnknownSubject {
                        staff: member.id,
                        name: member.name.clone(),
                        subject: *subject,
                    });
                }
                staff_by_subject.entry(*subject).or_default().push(i);
            }
        }

        Ok(Self {
            courses,
            subjects,
            staff,
            periods,
            subjects_by_course,
            staff_by_subject,
            course_index,
            subject_index,
            staff_index,
        })
    }

    /// Courses in stable id order.
    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    /// All subjects in id order.
    pub fn subjects(&self) -> &[Subject] {
        &self.subjects
    }

    /// All staff in id order.
    pub fn staff(&self) -> &[Staff] {
        &self.staff
    }

    /// Periods in ascending start-time order.
    pub fn periods(&self) -> &[Period] {
        &self.periods
    }

    pub fn course(&self, id: CourseId) -> Option<&Course> {
        self.course_index.get(&id).map(|&i| &self.courses[i])
    }

    pub fn subject(&self, id: SubjectId) -> Option<&Subject> {
        self.subject_index.get(&id).map(|&i| &self.subjects[i])
    }

    pub fn staff_member(&self, id: StaffId) -> Option<&Staff> {
        self.staff_index.get(&id).map(|&i| &self.staff[i])
    }

    /// Subjects belonging to `course`, in id order.
    pub fn subjects_for(&self, course: CourseId) -> impl Iterator<Item = &Subject> {
        self.subjects_by_course
            .get(&course)
            .into_iter()
            .flatten()
            .map(move |&i| &self.subjects[i])
    }

    /// Staff whose teaches-set includes `subject`, in id order.
    pub fn qualified_staff(&self, subject: SubjectId) -> impl Iterator<Item = &Staff> {
        self.staff_by_subject
            .get(&subject)
            .into_iter()
            .flatten()
            .map(move |&i| &self.staff[i])
    }

    /// Total number of grid slots: courses x days x periods.
    pub fn slot_capacity(&self) -> usize {
        self.courses.len() * Day::ALL.len() * self.periods.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn course(id: i64, name: &str) -> Course {
        Course {
            id: CourseId::new(id),
            name: name.to_string(),
            active: true,
        }
    }

    fn subject(id: i64, name: &str, course: i64) -> Subject {
        Subject {
            id: SubjectId::new(id),
            name: name.to_string(),
            course: CourseId::new(course),
            active: true,
        }
    }

    fn staff(id: i64, name: &str, teaches: &[i64]) -> Staff {
        Staff {
            id: StaffId::new(id),
            name: name.to_string(),
            teaches: teaches.iter().map(|&s| SubjectId::new(s)).collect(),
            active: true,
        }
    }

    #[test]
    fn test_period_rejects_inverted_range() {
        let err = Period::new(PeriodId::new(1), t(10, 0), t(9, 0)).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidPeriod { .. }));
        assert!(Period::new(PeriodId::new(1), t(9, 0), t(9, 0)).is_err());
        assert!(Period::new(PeriodId::new(1), t(9, 0), t(10, 0)).is_ok());
    }

    #[test]
    fn test_period_label() {
        let p = Period::new(PeriodId::new(1), t(9, 0), t(10, 30)).unwrap();
        assert_eq!(p.label(), "09:00:00 - 10:30:00");
    }

    #[test]
    fn test_catalog_sorts_and_indexes() {
        let catalog = Catalog::new(
            vec![course(2, "B"), course(1, "A")],
            vec![subject(11, "Maths", 1), subject(10, "Physics", 2)],
            vec![staff(5, "Ada", &[10, 11])],
            vec![
                Period::new(PeriodId::new(2), t(10, 0), t(11, 0)).unwrap(),
                Period::new(PeriodId::new(1), t(9, 0), t(10, 0)).unwrap(),
            ],
        )
        .unwrap();

        let course_ids: Vec<i64> = catalog.courses().iter().map(|c| c.id.value()).collect();
        assert_eq!(course_ids, vec![1, 2]);
        let period_ids: Vec<i64> = catalog.periods().iter().map(|p| p.id.value()).collect();
        assert_eq!(period_ids, vec![1, 2]);

        let maths: Vec<i64> = catalog
            .subjects_for(CourseId::new(1))
            .map(|s| s.id.value())
            .collect();
        assert_eq!(maths, vec![11]);
        assert_eq!(
            catalog.qualified_staff(SubjectId::new(10)).count(),
            1
        );
        assert_eq!(catalog.slot_capacity(), 2 * 5 * 2);
    }

    #[test]
    fn test_subject_with_unknown_course_is_rejected() {
        let err = Catalog::new(
            vec![course(1, "A")],
            vec![subject(10, "Orphan", 99)],
            vec![],
            vec![],
        )
        .unwrap_err();
        match err {
            CatalogError::SubjectWithoutCourse { subject, course, .. } => {
                assert_eq!(subject.value(), 10);
                assert_eq!(course.value(), 99);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_staff_with_unknown_subject_is_rejected() {
        let err = Catalog::new(
            vec![course(1, "A")],
            vec![subject(10, "Maths", 1)],
            vec![staff(5, "Ada", &[10, 42])],
            vec![],
        )
        .unwrap_err();
        assert!(matches!(
            err,
            CatalogError::StaffTeachesUnknownSubject { subject, .. } if subject.value() == 42
        ));
    }

    #[test]
    fn test_duplicate_active_course_name_is_rejected() {
        let err = Catalog::new(
            vec![course(1, "CS"), course(2, "CS")],
            vec![],
            vec![],
            vec![],
        )
        .unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateCourseName { .. }));

        // An inactive duplicate is fine.
        let mut inactive = course(2, "CS");
        inactive.active = false;
        assert!(Catalog::new(vec![course(1, "CS"), inactive], vec![], vec![], vec![]).is_ok());
    }
}
