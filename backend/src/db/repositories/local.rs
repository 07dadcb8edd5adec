//! In-memory local repository implementation.
//!
//! This module provides a local implementation of both repository traits
//! suitable for unit testing and single-node deployments. All data lives in
//! memory behind one `RwLock`, which makes the replace-all swap trivially
//! atomic: readers see the entry vector before or after the swap, never
//! mid-write.
//!
//! The seeding helpers (`add_course`, `add_subject`, ...) stand in for the
//! external reference-data collaborator that owns these records in a full
//! deployment.

use async_trait::async_trait;
use chrono::NaiveTime;
use parking_lot::RwLock;
use std::collections::HashSet;
use std::sync::Arc;

use crate::db::repository::{
    CatalogRepository, RepositoryError, RepositoryResult, TimetableRepository,
};
use crate::models::{
    Course, CourseId, Period, PeriodId, Staff, StaffId, Subject, SubjectId, TimetableEntry,
};

/// In-memory local repository.
///
/// # Example
/// ```
/// use timetable_rust::db::repositories::LocalRepository;
///
/// let repo = LocalRepository::new();
/// let course = repo.add_course("Computer Science");
/// let subject = repo.add_subject("Algorithms", course);
/// let _staff = repo.add_staff("Ada", &[subject]);
/// ```
#[derive(Clone, Default)]
pub struct LocalRepository {
    data: Arc<RwLock<LocalData>>,
}

struct LocalData {
    courses: Vec<Course>,
    subjects: Vec<Subject>,
    staff: Vec<Staff>,
    periods: Vec<Period>,

    entries: Vec<TimetableEntry>,

    // ID counters for the seeding helpers
    next_course_id: i64,
    next_subject_id: i64,
    next_staff_id: i64,
    next_period_id: i64,

    // Connection health
    is_healthy: bool,
}

impl Default for LocalData {
    fn default() -> Self {
        Self {
            courses: Vec::new(),
            subjects: Vec::new(),
            staff: Vec::new(),
            periods: Vec::new(),
            entries: Vec::new(),
            next_course_id: 1,
            next_subject_id: 1,
            next_staff_id: 1,
            next_period_id: 1,
            is_healthy: true,
        }
    }
}

impl LocalRepository {
    /// Create a new empty local repository.
    pub fn new() -> Self {
        Self::default()
    }

    // ==================== Reference-data seeding helpers ====================

    /// Add an active course and return its assigned id.
    pub fn add_course(&self, name: &str) -> CourseId {
        let mut data = self.data.write();
        let id = CourseId::new(data.next_course_id);
        data.next_course_id += 1;
        data.courses.push(Course {
            id,
            name: name.to_string(),
            active: true,
        });
        id
    }

    /// Add an active subject belonging to `course`.
    pub fn add_subject(&self, name: &str, course: CourseId) -> SubjectId {
        let mut data = self.data.write();
        let id = SubjectId::new(data.next_subject_id);
        data.next_subject_id += 1;
        data.subjects.push(Subject {
            id,
            name: name.to_string(),
            course,
            active: true,
        });
        id
    }

    /// Add an active staff member with the given teaches-set.
    pub fn add_staff(&self, name: &str, teaches: &[SubjectId]) -> StaffId {
        let mut data = self.data.write();
        let id = StaffId::new(data.next_staff_id);
        data.next_staff_id += 1;
        data.staff.push(Staff {
            id,
            name: name.to_string(),
            teaches: teaches.to_vec(),
            active: true,
        });
        id
    }

    /// Add a period, validating `start < end`.
    pub fn add_period(&self, start: NaiveTime, end: NaiveTime) -> RepositoryResult<PeriodId> {
        let mut data = self.data.write();
        let id = PeriodId::new(data.next_period_id);
        let period = Period::new(id, start, end)
            .map_err(|e| RepositoryError::validation(e.to_string()).with_operation("add_period"))?;
        data.next_period_id += 1;
        data.periods.push(period);
        Ok(id)
    }

    /// Flip a course's active flag.
    pub fn set_course_active(&self, id: CourseId, active: bool) {
        let mut data = self.data.write();
        if let Some(course) = data.courses.iter_mut().find(|c| c.id == id) {
            course.active = active;
        }
    }

    /// Flip a subject's active flag.
    pub fn set_subject_active(&self, id: SubjectId, active: bool) {
        let mut data = self.data.write();
        if let Some(subject) = data.subjects.iter_mut().find(|s| s.id == id) {
            subject.active = active;
        }
    }

    /// Flip a staff member's active flag.
    pub fn set_staff_active(&self, id: StaffId, active: bool) {
        let mut data = self.data.write();
        if let Some(member) = data.staff.iter_mut().find(|s| s.id == id) {
            member.active = active;
        }
    }

    // ==================== Test/maintenance helpers ====================

    /// Set the health status for testing connection failures.
    pub fn set_healthy(&self, healthy: bool) {
        self.data.write().is_healthy = healthy;
    }

    /// Drop all data, reference records included.
    pub fn reset(&self) {
        let mut data = self.data.write();
        let healthy = data.is_healthy;
        *data = LocalData {
            is_healthy: healthy,
            ..Default::default()
        };
    }

    /// Number of persisted entries (synchronous, for test assertions).
    pub fn entry_count(&self) -> usize {
        self.data.read().entries.len()
    }

    /// Helper to check health and return an error if unhealthy.
    fn check_health(&self) -> RepositoryResult<()> {
        if !self.data.read().is_healthy {
            return Err(RepositoryError::connection("Store is not healthy"));
        }
        Ok(())
    }
}

#[async_trait]
impl CatalogRepository for LocalRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(self.data.read().is_healthy)
    }

    async fn list_active_courses(&self) -> RepositoryResult<Vec<Course>> {
        self.check_health()?;
        let data = self.data.read();
        let mut courses: Vec<Course> = data.courses.iter().filter(|c| c.active).cloned().collect();
        courses.sort_by_key(|c| c.id);
        Ok(courses)
    }

    async fn list_active_subjects(&self) -> RepositoryResult<Vec<Subject>> {
        self.check_health()?;
        let data = self.data.read();
        let active_courses: HashSet<CourseId> = data
            .courses
            .iter()
            .filter(|c| c.active)
            .map(|c| c.id)
            .collect();
        let mut subjects: Vec<Subject> = data
            .subjects
            .iter()
            .filter(|s| s.active && active_courses.contains(&s.course))
            .cloned()
            .collect();
        subjects.sort_by_key(|s| s.id);
        Ok(subjects)
    }

    async fn list_active_staff(&self) -> RepositoryResult<Vec<Staff>> {
        self.check_health()?;
        let visible: HashSet<SubjectId> = self
            .list_active_subjects()
            .await?
            .into_iter()
            .map(|s| s.id)
            .collect();
        let data = self.data.read();
        let mut staff: Vec<Staff> = data
            .staff
            .iter()
            .filter(|m| m.active)
            .cloned()
            .map(|mut m| {
                // Present the same active view the subject listing does.
                m.teaches.retain(|s| visible.contains(s));
                m
            })
            .collect();
        staff.sort_by_key(|m| m.id);
        Ok(staff)
    }

    async fn list_periods(&self) -> RepositoryResult<Vec<Period>> {
        self.check_health()?;
        let data = self.data.read();
        let mut periods = data.periods.clone();
        periods.sort_by_key(|p| (p.start, p.id));
        Ok(periods)
    }
}

#[async_trait]
impl TimetableRepository for LocalRepository {
    async fn count_entries(&self) -> RepositoryResult<usize> {
        self.check_health()?;
        Ok(self.data.read().entries.len())
    }

    async fn list_entries(&self) -> RepositoryResult<Vec<TimetableEntry>> {
        self.check_health()?;
        Ok(self.data.read().entries.clone())
    }

    async fn replace_entries(&self, entries: Vec<TimetableEntry>) -> RepositoryResult<usize> {
        self.check_health()?;
        let stored = entries.len();
        // One write lock covers delete-all + insert-all: the swap is atomic.
        self.data.write().entries = entries;
        Ok(stored)
    }

    async fn clear_entries(&self) -> RepositoryResult<usize> {
        self.check_health()?;
        let mut data = self.data.write();
        let removed = data.entries.len();
        data.entries.clear();
        Ok(removed)
    }
}
