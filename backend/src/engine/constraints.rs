//! Constraint checks for candidate assignments.
//!
//! All checks are pure: they evaluate a candidate tuple against an in-memory
//! index of the entries committed so far in the current run and never mutate
//! anything. The engine owns the index and commits entries to it.

use std::collections::{HashMap, HashSet};

use crate::models::{Catalog, CourseId, Day, PeriodId, Slot, StaffId, SubjectId, TimetableEntry};

/// Why a candidate was rejected. Variants are ordered the way the rules are
/// evaluated; the first failing rule wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintViolation {
    /// An entry already occupies the `(course, day, period)` slot.
    SlotOccupied,
    /// The subject does not belong to the slot's course.
    SubjectOutsideCourse,
    /// The staff member's teaches-set does not include the subject.
    StaffNotQualified,
    /// The staff member already teaches another course at `(day, period)`.
    StaffDoubleBooked,
    /// The subject already reached its per-day limit for this course (soft).
    DailyRepeatLimit,
}

impl ConstraintViolation {
    /// Hard violations can never be relaxed; the soft daily-repeat rule can.
    pub fn is_hard(&self) -> bool {
        !matches!(self, ConstraintViolation::DailyRepeatLimit)
    }
}

/// A proposed `(course, day, period, subject, staff)` assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    pub slot: Slot,
    pub subject: SubjectId,
    pub staff: StaffId,
}

/// Index over the entries committed so far in one generation run.
///
/// Staff business is tracked per `(day, period)` across all courses because
/// staff exclusivity is a cross-course rule.
#[derive(Debug, Default)]
pub struct CommittedState {
    occupied: HashSet<Slot>,
    busy_staff: HashMap<(Day, PeriodId), HashSet<StaffId>>,
    daily_subjects: HashMap<(CourseId, Day, SubjectId), u32>,
}

impl CommittedState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a committed entry in the index.
    pub fn commit(&mut self, entry: &TimetableEntry) {
        self.occupied.insert(entry.slot());
        self.busy_staff
            .entry((entry.day, entry.period))
            .or_default()
            .insert(entry.staff);
        *self
            .daily_subjects
            .entry((entry.course, entry.day, entry.subject))
            .or_default() += 1;
    }

    pub fn is_occupied(&self, slot: Slot) -> bool {
        self.occupied.contains(&slot)
    }

    pub fn is_staff_busy(&self, day: Day, period: PeriodId, staff: StaffId) -> bool {
        self.busy_staff
            .get(&(day, period))
            .is_some_and(|set| set.contains(&staff))
    }

    /// How many times `subject` is already scheduled for `course` on `day`.
    pub fn daily_count(&self, course: CourseId, day: Day, subject: SubjectId) -> u32 {
        self.daily_subjects
            .get(&(course, day, subject))
            .copied()
            .unwrap_or(0)
    }
}

/// The rule set a candidate must satisfy before it may be committed.
#[derive(Debug, Clone, Copy)]
pub struct ConstraintSet {
    /// Preferred maximum number of times one subject appears per course per
    /// day. Soft: the engine may relax it when nothing else fits.
    pub daily_repeat_limit: u32,
}

impl Default for ConstraintSet {
    fn default() -> Self {
        Self {
            daily_repeat_limit: 1,
        }
    }
}

impl ConstraintSet {
    /// Evaluate all rules, hard first, fail-fast.
    pub fn check(
        &self,
        catalog: &Catalog,
        state: &CommittedState,
        candidate: &Candidate,
    ) -> Result<(), ConstraintViolation> {
        self.check_hard(catalog, state, candidate)?;
        let repeats = state.daily_count(candidate.slot.course, candidate.slot.day, candidate.subject);
        if repeats >= self.daily_repeat_limit {
            return Err(ConstraintViolation::DailyRepeatLimit);
        }
        Ok(())
    }

    /// Evaluate only the hard rules 1-4 (uniqueness, ownership, qualification,
    /// exclusivity). Used when the soft daily-repeat rule has been relaxed.
    pub fn check_hard(
        &self,
        catalog: &Catalog,
        state: &CommittedState,
        candidate: &Candidate,
    ) -> Result<(), ConstraintViolation> {
        if state.is_occupied(candidate.slot) {
            return Err(ConstraintViolation::SlotOccupied);
        }

        match catalog.subject(candidate.subject) {
            Some(subject) if subject.course == candidate.slot.course => {}
            _ => return Err(ConstraintViolation::SubjectOutsideCourse),
        }

        match catalog.staff_member(candidate.staff) {
            Some(member) if member.teaches.contains(&candidate.subject) => {}
            _ => return Err(ConstraintViolation::StaffNotQualified),
        }

        if state.is_staff_busy(candidate.slot.day, candidate.slot.period, candidate.staff) {
            return Err(ConstraintViolation::StaffDoubleBooked);
        }

        Ok(())
    }
}
