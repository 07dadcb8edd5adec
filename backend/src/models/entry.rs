//! Committed timetable assignments.

use serde::{Deserialize, Serialize};

use super::day::Day;
use super::ids::{CourseId, PeriodId, StaffId, SubjectId};

/// A unique `(course, day, period)` coordinate in the weekly grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Slot {
    pub course: CourseId,
    pub day: Day,
    pub period: PeriodId,
}

/// One committed assignment of a subject and staff member to a slot.
///
/// Entries are created in bulk by the assignment engine; at most one entry
/// exists per slot, the subject belongs to the entry's course, and the staff
/// member teaches the subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimetableEntry {
    pub course: CourseId,
    pub day: Day,
    pub period: PeriodId,
    pub subject: SubjectId,
    pub staff: StaffId,
}

impl TimetableEntry {
    /// The grid coordinate this entry occupies.
    pub fn slot(&self) -> Slot {
        Slot {
            course: self.course,
            day: self.day,
            period: self.period,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_projection() {
        let entry = TimetableEntry {
            course: CourseId::new(1),
            day: Day::Tuesday,
            period: PeriodId::new(3),
            subject: SubjectId::new(7),
            staff: StaffId::new(9),
        };
        let slot = entry.slot();
        assert_eq!(slot.course.value(), 1);
        assert_eq!(slot.day, Day::Tuesday);
        assert_eq!(slot.period.value(), 3);
    }
}
