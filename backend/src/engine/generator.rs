//! Single-pass slot assignment over the weekly grid.
//!
//! The pass visits every `(course, day, period)` slot exactly once, in a
//! stable order, and commits the first candidate that survives the constraint
//! checks. There is no backtracking: a committed entry is never revisited, so
//! the result is not globally optimal, only guaranteed to respect the hard
//! constraints. Slots with no surviving candidate stay empty and are reported,
//! not treated as errors.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::models::{Catalog, Day, Slot, TimetableEntry};

use super::constraints::{Candidate, CommittedState, ConstraintSet};

/// Tuning knobs for one generation run.
#[derive(Debug, Clone, Copy)]
pub struct GenerationParams {
    pub constraints: ConstraintSet,
    /// When true the daily-repeat limit is enforced as a hard rule and slots
    /// may stay empty because of it. Default is the soft behaviour: prefer
    /// variety, relax when nothing else fits.
    pub strict_daily_limit: bool,
    /// Optional seed for candidate shuffling. `None` keeps the fully
    /// deterministic `(subject id, staff id)` order; `Some(seed)` gives a
    /// reproducible varied timetable and is recorded in the report.
    pub shuffle_seed: Option<u64>,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            constraints: ConstraintSet::default(),
            strict_daily_limit: false,
            shuffle_seed: None,
        }
    }
}

/// Outcome of one generation run.
#[derive(Debug, Clone)]
pub struct GenerationReport {
    /// Committed entries; every one satisfies the hard constraints.
    pub entries: Vec<TimetableEntry>,
    /// Slots left without an assignment, in visit order.
    pub unfilled: Vec<Slot>,
    /// The shuffle seed the run used, if any.
    pub shuffle_seed: Option<u64>,
}

impl GenerationReport {
    pub fn unfilled_slot_count(&self) -> usize {
        self.unfilled.len()
    }
}

/// Fill the full grid for every course in the catalog.
///
/// Iteration order is courses by id, days Monday to Friday, periods by
/// ascending start time; the catalog guarantees those orders. For a fixed
/// catalog and fixed params the output is identical across runs.
pub fn fill_grid(catalog: &Catalog, params: &GenerationParams) -> GenerationReport {
    let mut rng = params.shuffle_seed.map(StdRng::seed_from_u64);
    let mut state = CommittedState::new();
    let mut entries = Vec::new();
    let mut unfilled = Vec::new();

    for course in catalog.courses() {
        for day in Day::ALL {
            for period in catalog.periods() {
                let slot = Slot {
                    course: course.id,
                    day,
                    period: period.id,
                };

                let mut candidates: Vec<Candidate> = catalog
                    .subjects_for(course.id)
                    .flat_map(|subject| {
                        catalog.qualified_staff(subject.id).map(move |member| Candidate {
                            slot,
                            subject: subject.id,
                            staff: member.id,
                        })
                    })
                    .collect();

                if let Some(rng) = rng.as_mut() {
                    candidates.shuffle(rng);
                }

                let picked = pick(catalog, &state, params, &candidates);
                match picked {
                    Some(candidate) => {
                        let entry = TimetableEntry {
                            course: candidate.slot.course,
                            day: candidate.slot.day,
                            period: candidate.slot.period,
                            subject: candidate.subject,
                            staff: candidate.staff,
                        };
                        state.commit(&entry);
                        entries.push(entry);
                    }
                    None => {
                        log::debug!(
                            "no valid assignment for course {} on {} period {}",
                            course.id,
                            day,
                            period.id
                        );
                        unfilled.push(slot);
                    }
                }
            }
        }
    }

    GenerationReport {
        entries,
        unfilled,
        shuffle_seed: params.shuffle_seed,
    }
}

/// First candidate that passes all rules; when none does and the daily-repeat
/// rule is soft, first candidate that passes the hard rules alone.
fn pick(
    catalog: &Catalog,
    state: &CommittedState,
    params: &GenerationParams,
    candidates: &[Candidate],
) -> Option<Candidate> {
    let preferred = candidates
        .iter()
        .find(|c| params.constraints.check(catalog, state, c).is_ok());
    if preferred.is_some() || params.strict_daily_limit {
        return preferred.copied();
    }

    candidates
        .iter()
        .find(|c| params.constraints.check_hard(catalog, state, c).is_ok())
        .copied()
}
