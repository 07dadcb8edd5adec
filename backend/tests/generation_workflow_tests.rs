//! End-to-end tests for the regeneration workflow.
//!
//! These tests exercise the full stack from the controller through the
//! service layer to the local repository, validating the Empty/Populated
//! state machine and the invariants of every persisted grid.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::NaiveTime;

use timetable_rust::db::repositories::LocalRepository;
use timetable_rust::db::repository::{FullRepository, TimetableRepository};
use timetable_rust::models::Day;
use timetable_rust::services::{
    GenerateError, GenerateOutcome, GenerationConfig, RegenerationController,
};

fn t(h: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, 0, 0).unwrap()
}

/// Two courses, two subjects each, three staff, two periods.
fn seeded_repo() -> Arc<LocalRepository> {
    let repo = Arc::new(LocalRepository::new());
    let cs = repo.add_course("Computer Science");
    let ee = repo.add_course("Electronics");
    let algo = repo.add_subject("Algorithms", cs);
    let maths = repo.add_subject("Maths", cs);
    let circuits = repo.add_subject("Circuits", ee);
    let signals = repo.add_subject("Signals", ee);
    repo.add_staff("Ada", &[algo, circuits]);
    repo.add_staff("Grace", &[maths, signals]);
    repo.add_staff("Alan", &[algo, maths, circuits, signals]);
    repo.add_period(t(9), t(10)).unwrap();
    repo.add_period(t(10), t(11)).unwrap();
    repo
}

fn controller(repo: &Arc<LocalRepository>) -> RegenerationController {
    RegenerationController::new(
        repo.clone() as Arc<dyn FullRepository>,
        GenerationConfig::default(),
    )
}

#[tokio::test]
async fn test_generate_on_empty_persists_a_valid_grid() {
    let repo = seeded_repo();
    let controller = controller(&repo);

    let outcome = controller.generate().await.unwrap();
    let (entries, unfilled) = match outcome {
        GenerateOutcome::Generated {
            entries,
            unfilled_slot_count,
        } => (entries, unfilled_slot_count),
        other => panic!("expected generated, got {other:?}"),
    };

    // 2 courses x 5 days x 2 periods, all covered by the seeded staff.
    assert_eq!(entries.len(), 20);
    assert_eq!(unfilled, 0);
    assert_eq!(repo.entry_count(), 20);

    // No two entries share a slot.
    let slots: HashSet<_> = entries.iter().map(|e| e.slot()).collect();
    assert_eq!(slots.len(), entries.len());

    // No staff member teaches two courses in the same (day, period).
    let mut seen = HashSet::new();
    for entry in &entries {
        assert!(seen.insert((entry.day, entry.period, entry.staff)));
    }
}

#[tokio::test]
async fn test_generate_on_populated_reports_conflict_and_changes_nothing() {
    let repo = seeded_repo();
    let controller = controller(&repo);

    controller.generate().await.unwrap();
    let before = repo.list_entries().await.unwrap();
    assert!(!before.is_empty());

    let outcome = controller.generate().await.unwrap();
    match outcome {
        GenerateOutcome::Conflict { existing_count } => {
            assert_eq!(existing_count, before.len());
        }
        other => panic!("expected conflict, got {other:?}"),
    }

    // The existing grid is untouched.
    assert_eq!(repo.list_entries().await.unwrap(), before);
}

#[tokio::test]
async fn test_clear_is_idempotent() {
    let repo = seeded_repo();
    let controller = controller(&repo);

    controller.generate().await.unwrap();
    let removed = controller.clear().await.unwrap();
    assert!(removed > 0);
    assert_eq!(repo.entry_count(), 0);

    // Clearing an already-empty store is a no-op success.
    assert_eq!(controller.clear().await.unwrap(), 0);
    assert_eq!(repo.entry_count(), 0);
}

#[tokio::test]
async fn test_confirmed_replace_yields_a_fresh_valid_grid() {
    let repo = seeded_repo();
    let controller = controller(&repo);

    controller.generate().await.unwrap();
    assert!(matches!(
        controller.generate().await.unwrap(),
        GenerateOutcome::Conflict { .. }
    ));

    // Confirmed replace: clear, then generate.
    controller.clear().await.unwrap();
    let outcome = controller.generate().await.unwrap();
    let entries = match outcome {
        GenerateOutcome::Generated { entries, .. } => entries,
        other => panic!("expected generated, got {other:?}"),
    };

    assert_eq!(entries.len(), 20);
    let mut slots = HashSet::new();
    let mut staff_slots = HashSet::new();
    for entry in &entries {
        assert!(slots.insert(entry.slot()));
        assert!(staff_slots.insert((entry.day, entry.period, entry.staff)));
    }
}

#[tokio::test]
async fn test_generate_never_conflicts_on_empty_store() {
    let repo = seeded_repo();
    let controller = controller(&repo);

    for _ in 0..3 {
        let outcome = controller.generate().await.unwrap();
        assert!(matches!(outcome, GenerateOutcome::Generated { .. }));
        controller.clear().await.unwrap();
    }
}

#[tokio::test]
async fn test_insufficient_staffing_degrades_to_unfilled_slots() {
    // Two courses, one shared staff member, one period: the second course's
    // slot stays empty every day and is reported, not treated as an error.
    let repo = Arc::new(LocalRepository::new());
    let cs = repo.add_course("CS");
    let ee = repo.add_course("EE");
    let maths = repo.add_subject("Maths", cs);
    let circuits = repo.add_subject("Circuits", ee);
    repo.add_staff("Ada", &[maths, circuits]);
    repo.add_period(t(9), t(10)).unwrap();

    let controller = controller(&repo);
    let outcome = controller.generate().await.unwrap();
    match outcome {
        GenerateOutcome::Generated {
            entries,
            unfilled_slot_count,
        } => {
            assert_eq!(entries.len(), Day::ALL.len());
            assert_eq!(unfilled_slot_count, Day::ALL.len());
        }
        other => panic!("expected generated, got {other:?}"),
    }
}

#[tokio::test]
async fn test_invalid_reference_data_fails_fast_with_no_write() {
    let repo = Arc::new(LocalRepository::new());
    repo.add_course("CS");
    repo.add_course("CS"); // duplicate active name
    repo.add_period(t(9), t(10)).unwrap();

    let controller = controller(&repo);
    let err = controller.generate().await.unwrap_err();
    assert!(matches!(err, GenerateError::Validation(_)));
    assert!(err.to_string().contains("CS"));
    assert_eq!(repo.entry_count(), 0);
}

#[tokio::test]
async fn test_store_failure_leaves_prior_state_intact() {
    let repo = seeded_repo();
    let controller = controller(&repo);

    controller.generate().await.unwrap();
    let before = repo.list_entries().await.unwrap();

    repo.set_healthy(false);
    controller.clear().await.unwrap_err();
    assert!(matches!(
        controller.generate().await.unwrap_err(),
        GenerateError::Repository(_)
    ));

    repo.set_healthy(true);
    assert_eq!(repo.list_entries().await.unwrap(), before);
}

#[tokio::test]
async fn test_seeded_generation_is_reproducible_end_to_end() {
    let config = GenerationConfig {
        shuffle_seed: Some(1234),
        ..Default::default()
    };

    let mut runs = Vec::new();
    for _ in 0..2 {
        let repo = seeded_repo();
        let controller =
            RegenerationController::new(repo.clone() as Arc<dyn FullRepository>, config);
        match controller.generate().await.unwrap() {
            GenerateOutcome::Generated { entries, .. } => runs.push(entries),
            other => panic!("expected generated, got {other:?}"),
        }
    }
    assert_eq!(runs[0], runs[1]);
}

#[tokio::test]
async fn test_concurrent_generates_serialize() {
    let repo = seeded_repo();
    let controller = Arc::new(controller(&repo));

    let mut handles = Vec::new();
    for _ in 0..4 {
        let controller = controller.clone();
        handles.push(tokio::spawn(async move { controller.generate().await }));
    }

    let mut generated = 0;
    let mut conflicts = 0;
    for handle in handles {
        match handle.await.unwrap().unwrap() {
            GenerateOutcome::Generated { .. } => generated += 1,
            GenerateOutcome::Conflict { .. } => conflicts += 1,
        }
    }

    // Exactly one call wins; the rest observe its result as a conflict.
    assert_eq!(generated, 1);
    assert_eq!(conflicts, 3);
    assert_eq!(repo.entry_count(), 20);
}
