//! Unit tests for the db service layer against the local repository.

use chrono::NaiveTime;

use super::services::{self, CatalogLoadError};
use crate::db::repositories::LocalRepository;
use crate::db::repository::TimetableRepository;
use crate::models::{CatalogError, CourseId, Day, TimetableEntry};

fn t(h: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, 0, 0).unwrap()
}

#[tokio::test]
async fn test_load_catalog_snapshot() {
    let repo = LocalRepository::new();
    let cs = repo.add_course("CS");
    let maths = repo.add_subject("Maths", cs);
    repo.add_staff("Ada", &[maths]);
    repo.add_period(t(9), t(10)).unwrap();

    let catalog = services::load_catalog(&repo).await.unwrap();
    assert_eq!(catalog.courses().len(), 1);
    assert_eq!(catalog.subjects().len(), 1);
    assert_eq!(catalog.staff().len(), 1);
    assert_eq!(catalog.periods().len(), 1);
    assert_eq!(catalog.slot_capacity(), 5);
}

#[tokio::test]
async fn test_load_catalog_rejects_duplicate_course_names() {
    let repo = LocalRepository::new();
    repo.add_course("CS");
    repo.add_course("CS");

    let err = services::load_catalog(&repo).await.unwrap_err();
    match err {
        CatalogLoadError::Invalid(CatalogError::DuplicateCourseName { name, .. }) => {
            assert_eq!(name, "CS");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_load_catalog_tolerates_deactivated_references() {
    // Deactivating a subject removes it from the active view everywhere, so
    // the snapshot stays consistent instead of failing validation.
    let repo = LocalRepository::new();
    let cs = repo.add_course("CS");
    let maths = repo.add_subject("Maths", cs);
    let physics = repo.add_subject("Physics", cs);
    repo.add_staff("Ada", &[maths, physics]);
    repo.set_subject_active(physics, false);

    let catalog = services::load_catalog(&repo).await.unwrap();
    assert_eq!(catalog.subjects().len(), 1);
    assert_eq!(catalog.staff()[0].teaches, vec![maths]);
}

#[tokio::test]
async fn test_load_catalog_propagates_store_failure() {
    let repo = LocalRepository::new();
    repo.set_healthy(false);
    let err = services::load_catalog(&repo).await.unwrap_err();
    assert!(matches!(err, CatalogLoadError::Repository(_)));
}

#[tokio::test]
async fn test_resolved_entries_joins_names() {
    let repo = LocalRepository::new();
    let cs = repo.add_course("CS");
    let maths = repo.add_subject("Maths", cs);
    let ada = repo.add_staff("Ada", &[maths]);
    let p1 = repo.add_period(t(9), t(10)).unwrap();

    repo.replace_entries(vec![TimetableEntry {
        course: cs,
        day: Day::Monday,
        period: p1,
        subject: maths,
        staff: ada,
    }])
    .await
    .unwrap();

    let resolved = services::resolved_entries(&repo).await.unwrap();
    assert_eq!(resolved.len(), 1);
    assert_eq!(resolved[0].course_name, "CS");
    assert_eq!(resolved[0].subject_name, "Maths");
    assert_eq!(resolved[0].staff_name, "Ada");
    assert_eq!(resolved[0].day, Day::Monday);
}

#[tokio::test]
async fn test_resolved_entries_drops_dangling_refs() {
    let repo = LocalRepository::new();
    let cs = repo.add_course("CS");
    let maths = repo.add_subject("Maths", cs);
    let ada = repo.add_staff("Ada", &[maths]);
    let p1 = repo.add_period(t(9), t(10)).unwrap();

    repo.replace_entries(vec![
        TimetableEntry {
            course: cs,
            day: Day::Monday,
            period: p1,
            subject: maths,
            staff: ada,
        },
        // References a course that was never created.
        TimetableEntry {
            course: CourseId::new(99),
            day: Day::Monday,
            period: p1,
            subject: maths,
            staff: ada,
        },
    ])
    .await
    .unwrap();

    let resolved = services::resolved_entries(&repo).await.unwrap();
    assert_eq!(resolved.len(), 1);
}
