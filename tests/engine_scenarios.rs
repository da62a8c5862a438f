//! End-to-end grade tracking against the bundled catalog

use gpa_tracker::core::catalog::{CreditCatalog, Track};
use gpa_tracker::core::gpa::GradeSubmission;
use gpa_tracker::core::ledger::StudentLedger;
use gpa_tracker::core::models::{SemesterLabel, StudentProfile};
use gpa_tracker::core::progress::RequiredSgpa;
use gpa_tracker::core::store::LedgerStore;
use gpa_tracker::core::{ErrorKind, GpaError};
use tempfile::TempDir;

const EPS: f64 = 1e-9;

fn grades(pairs: &[(&str, &str)]) -> Vec<GradeSubmission> {
    pairs
        .iter()
        .map(|(subject, grade)| GradeSubmission::new(*subject, *grade))
        .collect()
}

fn cse_student(current: u8, target: f64) -> StudentLedger {
    let profile = StudentProfile::new(
        "KTE21CS042".to_string(),
        "CSE".to_string(),
        SemesterLabel::new(current).expect("valid semester"),
    )
    .with_target(target);
    StudentLedger::new(profile)
}

fn first_year(ledger: &mut StudentLedger, catalog: &CreditCatalog) {
    ledger
        .submit_grades(
            catalog,
            "semester_1",
            &grades(&[
                ("Maths", "S"),
                ("Physics", "A+"),
                ("Engineering Mechanics", "B"),
                ("Basics of Civil and Mechanical Engineering", "F"),
                ("Life Skills", "S"),
                ("Engineering Physics Lab", "S"),
                ("Civil and Mechanical Workshop", "A"),
            ]),
        )
        .expect("semester 1 accepted");
    ledger
        .submit_grades(
            catalog,
            "semester_2",
            &grades(&[
                ("Vector Calculus", "F"),
                ("Engineering Chemistry", "F"),
                ("Engineering Graphics", "F"),
                ("Basics of Electrical and Electronics Engineering", "F"),
                ("Programming in C", "P"),
                ("Engineering Chemistry Lab", "S"),
                ("Electrical and Electronics Workshop", "S"),
            ]),
        )
        .expect("semester 2 accepted");
}

#[test]
fn first_year_totals() {
    let catalog = CreditCatalog::builtin().expect("bundled catalog");
    let mut ledger = cse_student(4, 8.0);
    first_year(&mut ledger, &catalog);

    let sem1 = ledger.record(SemesterLabel::new(1).unwrap()).unwrap();
    assert_eq!(sem1.total_credits, 17);
    assert_eq!(sem1.earned_credits, 13);
    assert_eq!(sem1.complete_courses, 6);
    assert!((sem1.total_points - 117.0).abs() < EPS);

    let sem2 = ledger.record(SemesterLabel::new(2).unwrap()).unwrap();
    assert_eq!(sem2.total_credits, 21);
    assert_eq!(sem2.earned_credits, 6);
    assert!((sem2.gpa.unwrap() - 2.0).abs() < EPS);

    // (117/17 + 2.0) / 2
    let cgpa = ledger.cgpa().unwrap();
    assert!((cgpa - (117.0 / 17.0 + 2.0) / 2.0).abs() < EPS);
}

#[test]
fn first_year_progress() {
    let catalog = CreditCatalog::builtin().expect("bundled catalog");
    let mut ledger = cse_student(4, 8.0);
    first_year(&mut ledger, &catalog);

    let summary = ledger.summary();
    assert_eq!(summary.total_credits, vec![17, 21]);
    assert_eq!(summary.earned_credits, vec![13, 6]);
    assert_eq!(summary.topper_count, 5);
    assert_eq!(summary.supply_count, 5);
    // 4 + 15 failed credits against an allowance of 17
    assert_eq!(summary.yearback_required, 2);
    assert_eq!(summary.sgpa_required, Some(RequiredSgpa::NotAchievable));
    assert!((summary.best_semester - 117.0 / 17.0).abs() < EPS);
    assert!((summary.worst_semester - 2.0).abs() < EPS);
}

#[test]
fn electives_after_regular_grades() {
    let catalog = CreditCatalog::builtin().expect("bundled catalog");
    let mut ledger = cse_student(4, 7.0);
    let honor = Track::Honor("Bucket 1".to_string());

    let err = ledger
        .submit_electives(&catalog, "semester_4", &honor, &grades(&[("Number Theory", "A")]))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::State);

    ledger
        .submit_grades(
            &catalog,
            "semester_4",
            &grades(&[
                ("Graph Theory", "A"),
                ("Operating Systems", "B+"),
                ("Digital Lab", "S"),
            ]),
        )
        .unwrap();
    let outcome = ledger
        .submit_electives(&catalog, "semester_4", &honor, &grades(&[("Number Theory", "A")]))
        .unwrap();
    assert!((outcome.semester_gpa - 8.5).abs() < EPS);

    // Minor bucket 1 has no Number Theory: fails closed.
    let err = ledger
        .submit_electives(
            &catalog,
            "semester_4",
            &Track::Minor("Bucket 1".to_string()),
            &grades(&[("Number Theory", "A")]),
        )
        .unwrap_err();
    assert!(matches!(err, GpaError::CreditsNotFound { .. }));
}

#[test]
fn unknown_degree_is_lookup_error() {
    let catalog = CreditCatalog::builtin().expect("bundled catalog");
    let profile = StudentProfile::new(
        "x".to_string(),
        "ARCH".to_string(),
        SemesterLabel::new(1).unwrap(),
    );
    let mut ledger = StudentLedger::new(profile);
    let err = ledger
        .submit_grades(&catalog, "semester_1", &grades(&[("Maths", "S")]))
        .unwrap_err();
    assert!(matches!(err, GpaError::UnknownDegree(ref d) if d == "ARCH"));
    assert_eq!(err.kind(), ErrorKind::Lookup);
}

#[test]
fn persisted_ledger_reproduces_summary() {
    let tmp = TempDir::new().expect("temp dir");
    let store = LedgerStore::new(tmp.path().join("records"));
    let catalog = CreditCatalog::builtin().expect("bundled catalog");

    let mut ledger = cse_student(4, 8.0);
    first_year(&mut ledger, &catalog);
    ledger
        .submit_marks(&catalog, "semester_2", "Vector Calculus", 136.0)
        .unwrap();
    store.save(&ledger).unwrap();

    let loaded = store.load("KTE21CS042").unwrap();
    assert_eq!(loaded, ledger);
    assert_eq!(loaded.summary(), ledger.summary());

    let sem2 = loaded.record(SemesterLabel::new(2).unwrap()).unwrap();
    let vc = sem2
        .subjects
        .iter()
        .find(|s| s.name == "Vector Calculus")
        .unwrap();
    assert_eq!(vc.marks, Some(136.0));
    assert_eq!(sem2.earned_credits, 10);
}

#[test]
fn subject_named_twice_is_rejected() {
    let catalog = CreditCatalog::builtin().expect("builtin catalog");
    let mut ledger = cse_student(1, 8.0);

    let err = ledger
        .submit_grades(&catalog, "semester_1", &grades(&[("Maths", "S"), (" Maths ", "F")]))
        .expect_err("repeated subject must fail");

    assert_eq!(err.kind(), ErrorKind::Validation);
    assert!(err.to_string().contains("Maths"));
    assert!(ledger.records().is_empty());
}
