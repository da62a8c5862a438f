//! Grade submission handlers: regular grades, marks, and electives

use super::{load_catalog, load_ledger, save_ledger, CommandResult};
use gpa_tracker::config::Config;
use gpa_tracker::core::catalog::Track;
use gpa_tracker::core::gpa::GradeSubmission;
use gpa_tracker::{error, verbose};

/// Record a semester's regular grades
pub fn run_grades(config: &Config, semester: &str, entries: &[GradeSubmission]) -> CommandResult {
    let catalog = load_catalog(config)?;
    let (store, mut ledger) = load_ledger(config)?;

    let outcome = ledger
        .submit_grades(&catalog, semester, entries)
        .map_err(|e| {
            error!("Grade submission for {semester} rejected: {e}");
            e.to_string()
        })?;
    save_ledger(&store, &ledger)?;

    verbose!("{} subject(s) recorded for {semester}", entries.len());
    println!("✓ Grades saved for {semester}");
    println!("  SGPA: {:.2}", outcome.semester_gpa);
    println!("  CGPA: {:.2}", outcome.cgpa);
    Ok(())
}

/// Grade one subject from marks
pub fn run_marks(config: &Config, semester: &str, subject: &str, marks: f64) -> CommandResult {
    let catalog = load_catalog(config)?;
    let (store, mut ledger) = load_ledger(config)?;

    let outcome = ledger
        .submit_marks(&catalog, semester, subject, marks)
        .map_err(|e| {
            error!("Marks for {subject} in {semester} rejected: {e}");
            e.to_string()
        })?;
    save_ledger(&store, &ledger)?;

    println!(
        "✓ {} ({}): {} marks → {}",
        outcome.subject, outcome.semester, outcome.marks, outcome.grade
    );
    println!("  SGPA: {:.2}", outcome.semester_gpa);
    Ok(())
}

/// Record minor or honor grades
pub fn run_electives(
    config: &Config,
    semester: &str,
    track: &Track,
    entries: &[GradeSubmission],
) -> CommandResult {
    let catalog = load_catalog(config)?;
    let (store, mut ledger) = load_ledger(config)?;

    let outcome = ledger
        .submit_electives(&catalog, semester, track, entries)
        .map_err(|e| {
            error!("{track} submission for {semester} rejected: {e}");
            e.to_string()
        })?;
    save_ledger(&store, &ledger)?;

    println!("✓ {track} grades saved for {semester}");
    println!("  Minor/Honor GPA: {:.2}", outcome.semester_gpa);
    println!("  CGPA: {:.2}", outcome.cgpa);
    Ok(())
}
