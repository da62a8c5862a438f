//! Summary command handler

use super::{load_ledger, CommandResult};
use gpa_tracker::config::Config;
use gpa_tracker::core::cgpa::minor_cgpa;

/// Print the progress summary for the active student
pub fn run(config: &Config) -> CommandResult {
    let (_, ledger) = load_ledger(config)?;
    let summary = ledger.summary_with(config.total_semesters());

    println!("\n=== Summary for {} ===\n", ledger.profile.id);
    match summary.cgpa {
        Some(cgpa) => println!("CGPA:                 {cgpa:.2}"),
        None => println!("CGPA:                 - (no graded semesters)"),
    }
    if let Ok(minor) = minor_cgpa(ledger.records()) {
        println!("Minor/Honor CGPA:     {minor:.2}");
    }
    println!("Best semester:        {:.2}", summary.best_semester);
    println!("Worst semester:       {:.2}", summary.worst_semester);
    println!("S grades:             {}", summary.topper_count);
    println!("F grades:             {}", summary.supply_count);
    println!("Credits per semester: {:?}", summary.total_credits);
    println!("Earned per semester:  {:?}", summary.earned_credits);

    if summary.yearback_required > 0 {
        println!(
            "✗ Year-back risk: clear {} more credit(s) before the next checkpoint",
            summary.yearback_required
        );
    } else {
        println!("✓ No year-back risk");
    }

    match (ledger.profile.target_cgpa, summary.sgpa_required) {
        (Some(target), Some(required)) => {
            println!("SGPA needed for {target:.2}: {required}");
        }
        (Some(_), None) => println!("Target CGPA: no remaining semesters to forecast"),
        (None, _) => {}
    }
    Ok(())
}
