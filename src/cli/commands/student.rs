//! Student command handler

use super::{active_student, load_catalog, load_ledger, save_ledger, store, CommandResult};
use crate::args::StudentSubcommand;
use gpa_tracker::config::Config;
use gpa_tracker::core::ledger::StudentLedger;
use gpa_tracker::core::models::{SemesterLabel, StudentProfile};
use gpa_tracker::core::store::validate_student_id;
use gpa_tracker::{info, warn};

/// Dispatch student subcommands
pub fn run(subcommand: StudentSubcommand, config: &mut Config) -> CommandResult {
    match subcommand {
        StudentSubcommand::Init {
            id,
            degree,
            semester,
            target,
            minor,
            honors,
            default,
        } => {
            let mut profile = StudentProfile::new(id, degree, parse_semester(&semester)?);
            profile.target_cgpa = target.filter(|t| *t != 0.0);
            profile.is_minor = minor;
            profile.is_honors = honors;
            init(config, profile, default)
        }
        StudentSubcommand::Update {
            semester,
            target,
            minor,
            honors,
        } => update(config, semester.as_deref(), target, minor, honors),
        StudentSubcommand::Show => show(config),
        StudentSubcommand::List => list(config),
    }
}

fn parse_semester(label: &str) -> Result<SemesterLabel, String> {
    label.parse::<SemesterLabel>().map_err(|e| e.to_string())
}

fn check_target(target: Option<f64>) -> CommandResult {
    match target {
        Some(t) if !(0.0..=10.0).contains(&t) => {
            Err(format!("Target CGPA must be between 0 and 10, got {t}"))
        }
        _ => Ok(()),
    }
}

fn init(config: &mut Config, profile: StudentProfile, make_default: bool) -> CommandResult {
    validate_student_id(&profile.id).map_err(|e| e.to_string())?;
    check_target(profile.target_cgpa)?;
    let catalog = load_catalog(config)?;
    if !catalog.has_degree(&profile.degree) {
        warn!(
            "Degree '{}' has no regular curriculum in the catalog",
            profile.degree
        );
    }

    let store = store(config);
    if store.exists(&profile.id) {
        return Err(format!(
            "A ledger for '{}' already exists in {}",
            profile.id,
            store.dir().display()
        ));
    }

    let id = profile.id.clone();
    let ledger = StudentLedger::new(profile);
    save_ledger(&store, &ledger)?;
    info!("Created ledger for {id}");
    println!("✓ Created ledger for {id}");

    if make_default {
        config.set("student_id", &id)?;
        config
            .save()
            .map_err(|e| format!("Failed to save config: {e}"))?;
        println!("✓ {id} is now the default student");
    }
    Ok(())
}

fn update(
    config: &Config,
    semester: Option<&str>,
    target: Option<f64>,
    minor: Option<bool>,
    honors: Option<bool>,
) -> CommandResult {
    check_target(target)?;
    let (store, mut ledger) = load_ledger(config)?;
    if let Some(label) = semester {
        ledger.profile.current_semester = parse_semester(label)?;
    }
    if let Some(t) = target {
        ledger.profile.target_cgpa = (t != 0.0).then_some(t);
    }
    if let Some(m) = minor {
        ledger.profile.is_minor = m;
    }
    if let Some(h) = honors {
        ledger.profile.is_honors = h;
    }
    save_ledger(&store, &ledger)?;
    println!("✓ Updated {}", ledger.profile.id);
    Ok(())
}

fn show(config: &Config) -> CommandResult {
    let (_, ledger) = load_ledger(config)?;
    let profile = &ledger.profile;

    println!("\n=== Student {} ===\n", profile.id);
    println!("Degree:           {}", profile.degree);
    println!("Current semester: {}", profile.current_semester);
    match profile.target_cgpa {
        Some(target) => println!("Target CGPA:      {target:.2}"),
        None => println!("Target CGPA:      -"),
    }
    println!("Minor:            {}", profile.is_minor);
    println!("Honors:           {}", profile.is_honors);

    if ledger.records().is_empty() {
        println!("\nNo semesters recorded yet.");
        return Ok(());
    }

    println!("\n{:<12} {:>8} {:>8} {:>6} {:>10}", "Semester", "Credits", "Earned", "SGPA", "Minor GPA");
    for record in ledger.records() {
        let sgpa = record.gpa.map_or_else(|| "-".to_string(), |g| format!("{g:.2}"));
        let minor = record
            .minor_gpa
            .map_or_else(|| "-".to_string(), |g| format!("{g:.2}"));
        println!(
            "{:<12} {:>8} {:>8} {:>6} {:>10}",
            record.semester.to_string(),
            record.total_credits,
            record.earned_credits,
            sgpa,
            minor
        );
    }
    Ok(())
}

fn list(config: &Config) -> CommandResult {
    let store = store(config);
    let ids = store.list().map_err(|e| e.to_string())?;
    if ids.is_empty() {
        println!("No ledgers in {}", store.dir().display());
        return Ok(());
    }
    let active = active_student(config).ok();
    for id in ids {
        let marker = if active.as_deref() == Some(id.as_str()) { "*" } else { " " };
        println!("{marker} {id}");
    }
    Ok(())
}
