//! Catalog command handler

use super::{load_catalog, load_ledger, CommandResult};
use crate::args::CatalogSubcommand;
use gpa_tracker::config::Config;
use gpa_tracker::core::catalog::ElectiveBuckets;

/// Dispatch catalog subcommands
pub fn run(subcommand: CatalogSubcommand, config: &Config) -> CommandResult {
    match subcommand {
        CatalogSubcommand::Subjects { degree } => subjects(config, degree),
        CatalogSubcommand::Electives { degree } => electives(config, degree),
    }
}

fn resolve_degree(config: &Config, degree: Option<String>) -> Result<String, String> {
    match degree {
        Some(d) => Ok(d),
        None => load_ledger(config).map(|(_, ledger)| ledger.profile.degree),
    }
}

fn subjects(config: &Config, degree: Option<String>) -> CommandResult {
    let degree = resolve_degree(config, degree)?;
    let catalog = load_catalog(config)?;
    let curriculum = catalog.regular_subjects(&degree).map_err(|e| e.to_string())?;

    println!("\n=== {degree} subjects ===");
    for (semester, slots) in curriculum {
        println!("\n{semester}");
        for (slot, subjects) in slots {
            for (subject, credits) in subjects {
                println!("  [{slot}] {subject:<40} {credits:>2}");
            }
        }
    }
    Ok(())
}

fn print_buckets(title: &str, buckets: &ElectiveBuckets) {
    println!("\n--- {title} ---");
    for (bucket, semesters) in buckets {
        println!("\n{bucket}");
        for (semester, subjects) in semesters {
            for (subject, credits) in subjects {
                println!("  {semester:<12} {subject:<40} {credits:>2}");
            }
        }
    }
}

fn electives(config: &Config, degree: Option<String>) -> CommandResult {
    let degree = resolve_degree(config, degree)?;
    let catalog = load_catalog(config)?;
    let offer = catalog.elective_buckets(&degree).map_err(|e| e.to_string())?;

    println!("\n=== {degree} electives ===");
    if let Some(minor) = offer.minor {
        print_buckets("Minor", minor);
    }
    if let Some(honor) = offer.honor {
        print_buckets("Honor", honor);
    }
    Ok(())
}
