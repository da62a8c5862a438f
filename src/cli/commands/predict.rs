//! Predict command handler

use super::{load_ledger, CommandResult};
use crate::args::PredictArgs;
use gpa_tracker::config::Config;
use gpa_tracker::core::predictor::{
    CgpaPredictor, GradeDistribution, LinearBaseline, PredictionFeatures,
};
use gpa_tracker::{debug, verbose};

/// Grade counts from the active ledger, or zeros with `--manual`
fn base_distribution(config: &Config, manual: bool) -> Result<GradeDistribution, String> {
    if manual {
        return Ok(GradeDistribution::default());
    }
    let (_, ledger) = load_ledger(config)?;
    Ok(GradeDistribution::from_records(ledger.records()))
}

fn build_features(args: &PredictArgs, recorded: GradeDistribution) -> PredictionFeatures {
    let defaults = PredictionFeatures::default();
    PredictionFeatures {
        grades: GradeDistribution {
            s: args.num_s.unwrap_or(recorded.s),
            a: args.num_a.unwrap_or(recorded.a),
            b: args.num_b.unwrap_or(recorded.b),
            c: args.num_c.unwrap_or(recorded.c),
            d: args.num_d.unwrap_or(recorded.d),
            f: args.num_f.unwrap_or(recorded.f),
        },
        study_hours_per_week: args.study_hours.unwrap_or(defaults.study_hours_per_week),
        participated_in_events: args.events,
        project_count: args.projects.unwrap_or(defaults.project_count),
        internship_experience: args.internship,
        travel_time_minutes: args.travel.unwrap_or(defaults.travel_time_minutes),
        lives_in_pg_or_hostel: args.hostel,
        previous_board_cgpa: args.board_cgpa.unwrap_or(defaults.previous_board_cgpa),
    }
}

/// Predict the final CGPA
pub fn run(config: &Config, args: &PredictArgs) -> CommandResult {
    let recorded = base_distribution(config, args.manual)?;
    let features = build_features(args, recorded);
    debug!("Prediction features: {:?}", features.as_array());

    let predicted = LinearBaseline::default()
        .predict(&features)
        .map_err(|e| e.to_string())?;

    let g = &features.grades;
    verbose!(
        "Grades used: S={} A={} B={} C={} D={} F={}",
        g.s,
        g.a,
        g.b,
        g.c,
        g.d,
        g.f
    );
    println!("Predicted final CGPA: {predicted:.2}");
    println!("  (heuristic baseline; not a fitted model)");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_recorded_counts() {
        let args = PredictArgs {
            num_f: Some(0),
            study_hours: Some(20.0),
            hostel: true,
            ..PredictArgs::default()
        };
        let recorded = GradeDistribution {
            s: 3,
            f: 2,
            ..GradeDistribution::default()
        };
        let features = build_features(&args, recorded);
        assert_eq!(features.grades.s, 3);
        assert_eq!(features.grades.f, 0);
        assert!((features.study_hours_per_week - 20.0).abs() < f64::EPSILON);
        assert!(features.lives_in_pg_or_hostel);
        assert_eq!(features.travel_time_minutes, 30);
        assert!((features.previous_board_cgpa - 8.0).abs() < f64::EPSILON);
    }
}
