//! CLI argument definitions for `gpatracker`

use clap::{builder::BoolishValueParser, Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use gpa_tracker::config::ConfigOverrides;
use gpa_tracker::core::catalog::Track;
use gpa_tracker::core::gpa::GradeSubmission;
use gpa_tracker::logger::Level;

/// CLI log level argument
///
/// Represents log levels that can be passed via CLI arguments. Converts to lowercase
/// strings for config storage and to `logger::Level` for runtime use.
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogLevelArg {
    /// Error-level logging
    Error,
    /// Warning-level logging
    Warn,
    /// Info-level logging
    Info,
    /// Debug-level logging
    Debug,
}

impl From<LogLevelArg> for Level {
    fn from(arg: LogLevelArg) -> Self {
        match arg {
            LogLevelArg::Error => Self::Error,
            LogLevelArg::Warn => Self::Warn,
            LogLevelArg::Info => Self::Info,
            LogLevelArg::Debug => Self::Debug,
        }
    }
}

impl std::fmt::Display for LogLevelArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let as_str = match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
        };
        write!(f, "{as_str}")
    }
}

/// Elective track selector
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum TrackArg {
    /// Minor programme bucket
    Minor,
    /// Honors programme bucket
    Honor,
}

impl TrackArg {
    /// Pair with a bucket name
    pub fn with_bucket(self, bucket: String) -> Track {
        match self {
            Self::Minor => Track::Minor(bucket),
            Self::Honor => Track::Honor(bucket),
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum ConfigSubcommand {
    /// Display configuration values.
    ///
    /// If a KEY is provided, displays only that configuration value.
    /// If no KEY is provided, displays all configuration values.
    Get {
        /// Optional configuration key to display (e.g., `level`, `records_dir`)
        #[arg(value_name = "KEY")]
        key: Option<String>,
    },
    /// Set a configuration value.
    Set {
        /// Configuration key to set
        #[arg(value_name = "KEY")]
        key: String,
        /// Value to set
        #[arg(value_name = "VALUE")]
        value: String,
    },
    /// Unset a configuration value.
    Unset {
        /// Configuration key to unset
        #[arg(value_name = "KEY")]
        key: String,
    },
    /// Reset configuration to defaults (requires confirmation).
    Reset,
}

#[derive(Debug, Subcommand)]
pub enum StudentSubcommand {
    /// Create a student ledger.
    Init {
        /// Student id (e.g., registration number)
        #[arg(value_name = "ID")]
        id: String,
        /// Degree key in the credit catalog (e.g., CSE)
        #[arg(long)]
        degree: String,
        /// Semester reached, `semester_<n>`
        #[arg(long, value_name = "SEMESTER", default_value = "semester_1")]
        semester: String,
        /// Target CGPA at graduation
        #[arg(long, value_name = "CGPA")]
        target: Option<f64>,
        /// Enrolled in a minor
        #[arg(long)]
        minor: bool,
        /// Enrolled in honors
        #[arg(long)]
        honors: bool,
        /// Make this the default student in the config
        #[arg(long)]
        default: bool,
    },
    /// Update the active student's progress or goals.
    Update {
        /// New semester reached, `semester_<n>`
        #[arg(long, value_name = "SEMESTER")]
        semester: Option<String>,
        /// New target CGPA (0 clears it)
        #[arg(long, value_name = "CGPA")]
        target: Option<f64>,
        /// Minor enrolment (true/false)
        #[arg(long, value_parser = BoolishValueParser::new())]
        minor: Option<bool>,
        /// Honors enrolment (true/false)
        #[arg(long, value_parser = BoolishValueParser::new())]
        honors: Option<bool>,
    },
    /// Show the active student's profile and recorded semesters.
    Show,
    /// List students with a ledger.
    List,
}

#[derive(Debug, Subcommand)]
pub enum CatalogSubcommand {
    /// List regular subjects and credits per semester.
    Subjects {
        /// Degree key (defaults to the active student's degree)
        #[arg(long)]
        degree: Option<String>,
    },
    /// List minor and honor buckets.
    Electives {
        /// Degree key (defaults to the active student's degree)
        #[arg(long)]
        degree: Option<String>,
    },
}

/// Optional inputs for the CGPA predictor
#[derive(Debug, Clone, Default, Args)]
pub struct PredictArgs {
    /// Weekly study hours (0-25, default 12)
    #[arg(long, value_name = "HOURS")]
    pub study_hours: Option<f64>,
    /// Takes part in events
    #[arg(long)]
    pub events: bool,
    /// Number of projects
    #[arg(long, value_name = "N")]
    pub projects: Option<u32>,
    /// Has done an internship
    #[arg(long)]
    pub internship: bool,
    /// One-way commute in minutes (default 30)
    #[arg(long, value_name = "MINUTES")]
    pub travel: Option<u32>,
    /// Lives in a PG or hostel
    #[arg(long)]
    pub hostel: bool,
    /// Previous board CGPA (5-10, default 8.0)
    #[arg(long, value_name = "CGPA")]
    pub board_cgpa: Option<f64>,
    /// Override the number of S grades
    #[arg(long = "num-s", value_name = "N")]
    pub num_s: Option<u32>,
    /// Override the number of A+/A grades
    #[arg(long = "num-a", value_name = "N")]
    pub num_a: Option<u32>,
    /// Override the number of B+/B grades
    #[arg(long = "num-b", value_name = "N")]
    pub num_b: Option<u32>,
    /// Override the number of C+/C grades
    #[arg(long = "num-c", value_name = "N")]
    pub num_c: Option<u32>,
    /// Override the number of D+/P grades
    #[arg(long = "num-d", value_name = "N")]
    pub num_d: Option<u32>,
    /// Override the number of F grades
    #[arg(long = "num-f", value_name = "N")]
    pub num_f: Option<u32>,
    /// Ignore recorded grades and use only the flags above
    #[arg(long)]
    pub manual: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage configuration.
    ///
    /// If no subcommand is provided, displays all configuration values.
    Config {
        #[command(subcommand)]
        subcommand: Option<ConfigSubcommand>,
    },
    /// Create, update, and inspect student ledgers.
    Student {
        #[command(subcommand)]
        subcommand: StudentSubcommand,
    },
    /// Browse the credit catalog.
    Catalog {
        #[command(subcommand)]
        subcommand: CatalogSubcommand,
    },
    /// Record a semester's grades, replacing any earlier submission.
    ///
    /// Example: `gpatracker grades semester_1 Maths=A+ "Engineering Mechanics=B"`
    Grades {
        /// Semester label, `semester_<n>`
        #[arg(value_name = "SEMESTER")]
        semester: String,
        /// Grades as SUBJECT=GRADE
        #[arg(value_name = "SUBJECT=GRADE", num_args = 1.., required = true)]
        entries: Vec<GradeSubmission>,
    },
    /// Grade one subject from raw marks (0-150).
    Marks {
        /// Semester label, `semester_<n>`
        #[arg(value_name = "SEMESTER")]
        semester: String,
        /// Subject name as listed in the catalog
        #[arg(value_name = "SUBJECT")]
        subject: String,
        /// Marks out of 150
        #[arg(value_name = "MARKS")]
        marks: f64,
    },
    /// Record minor or honor grades for a semester with regular grades.
    Electives {
        /// Semester label, `semester_<n>`
        #[arg(value_name = "SEMESTER")]
        semester: String,
        /// Minor or honor
        #[arg(long, value_enum)]
        track: TrackArg,
        /// Bucket name (e.g., "Bucket 1")
        #[arg(long)]
        bucket: String,
        /// Grades as SUBJECT=GRADE
        #[arg(value_name = "SUBJECT=GRADE", num_args = 1.., required = true)]
        entries: Vec<GradeSubmission>,
    },
    /// Show CGPA, backlog, and target forecast.
    Summary,
    /// Predict final CGPA from grade distribution and habits.
    Predict {
        #[command(flatten)]
        features: PredictArgs,
    },
    /// Export a Markdown transcript.
    Export {
        /// Output file (defaults to `<exports_dir>/<id>_transcript.md`)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
}

#[derive(Parser, Debug)]
#[command(
    name = "gpatracker",
    about = "Semester GPA, CGPA, backlog, and target tracking",
    version = env!("CARGO_PKG_VERSION")
)]
pub struct Cli {
    /// Set the runtime log level (error|warn|info|debug). Falls back to config if omitted.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Enable verbose output (runtime only)
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Enable debug-level logging and runtime debug flag (shorthand)
    #[arg(long = "debug")]
    pub debug_flag: bool,

    /// Write runtime logs to a file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Student to operate on (defaults to config `student_id`)
    #[arg(short = 's', long, value_name = "ID")]
    pub student: Option<String>,

    // --- Config overrides ---
    /// Override config logging level (stored in config file)
    #[arg(long = "config-level", value_enum)]
    pub config_level: Option<LogLevelArg>,

    /// Override config log file path
    #[arg(long = "config-log-file", value_name = "PATH")]
    pub config_log_file: Option<PathBuf>,

    /// Override config verbose flag (true/false)
    #[arg(long = "config-verbose", value_parser = BoolishValueParser::new())]
    pub config_verbose: Option<bool>,

    /// Use this credit catalog instead of the configured one
    #[arg(long = "catalog", value_name = "FILE")]
    pub catalog: Option<PathBuf>,

    /// Override config records directory
    #[arg(long = "records-dir", value_name = "DIR")]
    pub records_dir: Option<PathBuf>,

    /// Override config exports directory
    #[arg(long = "exports-dir", value_name = "DIR")]
    pub exports_dir: Option<PathBuf>,

    /// Subcommand to execute.
    /// A subcommand is required to run the CLI.
    #[command(subcommand)]
    pub command: Command,
}

fn path_string(path: Option<&PathBuf>) -> Option<String> {
    path.map(|p| p.to_string_lossy().to_string())
}

impl Cli {
    /// Convert CLI flags into config overrides
    ///
    /// # Returns
    /// A `ConfigOverrides` struct with values from CLI flags, where `None` means no override.
    pub fn to_config_overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            level: self.config_level.map(|lvl| lvl.to_string()),
            file: path_string(self.config_log_file.as_ref()),
            verbose: self.config_verbose,
            catalog_file: path_string(self.catalog.as_ref()),
            records_dir: path_string(self.records_dir.as_ref()),
            exports_dir: path_string(self.exports_dir.as_ref()),
            student_id: self.student.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_display() {
        assert_eq!(LogLevelArg::Error.to_string(), "error");
        assert_eq!(LogLevelArg::Warn.to_string(), "warn");
        assert_eq!(LogLevelArg::Info.to_string(), "info");
        assert_eq!(LogLevelArg::Debug.to_string(), "debug");
    }

    #[test]
    fn test_log_level_to_logger_level() {
        assert_eq!(Level::from(LogLevelArg::Error), Level::Error);
        assert_eq!(Level::from(LogLevelArg::Warn), Level::Warn);
        assert_eq!(Level::from(LogLevelArg::Info), Level::Info);
        assert_eq!(Level::from(LogLevelArg::Debug), Level::Debug);
    }

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_to_config_overrides_empty() {
        let cli = Cli::parse_from(["gpatracker", "summary"]);

        let overrides = cli.to_config_overrides();
        assert!(overrides.level.is_none());
        assert!(overrides.file.is_none());
        assert!(overrides.verbose.is_none());
        assert!(overrides.catalog_file.is_none());
        assert!(overrides.records_dir.is_none());
        assert!(overrides.exports_dir.is_none());
        assert!(overrides.student_id.is_none());
    }

    #[test]
    fn test_to_config_overrides_with_values() {
        let cli = Cli::parse_from([
            "gpatracker",
            "--config-level",
            "debug",
            "--config-log-file",
            "/tmp/test.log",
            "--config-verbose",
            "yes",
            "--catalog",
            "/srv/catalog.toml",
            "--records-dir",
            "/data/records",
            "-s",
            "KTE21CS042",
            "summary",
        ]);

        let overrides = cli.to_config_overrides();
        assert_eq!(overrides.level, Some("debug".to_string()));
        assert_eq!(overrides.file, Some("/tmp/test.log".to_string()));
        assert_eq!(overrides.verbose, Some(true));
        assert_eq!(overrides.catalog_file, Some("/srv/catalog.toml".to_string()));
        assert_eq!(overrides.records_dir, Some("/data/records".to_string()));
        assert!(overrides.exports_dir.is_none());
        assert_eq!(overrides.student_id, Some("KTE21CS042".to_string()));
    }

    #[test]
    fn test_grades_entries_parse() {
        let cli = Cli::parse_from([
            "gpatracker",
            "grades",
            "semester_1",
            "Maths=A+",
            "Engineering Mechanics=B",
        ]);
        let Command::Grades { semester, entries } = cli.command else {
            panic!("expected grades command");
        };
        assert_eq!(semester, "semester_1");
        assert_eq!(
            entries,
            vec![
                GradeSubmission::new("Maths", "A+"),
                GradeSubmission::new("Engineering Mechanics", "B"),
            ]
        );
    }

    #[test]
    fn test_grades_entry_without_separator_rejected() {
        let result = Cli::try_parse_from(["gpatracker", "grades", "semester_1", "Maths"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_electives_track() {
        let cli = Cli::parse_from([
            "gpatracker",
            "electives",
            "semester_4",
            "--track",
            "honor",
            "--bucket",
            "Bucket 1",
            "Cryptography=S",
        ]);
        let Command::Electives {
            track,
            bucket,
            entries,
            ..
        } = cli.command
        else {
            panic!("expected electives command");
        };
        assert_eq!(
            track.with_bucket(bucket),
            Track::Honor("Bucket 1".to_string())
        );
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_predict_flags() {
        let cli = Cli::parse_from([
            "gpatracker",
            "predict",
            "--study-hours",
            "15",
            "--internship",
            "--num-s",
            "4",
        ]);
        let Command::Predict { features } = cli.command else {
            panic!("expected predict command");
        };
        assert_eq!(features.study_hours, Some(15.0));
        assert!(features.internship);
        assert!(!features.events);
        assert_eq!(features.num_s, Some(4));
        assert!(features.num_f.is_none());
    }
}
