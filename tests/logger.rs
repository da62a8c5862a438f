//! Integration tests for logger behavior.

use gpa_tracker::logger::{current_level, set_level, set_level_from_str, Level};
use gpa_tracker::{debug, error, info, verbose, warn};

#[test]
fn level_parse_accepts_valid() {
    assert!(set_level_from_str("error"));
    assert!(set_level_from_str("warn"));
    assert!(set_level_from_str("info"));
    assert!(set_level_from_str("debug"));
    assert_eq!(current_level(), Level::Debug);
}

#[test]
fn level_parse_rejects_invalid() {
    assert!(!set_level_from_str("invalid"));
    assert!(!set_level_from_str(""));
}

#[test]
fn logs_do_not_panic() {
    set_level(Level::Debug);
    info!("info integration");
    warn!("warn integration");
    error!("error integration");
    debug!("debug integration");
}

#[cfg(feature = "file-logging")]
#[test]
fn file_logging_creates_parent_dirs() {
    let tmp = tempfile::TempDir::new().unwrap();
    let path = tmp.path().join("logs").join("gpatracker.log");
    assert!(gpa_tracker::logger::init_file_logging(&path));
    error!("written to file");
    gpa_tracker::logger::enable_verbose();
    verbose!("verbose output stays on the console");
    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.contains("[ERROR] written to file"));
    assert!(!content.contains("verbose output"));
}

#[cfg(feature = "verbose")]
#[test]
fn verbose_respects_runtime_flag() {
    verbose!("suppressed until enabled");
    gpa_tracker::logger::enable_verbose();
    assert!(gpa_tracker::logger::is_verbose_enabled());
    verbose!("verbose test {}", 42);
}
