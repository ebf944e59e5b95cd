use cpm_base::logging::{format_record, init_file_logger, init_logger, FileLogger, LogTarget, StdoutLogger};
use log::{LevelFilter, Log};
use std::fs;

fn record_args<'a>(args: std::fmt::Arguments<'a>, level: log::Level) -> log::Record<'a> {
    log::RecordBuilder::new()
        .level(level)
        .target("test")
        .file(Some("test.rs"))
        .line(Some(100))
        .args(args)
        .build()
}

#[test]
fn test_format_record_contains_fields() {
    let line = format_record(&record_args(format_args!("hello"), log::Level::Warn));
    assert!(line.contains("[WARN]"));
    assert!(line.contains("thread:"));
    assert!(line.contains("test.rs:100"));
    assert!(line.ends_with(" - hello"));
}

#[test]
fn test_stdout_logger_does_not_panic() {
    log::set_max_level(LevelFilter::Trace);
    let logger = StdoutLogger;
    logger.log(&record_args(format_args!("stdout message"), log::Level::Info));
    logger.flush();
}

#[test]
fn test_file_logger_creates_directory() {
    let dir = std::env::temp_dir().join(format!("cpm-log-test-{}-dir", std::process::id()));
    let _ = fs::remove_dir_all(&dir);

    let logger = FileLogger::new(&dir).expect("create FileLogger");
    assert!(dir.is_dir());
    assert_eq!(logger.dir(), dir);

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_file_logger_writes_to_day_file() {
    let dir = std::env::temp_dir().join(format!("cpm-log-test-{}-write", std::process::id()));
    let _ = fs::remove_dir_all(&dir);

    log::set_max_level(LevelFilter::Trace);
    let logger = FileLogger::new(&dir).expect("create FileLogger");
    logger.log(&record_args(format_args!("test error message"), log::Level::Error));
    logger.flush();

    let entries: Vec<_> = fs::read_dir(&dir)
        .expect("read log dir")
        .filter_map(|e| e.ok())
        .collect();
    assert_eq!(entries.len(), 1, "one file per day");

    let content = fs::read_to_string(entries[0].path()).expect("read log file");
    assert!(content.contains("[ERROR]"));
    assert!(content.contains("test.rs:100"));
    assert!(content.contains("test error message"));

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_init_file_logger_invalid_dir_returns_error() {
    let result = init_file_logger("/proc/nonexistent/path");
    assert!(result.is_err());
}

#[test]
fn test_init_logger_stdout_installs_global_logger() {
    init_logger(&LogTarget::Stdout).expect("stdout logger never fails");

    let metadata = log::MetadataBuilder::new()
        .level(log::Level::Info)
        .target("test")
        .build();
    assert!(log::logger().enabled(&metadata));
    log::info!("message through the global logger");
}
