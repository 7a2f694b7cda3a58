// Integration tests for logging functionality
// Note: the logger installs a global subscriber, so this file holds a single test

use settle::infrastructure::logging::{
    info, LogConfig, LogFormat, LoggerImpl, RotationPolicy, LOG_FILE_NAME,
};
use settle::{converge, ConvergenceConfig};
use std::fs;
use tempfile::TempDir;

mod common;

#[test]
fn test_logging_writes_json_file() {
    let temp_dir = TempDir::new().unwrap();

    let config = LogConfig {
        level: "info".to_string(),
        format: LogFormat::Json,
        log_dir: Some(temp_dir.path().to_path_buf()),
        rotation: RotationPolicy::Never,
    };

    let logger = LoggerImpl::init(&config).unwrap();
    assert!(logger.has_file_output());

    // A second global subscriber is refused
    assert!(LoggerImpl::init(&config).is_err());

    info!(key = "value", "test message with fields");

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap();
    runtime.block_on(async {
        let mut store = common::job_store();
        let mut rendered = false;
        converge(
            |store: &mut common::JobStore| {
                if !rendered {
                    rendered = true;
                    settle::StateContainer::dispatch(store, common::resolving(1, 1));
                }
            },
            &mut store,
            ConvergenceConfig::default(),
        )
        .await;
    });

    // Flush the non-blocking writer
    drop(logger);

    let contents = fs::read_to_string(temp_dir.path().join(LOG_FILE_NAME)).unwrap();
    let lines: Vec<serde_json::Value> = contents
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();

    assert!(lines
        .iter()
        .any(|l| l["fields"]["message"] == "test message with fields" && l["fields"]["key"] == "value"));
    assert!(lines
        .iter()
        .any(|l| l["fields"]["message"] == "round settled" && l["span"]["name"] == "converge"));
}
