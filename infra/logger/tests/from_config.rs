use std::fs;
use std::time::Duration;
use tempfile::tempdir;
use twin_domain::config::LoggingConfig;
use twin_logger::Logger;

#[test]
fn from_config_writes_json_lines() -> Result<(), Box<dyn std::error::Error>> {
    let tmp_dir = tempdir()?;
    let config = LoggingConfig {
        name: "twin-config".to_owned(),
        level: "debug".to_owned(),
        console: false,
        directory: Some(tmp_dir.path().join("logs")),
        json: true,
        ..LoggingConfig::default()
    };

    let logger = Logger::from_config(&config)?;
    assert!(logger.guard().is_some());

    tracing::debug!(document = "plan.json", "canonicalized");

    std::thread::sleep(Duration::from_millis(30));
    drop(logger);

    let log_file = fs::read_dir(tmp_dir.path().join("logs"))?
        .flatten()
        .map(|entry| entry.path())
        .find(|path| path.extension().and_then(|ext| ext.to_str()) == Some("log"))
        .expect("log file should be created");

    let contents = fs::read_to_string(log_file)?;
    assert!(contents.contains("\"document\":\"plan.json\""));
    Ok(())
}
