//! File-backed configuration loading

#![allow(clippy::unwrap_used)]

use crawlrag_config::source::{ConfigurationLoader, ConfigurationSource, FileSource};
use crawlrag_config::{ConfigError, Settings, Transport};
use std::io::Write;

fn file_settings() -> Settings {
    Settings {
        openai_api_key: "sk-from-file".to_string(),
        supabase_url: "https://files.supabase.co".to_string(),
        supabase_service_key: "file-service-key".to_string(),
        transport: Transport::Stdio,
        default_chunk_size: 2000,
        default_overlap: 100,
        ..Settings::default()
    }
}

fn write_temp(suffix: &str, content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn loads_settings_from_toml_file() {
    let expected = file_settings();
    let file = write_temp(".toml", &toml::to_string(&expected).unwrap());

    let loaded = ConfigurationLoader::new()
        .add_source(Box::new(FileSource::new(file.path())))
        .load()
        .unwrap();

    assert_eq!(loaded, expected);
}

#[test]
fn loads_settings_from_yaml_file() {
    let expected = file_settings();
    let file = write_temp(".yaml", &serde_yaml::to_string(&expected).unwrap());

    let loaded = FileSource::new(file.path()).load().unwrap();

    assert_eq!(loaded.transport, Transport::Stdio);
    assert_eq!(loaded.default_chunk_size, 2000);
    assert_eq!(loaded.supabase_url, "https://files.supabase.co");
}

#[test]
fn malformed_toml_reports_parse_error() {
    let file = write_temp(".toml", "port = \"not a number\"");

    assert!(matches!(
        FileSource::new(file.path()).load(),
        Err(ConfigError::TomlParsing(_))
    ));
}

#[test]
fn invalid_file_contents_fail_validation() {
    let mut invalid = file_settings();
    invalid.default_semantic_threshold = 7.0;
    let file = write_temp(".toml", &toml::to_string(&invalid).unwrap());

    let result = ConfigurationLoader::new()
        .add_source(Box::new(FileSource::new(file.path())))
        .load();

    assert!(matches!(result, Err(ConfigError::OutOfRange { .. })));
}

struct FixedSource(Settings, u8);

impl ConfigurationSource for FixedSource {
    fn load(&self) -> crawlrag_config::ConfigResult<Settings> {
        Ok(self.0.clone())
    }

    fn name(&self) -> &'static str {
        "fixed"
    }

    fn priority(&self) -> u8 {
        self.1
    }
}

#[test]
fn highest_priority_source_replaces_lower_ones() {
    let file = write_temp(".toml", &toml::to_string(&file_settings()).unwrap());
    let winner = Settings {
        default_chunk_size: 3000,
        ..file_settings()
    };

    // Added first, applied last
    let loaded = ConfigurationLoader::new()
        .add_source(Box::new(FixedSource(winner.clone(), 200)))
        .add_source(Box::new(FileSource::new(file.path())))
        .load()
        .unwrap();

    assert_eq!(loaded, winner);
    assert_eq!(loaded.default_chunk_size, 3000);
}
