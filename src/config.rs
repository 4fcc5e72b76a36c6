use std::fs;
use std::path::Path;

use directories::ProjectDirs;
use serde::Deserialize;

use cepan::{Granularity, MetricsDtype};

pub const DEFAULT_REGION: &str = "us-east-1";

#[derive(Debug, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub region: Option<String>,
    pub endpoint: Option<String>,
    pub metrics: Option<Vec<String>>,
    pub metrics_dtype: Option<MetricsDtype>,
    pub granularity: Option<Granularity>,
}

impl Config {
    pub fn region(&self) -> &str {
        self.region.as_deref().unwrap_or(DEFAULT_REGION)
    }
}

pub fn load_config() -> Config {
    let Some(dirs) = ProjectDirs::from("", "", "cepan") else {
        return Config::default();
    };
    load_config_from(&dirs.config_dir().join("config.toml"))
}

/// Read `path`, falling back to defaults when it is missing or invalid.
pub fn load_config_from(path: &Path) -> Config {
    let Ok(data) = fs::read_to_string(path) else {
        return Config::default();
    };

    match toml::from_str(&data) {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "invalid config, using defaults");
            Config::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config_from(&dir.path().join("config.toml"));
        assert_eq!(config, Config::default());
        assert_eq!(config.region(), DEFAULT_REGION);
    }

    #[test]
    fn parses_all_fields() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
region = "eu-west-1"
endpoint = "http://localhost:4566/"
metrics = ["BlendedCost", "UsageQuantity"]
metrics_dtype = "string"
granularity = "DAILY"
"#
        )
        .unwrap();
        let config = load_config_from(file.path());
        assert_eq!(config.region(), "eu-west-1");
        assert_eq!(config.endpoint.as_deref(), Some("http://localhost:4566/"));
        assert_eq!(
            config.metrics,
            Some(vec!["BlendedCost".to_string(), "UsageQuantity".to_string()])
        );
        assert_eq!(config.metrics_dtype, Some(MetricsDtype::String));
        assert_eq!(config.granularity, Some(Granularity::Daily));
    }

    #[test]
    fn invalid_file_gives_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "granularity = \"WEEKLY\"").unwrap();
        assert_eq!(load_config_from(file.path()), Config::default());
    }
}
