use serde::Deserialize;

use crate::infrastructure::observability::ObservabilityConfig;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub models: ModelsConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Location and file names of the model artifacts
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ModelsConfig {
    pub dir: String,
    pub lr_file: String,
    pub xgb_file: String,
    pub threshold_file: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl Default for ModelsConfig {
    fn default() -> Self {
        Self {
            dir: "models".to_string(),
            lr_file: "lr_churn_pipeline.json".to_string(),
            xgb_file: "xgb_churn_pipeline.json".to_string(),
            threshold_file: "best_threshold.txt".to_string(),
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.logging.level, "info");
        assert!(matches!(config.logging.format, LogFormat::Pretty));
        assert_eq!(config.models.dir, "models");
        assert_eq!(config.models.lr_file, "lr_churn_pipeline.json");
        assert_eq!(config.models.xgb_file, "xgb_churn_pipeline.json");
        assert_eq!(config.models.threshold_file, "best_threshold.txt");
    }

    #[test]
    fn test_partial_sections_fall_back_to_defaults() {
        let config: AppConfig = serde_json::from_str(
            r#"{"models": {"dir": "/srv/churn"}, "logging": {"level": "debug", "format": "json"}}"#,
        )
        .unwrap();

        assert_eq!(config.models.dir, "/srv/churn");
        assert_eq!(config.models.xgb_file, "xgb_churn_pipeline.json");
        assert_eq!(config.server.port, 8080);
        assert!(matches!(config.logging.format, LogFormat::Json));
    }
}
