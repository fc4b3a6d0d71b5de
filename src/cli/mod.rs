//! CLI module for the churn scoring API
//!
//! Provides subcommands:
//! - `serve`: load artifacts and run the HTTP server
//! - `check`: load and validate artifacts, then exit

pub mod check;
pub mod serve;

use clap::{Args, Parser, Subcommand};

use crate::config::AppConfig;

/// Churn Scoring API - HTTP inference over pre-trained churn pipelines
#[derive(Parser)]
#[command(name = "churn-scoring-api")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Load the model artifacts and serve predictions over HTTP
    Serve(serve::ServeArgs),

    /// Validate the model artifacts without starting the server
    Check(check::CheckArgs),
}

/// Artifact location flags shared by all subcommands
#[derive(Args, Clone, Debug, Default)]
pub struct ModelArgs {
    /// Directory holding the pipeline artifacts and threshold file (overrides config)
    #[arg(long)]
    pub models_dir: Option<String>,
}

impl ModelArgs {
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(dir) = &self.models_dir {
            config.models.dir = dir.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_serve_with_overrides() {
        let cli = Cli::try_parse_from([
            "churn-scoring-api",
            "serve",
            "--models-dir",
            "/srv/models",
            "--port",
            "9000",
        ])
        .unwrap();

        let Command::Serve(args) = cli.command else {
            panic!("expected serve command");
        };

        let mut config = AppConfig::default();
        args.apply(&mut config);

        assert_eq!(config.models.dir, "/srv/models");
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "0.0.0.0");
    }

    #[test]
    fn test_parse_check() {
        let cli = Cli::try_parse_from(["churn-scoring-api", "check", "--models-dir", "m"]).unwrap();

        let Command::Check(args) = cli.command else {
            panic!("expected check command");
        };

        assert_eq!(args.models.models_dir.as_deref(), Some("m"));
    }

    #[test]
    fn test_without_override_config_is_kept() {
        let mut config = AppConfig::default();
        config.models.dir = "from-config".to_string();

        ModelArgs { models_dir: None }.apply(&mut config);

        assert_eq!(config.models.dir, "from-config");
    }
}
