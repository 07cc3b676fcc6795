//! Configuration loader with multi-source merging

use super::file_config::{ConfigValidationError, FileChatConfig};
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use sealion_domain::ChatConfig;
use std::path::PathBuf;
use thiserror::Error;

/// Project-level config file, looked up in the working directory.
pub const PROJECT_CONFIG_FILE: &str = "sealion.toml";

/// Environment variables read into [`FileChatConfig`].
pub const ENV_KEYS: &[&str] = &[
    "AWS_REGION",
    "ENDPOINT_ARN",
    "API_URL",
    "MAX_TOKENS",
    "TEMPERATURE",
    "TOP_K",
];

/// Errors that stop the client before the session starts.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error(transparent)]
    Validation(#[from] ConfigValidationError),

    #[error("Invalid configuration: {0}")]
    Invalid(#[from] Box<figment::Error>),
}

/// Configuration loader that handles source discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load and validate configuration from all sources.
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (`AWS_REGION`, `ENDPOINT_ARN`, `API_URL`,
    ///    `MAX_TOKENS`, `TEMPERATURE`, `TOP_K`)
    /// 2. Project file: `./sealion.toml`
    /// 3. Default values
    pub fn load() -> Result<ChatConfig, ConfigError> {
        Ok(Self::load_file_config()?.into_chat_config()?)
    }

    /// Merge all sources without validating required values.
    pub fn load_file_config() -> Result<FileChatConfig, Box<figment::Error>> {
        let mut figment = Figment::new().merge(Serialized::defaults(FileChatConfig::default()));

        if let Some(path) = Self::project_config_path() {
            figment = figment.merge(Toml::file(&path));
        }

        figment
            .merge(Env::raw().only(ENV_KEYS))
            .extract()
            .map_err(Box::new)
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        let path = PathBuf::from(PROJECT_CONFIG_FILE);
        path.exists().then_some(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    const ARN: &str = "arn:aws:bedrock:ap-southeast-1:123456789012:imported-model/sealion";

    #[test]
    fn test_env_values_override_defaults() {
        Jail::expect_with(|jail| {
            jail.set_env("AWS_REGION", "ap-southeast-1");
            jail.set_env("ENDPOINT_ARN", ARN);
            jail.set_env("API_URL", "http://localhost:8080/api/v1");
            jail.set_env("MAX_TOKENS", "256");
            jail.set_env("TEMPERATURE", "0.7");
            jail.set_env("TOP_K", "40");

            let config = ConfigLoader::load().unwrap();
            assert_eq!(config.region, "ap-southeast-1");
            assert_eq!(config.endpoint_id, ARN);
            assert_eq!(config.base_url, "http://localhost:8080/api/v1");
            assert_eq!(config.inference.max_tokens, 256);
            assert!((config.inference.temperature - 0.7).abs() < f32::EPSILON);
            assert_eq!(config.inference.top_k, 40);
            Ok(())
        });
    }

    #[test]
    fn test_project_file_is_overridden_by_env() {
        Jail::expect_with(|jail| {
            jail.create_file(
                PROJECT_CONFIG_FILE,
                r#"
                endpoint_arn = "arn:from:file"
                api_url = "http://file.example"
                max_tokens = 512
                "#,
            )?;
            jail.set_env("API_URL", "http://env.example");

            let config = ConfigLoader::load_file_config().unwrap();
            assert_eq!(config.endpoint_arn.as_deref(), Some("arn:from:file"));
            assert_eq!(config.api_url.as_deref(), Some("http://env.example"));
            assert_eq!(config.max_tokens, 512);
            Ok(())
        });
    }

    #[test]
    fn test_missing_endpoint_is_reported() {
        Jail::expect_with(|jail| {
            jail.set_env("ENDPOINT_ARN", "");
            jail.set_env("API_URL", "http://localhost:8080");

            let err = ConfigLoader::load().unwrap_err();
            assert!(matches!(
                err,
                ConfigError::Validation(ConfigValidationError::MissingValue("ENDPOINT_ARN"))
            ));
            Ok(())
        });
    }

    #[test]
    fn test_oversized_max_tokens_is_rejected() {
        Jail::expect_with(|jail| {
            jail.set_env("ENDPOINT_ARN", ARN);
            jail.set_env("API_URL", "http://localhost:8080");
            jail.set_env("MAX_TOKENS", "3000000000");

            let err = ConfigLoader::load().unwrap_err();
            assert!(matches!(
                err,
                ConfigError::Validation(ConfigValidationError::OutOfRange {
                    name: "MAX_TOKENS",
                    ..
                })
            ));
            Ok(())
        });
    }

    #[test]
    fn test_unparsable_number_is_invalid() {
        Jail::expect_with(|jail| {
            jail.set_env("ENDPOINT_ARN", ARN);
            jail.set_env("API_URL", "http://localhost:8080");
            jail.set_env("MAX_TOKENS", "lots");

            let err = ConfigLoader::load().unwrap_err();
            assert!(matches!(err, ConfigError::Invalid(_)));
            Ok(())
        });
    }
}
