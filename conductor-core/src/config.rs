use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Top-level configuration, loaded from an optional TOML file layered with
/// `CONDUCTOR_`-prefixed environment variables.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ConductorConfig {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub completion: CompletionConfig,
    #[serde(default)]
    pub orchestrator: OrchestratorConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_database_url")]
    pub url: String,

    #[serde(default = "default_pool_min")]
    pub pool_min_connections: u32,

    #[serde(default = "default_pool_max")]
    pub pool_max_connections: u32,

    #[serde(default = "default_acquire_timeout")]
    pub pool_acquire_timeout_secs: u64,

    #[serde(default = "default_idle_timeout")]
    pub pool_idle_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default)]
    pub json_format: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionConfig {
    #[serde(default = "default_completion_base_url")]
    pub base_url: String,

    #[serde(default = "default_completion_model")]
    pub model: String,

    #[serde(default)]
    pub api_key: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrchestratorConfig {
    /// Upper bound on how many steps the Planner accepts from one breakdown.
    #[serde(default = "default_plan_step_limit")]
    pub plan_step_limit: usize,

    /// When set, the health report is returned healthy without evaluating
    /// any checks.
    #[serde(default)]
    pub health_bypass: bool,
}

fn default_database_url() -> String {
    "postgres://localhost/conductor".to_string()
}

fn default_pool_min() -> u32 {
    1
}

fn default_pool_max() -> u32 {
    10
}

fn default_acquire_timeout() -> u64 {
    30
}

fn default_idle_timeout() -> u64 {
    600
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_completion_base_url() -> String {
    "https://api.openai.com".to_string()
}

fn default_completion_model() -> String {
    "gpt-4o".to_string()
}

fn default_plan_step_limit() -> usize {
    20
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_database_url(),
            pool_min_connections: default_pool_min(),
            pool_max_connections: default_pool_max(),
            pool_acquire_timeout_secs: default_acquire_timeout(),
            pool_idle_timeout_secs: default_idle_timeout(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json_format: false,
        }
    }
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            base_url: default_completion_base_url(),
            model: default_completion_model(),
            api_key: None,
        }
    }
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            plan_step_limit: default_plan_step_limit(),
            health_bypass: false,
        }
    }
}

impl ConductorConfig {
    /// Load from an optional file plus `CONDUCTOR_`-prefixed environment
    /// variables (`CONDUCTOR_DATABASE__URL`, `CONDUCTOR_COMPLETION__MODEL`,
    /// ...). Environment wins over the file; defaults fill the rest.
    pub fn load(file: Option<&Path>) -> Result<Self, ConfigLoadError> {
        let mut builder = ConfigBuilder::builder();

        if let Some(path) = file {
            builder = builder.add_source(File::from(path));
        }

        builder = builder.add_source(
            Environment::with_prefix("CONDUCTOR")
                .separator("__")
                .try_parsing(true),
        );

        let config: Self = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigLoadError> {
        if self.database.pool_max_connections < self.database.pool_min_connections {
            return Err(ConfigLoadError::InvalidValue {
                key: "database.pool_max_connections".to_string(),
                message: "must be >= pool_min_connections".to_string(),
            });
        }
        if self.orchestrator.plan_step_limit == 0 {
            return Err(ConfigLoadError::InvalidValue {
                key: "orchestrator.plan_step_limit".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}
