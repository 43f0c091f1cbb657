use std::path::Path;
use std::sync::Arc;

use anyhow::Context as _;
use tracing::debug;

use conductor_core::{
    CompletionClient, ConductorConfig, Database, DatabaseConfig, HttpCompletionClient,
    InMemoryStore, MemoryStore, PgMemoryStore,
};

/// Everything a command handler needs: the loaded configuration, the chosen
/// store backend, and the database handle when PostgreSQL is in play.
pub struct CliContext {
    pub config: ConductorConfig,
    pub store: Arc<dyn MemoryStore>,
    pub database: Option<Database>,
}

impl CliContext {
    pub async fn build(memory: bool, config_file: Option<&Path>) -> anyhow::Result<Self> {
        let config_path = config_file.map(Path::to_path_buf).or_else(default_config_path);

        let config = ConductorConfig::load(config_path.as_deref())
            .context("failed to load configuration")?;

        if memory {
            debug!("Using ephemeral in-memory store");
            return Ok(Self {
                config,
                store: Arc::new(InMemoryStore::new()),
                database: None,
            });
        }

        let db_config = DatabaseConfig {
            url: config.database.url.clone(),
            max_connections: config.database.pool_max_connections,
            min_connections: config.database.pool_min_connections,
            connect_timeout_secs: config.database.pool_acquire_timeout_secs,
            idle_timeout_secs: config.database.pool_idle_timeout_secs,
        };

        let database = Database::connect(&db_config)
            .await
            .context("failed to connect to the database")?;
        let store = Arc::new(PgMemoryStore::new(database.pool().clone()));

        Ok(Self {
            config,
            store,
            database: Some(database),
        })
    }

    pub fn completion_client(&self) -> Arc<dyn CompletionClient> {
        Arc::new(HttpCompletionClient::from_config(&self.config.completion))
    }
}

/// `./conductor.toml` if present, otherwise the platform config directory
/// (`~/.config/conductor/conductor.toml` on Linux).
fn default_config_path() -> Option<std::path::PathBuf> {
    let local = Path::new("conductor.toml");
    if local.exists() {
        return Some(local.to_path_buf());
    }

    let candidate = dirs::config_dir()?.join("conductor").join("conductor.toml");
    candidate.exists().then_some(candidate)
}
