//! Error types for the Conductor core library.
//!
//! One unified error enum covers persistence, configuration, agent dispatch,
//! plan/step bookkeeping, and completion-endpoint failures.
//!
//! # Error Codes Reference
//!
//! | Code Range | Category | Description |
//! |------------|----------|-------------|
//! | E1001-E1099 | Database | Connection, query, migration errors |
//! | E2001-E2099 | Config | Environment and config file errors |
//! | E3001-E3099 | Agent | Registry resolution and tool dispatch errors |
//! | E4001-E4099 | Plan/Step | Missing records and status transition errors |
//! | E5001-E5099 | Completion | LLM endpoint request/response errors |
//! | E9001-E9099 | General | Internal, IO, serialization errors |

use thiserror::Error;
use tracing::{error, warn};

/// The main error type for the Conductor core library.
#[derive(Debug, Error)]
pub enum ConductorError {
    // ========================================================================
    // Database Errors (E1001-E1099)
    // ========================================================================
    /// Failed to establish database connection
    #[error("[E1001] Database connection failed: {0}")]
    DatabaseConnectionFailed(String),

    /// Database query execution failed
    #[error("[E1002] Database query failed: {0}")]
    DatabaseQueryFailed(String),

    /// Database migration failed
    #[error("[E1003] Database migration failed: {0}")]
    DatabaseMigrationFailed(String),

    /// Database pool exhausted or unavailable
    #[error("[E1004] Database pool unavailable: {0}")]
    DatabasePoolUnavailable(String),

    // ========================================================================
    // Configuration Errors (E2001-E2099)
    // ========================================================================
    /// Required environment variable is missing
    #[error("[E2001] Missing environment variable: {0}")]
    MissingEnvVar(String),

    /// Configuration file parse error
    #[error("[E2002] Failed to parse configuration: {0}")]
    ConfigParseError(String),

    /// Invalid configuration value
    #[error("[E2003] Invalid configuration value for '{key}': {message}")]
    InvalidConfigValue { key: String, message: String },

    // ========================================================================
    // Agent Errors (E3001-E3099)
    // ========================================================================
    /// Agent not registered and no fallback available
    #[error("[E3001] Agent not registered: {0}")]
    AgentNotRegistered(String),

    /// Agent is already registered under this name
    #[error("[E3002] Agent already registered: {0}")]
    AgentAlreadyRegistered(String),

    /// Tool not present in the agent's catalog
    #[error("[E3003] Tool not found in catalog of '{agent}': {tool}")]
    ToolNotFound { agent: String, tool: String },

    /// Tool dispatch failed after the completion client chose a tool
    #[error("[E3004] Tool execution failed for '{tool}': {message}")]
    ToolExecutionFailed { tool: String, message: String },

    /// Agent catalog could not be loaded
    #[error("[E3005] Failed to load tool catalog for '{agent}': {message}")]
    CatalogLoadFailed { agent: String, message: String },

    // ========================================================================
    // Plan/Step Errors (E4001-E4099)
    // ========================================================================
    /// Plan not found
    #[error("[E4001] Plan not found: {0}")]
    PlanNotFound(String),

    /// Step not found
    #[error("[E4002] Step not found: {0}")]
    StepNotFound(String),

    /// Invalid step status transition
    #[error("[E4003] Invalid step status transition from {from} to {to}")]
    InvalidStepTransition { from: String, to: String },

    /// Planner produced a breakdown that could not be used
    #[error("[E4004] Plan breakdown rejected: {0}")]
    PlanBreakdownRejected(String),

    // ========================================================================
    // Completion Errors (E5001-E5099)
    // ========================================================================
    /// Completion request failed
    #[error("[E5001] Completion request failed: {0}")]
    CompletionRequestFailed(String),

    /// Completion response could not be parsed
    #[error("[E5002] Failed to parse completion response: {0}")]
    CompletionParseError(String),

    /// Completion endpoint unavailable
    #[error("[E5003] Completion endpoint unavailable: {0}")]
    CompletionUnavailable(String),

    // ========================================================================
    // General Errors (E9001-E9099)
    // ========================================================================
    /// Internal error (catch-all for unexpected conditions)
    #[error("[E9001] Internal error: {0}")]
    Internal(String),

    /// IO error
    #[error("[E9002] IO error: {0}")]
    IoError(String),

    /// Serialization/deserialization error
    #[error("[E9003] Serialization error: {0}")]
    SerializationError(String),
}

/// Result type alias for Conductor operations.
pub type ConductorResult<T> = Result<T, ConductorError>;

// ============================================================================
// From trait implementations for seamless error propagation
// ============================================================================

impl From<sqlx::Error> for ConductorError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::PoolTimedOut => ConductorError::DatabasePoolUnavailable(err.to_string()),
            sqlx::Error::PoolClosed => {
                ConductorError::DatabasePoolUnavailable("Connection pool is closed".to_string())
            }
            sqlx::Error::Configuration(_) => {
                ConductorError::DatabaseConnectionFailed(err.to_string())
            }
            sqlx::Error::Database(db_err) => {
                ConductorError::DatabaseQueryFailed(db_err.to_string())
            }
            _ => ConductorError::DatabaseQueryFailed(err.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for ConductorError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        ConductorError::DatabaseMigrationFailed(err.to_string())
    }
}

impl From<reqwest::Error> for ConductorError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_connect() || err.is_timeout() {
            ConductorError::CompletionUnavailable(err.to_string())
        } else if err.is_decode() {
            ConductorError::CompletionParseError(err.to_string())
        } else {
            ConductorError::CompletionRequestFailed(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ConductorError {
    fn from(err: serde_json::Error) -> Self {
        ConductorError::SerializationError(err.to_string())
    }
}

impl From<std::io::Error> for ConductorError {
    fn from(err: std::io::Error) -> Self {
        ConductorError::IoError(err.to_string())
    }
}

impl From<config::ConfigError> for ConductorError {
    fn from(err: config::ConfigError) -> Self {
        ConductorError::ConfigParseError(err.to_string())
    }
}

impl From<crate::db::DatabaseError> for ConductorError {
    fn from(err: crate::db::DatabaseError) -> Self {
        match err {
            crate::db::DatabaseError::MissingEnvVar(name) => ConductorError::MissingEnvVar(name),
            crate::db::DatabaseError::ConnectionFailed(e) => {
                ConductorError::DatabaseConnectionFailed(e.to_string())
            }
            crate::db::DatabaseError::MigrationFailed(e) => {
                ConductorError::DatabaseMigrationFailed(e.to_string())
            }
            crate::db::DatabaseError::InvalidConfig(msg) => ConductorError::InvalidConfigValue {
                key: "database".to_string(),
                message: msg,
            },
        }
    }
}

// ============================================================================
// Error categorization helpers
// ============================================================================

impl ConductorError {
    /// Returns true if this error is related to database operations.
    pub fn is_database_error(&self) -> bool {
        matches!(
            self,
            ConductorError::DatabaseConnectionFailed(_)
                | ConductorError::DatabaseQueryFailed(_)
                | ConductorError::DatabaseMigrationFailed(_)
                | ConductorError::DatabasePoolUnavailable(_)
        )
    }

    /// Returns true if this error is related to agent dispatch.
    pub fn is_agent_error(&self) -> bool {
        matches!(
            self,
            ConductorError::AgentNotRegistered(_)
                | ConductorError::AgentAlreadyRegistered(_)
                | ConductorError::ToolNotFound { .. }
                | ConductorError::ToolExecutionFailed { .. }
                | ConductorError::CatalogLoadFailed { .. }
        )
    }

    /// Returns true if this error is related to the completion endpoint.
    pub fn is_completion_error(&self) -> bool {
        matches!(
            self,
            ConductorError::CompletionRequestFailed(_)
                | ConductorError::CompletionParseError(_)
                | ConductorError::CompletionUnavailable(_)
        )
    }

    /// Returns true if a missing record caused this error.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ConductorError::PlanNotFound(_) | ConductorError::StepNotFound(_)
        )
    }

    /// Returns true if this error is transient; callers do not retry
    /// automatically, but transient failures are logged at warn rather than
    /// error severity.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            ConductorError::DatabasePoolUnavailable(_)
                | ConductorError::DatabaseConnectionFailed(_)
                | ConductorError::CompletionUnavailable(_)
        )
    }

    /// Returns the stable error code for logging and external reporting.
    pub fn error_code(&self) -> &'static str {
        match self {
            ConductorError::DatabaseConnectionFailed(_) => "E1001",
            ConductorError::DatabaseQueryFailed(_) => "E1002",
            ConductorError::DatabaseMigrationFailed(_) => "E1003",
            ConductorError::DatabasePoolUnavailable(_) => "E1004",
            ConductorError::MissingEnvVar(_) => "E2001",
            ConductorError::ConfigParseError(_) => "E2002",
            ConductorError::InvalidConfigValue { .. } => "E2003",
            ConductorError::AgentNotRegistered(_) => "E3001",
            ConductorError::AgentAlreadyRegistered(_) => "E3002",
            ConductorError::ToolNotFound { .. } => "E3003",
            ConductorError::ToolExecutionFailed { .. } => "E3004",
            ConductorError::CatalogLoadFailed { .. } => "E3005",
            ConductorError::PlanNotFound(_) => "E4001",
            ConductorError::StepNotFound(_) => "E4002",
            ConductorError::InvalidStepTransition { .. } => "E4003",
            ConductorError::PlanBreakdownRejected(_) => "E4004",
            ConductorError::CompletionRequestFailed(_) => "E5001",
            ConductorError::CompletionParseError(_) => "E5002",
            ConductorError::CompletionUnavailable(_) => "E5003",
            ConductorError::Internal(_) => "E9001",
            ConductorError::IoError(_) => "E9002",
            ConductorError::SerializationError(_) => "E9003",
        }
    }

    /// Log this error with severity matched to its transience.
    pub fn log(&self) {
        let code = self.error_code();
        if self.is_transient() {
            warn!(error_code = %code, "Transient error occurred: {}", self);
        } else {
            error!(error_code = %code, "Error occurred: {}", self);
        }
    }
}
