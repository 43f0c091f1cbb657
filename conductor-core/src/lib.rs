pub mod agents;
pub mod completion;
pub mod config;
pub mod db;
pub mod error;
pub mod health;
pub mod models;
pub mod orchestrator;
pub mod session;
pub mod store;

pub use agents::{
    Agent, AgentProfile, AgentRegistry, ToolCatalog, ToolDescriptor, ToolParameter,
    FORMATTING_INSTRUCTIONS,
};
pub use completion::{
    ChatMessage, ChatRole, CompletionClient, CompletionOutcome, HttpCompletionClient,
};
pub use config::{
    CompletionConfig, ConductorConfig, ConfigLoadError, DatabaseConfig as ConductorDatabaseConfig,
    LoggingConfig, OrchestratorConfig,
};
pub use db::{init_database, init_database_with_url, Database, DatabaseConfig, DatabaseError};
pub use error::{ConductorError, ConductorResult};
pub use health::{HealthMonitor, HealthReport};
pub use models::{
    ActionRequest, ActionResponse, ActionStatus, AgentKind, AgentMessage, HumanFeedback,
    InputTask, Plan, PlanStatus, Step, StepStatus,
};
pub use orchestrator::{FeedbackHandler, GroupChatManager, Planner};
pub use session::SessionContext;
pub use store::{InMemoryStore, MemoryStore, PgMemoryStore};
