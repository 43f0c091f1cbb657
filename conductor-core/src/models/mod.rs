pub mod agent;
pub mod message;
pub mod plan;
pub mod step;
pub mod task;

pub use agent::AgentKind;
pub use message::{ActionRequest, ActionResponse, ActionStatus, AgentMessage};
pub use plan::{Plan, PlanStatus};
pub use step::{HumanFeedback, Step, StepStatus};
pub use task::InputTask;
