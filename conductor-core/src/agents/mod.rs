pub mod handler;
pub mod profile;
pub mod registry;
pub mod tools;

pub use handler::Agent;
pub use profile::AgentProfile;
pub use registry::AgentRegistry;
pub use tools::{ToolCatalog, ToolDescriptor, ToolParameter, FORMATTING_INSTRUCTIONS};
