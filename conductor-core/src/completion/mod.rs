pub mod openai;
pub mod traits;

pub use openai::HttpCompletionClient;
pub use traits::{ChatMessage, ChatRole, CompletionClient, CompletionOutcome};
