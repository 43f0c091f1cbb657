mod agents;
mod feedback;
mod plans;
mod run;
mod status;
mod submit;

pub use agents::{handle_agents_command, AgentsCommand};
pub use feedback::{handle_feedback_command, FeedbackCommand};
pub use plans::{handle_plans_command, PlansCommand};
pub use run::handle_run_command;
pub use status::handle_status_command;
pub use submit::handle_submit_command;

use colored::Colorize;

use crate::context::CliContext;

pub async fn handle_init_command(context: &CliContext) -> anyhow::Result<()> {
    match &context.database {
        Some(database) => {
            database.run_migrations().await?;
            println!("{} database initialized", "ok:".green().bold());
        }
        None => {
            println!(
                "{} in-memory store needs no initialization",
                "ok:".green().bold()
            );
        }
    }
    Ok(())
}
