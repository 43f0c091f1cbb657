use std::time::Duration;

use colored::Colorize;
use tokio::time::timeout;
use uuid::Uuid;

use conductor_core::{ActionStatus, SessionContext};

use crate::context::CliContext;

const RESPONSE_WAIT: Duration = Duration::from_secs(120);

pub async fn handle_run_command(
    context: &CliContext,
    session: Uuid,
    plan: Uuid,
    all: bool,
) -> anyhow::Result<()> {
    let session_context =
        SessionContext::initialize(session, context.store.clone(), context.completion_client())
            .await?;

    loop {
        let had_runnable = context
            .store
            .get_steps_for_plan(session, plan)
            .await?
            .iter()
            .any(|s| s.is_runnable());

        let message = session_context.execute_next_step(plan).await?;
        println!("{message}");

        if !had_runnable {
            break;
        }

        // Dispatch itself is fire-and-continue; the CLI waits for the
        // agent's response before exiting or dispatching the next step.
        match timeout(RESPONSE_WAIT, session_context.manager().recv_response()).await {
            Ok(Some(response)) => {
                let marker = match response.status {
                    ActionStatus::Completed => "done:".green().bold(),
                    ActionStatus::Failed => "failed:".red().bold(),
                };
                println!("{marker} step {} - {}", response.step_id, response.message);
            }
            Ok(None) => {
                println!("{} response channel closed", "warn:".yellow().bold());
                break;
            }
            Err(_) => {
                println!(
                    "{} no response within {}s, leaving the step in progress",
                    "warn:".yellow().bold(),
                    RESPONSE_WAIT.as_secs()
                );
                break;
            }
        }

        if !all {
            break;
        }
    }

    session_context.close().await;
    Ok(())
}
