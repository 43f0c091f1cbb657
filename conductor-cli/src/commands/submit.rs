use colored::Colorize;
use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, Table};
use uuid::Uuid;

use conductor_core::{HumanFeedback, SessionContext};

use crate::context::CliContext;

pub async fn handle_submit_command(
    context: &CliContext,
    description: &str,
    session: Option<Uuid>,
    auto_approve: bool,
) -> anyhow::Result<()> {
    let session_id = session.unwrap_or_else(Uuid::new_v4);
    let session_context = SessionContext::initialize(
        session_id,
        context.store.clone(),
        context.completion_client(),
    )
    .await?;

    let (plan, steps) = session_context.submit_task(description).await?;

    println!("{} plan created", "ok:".green().bold());
    println!("  session: {session_id}");
    println!("  plan:    {}", plan.id);

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_header(vec!["#", "Step", "Agent", "Action"]);
    for step in &steps {
        table.add_row(vec![
            step.order_index.to_string(),
            step.id.to_string(),
            step.agent.to_string(),
            step.action.clone(),
        ]);
    }
    println!("{table}");

    if auto_approve {
        for step in &steps {
            session_context
                .apply_feedback(&HumanFeedback {
                    step_id: step.id,
                    session_id,
                    approved: true,
                    human_feedback: None,
                    updated_action: None,
                })
                .await?;
        }
        println!("{} all {} step(s) approved", "ok:".green().bold(), steps.len());
    } else {
        println!(
            "Approve steps with 'conductor feedback approve <step-id> --session {session_id}'"
        );
    }

    session_context.close().await;
    Ok(())
}
