use clap::Subcommand;
use colored::Colorize;
use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, Cell, Color, Table};
use uuid::Uuid;

use conductor_core::{PlanStatus, StepStatus};

use crate::context::CliContext;

#[derive(Subcommand)]
pub enum PlansCommand {
    #[command(about = "List plans for a session")]
    List {
        #[arg(short, long, help = "Session to list plans for")]
        session: Uuid,
    },

    #[command(about = "Show a plan and its steps")]
    Show {
        #[arg(short, long, help = "Session the plan belongs to")]
        session: Uuid,

        #[arg(short, long, help = "Plan to show")]
        plan: Uuid,

        #[arg(short, long, default_value = "text", help = "Output format (text, json)")]
        format: String,
    },
}

pub async fn handle_plans_command(
    context: &CliContext,
    command: PlansCommand,
) -> anyhow::Result<()> {
    match command {
        PlansCommand::List { session } => cmd_plans_list(context, session).await,
        PlansCommand::Show {
            session,
            plan,
            format,
        } => cmd_plans_show(context, session, plan, &format).await,
    }
}

fn plan_status_cell(status: PlanStatus) -> Cell {
    let color = match status {
        PlanStatus::Created => Color::Yellow,
        PlanStatus::InProgress => Color::Cyan,
        PlanStatus::Completed => Color::Green,
    };
    Cell::new(status.to_string()).fg(color)
}

fn step_status_cell(status: StepStatus) -> Cell {
    let color = match status {
        StepStatus::Planned => Color::Yellow,
        StepStatus::Approved => Color::Cyan,
        StepStatus::NeedsUpdate => Color::Magenta,
        StepStatus::InProgress => Color::Blue,
        StepStatus::Completed => Color::Green,
        StepStatus::Failed => Color::Red,
    };
    Cell::new(status.to_string()).fg(color)
}

async fn cmd_plans_list(context: &CliContext, session: Uuid) -> anyhow::Result<()> {
    let plans = context.store.get_plans_for_session(session).await?;

    if plans.is_empty() {
        println!("No plans for session {session}");
        return Ok(());
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_header(vec!["Plan", "Status", "Goal", "Created"]);
    for plan in &plans {
        table.add_row(vec![
            Cell::new(plan.id.to_string()),
            plan_status_cell(plan.overall_status),
            Cell::new(&plan.initial_goal),
            Cell::new(plan.created_at.format("%Y-%m-%d %H:%M").to_string()),
        ]);
    }
    println!("{table}");
    Ok(())
}

async fn cmd_plans_show(
    context: &CliContext,
    session: Uuid,
    plan_id: Uuid,
    format: &str,
) -> anyhow::Result<()> {
    let plan = context
        .store
        .get_plan(session, plan_id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("plan {plan_id} not found in session {session}"))?;
    let steps = context.store.get_steps_for_plan(session, plan_id).await?;

    if format == "json" {
        let payload = serde_json::json!({ "plan": plan, "steps": steps });
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    println!("{}: {}", "plan".bold(), plan.id);
    println!("{}: {}", "goal".bold(), plan.initial_goal);
    println!("{}: {}", "status".bold(), plan.overall_status);
    if let Some(summary) = &plan.summary {
        println!("{}: {}", "summary".bold(), summary);
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_header(vec!["#", "Step", "Agent", "Status", "Action", "Reply"]);
    for step in &steps {
        table.add_row(vec![
            Cell::new(step.order_index.to_string()),
            Cell::new(step.id.to_string()),
            Cell::new(step.agent.to_string()),
            step_status_cell(step.status),
            Cell::new(&step.action),
            Cell::new(step.agent_reply.as_deref().unwrap_or("-")),
        ]);
    }
    println!("{table}");
    Ok(())
}
