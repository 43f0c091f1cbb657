use clap::Subcommand;
use colored::Colorize;
use uuid::Uuid;

use conductor_core::{FeedbackHandler, HumanFeedback};

use crate::context::CliContext;

#[derive(Subcommand)]
pub enum FeedbackCommand {
    #[command(about = "Approve a step for dispatch")]
    Approve {
        #[arg(help = "Step to approve")]
        step: Uuid,

        #[arg(short, long, help = "Session the step belongs to")]
        session: Uuid,

        #[arg(long, help = "Replace the step's action text")]
        updated_action: Option<String>,

        #[arg(short, long, help = "Feedback comment to record")]
        comment: Option<String>,
    },

    #[command(about = "Reject a step; it goes back for re-approval")]
    Reject {
        #[arg(help = "Step to reject")]
        step: Uuid,

        #[arg(short, long, help = "Session the step belongs to")]
        session: Uuid,

        #[arg(short, long, help = "Feedback comment to record")]
        comment: Option<String>,
    },
}

pub async fn handle_feedback_command(
    context: &CliContext,
    command: FeedbackCommand,
) -> anyhow::Result<()> {
    let handler = FeedbackHandler::new(context.store.clone());

    let feedback = match command {
        FeedbackCommand::Approve {
            step,
            session,
            updated_action,
            comment,
        } => HumanFeedback {
            step_id: step,
            session_id: session,
            approved: true,
            human_feedback: comment,
            updated_action,
        },
        FeedbackCommand::Reject {
            step,
            session,
            comment,
        } => HumanFeedback {
            step_id: step,
            session_id: session,
            approved: false,
            human_feedback: comment,
            updated_action: None,
        },
    };

    let step = handler.handle_human_feedback(&feedback).await?;
    println!(
        "{} step {} is now {}",
        "ok:".green().bold(),
        step.id,
        step.status.to_string().bold()
    );
    Ok(())
}
