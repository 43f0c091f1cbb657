use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing_subscriber::EnvFilter;

mod commands;
mod context;

use commands::{
    handle_agents_command, handle_feedback_command, handle_plans_command, handle_run_command,
    handle_status_command, handle_submit_command, AgentsCommand, FeedbackCommand, PlansCommand,
};
use context::CliContext;

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser)]
#[command(name = "conductor")]
#[command(version = VERSION)]
#[command(about = "Conductor - Multi-Agent Task Orchestration")]
#[command(long_about = r#"
Conductor coordinates a set of named agents (HR, marketing, procurement,
product, tech support, generic) over a shared plan/step store. Submit a task
to have the planner break it into steps, approve or reject individual steps,
and drive the plan forward step by step.

Use 'conductor init' to prepare the database, then 'conductor submit' to
create a plan and 'conductor run' to execute it.
"#)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(short, long, global = true, help = "Enable debug logging")]
    verbose: bool,

    #[arg(
        long,
        global = true,
        help = "Use an ephemeral in-memory store instead of PostgreSQL"
    )]
    memory: bool,

    #[arg(long, global = true, help = "Path to a conductor.toml config file")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Initialize the database and run migrations")]
    Init,

    #[command(about = "Submit a task; the planner turns it into a plan")]
    Submit {
        #[arg(help = "Task description")]
        description: String,

        #[arg(short, long, help = "Session to attach the plan to (new one if omitted)")]
        session: Option<uuid::Uuid>,

        #[arg(long, help = "Approve every planned step immediately")]
        auto_approve: bool,
    },

    #[command(about = "Inspect plans and their steps")]
    Plans {
        #[command(subcommand)]
        action: PlansCommand,
    },

    #[command(about = "Drive a plan forward by dispatching runnable steps")]
    Run {
        #[arg(short, long, help = "Session the plan belongs to")]
        session: uuid::Uuid,

        #[arg(short, long, help = "Plan to drive")]
        plan: uuid::Uuid,

        #[arg(long, help = "Keep dispatching until the plan completes")]
        all: bool,
    },

    #[command(about = "Apply human feedback to a step")]
    Feedback {
        #[command(subcommand)]
        action: FeedbackCommand,
    },

    #[command(about = "List the builtin agents and their tool catalogs")]
    Agents {
        #[command(subcommand)]
        action: Option<AgentsCommand>,
    },

    #[command(about = "Show a health report")]
    Status {
        #[arg(short, long, default_value = "text", help = "Output format (text, json)")]
        format: String,

        #[arg(long, help = "Skip the checks and report healthy")]
        bypass: bool,
    },
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let context = match CliContext::build(cli.memory, cli.config.as_deref()).await {
        Ok(context) => context,
        Err(e) => {
            eprintln!("{} {e:#}", "error:".red().bold());
            return ExitCode::FAILURE;
        }
    };

    let result = match cli.command {
        Commands::Init => commands::handle_init_command(&context).await,
        Commands::Submit {
            description,
            session,
            auto_approve,
        } => handle_submit_command(&context, &description, session, auto_approve).await,
        Commands::Plans { action } => handle_plans_command(&context, action).await,
        Commands::Run { session, plan, all } => {
            handle_run_command(&context, session, plan, all).await
        }
        Commands::Feedback { action } => handle_feedback_command(&context, action).await,
        Commands::Agents { action } => handle_agents_command(action).await,
        Commands::Status { format, bypass } => {
            handle_status_command(&context, &format, bypass).await
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {e:#}", "error:".red().bold());
            ExitCode::FAILURE
        }
    }
}
