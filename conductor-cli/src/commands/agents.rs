use std::str::FromStr;

use clap::Subcommand;
use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, Table};

use conductor_core::{AgentKind, AgentProfile};

#[derive(Subcommand)]
pub enum AgentsCommand {
    #[command(about = "List the builtin agents")]
    List,

    #[command(about = "Show one agent's tool catalog")]
    Show {
        #[arg(help = "Agent kind (hr, marketing, procurement, product, tech_support, generic)")]
        agent: String,
    },
}

pub async fn handle_agents_command(command: Option<AgentsCommand>) -> anyhow::Result<()> {
    match command.unwrap_or(AgentsCommand::List) {
        AgentsCommand::List => cmd_agents_list(),
        AgentsCommand::Show { agent } => cmd_agents_show(&agent),
    }
}

fn cmd_agents_list() -> anyhow::Result<()> {
    let profiles = AgentProfile::all_builtin()?;

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_header(vec!["Agent", "Tools", "Tool names"]);
    for profile in &profiles {
        let names: Vec<&str> = profile
            .catalog
            .tools
            .iter()
            .map(|t| t.name.as_str())
            .collect();
        table.add_row(vec![
            profile.kind.to_string(),
            profile.catalog.len().to_string(),
            names.join(", "),
        ]);
    }
    println!("{table}");
    Ok(())
}

fn cmd_agents_show(agent: &str) -> anyhow::Result<()> {
    let kind = AgentKind::from_str(agent).map_err(|e| anyhow::anyhow!(e))?;
    let profile = AgentProfile::builtin(kind)?;

    println!("agent: {}", profile.kind);
    println!("system message: {}", profile.system_message);

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_header(vec!["Tool", "Description", "Parameters"]);
    for tool in &profile.catalog.tools {
        let params: Vec<String> = tool
            .parameters
            .iter()
            .map(|p| {
                if p.required {
                    p.name.clone()
                } else {
                    format!("{}?", p.name)
                }
            })
            .collect();
        table.add_row(vec![
            tool.name.clone(),
            tool.description.clone(),
            params.join(", "),
        ]);
    }
    println!("{table}");
    Ok(())
}
