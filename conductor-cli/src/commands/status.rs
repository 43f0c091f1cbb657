use colored::Colorize;

use conductor_core::HealthMonitor;

use crate::context::CliContext;

pub async fn handle_status_command(
    context: &CliContext,
    format: &str,
    bypass: bool,
) -> anyhow::Result<()> {
    let mut monitor = HealthMonitor::new();

    match &context.database {
        Some(database) => {
            let database = database.clone();
            monitor = monitor.register("database", move || {
                let database = database.clone();
                async move { database.health_check().await.is_ok() }
            });
        }
        None => {
            monitor = monitor.register("database", || async { true });
        }
    }

    let completion_configured = !context.config.completion.base_url.is_empty();
    monitor = monitor.register("completion_endpoint", move || async move {
        completion_configured
    });

    let bypass = bypass || context.config.orchestrator.health_bypass;
    let report = monitor.run_with_bypass(bypass).await;

    if format == "json" {
        println!("{}", report.to_json()?);
    } else {
        let headline = if report.healthy {
            "healthy".green().bold()
        } else {
            "unhealthy".red().bold()
        };
        println!("{headline} (status {})", report.status_code());
        for (name, passed) in &report.checks {
            let marker = if *passed { "ok".green() } else { "failed".red() };
            println!("  {name}: {marker}");
        }
    }

    Ok(())
}
