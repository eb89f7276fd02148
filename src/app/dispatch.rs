use crate::booking::BookingSynthesizer;
use crate::cli::{Cli, Commands};
use crate::config::Config;
use crate::engine::{ExecutionState, PlanExecutor, SchedulingMode};
use crate::llm::ModelClient;
use crate::planner::{LlmPlanner, Plan};
use crate::tools::default_registry;
use crate::workflow::TravelWorkflow;
use crate::error::Result;
use anyhow::Context;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// Wire the workflow from config: one model client shared by planner and tools.
pub fn build_workflow(config: &Config, model_override: Option<&str>) -> TravelWorkflow {
    let mut client = ModelClient::from_config(config);
    if let Some(model) = model_override {
        client = client.with_model(model);
    }

    let registry = Arc::new(default_registry(&client, config));
    TravelWorkflow::new(
        Arc::new(LlmPlanner::new(client)),
        PlanExecutor::new(registry, config.engine.scheduling),
        BookingSynthesizer::from_config(&config.booking),
    )
}

/// Run one CLI command. Planning and config failures keep their typed
/// variants; file and serialization failures arrive as `ItineraError::Other`.
pub async fn dispatch(cli: Cli, mut config: Config) -> Result<()> {
    match cli.command {
        Commands::Book {
            message,
            passenger,
            nights,
            model,
        } => {
            if let Some(passenger) = passenger {
                config.booking.passenger_name = passenger;
            }
            if let Some(nights) = nights {
                config.booking.nights = nights;
            }
            config.validate()?;

            let workflow = build_workflow(&config, model.as_deref());
            let outcome = workflow.run(&message).await;
            println!("{}", outcome.render());
            Ok(())
        }

        Commands::Plan { message, model } => {
            let workflow = build_workflow(&config, model.as_deref());
            let plan = workflow.plan(&message).await?;
            let rendered =
                serde_json::to_string_pretty(&plan).context("Failed to serialize plan")?;
            println!("{rendered}");
            Ok(())
        }

        Commands::Execute {
            plan,
            state,
            save_state,
            single_pass,
        } => {
            if single_pass {
                config.engine.scheduling = SchedulingMode::SinglePass;
            }
            config.validate()?;
            let mut plan = read_plan(&plan)?;
            let initial = match state {
                Some(path) => read_state(&path)?,
                None => ExecutionState::new(),
            };
            info!(
                tasks = plan.len(),
                resumed = initial.len(),
                mode = %config.engine.scheduling,
                "executing saved plan"
            );

            let workflow = build_workflow(&config, None);
            let report = workflow.execute(&mut plan, initial).await;

            if let Some(path) = save_state {
                std::fs::write(&path, report.state.to_json()?)
                    .with_context(|| format!("Failed to write state to {}", path.display()))?;
                info!(path = %path.display(), "execution state saved");
            }

            println!("{}", workflow.conclude(&report).render());
            Ok(())
        }

        Commands::Tools => {
            let client = ModelClient::from_config(&config);
            let registry = default_registry(&client, &config);
            for spec in registry.specs() {
                println!("{}\n  {}", spec.name, spec.description);
                let schema = serde_json::to_string(&spec.parameters)
                    .with_context(|| format!("Failed to serialize schema of {}", spec.name))?;
                println!("  {schema}");
            }
            Ok(())
        }
    }
}

fn read_plan(path: &Path) -> anyhow::Result<Plan> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read plan from {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("Invalid plan in {}", path.display()))
}

fn read_state(path: &Path) -> anyhow::Result<ExecutionState> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read state from {}", path.display()))?;
    ExecutionState::from_json(&contents)
        .with_context(|| format!("Invalid execution state in {}", path.display()))
}
