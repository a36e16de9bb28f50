//! pomforge CLI entrypoint
//! Parses command-line arguments and dispatches to the generation use case.
#![deny(unsafe_code)]

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use pomforge::application::{GenerateSuiteRequest, GenerateSuiteUseCase};
use pomforge::core::Config;
use pomforge::generation::{GenerationPlan, PageCatalog, ScenarioLoader};
use pomforge::infrastructure::service::ServiceState;
use pomforge::infrastructure::{CompositeScenarioLoader, FileSystemEmitter, ServiceClient};

#[derive(Parser)]
#[command(name = "pomforge")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Generate page objects and test classes from a scenario sheet
    Generate {
        /// Scenario source (.xlsx, .xls, .ods or .csv)
        #[arg(long)]
        input: PathBuf,
        /// Output directory for the generated suite
        #[arg(long)]
        output_dir: Option<PathBuf>,
        /// Configuration file (TOML, or YAML with a .yaml/.yml extension)
        #[arg(long)]
        config: Option<PathBuf>,
        /// Base URL of the text-generation service
        #[arg(long)]
        service_url: Option<String>,
        /// Model to request from the service
        #[arg(long)]
        model: Option<String>,
        /// Use templates only; never contact the service
        #[arg(long)]
        offline: bool,
    },
    /// Print parsed scenarios and the inferred pages without writing files
    Inspect {
        /// Scenario source (.xlsx, .xls, .ods or .csv)
        #[arg(long)]
        input: PathBuf,
        /// Configuration file
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Check that the text-generation service answers and list its models
    Probe {
        /// Configuration file
        #[arg(long)]
        config: Option<PathBuf>,
        /// Base URL of the text-generation service
        #[arg(long)]
        service_url: Option<String>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli.command).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Commands) -> anyhow::Result<ExitCode> {
    match command {
        Commands::Generate {
            input,
            output_dir,
            config,
            service_url,
            model,
            offline,
        } => {
            let mut config = load_config(config.as_deref())?;
            apply_overrides(&mut config, output_dir, service_url, model);
            generate(input, config, offline).await
        }
        Commands::Inspect { input, config } => {
            let config = load_config(config.as_deref())?;
            inspect(&input, &config).await?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Probe {
            config,
            service_url,
        } => {
            let mut config = load_config(config.as_deref())?;
            apply_overrides(&mut config, None, service_url, None);
            probe(&config).await
        }
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    Config::load_or_default(path).with_context(|| match path {
        Some(path) => format!("Failed to load configuration from {}", path.display()),
        None => "Invalid default configuration".to_string(),
    })
}

/// CLI flags win over file values
fn apply_overrides(
    config: &mut Config,
    output_dir: Option<PathBuf>,
    service_url: Option<String>,
    model: Option<String>,
) {
    if let Some(dir) = output_dir {
        config.output.dir = dir;
    }
    if let Some(url) = service_url {
        config.service.base_url = url;
    }
    if let Some(model) = model {
        config.service.model = model;
    }
}

async fn generate(input: PathBuf, config: Config, offline: bool) -> anyhow::Result<ExitCode> {
    info!(input = %input.display(), output = %config.output.dir.display(), "Starting generation");

    let use_case = GenerateSuiteUseCase::new(
        Arc::new(CompositeScenarioLoader::new()),
        Arc::new(FileSystemEmitter::new()),
    );
    let report = use_case
        .execute(GenerateSuiteRequest {
            input: input.clone(),
            config,
            offline,
        })
        .await
        .with_context(|| format!("Failed to generate suite from {}", input.display()))?;

    println!("{}", report.render_console());
    if report.has_failures() {
        eprintln!("{} file(s) could not be written", report.failed_count());
        return Ok(ExitCode::FAILURE);
    }
    println!("✅ Suite generated with {}", report.generation_method());
    Ok(ExitCode::SUCCESS)
}

async fn inspect(input: &Path, config: &Config) -> anyhow::Result<()> {
    let specs = CompositeScenarioLoader::new()
        .load(input)
        .await
        .with_context(|| format!("Failed to read scenarios from {}", input.display()))?;
    let catalog = PageCatalog::from_config(&config.pages);
    let plan = GenerationPlan::build(&specs, &catalog);

    println!("Scenarios: {}", plan.scenario_count);
    for class in &plan.classes {
        let pages: Vec<&str> = class.pages().into_iter().collect();
        if pages.is_empty() {
            println!("\n{}", class.name);
        } else {
            println!("\n{} (pages: {})", class.name, pages.join(", "));
        }
        for scenario in &class.scenarios {
            println!(
                "  • {} -> {}() [{} step(s)]",
                scenario.spec.id,
                scenario.method_name,
                scenario.spec.steps.len()
            );
        }
    }

    println!("\nPages:");
    for page in &plan.pages {
        let categories: Vec<&str> = page.categories.iter().map(|c| c.as_str()).collect();
        println!("  • {} ({})", page.name, categories.join(", "));
    }
    if plan.pages.is_empty() {
        println!("  (none)");
    }
    Ok(())
}

async fn probe(config: &Config) -> anyhow::Result<ExitCode> {
    let mut client = ServiceClient::new(&config.service).context("Failed to build service client")?;
    match client.probe().await {
        ServiceState::Available => {
            println!("✅ Service available at {}", client.base_url());
            let models = client
                .list_models()
                .await
                .context("Failed to list models")?;
            if models.is_empty() {
                println!("No models installed.");
            } else {
                println!("Models:");
                for model in &models {
                    let marker = if *model == config.service.model { " (configured)" } else { "" };
                    println!("  • {model}{marker}");
                }
            }
            Ok(ExitCode::SUCCESS)
        }
        state => {
            println!("Service at {} is {state}", client.base_url());
            Ok(ExitCode::FAILURE)
        }
    }
}
