// file: src/main.rs
// description: commandline application entry point with command handling
// reference: application bootstrap and orchestration

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use sim_generate::{
    Config, ConceptSpec, GroqChatClient, PipelineOrchestrator, RunOutcome, Validator,
    utils::logging,
};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "sim_generate")]
#[command(author = "cipher")]
#[command(version = "0.1.0")]
#[command(about = "LLM pipeline for single-file HTML educational simulations", long_about = None)]
struct Cli {
    #[arg(
        short,
        long,
        value_name = "FILE",
        default_value = "config/default.toml"
    )]
    config: PathBuf,

    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    color: bool,

    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full generation pipeline for one concept spec
    Generate {
        #[arg(short, long, value_name = "FILE", default_value = "spec.json")]
        spec: PathBuf,

        #[arg(long, value_name = "DIR")]
        output_root: Option<PathBuf>,

        #[arg(long)]
        no_save_intermediates: bool,
    },

    /// Validate that a concept spec loads without invoking any model
    Check {
        #[arg(short, long, value_name = "FILE", default_value = "spec.json")]
        spec: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    logging::init_logger(cli.color, cli.verbose);

    info!("Simulation Generation Pipeline");
    info!("Loading configuration from: {}", cli.config.display());

    let config = if cli.config.exists() {
        Config::load(Some(cli.config.as_path())).context("Failed to load configuration")?
    } else {
        warn!(
            "Config file {} not found, using default configuration",
            cli.config.display()
        );
        Config::load(None).unwrap_or_else(|e| {
            warn!("Falling back to built-in defaults: {}", e);
            Config::default_config()
        })
    };

    match cli.command {
        Commands::Generate {
            spec,
            output_root,
            no_save_intermediates,
        } => cmd_generate(config, cli.color, spec, output_root, no_save_intermediates).await,
        Commands::Check { spec } => cmd_check(&spec),
    }
}

async fn cmd_generate(
    mut config: Config,
    color: bool,
    spec: PathBuf,
    output_root: Option<PathBuf>,
    no_save_intermediates: bool,
) -> Result<ExitCode> {
    Validator::validate_spec_path(&spec).context("Invalid spec path")?;

    if let Some(root) = output_root {
        config.output.root = root;
    }
    if no_save_intermediates {
        config.pipeline.save_intermediates = false;
    }

    let api_key = config
        .provider
        .api_key
        .clone()
        .context("No API key configured; set GROQ_API_KEY or provider.api_key")?;

    let provider = GroqChatClient::new(api_key, config.provider.base_url.clone());
    let orchestrator = PipelineOrchestrator::new(config, provider).with_progress_color(color);

    let outcome = orchestrator
        .run(&spec)
        .await
        .context("Generation run aborted")?;

    print_outcome(&outcome);

    if outcome.approved {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}

fn print_outcome(outcome: &RunOutcome) {
    println!();
    println!("{}", "=".repeat(70));
    if outcome.approved {
        println!("{}", logging::format_success("Simulation approved and ready to ship"));
    } else {
        println!(
            "{}",
            logging::format_warning("Simulation generated but needs revision")
        );
    }
    println!("{}", "=".repeat(70));

    if let Some(verdict) = &outcome.verdict {
        println!("Scores:");
        for (criterion, score) in &verdict.scores {
            let marker = if *score >= 3.0 { "✓" } else { "✗" };
            println!("  {} {}: {}/5", marker, criterion, score);
        }
        println!("Average score: {:.2}/5.0", verdict.mean_score());

        if !outcome.approved && !verdict.required_changes.is_empty() {
            println!("Required changes:");
            for change in verdict.required_changes.iter().take(5) {
                println!("  - {}", change);
            }
        }
    } else {
        println!("{}", logging::format_warning("No review verdict was produced"));
    }

    println!("Run status: {}", outcome.status);
    println!("All outputs saved to: {}", outcome.run_dir.display());
    println!(
        "Main file: {}",
        outcome.run_dir.join("final_output.html").display()
    );
}

fn cmd_check(spec: &PathBuf) -> Result<ExitCode> {
    Validator::validate_spec_path(spec).context("Invalid spec path")?;

    let concept_spec = ConceptSpec::load(spec).context("Spec failed to load")?;

    println!("{}", logging::format_success("Spec loads cleanly"));
    println!("Concept: {}", concept_spec.concept());
    if let Some(description) = concept_spec.description() {
        println!("Description: {}", Validator::truncate_text(description, 120));
    }
    println!("Fields: {}", concept_spec.fields().len());

    Ok(ExitCode::SUCCESS)
}
