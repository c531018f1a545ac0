use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use url::Url;

use maestro_config::WorkflowDefinition;
use maestro_executor::execute;
use maestro_http::HttpInvoker;
use maestro_normalizer::normalize;

/// Maestro - validates, normalizes, and executes generated HTTP workflows
#[derive(Parser)]
#[command(name = "maestro")]
#[command(version, about, long_about = None)]
struct Cli {
  /// Increase log verbosity (-v info, -vv debug, -vvv trace)
  #[arg(short, long, global = true, action = clap::ArgAction::Count)]
  verbose: u8,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Validate a raw definition file and print the typed result
  Validate {
    /// Path to the definition file (JSON)
    definition: PathBuf,
  },

  /// Validate and normalize a definition, printing the repaired graph
  Normalize {
    /// Path to the definition file (JSON)
    definition: PathBuf,
  },

  /// Validate, normalize, and execute a definition against a live API
  Run {
    /// Path to the definition file (JSON)
    definition: PathBuf,

    /// Base URL the activity endpoints are resolved against
    #[arg(long, default_value = "http://localhost:3001")]
    base_url: Url,
  },

  /// Render a definition as static Temporal TypeScript
  Codegen {
    /// Path to the definition file (JSON)
    definition: PathBuf,
  },
}

#[tokio::main]
async fn main() -> Result<()> {
  let cli = Cli::parse();

  let filter = match cli.verbose {
    0 => "warn",
    1 => "info",
    2 => "debug",
    _ => "trace",
  };
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::new(filter))
    .with_target(false)
    .init();

  match cli.command {
    Commands::Validate { definition } => {
      let def = load_definition(&definition)?;
      println!("{}", serde_json::to_string_pretty(&def)?);
    }
    Commands::Normalize { definition } => {
      let mut def = load_definition(&definition)?;
      normalize(&mut def);
      println!("{}", serde_json::to_string_pretty(&def)?);
    }
    Commands::Run {
      definition,
      base_url,
    } => {
      let mut def = load_definition(&definition)?;
      normalize(&mut def);
      let invoker = HttpInvoker::new(base_url);
      let result = execute(&def, &invoker).await?;
      println!("{}", serde_json::to_string_pretty(&result.results)?);
    }
    Commands::Codegen { definition } => {
      let mut def = load_definition(&definition)?;
      normalize(&mut def);
      print!("{}", maestro_codegen::render(&def));
    }
  }

  Ok(())
}

fn load_definition(path: &Path) -> Result<WorkflowDefinition> {
  let raw = std::fs::read_to_string(path)
    .with_context(|| format!("failed to read {}", path.display()))?;
  let value: serde_json::Value =
    serde_json::from_str(&raw).context("definition file is not valid JSON")?;
  let def = maestro_config::validate(&value)?;
  Ok(def)
}
