use std::path::PathBuf;

use clap::{Parser, Subcommand};
use eyre::Result;
use resus_cli::config::{config_path, load_config, save_config};
use resus_cli::scenario::{Scenario, replay};
use resus_cli::sheet::dose_sheet;
use resus_core::config::EngineConfig;
use resus_core::models::patient::PatientContextInput;
use resus_core::models::protocol::ProtocolId;
use resus_engine::Engine;

#[derive(Parser)]
#[command(name = "resus")]
#[command(about = "Resuscitation protocol decision engine")]
struct Cli {
    /// Config file (defaults to the user config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a scenario file and print the session export
    Run {
        /// Scenario JSON file
        scenario: PathBuf,
    },
    /// List available protocols and their steps
    Protocols,
    /// Print a dose and equipment sheet
    Doses {
        /// Weight in kilograms
        #[arg(long)]
        weight: Option<f64>,
        #[arg(long)]
        age_years: Option<f64>,
        #[arg(long)]
        age_months: Option<f64>,
        /// Protocol whose formulas to use
        #[arg(long, default_value = "primary_survey")]
        protocol: ProtocolId,
        /// Print JSON instead of text
        #[arg(long)]
        output_json: bool,
    },
    /// Manage the config file
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Write the default config
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Print the effective config
    Show,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    init_tracing(cli.json);

    let path = config_path(cli.config.as_deref())?;

    match cli.command {
        Commands::Run { scenario } => {
            let engine = Engine::new(load_config(&path)?)?;
            let scenario = Scenario::from_path(&scenario)?;
            let session = replay(&engine, &scenario)?;
            println!("{}", engine.export(&session).to_json_pretty()?);
        }
        Commands::Protocols => {
            for protocol in resus_protocols::all_protocols() {
                println!("{} ({})", protocol.id(), protocol.name());
                for step in protocol.steps() {
                    println!("  {} [{}] {}", step.id, step.phase.letter(), step.title);
                }
            }
        }
        Commands::Doses {
            weight,
            age_years,
            age_months,
            protocol,
            output_json,
        } => {
            let config = load_config(&path)?;
            let input = PatientContextInput {
                age_years,
                age_months,
                weight_kg: weight,
                ..Default::default()
            };
            let sheet = dose_sheet(&input, config.formulas.for_protocol(protocol))?;
            if output_json {
                println!("{}", serde_json::to_string_pretty(&sheet)?);
            } else {
                print!("{}", sheet.render());
            }
        }
        Commands::Config { command } => match command {
            ConfigCommand::Init { force } => {
                if path.exists() && !force {
                    return Err(eyre::eyre!(
                        "{} already exists (use --force to overwrite)",
                        path.display()
                    ));
                }
                save_config(&path, &EngineConfig::default())?;
                println!("{}", path.display());
            }
            ConfigCommand::Show => {
                let config = load_config(&path)?;
                println!("{}", serde_json::to_string_pretty(&config)?);
            }
        },
    }

    Ok(())
}

/// Logs go to stderr so stdout carries only command output.
fn init_tracing(json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}
