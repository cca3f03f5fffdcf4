//! CLI entry point for the opto service.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};

use opto_service::config::Config;
use opto_service::engine;
use opto_service::error::Result;
use opto_service::request::OptimizeRequest;
use opto_service::response::to_json;

#[derive(Parser)]
#[command(name = "opto-service")]
#[command(about = "Mean-variance optimizer: request.json → weights")]
#[command(version)]
struct Cli {
    /// Path to opto.toml (defaults apply if it does not exist)
    #[arg(long, default_value = "opto.toml")]
    config: PathBuf,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Json)]
    format: Format,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Json,
    Text,
}

#[derive(Subcommand)]
enum Command {
    /// Sample portfolios, select the best, and report optimized weights
    Optimize {
        /// Path to request.json
        request: PathBuf,
    },

    /// Sample portfolios and report the scatter data only
    Sample {
        /// Path to request.json
        request: PathBuf,
    },

    /// Validate the config file and print the effective settings
    CheckConfig,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_secs()
        .init();

    let cli = Cli::parse();

    let config = match Config::load_or_default(&cli.config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error loading config: {e}");
            process::exit(1);
        }
    };

    if let Err(e) = run(&cli, &config) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run(cli: &Cli, config: &Config) -> Result<()> {
    match &cli.command {
        Command::Optimize { request } => {
            let request = OptimizeRequest::load(request)?;
            let response = engine::handle(config, &request)?;
            match cli.format {
                Format::Json => println!("{}", to_json(&response, config.output.pretty)?),
                Format::Text => print!("{response}"),
            }
        }
        Command::Sample { request } => {
            let request = OptimizeRequest::load(request)?;
            let response = engine::sample(config, &request)?;
            match cli.format {
                Format::Json => println!("{}", to_json(&response, config.output.pretty)?),
                Format::Text => print!("{response}"),
            }
        }
        Command::CheckConfig => {
            println!("population_size     = {}", config.engine.population_size);
            let limit = config.engine.max_population_size;
            println!("max_population_size = {limit}");
            println!("risk_free_rate      = {}", config.engine.risk_free_rate);
            match config.engine.seed {
                Some(seed) => println!("seed                = {seed}"),
                None => println!("seed                = (entropy)"),
            }
            println!("parse_policy        = {:?}", config.input.parse_policy);
            println!("pretty              = {}", config.output.pretty);
            println!("frontier            = {}", config.output.frontier);
        }
    }
    Ok(())
}
