//! # calldata-cli
//!
//! Command-line interface for the calldata ABI codec.
//!
//! ## Usage
//!
//! ```bash
//! # Calls
//! calldata encode --abi erc20.json --method transfer --args '["0x742d...", 1000]'
//! calldata decode --abi erc20.json --method transfer --data 0xa9059cbb...
//!
//! # Return values
//! calldata encode-output --abi erc20.json --method balanceOf --values '[42]'
//! calldata decode-output --abi erc20.json --method balanceOf --data 0x...2a
//!
//! # Selectors
//! calldata selector --abi erc20.json --all
//! ```

use clap::{Parser, Subcommand};

mod commands;
mod config;
mod error;
mod output;

pub use config::Config;
pub use error::CliError;
pub use output::Output;

use commands::call::{DecodeCommand, DecodeOutputCommand, EncodeCommand, EncodeOutputCommand};
use commands::selector::SelectorCommand;

/// Contract calldata encoder and decoder
#[derive(Parser, Debug)]
#[command(name = "calldata")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    json: bool,

    /// Log level (overridden by RUST_LOG)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

/// CLI commands
#[derive(Debug, Subcommand)]
enum Commands {
    /// Encode a function call
    Encode(EncodeCommand),
    /// Encode function return values
    EncodeOutput(EncodeOutputCommand),
    /// Decode function call data
    Decode(DecodeCommand),
    /// Decode function return data
    DecodeOutput(DecodeOutputCommand),
    /// Show function selectors
    Selector(SelectorCommand),
    /// Show or edit configuration
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,
        /// Enable or disable optimized encoding by default
        #[arg(long)]
        set_optimize: Option<bool>,
        /// Enable or disable decoding tuples as objects by default
        #[arg(long)]
        set_structs_as_objects: Option<bool>,
    },
}

fn init_logging(level: &str, json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn main() {
    let cli = Cli::parse();

    let mut config = Config::load();
    let level = cli.log_level.clone().unwrap_or_else(|| config.log_level.clone());
    init_logging(&level, cli.json);

    let result = match cli.command {
        Commands::Encode(cmd) => cmd.execute(&config, cli.json),
        Commands::EncodeOutput(cmd) => cmd.execute(&config, cli.json),
        Commands::Decode(cmd) => cmd.execute(&config, cli.json),
        Commands::DecodeOutput(cmd) => cmd.execute(&config, cli.json),
        Commands::Selector(cmd) => cmd.execute(cli.json),
        Commands::Config {
            show,
            set_optimize,
            set_structs_as_objects,
        } => handle_config(&mut config, show, set_optimize, set_structs_as_objects, cli.json),
    };

    if let Err(e) = result {
        if cli.json {
            println!(
                "{}",
                serde_json::json!({
                    "error": e.to_string(),
                    "success": false
                })
            );
        } else {
            eprintln!("Error: {}", e);
        }
        std::process::exit(1);
    }
}

fn handle_config(
    config: &mut Config,
    show: bool,
    set_optimize: Option<bool>,
    set_structs_as_objects: Option<bool>,
    json: bool,
) -> Result<(), CliError> {
    let mut modified = false;

    if let Some(optimize) = set_optimize {
        config.optimize = optimize;
        modified = true;
    }

    if let Some(structs_as_objects) = set_structs_as_objects {
        config.structs_as_objects = structs_as_objects;
        modified = true;
    }

    if modified {
        let path = config.save()?;
        tracing::info!("Saved configuration to {}", path.display());
        Output::new(json)
            .field("status", "saved")
            .message("Configuration saved")
            .print();
    } else if show {
        Output::new(json)
            .field_bool("optimize", config.optimize)
            .field_bool("structs_as_objects", config.structs_as_objects)
            .field("log_level", &config.log_level)
            .message(&format!(
                "Optimize: {}\nStructs as objects: {}\nLog level: {}",
                config.optimize, config.structs_as_objects, config.log_level
            ))
            .print();
    } else {
        Output::new(json)
            .message("Use --show to display config, or --set-optimize/--set-structs-as-objects to modify")
            .print();
    }

    Ok(())
}
