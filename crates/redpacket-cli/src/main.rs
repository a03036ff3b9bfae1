//! CLI for redpacket: redeem a red packet code behind a simulated biometric unlock.

mod commands;
mod tui;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "redpacket")]
#[command(about = "redpacket: redeem a red packet code behind a simulated biometric unlock")]
#[command(version = redpacket_core::VERSION)]
struct Cli {
    /// JSON config file (delays, odds, reward range, currency)
    #[arg(long, global = true)]
    config: Option<String>,

    /// Write logs to this file (RUST_LOG controls the level)
    #[arg(long, global = true)]
    log_file: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive redemption screen (TUI). Default when no command is given.
    Screen {
        /// Seed for reproducible outcomes
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Check one or more codes and print the normalized form and help text
    Validate {
        /// Codes to check
        #[arg(required = true)]
        codes: Vec<String>,
    },

    /// Run a full redemption headlessly on virtual time
    Simulate {
        /// Code to redeem
        #[arg(long)]
        code: String,

        /// Biometric method
        #[arg(long, default_value = "face", value_parser = ["face", "touch"])]
        method: String,

        /// Seed for reproducible outcomes
        #[arg(long)]
        seed: Option<u64>,

        /// Give up after this many failed biometric attempts
        #[arg(long, default_value = "5")]
        max_attempts: u32,

        /// Print the outcome as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the starting redemption history
    History {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the effective configuration as JSON
    Config,
}

fn main() {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Screen { seed: None });
    let interactive = matches!(command, Commands::Screen { .. });

    commands::init_logging(cli.log_file.as_deref(), interactive);
    let config = commands::load_config(cli.config.as_deref());

    match command {
        Commands::Screen { seed } => commands::screen::run(config, seed),
        Commands::Validate { codes } => commands::validate::run(&codes),
        Commands::Simulate {
            code,
            method,
            seed,
            max_attempts,
            json,
        } => commands::simulate::run(commands::simulate::SimulateConfig {
            config,
            code: &code,
            method: &method,
            seed,
            max_attempts,
            json,
        }),
        Commands::History { json } => commands::history::run(&config, json),
        Commands::Config => commands::config::run(&config),
    }
}
