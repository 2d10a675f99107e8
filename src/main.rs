use anyhow::Result;
use clap::{Args, CommandFactory, Parser, Subcommand};
use walletfx::core::Currency;
use walletfx::core::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args)]
struct ConversionOpts {
    /// Amount of the source currency to convert
    amount: String,

    /// Currency to convert from (BRL, USD or BTC)
    #[arg(short, long, default_value = "BRL")]
    from: Currency,

    /// Currency to convert to (BRL, USD or BTC)
    #[arg(short, long, default_value = "USD")]
    to: Currency,
}

impl From<ConversionOpts> for walletfx::ConversionArgs {
    fn from(opts: ConversionOpts) -> Self {
        walletfx::ConversionArgs {
            amount: opts.amount,
            source: opts.from,
            target: opts.to,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Show the starting wallet balances
    Balance,
    /// Show the current rate for a conversion
    Quote(ConversionOpts),
    /// Quote a conversion, confirm it and settle it against the wallet
    Convert {
        #[command(flatten)]
        conversion: ConversionOpts,

        /// Settle without asking for confirmation
        #[arg(short, long)]
        yes: bool,
    },
    /// Start an interactive session with several conversions on one wallet
    Shell,
}

impl From<Commands> for walletfx::AppCommand {
    fn from(cmd: Commands) -> walletfx::AppCommand {
        match cmd {
            Commands::Balance => walletfx::AppCommand::Balance,
            Commands::Quote(opts) => walletfx::AppCommand::Quote(opts.into()),
            Commands::Convert { conversion, yes } => walletfx::AppCommand::Convert {
                args: conversion.into(),
                assume_yes: yes,
            },
            Commands::Shell => walletfx::AppCommand::Shell,
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => walletfx::cli::setup::setup(),
        Some(cmd) => walletfx::run_command(cmd.into(), cli.config_path.as_deref()).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
