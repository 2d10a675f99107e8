pub mod cli;
pub mod core;
pub mod providers;

use crate::core::config::AppConfig;
use crate::core::error::parse_amount;
use crate::core::rate::RateResolver;
use crate::core::{ConversionRequest, Currency, DisplaySink, Session};
use anyhow::Result;
use std::sync::Arc;
use tracing::{debug, info};

/// A conversion as typed on the command line, amount still unparsed.
#[derive(Debug, Clone)]
pub struct ConversionArgs {
    pub amount: String,
    pub source: Currency,
    pub target: Currency,
}

impl ConversionArgs {
    fn to_request(&self) -> Result<ConversionRequest> {
        let amount = parse_amount(&self.amount)?;
        Ok(ConversionRequest::new(self.source, self.target, amount))
    }
}

#[derive(Debug, Clone)]
pub enum AppCommand {
    Balance,
    Quote(ConversionArgs),
    Convert {
        args: ConversionArgs,
        assume_yes: bool,
    },
    Shell,
}

/// Builds a fresh session from `config`: seed wallet, empty quote cache and the
/// configured quote provider.
pub fn build_session(config: &AppConfig) -> Result<Session> {
    let wallet = config.wallet.to_wallet()?;
    let provider = providers::AwesomeApiProvider::from_config(&config.awesome());
    Ok(Session::new(wallet, RateResolver::new(Arc::new(provider))))
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("walletfx starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let session = build_session(&config)?;
    let sink = cli::TerminalSink;

    match command {
        AppCommand::Balance => sink.show_wallet(&session.wallet().await),
        AppCommand::Quote(args) => {
            cli::quote::run(&session, args.to_request()?, &sink).await?;
        }
        AppCommand::Convert { args, assume_yes } => {
            cli::convert::run(&session, args.to_request()?, assume_yes, &sink).await?;
        }
        AppCommand::Shell => cli::shell::run(&session, &sink).await?,
    }
    Ok(())
}
