//! Interactive session: several quotes and conversions against one wallet.
use super::sink::describe_error;
use super::{quote, ui};
use crate::core::error::parse_amount;
use crate::core::{ConversionRequest, Currency, DisplaySink, QuoteView, Session};
use anyhow::{Result, anyhow, bail};
use console::Term;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

const HELP: &str = "\
Commands:
  quote <amount> <from> <to>   Quote a conversion, e.g. `quote 1000 brl usd`
  confirm                      Settle the pending quote at the quoted rate
  cancel                       Drop the pending quote
  pending                      Show the pending quote
  balance                      Show wallet balances
  help                         Show this help
  quit                         Leave the session";

#[derive(Debug, Clone, PartialEq)]
pub enum ShellCommand {
    Quote {
        amount: String,
        source: Currency,
        target: Currency,
    },
    Confirm,
    Cancel,
    Pending,
    Balance,
    Help,
    Quit,
}

impl ShellCommand {
    pub fn parse(line: &str) -> Result<Self> {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            bail!("Empty command, type `help` for a list of commands");
        };
        let rest: Vec<&str> = words.collect();

        let command = match (verb.to_lowercase().as_str(), rest.as_slice()) {
            ("quote", [amount, source, target]) => ShellCommand::Quote {
                amount: amount.to_string(),
                source: source.parse()?,
                target: target.parse()?,
            },
            ("quote", _) => bail!("Usage: quote <amount> <from> <to>"),
            ("confirm", []) => ShellCommand::Confirm,
            ("cancel", []) => ShellCommand::Cancel,
            ("pending", []) => ShellCommand::Pending,
            ("balance", []) => ShellCommand::Balance,
            ("help", []) => ShellCommand::Help,
            ("quit" | "exit", []) => ShellCommand::Quit,
            _ => return Err(anyhow!("Unknown command: {}", line.trim())),
        };
        Ok(command)
    }
}

/// Runs one command. Returns false once the session should end.
pub async fn execute(session: &Session, command: ShellCommand, sink: &dyn DisplaySink) -> bool {
    debug!(?command, "Executing shell command");
    match command {
        ShellCommand::Quote {
            amount,
            source,
            target,
        } => {
            let result = match parse_amount(&amount) {
                Ok(amount) => {
                    let request = ConversionRequest::new(source, target, amount);
                    quote::run(session, request, sink).await.map(|_| ())
                }
                Err(e) => Err(e),
            };
            if let Err(e) = result {
                sink.show_error(&describe_error(&e));
            }
        }
        ShellCommand::Confirm => match session.confirm().await {
            Ok(settlement) => {
                sink.show_settlement(&settlement);
                sink.show_wallet(&session.wallet().await);
            }
            Err(e) => sink.show_error(&describe_error(&e)),
        },
        ShellCommand::Cancel => {
            if session.cancel().await.is_some() {
                println!("{}", ui::style_text("Quote dropped", ui::StyleType::Subtle));
            } else {
                sink.show_error("No pending quote");
            }
        }
        ShellCommand::Pending => match session.pending().await {
            Some(pending) => sink.show_quote(&QuoteView::from(&pending)),
            None => sink.show_error("No pending quote"),
        },
        ShellCommand::Balance => sink.show_wallet(&session.wallet().await),
        ShellCommand::Help => println!("{HELP}"),
        ShellCommand::Quit => return false,
    }
    true
}

pub async fn run(session: &Session, sink: &dyn DisplaySink) -> Result<()> {
    let term = Term::stdout();
    println!("{}", ui::style_text("walletfx session", ui::StyleType::Title));
    println!("{HELP}");
    sink.show_wallet(&session.wallet().await);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        term.write_str("\nwalletfx> ")?;
        let Some(line) = lines.next_line().await? else {
            break;
        };
        if line.trim().is_empty() {
            continue;
        }

        match ShellCommand::parse(&line) {
            Ok(command) => {
                if !execute(session, command, sink).await {
                    break;
                }
            }
            Err(e) => sink.show_error(&e.to_string()),
        }
    }
    Ok(())
}
