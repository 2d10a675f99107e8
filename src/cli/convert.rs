use super::{quote, ui};
use crate::core::{ConversionRequest, DisplaySink, Session, Settlement};
use anyhow::Result;
use console::Term;
use tracing::debug;

/// Quotes `request`, asks for confirmation unless `assume_yes`, then settles.
///
/// Returns `None` when the user declines.
pub async fn run(
    session: &Session,
    request: ConversionRequest,
    assume_yes: bool,
    sink: &dyn DisplaySink,
) -> Result<Option<Settlement>> {
    quote::run(session, request, sink).await?;

    if !assume_yes && !prompt_confirm()? {
        session.cancel().await;
        debug!("Conversion declined");
        println!("{}", ui::style_text("Conversion cancelled", ui::StyleType::Subtle));
        return Ok(None);
    }

    let settlement = session.confirm().await?;
    sink.show_settlement(&settlement);
    sink.show_wallet(&session.wallet().await);
    Ok(Some(settlement))
}

fn prompt_confirm() -> Result<bool> {
    let term = Term::stdout();
    term.write_str("\nConfirm conversion? [y/N] ")?;
    let answer = term.read_line()?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}
