use super::ui;
use crate::core::{ConversionError, ConversionRequest, DisplaySink, PendingConversion, QuoteView, Session};

/// Requests a quote for `request` and shows it. The quote stays pending in the
/// session until confirmed, cancelled or replaced.
pub async fn run(
    session: &Session,
    request: ConversionRequest,
    sink: &dyn DisplaySink,
) -> Result<PendingConversion, ConversionError> {
    let pb = ui::new_spinner("Fetching quote...");
    let result = session.request_quote(request).await;
    pb.finish_and_clear();

    let pending = result?;
    sink.show_quote(&QuoteView::from(&pending));
    Ok(pending)
}
