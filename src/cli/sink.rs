use super::ui;
use crate::core::{ConversionError, Currency, DisplaySink, QuoteView, RateError, Settlement, Wallet};
use comfy_table::Cell;

/// Renders session results to the terminal.
#[derive(Default)]
pub struct TerminalSink;

impl TerminalSink {
    fn transfer_lines(
        source: Currency,
        source_amount: f64,
        target: Currency,
        target_amount: f64,
        give_label: &str,
        get_label: &str,
    ) -> String {
        format!(
            "{}\n  {} ({})\n\n{}\n  {} ({})",
            ui::style_text(give_label, ui::StyleType::Label),
            ui::format_amount(source, source_amount),
            source.name(),
            ui::style_text(get_label, ui::StyleType::Label),
            ui::format_amount(target, target_amount),
            target.name(),
        )
    }
}

impl DisplaySink for TerminalSink {
    fn show_quote(&self, quote: &QuoteView) {
        println!(
            "\n{}\n",
            ui::style_text("Quote", ui::StyleType::Title)
        );
        println!(
            "{}",
            Self::transfer_lines(
                quote.source,
                quote.source_amount,
                quote.target,
                quote.target_amount,
                "You convert:",
                "You receive:",
            )
        );
        println!(
            "\nRate: {}",
            ui::style_text(&ui::format_rate(quote.rate), ui::StyleType::Quote)
        );
    }

    fn show_settlement(&self, settlement: &Settlement) {
        println!(
            "\n{}\n",
            ui::style_text("Conversion confirmed", ui::StyleType::Success)
        );
        println!(
            "{}",
            Self::transfer_lines(
                settlement.source,
                settlement.source_amount,
                settlement.target,
                settlement.target_amount,
                "Converted:",
                "Received:",
            )
        );
    }

    fn show_wallet(&self, wallet: &Wallet) {
        let mut table = ui::new_styled_table();
        table.set_header(vec![ui::header_cell("Currency"), ui::header_cell("Balance")]);
        for currency in Currency::ALL {
            table.add_row(vec![
                Cell::new(format!("{} ({})", currency.name(), currency.code())),
                ui::amount_cell(currency, wallet.balance(currency)),
            ]);
        }
        println!(
            "\n{}\n{}",
            ui::style_text("Wallet", ui::StyleType::Title),
            table
        );
    }

    fn show_error(&self, message: &str) {
        eprintln!("{}", ui::style_text(message, ui::StyleType::Error));
    }
}

/// User-facing wording for a failed session operation.
pub fn describe_error(error: &ConversionError) -> String {
    match error {
        ConversionError::InvalidAmount(_) => "Enter a positive amount to convert".to_string(),
        ConversionError::Rate(RateError::SameCurrencySelected) => {
            "Select two different currencies".to_string()
        }
        ConversionError::Rate(RateError::QuoteUnavailable { pair, .. }) => {
            format!("Could not get a quote for {pair}. Try again.")
        }
        ConversionError::Settlement(_) => "Insufficient balance in the source currency".to_string(),
        ConversionError::NoPendingQuote => "Request a quote first".to_string(),
    }
}
