use super::format::{CurrencyFormat, format_amount_locale};
use super::layout::SUMMARY_SLOTS;
use crate::core::{EntityTotals, ReportRequest};

/// Text block with the per-entity totals for the outbound message.
///
/// Amounts use the local separators (`1.234,56`); combinations without rows
/// are reported as zero.
pub fn summary_text(totals: &EntityTotals, request: &ReportRequest) -> String {
    let mut out = String::new();
    out.push_str("Buen día,\n\n");
    out.push_str(&format!(
        "Se envía la relación de facturas del {} al {}.\n\n",
        request.start().format("%d/%m/%Y"),
        request.end().format("%d/%m/%Y"),
    ));

    for slot in SUMMARY_SLOTS {
        let amount = format_amount_locale(
            totals.get(slot.entity, slot.currency),
            CurrencyFormat::for_label(slot.currency),
        );
        out.push_str(&format!("{}: {amount}\n", slot.label));
    }

    out.push_str(&format!("\nTotal facturas: {}\n", totals.row_count()));
    out
}
