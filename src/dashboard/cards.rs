//! Summary card markup for the dashboard.

use maud::{Markup, html};
use rust_decimal::Decimal;

use crate::{
    html::{CARD_STYLE, format_currency},
    transaction::TransactionSummary,
};

/// Render the four analytics cards for the selected day.
pub(super) fn summary_cards(summary: &TransactionSummary) -> Markup {
    let savings_color = if summary.net_savings >= Decimal::ZERO {
        "text-blue-600 dark:text-blue-400"
    } else {
        "text-orange-600 dark:text-orange-400"
    };

    html! {
        div class="grid grid-cols-2 gap-4 mb-6" {
            div class=(CARD_STYLE) {
                div class="text-sm font-medium text-red-600 dark:text-red-400 mb-1"
                { "Total Expenses" }
                div class="text-xl font-bold text-red-600 dark:text-red-400"
                { (format_currency(summary.total_expenses)) }
            }
            div class=(CARD_STYLE) {
                div class="text-sm font-medium text-green-600 dark:text-green-400 mb-1"
                { "Total Income" }
                div class="text-xl font-bold text-green-600 dark:text-green-400"
                { (format_currency(summary.total_income)) }
            }
            div class=(CARD_STYLE) {
                div class={ "text-sm font-medium mb-1 " (savings_color) } { "Net Savings" }
                div class={ "text-xl font-bold " (savings_color) }
                { (format_currency(summary.net_savings)) }
            }
            div class=(CARD_STYLE) {
                div class="text-sm font-medium text-gray-500 mb-1" { "Transactions" }
                div class="text-xl font-bold" { (summary.count) }
            }
        }
    }
}
