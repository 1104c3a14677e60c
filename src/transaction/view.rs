//! HTML rendering for the transactions page.

use maud::{Markup, html};
use rust_decimal::Decimal;
use time::{Date, format_description::BorrowedFormatItem, macros::format_description};
use unicode_segmentation::UnicodeSegmentation;

use crate::{
    alert::Alert,
    category::{UNCATEGORIZED_COLOR, UNCATEGORIZED_ICON},
    endpoints,
    html::{BUTTON_DELETE_STYLE, CARD_STYLE, FORM_TEXT_INPUT_STYLE, LINK_STYLE,
        PAGE_CONTAINER_STYLE, base, format_currency},
    navigation::NavBar,
};

use super::{
    core::TransactionKind,
    query::TransactionRow,
    range::RangeSelector,
    summary::TransactionSummary,
};

/// The max number of graphemes to display for a transaction title before
/// truncating and displaying an ellipsis.
const MAX_TITLE_GRAPHEMES: usize = 32;

/// Everything the transactions page needs to render.
pub(crate) struct TransactionsViewModel {
    /// The active range preset.
    pub selector: RangeSelector,
    /// The start bound shown in the custom range form.
    pub custom_start: Option<Date>,
    /// The end bound shown in the custom range form.
    pub custom_end: Option<Date>,
    /// The active search query.
    pub query: String,
    /// The filtered, sorted transactions.
    pub visible: Vec<TransactionRow>,
    /// The totals over `visible`.
    pub summary: TransactionSummary,
    /// An error banner, e.g. for an invalid custom range on a full page load.
    pub alert: Option<Alert>,
}

/// Render the full transactions page.
pub(crate) fn transactions_view(model: &TransactionsViewModel) -> Markup {
    let nav_bar = NavBar::new(endpoints::TRANSACTIONS_VIEW).into_html();

    let content = html! {
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE) {
            div class="w-full max-w-md" {
                div class="flex items-center justify-between mb-6" {
                    h1 class="text-xl font-bold" { "Transactions" }
                    a
                        href=(endpoints::NEW_TRANSACTION_VIEW)
                        class="px-3 py-2 rounded-lg bg-blue-500 hover:bg-blue-600 text-white text-sm"
                    { "Add Transaction" }
                }

                (search_bar(model))
                (range_filter(model))
                (transactions_content(model))
            }
        }
    };

    base("Transactions", &[], &content)
}

/// Render the swappable content region: alert, summary cards, and the list.
pub(crate) fn transactions_content(model: &TransactionsViewModel) -> Markup {
    html! {
        div id="transactions-content" class="w-full" {
            @if let Some(alert) = &model.alert {
                (alert.clone().into_html())
            }

            (summary_cards(&model.summary))
            (transaction_list(model))
        }
    }
}

fn search_bar(model: &TransactionsViewModel) -> Markup {
    html! {
        form class="mb-4" method="get" action=(endpoints::TRANSACTIONS_VIEW) {
            input type="hidden" name="range" value=(model.selector.as_query_value());
            @if let Some(start) = model.custom_start {
                input type="hidden" name="start" value=(start);
            }
            @if let Some(end) = model.custom_end {
                input type="hidden" name="end" value=(end);
            }
            input
                type="search"
                name="q"
                value=(model.query)
                placeholder="Search transactions..."
                class=(FORM_TEXT_INPUT_STYLE);
        }
    }
}

fn range_filter(model: &TransactionsViewModel) -> Markup {
    const PRESETS: [RangeSelector; 5] = [
        RangeSelector::All,
        RangeSelector::Today,
        RangeSelector::Week,
        RangeSelector::Month,
        RangeSelector::Year,
    ];

    html! {
        div class="mb-6" {
            div class="flex flex-wrap gap-2 mb-3" {
                @for preset in PRESETS {
                    @let is_active = model.selector == preset;
                    @let style = if is_active {
                        "px-3 py-1.5 rounded text-sm bg-blue-100 text-blue-700 \
                        dark:bg-blue-900 dark:text-blue-300"
                    } else {
                        "px-3 py-1.5 rounded text-sm text-gray-700 hover:bg-gray-100 \
                        dark:text-gray-300 dark:hover:bg-gray-700"
                    };
                    a href=(preset_href(preset, &model.query)) class=(style) {
                        (preset.label())
                    }
                }
            }

            // Swaps the content region only on success; an invalid range comes
            // back as a 400 alert and the applied range stays untouched.
            form
                class="flex flex-wrap items-end gap-2"
                hx-get=(endpoints::TRANSACTIONS_VIEW)
                hx-target="#transactions-content"
                hx-swap="outerHTML"
                hx-ext="response-targets"
                "hx-target-4*"="#alert-region"
            {
                input type="hidden" name="range" value="custom";
                input type="hidden" name="q" value=(model.query);
                div {
                    label class="block text-xs mb-1 text-gray-500" { "Start date" }
                    input
                        type="date"
                        name="start"
                        value=[model.custom_start]
                        class=(FORM_TEXT_INPUT_STYLE);
                }
                div {
                    label class="block text-xs mb-1 text-gray-500" { "End date" }
                    input
                        type="date"
                        name="end"
                        value=[model.custom_end]
                        class=(FORM_TEXT_INPUT_STYLE);
                }
                button
                    type="submit"
                    class="px-3 py-2.5 rounded bg-orange-500 hover:bg-orange-600 text-white text-sm"
                { "Apply Custom Range" }
            }
        }
    }
}

fn preset_href(preset: RangeSelector, query: &str) -> String {
    let mut href = format!(
        "{}?range={}",
        endpoints::TRANSACTIONS_VIEW,
        preset.as_query_value()
    );

    if !query.is_empty() {
        match serde_urlencoded::to_string([("q", query)]) {
            Ok(encoded) => {
                href.push('&');
                href.push_str(&encoded);
            }
            Err(error) => tracing::error!("Could not encode search query: {error}"),
        }
    }

    href
}

fn summary_cards(summary: &TransactionSummary) -> Markup {
    let savings_style = if summary.net_savings >= Decimal::ZERO {
        ("text-blue-600 dark:text-blue-400", "You're saving well!")
    } else {
        (
            "text-orange-600 dark:text-orange-400",
            "You're spending more than earning",
        )
    };

    html! {
        div class="grid grid-cols-2 gap-4 mb-4" {
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
        }

        div class=(CARD_STYLE) {
            div class={ "text-sm font-medium mb-1 " (savings_style.0) } { "Net Savings" }
            div class={ "text-xl font-bold " (savings_style.0) }
            { (format_currency(summary.net_savings)) }
            div class="text-xs mt-1 text-gray-500" { (savings_style.1) }
        }
    }
}

fn transaction_list(model: &TransactionsViewModel) -> Markup {
    html! {
        div class="mt-6" {
            h2 class="text-lg font-bold mb-4" {
                (model.summary.count)
                @if model.summary.count == 1 { " Transaction" } @else { " Transactions" }
                @if !model.query.is_empty() {
                    " matching \"" (model.query) "\""
                }
            }

            @if model.visible.is_empty() {
                div class="text-center py-8 text-gray-500" {
                    div class="text-lg font-medium mb-2" {
                        @if model.query.is_empty() { "No transactions found" }
                        @else { "No matching transactions" }
                    }
                    div class="text-sm" {
                        @if model.query.is_empty() {
                            "Try adjusting your date range or add a new transaction"
                        } @else {
                            "Try adjusting your search terms or date range"
                        }
                    }
                }
            } @else {
                ul class="space-y-3" {
                    @for row in &model.visible {
                        (transaction_list_item(row))
                    }
                }
            }
        }
    }
}

pub(crate) fn transaction_list_item(row: &TransactionRow) -> Markup {
    let badge_color = row
        .category_color
        .as_deref()
        .unwrap_or(UNCATEGORIZED_COLOR);
    let badge_icon = row.category_icon.as_deref().unwrap_or(UNCATEGORIZED_ICON);
    let edit_url = endpoints::format_endpoint(endpoints::EDIT_TRANSACTION_VIEW, row.id);
    let delete_url = endpoints::format_endpoint(endpoints::TRANSACTION, row.id);

    html! {
        li
            id={ "transaction-" (row.id) }
            class="flex items-center gap-3 p-3 rounded-lg hover:bg-gray-50 \
            dark:hover:bg-gray-800"
        {
            span class={ "w-10 h-10 rounded-lg flex items-center justify-center text-white " (badge_color) }
            { (badge_icon) }

            div class="flex-1" {
                div class="font-medium" { (truncate_title(&row.title)) }
                div class="text-sm text-gray-500" { (format_long_date(row.date_time.date())) }
            }

            (signed_amount(row))

            div class="flex items-center gap-1" {
                a href=(edit_url) class=(LINK_STYLE) { "Edit" }
                button
                    class=(BUTTON_DELETE_STYLE)
                    hx-delete=(delete_url)
                    hx-target={ "#transaction-" (row.id) }
                    hx-swap="outerHTML"
                    hx-confirm={ "Delete \"" (row.title) "\"? This action cannot be undone." }
                    hx-ext="response-targets"
                    "hx-target-4*"="#alert-region"
                { "Delete" }
            }
        }
    }
}

fn signed_amount(row: &TransactionRow) -> Markup {
    match row.kind {
        TransactionKind::Expense => html! {
            span class="font-medium text-red-500" { "- " (format_currency(row.amount)) }
        },
        TransactionKind::Income => html! {
            span class="font-medium text-green-500" { "+ " (format_currency(row.amount)) }
        },
    }
}

fn truncate_title(title: &str) -> String {
    let graphemes: Vec<&str> = title.graphemes(true).collect();

    if graphemes.len() <= MAX_TITLE_GRAPHEMES {
        title.to_owned()
    } else {
        format!("{}…", graphemes[..MAX_TITLE_GRAPHEMES].concat())
    }
}

const LONG_DATE_FORMAT: &[BorrowedFormatItem] =
    format_description!("[month repr:long] [day padding:none], [year]");

/// Format a date the way the transaction list displays it, e.g. "January 15, 2024".
pub(crate) fn format_long_date(date: Date) -> String {
    date.format(LONG_DATE_FORMAT)
        .expect("invalid long date format")
}

#[cfg(test)]
mod view_tests {
    use time::macros::date;

    use super::{format_long_date, truncate_title};

    #[test]
    fn formats_long_date() {
        assert_eq!(format_long_date(date!(2024 - 01 - 15)), "January 15, 2024");
    }

    #[test]
    fn short_titles_are_untouched() {
        assert_eq!(truncate_title("Coffee"), "Coffee");
    }

    #[test]
    fn long_titles_are_truncated_with_ellipsis() {
        let title = "a".repeat(40);

        let truncated = truncate_title(&title);

        assert_eq!(truncated, format!("{}…", "a".repeat(32)));
    }

    #[test]
    fn truncation_respects_grapheme_boundaries() {
        // 33 family emoji; each is many code points but one grapheme.
        let title = "👨‍👩‍👧‍👦".repeat(33);

        let truncated = truncate_title(&title);

        assert_eq!(truncated, format!("{}…", "👨‍👩‍👧‍👦".repeat(32)));
    }
}
