//! The shared form markup and form data for creating and editing transactions.

use maud::{Markup, html};
use serde::Deserialize;

use crate::{
    Error,
    category::{Category, CategoryId, UNCATEGORIZED_LABEL},
    html::{BUTTON_PRIMARY_STYLE, FORM_LABEL_STYLE, FORM_SELECT_STYLE, FORM_TEXT_INPUT_STYLE},
};

use super::core::{
    NewTransaction, TransactionKind, parse_form_amount, parse_form_date_time,
};

/// The form data for creating or editing a transaction.
///
/// The amount and date-time arrive as raw strings and are validated by
/// [TransactionForm::into_new_transaction].
#[derive(Debug, Deserialize)]
pub struct TransactionForm {
    /// A short text describing what the transaction was for.
    pub title: String,
    /// The amount as typed into the form.
    pub amount: String,
    /// Whether the transaction is an expense or income.
    pub kind: TransactionKind,
    /// The value of the `datetime-local` input.
    pub date_time: String,
    /// The selected category, if any.
    #[serde(default)]
    pub category_id: Option<CategoryId>,
}

impl TransactionForm {
    /// Validate the raw form fields.
    ///
    /// # Errors
    /// Returns [Error::InvalidAmount], [Error::NegativeAmount], or
    /// [Error::InvalidDateFormat] when a field does not parse.
    pub fn into_new_transaction(self) -> Result<NewTransaction, Error> {
        Ok(NewTransaction {
            title: self.title.trim().to_owned(),
            amount: parse_form_amount(&self.amount)?,
            kind: self.kind,
            date_time: parse_form_date_time(&self.date_time)?,
            category_id: self.category_id,
        })
    }
}

/// The values pre-filled into the transaction form.
pub(crate) struct TransactionFormValues {
    pub title: String,
    pub amount: String,
    pub kind: TransactionKind,
    /// In `datetime-local` format, e.g. "2024-01-15T08:30".
    pub date_time: String,
    pub category_id: Option<CategoryId>,
}

/// Render the transaction form.
///
/// `method_attrs` decides whether submitting creates or edits: pass
/// `("hx-post", url)` or `("hx-put", url)`.
pub(crate) fn transaction_form(
    method_attrs: (&str, &str),
    values: &TransactionFormValues,
    categories: &[Category],
    submit_label: &str,
) -> Markup {
    let (method, url) = method_attrs;

    html! {
        form
            class="w-full space-y-4"
            hx-ext="response-targets"
            "hx-target-4*"="#alert-region"
            hx-post=[(method == "hx-post").then_some(url)]
            hx-put=[(method == "hx-put").then_some(url)]
        {
            div {
                label for="title" class=(FORM_LABEL_STYLE) { "Title" }
                input
                    type="text"
                    name="title"
                    id="title"
                    value=(values.title)
                    required
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div {
                label for="amount" class=(FORM_LABEL_STYLE) { "Amount" }
                input
                    type="number"
                    name="amount"
                    id="amount"
                    value=(values.amount)
                    min="0"
                    step="0.01"
                    required
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div {
                span class=(FORM_LABEL_STYLE) { "Type" }
                div class="flex gap-4" {
                    @for kind in [TransactionKind::Expense, TransactionKind::Income] {
                        label class="flex items-center gap-2 text-sm" {
                            input
                                type="radio"
                                name="kind"
                                value=(kind.as_str())
                                checked[values.kind == kind];
                            (kind.label())
                        }
                    }
                }
            }

            div {
                label for="date_time" class=(FORM_LABEL_STYLE) { "Date" }
                input
                    type="datetime-local"
                    name="date_time"
                    id="date_time"
                    value=(values.date_time)
                    required
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div {
                label for="category_id" class=(FORM_LABEL_STYLE) { "Category" }
                select name="category_id" id="category_id" class=(FORM_SELECT_STYLE) {
                    option value="" selected[values.category_id.is_none()] {
                        (UNCATEGORIZED_LABEL)
                    }
                    @for category in categories {
                        option
                            value=(category.id)
                            selected[values.category_id == Some(category.id)]
                        {
                            (category.icon) " " (category.name) " (" (category.kind.label()) ")"
                        }
                    }
                }
            }

            button type="submit" class=(BUTTON_PRIMARY_STYLE) { (submit_label) }
        }
    }
}
