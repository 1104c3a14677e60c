//! The shared form markup and form data for creating and editing accounts.

use maud::{Markup, html};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::{
    Error,
    html::{BUTTON_PRIMARY_STYLE, FORM_LABEL_STYLE, FORM_SELECT_STYLE, FORM_TEXT_INPUT_STYLE},
};

use super::core::{AccountKind, NewAccount};

/// The form data for creating or editing an account.
#[derive(Debug, Deserialize)]
pub struct AccountForm {
    /// The name of the account.
    pub name: String,
    /// The kind of account.
    pub kind: AccountKind,
    /// The balance as typed into the form. May be negative.
    pub balance: String,
    /// An optional display string, e.g. the last digits of the account number.
    #[serde(default)]
    pub account_number: Option<String>,
}

impl AccountForm {
    /// Validate the raw form fields.
    ///
    /// # Errors
    /// Returns [Error::InvalidAmount] when the balance does not parse.
    /// Negative balances are allowed; they represent amounts owed.
    pub fn into_new_account(self) -> Result<NewAccount, Error> {
        let balance: Decimal = self
            .balance
            .trim()
            .parse()
            .map_err(|_| Error::InvalidAmount(self.balance.clone()))?;

        let account_number = self
            .account_number
            .map(|number| number.trim().to_owned())
            .filter(|number| !number.is_empty());

        Ok(NewAccount {
            name: self.name.trim().to_owned(),
            kind: self.kind,
            balance,
            account_number,
        })
    }
}

/// The values pre-filled into the account form.
pub(crate) struct AccountFormValues {
    pub name: String,
    pub kind: AccountKind,
    pub balance: String,
    pub account_number: Option<String>,
}

/// Render the account form.
///
/// `method_attrs` decides whether submitting creates or edits: pass
/// `("hx-post", url)` or `("hx-put", url)`.
pub(crate) fn account_form(
    method_attrs: (&str, &str),
    values: &AccountFormValues,
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
                label for="name" class=(FORM_LABEL_STYLE) { "Name" }
                input
                    type="text"
                    name="name"
                    id="name"
                    value=(values.name)
                    required
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div {
                label for="kind" class=(FORM_LABEL_STYLE) { "Type" }
                select name="kind" id="kind" class=(FORM_SELECT_STYLE) {
                    @for kind in AccountKind::ALL {
                        option value=(kind.as_str()) selected[values.kind == kind] {
                            (kind.label())
                        }
                    }
                }
            }

            div {
                label for="balance" class=(FORM_LABEL_STYLE) { "Balance" }
                input
                    type="number"
                    name="balance"
                    id="balance"
                    value=(values.balance)
                    step="0.01"
                    required
                    class=(FORM_TEXT_INPUT_STYLE);
                p class="mt-1 text-xs text-gray-500" {
                    "Use a negative balance for money owed, e.g. a credit card."
                }
            }

            div {
                label for="account_number" class=(FORM_LABEL_STYLE) {
                    "Account number (optional)"
                }
                input
                    type="text"
                    name="account_number"
                    id="account_number"
                    value=[values.account_number.as_deref()]
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            button type="submit" class=(BUTTON_PRIMARY_STYLE) { (submit_label) }
        }
    }
}
