//! The shared form markup and form data for creating and editing categories.

use maud::{Markup, html};
use serde::Deserialize;

use crate::{
    Error,
    html::{BUTTON_PRIMARY_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE},
    transaction::TransactionKind,
};

use super::{
    core::NewCategory,
    palette::{CATEGORY_COLORS, CATEGORY_ICONS},
};

/// The form data for creating or editing a category.
#[derive(Debug, Deserialize)]
pub struct CategoryForm {
    /// The name of the category.
    pub name: String,
    /// Whether the category classifies expenses or income.
    pub kind: TransactionKind,
    /// The selected icon glyph.
    pub icon: String,
    /// The selected color token.
    pub color: String,
}

impl CategoryForm {
    /// Trim the name; palette membership is validated by the category queries.
    pub fn into_new_category(self) -> Result<NewCategory, Error> {
        Ok(NewCategory {
            name: self.name.trim().to_owned(),
            kind: self.kind,
            icon: self.icon,
            color: self.color,
        })
    }
}

/// The values pre-filled into the category form.
pub(crate) struct CategoryFormValues {
    pub name: String,
    pub kind: TransactionKind,
    pub icon: String,
    pub color: String,
}

/// Render the category form with its icon and color pickers.
///
/// `method_attrs` decides whether submitting creates or edits: pass
/// `("hx-post", url)` or `("hx-put", url)`.
pub(crate) fn category_form(
    method_attrs: (&str, &str),
    values: &CategoryFormValues,
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
                span class=(FORM_LABEL_STYLE) { "Icon" }
                div class="grid grid-cols-8 gap-1" {
                    @for icon in CATEGORY_ICONS {
                        label class="cursor-pointer" {
                            input
                                type="radio"
                                name="icon"
                                value=(icon)
                                checked[values.icon == *icon]
                                class="peer sr-only";
                            span
                                class="flex items-center justify-center w-9 h-9 rounded text-lg \
                                border border-transparent peer-checked:border-blue-500 \
                                peer-checked:bg-blue-50 dark:peer-checked:bg-blue-900 \
                                hover:bg-gray-100 dark:hover:bg-gray-700"
                            { (icon) }
                        }
                    }
                }
            }

            div {
                span class=(FORM_LABEL_STYLE) { "Color" }
                div class="grid grid-cols-8 gap-1" {
                    @for color in CATEGORY_COLORS {
                        label class="cursor-pointer" {
                            input
                                type="radio"
                                name="color"
                                value=(color)
                                checked[values.color == *color]
                                class="peer sr-only";
                            span
                                class={ "block w-9 h-9 rounded border-2 border-transparent \
                                peer-checked:border-gray-900 dark:peer-checked:border-white "
                                (color) }
                            {}
                        }
                    }
                }
            }

            button type="submit" class=(BUTTON_PRIMARY_STYLE) { (submit_label) }
        }
    }
}
