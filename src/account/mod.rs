//! Account management: named money-holding entities with signed balances.

mod accounts_page;
mod core;
mod create_endpoint;
mod delete_endpoint;
mod edit_account_page;
mod edit_endpoint;
mod form;
mod new_account_page;

pub use accounts_page::get_accounts_page;
pub use core::{
    Account, AccountId, AccountKind, NewAccount, create_account, create_account_table,
    delete_account, get_account, list_accounts, total_balance, update_account,
};
pub use create_endpoint::create_account_endpoint;
pub use delete_endpoint::delete_account_endpoint;
pub use edit_account_page::get_edit_account_page;
pub use edit_endpoint::update_account_endpoint;
pub use new_account_page::get_new_account_page;
