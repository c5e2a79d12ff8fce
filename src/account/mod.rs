//! Account input shapes and store-export loaders

mod data;
mod loader;

pub use data::{list_debt_accounts, AccountRecord, BalanceSnapshot, DebtAccount};
pub use loader::{
    load_account_records, load_balance_history, read_account_records, read_balance_history,
    LoadError,
};
