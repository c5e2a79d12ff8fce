//! Account data structures matching the account-store record format

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A raw account row as the external account store hands it over.
///
/// Classification of "is this a debt" and "is this a mortgage" is owned by
/// the store; the engine only reads the flags.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountRecord {
    /// Unique account identifier
    pub id: String,

    /// Display label
    pub name: String,

    /// Current balance magnitude (liabilities are stored non-negative)
    pub current_balance: f64,

    /// Annual percentage rate, e.g. 19.99 meaning 19.99%/yr
    pub interest_rate: f64,

    /// Required payment in dollars per month
    pub minimum_payment: f64,

    /// Whether the store classifies this account as a liability
    pub is_debt: bool,

    /// Whether the store classifies this liability as a mortgage
    pub is_mortgage: bool,
}

/// One liability under consideration by the planning engine
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DebtAccount {
    /// Unique account identifier (opaque to the engine)
    pub id: String,

    /// Display label
    pub name: String,

    /// Current balance, non-negative. A zero balance means the debt is
    /// already paid off: excluded from simulation, reported with zero values.
    pub current_balance: f64,

    /// Annual percentage rate, e.g. 19.99 meaning 19.99%/yr
    pub interest_rate: f64,

    /// Required payment in dollars per month
    pub minimum_payment: f64,

    /// Callers may exclude mortgages from a plan
    pub is_mortgage: bool,
}

impl DebtAccount {
    /// Whether the account still carries a balance to simulate
    pub fn is_open(&self) -> bool {
        self.current_balance > 0.0
    }
}

/// A historical balance point from the balance history store
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceSnapshot {
    /// Date the balance was recorded
    pub date: NaiveDate,

    /// Balance magnitude on that date
    pub balance: f64,
}

/// Project account-store records into the engine's input shape.
///
/// Pure filter: keeps debt accounts, drops mortgages unless
/// `include_mortgages`. Record order is preserved.
pub fn list_debt_accounts(records: &[AccountRecord], include_mortgages: bool) -> Vec<DebtAccount> {
    records
        .iter()
        .filter(|r| r.is_debt && (include_mortgages || !r.is_mortgage))
        .map(|r| DebtAccount {
            id: r.id.clone(),
            name: r.name.clone(),
            current_balance: r.current_balance,
            interest_rate: r.interest_rate,
            minimum_payment: r.minimum_payment,
            is_mortgage: r.is_mortgage,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, is_debt: bool, is_mortgage: bool) -> AccountRecord {
        AccountRecord {
            id: id.to_string(),
            name: format!("Account {}", id),
            current_balance: 1000.0,
            interest_rate: 19.99,
            minimum_payment: 35.0,
            is_debt,
            is_mortgage,
        }
    }

    #[test]
    fn test_list_filters_non_debt() {
        let records = vec![record("a", true, false), record("b", false, false)];
        let debts = list_debt_accounts(&records, false);
        assert_eq!(debts.len(), 1);
        assert_eq!(debts[0].id, "a");
    }

    #[test]
    fn test_list_mortgage_toggle() {
        let records = vec![record("card", true, false), record("house", true, true)];

        let without = list_debt_accounts(&records, false);
        assert_eq!(without.len(), 1);
        assert_eq!(without[0].id, "card");

        let with = list_debt_accounts(&records, true);
        assert_eq!(with.len(), 2);
        assert!(with[1].is_mortgage);
    }

    #[test]
    fn test_list_preserves_order() {
        let records = vec![record("z", true, false), record("a", true, false)];
        let debts = list_debt_accounts(&records, false);
        assert_eq!(debts[0].id, "z");
        assert_eq!(debts[1].id, "a");
    }
}
