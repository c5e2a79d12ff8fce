//! Schedule output structures for payoff simulations

use super::strategy::Strategy;
use crate::account::DebtAccount;
use serde::{Deserialize, Serialize};

/// One account's state after one simulated month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthPoint {
    /// Calendar label, `YYYY-MM`
    pub month: String,

    /// Post-payment balance
    pub balance: f64,

    /// Dollars applied to principal
    pub principal: f64,

    /// Interest accrued this month
    pub interest: f64,

    /// Minimum portion actually applied (a closing month may draw less than
    /// the scheduled minimum)
    pub payment: f64,

    /// Extra portion received from the pooled budget this month
    pub extra_payment: f64,
}

/// One account's full schedule under one strategy
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountTimeline {
    pub account_id: String,
    pub name: String,
    pub schedule: Vec<MonthPoint>,

    /// Months until the balance reaches zero; `max_months` when unresolved
    pub months_to_payoff: u32,

    /// None when the balance never reaches zero within the horizon
    pub payoff_date: Option<String>,

    pub total_interest_paid: f64,
    pub total_paid: f64,
}

impl AccountTimeline {
    /// Zero-value timeline for an account that enters the run already paid off
    pub fn already_settled(account: &DebtAccount) -> Self {
        Self {
            account_id: account.id.clone(),
            name: account.name.clone(),
            schedule: Vec::new(),
            months_to_payoff: 0,
            payoff_date: None,
            total_interest_paid: 0.0,
            total_paid: 0.0,
        }
    }
}

/// One month's totals across all accounts in a strategy run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregatePoint {
    pub month: String,
    pub total_balance: f64,

    /// Total dollars out this month, minimums and extra together
    pub total_payment: f64,

    pub total_interest: f64,
    pub total_principal: f64,
}

/// Full outcome of one strategy run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategyResult {
    pub strategy: Strategy,

    /// Month the last tracked balance reaches zero; None when the horizon
    /// was exhausted first
    pub debt_free_date: Option<String>,

    pub total_interest_paid: f64,
    pub total_paid: f64,
    pub timelines: Vec<AccountTimeline>,
    pub aggregate_schedule: Vec<AggregatePoint>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_field_names_match_api_contract() {
        let point = MonthPoint {
            month: "2026-08".to_string(),
            balance: 870.0,
            principal: 130.0,
            interest: 20.0,
            payment: 50.0,
            extra_payment: 100.0,
        };
        let json = serde_json::to_value(&point).unwrap();
        assert_eq!(json["extraPayment"], 100.0);
        assert_eq!(json["month"], "2026-08");

        let result = StrategyResult {
            strategy: Strategy::Avalanche,
            debt_free_date: None,
            total_interest_paid: 0.0,
            total_paid: 0.0,
            timelines: vec![],
            aggregate_schedule: vec![],
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["strategy"], "avalanche");
        assert!(json["debtFreeDate"].is_null());
    }
}
