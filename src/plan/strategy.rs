//! Repayment strategies and deterministic payoff ordering

use crate::account::DebtAccount;
use crate::error::PlanError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::str::FromStr;

/// Repayment strategy for a simulation run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Highest interest rate first; minimizes total interest paid
    Avalanche,
    /// Smallest balance first; maximizes early wins
    Snowball,
    /// Caller-supplied priority order
    Custom,
}

impl Strategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Avalanche => "avalanche",
            Strategy::Snowball => "snowball",
            Strategy::Custom => "custom",
        }
    }
}

impl FromStr for Strategy {
    type Err = PlanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "avalanche" => Ok(Strategy::Avalanche),
            "snowball" => Ok(Strategy::Snowball),
            "custom" => Ok(Strategy::Custom),
            other => Err(PlanError::InvalidStrategy { name: other.to_string() }),
        }
    }
}

/// Produce the payoff priority order for the working set.
///
/// The order is a deterministic total ordering: rate and balance ties break
/// by id so map iteration order can never leak into the output. A custom
/// order is used verbatim, with any working-set accounts it omits appended in
/// id-ascending order — a caller omission must never silently drop an account
/// from simulation.
pub fn payoff_order(
    accounts: &[DebtAccount],
    strategy: Strategy,
    custom_order: Option<&[String]>,
) -> Result<Vec<String>, PlanError> {
    match strategy {
        Strategy::Avalanche => {
            let mut sorted: Vec<&DebtAccount> = accounts.iter().collect();
            sorted.sort_by(|a, b| {
                b.interest_rate
                    .total_cmp(&a.interest_rate)
                    .then(b.current_balance.total_cmp(&a.current_balance))
                    .then_with(|| a.id.cmp(&b.id))
            });
            Ok(sorted.into_iter().map(|a| a.id.clone()).collect())
        }
        Strategy::Snowball => {
            let mut sorted: Vec<&DebtAccount> = accounts.iter().collect();
            sorted.sort_by(|a, b| {
                a.current_balance
                    .total_cmp(&b.current_balance)
                    .then(b.interest_rate.total_cmp(&a.interest_rate))
                    .then_with(|| a.id.cmp(&b.id))
            });
            Ok(sorted.into_iter().map(|a| a.id.clone()).collect())
        }
        Strategy::Custom => {
            let custom = custom_order.ok_or_else(|| PlanError::InvalidCustomOrder {
                reason: "custom strategy requested without a custom order".to_string(),
            })?;

            let known: HashSet<&str> = accounts.iter().map(|a| a.id.as_str()).collect();
            let mut order = Vec::with_capacity(accounts.len());
            let mut seen = HashSet::new();
            for id in custom {
                if !known.contains(id.as_str()) {
                    return Err(PlanError::InvalidCustomOrder {
                        reason: format!("unknown account id: {}", id),
                    });
                }
                if seen.insert(id.as_str()) {
                    order.push(id.clone());
                }
            }

            // Accounts the caller omitted go to the back, id ascending
            let mut missing: Vec<&str> = accounts
                .iter()
                .map(|a| a.id.as_str())
                .filter(|id| !seen.contains(id))
                .collect();
            missing.sort_unstable();
            order.extend(missing.into_iter().map(String::from));

            Ok(order)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(id: &str, balance: f64, rate: f64) -> DebtAccount {
        DebtAccount {
            id: id.to_string(),
            name: id.to_uppercase(),
            current_balance: balance,
            interest_rate: rate,
            minimum_payment: 25.0,
            is_mortgage: false,
        }
    }

    #[test]
    fn test_strategy_parse() {
        assert_eq!("avalanche".parse::<Strategy>().unwrap(), Strategy::Avalanche);
        assert_eq!("snowball".parse::<Strategy>().unwrap(), Strategy::Snowball);
        assert_eq!("custom".parse::<Strategy>().unwrap(), Strategy::Custom);

        let err = "cascade".parse::<Strategy>().unwrap_err();
        assert_eq!(err, PlanError::InvalidStrategy { name: "cascade".to_string() });
    }

    #[test]
    fn test_avalanche_rate_descending() {
        let accounts = vec![
            account("a", 500.0, 10.0),
            account("b", 1000.0, 24.0),
            account("c", 2000.0, 18.0),
        ];
        let order = payoff_order(&accounts, Strategy::Avalanche, None).unwrap();
        assert_eq!(order, vec!["b", "c", "a"]);
    }

    #[test]
    fn test_avalanche_tie_breaks() {
        // Same rate: larger balance first; same balance too: id ascending
        let accounts = vec![
            account("b", 500.0, 20.0),
            account("a", 500.0, 20.0),
            account("c", 900.0, 20.0),
        ];
        let order = payoff_order(&accounts, Strategy::Avalanche, None).unwrap();
        assert_eq!(order, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_snowball_balance_ascending() {
        let accounts = vec![
            account("a", 1000.0, 24.0),
            account("b", 500.0, 10.0),
        ];
        let order = payoff_order(&accounts, Strategy::Snowball, None).unwrap();
        assert_eq!(order, vec!["b", "a"]);
    }

    #[test]
    fn test_snowball_tie_breaks_rate_then_id() {
        let accounts = vec![
            account("b", 500.0, 10.0),
            account("a", 500.0, 10.0),
            account("c", 500.0, 22.0),
        ];
        let order = payoff_order(&accounts, Strategy::Snowball, None).unwrap();
        assert_eq!(order, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_custom_appends_omitted_accounts() {
        let accounts = vec![
            account("a", 100.0, 5.0),
            account("b", 200.0, 5.0),
            account("c", 300.0, 5.0),
        ];
        let custom = vec!["c".to_string()];
        let order = payoff_order(&accounts, Strategy::Custom, Some(&custom)).unwrap();
        assert_eq!(order, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_custom_unknown_id_fails() {
        let accounts = vec![account("a", 100.0, 5.0)];
        let custom = vec!["ghost".to_string()];
        let err = payoff_order(&accounts, Strategy::Custom, Some(&custom)).unwrap_err();
        assert!(matches!(err, PlanError::InvalidCustomOrder { .. }));
    }

    #[test]
    fn test_custom_without_order_fails() {
        let accounts = vec![account("a", 100.0, 5.0)];
        let err = payoff_order(&accounts, Strategy::Custom, None).unwrap_err();
        assert!(matches!(err, PlanError::InvalidCustomOrder { .. }));
    }
}
