//! Actual-vs-planned reconciliation
//!
//! Merges stored balance history with two forward simulations per account:
//! minimum-only and minimum-plus-extra. All three series share the same
//! starting month (the most recent actual balance) so the UI can overlay
//! them as comparable step series.

use log::warn;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::account::{BalanceSnapshot, DebtAccount};
use crate::error::PlanError;
use crate::plan::{month_index, month_label, WaterfallSimulator};

/// One point of a comparison series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalancePoint {
    /// Calendar label, `YYYY-MM`
    pub month: String,
    pub balance: f64,
}

/// Comparison series for one account
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActualVsPlanned {
    pub account_id: String,
    pub name: String,

    /// Stored balances from the anchor month on, one point per month
    pub actual: Vec<BalancePoint>,

    /// Forward simulation with the request's extra payment
    pub planned: Vec<BalancePoint>,

    /// Forward simulation with no extra payment
    pub minimum_only: Vec<BalancePoint>,
}

/// Build comparison series for every working-set account with history.
///
/// Accounts with no snapshots have nothing to reconcile against and are
/// omitted. The per-account simulations are independent, so they run on the
/// rayon pool; collection preserves account order.
pub fn reconcile_accounts(
    accounts: &[DebtAccount],
    history: &HashMap<String, Vec<BalanceSnapshot>>,
    extra_payment: f64,
    max_months: u32,
) -> Result<Vec<ActualVsPlanned>, PlanError> {
    accounts
        .par_iter()
        .filter_map(|account| {
            let snapshots = history.get(&account.id)?;
            if snapshots.is_empty() {
                return None;
            }
            Some(reconcile_account(account, snapshots, extra_payment, max_months))
        })
        .collect()
}

fn reconcile_account(
    account: &DebtAccount,
    snapshots: &[BalanceSnapshot],
    extra_payment: f64,
    max_months: u32,
) -> Result<ActualVsPlanned, PlanError> {
    // Anchor at the most recent snapshot month; everything is forward-looking
    // from there
    let anchor = snapshots
        .iter()
        .map(|s| s.date)
        .max()
        .unwrap_or_default();
    let anchor_index = month_index(anchor);

    // Latest balance per month, anchor month onward
    let mut by_month: HashMap<i32, &BalanceSnapshot> = HashMap::new();
    for snapshot in snapshots {
        let index = month_index(snapshot.date);
        if index < anchor_index {
            continue;
        }
        let keep = match by_month.get(&index) {
            Some(existing) => snapshot.date >= existing.date,
            None => true,
        };
        if keep {
            by_month.insert(index, snapshot);
        }
    }
    let mut months: Vec<i32> = by_month.keys().copied().collect();
    months.sort_unstable();
    let actual: Vec<BalancePoint> = months
        .into_iter()
        .map(|index| BalancePoint {
            month: month_label(anchor, (index - anchor_index) as u32),
            balance: by_month[&index].balance,
        })
        .collect();

    let planned = simulate_series(account, anchor, extra_payment, max_months)?;
    let minimum_only = simulate_series(account, anchor, 0.0, max_months)?;

    Ok(ActualVsPlanned {
        account_id: account.id.clone(),
        name: account.name.clone(),
        actual,
        planned,
        minimum_only,
    })
}

/// Single-account waterfall run projected onto a balance series, with a
/// leading point at the anchor carrying the current balance
fn simulate_series(
    account: &DebtAccount,
    anchor: chrono::NaiveDate,
    extra_payment: f64,
    max_months: u32,
) -> Result<Vec<BalancePoint>, PlanError> {
    let simulator = WaterfallSimulator::new(anchor, max_months);
    let order = vec![account.id.clone()];
    let outcome =
        simulator.simulate(std::slice::from_ref(account), &order, extra_payment)?;

    let mut series = vec![BalancePoint {
        month: month_label(anchor, 0),
        balance: account.current_balance,
    }];
    if let Some(timeline) = outcome.timelines.first() {
        if timeline.payoff_date.is_none() && !timeline.schedule.is_empty() {
            warn!(
                "account {} does not pay off within {} months at ${:.2}/mo extra",
                account.id, max_months, extra_payment
            );
        }
        series.extend(timeline.schedule.iter().map(|point| BalancePoint {
            month: point.month.clone(),
            balance: point.balance,
        }));
    }
    Ok(series)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn account(id: &str, balance: f64) -> DebtAccount {
        DebtAccount {
            id: id.to_string(),
            name: id.to_uppercase(),
            current_balance: balance,
            interest_rate: 12.0,
            minimum_payment: 50.0,
            is_mortgage: false,
        }
    }

    fn history_for(
        id: &str,
        snapshots: Vec<BalanceSnapshot>,
    ) -> HashMap<String, Vec<BalanceSnapshot>> {
        HashMap::from([(id.to_string(), snapshots)])
    }

    #[test]
    fn test_series_share_first_month_label() {
        // Oldest snapshot predates the anchor by years; all three series
        // must still start at the most recent snapshot month
        let history = history_for(
            "card",
            vec![
                BalanceSnapshot { date: date(2023, 1, 15), balance: 2400.0 },
                BalanceSnapshot { date: date(2026, 5, 10), balance: 1000.0 },
            ],
        );
        let accounts = vec![account("card", 1000.0)];
        let result = reconcile_accounts(&accounts, &history, 100.0, 360).unwrap();

        let series = &result[0];
        assert_eq!(series.actual[0].month, "2026-05");
        assert_eq!(series.planned[0].month, "2026-05");
        assert_eq!(series.minimum_only[0].month, "2026-05");
        assert_abs_diff_eq!(series.planned[0].balance, 1000.0);
    }

    #[test]
    fn test_planned_beats_minimum_only() {
        let history = history_for(
            "card",
            vec![BalanceSnapshot { date: date(2026, 5, 10), balance: 1000.0 }],
        );
        let accounts = vec![account("card", 1000.0)];
        let result = reconcile_accounts(&accounts, &history, 100.0, 360).unwrap();

        let series = &result[0];
        assert!(series.planned.len() < series.minimum_only.len());
        assert_eq!(series.planned.last().unwrap().balance, 0.0);
        assert_eq!(series.minimum_only.last().unwrap().balance, 0.0);
    }

    #[test]
    fn test_latest_snapshot_wins_within_month() {
        let history = history_for(
            "card",
            vec![
                BalanceSnapshot { date: date(2026, 5, 2), balance: 1100.0 },
                BalanceSnapshot { date: date(2026, 5, 28), balance: 990.0 },
            ],
        );
        let accounts = vec![account("card", 990.0)];
        let result = reconcile_accounts(&accounts, &history, 0.0, 360).unwrap();
        assert_eq!(result[0].actual.len(), 1);
        assert_abs_diff_eq!(result[0].actual[0].balance, 990.0);
    }

    #[test]
    fn test_account_without_history_is_omitted() {
        let accounts = vec![account("card", 1000.0), account("other", 500.0)];
        let history = history_for(
            "card",
            vec![BalanceSnapshot { date: date(2026, 5, 10), balance: 1000.0 }],
        );
        let result = reconcile_accounts(&accounts, &history, 0.0, 360).unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].account_id, "card");
    }

    #[test]
    fn test_settled_account_gets_anchor_point_only() {
        let history = history_for(
            "paid",
            vec![BalanceSnapshot { date: date(2026, 5, 10), balance: 0.0 }],
        );
        let accounts = vec![account("paid", 0.0)];
        let result = reconcile_accounts(&accounts, &history, 100.0, 360).unwrap();
        assert_eq!(result[0].planned.len(), 1);
        assert_eq!(result[0].planned[0].balance, 0.0);
    }
}
