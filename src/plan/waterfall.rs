//! Multi-account waterfall simulation
//!
//! One strategy run: every open account gets its minimum each month, then a
//! single pooled extra budget cascades down the priority order. A retired
//! account's minimum rolls forward into the pool from the following month —
//! the rule that gives snowball and avalanche their compounding benefit.

use chrono::NaiveDate;
use log::debug;
use std::collections::HashMap;

use super::amortize::{advance, round2};
use super::calendar::month_label;
use super::schedule::{AccountTimeline, AggregatePoint, MonthPoint};
use crate::account::DebtAccount;
use crate::error::PlanError;

/// Simulator configured with the anchor month for labels and the horizon cap
#[derive(Debug, Clone)]
pub struct WaterfallSimulator {
    anchor: NaiveDate,
    max_months: u32,
}

/// Everything one strategy run produces
#[derive(Debug, Clone)]
pub struct SimulationOutcome {
    pub timelines: Vec<AccountTimeline>,
    pub aggregate_schedule: Vec<AggregatePoint>,
    pub debt_free_date: Option<String>,
    pub total_interest_paid: f64,
    pub total_paid: f64,
}

/// Per-account mutable state threaded through the month loop
#[derive(Debug)]
struct AccountState<'a> {
    account: &'a DebtAccount,
    balance: f64,
    retired_month: Option<u32>,
    schedule: Vec<MonthPoint>,
}

impl WaterfallSimulator {
    pub fn new(anchor: NaiveDate, max_months: u32) -> Self {
        Self { anchor, max_months }
    }

    /// Run the waterfall for one priority order.
    ///
    /// `order` must cover every open account in `accounts` (the orderer
    /// guarantees this). Zero-balance accounts never join the cascade and
    /// are reported with zero-value timelines.
    pub fn simulate(
        &self,
        accounts: &[DebtAccount],
        order: &[String],
        extra_payment: f64,
    ) -> Result<SimulationOutcome, PlanError> {
        let by_id: HashMap<&str, &DebtAccount> =
            accounts.iter().map(|a| (a.id.as_str(), a)).collect();

        // Open accounts, in cascade priority order
        let mut states: Vec<AccountState> = order
            .iter()
            .filter_map(|id| by_id.get(id.as_str()).copied())
            .filter(|a| a.is_open())
            .map(|account| AccountState {
                account,
                balance: account.current_balance,
                retired_month: None,
                schedule: Vec::new(),
            })
            .collect();

        // A minimum below first-month interest only loses ground: interest
        // shrinks as balances shrink, so this check is exact
        for state in &states {
            let interest = round2(
                state.balance * state.account.interest_rate / 100.0 / 12.0,
            );
            if state.account.minimum_payment < interest {
                return Err(PlanError::DebtNeverPaidOff {
                    account_id: state.account.id.clone(),
                });
            }
        }

        let mut aggregate_schedule = Vec::new();
        // Minimums freed by accounts retired in prior months (roll-forward)
        let mut rolled_minimums = 0.0;
        let mut debt_free_month = None;

        for month in 1..=self.max_months {
            if states.iter().all(|s| s.balance <= 0.0) {
                break;
            }

            let label = month_label(self.anchor, month);
            let mut pool = round2(extra_payment + rolled_minimums);
            let mut freed_this_month = 0.0;
            let mut point = AggregatePoint {
                month: label.clone(),
                total_balance: 0.0,
                total_payment: 0.0,
                total_interest: 0.0,
                total_principal: 0.0,
            };

            // Sequential by priority: the cascade must not be reordered
            for state in states.iter_mut() {
                if state.balance <= 0.0 {
                    continue; // retired accounts contribute zeros, not absence
                }

                let interest = round2(
                    state.balance * state.account.interest_rate / 100.0 / 12.0,
                );
                let payoff = round2(state.balance + interest);
                // Never overpay a nearly-finished debt with minimum budget
                // that belongs elsewhere
                let minimum_portion = state.account.minimum_payment.min(payoff);
                // This account absorbs what the pool can close; the rest
                // cascades to the next account in order
                let extra_portion = round2(pool.min(round2(payoff - minimum_portion)));
                pool = round2(pool - extra_portion);

                let step = advance(
                    state.balance,
                    state.account.interest_rate,
                    round2(minimum_portion + extra_portion),
                );
                state.balance = step.new_balance;
                state.schedule.push(MonthPoint {
                    month: label.clone(),
                    balance: step.new_balance,
                    principal: step.principal,
                    interest: step.interest,
                    payment: round2(step.payment_used - extra_portion),
                    extra_payment: extra_portion,
                });

                point.total_balance = round2(point.total_balance + step.new_balance);
                point.total_payment = round2(point.total_payment + step.payment_used);
                point.total_interest = round2(point.total_interest + step.interest);
                point.total_principal = round2(point.total_principal + step.principal);

                if state.balance <= 0.0 {
                    state.retired_month = Some(month);
                    freed_this_month = round2(freed_this_month + state.account.minimum_payment);
                }
            }

            aggregate_schedule.push(point);
            // Freed minimums join the pool starting next month
            rolled_minimums = round2(rolled_minimums + freed_this_month);

            if states.iter().all(|s| s.balance <= 0.0) {
                debt_free_month = Some(month);
                break;
            }
        }

        let outcome = self.assemble(accounts, states, aggregate_schedule, debt_free_month);
        debug!(
            "waterfall run over {} account(s): debt-free {:?}, total interest {:.2}",
            accounts.len(),
            outcome.debt_free_date,
            outcome.total_interest_paid,
        );
        Ok(outcome)
    }

    /// Build timelines in the caller's account order so results are stable
    /// across strategies
    fn assemble(
        &self,
        accounts: &[DebtAccount],
        states: Vec<AccountState<'_>>,
        aggregate_schedule: Vec<AggregatePoint>,
        debt_free_month: Option<u32>,
    ) -> SimulationOutcome {
        let mut finished: HashMap<&str, AccountState> = states
            .into_iter()
            .map(|s| (s.account.id.as_str(), s))
            .collect();

        let mut timelines = Vec::with_capacity(accounts.len());
        let mut total_interest_paid = 0.0;
        let mut total_paid = 0.0;

        for account in accounts {
            let timeline = match finished.remove(account.id.as_str()) {
                Some(state) => {
                    let interest: f64 =
                        round2(state.schedule.iter().map(|p| p.interest).sum());
                    let paid: f64 = round2(
                        state
                            .schedule
                            .iter()
                            .map(|p| p.payment + p.extra_payment)
                            .sum(),
                    );
                    AccountTimeline {
                        account_id: account.id.clone(),
                        name: account.name.clone(),
                        months_to_payoff: state.retired_month.unwrap_or(self.max_months),
                        payoff_date: state
                            .retired_month
                            .map(|m| month_label(self.anchor, m)),
                        total_interest_paid: interest,
                        total_paid: paid,
                        schedule: state.schedule,
                    }
                }
                None => AccountTimeline::already_settled(account),
            };
            total_interest_paid = round2(total_interest_paid + timeline.total_interest_paid);
            total_paid = round2(total_paid + timeline.total_paid);
            timelines.push(timeline);
        }

        SimulationOutcome {
            timelines,
            aggregate_schedule,
            debt_free_date: debt_free_month.map(|m| month_label(self.anchor, m)),
            total_interest_paid,
            total_paid,
        }
    }
}
