//! Strategy aggregation: the public planning surface
//!
//! Runs the waterfall once per requested strategy over an identical working
//! set and extra payment so the strategy totals are directly comparable,
//! then attaches the actual-vs-planned reconciliation.

use chrono::{NaiveDate, Utc};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use crate::account::{BalanceSnapshot, DebtAccount};
use crate::error::PlanError;
use crate::plan::{payoff_order, Strategy, StrategyResult, WaterfallSimulator};
use crate::reconcile::{reconcile_accounts, ActualVsPlanned};

/// Default simulation horizon: 30 years
pub const DEFAULT_MAX_MONTHS: u32 = 360;

fn default_max_months() -> u32 {
    DEFAULT_MAX_MONTHS
}

/// Simulation parameters for one invocation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanRequest {
    /// Dollars per month applied on top of all minimums
    #[serde(default)]
    pub extra_payment: f64,

    /// Optional subset filter; None keeps every eligible account. Unknown
    /// ids are ignored (subset semantics).
    #[serde(default)]
    pub account_ids: Option<Vec<String>>,

    /// Whether mortgage accounts join the plan
    #[serde(default)]
    pub include_mortgages: bool,

    /// Explicit priority list; supplying it enables the custom strategy run
    #[serde(default)]
    pub custom_order: Option<Vec<String>>,

    /// Simulation horizon cap
    #[serde(default = "default_max_months")]
    pub max_months: u32,
}

impl Default for PlanRequest {
    fn default() -> Self {
        Self {
            extra_payment: 0.0,
            account_ids: None,
            include_mortgages: false,
            custom_order: None,
            max_months: DEFAULT_MAX_MONTHS,
        }
    }
}

/// Complete response of one planning invocation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DebtPayoffResult {
    /// The working set the strategies were simulated over
    pub debt_accounts: Vec<DebtAccount>,

    pub avalanche: StrategyResult,
    pub snowball: StrategyResult,

    /// Present only when the request supplied a custom order
    pub custom: Option<StrategyResult>,

    pub actual_vs_planned: Vec<ActualVsPlanned>,
}

/// Planner anchored at a caller-chosen month.
///
/// The engine itself is pure: the anchor is the only clock it knows, so two
/// planners with the same anchor produce byte-identical output for the same
/// inputs.
#[derive(Debug, Clone)]
pub struct PayoffPlanner {
    anchor: NaiveDate,
}

impl PayoffPlanner {
    /// Planner whose schedules start at the given date's month
    pub fn anchored_at(anchor: NaiveDate) -> Self {
        Self { anchor }
    }

    /// Planner anchored at today's month, for callers outside the engine
    pub fn starting_now() -> Self {
        Self { anchor: Utc::now().date_naive() }
    }

    /// Compute the full payoff plan for a snapshot of debt accounts.
    ///
    /// `history` supplies chronological balance snapshots per account id for
    /// the actual-vs-planned reconciliation; accounts without history are
    /// simply omitted from that structure.
    pub fn compute_debt_payoff_plan(
        &self,
        accounts: &[DebtAccount],
        history: &HashMap<String, Vec<BalanceSnapshot>>,
        request: &PlanRequest,
    ) -> Result<DebtPayoffResult, PlanError> {
        let working = working_set(accounts, request);
        debug!(
            "planning over {} of {} account(s), extra ${:.2}/mo",
            working.len(),
            accounts.len(),
            request.extra_payment
        );

        let simulator = WaterfallSimulator::new(self.anchor, request.max_months);

        let avalanche =
            run_strategy(&simulator, &working, Strategy::Avalanche, None, request)?;
        let snowball =
            run_strategy(&simulator, &working, Strategy::Snowball, None, request)?;
        let custom = match &request.custom_order {
            Some(order) => Some(run_strategy(
                &simulator,
                &working,
                Strategy::Custom,
                Some(order.as_slice()),
                request,
            )?),
            None => None,
        };

        let actual_vs_planned = reconcile_accounts(
            &working,
            history,
            request.extra_payment,
            request.max_months,
        )?;

        Ok(DebtPayoffResult {
            debt_accounts: working,
            avalanche,
            snowball,
            custom,
            actual_vs_planned,
        })
    }
}

/// One strategy run assembled into its response shape
fn run_strategy(
    simulator: &WaterfallSimulator,
    accounts: &[DebtAccount],
    strategy: Strategy,
    custom_order: Option<&[String]>,
    request: &PlanRequest,
) -> Result<StrategyResult, PlanError> {
    let order = payoff_order(accounts, strategy, custom_order)?;
    let outcome = simulator.simulate(accounts, &order, request.extra_payment)?;
    Ok(StrategyResult {
        strategy,
        debt_free_date: outcome.debt_free_date,
        total_interest_paid: outcome.total_interest_paid,
        total_paid: outcome.total_paid,
        timelines: outcome.timelines,
        aggregate_schedule: outcome.aggregate_schedule,
    })
}

/// Apply the request's subset and mortgage filters, preserving input order
fn working_set(accounts: &[DebtAccount], request: &PlanRequest) -> Vec<DebtAccount> {
    let subset: Option<HashSet<&str>> = request
        .account_ids
        .as_ref()
        .map(|ids| ids.iter().map(String::as_str).collect());

    accounts
        .iter()
        .filter(|a| match &subset {
            Some(ids) => ids.contains(a.id.as_str()),
            None => true,
        })
        .filter(|a| request.include_mortgages || !a.is_mortgage)
        .cloned()
        .collect()
}
