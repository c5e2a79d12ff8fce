//! Payoff Engine - debt payoff planning for interest-bearing liabilities
//!
//! This library provides:
//! - Month-by-month amortization of multi-account debt snapshots
//! - Avalanche, snowball, and custom-priority repayment strategies
//! - The waterfall roll-forward rule (a retired debt's minimum joins the extra pool)
//! - Actual-vs-planned reconciliation against historical balances
//!
//! The engine is a pure, synchronous computation: one request in, one fully
//! computed projection out. It owns no persistent state and performs no I/O;
//! account and balance-history stores are external collaborators.

pub mod account;
pub mod error;
pub mod plan;
pub mod planner;
pub mod reconcile;

// Re-export commonly used types
pub use account::{list_debt_accounts, AccountRecord, BalanceSnapshot, DebtAccount};
pub use error::PlanError;
pub use plan::{AccountTimeline, MonthPoint, Strategy, StrategyResult, WaterfallSimulator};
pub use planner::{DebtPayoffResult, PayoffPlanner, PlanRequest};
pub use reconcile::{ActualVsPlanned, BalancePoint};
