//! Payoff simulation: amortization arithmetic, strategy ordering, waterfall

mod amortize;
mod calendar;
mod schedule;
mod strategy;
mod waterfall;

pub use amortize::{advance, round2, AmortizationStep};
pub use calendar::{month_index, month_label};
pub use schedule::{AccountTimeline, AggregatePoint, MonthPoint, StrategyResult};
pub use strategy::{payoff_order, Strategy};
pub use waterfall::{SimulationOutcome, WaterfallSimulator};
