//! Debt Payoff Planner CLI
//!
//! Loads account records (and optionally balance history) from CSV exports,
//! runs the strategy comparison, prints a summary table, and writes the full
//! result as JSON.

use anyhow::Context;
use clap::Parser;
use payoff_engine::{
    account::{load_account_records, load_balance_history},
    list_debt_accounts, PayoffPlanner, PlanRequest, StrategyResult,
};
use std::collections::HashMap;
use std::fs::File;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "payoff_engine", about = "Debt payoff planning engine")]
struct Cli {
    /// Account records CSV (id,name,currentBalance,interestRate,minimumPayment,isDebt,isMortgage)
    #[arg(long)]
    accounts: PathBuf,

    /// Balance history CSV (accountId,date,balance); enables actual-vs-planned
    #[arg(long)]
    history: Option<PathBuf>,

    /// Monthly extra payment on top of all minimums
    #[arg(long, default_value_t = 0.0)]
    extra: f64,

    /// Comma-separated priority list; enables the custom strategy
    #[arg(long)]
    custom_order: Option<String>,

    /// Include mortgage accounts in the plan
    #[arg(long)]
    include_mortgages: bool,

    /// Simulation horizon in months
    #[arg(long, default_value_t = 360)]
    max_months: u32,

    /// Where to write the full JSON result
    #[arg(long, default_value = "payoff_plan.json")]
    output: PathBuf,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let records = load_account_records(&cli.accounts)
        .with_context(|| format!("loading accounts from {}", cli.accounts.display()))?;
    let history = match &cli.history {
        Some(path) => load_balance_history(path)
            .with_context(|| format!("loading history from {}", path.display()))?,
        None => HashMap::new(),
    };

    let accounts = list_debt_accounts(&records, cli.include_mortgages);
    println!("Debt Payoff Planner");
    println!("===================\n");
    println!(
        "{} debt account(s), extra ${:.2}/mo",
        accounts.len(),
        cli.extra
    );
    for account in &accounts {
        println!(
            "  {:<16} balance ${:>12.2}  APR {:>6.2}%  minimum ${:>9.2}",
            account.name, account.current_balance, account.interest_rate, account.minimum_payment,
        );
    }
    println!();

    let request = PlanRequest {
        extra_payment: cli.extra,
        account_ids: None,
        include_mortgages: cli.include_mortgages,
        custom_order: cli
            .custom_order
            .map(|s| s.split(',').map(|id| id.trim().to_string()).collect()),
        max_months: cli.max_months,
    };

    let planner = PayoffPlanner::starting_now();
    let result = planner.compute_debt_payoff_plan(&accounts, &history, &request)?;

    println!(
        "{:<10} {:>12} {:>16} {:>14}",
        "Strategy", "Debt-free", "Total interest", "Total paid"
    );
    println!("{}", "-".repeat(56));
    print_strategy(&result.avalanche);
    print_strategy(&result.snowball);
    if let Some(custom) = &result.custom {
        print_strategy(custom);
    }

    let saved = result.snowball.total_interest_paid - result.avalanche.total_interest_paid;
    if saved > 0.0 {
        println!("\nAvalanche saves ${:.2} in interest over snowball", saved);
    }

    let file = File::create(&cli.output)
        .with_context(|| format!("creating {}", cli.output.display()))?;
    serde_json::to_writer_pretty(file, &result)?;
    println!("\nFull results written to: {}", cli.output.display());

    Ok(())
}

fn print_strategy(result: &StrategyResult) {
    println!(
        "{:<10} {:>12} {:>16.2} {:>14.2}",
        result.strategy.as_str(),
        result.debt_free_date.as_deref().unwrap_or("never"),
        result.total_interest_paid,
        result.total_paid,
    );
}
