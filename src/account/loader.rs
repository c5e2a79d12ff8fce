//! Load account records and balance history from CSV exports

use super::{AccountRecord, BalanceSnapshot};
use chrono::NaiveDate;
use csv::Reader;
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;
use thiserror::Error;

/// Errors raised while loading store exports
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("invalid field in row for account {account_id}: {reason}")]
    InvalidField { account_id: String, reason: String },
}

/// Raw CSV row matching the account-store export columns
#[derive(Debug, serde::Deserialize)]
struct AccountRow {
    #[serde(rename = "id")]
    id: String,
    #[serde(rename = "name")]
    name: String,
    #[serde(rename = "currentBalance")]
    current_balance: f64,
    #[serde(rename = "interestRate")]
    interest_rate: f64,
    #[serde(rename = "minimumPayment")]
    minimum_payment: f64,
    #[serde(rename = "isDebt")]
    is_debt: bool,
    #[serde(rename = "isMortgage")]
    is_mortgage: bool,
}

impl AccountRow {
    fn to_record(self) -> Result<AccountRecord, LoadError> {
        if self.current_balance < 0.0 {
            return Err(LoadError::InvalidField {
                account_id: self.id,
                reason: format!("negative balance: {}", self.current_balance),
            });
        }
        if self.minimum_payment < 0.0 {
            return Err(LoadError::InvalidField {
                account_id: self.id,
                reason: format!("negative minimum payment: {}", self.minimum_payment),
            });
        }

        Ok(AccountRecord {
            id: self.id,
            name: self.name,
            current_balance: self.current_balance,
            interest_rate: self.interest_rate,
            minimum_payment: self.minimum_payment,
            is_debt: self.is_debt,
            is_mortgage: self.is_mortgage,
        })
    }
}

/// Raw CSV row matching the balance-history export columns
#[derive(Debug, serde::Deserialize)]
struct HistoryRow {
    #[serde(rename = "accountId")]
    account_id: String,
    #[serde(rename = "date")]
    date: String,
    #[serde(rename = "balance")]
    balance: f64,
}

/// Read account records from any CSV source
pub fn read_account_records<R: Read>(reader: R) -> Result<Vec<AccountRecord>, LoadError> {
    read_from_csv_reader(Reader::from_reader(reader))
}

/// Load account records from a CSV file
pub fn load_account_records(path: &Path) -> Result<Vec<AccountRecord>, LoadError> {
    read_from_csv_reader(Reader::from_path(path)?)
}

fn read_from_csv_reader<R: Read>(mut reader: Reader<R>) -> Result<Vec<AccountRecord>, LoadError> {
    let mut records = Vec::new();
    for row in reader.deserialize() {
        let row: AccountRow = row?;
        records.push(row.to_record()?);
    }
    Ok(records)
}

/// Read balance history from any CSV source, keyed by account id and
/// sorted chronologically per account
pub fn read_balance_history<R: Read>(
    reader: R,
) -> Result<HashMap<String, Vec<BalanceSnapshot>>, LoadError> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut history: HashMap<String, Vec<BalanceSnapshot>> = HashMap::new();

    for row in csv_reader.deserialize() {
        let row: HistoryRow = row?;
        let date = NaiveDate::parse_from_str(&row.date, "%Y-%m-%d").map_err(|e| {
            LoadError::InvalidField {
                account_id: row.account_id.clone(),
                reason: format!("bad date '{}': {}", row.date, e),
            }
        })?;
        history
            .entry(row.account_id)
            .or_default()
            .push(BalanceSnapshot { date, balance: row.balance });
    }

    for snapshots in history.values_mut() {
        snapshots.sort_by_key(|s| s.date);
    }
    Ok(history)
}

/// Load balance history from a CSV file
pub fn load_balance_history(
    path: &Path,
) -> Result<HashMap<String, Vec<BalanceSnapshot>>, LoadError> {
    let file = std::fs::File::open(path).map_err(csv::Error::from)?;
    read_balance_history(file)
}
