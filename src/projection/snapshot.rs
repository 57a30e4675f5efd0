//! Projected account values for a future year

use serde::{Deserialize, Serialize};

use crate::accounts::{Account, Frequency};
use crate::error::{ProjectionError, Result};
use super::growth::{future_value, total_contributed};

/// Projected value of one account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionResult {
    /// Account name
    pub name: String,

    /// Balance today
    pub starting_balance: f64,

    /// Contributions made over the horizon, before growth
    pub contributed: f64,

    /// Projected balance
    pub projected_value: f64,
}

impl ProjectionResult {
    /// Growth from interest alone
    pub fn interest_earned(&self) -> f64 {
        self.projected_value - self.starting_balance - self.contributed
    }
}

/// Projected values of a set of accounts in a given year
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountSnapshot {
    pub snapshot_year: i32,
    pub accounts: Vec<ProjectionResult>,
}

impl AccountSnapshot {
    /// Sum of projected values across all accounts
    pub fn total_value(&self) -> f64 {
        self.accounts.iter().map(|r| r.projected_value).sum()
    }

    pub fn get(&self, name: &str) -> Option<&ProjectionResult> {
        self.accounts.iter().find(|r| r.name == name)
    }
}

/// Project a single account forward by `years`
pub fn project_account(account: &Account, years: f64) -> ProjectionResult {
    let (amount, frequency) = account
        .contribution
        .map(|plan| (plan.amount, plan.frequency))
        .unwrap_or((0.0, Frequency::Monthly));

    ProjectionResult {
        name: account.name.clone(),
        starting_balance: account.balance,
        contributed: total_contributed(years, amount, frequency),
        projected_value: future_value(account.balance, account.annual_rate, years, amount, frequency),
    }
}

/// Project every account to `snapshot_year`.
///
/// A snapshot year equal to the current year returns today's balances.
pub fn project_accounts(accounts: &[Account], snapshot_year: i32, current_year: i32) -> Result<AccountSnapshot> {
    if snapshot_year < current_year {
        return Err(ProjectionError::invalid_date(
            "snapshot_year",
            format!("{} is before the current year {}", snapshot_year, current_year),
        ));
    }
    for account in accounts {
        account.validate()?;
    }

    let years = (snapshot_year - current_year) as f64;
    log::debug!("projecting {} accounts {} years ahead", accounts.len(), years);

    Ok(AccountSnapshot {
        snapshot_year,
        accounts: accounts.iter().map(|a| project_account(a, years)).collect(),
    })
}
