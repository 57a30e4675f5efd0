//! Snapshot runner for batch projections
//!
//! Holds the planning year and defaults once, then projects many account sets
//! or many snapshot years in parallel.

use rayon::prelude::*;

use crate::accounts::Account;
use crate::config::PlannerConfig;
use crate::error::Result;
use crate::projection::{project_accounts, retirement_goal, AccountSnapshot, GoalPlan};

/// Batch projection runner anchored to one current year
///
/// # Example
/// ```ignore
/// let runner = SnapshotRunner::new(2026);
///
/// // One household, several horizons
/// let snapshots = runner.run_years(&accounts, &[2030, 2035, 2040])?;
/// ```
#[derive(Debug, Clone)]
pub struct SnapshotRunner {
    current_year: i32,
    config: PlannerConfig,
}

impl SnapshotRunner {
    /// Create runner with default planning assumptions
    pub fn new(current_year: i32) -> Self {
        Self::with_config(current_year, PlannerConfig::default())
    }

    /// Create runner with specific planning assumptions
    pub fn with_config(current_year: i32, config: PlannerConfig) -> Self {
        Self { current_year, config }
    }

    pub fn current_year(&self) -> i32 {
        self.current_year
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Project one account set to `snapshot_year`
    pub fn run(&self, accounts: &[Account], snapshot_year: i32) -> Result<AccountSnapshot> {
        project_accounts(accounts, snapshot_year, self.current_year)
    }

    /// Project many account sets to the same year, in parallel
    pub fn run_batch(&self, households: &[Vec<Account>], snapshot_year: i32) -> Result<Vec<AccountSnapshot>> {
        households
            .par_iter()
            .map(|accounts| self.run(accounts, snapshot_year))
            .collect()
    }

    /// Project one account set to several years, in parallel
    pub fn run_years(&self, accounts: &[Account], years: &[i32]) -> Result<Vec<AccountSnapshot>> {
        years
            .par_iter()
            .map(|&year| self.run(accounts, year))
            .collect()
    }

    /// Default retirement goal for `monthly_income` under this runner's config
    pub fn retirement_goal(&self, monthly_income: f64) -> Result<GoalPlan> {
        retirement_goal(monthly_income, self.current_year, &self.config)
    }
}
