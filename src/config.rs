//! Planning defaults
//!
//! Loaded from a JSON file where every field is optional, then overridden by
//! environment variables:
//!   PLANNER_RETIREMENT_RATE, PLANNER_RETIREMENT_YEARS,
//!   PLANNER_INCOME_MULTIPLE, PLANNER_GOAL_RATE

use serde::{Deserialize, Serialize};
use std::env;
use std::error::Error;
use std::path::Path;

/// Assumptions applied when the user has not supplied their own
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannerConfig {
    /// Annual return assumed for the default retirement goal (percent)
    #[serde(default = "default_retirement_rate")]
    pub retirement_rate_percent: f64,

    /// Years until the default retirement goal is due
    #[serde(default = "default_retirement_years")]
    pub retirement_horizon_years: u32,

    /// Retirement target as a multiple of annual income
    #[serde(default = "default_income_multiple")]
    pub retirement_income_multiple: f64,

    /// Annual return pre-filled for new goals (percent)
    #[serde(default = "default_goal_rate")]
    pub default_goal_rate_percent: f64,
}

fn default_retirement_rate() -> f64 { 7.0 }
fn default_retirement_years() -> u32 { 40 }
fn default_income_multiple() -> f64 { 25.0 }
fn default_goal_rate() -> f64 { 5.0 }

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            retirement_rate_percent: default_retirement_rate(),
            retirement_horizon_years: default_retirement_years(),
            retirement_income_multiple: default_income_multiple(),
            default_goal_rate_percent: default_goal_rate(),
        }
    }
}

impl PlannerConfig {
    /// Read a JSON config file; missing fields take their defaults
    pub fn from_json_path(path: &Path) -> Result<Self, Box<dyn Error + Send + Sync>> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Apply `PLANNER_*` environment overrides on top of `self`
    pub fn with_env_overrides(self) -> Result<Self, Box<dyn Error + Send + Sync>> {
        self.with_overrides(|key| env::var(key).ok())
    }

    /// Defaults plus environment overrides
    pub fn from_env() -> Result<Self, Box<dyn Error + Send + Sync>> {
        Self::default().with_env_overrides()
    }

    fn with_overrides<F>(mut self, lookup: F) -> Result<Self, Box<dyn Error + Send + Sync>>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("PLANNER_RETIREMENT_RATE") {
            self.retirement_rate_percent = v.parse()?;
        }
        if let Some(v) = lookup("PLANNER_RETIREMENT_YEARS") {
            self.retirement_horizon_years = v.parse()?;
        }
        if let Some(v) = lookup("PLANNER_INCOME_MULTIPLE") {
            self.retirement_income_multiple = v.parse()?;
        }
        if let Some(v) = lookup("PLANNER_GOAL_RATE") {
            self.default_goal_rate_percent = v.parse()?;
        }
        Ok(self)
    }
}
