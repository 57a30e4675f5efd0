//! Account, debt and goal records collected from the planning forms

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{ProjectionError, Result};
use crate::projection::payoff;

/// Kind of account a balance is held in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AccountType {
    Checking,
    Savings,
    /// High-interest savings
    HighYield,
    /// Non-registered brokerage
    Invested,
    /// Tax-advantaged (RRSP, TFSA, 401k, ...)
    Registered,
}

impl AccountType {
    /// Get the string representation used in input files
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountType::Checking => "checking",
            AccountType::Savings => "savings",
            AccountType::HighYield => "high-yield",
            AccountType::Invested => "invested",
            AccountType::Registered => "registered",
        }
    }
}

impl FromStr for AccountType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "checking" => Ok(AccountType::Checking),
            "savings" => Ok(AccountType::Savings),
            "high-yield" | "high yield" => Ok(AccountType::HighYield),
            "invested" => Ok(AccountType::Invested),
            "registered" => Ok(AccountType::Registered),
            other => Err(format!("Unknown account type: {}", other)),
        }
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How often contributions are made (and interest compounded)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Frequency {
    #[default]
    Monthly,
    BiWeekly,
    Weekly,
    Annual,
}

impl Frequency {
    /// Number of contribution/compounding periods in one year
    pub fn periods_per_year(&self) -> u32 {
        match self {
            Frequency::Monthly => 12,
            Frequency::BiWeekly => 26,
            Frequency::Weekly => 52,
            Frequency::Annual => 1,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Frequency::Monthly => "monthly",
            Frequency::BiWeekly => "bi-weekly",
            Frequency::Weekly => "weekly",
            Frequency::Annual => "annual",
        }
    }
}

impl FromStr for Frequency {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "monthly" => Ok(Frequency::Monthly),
            "bi-weekly" | "biweekly" => Ok(Frequency::BiWeekly),
            "weekly" => Ok(Frequency::Weekly),
            "annual" | "annually" | "yearly" => Ok(Frequency::Annual),
            other => Err(format!("Unknown frequency: {}", other)),
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Recurring deposit into an account
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContributionPlan {
    /// Amount deposited each period (one paycheck's allocation)
    pub amount: f64,

    /// Period length
    pub frequency: Frequency,
}

impl ContributionPlan {
    pub fn new(amount: f64, frequency: Frequency) -> Self {
        Self { amount, frequency }
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.amount >= 0.0) {
            return Err(ProjectionError::invalid_payment(
                "contribution_amount",
                format!("must be zero or more, got {}", self.amount),
            ));
        }
        Ok(())
    }

    /// Total deposited over one year
    pub fn annual_amount(&self) -> f64 {
        self.amount * self.frequency.periods_per_year() as f64
    }
}

/// A single account record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    /// Display name, also used to link goals to their funding account
    pub name: String,

    pub account_type: AccountType,

    /// Annual interest or return, in percent (5.0 = 5%)
    pub annual_rate: f64,

    /// Current balance
    pub balance: f64,

    /// Recurring contribution, if any
    #[serde(default)]
    pub contribution: Option<ContributionPlan>,
}

impl Account {
    pub fn new(name: impl Into<String>, account_type: AccountType, annual_rate: f64, balance: f64) -> Self {
        Self {
            name: name.into(),
            account_type,
            annual_rate,
            balance,
            contribution: None,
        }
    }

    /// Attach a recurring contribution
    pub fn with_contribution(mut self, plan: ContributionPlan) -> Self {
        self.contribution = Some(plan);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.balance >= 0.0) {
            return Err(ProjectionError::invalid_account(
                "balance",
                format!("account '{}' balance must be zero or more, got {}", self.name, self.balance),
            ));
        }
        if !(self.annual_rate >= 0.0) {
            return Err(ProjectionError::invalid_account(
                "annual_rate",
                format!("account '{}' rate must be zero or more, got {}", self.name, self.annual_rate),
            ));
        }
        if let Some(plan) = &self.contribution {
            plan.validate()?;
        }
        Ok(())
    }
}

/// An outstanding loan or card balance being paid down monthly
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Debt {
    pub name: String,

    /// Amount owed today
    pub principal: f64,

    /// Annual interest in percent
    pub annual_rate: f64,

    /// Fixed payment made every month
    pub monthly_payment: f64,
}

impl Debt {
    pub fn new(name: impl Into<String>, principal: f64, annual_rate: f64, monthly_payment: f64) -> Self {
        Self {
            name: name.into(),
            principal,
            annual_rate,
            monthly_payment,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.principal > 0.0) {
            return Err(ProjectionError::invalid_payment(
                "principal",
                format!("debt '{}' principal must be greater than zero, got {}", self.name, self.principal),
            ));
        }
        if !(self.monthly_payment > 0.0) {
            return Err(ProjectionError::invalid_payment(
                "monthly_payment",
                format!("debt '{}' payment must be greater than zero, got {}", self.name, self.monthly_payment),
            ));
        }
        if !(self.annual_rate >= 0.0) {
            return Err(ProjectionError::invalid_payment(
                "annual_rate",
                format!("debt '{}' rate must be zero or more, got {}", self.name, self.annual_rate),
            ));
        }
        Ok(())
    }

    /// Interest charged in the first month
    pub fn monthly_interest(&self) -> f64 {
        self.principal * self.annual_rate / 100.0 / 12.0
    }

    /// Date by which the debt is fully retired if payments start on `start_date`
    pub fn payoff_date(&self, start_date: NaiveDate) -> Result<NaiveDate> {
        payoff::payoff_date(self.principal, self.annual_rate, self.monthly_payment, start_date)
    }
}

/// A savings target funded from one account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub name: String,

    /// Amount needed
    pub target_cost: f64,

    /// Calendar year the money is needed by
    pub target_year: i32,

    /// Name of the [`Account`] funding the goal
    pub funding_account: String,
}

impl Goal {
    pub fn new(
        name: impl Into<String>,
        target_cost: f64,
        target_year: i32,
        funding_account: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            target_cost,
            target_year,
            funding_account: funding_account.into(),
        }
    }

    pub fn validate(&self, current_year: i32) -> Result<()> {
        if !(self.target_cost > 0.0) {
            return Err(ProjectionError::invalid_goal(
                "target_cost",
                format!("goal '{}' cost must be greater than zero", self.name),
            ));
        }
        if self.target_year <= current_year {
            return Err(ProjectionError::invalid_goal(
                "target_year",
                format!(
                    "goal '{}' target year {} must be after the current year {}",
                    self.name, self.target_year, current_year
                ),
            ));
        }
        Ok(())
    }

    /// Whole years left until the target year
    pub fn years_remaining(&self, current_year: i32) -> i32 {
        self.target_year - current_year
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_periods_per_year() {
        assert_eq!(Frequency::Monthly.periods_per_year(), 12);
        assert_eq!(Frequency::BiWeekly.periods_per_year(), 26);
        assert_eq!(Frequency::Weekly.periods_per_year(), 52);
        assert_eq!(Frequency::Annual.periods_per_year(), 1);
    }

    #[test]
    fn test_parse_enums() {
        assert_eq!("Bi-Weekly".parse::<Frequency>(), Ok(Frequency::BiWeekly));
        assert_eq!("high-yield".parse::<AccountType>(), Ok(AccountType::HighYield));
        assert!("fortnightly".parse::<Frequency>().is_err());
        assert!("crypto".parse::<AccountType>().is_err());
    }

    #[test]
    fn test_serde_names_match_input_strings() {
        let json = serde_json::to_string(&Frequency::BiWeekly).unwrap();
        assert_eq!(json, "\"bi-weekly\"");
        let parsed: AccountType = serde_json::from_str("\"high-yield\"").unwrap();
        assert_eq!(parsed, AccountType::HighYield);
    }

    #[test]
    fn test_account_validation() {
        let ok = Account::new("Emergency", AccountType::HighYield, 4.5, 2_000.0);
        assert!(ok.validate().is_ok());

        let negative = Account::new("Overdrawn", AccountType::Checking, 0.0, -10.0);
        assert!(matches!(
            negative.validate(),
            Err(ProjectionError::InvalidAccount { field: "balance", .. })
        ));

        let bad_plan = ok.with_contribution(ContributionPlan::new(-5.0, Frequency::Weekly));
        assert_eq!(bad_plan.validate().unwrap_err().field(), "contribution_amount");
    }

    #[test]
    fn test_goal_must_be_in_future() {
        let goal = Goal::new("Down payment", 60_000.0, 2030, "Savings");
        assert!(goal.validate(2026).is_ok());
        assert!(matches!(
            goal.validate(2030),
            Err(ProjectionError::InvalidGoal { field: "target_year", .. })
        ));
        assert_eq!(goal.years_remaining(2026), 4);
    }

    #[test]
    fn test_debt_validation() {
        assert!(Debt::new("Card", 1_000.0, 19.9, 50.0).validate().is_ok());
        assert_eq!(Debt::new("Card", 0.0, 19.9, 50.0).validate().unwrap_err().field(), "principal");
        for payment in [0.0, -25.0] {
            assert!(matches!(
                Debt::new("Card", 1_000.0, 19.9, payment).validate(),
                Err(ProjectionError::InvalidPayment { field: "monthly_payment", .. })
            ));
        }
    }

    #[test]
    fn test_debt_monthly_interest() {
        let debt = Debt::new("Card", 10_000.0, 12.0, 300.0);
        assert!((debt.monthly_interest() - 100.0).abs() < 1e-10);
    }

    #[test]
    fn test_annual_contribution() {
        let plan = ContributionPlan::new(100.0, Frequency::BiWeekly);
        assert!((plan.annual_amount() - 2_600.0).abs() < 1e-10);
    }
}
