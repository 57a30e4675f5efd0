//! Goal progress and contribution planning
//!
//! Goals are planned with monthly contributions compounding monthly:
//! - `required_monthly_contribution`: the deposit needed to hit a target year
//! - `months_to_goal` / `target_year_for_contribution`: the inverse, given a deposit
//! - `progress_fraction`: how much of the goal the funding balance already covers

use serde::{Deserialize, Serialize};

use crate::accounts::{Account, Goal};
use crate::config::PlannerConfig;
use crate::error::{ProjectionError, Result};

/// Share of `goal_cost` already covered by `account_balance`, capped at 1
pub fn progress_fraction(account_balance: f64, goal_cost: f64) -> Result<f64> {
    if !(goal_cost > 0.0) {
        log::warn!("rejected goal cost {}", goal_cost);
        return Err(ProjectionError::invalid_goal(
            "goal_cost",
            format!("must be greater than zero, got {}", goal_cost),
        ));
    }
    Ok((account_balance / goal_cost).min(1.0))
}

/// Progress of `goal` using the balance of its funding account
pub fn goal_progress(goal: &Goal, accounts: &[Account]) -> Result<f64> {
    let account = accounts
        .iter()
        .find(|a| a.name == goal.funding_account)
        .ok_or_else(|| {
            ProjectionError::invalid_goal(
                "funding_account",
                format!("goal '{}' refers to unknown account '{}'", goal.name, goal.funding_account),
            )
        })?;
    progress_fraction(account.balance, goal.target_cost)
}

fn months_until(target_year: i32, current_year: i32) -> Result<i32> {
    if target_year <= current_year {
        return Err(ProjectionError::invalid_goal(
            "target_year",
            format!("{} must be after the current year {}", target_year, current_year),
        ));
    }
    target_year
        .checked_sub(current_year)
        .and_then(|years| years.checked_mul(12))
        .ok_or_else(|| {
            ProjectionError::invalid_goal(
                "target_year",
                format!("{} is too far beyond the current year {}", target_year, current_year),
            )
        })
}

/// Monthly deposit needed so that `current_savings` plus deposits reach
/// `goal_cost` by January of `target_year`.
///
/// Returns 0 when the savings alone already grow past the goal.
pub fn required_monthly_contribution(
    goal_cost: f64,
    current_savings: f64,
    annual_rate_percent: f64,
    target_year: i32,
    current_year: i32,
) -> Result<f64> {
    if !(goal_cost > 0.0) {
        return Err(ProjectionError::invalid_goal(
            "goal_cost",
            format!("must be greater than zero, got {}", goal_cost),
        ));
    }
    let n = months_until(target_year, current_year)?;
    let rate = annual_rate_percent / 100.0 / 12.0;

    let contribution = if rate > 0.0 {
        let growth = (1.0 + rate).powi(n);
        (goal_cost - current_savings * growth) * rate / (growth - 1.0)
    } else {
        (goal_cost - current_savings) / n as f64
    };

    Ok(contribution.max(0.0))
}

/// Months of `monthly_contribution` deposits needed to grow `current_savings`
/// to `goal_cost`. Fractional; zero when savings already cover the goal.
pub fn months_to_goal(
    goal_cost: f64,
    current_savings: f64,
    annual_rate_percent: f64,
    monthly_contribution: f64,
) -> Result<f64> {
    if !(goal_cost > 0.0) {
        return Err(ProjectionError::invalid_goal(
            "goal_cost",
            format!("must be greater than zero, got {}", goal_cost),
        ));
    }
    if current_savings >= goal_cost {
        return Ok(0.0);
    }
    if !(monthly_contribution > 0.0) {
        return Err(ProjectionError::invalid_payment(
            "monthly_contribution",
            format!("must be greater than zero to reach the goal, got {}", monthly_contribution),
        ));
    }

    let rate = annual_rate_percent / 100.0 / 12.0;
    if rate <= 0.0 {
        return Ok((goal_cost - current_savings) / monthly_contribution);
    }

    // savings*(1+r)^n + c*((1+r)^n - 1)/r = goal, solved for n
    let annuity = monthly_contribution / rate;
    Ok(((goal_cost + annuity) / (current_savings + annuity)).ln() / (1.0 + rate).ln())
}

/// Year the goal is reached when depositing `monthly_contribution` from now
pub fn target_year_for_contribution(
    goal_cost: f64,
    current_savings: f64,
    annual_rate_percent: f64,
    monthly_contribution: f64,
    current_year: i32,
) -> Result<i32> {
    let months = months_to_goal(goal_cost, current_savings, annual_rate_percent, monthly_contribution)?;
    let years = (months / 12.0).ceil();
    if !years.is_finite() || years > i32::MAX as f64 {
        return Err(ProjectionError::invalid_goal(
            "monthly_contribution",
            format!("{} per month never reaches the goal within a representable year", monthly_contribution),
        ));
    }
    current_year.checked_add(years as i32).ok_or_else(|| {
        ProjectionError::invalid_goal(
            "monthly_contribution",
            format!("{} per month reaches the goal beyond a representable year", monthly_contribution),
        )
    })
}

/// A goal together with the savings plan that funds it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoalPlan {
    pub name: String,
    pub goal_cost: f64,
    pub current_savings: f64,
    pub annual_rate: f64,
    pub target_year: i32,
    pub monthly_contribution: f64,
}

impl GoalPlan {
    /// Plan a goal that must be met by `target_year`
    pub fn by_target_year(
        name: impl Into<String>,
        goal_cost: f64,
        current_savings: f64,
        annual_rate: f64,
        target_year: i32,
        current_year: i32,
    ) -> Result<Self> {
        let monthly_contribution =
            required_monthly_contribution(goal_cost, current_savings, annual_rate, target_year, current_year)?;
        Ok(Self {
            name: name.into(),
            goal_cost,
            current_savings,
            annual_rate,
            target_year,
            monthly_contribution,
        })
    }

    /// Plan a goal funded by a fixed monthly deposit
    pub fn by_contribution(
        name: impl Into<String>,
        goal_cost: f64,
        current_savings: f64,
        annual_rate: f64,
        monthly_contribution: f64,
        current_year: i32,
    ) -> Result<Self> {
        let target_year = target_year_for_contribution(
            goal_cost,
            current_savings,
            annual_rate,
            monthly_contribution,
            current_year,
        )?;
        Ok(Self {
            name: name.into(),
            goal_cost,
            current_savings,
            annual_rate,
            target_year,
            monthly_contribution,
        })
    }
}

/// Default retirement goal: a multiple of annual income, reached after the
/// configured horizon at the configured rate of return.
pub fn retirement_goal(monthly_income: f64, current_year: i32, config: &PlannerConfig) -> Result<GoalPlan> {
    if !(monthly_income > 0.0) {
        return Err(ProjectionError::invalid_goal(
            "monthly_income",
            format!("must be greater than zero to size a retirement goal, got {}", monthly_income),
        ));
    }
    let goal_cost = (monthly_income * 12.0 * config.retirement_income_multiple).round();
    GoalPlan::by_target_year(
        "Retirement",
        goal_cost,
        0.0,
        config.retirement_rate_percent,
        current_year.saturating_add(config.retirement_horizon_years.min(i32::MAX as u32) as i32),
        current_year,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accounts::{AccountType, Frequency};
    use crate::projection::growth::future_value;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    #[test]
    fn test_progress_fraction() {
        assert_eq!(progress_fraction(7_500.0, 10_000.0), Ok(0.75));
        assert_eq!(progress_fraction(12_000.0, 10_000.0), Ok(1.0));
        assert_eq!(progress_fraction(0.0, 10_000.0), Ok(0.0));
    }

    #[test]
    fn test_progress_requires_positive_cost() {
        for cost in [0.0, -1.0] {
            assert!(matches!(
                progress_fraction(100.0, cost),
                Err(ProjectionError::InvalidGoal { field: "goal_cost", .. })
            ));
        }
    }

    #[test]
    fn test_goal_progress_uses_funding_account() {
        let accounts = vec![
            Account::new("Chequing", AccountType::Checking, 0.0, 900.0),
            Account::new("Savings", AccountType::HighYield, 4.0, 3_000.0),
        ];
        let goal = Goal::new("Trip", 6_000.0, 2028, "Savings");
        assert_eq!(goal_progress(&goal, &accounts), Ok(0.5));

        let orphan = Goal::new("Car", 20_000.0, 2029, "Brokerage");
        assert_eq!(goal_progress(&orphan, &accounts).unwrap_err().field(), "funding_account");
    }

    #[test]
    fn test_required_contribution_reaches_goal() {
        let c = required_monthly_contribution(50_000.0, 5_000.0, 5.0, 2031, 2026).unwrap();
        let reached = future_value(5_000.0, 5.0, 5.0, c, Frequency::Monthly);
        assert_relative_eq!(reached, 50_000.0, max_relative = 1e-9);
    }

    #[test]
    fn test_required_contribution_zero_rate() {
        // 12000 over 2 years with 2400 saved: 9600 / 24
        let c = required_monthly_contribution(12_000.0, 2_400.0, 0.0, 2028, 2026).unwrap();
        assert_abs_diff_eq!(c, 400.0, epsilon = 1e-9);
    }

    #[test]
    fn test_required_contribution_already_funded() {
        assert_eq!(required_monthly_contribution(1_000.0, 5_000.0, 3.0, 2030, 2026), Ok(0.0));
    }

    #[test]
    fn test_target_year_must_be_future() {
        let err = required_monthly_contribution(1_000.0, 0.0, 3.0, 2026, 2026).unwrap_err();
        assert!(matches!(err, ProjectionError::InvalidGoal { field: "target_year", .. }));
    }

    #[test]
    fn test_months_to_goal_inverts_contribution() {
        let c = required_monthly_contribution(30_000.0, 1_000.0, 6.0, 2030, 2026).unwrap();
        let months = months_to_goal(30_000.0, 1_000.0, 6.0, c).unwrap();
        assert_abs_diff_eq!(months, 48.0, epsilon = 1e-6);
    }

    #[test]
    fn test_months_to_goal_zero_rate() {
        assert_abs_diff_eq!(months_to_goal(10_000.0, 1_000.0, 0.0, 500.0).unwrap(), 18.0, epsilon = 1e-12);
        assert_eq!(months_to_goal(10_000.0, 10_000.0, 4.0, 0.0), Ok(0.0));
        assert_eq!(
            months_to_goal(10_000.0, 1_000.0, 4.0, 0.0).unwrap_err().field(),
            "monthly_contribution"
        );
    }

    #[test]
    fn test_target_year_for_contribution() {
        // 18 months -> two calendar years out
        assert_eq!(target_year_for_contribution(10_000.0, 1_000.0, 0.0, 500.0, 2026), Ok(2028));
        assert_eq!(target_year_for_contribution(10_000.0, 4_000.0, 0.0, 500.0, 2026), Ok(2027));
    }

    #[test]
    fn test_tiny_contribution_is_rejected() {
        let err = target_year_for_contribution(10_000.0, 0.0, 0.0, 1e-300, 2026).unwrap_err();
        assert!(matches!(err, ProjectionError::InvalidGoal { field: "monthly_contribution", .. }));
        assert!(GoalPlan::by_contribution("Car", 10_000.0, 0.0, 0.0, 1e-300, 2026).is_err());
    }

    #[test]
    fn test_distant_target_year_is_rejected() {
        let err = required_monthly_contribution(10_000.0, 0.0, 5.0, 400_000_000, 2026).unwrap_err();
        assert!(matches!(err, ProjectionError::InvalidGoal { field: "target_year", .. }));

        let err = required_monthly_contribution(10_000.0, 0.0, 5.0, i32::MAX, -5).unwrap_err();
        assert_eq!(err.field(), "target_year");
    }

    #[test]
    fn test_goal_plan_builders() {
        let plan = GoalPlan::by_contribution("Car", 10_000.0, 1_000.0, 0.0, 500.0, 2026).unwrap();
        assert_eq!(plan.target_year, 2028);

        let plan = GoalPlan::by_target_year("Car", 10_000.0, 1_000.0, 0.0, 2028, 2026).unwrap();
        assert_abs_diff_eq!(plan.monthly_contribution, 375.0, epsilon = 1e-9);
    }

    #[test]
    fn test_retirement_goal_defaults() {
        let config = PlannerConfig::default();
        let plan = retirement_goal(4_000.0, 2026, &config).unwrap();
        assert_eq!(plan.goal_cost, 1_200_000.0);
        assert_eq!(plan.target_year, 2066);
        assert_eq!(plan.annual_rate, 7.0);
        assert!(plan.monthly_contribution > 0.0);

        assert!(retirement_goal(0.0, 2026, &config).is_err());
    }
}
