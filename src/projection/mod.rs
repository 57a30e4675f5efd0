//! Projection engine: age, account growth, debt payoff and goal planning
//!
//! Every function here is pure. Callers pass the current date or year in
//! explicitly; nothing reads the system clock.

pub mod age;
pub mod growth;
pub mod payoff;
pub mod goals;
pub mod snapshot;

pub use age::{calculate_age, parse_date};
pub use growth::{future_value, periods_per_year};
pub use payoff::{months_to_payoff, payoff_date};
pub use goals::{
    goal_progress, months_to_goal, progress_fraction, required_monthly_contribution,
    retirement_goal, target_year_for_contribution, GoalPlan,
};
pub use snapshot::{project_account, project_accounts, AccountSnapshot, ProjectionResult};
