//! Finplan Engine - projection library behind the personal-finance planning tools
//!
//! This library provides:
//! - Age from a birth date
//! - Future value of accounts with periodic contributions
//! - Debt payoff dates from a fixed monthly payment
//! - Goal progress and contribution planning
//! - Expense summaries and paycheck allocation
//! - Batch account snapshots

pub mod error;
pub mod accounts;
pub mod projection;
pub mod budget;
pub mod config;
pub mod scenario;

// Re-export commonly used types
pub use error::{ProjectionError, Result};
pub use accounts::{Account, AccountType, ContributionPlan, Debt, Frequency, Goal};
pub use projection::{
    calculate_age, future_value, payoff_date, periods_per_year, progress_fraction, AccountSnapshot,
    GoalPlan, ProjectionResult,
};
pub use budget::{ExpenseLine, ExpenseSheet, ExpenseSummary};
pub use config::PlannerConfig;
pub use scenario::SnapshotRunner;
