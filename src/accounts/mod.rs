//! Account, debt and goal records plus CSV loading

mod data;
pub mod loader;

pub use data::{Account, AccountType, ContributionPlan, Debt, Frequency, Goal};
pub use loader::{load_accounts, load_accounts_from_reader, load_debts, load_default_accounts, load_goals};
