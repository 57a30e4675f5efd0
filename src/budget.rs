//! Monthly budget arithmetic: expense totals, ratios and paycheck allocation

use serde::{Deserialize, Serialize};

/// A named monthly expense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseLine {
    pub category: String,
    pub amount: f64,
}

impl ExpenseLine {
    pub fn new(category: impl Into<String>, amount: f64) -> Self {
        Self { category: category.into(), amount }
    }
}

/// Monthly post-tax income with fixed and variable expenses
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExpenseSheet {
    pub monthly_income: f64,
    pub fixed: Vec<ExpenseLine>,
    pub variable: Vec<ExpenseLine>,
}

/// Totals and ratios for an [`ExpenseSheet`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseSummary {
    pub total_fixed: f64,
    pub total_variable: f64,
    pub total_expenses: f64,

    /// Total expenses as percent of income; None without income
    pub expense_ratio: Option<f64>,

    /// Fixed expenses as percent of income; None without income
    pub fixed_expense_ratio: Option<f64>,

    /// Spending limit minus total expenses, when a limit was given
    pub limit_headroom: Option<f64>,
}

impl ExpenseSheet {
    /// Starting categories offered by the expense form
    pub fn with_default_categories(monthly_income: f64) -> Self {
        let fixed = ["Housing", "Utilities", "Insurance", "Transportation", "Debt Payments", "Groceries"]
            .into_iter()
            .map(|c| ExpenseLine::new(c, 0.0))
            .collect();
        Self {
            monthly_income,
            fixed,
            variable: vec![ExpenseLine::new("Fun (trips, vacations etc.)", 0.0)],
        }
    }

    /// Set a fixed expense, adding the category if it is new
    pub fn set_fixed(&mut self, category: &str, amount: f64) {
        upsert(&mut self.fixed, category, amount);
    }

    /// Set a variable expense, adding the category if it is new
    pub fn set_variable(&mut self, category: &str, amount: f64) {
        upsert(&mut self.variable, category, amount);
    }

    /// Totals and ratios, with headroom against an optional monthly limit
    pub fn summarize(&self, spending_limit: Option<f64>) -> ExpenseSummary {
        let total_fixed: f64 = self.fixed.iter().map(|e| e.amount).sum();
        let total_variable: f64 = self.variable.iter().map(|e| e.amount).sum();
        let total_expenses = total_fixed + total_variable;

        let ratio = |amount: f64| (self.monthly_income > 0.0).then(|| amount / self.monthly_income * 100.0);

        ExpenseSummary {
            total_fixed,
            total_variable,
            total_expenses,
            expense_ratio: ratio(total_expenses),
            fixed_expense_ratio: ratio(total_fixed),
            limit_headroom: spending_limit.map(|limit| limit - total_expenses),
        }
    }
}

fn upsert(lines: &mut Vec<ExpenseLine>, category: &str, amount: f64) {
    match lines.iter_mut().find(|e| e.category == category) {
        Some(line) => line.amount = amount,
        None => lines.push(ExpenseLine::new(category, amount)),
    }
}

/// Income left each month after setting aside goal contributions
pub fn remaining_after_goals(monthly_income: f64, contributions: &[f64]) -> f64 {
    monthly_income - contributions.iter().sum::<f64>()
}

/// Fraction of each paycheck sent to each allocation (0 when there is no paycheck)
pub fn allocation_shares(paycheck: f64, allocations: &[f64]) -> Vec<f64> {
    allocations
        .iter()
        .map(|&a| if paycheck > 0.0 { a / paycheck } else { 0.0 })
        .collect()
}
