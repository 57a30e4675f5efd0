//! Finplan CLI
//!
//! Command-line front end for the projection engine. Reads the current date
//! once, here, and passes it to the engine explicitly.

use anyhow::{anyhow, bail, Context, Result};
use chrono::{Datelike, Local, NaiveDate};
use clap::{Args, Parser, Subcommand};
use finplan_engine::{
    accounts::{load_accounts, load_debts, load_goals},
    budget::{remaining_after_goals, ExpenseSheet},
    projection::{self, GoalPlan},
    Frequency, PlannerConfig, SnapshotRunner,
};
use serde::Serialize;
use serde_json::json;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "finplan", version, about = "Personal-finance projections")]
struct Cli {
    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Planner config file (JSON); PLANNER_* environment variables override it
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Reference date used as "today" (YYYY-MM-DD)
    #[arg(long, global = true)]
    today: Option<NaiveDate>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Age in whole years
    Age {
        /// Birth date (YYYY-MM-DD)
        birth_date: NaiveDate,
    },
    /// Future value of a balance with periodic contributions
    FutureValue {
        #[arg(long)]
        principal: f64,
        /// Annual rate in percent
        #[arg(long)]
        rate: f64,
        #[arg(long)]
        years: f64,
        /// Contribution per period
        #[arg(long, default_value_t = 0.0)]
        contribution: f64,
        #[arg(long, default_value = "monthly")]
        frequency: Frequency,
    },
    /// Date a debt is paid off
    Payoff {
        #[arg(long)]
        principal: f64,
        /// Annual rate in percent
        #[arg(long)]
        rate: f64,
        #[arg(long)]
        payment: f64,
        /// First month of repayment (defaults to today)
        #[arg(long)]
        start: Option<NaiveDate>,
    },
    /// Share of a goal covered by a balance
    Progress {
        #[arg(long)]
        balance: f64,
        #[arg(long)]
        cost: f64,
    },
    /// Plan a goal by target year or by monthly contribution
    Goal(GoalArgs),
    /// Default retirement goal from monthly income
    Retirement {
        #[arg(long)]
        income: f64,
    },
    /// Project accounts from a CSV file to a future year
    Snapshot {
        /// Accounts CSV (Name,Type,AnnualRate,Balance,Contribution,Frequency)
        #[arg(long, default_value = finplan_engine::accounts::loader::DEFAULT_ACCOUNTS_PATH)]
        accounts: PathBuf,
        /// One or more snapshot years
        #[arg(long, num_args = 1.., required = true)]
        year: Vec<i32>,
    },
    /// Payoff dates for every debt in a CSV file
    Debts {
        /// Debts CSV (Name,Principal,AnnualRate,MonthlyPayment)
        #[arg(long)]
        debts: PathBuf,
        /// First month of repayment (defaults to today)
        #[arg(long)]
        start: Option<NaiveDate>,
    },
    /// Progress of every goal in a CSV file against its funding account
    Goals {
        /// Goals CSV (Name,TargetCost,TargetYear,FundingAccount)
        #[arg(long)]
        goals: PathBuf,
        #[arg(long, default_value = finplan_engine::accounts::loader::DEFAULT_ACCOUNTS_PATH)]
        accounts: PathBuf,
    },
    /// Summarize monthly expenses
    Budget {
        #[arg(long)]
        income: f64,
        /// Fixed expense as CATEGORY=AMOUNT (repeatable)
        #[arg(long = "fixed", value_parser = parse_expense)]
        fixed: Vec<(String, f64)>,
        /// Variable expense as CATEGORY=AMOUNT (repeatable)
        #[arg(long = "variable", value_parser = parse_expense)]
        variable: Vec<(String, f64)>,
        /// Monthly spending limit to compare against
        #[arg(long)]
        limit: Option<f64>,
        /// Monthly goal contributions to subtract from income (repeatable)
        #[arg(long = "goal-contribution")]
        goal_contributions: Vec<f64>,
    },
}

#[derive(Debug, Args)]
struct GoalArgs {
    #[arg(long, default_value = "Goal")]
    name: String,
    #[arg(long)]
    cost: f64,
    /// Amount already saved
    #[arg(long, default_value_t = 0.0)]
    savings: f64,
    /// Annual rate in percent (defaults to the configured goal rate)
    #[arg(long)]
    rate: Option<f64>,
    #[arg(long, conflicts_with = "contribution", required_unless_present = "contribution")]
    target_year: Option<i32>,
    /// Monthly contribution
    #[arg(long)]
    contribution: Option<f64>,
}

fn parse_expense(s: &str) -> std::result::Result<(String, f64), String> {
    let (category, amount) = s
        .rsplit_once('=')
        .ok_or_else(|| format!("expected CATEGORY=AMOUNT, got '{}'", s))?;
    let amount = amount
        .trim()
        .parse::<f64>()
        .map_err(|e| format!("bad amount in '{}': {}", s, e))?;
    Ok((category.trim().to_string(), amount))
}

fn load_config(path: Option<&PathBuf>) -> Result<PlannerConfig> {
    let base = match path {
        Some(path) => PlannerConfig::from_json_path(path)
            .map_err(|e| anyhow!(e))
            .with_context(|| format!("reading config {}", path.display()))?,
        None => PlannerConfig::default(),
    };
    base.with_env_overrides()
        .map_err(|e| anyhow!(e))
        .context("applying PLANNER_* overrides")
}

fn emit<T: Serialize>(json_output: bool, value: &T, text: impl FnOnce() -> String) -> Result<()> {
    if json_output {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        println!("{}", text());
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let today = cli.today.unwrap_or_else(|| Local::now().date_naive());
    let current_year = today.year();
    let config = load_config(cli.config.as_ref())?;
    log::debug!("today={} config={:?}", today, config);

    match cli.command {
        Command::Age { birth_date } => {
            let age = projection::calculate_age(birth_date, today)?;
            emit(cli.json, &json!({ "age": age }), || format!("Age: {}", age))?;
        }

        Command::FutureValue { principal, rate, years, contribution, frequency } => {
            let value = projection::future_value(principal, rate, years, contribution, frequency);
            emit(cli.json, &json!({ "projected_value": value }), || {
                format!(
                    "Projected value after {} years ({}, {} periods/yr): ${:.2}",
                    years,
                    frequency,
                    frequency.periods_per_year(),
                    value
                )
            })?;
        }

        Command::Payoff { principal, rate, payment, start } => {
            let start = start.unwrap_or(today);
            let months = projection::payoff::whole_months_to_payoff(principal, rate, payment)?;
            let date = projection::payoff_date(principal, rate, payment, start)?;
            let interest = projection::payoff::total_interest(principal, rate, payment)?;
            emit(
                cli.json,
                &json!({ "payoff_date": date, "months": months, "total_interest": interest }),
                || format!("Paid off by {} ({} months, ${:.2} interest)", date, months, interest),
            )?;
        }

        Command::Progress { balance, cost } => {
            let fraction = projection::progress_fraction(balance, cost)?;
            emit(cli.json, &json!({ "progress": fraction }), || {
                format!("Progress: {:.1}%", fraction * 100.0)
            })?;
        }

        Command::Goal(args) => {
            let rate = args.rate.unwrap_or(config.default_goal_rate_percent);
            let plan = match (args.target_year, args.contribution) {
                (Some(year), _) => {
                    GoalPlan::by_target_year(args.name, args.cost, args.savings, rate, year, current_year)?
                }
                (None, Some(c)) => {
                    GoalPlan::by_contribution(args.name, args.cost, args.savings, rate, c, current_year)?
                }
                (None, None) => bail!("either --target-year or --contribution is required"),
            };
            emit(cli.json, &plan, || describe_plan(&plan))?;
        }

        Command::Retirement { income } => {
            let runner = SnapshotRunner::with_config(current_year, config);
            let plan = runner.retirement_goal(income)?;
            emit(cli.json, &plan, || describe_plan(&plan))?;
        }

        Command::Snapshot { accounts, year } => {
            let loaded = load_accounts(&accounts)
                .map_err(|e| anyhow!(e))
                .with_context(|| format!("loading accounts from {}", accounts.display()))?;
            let runner = SnapshotRunner::with_config(current_year, config);
            let snapshots = runner.run_years(&loaded, &year)?;

            emit(cli.json, &snapshots, || {
                let mut out = String::new();
                for snapshot in &snapshots {
                    out.push_str(&format!("Projected account values in {}:\n", snapshot.snapshot_year));
                    for row in &snapshot.accounts {
                        out.push_str(&format!("  {:<20} ${:>14.2}\n", row.name, row.projected_value));
                    }
                    out.push_str(&format!("  {:<20} ${:>14.2}\n", "Total", snapshot.total_value()));
                }
                out.trim_end().to_string()
            })?;
        }

        Command::Debts { debts, start } => {
            let start = start.unwrap_or(today);
            let loaded = load_debts(&debts)
                .map_err(|e| anyhow!(e))
                .with_context(|| format!("loading debts from {}", debts.display()))?;

            let mut rows = Vec::with_capacity(loaded.len());
            for debt in &loaded {
                let date = debt
                    .payoff_date(start)
                    .with_context(|| format!("debt '{}'", debt.name))?;
                rows.push(json!({ "name": debt.name, "payoff_date": date }));
            }

            emit(cli.json, &rows, || {
                loaded
                    .iter()
                    .zip(&rows)
                    .map(|(debt, row)| format!("  {:<20} {}", debt.name, row["payoff_date"].as_str().unwrap_or("")))
                    .collect::<Vec<_>>()
                    .join("\n")
            })?;
        }

        Command::Goals { goals, accounts } => {
            let goal_list = load_goals(&goals)
                .map_err(|e| anyhow!(e))
                .with_context(|| format!("loading goals from {}", goals.display()))?;
            let account_list = load_accounts(&accounts)
                .map_err(|e| anyhow!(e))
                .with_context(|| format!("loading accounts from {}", accounts.display()))?;

            let mut rows = Vec::with_capacity(goal_list.len());
            for goal in &goal_list {
                goal.validate(current_year)?;
                let fraction = projection::goal_progress(goal, &account_list)?;
                rows.push((goal.name.clone(), goal.target_year, fraction));
            }

            emit(cli.json, &rows, || {
                rows.iter()
                    .map(|(name, year, fraction)| format!("  {:<20} {} {:>6.1}%", name, year, fraction * 100.0))
                    .collect::<Vec<_>>()
                    .join("\n")
            })?;
        }

        Command::Budget { income, fixed, variable, limit, goal_contributions } => {
            let mut sheet = ExpenseSheet { monthly_income: income, ..Default::default() };
            for (category, amount) in &fixed {
                sheet.set_fixed(category, *amount);
            }
            for (category, amount) in &variable {
                sheet.set_variable(category, *amount);
            }
            let summary = sheet.summarize(limit);
            let remaining = remaining_after_goals(income, &goal_contributions);
            if summary.total_expenses <= 0.0 {
                log::warn!("no expenses entered; ratios are all zero");
            }

            emit(
                cli.json,
                &json!({ "summary": summary, "remaining_after_goals": remaining }),
                || {
                    let pct = |r: Option<f64>| r.map(|v| format!("{:.2}%", v)).unwrap_or_else(|| "n/a".into());
                    let mut out = format!(
                        "Total expenses: ${:.2} ({} of income)\nFixed expenses: ${:.2} ({} of income)\nVariable expenses: ${:.2}\nLeft after goals: ${:.2}",
                        summary.total_expenses,
                        pct(summary.expense_ratio),
                        summary.total_fixed,
                        pct(summary.fixed_expense_ratio),
                        summary.total_variable,
                        remaining,
                    );
                    if let Some(headroom) = summary.limit_headroom {
                        out.push_str(&format!("\nHeadroom under limit: ${:.2}", headroom));
                    }
                    out
                },
            )?;
        }
    }

    Ok(())
}

fn describe_plan(plan: &GoalPlan) -> String {
    format!(
        "{}: ${:.0} by {} with ${:.0}/month (starting from ${:.0} at {}%)",
        plan.name,
        plan.goal_cost,
        plan.target_year,
        plan.monthly_contribution.round(),
        plan.current_savings,
        plan.annual_rate
    )
}
