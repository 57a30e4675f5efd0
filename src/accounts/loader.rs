//! Load accounts, debts and goals from CSV

use super::{Account, AccountType, ContributionPlan, Debt, Frequency, Goal};
use csv::Reader;
use std::error::Error;
use std::io::Read;
use std::path::Path;

type LoadResult<T> = Result<T, Box<dyn Error + Send + Sync>>;

/// Default path to the sample account list
pub const DEFAULT_ACCOUNTS_PATH: &str = "data/accounts.csv";

/// Raw CSV row for accounts.csv
#[derive(Debug, serde::Deserialize)]
struct AccountRow {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Type")]
    account_type: String,
    #[serde(rename = "AnnualRate")]
    annual_rate: f64,
    #[serde(rename = "Balance")]
    balance: f64,
    #[serde(rename = "Contribution", default)]
    contribution: Option<f64>,
    #[serde(rename = "Frequency", default)]
    frequency: Option<String>,
}

impl AccountRow {
    fn into_account(self) -> LoadResult<Account> {
        let account_type: AccountType = self.account_type.parse()?;

        let contribution = match (self.contribution, self.frequency.as_deref()) {
            (None, _) => None,
            (Some(amount), None) => Some(ContributionPlan::new(amount, Frequency::Monthly)),
            (Some(amount), Some(freq)) => Some(ContributionPlan::new(amount, freq.parse()?)),
        };

        let account = Account {
            name: self.name,
            account_type,
            annual_rate: self.annual_rate,
            balance: self.balance,
            contribution,
        };
        account.validate()?;
        Ok(account)
    }
}

/// Raw CSV row for debts.csv
#[derive(Debug, serde::Deserialize)]
struct DebtRow {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Principal")]
    principal: f64,
    #[serde(rename = "AnnualRate")]
    annual_rate: f64,
    #[serde(rename = "MonthlyPayment")]
    monthly_payment: f64,
}

/// Raw CSV row for goals.csv
#[derive(Debug, serde::Deserialize)]
struct GoalRow {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "TargetCost")]
    target_cost: f64,
    #[serde(rename = "TargetYear")]
    target_year: i32,
    #[serde(rename = "FundingAccount")]
    funding_account: String,
}

/// Load all accounts from a CSV file
pub fn load_accounts<P: AsRef<Path>>(path: P) -> LoadResult<Vec<Account>> {
    let file = std::fs::File::open(path)?;
    load_accounts_from_reader(file)
}

/// Load accounts from any reader (e.g., string buffer, stdin)
pub fn load_accounts_from_reader<R: Read>(reader: R) -> LoadResult<Vec<Account>> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut accounts = Vec::new();

    for result in csv_reader.deserialize() {
        let row: AccountRow = result?;
        accounts.push(row.into_account()?);
    }

    log::debug!("loaded {} accounts", accounts.len());
    Ok(accounts)
}

/// Load the sample accounts from data/accounts.csv
pub fn load_default_accounts() -> LoadResult<Vec<Account>> {
    load_accounts(DEFAULT_ACCOUNTS_PATH)
}

/// Load all debts from a CSV file
pub fn load_debts<P: AsRef<Path>>(path: P) -> LoadResult<Vec<Debt>> {
    let file = std::fs::File::open(path)?;
    load_debts_from_reader(file)
}

/// Load all goals from a CSV file
pub fn load_goals<P: AsRef<Path>>(path: P) -> LoadResult<Vec<Goal>> {
    let file = std::fs::File::open(path)?;
    load_goals_from_reader(file)
}

/// Load debts from any reader
pub fn load_debts_from_reader<R: Read>(reader: R) -> LoadResult<Vec<Debt>> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut debts = Vec::new();

    for result in csv_reader.deserialize() {
        let row: DebtRow = result?;
        let debt = Debt::new(row.name, row.principal, row.annual_rate, row.monthly_payment);
        debt.validate()?;
        debts.push(debt);
    }

    Ok(debts)
}

/// Load goals from any reader. Goals are not validated here since
/// validation depends on the caller's current year.
pub fn load_goals_from_reader<R: Read>(reader: R) -> LoadResult<Vec<Goal>> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut goals = Vec::new();

    for result in csv_reader.deserialize() {
        let row: GoalRow = result?;
        goals.push(Goal::new(row.name, row.target_cost, row.target_year, row.funding_account));
    }

    Ok(goals)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_default_accounts() {
        let accounts = load_default_accounts().expect("Failed to load accounts");
        assert_eq!(accounts.len(), 4);

        let tfsa = accounts.iter().find(|a| a.name == "TFSA").unwrap();
        assert_eq!(tfsa.account_type, AccountType::Registered);
        assert_eq!(tfsa.contribution.unwrap().frequency, Frequency::BiWeekly);

        let chequing = &accounts[0];
        assert!(chequing.contribution.is_none());
    }

    #[test]
    fn test_contribution_defaults_to_monthly() {
        let csv = "Name,Type,AnnualRate,Balance,Contribution,Frequency\n\
                   Savings,savings,2.0,500,100,\n";
        let accounts = load_accounts_from_reader(csv.as_bytes()).unwrap();
        assert_eq!(accounts[0].contribution, Some(ContributionPlan::new(100.0, Frequency::Monthly)));
    }

    #[test]
    fn test_rejects_unknown_type() {
        let csv = "Name,Type,AnnualRate,Balance\nWallet,crypto,0,10\n";
        let err = load_accounts_from_reader(csv.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("Unknown account type"));
    }

    #[test]
    fn test_rejects_negative_balance() {
        let csv = "Name,Type,AnnualRate,Balance\nChecking,checking,0,-1\n";
        assert!(load_accounts_from_reader(csv.as_bytes()).is_err());
    }

    #[test]
    fn test_load_debts_and_goals() {
        let debts = "Name,Principal,AnnualRate,MonthlyPayment\nCar,12000,6.5,400\n";
        let debts = load_debts_from_reader(debts.as_bytes()).unwrap();
        assert_eq!(debts[0], Debt::new("Car", 12_000.0, 6.5, 400.0));

        let goals = "Name,TargetCost,TargetYear,FundingAccount\nTrip,5000,2028,Savings\n";
        let goals = load_goals_from_reader(goals.as_bytes()).unwrap();
        assert_eq!(goals[0].funding_account, "Savings");
        assert_eq!(goals[0].target_year, 2028);
    }

    #[test]
    fn test_rejects_non_positive_debt_payment() {
        for payment in ["0", "-100"] {
            let csv = format!("Name,Principal,AnnualRate,MonthlyPayment\nCard,2500,19.9,{}\n", payment);
            let err = load_debts_from_reader(csv.as_bytes()).unwrap_err();
            assert!(err.to_string().contains("monthly_payment"), "unexpected error: {}", err);
        }
    }
}
