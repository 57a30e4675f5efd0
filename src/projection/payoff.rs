//! Debt payoff dates by inverting the amortization formula

use chrono::{Months, NaiveDate};

use crate::error::{ProjectionError, Result};

/// Number of months (possibly fractional) to retire `principal` with a fixed
/// `monthly_payment`.
///
/// Fails when the payment is not positive, or, at a positive rate, when it does
/// not exceed the first month's interest (the balance would never shrink).
pub fn months_to_payoff(principal: f64, annual_rate_percent: f64, monthly_payment: f64) -> Result<f64> {
    if !(principal > 0.0) {
        return Err(ProjectionError::invalid_payment(
            "principal",
            format!("must be greater than zero, got {}", principal),
        ));
    }
    if !(annual_rate_percent >= 0.0) {
        return Err(ProjectionError::invalid_payment(
            "annual_rate",
            format!("must be zero or more, got {}", annual_rate_percent),
        ));
    }
    if !(monthly_payment > 0.0) {
        log::warn!("rejected non-positive monthly payment {}", monthly_payment);
        return Err(ProjectionError::invalid_payment(
            "monthly_payment",
            format!("must be greater than zero, got {}", monthly_payment),
        ));
    }

    if annual_rate_percent == 0.0 {
        return Ok(principal / monthly_payment);
    }

    let monthly_rate = annual_rate_percent / 100.0 / 12.0;
    let interest = principal * monthly_rate;
    if monthly_payment <= interest {
        log::warn!(
            "payment {:.2} does not cover monthly interest {:.2}; payoff impossible",
            monthly_payment,
            interest
        );
        return Err(ProjectionError::invalid_payment(
            "monthly_payment",
            format!(
                "{:.2} does not exceed the monthly interest charge of {:.2}",
                monthly_payment, interest
            ),
        ));
    }

    Ok((monthly_payment / (monthly_payment - interest)).ln() / (1.0 + monthly_rate).ln())
}

/// Whole months until payoff. Partial months count as a full month so the
/// reported date is never earlier than the real payoff.
pub fn whole_months_to_payoff(principal: f64, annual_rate_percent: f64, monthly_payment: f64) -> Result<u32> {
    let months = months_to_payoff(principal, annual_rate_percent, monthly_payment)?.ceil();
    if months > u32::MAX as f64 {
        return Err(ProjectionError::invalid_date(
            "payoff_date",
            format!("{} months is beyond the supported calendar range", months),
        ));
    }
    Ok((months as u32).max(1))
}

/// Calendar date by which the debt is fully repaid when the first payment is
/// made one month after `start_date`.
pub fn payoff_date(
    principal: f64,
    annual_rate_percent: f64,
    monthly_payment: f64,
    start_date: NaiveDate,
) -> Result<NaiveDate> {
    let months = whole_months_to_payoff(principal, annual_rate_percent, monthly_payment)?;
    log::debug!("debt of {:.2} at {}% retired in {} months", principal, annual_rate_percent, months);

    start_date.checked_add_months(Months::new(months)).ok_or_else(|| {
        ProjectionError::invalid_date(
            "payoff_date",
            format!("{} plus {} months is beyond the supported calendar range", start_date, months),
        )
    })
}

/// Total interest paid over the life of the debt, assuming the final payment
/// only covers what is left.
pub fn total_interest(principal: f64, annual_rate_percent: f64, monthly_payment: f64) -> Result<f64> {
    let months = whole_months_to_payoff(principal, annual_rate_percent, monthly_payment)?;
    if annual_rate_percent == 0.0 {
        return Ok(0.0);
    }
    let monthly_rate = annual_rate_percent / 100.0 / 12.0;

    let mut balance = principal;
    let mut interest_paid = 0.0;
    for _ in 0..months {
        let interest = balance * monthly_rate;
        interest_paid += interest;
        balance = (balance + interest - monthly_payment).max(0.0);
        if balance <= 0.0 {
            break;
        }
    }

    Ok(interest_paid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_zero_rate_even_division() {
        assert_eq!(payoff_date(5_000.0, 0.0, 500.0, date(2024, 1, 1)), Ok(date(2024, 11, 1)));
    }

    #[test]
    fn test_zero_rate_rounds_up() {
        // 1000 / 300 = 3.33 months -> 4
        assert_eq!(whole_months_to_payoff(1_000.0, 0.0, 300.0), Ok(4));
        assert_eq!(payoff_date(1_000.0, 0.0, 300.0, date(2024, 1, 31)), Ok(date(2024, 5, 31)));
    }

    #[test]
    fn test_payment_covering_balance_pays_off_next_month() {
        assert_eq!(payoff_date(400.0, 0.0, 1_000.0, date(2024, 1, 15)), Ok(date(2024, 2, 15)));
        assert_eq!(whole_months_to_payoff(400.0, 18.0, 1_000.0), Ok(1));
    }

    #[test]
    fn test_positive_rate_matches_amortization() {
        // 10000 at 12% with 200/month
        let months = months_to_payoff(10_000.0, 12.0, 200.0).unwrap();
        assert_abs_diff_eq!(months, (2.0_f64).ln() / (1.01_f64).ln(), epsilon = 1e-9);
        assert_eq!(whole_months_to_payoff(10_000.0, 12.0, 200.0), Ok(70));
        assert_eq!(payoff_date(10_000.0, 12.0, 200.0, date(2024, 1, 1)), Ok(date(2029, 11, 1)));
    }

    #[test]
    fn test_payment_below_interest_fails() {
        let err = payoff_date(10_000.0, 12.0, 90.0, date(2024, 1, 1)).unwrap_err();
        assert!(matches!(err, ProjectionError::InvalidPayment { field: "monthly_payment", .. }));
    }

    #[test]
    fn test_payment_equal_to_interest_fails() {
        assert!(payoff_date(10_000.0, 12.0, 100.0, date(2024, 1, 1)).is_err());
    }

    #[test]
    fn test_non_positive_payment_fails() {
        for payment in [0.0, -50.0] {
            let err = months_to_payoff(1_000.0, 0.0, payment).unwrap_err();
            assert_eq!(err.field(), "monthly_payment");
        }
    }

    #[test]
    fn test_date_is_always_after_start() {
        let start = date(2024, 6, 30);
        for (p, r, pay) in [(100.0, 0.0, 100.0), (2_500.0, 19.99, 75.0), (250_000.0, 5.5, 1_600.0)] {
            assert!(payoff_date(p, r, pay, start).unwrap() > start);
        }
    }

    #[test]
    fn test_rounding_never_under_reports() {
        // Simulate month by month and check the balance is cleared by the reported count
        let (principal, rate, payment) = (3_750.0, 22.9, 140.0);
        let months = whole_months_to_payoff(principal, rate, payment).unwrap();
        let monthly_rate = rate / 100.0 / 12.0;
        let mut balance = principal;
        for _ in 0..months {
            balance = balance * (1.0 + monthly_rate) - payment;
        }
        assert!(balance <= 1e-6);
    }

    #[test]
    fn test_total_interest() {
        assert_eq!(total_interest(5_000.0, 0.0, 500.0), Ok(0.0));
        // Four billion zero-rate months, no month-by-month loop
        assert_eq!(total_interest(4e9, 0.0, 1.0), Ok(0.0));
        // One month at 1%: 1000 * 0.01
        assert_abs_diff_eq!(total_interest(1_000.0, 12.0, 2_000.0).unwrap(), 10.0, epsilon = 1e-9);
    }
}
