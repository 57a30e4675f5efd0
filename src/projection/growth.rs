//! Compound growth of a balance with periodic contributions

use crate::accounts::Frequency;

/// Number of compounding periods per year for a contribution frequency
pub fn periods_per_year(frequency: Frequency) -> u32 {
    frequency.periods_per_year()
}

/// Interest rate applied each period, as a decimal
pub fn periodic_rate(annual_rate_percent: f64, frequency: Frequency) -> f64 {
    annual_rate_percent / 100.0 / periods_per_year(frequency) as f64
}

/// Projected balance after `periods_in_years` years.
///
/// The principal compounds at the per-period rate and each period's contribution
/// is added at the end of the period (ordinary annuity). A zero rate falls back
/// to simple accumulation. Zero or negative `periods_in_years` is not an error:
/// zero periods returns `principal` and negative periods discount it.
///
/// No validation is done here; negative inputs flow straight through.
pub fn future_value(
    principal: f64,
    annual_rate_percent: f64,
    periods_in_years: f64,
    periodic_contribution: f64,
    frequency: Frequency,
) -> f64 {
    let rate = periodic_rate(annual_rate_percent, frequency);
    let n = periods_in_years * periods_per_year(frequency) as f64;

    if rate == 0.0 {
        return principal + periodic_contribution * n;
    }

    let growth = (1.0 + rate).powf(n);
    principal * growth + periodic_contribution * ((growth - 1.0) / rate)
}

/// Future value of the principal alone, without contributions
pub fn compounded_principal(principal: f64, annual_rate_percent: f64, periods_in_years: f64, frequency: Frequency) -> f64 {
    future_value(principal, annual_rate_percent, periods_in_years, 0.0, frequency)
}

/// Sum of all contributions made over the horizon, before any growth
pub fn total_contributed(periods_in_years: f64, periodic_contribution: f64, frequency: Frequency) -> f64 {
    periodic_contribution * periods_in_years * periods_per_year(frequency) as f64
}
