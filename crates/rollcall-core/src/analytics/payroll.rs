//! Gross-to-net pay with ordered deductions.

use tracing::debug;

use crate::error::{EngineError, Result};
use crate::models::{AppliedDeduction, Compensation, DeductionRule, DeductionType, PayrollSummary};

/// Round to cents
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Compute gross pay, each deduction and net pay.
///
/// Deductions run in list order against a running balance that starts at
/// gross pay: a percentage rule takes its share of whatever the earlier
/// rules left, not of the original gross. Every amount is rounded to cents
/// as it is taken.
///
/// With no compensation configured both pay fields are `None`. With a
/// configured rate that yields zero gross, nothing is deducted and net pay
/// stays `None`.
pub fn compute_payroll(
    hours_total: f64,
    compensation: Option<&Compensation>,
    deductions: &[DeductionRule],
) -> Result<PayrollSummary> {
    if hours_total < 0.0 || !hours_total.is_finite() {
        return Err(EngineError::InvalidHoursTotal(hours_total));
    }

    let gross_pay = match compensation {
        Some(Compensation::HourlyRate(rate)) => {
            validate_amount(*rate)?;
            Some(round2(hours_total * rate))
        }
        Some(Compensation::SalaryAmount(salary)) => {
            validate_amount(*salary)?;
            Some(round2(*salary))
        }
        None => None,
    };

    let gross = match gross_pay {
        Some(gross) if gross != 0.0 => gross,
        _ => {
            debug!(hours_total, ?gross_pay, "No pay to deduct from, skipping deductions");
            return Ok(PayrollSummary {
                hours_total,
                gross_pay,
                net_pay: None,
                applied_deductions: Vec::new(),
            });
        }
    };

    let mut running_net = gross;
    let mut applied_deductions = Vec::with_capacity(deductions.len());
    for rule in deductions {
        if rule.value < 0.0 || !rule.value.is_finite() {
            return Err(EngineError::InvalidDeduction {
                name: rule.name.clone(),
                value: rule.value,
            });
        }
        let amount = match rule.deduction_type {
            DeductionType::Flat => round2(rule.value),
            DeductionType::Percent => round2(running_net * rule.value / 100.0),
        };
        running_net = round2(running_net - amount);
        applied_deductions.push(AppliedDeduction {
            name: rule.name.clone(),
            deduction_type: rule.deduction_type,
            value: rule.value,
            amount,
        });
    }

    Ok(PayrollSummary {
        hours_total,
        gross_pay,
        net_pay: Some(running_net),
        applied_deductions,
    })
}

fn validate_amount(amount: f64) -> Result<()> {
    if amount < 0.0 || !amount.is_finite() {
        return Err(EngineError::InvalidRate(amount));
    }
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
