use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeductionType {
    Flat,
    Percent,
}

impl std::fmt::Display for DeductionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // padded for report columns
        let label = match self {
            DeductionType::Flat => "Flat",
            DeductionType::Percent => "Percent",
        };
        f.pad(label)
    }
}

/// One organization-level deduction. Rules are kept in a `Vec` because
/// percentage rules apply to the balance left by the rules before them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct DeductionRule {
    pub name: String,
    #[serde(rename = "type")]
    pub deduction_type: DeductionType,
    pub value: f64,
}

impl DeductionRule {
    pub fn flat(name: &str, value: f64) -> Self {
        Self {
            name: name.to_string(),
            deduction_type: DeductionType::Flat,
            value,
        }
    }

    pub fn percent(name: &str, value: f64) -> Self {
        Self {
            name: name.to_string(),
            deduction_type: DeductionType::Percent,
            value,
        }
    }
}

/// How a member is paid. Exactly one mode can be active.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
#[serde(rename_all = "camelCase")]
pub enum Compensation {
    HourlyRate(f64),
    SalaryAmount(f64),
}

/// Stored pay settings as they appear on a member record.
///
/// Both fields exist on the wire; the setters keep them mutually exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct PayProfile {
    #[serde(rename = "hourlyRate", default)]
    pub hourly_rate: Option<f64>,
    #[serde(rename = "salaryAmount", default)]
    pub salary_amount: Option<f64>,
}

impl PayProfile {
    pub fn set_hourly_rate(&mut self, rate: f64) {
        self.hourly_rate = Some(rate);
        self.salary_amount = None;
    }

    pub fn set_salary_amount(&mut self, amount: f64) {
        self.salary_amount = Some(amount);
        self.hourly_rate = None;
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Active compensation mode. A salary wins if a legacy record carries both.
    pub fn compensation(&self) -> Option<Compensation> {
        match (self.salary_amount, self.hourly_rate) {
            (Some(salary), _) => Some(Compensation::SalaryAmount(salary)),
            (None, Some(rate)) => Some(Compensation::HourlyRate(rate)),
            (None, None) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct AppliedDeduction {
    pub name: String,
    #[serde(rename = "type")]
    pub deduction_type: DeductionType,
    pub value: f64,
    pub amount: f64,
}

/// Result of a payroll run.
///
/// `gross_pay` is `None` when no rate or salary is configured, and
/// `net_pay` is `None` whenever there was nothing to deduct from, so a
/// caller can tell "not configured" apart from "earned nothing".
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct PayrollSummary {
    #[serde(rename = "hoursTotal")]
    pub hours_total: f64,
    #[serde(rename = "grossPay")]
    pub gross_pay: Option<f64>,
    #[serde(rename = "netPay")]
    pub net_pay: Option<f64>,
    #[serde(rename = "appliedDeductions")]
    pub applied_deductions: Vec<AppliedDeduction>,
}

impl PayrollSummary {
    pub fn total_deductions(&self) -> f64 {
        self.applied_deductions.iter().map(|d| d.amount).sum()
    }
}
