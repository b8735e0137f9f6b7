use std::fmt;

use super::types::ProjectionInput;

pub const MIN_AGE: u32 = 1;
pub const MAX_AGE: u32 = 100;
pub const MIN_FIRE_AMOUNT: f64 = 100_000.0;
pub const MAX_INVEST_INTERVAL: u32 = 12;
pub const MAX_ANNUAL_PERCENTAGE: f64 = 100.0;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum InputField {
    CurrentAge,
    FireAmount,
    CurrentAmount,
    RegularlyInvestment,
    InvestInterval,
    AnnualPercentage,
}

impl InputField {
    /// Word used at the start of rejection messages.
    pub fn label(self) -> &'static str {
        match self {
            InputField::CurrentAge => "Age",
            InputField::FireAmount | InputField::CurrentAmount | InputField::RegularlyInvestment => {
                "Amount"
            }
            InputField::InvestInterval => "Interval",
            InputField::AnnualPercentage => "Rate",
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            InputField::CurrentAge => "currentAge",
            InputField::FireAmount => "fireAmount",
            InputField::CurrentAmount => "currentAmount",
            InputField::RegularlyInvestment => "regularlyInvestment",
            InputField::InvestInterval => "investInterval",
            InputField::AnnualPercentage => "annualPercentage",
        }
    }
}

impl fmt::Display for InputField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("{field} must be at least {min}.")]
    BelowMinimum { field: InputField, min: f64 },
    #[error("{field} must be at most {max}.")]
    AboveMaximum { field: InputField, max: f64 },
    #[error("{field} must be a finite number.")]
    NotFinite { field: InputField },
    #[error("{field} must be a whole number.")]
    NotWholeNumber { field: InputField },
}

impl ValidationError {
    pub fn field(&self) -> InputField {
        match self {
            ValidationError::BelowMinimum { field, .. }
            | ValidationError::AboveMaximum { field, .. }
            | ValidationError::NotFinite { field }
            | ValidationError::NotWholeNumber { field } => *field,
        }
    }
}

fn check_range(
    field: InputField,
    value: f64,
    min: f64,
    max: Option<f64>,
) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NotFinite { field });
    }
    if value < min {
        return Err(ValidationError::BelowMinimum { field, min });
    }
    match max {
        Some(max) if value > max => Err(ValidationError::AboveMaximum { field, max }),
        _ => Ok(()),
    }
}

pub fn validate_age(age: u32) -> Result<(), ValidationError> {
    check_range(
        InputField::CurrentAge,
        f64::from(age),
        f64::from(MIN_AGE),
        Some(f64::from(MAX_AGE)),
    )
}

pub fn validate_target_amount(amount: f64) -> Result<(), ValidationError> {
    check_range(InputField::FireAmount, amount, MIN_FIRE_AMOUNT, None)
}

/// Non-negative amount check shared by the current balance and the
/// recurring contribution.
pub fn validate_amount(field: InputField, amount: f64) -> Result<(), ValidationError> {
    check_range(field, amount, 0.0, None)
}

pub fn validate_invest_interval(months: u32) -> Result<(), ValidationError> {
    check_range(
        InputField::InvestInterval,
        f64::from(months),
        0.0,
        Some(f64::from(MAX_INVEST_INTERVAL)),
    )
}

pub fn validate_annual_rate(percentage: f64) -> Result<(), ValidationError> {
    check_range(
        InputField::AnnualPercentage,
        percentage,
        0.0,
        Some(MAX_ANNUAL_PERCENTAGE),
    )
}

/// Converts a raw number for an integer field (age or interval), applying
/// the field's bounds before checking that it is whole.
pub fn whole_field_value(field: InputField, value: f64) -> Result<u32, ValidationError> {
    let (min, max) = match field {
        InputField::CurrentAge => (MIN_AGE, MAX_AGE),
        InputField::InvestInterval => (0, MAX_INVEST_INTERVAL),
        _ => (0, u32::MAX),
    };
    check_range(field, value, f64::from(min), Some(f64::from(max)))?;
    if value.fract() != 0.0 {
        return Err(ValidationError::NotWholeNumber { field });
    }
    Ok(value as u32)
}

/// Applies every field rule in input order and reports the first violation.
pub fn validate_input(input: &ProjectionInput) -> Result<(), ValidationError> {
    validate_age(input.current_age)?;
    validate_target_amount(input.fire_amount)?;
    validate_amount(InputField::CurrentAmount, input.current_amount)?;
    validate_amount(InputField::RegularlyInvestment, input.regularly_investment)?;
    validate_invest_interval(input.invest_interval)?;
    validate_annual_rate(input.annual_percentage)?;
    Ok(())
}
