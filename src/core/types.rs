use serde::Serialize;

/// Age ceiling past which a projection is not evaluated.
pub const MAX_FIRE_AGE: u32 = 70;

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CompoundFrequency {
    Annual,
    Quarter,
    #[default]
    Month,
}

impl CompoundFrequency {
    /// Parses a frequency label. Anything other than `annual` or `quarter`
    /// compounds monthly.
    pub fn from_label(label: &str) -> Self {
        match label {
            "annual" => CompoundFrequency::Annual,
            "quarter" => CompoundFrequency::Quarter,
            _ => CompoundFrequency::Month,
        }
    }

    pub fn periods_per_year(self) -> u32 {
        match self {
            CompoundFrequency::Annual => 1,
            CompoundFrequency::Quarter => 4,
            CompoundFrequency::Month => 12,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProjectionInput {
    pub current_age: u32,
    pub fire_amount: f64,
    pub current_amount: f64,
    pub regularly_investment: f64,
    /// Months between contributions; 0 means no recurring contribution.
    pub invest_interval: u32,
    /// Annual growth in percentage points, e.g. 5 for 5%.
    pub annual_percentage: f64,
    pub compound_frequency: CompoundFrequency,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionResult {
    pub can_reach: bool,
    pub age_reached: Option<f64>,
    pub final_amount: f64,
}

impl ProjectionResult {
    pub(crate) fn reached(age: f64, amount: f64) -> Self {
        Self {
            can_reach: true,
            age_reached: Some(age),
            final_amount: amount,
        }
    }

    pub(crate) fn unreachable(amount: f64) -> Self {
        Self {
            can_reach: false,
            age_reached: None,
            final_amount: amount,
        }
    }
}

/// Balance after one compounding period.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodPoint {
    pub period: u32,
    pub age: f64,
    pub contribution: f64,
    pub balance: f64,
}
