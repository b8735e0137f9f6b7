mod engine;
mod format;
mod types;
mod validate;

pub use engine::{contribution_interval_periods, period_rate, project, project_schedule};
pub use format::format_currency;
pub use types::{CompoundFrequency, MAX_FIRE_AGE, PeriodPoint, ProjectionInput, ProjectionResult};
pub use validate::{
    InputField, ValidationError, validate_age, validate_amount, validate_annual_rate,
    validate_input, validate_invest_interval, validate_target_amount, whole_field_value,
};
