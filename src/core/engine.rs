use super::types::{MAX_FIRE_AGE, PeriodPoint, ProjectionInput, ProjectionResult};

/// Projects the balance forward until it reaches `fire_amount` or the age
/// ceiling is passed.
pub fn project(input: &ProjectionInput) -> ProjectionResult {
    if input.current_amount >= input.fire_amount {
        return ProjectionResult::reached(f64::from(input.current_age), input.current_amount);
    }

    let mut balance = input.current_amount;
    for point in Simulation::new(input) {
        if point.balance >= input.fire_amount {
            return ProjectionResult::reached(point.age, point.balance);
        }
        balance = point.balance;
    }
    ProjectionResult::unreachable(balance)
}

/// Every simulated period up to and including the one where the projection
/// stopped. Empty when the target is already met.
pub fn project_schedule(input: &ProjectionInput) -> Vec<PeriodPoint> {
    if input.current_amount >= input.fire_amount {
        return Vec::new();
    }

    let mut rows = Vec::new();
    for point in Simulation::new(input) {
        rows.push(point);
        if point.balance >= input.fire_amount {
            break;
        }
    }
    rows
}

/// Effective per-period rate that compounds back to `annual_percentage` over
/// one year.
pub fn period_rate(annual_percentage: f64, periods_per_year: u32) -> f64 {
    (1.0 + annual_percentage / 100.0).powf(1.0 / f64::from(periods_per_year)) - 1.0
}

/// Contribution interval converted from months to compounding periods.
/// `None` when it rounds to zero, in which case nothing is contributed.
pub fn contribution_interval_periods(invest_interval: u32, periods_per_year: u32) -> Option<u32> {
    let months_per_period = 12.0 / f64::from(periods_per_year);
    let periods = (f64::from(invest_interval) / months_per_period).round();
    (periods >= 1.0).then_some(periods as u32)
}

fn is_contribution_period(period: u32, every: Option<u32>) -> bool {
    period != 0 && every.is_some_and(|n| period % n == 0)
}

fn age_at(start_age: f64, period: u32, periods_per_year: u32) -> f64 {
    start_age + f64::from(period) / f64::from(periods_per_year)
}

#[derive(Debug, Clone)]
struct Simulation {
    start_age: f64,
    periods_per_year: u32,
    growth: f64,
    contribution: f64,
    contribution_every: Option<u32>,
    balance: f64,
    period: u32,
}

impl Simulation {
    fn new(input: &ProjectionInput) -> Self {
        let periods_per_year = input.compound_frequency.periods_per_year();
        Self {
            start_age: f64::from(input.current_age),
            periods_per_year,
            growth: 1.0 + period_rate(input.annual_percentage, periods_per_year),
            contribution: input.regularly_investment,
            contribution_every: contribution_interval_periods(
                input.invest_interval,
                periods_per_year,
            ),
            balance: input.current_amount,
            period: 0,
        }
    }
}

impl Iterator for Simulation {
    type Item = PeriodPoint;

    fn next(&mut self) -> Option<PeriodPoint> {
        let age = age_at(self.start_age, self.period, self.periods_per_year);
        if age > f64::from(MAX_FIRE_AGE) {
            return None;
        }

        let contribution = if is_contribution_period(self.period, self.contribution_every) {
            self.contribution
        } else {
            0.0
        };
        self.balance = (self.balance + contribution) * self.growth;

        let point = PeriodPoint {
            period: self.period,
            age,
            contribution,
            balance: self.balance,
        };
        self.period += 1;
        Some(point)
    }
}
