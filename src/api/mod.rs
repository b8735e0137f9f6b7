use axum::{
    Router,
    extract::{
        Json, Query,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, SocketAddr};
use tokio::net::TcpListener;

use crate::core::{
    CompoundFrequency, InputField, MAX_FIRE_AGE, PeriodPoint, ProjectionInput, ProjectionResult,
    ValidationError, format_currency, project, project_schedule, validate_input,
    whole_field_value,
};
use crate::error::FireResult;

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum CliCompoundFrequency {
    Annual,
    Quarter,
    Month,
}

impl From<CliCompoundFrequency> for CompoundFrequency {
    fn from(value: CliCompoundFrequency) -> Self {
        match value {
            CliCompoundFrequency::Annual => CompoundFrequency::Annual,
            CliCompoundFrequency::Quarter => CompoundFrequency::Quarter,
            CliCompoundFrequency::Month => CompoundFrequency::Month,
        }
    }
}

impl From<CompoundFrequency> for CliCompoundFrequency {
    fn from(value: CompoundFrequency) -> Self {
        match value {
            CompoundFrequency::Annual => CliCompoundFrequency::Annual,
            CompoundFrequency::Quarter => CliCompoundFrequency::Quarter,
            CompoundFrequency::Month => CliCompoundFrequency::Month,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ProjectPayload {
    current_age: Option<f64>,
    fire_amount: Option<f64>,
    current_amount: Option<f64>,
    regularly_investment: Option<f64>,
    invest_interval: Option<f64>,
    annual_percentage: Option<f64>,
    compound_frequency: Option<String>,
    include_schedule: Option<bool>,
}

#[derive(Parser, Debug)]
#[command(
    name = "fire-age",
    about = "Projects the age at which an investment portfolio reaches a FIRE target"
)]
pub struct App {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run one projection and print the outcome
    Project(ProjectArgs),
    /// Serve the projection over HTTP
    Serve {
        #[arg(long, default_value = "0.0.0.0")]
        host: IpAddr,
        #[arg(long, default_value_t = 8080)]
        port: u16,
    },
}

#[derive(Args, Debug)]
struct ProjectArgs {
    #[command(flatten)]
    cli: Cli,
    #[arg(long, help = "Print the JSON response instead of a summary")]
    json: bool,
    #[arg(long, help = "Include every simulated period in the output")]
    schedule: bool,
}

#[derive(Args, Debug, Clone)]
struct Cli {
    #[arg(long, default_value_t = 20)]
    current_age: u32,
    #[arg(
        long,
        default_value_t = 20_000_000.0,
        help = "Target net worth at which you are financially independent"
    )]
    fire_amount: f64,
    #[arg(long, default_value_t = 0.0, help = "Current invested assets")]
    current_amount: f64,
    #[arg(long, default_value_t = 0.0, help = "Amount added at each contribution")]
    regularly_investment: f64,
    #[arg(
        long,
        default_value_t = 12,
        help = "Months between contributions; 0 disables recurring contributions"
    )]
    invest_interval: u32,
    #[arg(long, default_value_t = 5.0, help = "Expected annual return in percent")]
    annual_percentage: f64,
    #[arg(long, value_enum, default_value_t = CliCompoundFrequency::Month)]
    compound_frequency: CliCompoundFrequency,
}

#[derive(Debug)]
struct ApiRequest {
    inputs: ProjectionInput,
    include_schedule: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ProjectResponse {
    #[serde(flatten)]
    result: ProjectionResult,
    formatted_final_amount: String,
    max_fire_age: u32,
    compound_frequency: CompoundFrequency,
    #[serde(skip_serializing_if = "Option::is_none")]
    schedule: Option<Vec<PeriodPoint>>,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    field: Option<&'static str>,
}

pub async fn run(app: App) -> FireResult<()> {
    match app.command {
        Command::Project(args) => run_projection(args),
        Command::Serve { host, port } => Ok(run_http_server(SocketAddr::new(host, port)).await?),
    }
}

fn run_projection(args: ProjectArgs) -> FireResult<()> {
    let inputs = build_inputs(args.cli)?;
    let result = project(&inputs);
    let schedule = args.schedule.then(|| project_schedule(&inputs));

    if args.json {
        let response = build_project_response(&inputs, result, schedule);
        println!("{}", serde_json::to_string_pretty(&response)?);
        return Ok(());
    }

    println!("{}", render_summary(&result));
    if let Some(rows) = schedule {
        println!();
        println!(
            "{:>6} {:>7} {:>14} {:>18}",
            "Period", "Age", "Contribution", "Balance"
        );
        for row in &rows {
            println!(
                "{:>6} {:>7.2} {:>14} {:>18}",
                row.period,
                row.age,
                format_currency(row.contribution),
                format_currency(row.balance)
            );
        }
    }
    Ok(())
}

fn render_summary(result: &ProjectionResult) -> String {
    match result.age_reached {
        Some(age) => format!(
            "You can reach your FIRE goal at age {age:.1} with {}.",
            format_currency(result.final_amount)
        ),
        None => format!(
            "You cannot reach your FIRE goal by age {MAX_FIRE_AGE}. Projected amount at {MAX_FIRE_AGE}: {}.",
            format_currency(result.final_amount)
        ),
    }
}

fn build_inputs(cli: Cli) -> Result<ProjectionInput, ValidationError> {
    let inputs = ProjectionInput {
        current_age: cli.current_age,
        fire_amount: cli.fire_amount,
        current_amount: cli.current_amount,
        regularly_investment: cli.regularly_investment,
        invest_interval: cli.invest_interval,
        annual_percentage: cli.annual_percentage,
        compound_frequency: cli.compound_frequency.into(),
    };
    validate_input(&inputs)?;
    Ok(inputs)
}

pub async fn run_http_server(addr: SocketAddr) -> std::io::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("FIRE projection API listening on http://{addr}");

    axum::serve(listener, router()).await
}

fn router() -> Router {
    Router::new()
        .route(
            "/api/project",
            get(project_get_handler).post(project_post_handler),
        )
        .fallback(not_found_handler)
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found", None)
}

async fn project_get_handler(payload: Result<Query<ProjectPayload>, QueryRejection>) -> Response {
    match payload {
        Ok(Query(payload)) => project_handler_impl(payload).await,
        Err(rejection) => malformed_request_response(&rejection.body_text()),
    }
}

async fn project_post_handler(payload: Result<Json<ProjectPayload>, JsonRejection>) -> Response {
    match payload {
        Ok(Json(payload)) => project_handler_impl(payload).await,
        Err(rejection) => malformed_request_response(&rejection.body_text()),
    }
}

fn malformed_request_response(reason: &str) -> Response {
    tracing::warn!("rejected malformed projection request: {reason}");
    error_response(StatusCode::BAD_REQUEST, reason, None)
}

async fn project_handler_impl(payload: ProjectPayload) -> Response {
    let request = match api_request_from_payload(payload) {
        Ok(request) => request,
        Err(err) => {
            tracing::warn!(field = err.field().key(), "rejected projection input: {err}");
            return error_response(
                StatusCode::BAD_REQUEST,
                &err.to_string(),
                Some(err.field().key()),
            );
        }
    };

    tracing::debug!(inputs = ?request.inputs, "running projection");
    let result = project(&request.inputs);
    let schedule = request
        .include_schedule
        .then(|| project_schedule(&request.inputs));
    json_response(
        StatusCode::OK,
        build_project_response(&request.inputs, result, schedule),
    )
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    let mut response = (status, Json(body)).into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        header::HeaderValue::from_static("no-store"),
    );
    response
}

fn error_response(status: StatusCode, msg: &str, field: Option<&'static str>) -> Response {
    json_response(
        status,
        ErrorResponse {
            error: msg.to_string(),
            field,
        },
    )
}

#[cfg(test)]
fn api_request_from_json(json: &str) -> Result<ApiRequest, String> {
    let payload = serde_json::from_str::<ProjectPayload>(json)
        .map_err(|e| format!("Invalid API JSON payload: {e}"))?;
    api_request_from_payload(payload).map_err(|e| e.to_string())
}

fn api_request_from_payload(payload: ProjectPayload) -> Result<ApiRequest, ValidationError> {
    let mut cli = default_cli_for_api();

    if let Some(v) = payload.current_age {
        cli.current_age = whole_field_value(InputField::CurrentAge, v)?;
    }
    if let Some(v) = payload.fire_amount {
        cli.fire_amount = v;
    }
    if let Some(v) = payload.current_amount {
        cli.current_amount = v;
    }
    if let Some(v) = payload.regularly_investment {
        cli.regularly_investment = v;
    }
    if let Some(v) = payload.invest_interval {
        cli.invest_interval = whole_field_value(InputField::InvestInterval, v)?;
    }
    if let Some(v) = payload.annual_percentage {
        cli.annual_percentage = v;
    }
    if let Some(v) = payload.compound_frequency {
        cli.compound_frequency = CompoundFrequency::from_label(&v).into();
    }

    let inputs = build_inputs(cli)?;
    Ok(ApiRequest {
        inputs,
        include_schedule: payload.include_schedule.unwrap_or(false),
    })
}

fn default_cli_for_api() -> Cli {
    Cli {
        current_age: 20,
        fire_amount: 20_000_000.0,
        current_amount: 0.0,
        regularly_investment: 0.0,
        invest_interval: 12,
        annual_percentage: 5.0,
        compound_frequency: CliCompoundFrequency::Month,
    }
}

fn build_project_response(
    inputs: &ProjectionInput,
    result: ProjectionResult,
    schedule: Option<Vec<PeriodPoint>>,
) -> ProjectResponse {
    ProjectResponse {
        formatted_final_amount: format_currency(result.final_amount),
        result,
        max_fire_age: MAX_FIRE_AGE,
        compound_frequency: inputs.compound_frequency,
        schedule,
    }
}
