use crate::{AppState, error::AppError};
use analytics::{Correlation, CorrelationMatrix, Regression, Summary, TrendReport};
use axum::{
    Json,
    extract::{Path, State},
};
use core_types::{Concept, FormulaInput, FormulaResult};
use datasets::{Dataset, samples};
use evaluator::{POLICY_TABLE, PolicyEffect};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;
use std::sync::Arc;

/// The input schema of one concept.
#[derive(Debug, Serialize)]
pub struct ConceptInfo {
    pub name: &'static str,
    pub description: &'static str,
    pub required_values: &'static [&'static str],
    pub optional_values: &'static [&'static str],
    pub required_series: &'static [&'static str],
    pub required_labels: &'static [&'static str],
}

#[derive(Debug, Deserialize)]
pub struct EvaluateRequest {
    pub concept: String,
    #[serde(default)]
    pub input: FormulaInput,
    /// Fill in configured defaults for scalars the request leaves out.
    #[serde(default)]
    pub apply_defaults: bool,
    /// Apply the configured display clamps to the result.
    #[serde(default)]
    pub clamp: bool,
}

#[derive(Debug, Deserialize)]
pub struct TrendRequest {
    pub values: Vec<Decimal>,
}

#[derive(Debug, Serialize)]
pub struct TrendResponse {
    pub trend: TrendReport,
    pub summary: Summary,
}

#[derive(Debug, Deserialize)]
pub struct CorrelationRequest {
    pub x: Vec<Decimal>,
    pub y: Vec<Decimal>,
}

#[derive(Debug, Serialize)]
pub struct CorrelationResponse {
    pub correlation: Correlation,
    pub regression: Regression,
}

#[derive(Debug, Serialize)]
pub struct ColumnReport {
    pub name: String,
    pub summary: Summary,
    pub trend: Option<TrendReport>,
}

#[derive(Debug, Serialize)]
pub struct CsvReport {
    pub columns: Vec<ColumnReport>,
    pub correlations: CorrelationMatrix,
}

fn parse_concept(name: &str) -> Result<Concept, AppError> {
    Concept::from_str(name).map_err(|_| AppError::NotFound(format!("no concept named '{name}'")))
}

/// # GET /api/concepts
pub async fn list_concepts() -> Json<Vec<ConceptInfo>> {
    let concepts = Concept::ALL
        .iter()
        .map(|c| ConceptInfo {
            name: c.as_str(),
            description: c.description(),
            required_values: c.required_values(),
            optional_values: c.optional_values(),
            required_series: c.required_series(),
            required_labels: c.required_labels(),
        })
        .collect();
    Json(concepts)
}

/// # GET /api/concepts/:concept/defaults
/// The configured default inputs for a concept; empty when none are configured.
pub async fn concept_defaults(
    Path(name): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<BTreeMap<String, Decimal>>, AppError> {
    let concept = parse_concept(&name)?;
    let defaults: BTreeMap<String, Decimal> = state
        .config
        .defaults_for(concept)
        .map(|d| d.iter().map(|(k, v)| (k.clone(), *v)).collect())
        .unwrap_or_default();
    Ok(Json(defaults))
}

/// # POST /api/evaluate
pub async fn evaluate(
    State(state): State<Arc<AppState>>,
    Json(request): Json<EvaluateRequest>,
) -> Result<Json<FormulaResult>, AppError> {
    let concept = parse_concept(&request.concept)?;

    let mut input = request.input;
    if request.apply_defaults {
        if let Some(defaults) = state.config.defaults_for(concept) {
            input = input.merge_defaults(defaults);
        }
    }

    let result = state.evaluator.evaluate(concept, &input)?;
    let result = if request.clamp { state.clamps.apply(result) } else { result };
    Ok(Json(result))
}

/// # GET /api/policies
pub async fn list_policies() -> Json<Vec<PolicyEffect>> {
    Json(POLICY_TABLE.to_vec())
}

/// # POST /api/analyze/trend
pub async fn analyze_trend(
    State(state): State<Arc<AppState>>,
    Json(request): Json<TrendRequest>,
) -> Result<Json<TrendResponse>, AppError> {
    Ok(Json(TrendResponse {
        trend: state.analytics.trend(&request.values)?,
        summary: state.analytics.describe(&request.values)?,
    }))
}

/// # POST /api/analyze/correlation
pub async fn analyze_correlation(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CorrelationRequest>,
) -> Result<Json<CorrelationResponse>, AppError> {
    Ok(Json(CorrelationResponse {
        correlation: state.analytics.correlation(&request.x, &request.y)?,
        regression: state.analytics.regression(&request.x, &request.y)?,
    }))
}

/// # POST /api/analyze/csv
/// Summarizes every column of an uploaded CSV body and correlates the columns
/// pairwise. Columns with fewer than two values get no trend.
pub async fn analyze_csv(
    State(state): State<Arc<AppState>>,
    body: String,
) -> Result<Json<CsvReport>, AppError> {
    let dataset = datasets::from_reader("upload", body.as_bytes())?;
    let mut columns = Vec::new();
    let mut numeric = Vec::new();
    for column in dataset.columns.iter().filter(|c| c.has_values()) {
        let values = column.present();
        columns.push(ColumnReport {
            name: column.name.clone(),
            summary: state.analytics.describe(&values)?,
            trend: state.analytics.trend(&values).ok(),
        });
        numeric.push((column.name.as_str(), column.values.as_slice()));
    }
    let correlations = state.analytics.correlation_matrix(&numeric)?;
    Ok(Json(CsvReport { columns, correlations }))
}

/// # GET /api/samples/france
pub async fn france_sample() -> Json<Dataset> {
    Json(samples::france_sample())
}
