use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use chrono::NaiveDate;
use facility_compliance::deadlines::views::{ClassificationView, ObligationView, SummaryView};
use facility_compliance::deadlines::{
    classify_all, classify_with, parse_optional_date, summarize_by_owner, ComplianceSummary,
    ObligationKind,
};
use facility_compliance::error::AppError;
use facility_compliance::records::{parse_kind, ObligationImporter, SnapshotRow};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::io::Cursor;
use tracing::{debug, warn};

#[derive(Debug, Deserialize)]
pub(crate) struct ClassifyRequest {
    #[serde(default)]
    pub(crate) due_date: Option<String>,
    #[serde(default)]
    pub(crate) kind: String,
    #[serde(default)]
    pub(crate) today: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ClassifyResponse {
    pub(crate) today: NaiveDate,
    pub(crate) kind: ObligationKind,
    pub(crate) kind_label: &'static str,
    pub(crate) due_date: Option<NaiveDate>,
    pub(crate) status: ClassificationView,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct SummaryRequest {
    #[serde(default)]
    pub(crate) today: Option<String>,
    #[serde(default)]
    pub(crate) obligations: Vec<SnapshotRow>,
    #[serde(default)]
    pub(crate) csv: Option<String>,
    #[serde(default)]
    pub(crate) include_items: bool,
}

#[derive(Debug, Serialize)]
pub(crate) struct SummaryResponse {
    pub(crate) today: NaiveDate,
    pub(crate) owners: Vec<SummaryView>,
    pub(crate) overall: SummaryView,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) items: Option<Vec<ObligationView>>,
}

pub(crate) fn compliance_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/v1/compliance/classify", post(classify_endpoint))
        .route("/api/v1/compliance/summary", post(summary_endpoint))
        .layer(Extension(state))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn classify_endpoint(
    Extension(state): Extension<AppState>,
    Json(payload): Json<ClassifyRequest>,
) -> Result<Json<ClassifyResponse>, AppError> {
    let ClassifyRequest {
        due_date,
        kind,
        today,
    } = payload;

    let kind = parse_kind(&kind)?;
    let classification = parse_optional_date("today", today.as_deref())
        .and_then(|today| {
            let today = state.clock.today_or(today);
            let due_date = parse_optional_date("due_date", due_date.as_deref())?;
            classify_with(&state.policy, today, due_date, kind)
                .map(|status| (today, due_date, status))
        })
        .map_err(|err| {
            warn!(error = %err, ?kind, "rejected classification request");
            err
        })?;
    let (today, due_date, status) = classification;

    Ok(Json(ClassifyResponse {
        today,
        kind,
        kind_label: kind.label(),
        due_date,
        status: ClassificationView::from(&status),
    }))
}

pub(crate) async fn summary_endpoint(
    Extension(state): Extension<AppState>,
    Json(payload): Json<SummaryRequest>,
) -> Result<Json<SummaryResponse>, AppError> {
    let SummaryRequest {
        today,
        obligations,
        csv,
        include_items,
    } = payload;

    let today = state.clock.today_or(parse_optional_date("today", today.as_deref())?);
    let mut rows = obligations;
    if let Some(csv) = csv {
        let reader = Cursor::new(csv.into_bytes());
        rows.extend(ObligationImporter::rows_from_reader(reader)?);
    }
    let snapshot = ObligationImporter::from_rows(&rows)?;

    let owners = summarize_by_owner(&state.policy, today, &snapshot).map_err(|err| {
        warn!(error = %err, "obligation snapshot carries an invalid date");
        err
    })?;
    let overall = ComplianceSummary::rollup(owners.iter().map(|entry| &entry.summary));
    let items = if include_items {
        let classified = classify_all(&state.policy, today, &snapshot)?;
        Some(classified.iter().map(ObligationView::from).collect())
    } else {
        None
    };

    debug!(
        owners = owners.len(),
        obligations = overall.total_obligations,
        "built compliance summary"
    );

    Ok(Json(SummaryResponse {
        today,
        owners: owners.iter().map(SummaryView::from).collect(),
        overall: SummaryView::new(None, &overall),
        items,
    }))
}
