use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use tracing::instrument;

use super::catalog::AnalyticsQuery;
use super::dto::{AnalyticsResult, CatalogEntry, RunQueryRequest};
use super::services;
use crate::{error::AppError, extract::FormBody, state::AppState};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/analytics", get(list_catalog))
        .route("/analytics/run", post(run_query))
        .route("/analytics/:slug", get(run_by_slug))
}

pub async fn list_catalog() -> Json<Vec<CatalogEntry>> {
    Json(AnalyticsQuery::ALL.into_iter().map(CatalogEntry::from).collect())
}

/// POST /analytics/run { label }
#[instrument(skip(state))]
pub async fn run_query(
    State(state): State<AppState>,
    FormBody(req): FormBody<RunQueryRequest>,
) -> Result<Json<AnalyticsResult>, AppError> {
    let query = AnalyticsQuery::resolve(&req.label).ok_or(AppError::UnknownQuery(req.label))?;
    run(&state, query).await
}

#[instrument(skip(state))]
pub async fn run_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<AnalyticsResult>, AppError> {
    let query = AnalyticsQuery::from_slug(&slug).ok_or(AppError::UnknownQuery(slug))?;
    run(&state, query).await
}

async fn run(state: &AppState, query: AnalyticsQuery) -> Result<Json<AnalyticsResult>, AppError> {
    let table = services::run_entry(state, query).await?;
    Ok(Json(AnalyticsResult {
        label: query.label(),
        slug: query.slug(),
        table,
    }))
}

#[cfg(test)]
mod handlers_tests {
    use axum::http::StatusCode;

    use super::*;
    use crate::test_support::TestDb;

    #[tokio::test]
    async fn catalog_lists_thirteen_entries() {
        let Json(entries) = list_catalog().await;
        assert_eq!(entries.len(), 13);
        assert_eq!(entries[0].label, "Providers & Receivers per City");
        assert_eq!(entries.iter().filter(|e| e.single_row).count(), 4);
    }

    #[tokio::test]
    async fn run_by_label_returns_flat_table() {
        let t = TestDb::seeded().await;
        let req = RunQueryRequest { label: "Total quantity of food available".into() };
        let Json(result) = run_query(State(t.state()), FormBody(req)).await.unwrap();
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["slug"], "total-available-quantity");
        assert_eq!(json["columns"], serde_json::json!(["total_available_food"]));
        assert_eq!(json["rows"], serde_json::json!([[58]]));
    }

    #[tokio::test]
    async fn unknown_label_and_slug_are_not_found() {
        let t = TestDb::seeded().await;
        let req = RunQueryRequest { label: "Everything".into() };
        let err = run_query(State(t.state()), FormBody(req)).await.unwrap_err();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);

        let err = run_by_slug(State(t.state()), Path("nope".into())).await.unwrap_err();
        assert!(matches!(err, AppError::UnknownQuery(s) if s == "nope"));
    }

    #[tokio::test]
    async fn schema_without_tables_is_a_server_error() {
        let t = TestDb::seeded().await;
        t.db
            .execute_statement("DROP TABLE claims", &[])
            .await
            .unwrap();
        let err = run_by_slug(State(t.state()), Path("claim-status-share".into()))
            .await
            .unwrap_err();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.to_string().contains("claims"));
    }
}
