//! Analysis API routes.
//!
//! DB work runs on the blocking pool with a fresh connection per request,
//! same as the rest of the service's repository access.

use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::analysis::{analyze, reduce, AnalysisBundle, BundleAction};
use crate::api::error::{ApiError, ApiResult};
use crate::db::{self, AnalysisRepository, StoredAnalysis};
use crate::transcript::{self, TranscriptRow};

/// Shared state for the analysis routes.
#[derive(Clone)]
pub struct AnalysesState {
    pub history_limit: usize,
}

pub fn router(state: AnalysesState) -> Router {
    Router::new()
        .route("/analyze", post(analyze_rows))
        .route("/analyze/csv", post(analyze_csv))
        .route("/analyses", get(list_analyses))
        .route("/analyses/:id", get(get_analysis).delete(delete_analysis))
        .route("/analyses/:id/actions", post(apply_action))
        .with_state(state)
}

/// Body for POST /analyze.
#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub rows: Vec<TranscriptRow>,
    pub source: Option<String>,
    pub title: Option<String>,
    #[serde(default)]
    pub save: bool,
}

/// Query parameters for POST /analyze/csv.
#[derive(Debug, Deserialize, Default)]
pub struct AnalyzeCsvParams {
    pub source: Option<String>,
    pub title: Option<String>,
    pub save: Option<bool>,
}

/// Query parameters for GET /analyses.
#[derive(Debug, Deserialize, Default)]
pub struct ListParams {
    /// Substring filter on source or title
    pub q: Option<String>,
    /// Maximum results (default 20)
    pub limit: Option<usize>,
}

/// POST /analyze - Analyze already-parsed transcript rows.
async fn analyze_rows(
    State(state): State<AnalysesState>,
    Json(request): Json<AnalyzeRequest>,
) -> ApiResult<Json<Value>> {
    let bundle = analyze(&request.rows);
    let row_count = request.rows.len();

    let id = if request.save {
        let source = request.source.unwrap_or_else(|| "api".to_string());
        Some(save_bundle(state.history_limit, source, request.title, row_count, bundle.clone()).await?)
    } else {
        None
    };

    Ok(Json(json!({
        "id": id,
        "rowCount": row_count,
        "bundle": bundle,
    })))
}

/// POST /analyze/csv - Analyze a raw CSV request body.
async fn analyze_csv(
    State(state): State<AnalysesState>,
    Query(params): Query<AnalyzeCsvParams>,
    body: String,
) -> ApiResult<Json<Value>> {
    let rows = transcript::loader::parse_str(&body)?;
    let bundle = analyze(&rows);
    let row_count = rows.len();

    let id = if params.save.unwrap_or(false) {
        let source = params.source.unwrap_or_else(|| "api".to_string());
        Some(save_bundle(state.history_limit, source, params.title, row_count, bundle.clone()).await?)
    } else {
        None
    };

    Ok(Json(json!({
        "id": id,
        "rowCount": row_count,
        "bundle": bundle,
    })))
}

/// GET /analyses - List stored analyses, newest first.
async fn list_analyses(Query(params): Query<ListParams>) -> ApiResult<Json<Value>> {
    let limit = params.limit.unwrap_or(20);
    let query = params.q;

    let analyses = tokio::task::spawn_blocking(move || {
        let conn = db::init_db()?;
        AnalysisRepository::list(&conn, query.as_deref(), limit)
    })
    .await
    .map_err(|_| ApiError::Internal("Storage task failed".to_string()))?
    .map_err(ApiError::from)?;

    let entries: Vec<Value> = analyses.iter().map(summary_json).collect();

    Ok(Json(json!({ "analyses": entries })))
}

/// GET /analyses/:id - Get a stored analysis with its full bundle.
async fn get_analysis(Path(id): Path<i64>) -> ApiResult<Json<Value>> {
    let stored = tokio::task::spawn_blocking(move || {
        let conn = db::init_db()?;
        AnalysisRepository::get(&conn, id)
    })
    .await
    .map_err(|_| ApiError::Internal("Storage task failed".to_string()))?
    .map_err(ApiError::from)?
    .ok_or_else(|| ApiError::NotFound(format!("Analysis {} not found", id)))?;

    let bundle = stored.bundle().map_err(ApiError::from)?;
    let mut body = summary_json(&stored);
    body["bundle"] = serde_json::to_value(&bundle).map_err(|e| ApiError::Internal(e.to_string()))?;

    Ok(Json(body))
}

/// POST /analyses/:id/actions - Apply a bundle action and re-persist.
async fn apply_action(
    Path(id): Path<i64>,
    Json(action): Json<BundleAction>,
) -> ApiResult<Json<Value>> {
    let bundle = tokio::task::spawn_blocking(move || -> Result<AnalysisBundle, ApiError> {
        let conn = db::init_db().map_err(ApiError::from)?;
        let stored = AnalysisRepository::get(&conn, id)
            .map_err(ApiError::from)?
            .ok_or_else(|| ApiError::NotFound(format!("Analysis {} not found", id)))?;

        let mut bundle = stored.bundle().map_err(ApiError::from)?;
        reduce(&mut bundle, action)?;
        AnalysisRepository::update_bundle(&conn, id, &bundle).map_err(ApiError::from)?;
        Ok(bundle)
    })
    .await
    .map_err(|_| ApiError::Internal("Storage task failed".to_string()))??;

    Ok(Json(json!({ "id": id, "bundle": bundle })))
}

/// DELETE /analyses/:id.
async fn delete_analysis(Path(id): Path<i64>) -> ApiResult<Json<Value>> {
    let deleted = tokio::task::spawn_blocking(move || {
        let conn = db::init_db()?;
        AnalysisRepository::delete(&conn, id)
    })
    .await
    .map_err(|_| ApiError::Internal("Storage task failed".to_string()))?
    .map_err(ApiError::from)?;

    if !deleted {
        return Err(ApiError::NotFound(format!("Analysis {} not found", id)));
    }

    Ok(Json(json!({ "deleted": true, "id": id })))
}

async fn save_bundle(
    history_limit: usize,
    source: String,
    title: Option<String>,
    row_count: usize,
    bundle: AnalysisBundle,
) -> ApiResult<i64> {
    tokio::task::spawn_blocking(move || -> anyhow::Result<i64> {
        let conn = db::init_db()?;
        let id =
            AnalysisRepository::insert(&conn, &source, title.as_deref(), row_count, &bundle)?;
        AnalysisRepository::prune(&conn, history_limit as i64)?;
        Ok(id)
    })
    .await
    .map_err(|_| ApiError::Internal("Storage task failed".to_string()))?
    .map_err(ApiError::from)
}

fn summary_json(stored: &StoredAnalysis) -> Value {
    json!({
        "id": stored.id,
        "source": stored.source,
        "title": stored.title,
        "rowCount": stored.row_count,
        "actionItems": stored.action_items,
        "decisions": stored.decisions,
        "questions": stored.questions,
        "durationMinutes": stored.duration_minutes,
        "createdAt": stored.created_at,
    })
}
