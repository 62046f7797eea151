//! HTTP surface: one action-dispatched endpoint plus health and listing.

pub mod error;

use crate::acquisition::origin::normalize_origin;
use crate::audit::ledger::{RunLedger, RunRecord};
use crate::pipeline::Pipeline;
use crate::store::Contact;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Utc;
use error::ApiError;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Instant;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Pipeline,
    pub ledger: Option<Arc<RunLedger>>,
}

impl AppState {
    pub fn new(pipeline: Pipeline, ledger: Option<RunLedger>) -> Self {
        Self {
            pipeline,
            ledger: ledger.map(Arc::new),
        }
    }

    fn record(&self, record: RunRecord) {
        if let Some(ledger) = &self.ledger {
            if let Err(e) = ledger.record(&record) {
                warn!("failed to write run ledger: {e:#}");
            }
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/actions", post(dispatch))
        .route("/api/contacts", get(list_contacts))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Bind and serve until the process is stopped.
pub async fn serve(state: AppState, bind: &str) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(bind).await?;
    info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, router(state)).await?;
    Ok(())
}

async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

#[derive(Debug, Deserialize)]
struct ContactsQuery {
    tenant_id: Option<String>,
    outlet_id: Option<String>,
}

async fn list_contacts(
    State(state): State<AppState>,
    Query(query): Query<ContactsQuery>,
) -> Result<Json<Value>, ApiError> {
    let tenant_id = query
        .tenant_id
        .filter(|t| !t.trim().is_empty())
        .ok_or(ApiError::MissingField("tenant_id"))?;
    let contacts: Vec<Contact> = state
        .pipeline
        .store
        .list_contacts(&tenant_id, query.outlet_id.as_deref())?;
    Ok(Json(json!({
        "success": true,
        "count": contacts.len(),
        "contacts": contacts,
    })))
}

const ACTIONS: &[&str] = &[
    "scrape_outlet",
    "verify_contacts",
    "categorize_contacts",
    "monitor_updates",
];

async fn dispatch(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(body) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let action = body
        .get("action")
        .and_then(Value::as_str)
        .ok_or(ApiError::MissingField("action"))?
        .to_string();
    if !ACTIONS.contains(&action.as_str()) {
        return Err(ApiError::UnknownAction(action));
    }
    let tenant_id = body
        .get("tenant_id")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or(ApiError::MissingField("tenant_id"))?
        .to_string();

    let started = Instant::now();
    let result = run_action(&state, &action, &tenant_id, &body).await;
    let elapsed = started.elapsed().as_millis() as u64;

    match &result {
        Ok((_, counts)) => state.record(
            RunRecord::new(&action, &tenant_id, elapsed).counts(counts.0, counts.1, counts.2),
        ),
        Err(_) => state.record(RunRecord::new(&action, &tenant_id, elapsed).failed()),
    }
    result.map(|(value, _)| Json(value))
}

type Counts = (usize, usize, usize);

async fn run_action(
    state: &AppState,
    action: &str,
    tenant_id: &str,
    body: &Value,
) -> Result<(Value, Counts), ApiError> {
    let pipeline = &state.pipeline;
    match action {
        "scrape_outlet" => {
            let outlet_url = body
                .get("outlet_url")
                .and_then(Value::as_str)
                .filter(|u| !u.trim().is_empty())
                .ok_or(ApiError::MissingField("outlet_url"))?;
            if normalize_origin(outlet_url).is_none() {
                return Err(ApiError::BadRequest(format!("not a valid outlet url: {outlet_url}")));
            }
            let report = pipeline.scrape_outlet(outlet_url, tenant_id).await?;
            let meta = &report.scraping_metadata;
            let counts = (
                meta.candidates_extracted - meta.duplicates_removed,
                meta.contacts_created + meta.contacts_updated,
                meta.contacts_failed,
            );
            Ok((to_value(&report)?, counts))
        }
        "verify_contacts" => {
            let ids = contact_ids(body)?;
            let (results, summary) = pipeline.verify_contacts(&ids, tenant_id).await;
            let counts = (summary.total_requested, summary.verified_successfully, summary.failed);
            Ok((
                json!({ "verified_contacts": results, "summary": summary }),
                counts,
            ))
        }
        "categorize_contacts" => {
            let ids = contact_ids(body)?;
            let (processed, summary) = pipeline.categorize_contacts(&ids, tenant_id).await;
            let counts = (summary.processed, summary.successful, summary.failed);
            Ok((
                json!({ "processed_contacts": processed, "summary": summary }),
                counts,
            ))
        }
        "monitor_updates" => Ok((
            json!({
                "monitoring_enabled": false,
                "last_check": Utc::now().to_rfc3339(),
                "updates_found": 0,
            }),
            (0, 0, 0),
        )),
        other => Err(ApiError::UnknownAction(other.to_string())),
    }
}

fn contact_ids(body: &Value) -> Result<Vec<String>, ApiError> {
    let raw = body
        .get("contact_ids")
        .ok_or(ApiError::MissingField("contact_ids"))?;
    serde_json::from_value(raw.clone())
        .map_err(|_| ApiError::BadRequest("contact_ids must be an array of strings".to_string()))
}

fn to_value<T: serde::Serialize>(value: &T) -> Result<Value, ApiError> {
    serde_json::to_value(value).map_err(|e| ApiError::Internal(e.into()))
}
