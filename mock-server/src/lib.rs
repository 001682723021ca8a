//! In-memory implementation of the console-dns zone API.
//!
//! Records are stored as raw JSON values under zone, record name and
//! lower-case record type, so the server never depends on the client's
//! record types. Errors are plain-text bodies with a non-200 status, which
//! is what the client surfaces to its callers.

use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, Request, State},
    http::{header, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::Value;
use tokio::{net::TcpListener, sync::RwLock};
use tracing::debug;

const SUPPORTED_TYPES: &[&str] = &["A", "AAAA", "CNAME", "MX", "NS", "TXT"];

/// Records under one name, keyed by lower-case type.
pub type RecordSet = BTreeMap<String, Vec<Value>>;
/// Record sets keyed by record name.
pub type Zone = BTreeMap<String, RecordSet>;
pub type Db = Arc<RwLock<BTreeMap<String, Zone>>>;

type ApiResult<T> = Result<T, (StatusCode, String)>;

#[derive(Clone)]
pub struct AppState {
    token: Arc<str>,
    db: Db,
}

#[derive(Deserialize)]
pub struct RecordEdit {
    pub src: Value,
    pub dst: Value,
}

/// Router with no zones that accepts `token` as its only bearer credential.
pub fn app(token: &str) -> Router {
    app_with_zones(token, std::iter::empty::<String>())
}

/// Router pre-populated with empty zones.
pub fn app_with_zones<I, S>(token: &str, zones: I) -> Router
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let zones = zones
        .into_iter()
        .map(|name| (name.into(), Zone::new()))
        .collect();
    let state = AppState {
        token: Arc::from(token),
        db: Arc::new(RwLock::new(zones)),
    };
    Router::new()
        .route("/api/v1/zones", get(list_zones))
        .route("/api/v1/zones/{zone}", get(get_zone))
        .route("/api/v1/zones/{zone}/{name}/{rtype}", post(create_record))
        .route("/api/v1/zones/{zone}/{name}/{rtype}/edit", post(update_record))
        .route("/api/v1/zones/{zone}/{name}/{rtype}/delete", post(delete_record))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_bearer))
        .with_state(state)
}

pub async fn run(listener: TcpListener, app: Router) -> Result<(), std::io::Error> {
    axum::serve(listener, app).await
}

async fn require_bearer(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let authorized = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .is_some_and(|token| token == &*state.token);
    if !authorized {
        return (StatusCode::UNAUTHORIZED, "unauthorized").into_response();
    }
    next.run(request).await
}

fn not_found(what: &str) -> (StatusCode, String) {
    (StatusCode::NOT_FOUND, format!("{what} not found"))
}

/// Map a path record type onto its storage key.
fn type_key(rtype: &str) -> ApiResult<String> {
    let upper = rtype.to_ascii_uppercase();
    if SUPPORTED_TYPES.contains(&upper.as_str()) {
        Ok(upper.to_ascii_lowercase())
    } else {
        Err((
            StatusCode::BAD_REQUEST,
            format!("unsupported record type: {rtype}"),
        ))
    }
}

async fn list_zones(State(state): State<AppState>) -> Json<BTreeMap<String, Zone>> {
    Json(state.db.read().await.clone())
}

async fn get_zone(State(state): State<AppState>, Path(zone): Path<String>) -> ApiResult<Json<Zone>> {
    let zones = state.db.read().await;
    zones
        .get(&zone)
        .cloned()
        .map(Json)
        .ok_or_else(|| not_found("zone"))
}

async fn create_record(
    State(state): State<AppState>,
    Path((zone, name, rtype)): Path<(String, String, String)>,
    Json(record): Json<Value>,
) -> ApiResult<StatusCode> {
    let key = type_key(&rtype)?;
    let mut zones = state.db.write().await;
    let records = zones
        .get_mut(&zone)
        .ok_or_else(|| not_found("zone"))?
        .entry(name.clone())
        .or_default()
        .entry(key)
        .or_default();
    if records.contains(&record) {
        return Err((StatusCode::CONFLICT, "record already exists".to_string()));
    }
    records.push(record);
    debug!(%zone, %name, %rtype, "record created");
    Ok(StatusCode::OK)
}

async fn update_record(
    State(state): State<AppState>,
    Path((zone, name, rtype)): Path<(String, String, String)>,
    Json(edit): Json<RecordEdit>,
) -> ApiResult<StatusCode> {
    let key = type_key(&rtype)?;
    let mut zones = state.db.write().await;
    let zone_data = zones.get_mut(&zone).ok_or_else(|| not_found("zone"))?;
    let slot = zone_data
        .get_mut(&name)
        .and_then(|set| set.get_mut(&key))
        .and_then(|records| records.iter_mut().find(|r| **r == edit.src))
        .ok_or_else(|| not_found("record"))?;
    *slot = edit.dst;
    debug!(%zone, %name, %rtype, "record updated");
    Ok(StatusCode::OK)
}

async fn delete_record(
    State(state): State<AppState>,
    Path((zone, name, rtype)): Path<(String, String, String)>,
    Json(record): Json<Value>,
) -> ApiResult<StatusCode> {
    let key = type_key(&rtype)?;
    let mut zones = state.db.write().await;
    let zone_data = zones.get_mut(&zone).ok_or_else(|| not_found("zone"))?;
    let set = zone_data.get_mut(&name).ok_or_else(|| not_found("record"))?;
    let records = set.get_mut(&key).ok_or_else(|| not_found("record"))?;
    let index = records
        .iter()
        .position(|r| *r == record)
        .ok_or_else(|| not_found("record"))?;
    records.remove(index);

    // Drop empty containers so a deleted name disappears from the zone.
    if records.is_empty() {
        set.remove(&key);
    }
    if set.is_empty() {
        zone_data.remove(&name);
    }
    debug!(%zone, %name, %rtype, "record deleted");
    Ok(StatusCode::OK)
}
