//! In-process stand-in for the Onbo API, used by the client's integration
//! tests.
//!
//! The server re-derives the request signature from the raw bytes it
//! receives, independently of the client's code, so any drift in the
//! client's canonicalization or signing shows up as a 401 rather than a
//! silently-passing test. Responses use the wire conventions: snake_case
//! keys, `{data, pagination}` envelopes on list calls, and a JSON
//! `message` field on errors.

use std::{collections::HashMap, sync::Arc};

use axum::{
    body::Body,
    extract::{Path, Query, Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use hmac::{Hmac, Mac};
use md5::Md5;
use serde_json::{json, Value};
use sha2::{Digest, Sha256};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

type HmacSha256 = Hmac<Sha256>;

const MAX_BODY: usize = 1 << 20;

/// Credentials the server verifies incoming requests against.
#[derive(Clone, Debug)]
pub struct MockConfig {
    pub client_id: String,
    pub secret: String,
}

impl MockConfig {
    pub fn new(client_id: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            secret: secret.into(),
        }
    }
}

#[derive(Clone)]
struct AppState {
    config: MockConfig,
    store: Arc<RwLock<Store>>,
}

#[derive(Default)]
struct Store {
    users: HashMap<String, Value>,
    // keyed by user uuid, then key person uuid
    key_people: HashMap<String, HashMap<String, Value>>,
    // keyed by user uuid, then loc uuid
    locs: HashMap<String, HashMap<String, Value>>,
    // keyed by loc uuid
    draws: HashMap<String, Vec<Value>>,
    payments: HashMap<String, HashMap<String, Value>>,
    balances: HashMap<String, Balance>,
    endpoints: HashMap<String, Value>,
    messages: HashMap<String, Value>,
}

#[derive(Clone, Copy, Default)]
struct Balance {
    available: f64,
    current: f64,
}

pub fn app(config: MockConfig) -> Router {
    let state = AppState {
        config,
        store: Arc::new(RwLock::new(Store::default())),
    };
    let api = Router::new()
        .route("/users", get(list_users).post(create_user))
        .route("/users/loc", get(list_all_locs))
        .route("/users/loc/applications", get(list_all_applications))
        .route(
            "/users/{user_id}",
            get(get_user).put(update_user).delete(delete_user),
        )
        .route(
            "/users/{user_id}/key_people",
            get(list_key_people).post(create_key_person),
        )
        .route(
            "/users/{user_id}/key_people/{key_person_id}",
            get(get_key_person)
                .put(update_key_person)
                .delete(delete_key_person),
        )
        .route("/users/{user_id}/loc", get(list_locs))
        .route(
            "/users/{user_id}/loc/applications",
            get(list_applications).post(create_application),
        )
        .route(
            "/users/{user_id}/loc/applications/{application_id}",
            get(get_application),
        )
        .route("/users/{user_id}/loc/{loc_id}", get(get_loc).patch(activate_loc))
        .route(
            "/users/{user_id}/loc/{loc_id}/documents/promissory_note",
            get(promissory_note),
        )
        .route("/users/{user_id}/loc/{loc_id}/draw", post(create_draw))
        .route("/users/{user_id}/loc/{loc_id}/disbursements", get(list_draws))
        .route(
            "/users/{user_id}/loc/{loc_id}/payments",
            get(list_payments).post(create_payment),
        )
        .route(
            "/users/{user_id}/loc/{loc_id}/payments/{payment_id}",
            get(get_payment),
        )
        .route("/users/{user_id}/loc/{loc_id}/statements", get(get_statement))
        .route("/webhooks/endpoints", get(list_endpoints).post(create_endpoint))
        .route("/webhooks/endpoints/messages", get(list_messages))
        .route("/webhooks/endpoints/messages/{message_id}", get(get_message))
        .route(
            "/webhooks/endpoints/messages/{message_id}/resend",
            post(resend_message),
        )
        .route(
            "/webhooks/endpoints/{endpoint_id}",
            get(get_endpoint).put(update_endpoint).delete(delete_endpoint),
        )
        .route(
            "/webhooks/endpoints/{endpoint_id}/resend",
            post(resend_endpoint),
        )
        .with_state(state.clone());
    // the middleware must sit outside the nest: inner layers see the URI
    // with the `/v1` prefix already stripped, and the client signed the
    // full path
    Router::new()
        .nest("/v1", api)
        .layer(middleware::from_fn_with_state(state, verify_signature))
}

pub async fn run(listener: TcpListener, config: MockConfig) -> Result<(), std::io::Error> {
    axum::serve(listener, app(config)).await
}

// --- signature verification ---

fn content_digest(body: &str) -> String {
    let stripped: String = body.chars().filter(|c| !c.is_whitespace()).collect();
    if stripped.is_empty() {
        String::new()
    } else {
        hex::encode(Md5::digest(stripped.as_bytes()))
    }
}

fn signature(url: &str, digest: &str, epoch: &str, secret: &str) -> String {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .expect("HMAC accepts keys of any length");
    mac.update(url.as_bytes());
    mac.update(digest.as_bytes());
    mac.update(epoch.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

async fn verify_signature(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let (parts, body) = request.into_parts();
    let bytes = match axum::body::to_bytes(body, MAX_BODY).await {
        Ok(bytes) => bytes,
        Err(_) => return reject("unreadable body"),
    };
    let header = |name: &str| {
        parts
            .headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string()
    };
    if header("X_CLIENT_UUID") != state.config.client_id {
        return reject("unknown client");
    }
    // the client signs the full URL it dialed; rebuild it from the Host
    // header and the request target
    let url = format!(
        "http://{}{}",
        header("host"),
        parts
            .uri
            .path_and_query()
            .map(|pq| pq.as_str())
            .unwrap_or("/")
    );
    let digest = content_digest(&String::from_utf8_lossy(&bytes));
    let expected = signature(&url, &digest, &header("EPOCH"), &state.config.secret);
    if header("X_STILT_HMAC") != expected {
        tracing::debug!(url, "signature mismatch");
        return reject("invalid signature");
    }
    next.run(Request::from_parts(parts, Body::from(bytes))).await
}

fn reject(message: &str) -> Response {
    (StatusCode::UNAUTHORIZED, Json(json!({ "message": message }))).into_response()
}

fn not_found() -> (StatusCode, Json<Value>) {
    (StatusCode::NOT_FOUND, Json(json!({ "message": "not found" })))
}

/// Wrap a list in the `{data, pagination}` envelope, honoring the standard
/// `offset`/`limit` query parameters.
fn page(items: Vec<Value>, params: &HashMap<String, String>) -> Value {
    let total = items.len();
    let offset: usize = params.get("offset").and_then(|v| v.parse().ok()).unwrap_or(0);
    let limit: usize = params.get("limit").and_then(|v| v.parse().ok()).unwrap_or(25);
    let data: Vec<Value> = items.into_iter().skip(offset).take(limit).collect();
    json!({
        "data": data,
        "pagination": { "offset": offset, "limit": limit, "total": total }
    })
}

fn sorted_by_uuid(items: Vec<Value>) -> Vec<Value> {
    let mut items = items;
    items.sort_by_key(|item| item["uuid"].as_str().unwrap_or("").to_string());
    items
}

// --- users ---

async fn list_users(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> (StatusCode, Json<Value>) {
    let store = state.store.read().await;
    let users = sorted_by_uuid(store.users.values().cloned().collect());
    (StatusCode::OK, Json(page(users, &params)))
}

async fn create_user(
    State(state): State<AppState>,
    Json(mut input): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let uuid = Uuid::new_v4().to_string();
    input["uuid"] = json!(uuid.clone());
    state.store.write().await.users.insert(uuid, input.clone());
    (StatusCode::CREATED, Json(input))
}

async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> (StatusCode, Json<Value>) {
    let store = state.store.read().await;
    match store.users.get(&user_id) {
        Some(user) => (StatusCode::OK, Json(user.clone())),
        None => not_found(),
    }
}

async fn update_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(mut input): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let mut store = state.store.write().await;
    if !store.users.contains_key(&user_id) {
        return not_found();
    }
    input["uuid"] = json!(user_id.clone());
    store.users.insert(user_id, input.clone());
    (StatusCode::OK, Json(input))
}

async fn delete_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> (StatusCode, Json<Value>) {
    let mut store = state.store.write().await;
    if store.users.remove(&user_id).is_none() {
        return not_found();
    }
    store.key_people.remove(&user_id);
    store.locs.remove(&user_id);
    (StatusCode::OK, Json(json!("deleted")))
}

// --- key people ---

async fn list_key_people(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> (StatusCode, Json<Value>) {
    let store = state.store.read().await;
    if !store.users.contains_key(&user_id) {
        return not_found();
    }
    let people = store
        .key_people
        .get(&user_id)
        .map(|people| people.values().cloned().collect())
        .unwrap_or_default();
    (StatusCode::OK, Json(page(sorted_by_uuid(people), &params)))
}

async fn create_key_person(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(mut input): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let mut store = state.store.write().await;
    if !store.users.contains_key(&user_id) {
        return not_found();
    }
    let uuid = Uuid::new_v4().to_string();
    input["uuid"] = json!(uuid.clone());
    store
        .key_people
        .entry(user_id)
        .or_default()
        .insert(uuid, input.clone());
    (StatusCode::CREATED, Json(input))
}

async fn get_key_person(
    State(state): State<AppState>,
    Path((user_id, key_person_id)): Path<(String, String)>,
) -> (StatusCode, Json<Value>) {
    let store = state.store.read().await;
    match store
        .key_people
        .get(&user_id)
        .and_then(|people| people.get(&key_person_id))
    {
        Some(person) => (StatusCode::OK, Json(person.clone())),
        None => not_found(),
    }
}

async fn update_key_person(
    State(state): State<AppState>,
    Path((user_id, key_person_id)): Path<(String, String)>,
    Json(mut input): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let mut store = state.store.write().await;
    let Some(people) = store.key_people.get_mut(&user_id) else {
        return not_found();
    };
    if !people.contains_key(&key_person_id) {
        return not_found();
    }
    input["uuid"] = json!(key_person_id.clone());
    people.insert(key_person_id, input.clone());
    (StatusCode::OK, Json(input))
}

async fn delete_key_person(
    State(state): State<AppState>,
    Path((user_id, key_person_id)): Path<(String, String)>,
) -> (StatusCode, Json<Value>) {
    let mut store = state.store.write().await;
    let removed = store
        .key_people
        .get_mut(&user_id)
        .and_then(|people| people.remove(&key_person_id));
    match removed {
        Some(_) => (StatusCode::OK, Json(json!("deleted"))),
        None => not_found(),
    }
}

// --- lines of credit ---

fn loc_matching<'a>(locs: &'a HashMap<String, Value>, id: &str) -> Option<&'a Value> {
    locs.get(id).or_else(|| {
        // activation addresses the offer, not the line itself
        locs.values().find(|loc| {
            loc["offers"]
                .as_array()
                .is_some_and(|offers| offers.iter().any(|o| o["uuid"] == json!(id)))
        })
    })
}

async fn list_all_locs(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> (StatusCode, Json<Value>) {
    let store = state.store.read().await;
    let locs = store
        .locs
        .values()
        .flat_map(|per_user| per_user.values().cloned())
        .collect();
    (StatusCode::OK, Json(page(sorted_by_uuid(locs), &params)))
}

async fn list_all_applications(
    state: State<AppState>,
    params: Query<HashMap<String, String>>,
) -> (StatusCode, Json<Value>) {
    // applications and lines of credit are the same entity here
    list_all_locs(state, params).await
}

async fn list_locs(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> (StatusCode, Json<Value>) {
    let store = state.store.read().await;
    if !store.users.contains_key(&user_id) {
        return not_found();
    }
    let locs = store
        .locs
        .get(&user_id)
        .map(|locs| locs.values().cloned().collect())
        .unwrap_or_default();
    (StatusCode::OK, Json(page(sorted_by_uuid(locs), &params)))
}

async fn list_applications(
    state: State<AppState>,
    user_id: Path<String>,
    params: Query<HashMap<String, String>>,
) -> (StatusCode, Json<Value>) {
    list_locs(state, user_id, params).await
}

async fn create_application(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(input): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let mut store = state.store.write().await;
    if !store.users.contains_key(&user_id) {
        return not_found();
    }
    let amount = input["amount"].as_f64().unwrap_or(0.0);
    let loc_id = Uuid::new_v4().to_string();
    let offer_id = Uuid::new_v4().to_string();
    let loc = json!({
        "uuid": loc_id.clone(),
        "product": "REVOLVING",
        "amount": amount,
        "created_at": "2024-01-01T00:00:00Z",
        "offers": [{
            "uuid": offer_id,
            "product": "REVOLVING",
            "apr": 9.99,
            "amount": amount,
            "term": 12,
            "term_frequency": "MONTHLY",
            "interest_rate": 9.49,
            "origination_fee": 0.0,
            "start_date": "2024-01-01"
        }],
        "status": { "name": "PENDING" }
    });
    store
        .locs
        .entry(user_id)
        .or_default()
        .insert(loc_id, loc.clone());
    (StatusCode::CREATED, Json(loc))
}

async fn get_application(
    State(state): State<AppState>,
    Path((user_id, application_id)): Path<(String, String)>,
) -> (StatusCode, Json<Value>) {
    let store = state.store.read().await;
    match store
        .locs
        .get(&user_id)
        .and_then(|locs| locs.get(&application_id))
    {
        Some(loc) => (StatusCode::OK, Json(loc.clone())),
        None => not_found(),
    }
}

async fn get_loc(
    State(state): State<AppState>,
    Path((user_id, loc_id)): Path<(String, String)>,
) -> (StatusCode, Json<Value>) {
    let store = state.store.read().await;
    match store.locs.get(&user_id).and_then(|locs| locs.get(&loc_id)) {
        Some(loc) => (StatusCode::OK, Json(loc.clone())),
        None => not_found(),
    }
}

async fn activate_loc(
    State(state): State<AppState>,
    Path((user_id, loc_id)): Path<(String, String)>,
    Json(input): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let mut store = state.store.write().await;
    let (uuid, amount, status) = {
        let Some(locs) = store.locs.get_mut(&user_id) else {
            return not_found();
        };
        let Some(target) = loc_matching(locs, &loc_id).map(|loc| loc["uuid"].clone()) else {
            return not_found();
        };
        let uuid = target.as_str().unwrap_or_default().to_string();
        let loc = locs.get_mut(&uuid).expect("loc exists by lookup above");
        let status = input
            .get("status")
            .and_then(Value::as_str)
            .unwrap_or("ACTIVE")
            .to_string();
        loc["status"] = json!({ "name": status.clone() });
        (uuid, loc["amount"].as_f64().unwrap_or(0.0), status)
    };
    store.balances.insert(
        uuid,
        Balance {
            available: amount,
            current: 0.0,
        },
    );
    (StatusCode::OK, Json(json!({ "status": status })))
}

async fn promissory_note(
    State(state): State<AppState>,
    Path((user_id, loc_id)): Path<(String, String)>,
) -> (StatusCode, Json<Value>) {
    let store = state.store.read().await;
    let Some(locs) = store.locs.get(&user_id) else {
        return not_found();
    };
    if loc_matching(locs, &loc_id).is_none() {
        return not_found();
    }
    let document_uuid = Uuid::new_v4().to_string();
    (
        StatusCode::OK,
        Json(json!({
            "document_uuid": document_uuid.clone(),
            "document_url": format!("https://docs.onbo.mock/{document_uuid}.pdf")
        })),
    )
}

// --- draw-downs and repayments ---

fn resolve_loc_uuid(store: &Store, user_id: &str, loc_id: &str) -> Option<String> {
    store
        .locs
        .get(user_id)
        .and_then(|locs| loc_matching(locs, loc_id))
        .and_then(|loc| loc["uuid"].as_str().map(str::to_string))
}

async fn create_draw(
    State(state): State<AppState>,
    Path((user_id, loc_id)): Path<(String, String)>,
    Json(input): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let mut store = state.store.write().await;
    let Some(loc_uuid) = resolve_loc_uuid(&store, &user_id, &loc_id) else {
        return not_found();
    };
    let amount = input["amount"].as_f64().unwrap_or(0.0);
    let (available, current) = {
        let balance = store.balances.entry(loc_uuid.clone()).or_default();
        balance.available -= amount;
        balance.current += amount;
        (balance.available, balance.current)
    };
    let draws = store.draws.entry(loc_uuid).or_default();
    draws.push(json!({
        "id": draws.len() as i64 + 1,
        "amount": amount,
        "effective_date": "2024-01-15",
        "borrower_bank_account_uuid": Uuid::new_v4().to_string()
    }));
    (
        StatusCode::OK,
        Json(json!({ "available_credit": available, "current_credit": current })),
    )
}

async fn list_draws(
    State(state): State<AppState>,
    Path((user_id, loc_id)): Path<(String, String)>,
    Query(params): Query<HashMap<String, String>>,
) -> (StatusCode, Json<Value>) {
    let store = state.store.read().await;
    let Some(loc_uuid) = resolve_loc_uuid(&store, &user_id, &loc_id) else {
        return not_found();
    };
    let draws = store.draws.get(&loc_uuid).cloned().unwrap_or_default();
    (StatusCode::OK, Json(page(draws, &params)))
}

async fn create_payment(
    State(state): State<AppState>,
    Path((user_id, loc_id)): Path<(String, String)>,
    Json(input): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let mut store = state.store.write().await;
    let Some(loc_uuid) = resolve_loc_uuid(&store, &user_id, &loc_id) else {
        return not_found();
    };
    let amount = input["amount"].as_f64().unwrap_or(0.0);
    let (available, current) = {
        let balance = store.balances.entry(loc_uuid.clone()).or_default();
        balance.available += amount;
        balance.current -= amount;
        (balance.available, balance.current)
    };
    let payment_uuid = Uuid::new_v4().to_string();
    let payment = json!({
        "uuid": payment_uuid.clone(),
        "product": "REVOLVING",
        "payment_type": input["payment_type"].clone(),
        "effective_date": input["payment_date"].clone(),
        "amount": amount,
        "ending_balance": current,
        "status": "INITIATED"
    });
    store
        .payments
        .entry(loc_uuid)
        .or_default()
        .insert(payment_uuid.clone(), payment.clone());
    // every recorded payment also produces a webhook message
    let message_uuid = Uuid::new_v4().to_string();
    store.messages.insert(
        message_uuid.clone(),
        json!({
            "uuid": message_uuid.clone(),
            "event": "payment.updated",
            "payload": payment,
            "status": "SENT",
            "created_at": "2024-01-15T00:00:00Z"
        }),
    );
    (
        StatusCode::OK,
        Json(json!({
            "available_credit": available,
            "current_credit": current,
            "repayment_uuid": payment_uuid
        })),
    )
}

async fn list_payments(
    State(state): State<AppState>,
    Path((user_id, loc_id)): Path<(String, String)>,
    Query(params): Query<HashMap<String, String>>,
) -> (StatusCode, Json<Value>) {
    let store = state.store.read().await;
    let Some(loc_uuid) = resolve_loc_uuid(&store, &user_id, &loc_id) else {
        return not_found();
    };
    let payments = store
        .payments
        .get(&loc_uuid)
        .map(|payments| payments.values().cloned().collect())
        .unwrap_or_default();
    (StatusCode::OK, Json(page(sorted_by_uuid(payments), &params)))
}

async fn get_payment(
    State(state): State<AppState>,
    Path((user_id, loc_id, payment_id)): Path<(String, String, String)>,
) -> (StatusCode, Json<Value>) {
    let store = state.store.read().await;
    let Some(loc_uuid) = resolve_loc_uuid(&store, &user_id, &loc_id) else {
        return not_found();
    };
    match store
        .payments
        .get(&loc_uuid)
        .and_then(|payments| payments.get(&payment_id))
    {
        Some(payment) => (StatusCode::OK, Json(payment.clone())),
        None => not_found(),
    }
}

async fn get_statement(
    State(state): State<AppState>,
    Path((user_id, loc_id)): Path<(String, String)>,
) -> (StatusCode, Json<Value>) {
    let store = state.store.read().await;
    let Some(loc_uuid) = resolve_loc_uuid(&store, &user_id, &loc_id) else {
        return not_found();
    };
    let credit_limit = store
        .locs
        .get(&user_id)
        .and_then(|locs| locs.get(&loc_uuid))
        .and_then(|loc| loc["amount"].as_f64())
        .unwrap_or(0.0);
    let balance = store.balances.get(&loc_uuid).copied().unwrap_or(Balance {
        available: credit_limit,
        current: 0.0,
    });
    (
        StatusCode::OK,
        Json(json!({
            "data": {
                "next_billing_date": "2024-02-01",
                "principal_balance": balance.current,
                "interest_balance": 0.0,
                "payoff_balance": balance.current,
                "days_past_due": 0,
                "past_due_balance": 0.0,
                "next_payment_amount_due": 0.0,
                "next_payment_due_date": "2024-02-15",
                "suspense_balance": 0.0,
                "statements": [],
                "credit_limit": credit_limit,
                "available_credit": balance.available,
                "current_credit": balance.current
            }
        })),
    )
}

// --- webhooks ---

async fn list_endpoints(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    let store = state.store.read().await;
    // bare array, no pagination envelope
    let endpoints = sorted_by_uuid(store.endpoints.values().cloned().collect());
    (StatusCode::OK, Json(Value::Array(endpoints)))
}

async fn create_endpoint(
    State(state): State<AppState>,
    Json(mut input): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let uuid = Uuid::new_v4().to_string();
    input["uuid"] = json!(uuid.clone());
    state
        .store
        .write()
        .await
        .endpoints
        .insert(uuid, input.clone());
    (StatusCode::CREATED, Json(input))
}

async fn get_endpoint(
    State(state): State<AppState>,
    Path(endpoint_id): Path<String>,
) -> (StatusCode, Json<Value>) {
    let store = state.store.read().await;
    match store.endpoints.get(&endpoint_id) {
        Some(endpoint) => (StatusCode::OK, Json(endpoint.clone())),
        None => not_found(),
    }
}

async fn update_endpoint(
    State(state): State<AppState>,
    Path(endpoint_id): Path<String>,
    Json(mut input): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let mut store = state.store.write().await;
    if !store.endpoints.contains_key(&endpoint_id) {
        return not_found();
    }
    input["uuid"] = json!(endpoint_id.clone());
    store.endpoints.insert(endpoint_id, input.clone());
    (StatusCode::OK, Json(input))
}

async fn delete_endpoint(
    State(state): State<AppState>,
    Path(endpoint_id): Path<String>,
) -> (StatusCode, Json<Value>) {
    let mut store = state.store.write().await;
    match store.endpoints.remove(&endpoint_id) {
        Some(_) => (StatusCode::OK, Json(json!("deleted"))),
        None => not_found(),
    }
}

async fn resend_endpoint(
    State(state): State<AppState>,
    Path(endpoint_id): Path<String>,
) -> (StatusCode, Json<Value>) {
    let store = state.store.read().await;
    if !store.endpoints.contains_key(&endpoint_id) {
        return not_found();
    }
    (StatusCode::OK, Json(json!({})))
}

async fn list_messages(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> (StatusCode, Json<Value>) {
    let store = state.store.read().await;
    let messages: Vec<Value> = store
        .messages
        .values()
        .filter(|message| match params.get("event") {
            Some(event) => message["event"] == json!(event),
            None => true,
        })
        .cloned()
        .collect();
    (StatusCode::OK, Json(page(sorted_by_uuid(messages), &params)))
}

async fn get_message(
    State(state): State<AppState>,
    Path(message_id): Path<String>,
) -> (StatusCode, Json<Value>) {
    let store = state.store.read().await;
    match store.messages.get(&message_id) {
        Some(message) => (StatusCode::OK, Json(message.clone())),
        None => not_found(),
    }
}

async fn resend_message(
    State(state): State<AppState>,
    Path(message_id): Path<String>,
) -> (StatusCode, Json<Value>) {
    let store = state.store.read().await;
    if !store.messages.contains_key(&message_id) {
        return not_found();
    }
    (StatusCode::OK, Json(json!({})))
}
