//! Small user directory service wired with the keystone helpers

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Extension, Json, Router};
use http::StatusCode;
use keystone_cache::Cache;
use keystone_config::Config;
use keystone_fault::{Fault, FaultBuilder, Tag};
use keystone_http::{
    ApiError, BodyLimit, ClientIp, RequestLogger, Valid, Validate, read_query_int_optional, with_logger, write_json,
    write_success,
};
use keystone_pagination::Paginated;
use serde::{Deserialize, Serialize};

use super::logs::CapturedLogs;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub email: String,
    pub name: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateUser {
    email: String,
    name: String,
}

impl Validate for CreateUser {
    type Error = String;

    fn validate(&self) -> Result<(), String> {
        let mut problems = Vec::new();
        if !self.email.contains('@') {
            problems.push("email: must be a valid address.");
        }
        if self.name.trim().is_empty() {
            problems.push("name: is required.");
        }

        if problems.is_empty() { Ok(()) } else { Err(problems.join("; ")) }
    }
}

/// Shared state, with a counter of store reads behind the cache
#[derive(Clone)]
pub struct AppState {
    users: Arc<Mutex<Vec<User>>>,
    cache: Cache,
    pub store_reads: Arc<AtomicUsize>,
}

impl AppState {
    fn find(&self, id: u64) -> Result<User, Fault> {
        self.store_reads.fetch_add(1, Ordering::SeqCst);
        let users = self
            .users
            .lock()
            .map_err(|_| Fault::internal_server_error("user store poisoned"))?;

        users
            .iter()
            .find(|user| user.id == id)
            .cloned()
            .ok_or_else(|| Fault::not_found(format!("user {id} not found")))
    }
}

/// A running app's handles
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub logs: CapturedLogs,
}

/// Build the app from TOML configuration
pub fn build(config_toml: &str) -> anyhow::Result<TestApp> {
    let config = Config::from_toml(config_toml)?;
    let logs = CapturedLogs::default();
    let logger = logs.logger(&config.logging);

    let cache_config = config.cache.clone().unwrap_or_default();
    let cache = Cache::from_config(&cache_config, logger.clone())?;

    let state = AppState {
        users: Arc::new(Mutex::new(Vec::new())),
        cache,
        store_reads: Arc::new(AtomicUsize::new(0)),
    };

    let router = Router::new()
        .route("/users", get(list_users).post(create_user))
        .route("/users/{id}", get(show_user).delete(evict_user))
        .route("/ip", get(show_ip))
        .route("/boom", get(boom))
        .with_state(state.clone())
        .layer(Extension(BodyLimit::from(&config.http)));

    Ok(TestApp {
        router: with_logger(router, logger),
        state,
        logs,
    })
}

async fn create_user(
    State(state): State<AppState>,
    RequestLogger(logger): RequestLogger,
    Valid(input): Valid<CreateUser>,
) -> Result<axum::response::Response, ApiError> {
    let mut users = state
        .users
        .lock()
        .map_err(|_| Fault::internal_server_error("user store poisoned"))?;

    if users.iter().any(|user| user.email == input.email) {
        return Err(Fault::conflict("email already registered").into());
    }

    let user = User {
        id: users.len() as u64 + 1,
        email: input.email,
        name: input.name,
    };
    users.push(user.clone());
    logger.in_scope(|| tracing::info!(user_id = user.id, "user created"));

    Ok(write_json(StatusCode::CREATED, &user))
}

async fn show_user(State(state): State<AppState>, Path(id): Path<u64>) -> Result<Json<User>, ApiError> {
    let key = format!("user:{id}");
    let ttl = state.cache.default_ttl();
    let store = state.clone();
    let user = state
        .cache
        .get_or_set(&key, ttl, move || async move { store.find(id) })
        .await?;

    Ok(Json(user))
}

async fn evict_user(State(state): State<AppState>, Path(id): Path<u64>) -> Result<axum::response::Response, ApiError> {
    let key = format!("user:{id}");
    state.cache.delete(&[key.as_str()]).await?;
    Ok(write_success(StatusCode::OK))
}

async fn list_users(
    State(state): State<AppState>,
    Query(query): Query<HashMap<String, String>>,
) -> Result<Json<Paginated<User>>, ApiError> {
    let page = read_query_int_optional(&query, "page").unwrap_or(1);
    let per_page = read_query_int_optional(&query, "per_page").unwrap_or(10);

    let (Ok(page), Ok(per_page)) = (u64::try_from(page), u64::try_from(per_page)) else {
        return Err(FaultBuilder::bad_request("page and per_page must not be negative")
            .tag(Tag::VALIDATION_ERROR)
            .build()
            .into());
    };

    let users = state
        .users
        .lock()
        .map_err(|_| Fault::internal_server_error("user store poisoned"))?;
    let skip = usize::try_from(page.saturating_sub(1) * per_page).unwrap_or(usize::MAX);
    let take = usize::try_from(per_page).unwrap_or(usize::MAX);
    let items = users.iter().skip(skip).take(take).cloned().collect();

    Ok(Json(Paginated::new(items, users.len() as u64, page, per_page)))
}

async fn show_ip(ClientIp(ip): ClientIp) -> String {
    ip.unwrap_or_default()
}

async fn boom() -> Result<(), ApiError> {
    let err = anyhow::anyhow!("connection to 10.0.0.5:5432 refused");
    Err(err.context("loading dashboard").into())
}
