//! The HTTP surface of the service: router construction and the five
//! request handlers.
//!
//! Handlers share only the read-only configuration held in `AppState`; there
//! is no other cross-request state. CORS is deliberately wide open so any
//! frontend origin can drive the login flow.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Query, State},
    response::{IntoResponse, Redirect},
    routing::get,
};
use http::{HeaderMap, header::AUTHORIZATION};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tower_http::cors::{Any, CorsLayer};
use tracing::{debug, error};

use crate::{
    auth_url::{AdditionalScope, AuthCodeRequest},
    claims::{Claims, decode_claims},
    config::Config,
    error::Error,
    exchange::TokenExchangeRequest,
    executer::{Executer, ProfileExe, TokenExchangeExe},
    profile::ProfileRequest,
};

/// Application state that holds the process-wide `Config`.
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: Config,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self { config }
    }
}

/// Builds the service router with the permissive CORS layer attached.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/demo", get(demo))
        .route("/login/google", get(login_google))
        .route("/auth/google", get(auth_google))
        .route("/token", get(introspect_token))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(Arc::new(state))
}

async fn root() -> impl IntoResponse {
    Json(json!({ "Hello": "World" }))
}

async fn demo() -> impl IntoResponse {
    debug!("Reached backend");
    Json(json!({ "Reached": "Backend" }))
}

#[derive(Debug, Clone, Serialize)]
struct AuthUrlResponse {
    url: String,
}

/// Hands the frontend the consent-screen URL to open.
async fn login_google(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let scope = Some([AdditionalScope::Profile, AdditionalScope::Email].into_iter());
    let url = AuthCodeRequest::new(true, &state.config, scope).into_url();
    Json(AuthUrlResponse { url })
}

#[derive(Debug, Clone, Deserialize)]
struct CallbackQuery {
    code: String,
}

/// Receives the authorization code from Google, exchanges it for an access
/// token, fetches the profile and redirects back to the frontend with the
/// name and email attached as query parameters.
async fn auth_google(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CallbackQuery>,
) -> Result<Redirect, Error> {
    let exchange_req = TokenExchangeRequest::new(&state.config, query.code.into());
    let exchange_res = TokenExchangeExe.execute(&exchange_req).await.map_err(|e| {
        error!("Failed to exchange authorization code: {}", e);
        Error::Exchange
    })?;

    let profile_req = ProfileRequest::new(&state.config, exchange_res.access_token().to_owned());
    let profile = ProfileExe.execute(&profile_req).await.map_err(|e| {
        error!("Failed to fetch user profile: {}", e);
        Error::Profile
    })?;

    let redirect_url = format!(
        "{}?name={}&email={}",
        state.config.frontend_url.0,
        profile.name(),
        profile.email(),
    );
    Ok(Redirect::temporary(&redirect_url))
}

/// Decodes the presented bearer token as an HS256 JWT and returns its claims.
async fn introspect_token(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<Claims>, Error> {
    let token = bearer_token(&headers).ok_or(Error::MissingBearer)?;
    let claims = decode_claims(token, &state.config.client_secret.0)?;
    Ok(Json(claims))
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}
