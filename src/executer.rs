//! Provides an asynchronous execution framework for sending HTTP requests to Google.
//!
//! This module:
//! - Defines the `Executer` trait, which provides a unified interface for making HTTP requests.
//! - Implements executers for the code-for-token exchange, the profile fetch,
//!   and credential refresh requests.
//!
//! Each executer builds a fresh `reqwest::Client` per call and configures no
//! timeout; a hung endpoint hangs the request being handled.

use std::{collections::HashMap, error::Error, pin::Pin};

use crate::{
    credentials::{RefreshRequest, RefreshResponse},
    exchange::{TokenExchangeRequest, TokenExchangeResponse},
    profile::{ProfileRequest, UserProfile},
};
use reqwest::Client;
use thiserror::Error;
use tracing::error;
use url::Url;

/// generic asynchronous execution interface for sending HTTP requests.
/// Key Components:
/// - Req: The request type that the executer will handle.
/// - Response: The expected response type.
/// - Error: The error type that will be returned on failure.
/// - Future: The asynchronous execution result, returning either Response or Error
pub trait Executer<'a, Req>
where
    Req: Send,
{
    type Response;
    type Error: Error;
    type Future: Future<Output = Result<Self::Response, Self::Error>> + Send + 'a;

    fn execute(&'a self, req: &'a Req) -> Self::Future;
}

/// Defines possible errors that can occur during request execution.
#[derive(Debug, Clone, Error)]
pub enum ExecuteError {
    #[error("Failed to parse data")]
    Parse,
    #[error("Failed to send request")]
    Send,
    #[error("Failed to parse url")]
    URL,
}

/// Handles the code-for-token exchange against the token endpoint.
pub struct TokenExchangeExe;

/// Request Workflow
/// 1. Parse the token endpoint URL.
/// 2. Prepare the form parameters.
/// 3. Send an HTTP POST request.
/// 4. Parse and return the response as `TokenExchangeResponse`.
impl<'a> Executer<'a, TokenExchangeRequest> for TokenExchangeExe {
    type Response = TokenExchangeResponse;
    type Error = ExecuteError;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send + 'a>>;

    fn execute(&'a self, req: &'a TokenExchangeRequest) -> Self::Future {
        Box::pin(async move {
            let url = Url::parse(req.token_endpoint()).map_err(|e| {
                error!("Failed to parse url: {:?}", e);
                ExecuteError::URL
            })?;

            let mut params = HashMap::new();
            params.insert("code", req.code());
            params.insert("client_id", req.client_id());
            params.insert("client_secret", req.client_secret());
            params.insert("redirect_uri", req.redirect_uri());
            params.insert("grant_type", req.grant_type());

            let client = Client::new();
            let res = client
                .post(url)
                .header("Content-Type", "application/x-www-form-urlencoded")
                .form(&params)
                .send()
                .await
                .map_err(|e| {
                    error!("Failed to send request: {:?}", e);
                    ExecuteError::Send
                })?;
            let res_json = res.json::<TokenExchangeResponse>().await.map_err(|e| {
                error!("Failed to parse JSON: {:?}", e);
                ExecuteError::Parse
            })?;
            Ok(res_json)
        })
    }
}

/// Handles the profile fetch against the userinfo endpoint.
pub struct ProfileExe;

/// Request Workflow
/// 1. Parse the userinfo endpoint URL.
/// 2. Send an HTTP GET request with the access token as a bearer header.
/// 3. Parse and return the response as `UserProfile`.
impl<'a> Executer<'a, ProfileRequest> for ProfileExe {
    type Response = UserProfile;
    type Error = ExecuteError;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send + 'a>>;

    fn execute(&'a self, req: &'a ProfileRequest) -> Self::Future {
        Box::pin(async move {
            let url = Url::parse(req.userinfo_endpoint()).map_err(|e| {
                error!("Failed to parse url: {:?}", e);
                ExecuteError::URL
            })?;

            let client = Client::new();
            let res = client
                .get(url)
                .header(
                    "Authorization",
                    format!("Bearer {}", req.access_token().value()),
                )
                .send()
                .await
                .map_err(|e| {
                    error!("Failed to send request: {:?}", e);
                    ExecuteError::Send
                })?;
            let res_json = res.json::<UserProfile>().await.map_err(|e| {
                error!("Failed to parse JSON: {:?}", e);
                ExecuteError::Parse
            })?;
            Ok(res_json)
        })
    }
}

/// Handles refreshing a stored credential using its refresh token.
pub struct RefreshExe;

/// Request Workflow
/// 1. Prepare the form parameters.
/// 2. Send an HTTP POST request to the token endpoint.
/// 3. Parse and return the new `RefreshResponse`.
impl<'a> Executer<'a, RefreshRequest> for RefreshExe {
    type Response = RefreshResponse;
    type Error = ExecuteError;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send + 'a>>;

    fn execute(&'a self, req: &'a RefreshRequest) -> Self::Future {
        Box::pin(async move {
            let mut params = HashMap::new();
            params.insert("client_id", req.client_id());
            params.insert("client_secret", req.client_secret());
            params.insert("refresh_token", req.refresh_token());
            params.insert("grant_type", req.grant_type());

            let client = Client::new();
            let res = client
                .post(req.token_endpoint())
                .header("Content-Type", "application/x-www-form-urlencoded")
                .form(&params)
                .send()
                .await
                .map_err(|e| {
                    error!("Failed to send request: {:?}", e);
                    ExecuteError::Send
                })?;
            let res_json = res.json::<RefreshResponse>().await.map_err(|e| {
                error!("Failed to parse JSON: {:?}", e);
                ExecuteError::Parse
            })?;
            Ok(res_json)
        })
    }
}
