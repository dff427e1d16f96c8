//! Fetching basic profile information with a freshly exchanged access token.
//!
//! This module:
//! - `ProfileRequest`: A data structure for sending requests to the userinfo endpoint.
//! - `UserProfile`: The fields of the profile response the service forwards.

use serde::{Deserialize, Serialize};

use crate::{
    config::{Config, UserInfoEndPoint},
    exchange::AccessToken,
};

/// A structure used to send a profile request to Google's userinfo endpoint.
/// The access token travels in an `Authorization: Bearer` header.
#[derive(Debug, Clone)]
pub struct ProfileRequest {
    userinfo_endpoint: UserInfoEndPoint,
    access_token: AccessToken,
}

impl ProfileRequest {
    /// Creates a new request using the endpoint from `Config`.
    pub fn new(config: &Config, access_token: AccessToken) -> Self {
        Self {
            userinfo_endpoint: config.userinfo_endpoint.to_owned(),
            access_token,
        }
    }

    pub fn userinfo_endpoint(&self) -> &str {
        &self.userinfo_endpoint.0
    }

    pub fn access_token(&self) -> &AccessToken {
        &self.access_token
    }
}

/// The slice of the userinfo response that is forwarded to the frontend.
///
/// `name` and `email` are required; a response missing either fails the
/// decode and surfaces as a server error on the callback route.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    name: String,
    email: String,
}

impl UserProfile {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }
}
