use axum::{
    Json,
    response::{IntoResponse, Response},
};
use http::StatusCode;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum Error {
    #[error("Failed to read environment variable: {0}")]
    Env(String),
    #[error("Failed to read client secret file")]
    ClientSecretRead,
    #[error("Failed to parse client secret file")]
    ClientSecretParse,
    #[error("Client secret file has no redirect uri")]
    RedirectURIMissing,
    #[error("Failed to exchange authorization code")]
    Exchange,
    #[error("Failed to fetch user profile")]
    Profile,
    #[error("Authorization header missing or malformed")]
    MissingBearer,
    #[error("Failed to verify bearer token")]
    TokenVerification,
    #[error("Failed to read credential file")]
    CredentialRead,
    #[error("Failed to parse credential file")]
    CredentialParse,
    #[error("Failed to write credential file")]
    CredentialWrite,
    #[error("Failed to refresh credential")]
    Refresh,
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = match self {
            Error::MissingBearer | Error::TokenVerification => StatusCode::UNAUTHORIZED,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

// ==========Tests==========
#[cfg(test)]
mod tests {
    use axum::response::IntoResponse;
    use http::StatusCode;

    use super::Error;

    #[test]
    fn test_auth_errors_map_to_unauthorized() {
        let res = Error::MissingBearer.into_response();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

        let res = Error::TokenVerification.into_response();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_other_errors_map_to_server_error() {
        let res = Error::Exchange.into_response();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let res = Error::ClientSecretRead.into_response();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
