//! Decoding of bearer tokens presented to the introspection route.
//!
//! Tokens are verified as HS256 JWTs with the OAuth client secret as the
//! symmetric key. Registered claims are not required, so a token carrying
//! nothing but custom claims decodes; an `exp` that is present and past
//! still fails verification.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde_json::{Map, Value};
use tracing::error;

use crate::error::Error;

/// The decoded payload of a verified bearer token.
pub type Claims = Map<String, Value>;

/// Verifies the token's HS256 signature against `secret` and returns its
/// claims. Malformed tokens, wrong algorithms and bad signatures all map to
/// `Error::TokenVerification`.
pub fn decode_claims(token: &str, secret: &str) -> Result<Claims, Error> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.required_spec_claims.clear();

    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|e| {
        error!("Failed to verify bearer token: {}", e);
        Error::TokenVerification
    })?;
    Ok(data.claims)
}

// ==========Tests==========
#[cfg(test)]
mod tests {
    use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
    use serde_json::json;

    use crate::error::Error;

    use super::decode_claims;

    fn sign(claims: &serde_json::Value, secret: &str) -> String {
        encode(
            &Header::new(Algorithm::HS256),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn test_decode_claims_roundtrip() {
        let token = sign(&json!({"sub": "1"}), "my_secret");

        let claims = decode_claims(&token, "my_secret").unwrap();
        assert_eq!(claims.len(), 1);
        assert_eq!(claims.get("sub"), Some(&json!("1")));
    }

    #[test]
    fn test_decode_claims_wrong_key() {
        let token = sign(&json!({"sub": "1"}), "another_secret");

        let result = decode_claims(&token, "my_secret");
        assert!(matches!(result, Err(Error::TokenVerification)));
    }

    #[test]
    fn test_decode_claims_malformed_token() {
        let result = decode_claims("not.a.jwt", "my_secret");
        assert!(matches!(result, Err(Error::TokenVerification)));
    }

    #[test]
    fn test_decode_claims_expired_token() {
        let token = sign(&json!({"sub": "1", "exp": 1}), "my_secret");

        let result = decode_claims(&token, "my_secret");
        assert!(matches!(result, Err(Error::TokenVerification)));
    }
}
