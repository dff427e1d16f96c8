//! Backend that mediates Google's OAuth2 login flow for a web frontend.
//!
//! The service exposes a small HTTP surface:
//! - Hand out the Google consent-screen URL for the frontend to open
//! - Receive the authorization code on the callback route, exchange it for an
//!   access token, fetch the user's profile and redirect the user back to the
//!   frontend with name/email attached
//! - Decode a bearer token presented by a client as an HS256 JWT and return
//!   its claims
//!
//! [google document](https://developers.google.com/identity/protocols/oauth2/web-server)
//! # Caution
//! - This service talks to Google directly over HTTPS; outbound calls carry
//!   no timeout, so a hung Google endpoint hangs the request being handled.
//! - Profile data is forwarded to the frontend via redirect and never stored
//!   server-side.
pub mod auth_url;
pub mod claims;
pub mod config;
pub mod credentials;
pub mod error;
pub mod exchange;
pub mod executer;
pub mod profile;
pub mod routes;
