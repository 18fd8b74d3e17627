//! HTTP adapters for the backend REST API.

pub mod api;
mod authorized_client;
mod response;
mod reqwest_auth_client;

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, dead_code)]
pub(crate) mod test_support;

pub use authorized_client::AuthorizedClient;
pub use reqwest_auth_client::ReqwestAuthClient;
