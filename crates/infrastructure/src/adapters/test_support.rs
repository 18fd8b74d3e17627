//! Mock-server fixtures shared by the adapter tests.

use std::sync::Arc;

use friendlines_application::{InMemoryCredentialStore, TokenCoordinator};
use friendlines_domain::{AccessToken, UserRecord};
use httpmock::prelude::*;
use reqwest::{Client, Url};
use serde_json::json;

use super::{AuthorizedClient, ReqwestAuthClient};

pub type TestClient = AuthorizedClient<Arc<InMemoryCredentialStore>, ReqwestAuthClient>;

/// Answers `POST /api/auth/refresh` with `token`.
pub fn refresh_ok<'a>(server: &'a MockServer, token: &str) -> httpmock::Mock<'a> {
    let token = token.to_string();
    server.mock(move |when, then| {
        when.method(POST).path("/api/auth/refresh");
        then.status(200).json_body(json!({
            "success": true,
            "data": {
                "user": { "uuid": "u-1", "username": "jdoe", "fullName": "Jane", "email": "j@x.io" },
                "accessToken": token
            }
        }));
    })
}

pub fn client_for(server: &MockServer, store: Arc<InMemoryCredentialStore>) -> TestClient {
    let base = Url::parse(&server.url("/api")).unwrap();
    let endpoint = ReqwestAuthClient::with_client(Client::new(), base.clone());
    let http = endpoint.http_client().clone();
    AuthorizedClient::new(http, base, TokenCoordinator::new(store, endpoint))
}

pub fn signed_in_store() -> Arc<InMemoryCredentialStore> {
    Arc::new(InMemoryCredentialStore::with_session(
        AccessToken::new("stale-token"),
        UserRecord::new("u-1", "jdoe", "Jane", "j@x.io"),
    ))
}

/// A signed-in client whose refresh hands out `fresh-token`.
pub fn signed_in_client(server: &MockServer) -> TestClient {
    refresh_ok(server, "fresh-token");
    client_for(server, signed_in_store())
}

pub fn pagination(total: u64) -> serde_json::Value {
    json!({ "page": 1, "limit": 20, "total": total, "totalPages": 1 })
}

pub fn user_json(uuid: &str, username: &str) -> serde_json::Value {
    json!({ "uuid": uuid, "username": username, "fullName": username, "email": format!("{username}@x.io") })
}
