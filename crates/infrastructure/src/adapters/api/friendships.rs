use friendlines_application::ports::{AuthEndpoint, CredentialStore};
use friendlines_domain::{
    AcceptFriendRequest, AuthError, FriendsPage, PageRequest, PendingRequestsPage,
    SendFriendRequest,
};
use reqwest::Method;

use crate::adapters::AuthorizedClient;

/// `/friendships` endpoints.
pub struct FriendshipsApi<'a, S, E> {
    client: &'a AuthorizedClient<S, E>,
}

impl<'a, S, E> FriendshipsApi<'a, S, E> {
    pub(crate) const fn new(client: &'a AuthorizedClient<S, E>) -> Self {
        Self { client }
    }
}

impl<S, E> FriendshipsApi<'_, S, E>
where
    S: CredentialStore + 'static,
    E: AuthEndpoint + 'static,
{
    /// Sends a friend request.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError`] if no valid token exists or the request fails.
    pub async fn send_request(&self, body: &SendFriendRequest) -> Result<(), AuthError> {
        let url = self.client.resource(&["friendships", "request"], &[])?;
        let request = self.client.authorize(Method::POST, url).await?.json(body);
        self.client.send_for_ack(request).await
    }

    /// Accepts a pending friend request.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError`] if no valid token exists or the request fails.
    pub async fn accept(&self, body: &AcceptFriendRequest) -> Result<(), AuthError> {
        let url = self.client.resource(&["friendships", "accept"], &[])?;
        let request = self.client.authorize(Method::POST, url).await?.json(body);
        self.client.send_for_ack(request).await
    }

    /// The caller's friends.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError`] if no valid token exists or the request fails.
    pub async fn list(&self, page: PageRequest) -> Result<FriendsPage, AuthError> {
        let url = self
            .client
            .resource(&["friendships", "list"], &page.query_pairs())?;
        let request = self.client.authorize(Method::GET, url).await?;
        self.client.send_for_data(request).await
    }

    /// Friend requests waiting for the caller's answer.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError`] if no valid token exists or the request fails.
    pub async fn pending(&self, page: PageRequest) -> Result<PendingRequestsPage, AuthError> {
        let url = self
            .client
            .resource(&["friendships", "requests"], &page.query_pairs())?;
        let request = self.client.authorize(Method::GET, url).await?;
        self.client.send_for_data(request).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use httpmock::prelude::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::adapters::test_support::{pagination, signed_in_client, user_json};

    #[tokio::test]
    async fn test_send_request_posts_friend_id() {
        let server = MockServer::start();
        let send = server.mock(|when, then| {
            when.method(POST)
                .path("/api/friendships/request")
                .header("authorization", "Bearer fresh-token")
                .json_body(json!({ "friendId": "u-2" }));
            then.status(201)
                .json_body(json!({ "success": true, "message": "Friend request sent" }));
        });

        let client = signed_in_client(&server);
        client
            .friendships()
            .send_request(&SendFriendRequest::new("u-2").unwrap())
            .await
            .unwrap();

        send.assert_calls(1);
    }

    #[tokio::test]
    async fn test_accept_unknown_request_is_rejected() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST)
                .path("/api/friendships/accept")
                .json_body(json!({ "requestId": "fr-404" }));
            then.status(404).json_body(
                json!({ "success": false, "error": { "message": "Friend request not found" } }),
            );
        });

        let client = signed_in_client(&server);
        let error = client
            .friendships()
            .accept(&AcceptFriendRequest::new("fr-404").unwrap())
            .await
            .unwrap_err();

        assert_eq!(error, AuthError::rejected(404, "Friend request not found"));
    }

    #[tokio::test]
    async fn test_unsuccessful_ack_is_malformed() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/api/friendships/accept");
            then.status(200).json_body(json!({ "success": false }));
        });

        let client = signed_in_client(&server);
        let error = client
            .friendships()
            .accept(&AcceptFriendRequest::new("fr-1").unwrap())
            .await
            .unwrap_err();

        assert!(matches!(error, AuthError::MalformedResponse { .. }));
    }

    #[tokio::test]
    async fn test_list_and_pending_use_default_paging() {
        let server = MockServer::start();
        let list = server.mock(|when, then| {
            when.method(GET)
                .path("/api/friendships/list")
                .query_param("page", "1")
                .query_param("limit", "20");
            then.status(200).json_body(json!({
                "success": true,
                "data": { "friends": [user_json("u-2", "ann")], "pagination": pagination(1) }
            }));
        });
        let pending = server.mock(|when, then| {
            when.method(GET).path("/api/friendships/requests");
            then.status(200).json_body(json!({
                "success": true,
                "data": { "requests": [], "pagination": pagination(0) }
            }));
        });

        let client = signed_in_client(&server);
        let friends = client.friendships().list(PageRequest::default()).await.unwrap();
        let requests = client
            .friendships()
            .pending(PageRequest::default())
            .await
            .unwrap();

        assert_eq!(friends.friends[0].username, "ann");
        assert!(requests.requests.is_empty());
        list.assert_calls(1);
        pending.assert_calls(1);
    }
}
