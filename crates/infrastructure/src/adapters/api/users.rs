use friendlines_application::ports::{AuthEndpoint, CredentialStore};
use friendlines_domain::{AuthError, NewsflashPage, PageRequest, UserRecord, UserSearch, UsersPage};
use reqwest::Method;
use serde::Deserialize;

use crate::adapters::AuthorizedClient;

#[derive(Deserialize)]
struct Profile {
    user: UserRecord,
}

/// `/users` search and profile endpoints.
pub struct UsersApi<'a, S, E> {
    client: &'a AuthorizedClient<S, E>,
}

impl<'a, S, E> UsersApi<'a, S, E> {
    pub(crate) const fn new(client: &'a AuthorizedClient<S, E>) -> Self {
        Self { client }
    }
}

impl<S, E> UsersApi<'_, S, E>
where
    S: CredentialStore + 'static,
    E: AuthEndpoint + 'static,
{
    /// Searches users by name, username or email.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError`] if no valid token exists or the request fails.
    pub async fn search(&self, search: &UserSearch) -> Result<UsersPage, AuthError> {
        let url = self
            .client
            .resource(&["users", "search"], &search.query_pairs())?;
        let request = self.client.authorize(Method::GET, url).await?;
        self.client.send_for_data(request).await
    }

    /// Another user's profile.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError`] if no valid token exists or the request fails.
    pub async fn profile(&self, user_id: &str) -> Result<UserRecord, AuthError> {
        let url = self.client.resource(&["users", "profile", user_id], &[])?;
        self.fetch_profile(url).await
    }

    /// The caller's own profile.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError`] if no valid token exists or the request fails.
    pub async fn my_profile(&self) -> Result<UserRecord, AuthError> {
        let url = self.client.resource(&["users", "profile"], &[])?;
        self.fetch_profile(url).await
    }

    /// Newsflashes written by one user.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError`] if no valid token exists or the request fails.
    pub async fn newsflashes(
        &self,
        user_id: &str,
        page: PageRequest,
    ) -> Result<NewsflashPage, AuthError> {
        let url = self
            .client
            .resource(&["newsflashes", "author", user_id], &page.query_pairs())?;
        let request = self.client.authorize(Method::GET, url).await?;
        self.client.send_for_data(request).await
    }

    async fn fetch_profile(&self, url: reqwest::Url) -> Result<UserRecord, AuthError> {
        let request = self.client.authorize(Method::GET, url).await?;
        let profile: Profile = self.client.send_for_data(request).await?;
        Ok(profile.user.normalized())
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
    async fn test_search_sends_query_and_paging() {
        let server = MockServer::start();
        let search = server.mock(|when, then| {
            when.method(GET)
                .path("/api/users/search")
                .query_param("q", "ann")
                .query_param("page", "1")
                .query_param("limit", "20")
                .header("authorization", "Bearer fresh-token");
            then.status(200).json_body(json!({
                "success": true,
                "data": { "users": [user_json("u-2", "ann")], "pagination": pagination(1) }
            }));
        });

        let client = signed_in_client(&server);
        let page = client
            .users()
            .search(&UserSearch::new(" ann ", PageRequest::default()).unwrap())
            .await
            .unwrap();

        assert_eq!(page.users[0].uuid, "u-2");
        assert_eq!(page.pagination.total, 1);
        search.assert_calls(1);
    }

    #[tokio::test]
    async fn test_profile_resolves_legacy_id() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/api/users/profile/m-9");
            then.status(200).json_body(json!({
                "success": true,
                "data": { "user": { "_id": "m-9", "username": "old", "fullName": "Old", "email": "o@x.io" } }
            }));
        });

        let client = signed_in_client(&server);
        let user = client.users().profile("m-9").await.unwrap();

        assert_eq!(user.uuid, "m-9");
    }

    #[tokio::test]
    async fn test_my_profile_and_author_feed() {
        let server = MockServer::start();
        let me = server.mock(|when, then| {
            when.method(GET).path("/api/users/profile");
            then.status(200)
                .json_body(json!({ "success": true, "data": { "user": user_json("u-1", "jdoe") } }));
        });
        let authored = server.mock(|when, then| {
            when.method(GET)
                .path("/api/newsflashes/author/u-1")
                .query_param("limit", "10");
            then.status(200).json_body(json!({
                "success": true,
                "data": { "newsflashes": [], "pagination": pagination(0) }
            }));
        });

        let client = signed_in_client(&server);
        let user = client.users().my_profile().await.unwrap();
        let page = client
            .users()
            .newsflashes(&user.uuid, PageRequest::new(1, 10).unwrap())
            .await
            .unwrap();

        assert_eq!(user.username, "jdoe");
        assert!(!page.pagination.has_next());
        me.assert_calls(1);
        authored.assert_calls(1);
    }
}
