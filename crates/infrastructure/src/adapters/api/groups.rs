use friendlines_application::ports::{AuthEndpoint, CredentialStore};
use friendlines_domain::{
    AuthError, CreateGroup, Group, GroupUpdate, GroupsPage, InviteToGroup, NewsflashPage,
    PageRequest,
};
use reqwest::Method;
use serde::Deserialize;
use tracing::info;

use crate::adapters::AuthorizedClient;

#[derive(Deserialize)]
struct GroupData {
    group: Group,
}

/// `/groups` endpoints, plus the group newsflash feed.
pub struct GroupsApi<'a, S, E> {
    client: &'a AuthorizedClient<S, E>,
}

impl<'a, S, E> GroupsApi<'a, S, E> {
    pub(crate) const fn new(client: &'a AuthorizedClient<S, E>) -> Self {
        Self { client }
    }
}

impl<S, E> GroupsApi<'_, S, E>
where
    S: CredentialStore + 'static,
    E: AuthEndpoint + 'static,
{
    /// Creates a group owned by the caller.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError`] if no valid token exists or the request fails.
    pub async fn create(&self, group: &CreateGroup) -> Result<Group, AuthError> {
        let url = self.client.resource(&["groups", "create"], &[])?;
        let request = self.client.authorize(Method::POST, url).await?.json(group);
        let created: GroupData = self.client.send_for_data(request).await?;
        info!(id = %created.group.id, "group created");
        Ok(created.group)
    }

    /// Groups the caller belongs to.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError`] if no valid token exists or the request fails.
    pub async fn mine(&self, page: PageRequest) -> Result<GroupsPage, AuthError> {
        let url = self
            .client
            .resource(&["groups", "my-groups"], &page.query_pairs())?;
        let request = self.client.authorize(Method::GET, url).await?;
        self.client.send_for_data(request).await
    }

    /// One group by id.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError`] if no valid token exists or the request fails.
    pub async fn get(&self, group_id: &str) -> Result<Group, AuthError> {
        let url = self.client.resource(&["groups", group_id], &[])?;
        let request = self.client.authorize(Method::GET, url).await?;
        let data: GroupData = self.client.send_for_data(request).await?;
        Ok(data.group)
    }

    /// Changes a group's name or description.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError`] if no valid token exists or the request fails.
    pub async fn update(&self, group_id: &str, update: &GroupUpdate) -> Result<(), AuthError> {
        let url = self.client.resource(&["groups", group_id], &[])?;
        let request = self.client.authorize(Method::PUT, url).await?.json(update);
        self.client.send_for_ack(request).await
    }

    /// Deletes a group.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError`] if no valid token exists or the request fails.
    pub async fn delete(&self, group_id: &str) -> Result<(), AuthError> {
        let url = self.client.resource(&["groups", group_id], &[])?;
        let request = self.client.authorize(Method::DELETE, url).await?;
        self.client.send_for_ack(request).await?;
        info!(id = group_id, "group deleted");
        Ok(())
    }

    /// Invites a user into a group.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError`] if no valid token exists or the request fails.
    pub async fn invite(&self, invite: &InviteToGroup) -> Result<(), AuthError> {
        let url = self.client.resource(&["groups", "invite"], &[])?;
        let request = self.client.authorize(Method::POST, url).await?.json(invite);
        self.client.send_for_ack(request).await
    }

    /// Newsflashes posted to a group.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError`] if no valid token exists or the request fails.
    pub async fn feed(&self, group_id: &str, page: PageRequest) -> Result<NewsflashPage, AuthError> {
        let url = self
            .client
            .resource(&["newsflashes", "group", group_id], &page.query_pairs())?;
        let request = self.client.authorize(Method::GET, url).await?;
        self.client.send_for_data(request).await
    }
}
