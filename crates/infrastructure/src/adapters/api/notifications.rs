use friendlines_application::ports::{AuthEndpoint, CredentialStore};
use friendlines_domain::{AuthError, RegisterDevice, RegisteredDevice};
use reqwest::Method;
use tracing::info;

use crate::adapters::AuthorizedClient;

/// `/notifications` endpoints.
pub struct NotificationsApi<'a, S, E> {
    client: &'a AuthorizedClient<S, E>,
}

impl<'a, S, E> NotificationsApi<'a, S, E> {
    pub(crate) const fn new(client: &'a AuthorizedClient<S, E>) -> Self {
        Self { client }
    }
}

impl<S, E> NotificationsApi<'_, S, E>
where
    S: CredentialStore + 'static,
    E: AuthEndpoint + 'static,
{
    /// Registers this device for push notifications.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError`] if no valid token exists or the request fails.
    pub async fn register_device(
        &self,
        device: &RegisterDevice,
    ) -> Result<RegisteredDevice, AuthError> {
        let url = self
            .client
            .resource(&["notifications", "register-device"], &[])?;
        let request = self.client.authorize(Method::POST, url).await?.json(device);
        let registered: RegisteredDevice = self.client.send_for_data(request).await?;
        info!(id = %registered.id, platform = %registered.platform, "device registered");
        Ok(registered)
    }
}
