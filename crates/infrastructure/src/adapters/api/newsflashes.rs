use friendlines_application::ports::{AuthEndpoint, CredentialStore};
use friendlines_domain::{AuthError, CreateNewsflash, Newsflash, NewsflashPage, PageRequest};
use reqwest::Method;
use serde::Deserialize;
use tracing::info;

use crate::adapters::AuthorizedClient;

#[derive(Deserialize)]
struct Created {
    newsflash: Newsflash,
}

/// `/newsflashes` endpoints.
pub struct NewsflashesApi<'a, S, E> {
    client: &'a AuthorizedClient<S, E>,
}

impl<'a, S, E> NewsflashesApi<'a, S, E> {
    pub(crate) const fn new(client: &'a AuthorizedClient<S, E>) -> Self {
        Self { client }
    }
}

impl<S, E> NewsflashesApi<'_, S, E>
where
    S: CredentialStore + 'static,
    E: AuthEndpoint + 'static,
{
    /// Posts a newsflash.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError`] if no valid token exists or the request fails.
    pub async fn create(&self, newsflash: &CreateNewsflash) -> Result<Newsflash, AuthError> {
        let url = self.client.resource(&["newsflashes", "create"], &[])?;
        let request = self.client.authorize(Method::POST, url).await?.json(newsflash);
        let created: Created = self.client.send_for_data(request).await?;
        info!(id = %created.newsflash.id, target = ?newsflash.target_type(), "newsflash created");
        Ok(created.newsflash)
    }

    /// The caller's feed: newsflashes from friends and groups.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError`] if no valid token exists or the request fails.
    pub async fn my_feed(&self, page: PageRequest) -> Result<NewsflashPage, AuthError> {
        let url = self
            .client
            .resource(&["newsflashes", "my-feed"], &page.query_pairs())?;
        let request = self.client.authorize(Method::GET, url).await?;
        self.client.send_for_data(request).await
    }
}
