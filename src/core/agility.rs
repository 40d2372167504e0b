use crate::domain::model::{ContentList, Post};
use crate::domain::ports::{ConfigProvider, ContentSource};
use crate::utils::error::{BlogError, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// Picks the regional API host from the instance GUID suffix.
pub fn region_base_url(guid: &str) -> &'static str {
    if guid.ends_with("-d") {
        "https://api-dev.aglty.io"
    } else if guid.ends_with("-c") {
        "https://api-ca.aglty.io"
    } else if guid.ends_with("-e") {
        "https://api-eu.aglty.io"
    } else if guid.ends_with("-a") {
        "https://api-aus.aglty.io"
    } else if guid.ends_with("-us2") {
        "https://api-usa2.aglty.io"
    } else {
        "https://api.aglty.io"
    }
}

/// Validates a raw content list body. Any shape mismatch is fatal.
pub fn parse_content_list(body: &str) -> Result<Vec<Post>> {
    match serde_json::from_str::<ContentList>(body) {
        Ok(list) => {
            tracing::debug!("Validated content list: {:?}", list);
            Ok(list.items)
        }
        Err(e) => {
            tracing::error!("Validation failed: {}", e);
            Err(BlogError::InvalidData)
        }
    }
}

/// Client for the Agility Content Fetch API.
pub struct AgilityClient<C: ConfigProvider> {
    config: C,
    client: Client,
}

impl<C: ConfigProvider> AgilityClient<C> {
    pub fn new(config: C) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds()))
            .build()?;
        Ok(Self { config, client })
    }

    pub fn base_url(&self) -> String {
        match self.config.api_base_url() {
            Some(url) => url.trim_end_matches('/').to_string(),
            None => region_base_url(self.config.guid()).to_string(),
        }
    }

    /// `{base}/{guid}/{fetch|preview}/{locale}/list/{referenceName}`
    pub fn list_url(&self) -> String {
        let mode = if self.config.preview() { "preview" } else { "fetch" };
        format!(
            "{}/{}/{}/{}/list/{}",
            self.base_url(),
            self.config.guid(),
            mode,
            self.config.locale(),
            self.config.reference_name()
        )
    }
}

#[async_trait]
impl<C: ConfigProvider> ContentSource for AgilityClient<C> {
    async fn fetch_posts(&self) -> Result<Vec<Post>> {
        let url = self.list_url();
        tracing::debug!("Making API request to: {}", url);

        let response = self
            .client
            .get(&url)
            .header("APIKey", self.config.api_key())
            .query(&[("take", self.config.take())])
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("API response status: {}", status);

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BlogError::ApiStatusError {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        parse_content_list(&body)
    }
}
