use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, warn};
use url::Url;

use super::{DataSource, LoadError};

/// CSV fetched over HTTP
pub struct HttpSource {
    client: Client,
    url: Url,
}

impl HttpSource {
    pub fn new(url: Url) -> Result<Self, LoadError> {
        let client = Client::builder()
            .user_agent(concat!("peru-dashboard/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client, url })
    }
}

#[async_trait]
impl DataSource for HttpSource {
    fn describe(&self) -> String {
        self.url.to_string()
    }

    async fn fetch_text(&self) -> Result<String, LoadError> {
        debug!("GET {}", self.url);
        let response = self.client.get(self.url.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            warn!("❌ {} returned {}", self.url, status);
            return Err(LoadError::Status {
                url: self.url.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response.text().await?)
    }
}
