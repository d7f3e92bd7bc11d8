use std::time::Duration;

use url::Url;

use crate::config::ScraperConfig;
use crate::error::{Result, ScrapeError};
use crate::model::Category;

/// HTTP side of the scraper: builds page URLs and fetches bodies.
#[derive(Clone)]
pub struct PageFetcher {
    client: reqwest::Client,
    base_url: Url,
}

impl PageFetcher {
    pub fn new(config: &ScraperConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Self::with_client(client, &config.base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: &str) -> Result<Self> {
        let mut base_url = Url::parse(base_url)?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Ok(Self { client, base_url })
    }

    /// `<base>/<category>`
    pub fn landing_url(&self, category: &Category) -> Result<Url> {
        Ok(self.base_url.join(category.as_str())?)
    }

    /// `<base>/<category>/<page>`
    pub fn page_url(&self, category: &Category, page: u32) -> Result<Url> {
        Ok(self.base_url.join(&format!("{}/{}", category.as_str(), page))?)
    }

    /// GET `url`; any non-success status is a [`ScrapeError::Transport`].
    pub async fn fetch(&self, url: Url) -> Result<String> {
        log::debug!("GET {}", url);

        let response = self.client.get(url.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScrapeError::Transport {
                url: url.to_string(),
                status,
            });
        }

        Ok(response.text().await?)
    }

    pub async fn fetch_landing(&self, category: &Category) -> Result<String> {
        self.fetch(self.landing_url(category)?).await
    }

    pub async fn fetch_page(&self, category: &Category, page: u32) -> Result<String> {
        self.fetch(self.page_url(category, page)?).await
    }
}
