use crate::error::{Result, ScanError};
use reqwest::Client;
use std::time::Duration;
use tracing::debug;
use url::Url;

const USER_AGENT: &str = "Liftoff/0.1 (https://github.com/trapdoorsec/liftoff)";

/// Blocking-in-sequence page fetcher bound to one site
pub struct Fetcher {
    client: Client,
    base_url: Url,
}

impl Fetcher {
    /// Client with reqwest's own defaults: no request timeout, up to 10 redirects.
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_timeout(base_url, None)
    }

    /// Like `new`, but with a total per-request timeout when one is given.
    pub fn with_timeout(base_url: &str, timeout_secs: Option<u64>) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| ScanError::InvalidUrl(format!("{}: {}", base_url, e)))?;

        let mut builder = Client::builder()
            .user_agent(USER_AGENT)
            .pool_idle_timeout(Duration::from_secs(90));
        if let Some(secs) = timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build()?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve a site path against the base URL
    pub fn url_for(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| ScanError::InvalidUrl(format!("{}: {}", path, e)))
    }

    /// GET a page and return its body. Non-2xx responses are errors.
    pub async fn fetch(&self, path: &str) -> Result<String> {
        let url = self.url_for(path)?;
        debug!("Fetching {}", url);

        let response = self.client.get(url).send().await?.error_for_status()?;
        let body = response.text().await?;

        debug!("Fetched {} bytes from {}", body.len(), path);
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_for_joins_absolute_path() {
        let fetcher = Fetcher::new("https://nextspaceflight.com").unwrap();
        let url = fetcher.url_for("/launches/past/?page=2").unwrap();
        assert_eq!(url.as_str(), "https://nextspaceflight.com/launches/past/?page=2");
    }

    #[test]
    fn test_invalid_base_url() {
        let result = Fetcher::new("not a url");
        assert!(matches!(result, Err(ScanError::InvalidUrl(_))));
    }
}
