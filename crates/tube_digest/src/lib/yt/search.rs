use serde_json::Value;

use crate::{
    parser::{parse_search_results, YtHtmlDocument},
    yt::{SearchQuery, VideoSearcher},
};

#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("HTTP error: {0}")]
    Request(#[from] reqwest::Error),
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },
    #[error("Malformed search results: {0}")]
    Parse(#[from] crate::error::Error),
    #[error("Invalid search query: {0:?}")]
    InvalidQuery(String),
}

/// Scrapes the YouTube search results page
#[derive(Debug, Clone)]
pub struct YtSearchScraper {
    client: reqwest::Client,
    base_url: String,
}

impl Default for YtSearchScraper {
    fn default() -> Self {
        Self::new(reqwest::Client::new())
    }
}

impl YtSearchScraper {
    const WATCH_URL: &str = "https://www.youtube.com/watch";

    pub fn new(client: reqwest::Client) -> Self {
        Self {
            client,
            base_url: "https://www.youtube.com".into(),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }
}

impl VideoSearcher for YtSearchScraper {
    type Error = SearchError;

    #[tracing::instrument(skip_all, fields(query = %query))]
    async fn search(&self, query: &SearchQuery) -> Result<Vec<String>, Self::Error> {
        let resp = self
            .client
            .get(format!("{}/results", self.base_url))
            .query(&[("search_query", query.terms.as_str())])
            .header("Accept-Language", "en-US,en;q=0.9")
            .send()
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to make http request"))?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let message = resp.text().await.unwrap_or_default();
            return Err(SearchError::Api { status, message });
        }

        let doc = YtHtmlDocument::from(resp.text().await?);
        let json = doc.to_json::<Value>()?;
        let urls = parse_search_results(&json)?
            .into_iter()
            .take(query.max_results)
            .map(|video_id| format!("{}?v={video_id}", Self::WATCH_URL))
            .collect::<Vec<_>>();

        tracing::debug!(count = urls.len(), "Search resolved");
        Ok(urls)
    }
}
