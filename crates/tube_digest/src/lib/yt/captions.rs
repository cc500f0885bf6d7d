use serde_json::Value;

use crate::{
    parser::{parse_caption_tracks, parse_json3_captions, select_caption_track, YtHtmlDocument},
    types::Json3Captions,
    yt::{TranscriptFetcher, TranscriptSegment},
};

#[derive(Debug, thiserror::Error)]
pub enum TranscriptError {
    #[error("HTTP error: {0}")]
    Request(#[from] reqwest::Error),
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },
    #[error("Failed to read player response: {0}")]
    Parse(#[from] crate::error::Error),
    #[error("No captions available for video {video_id}")]
    NoCaptions { video_id: String },
}

/// Credentials of an authenticated forward proxy
#[derive(Debug, Clone)]
pub struct ProxyConfig {
    pub url: String,
    pub username: String,
    pub password: String,
}

/// Reads captions the way the YouTube web player does: player response from
/// the watch page, then the selected track from the timedtext endpoint.
#[derive(Debug, Clone)]
pub struct YtCaptionFetcher {
    client: reqwest::Client,
    base_url: String,
}

impl Default for YtCaptionFetcher {
    fn default() -> Self {
        Self::new(reqwest::Client::new())
    }
}

impl YtCaptionFetcher {
    pub fn new(client: reqwest::Client) -> Self {
        Self {
            client,
            base_url: "https://www.youtube.com".into(),
        }
    }

    /// Routes every request through `proxy`. YouTube blocks caption requests
    /// from most datacenter ranges.
    pub fn with_proxy(proxy: &ProxyConfig) -> Result<Self, TranscriptError> {
        let proxy = reqwest::Proxy::all(&proxy.url)?.basic_auth(&proxy.username, &proxy.password);
        let client = reqwest::Client::builder().proxy(proxy).build()?;
        Ok(Self::new(client))
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    async fn get_text(&self, request: reqwest::RequestBuilder) -> Result<String, TranscriptError> {
        let resp = request
            .header("Accept-Language", "en-US,en;q=0.9")
            .send()
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to make http request"))?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let message = resp.text().await.unwrap_or_default();
            return Err(TranscriptError::Api { status, message });
        }

        Ok(resp.text().await?)
    }
}

impl TranscriptFetcher for YtCaptionFetcher {
    type Error = TranscriptError;

    #[tracing::instrument(skip(self))]
    async fn fetch(&self, video_id: &str) -> Result<Vec<TranscriptSegment>, Self::Error> {
        let watch_page = self
            .get_text(
                self.client
                    .get(format!("{}/watch", self.base_url))
                    .query(&[("v", video_id)]),
            )
            .await?;

        let player_response = YtHtmlDocument::from(watch_page).player_response::<Value>()?;
        let tracks = parse_caption_tracks(&player_response)?;
        let track = select_caption_track(&tracks).ok_or_else(|| TranscriptError::NoCaptions {
            video_id: video_id.to_string(),
        })?;
        tracing::debug!(
            language = %track.language_code,
            generated = track.is_generated(),
            "Selected caption track"
        );

        let body = self
            .get_text(self.client.get(&track.base_url).query(&[("fmt", "json3")]))
            .await?;
        let captions = serde_json::from_str::<Json3Captions>(&body)
            .map_err(crate::error::Error::from)?;

        Ok(parse_json3_captions(captions))
    }
}
