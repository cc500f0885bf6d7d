pub mod captions;
pub mod search;

use std::{fmt, future::Future, str::FromStr};

use serde::Deserialize;

pub use captions::{ProxyConfig, TranscriptError, YtCaptionFetcher};
pub use search::{SearchError, YtSearchScraper};

/// Resolves a free text query to an ordered list of video urls
pub trait VideoSearcher {
    type Error: Into<anyhow::Error>;

    fn search(&self, query: &SearchQuery)
        -> impl Future<Output = Result<Vec<String>, Self::Error>>;
}

/// Fetches the caption segments of a video, in playback order
pub trait TranscriptFetcher {
    type Error: Into<anyhow::Error>;

    fn fetch(
        &self,
        video_id: &str,
    ) -> impl Future<Output = Result<Vec<TranscriptSegment>, Self::Error>>;
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TranscriptSegment {
    pub text: String,
    pub start: f64,
    pub duration: f64,
}

impl TranscriptSegment {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            start: 0.0,
            duration: 0.0,
        }
    }
}

/// Search terms plus the number of results wanted, written `"<terms>, <n>"`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub terms: String,
    pub max_results: usize,
}

impl SearchQuery {
    pub const DEFAULT_MAX_RESULTS: usize = 1;

    /// Commas in the name would otherwise be read as the result count separator
    pub fn from_video_name(video_name: &str) -> Self {
        Self {
            terms: video_name.replace(',', " ").trim().to_string(),
            max_results: Self::DEFAULT_MAX_RESULTS,
        }
    }
}

impl fmt::Display for SearchQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.terms, self.max_results)
    }
}

impl FromStr for SearchQuery {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (terms, max_results) = match s.split_once(',') {
            Some((terms, count)) => {
                let count = count.trim();
                let max_results = count
                    .parse::<usize>()
                    .map_err(|_| SearchError::InvalidQuery(s.to_string()))?;
                (terms, max_results)
            }
            None => (s, Self::DEFAULT_MAX_RESULTS),
        };

        let terms = terms.trim();
        if terms.is_empty() {
            return Err(SearchError::InvalidQuery(s.to_string()));
        }

        Ok(Self {
            terms: terms.to_string(),
            max_results,
        })
    }
}
