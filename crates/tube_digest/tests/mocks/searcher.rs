use std::sync::{Arc, Mutex};
use tube_digest::yt::{SearchQuery, VideoSearcher};

#[derive(Clone, Default)]
pub struct MockSearcher {
    pub urls: Vec<String>,
    pub calls: Arc<Mutex<Vec<SearchQuery>>>,
    pub fail_with: Option<String>,
}

impl MockSearcher {
    pub fn new(urls: &[&str]) -> Self {
        Self {
            urls: urls.iter().map(|u| u.to_string()).collect(),
            ..Default::default()
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn failing(msg: &str) -> Self {
        Self {
            fail_with: Some(msg.to_string()),
            ..Default::default()
        }
    }
}

impl VideoSearcher for MockSearcher {
    type Error = anyhow::Error;

    async fn search(&self, query: &SearchQuery) -> Result<Vec<String>, Self::Error> {
        self.calls.lock().unwrap().push(query.clone());
        if let Some(ref msg) = self.fail_with {
            return Err(anyhow::anyhow!("{}", msg));
        }
        Ok(self.urls.iter().take(query.max_results).cloned().collect())
    }
}
