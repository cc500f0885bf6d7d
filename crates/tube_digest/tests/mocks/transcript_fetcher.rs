use std::sync::{Arc, Mutex};
use tube_digest::yt::{TranscriptFetcher, TranscriptSegment};

#[derive(Clone, Default)]
pub struct MockTranscriptFetcher {
    pub segments: Vec<TranscriptSegment>,
    pub calls: Arc<Mutex<Vec<String>>>,
    pub fail_with: Option<String>,
}

impl MockTranscriptFetcher {
    pub fn new(texts: &[&str]) -> Self {
        Self {
            segments: texts.iter().map(|t| TranscriptSegment::new(*t)).collect(),
            ..Default::default()
        }
    }

    pub fn failing(msg: &str) -> Self {
        Self {
            fail_with: Some(msg.to_string()),
            ..Default::default()
        }
    }
}

impl TranscriptFetcher for MockTranscriptFetcher {
    type Error = anyhow::Error;

    async fn fetch(&self, video_id: &str) -> Result<Vec<TranscriptSegment>, Self::Error> {
        self.calls.lock().unwrap().push(video_id.to_string());
        if let Some(ref msg) = self.fail_with {
            return Err(anyhow::anyhow!("{}", msg));
        }
        Ok(self.segments.clone())
    }
}
