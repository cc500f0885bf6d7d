use std::sync::{Arc, Mutex};
use tokio::sync::Barrier;
use tube_digest::{Completer, Prompt};

#[derive(Clone, Default)]
pub struct MockCompleter {
    pub summary: String,
    pub key_points: String,
    pub calls: Arc<Mutex<Vec<(Prompt, String)>>>,
    pub fail_summary: Option<String>,
    pub fail_key_points: Option<String>,
    /// When set, every call waits here before answering
    pub barrier: Option<Arc<Barrier>>,
}

impl MockCompleter {
    pub fn new(summary: &str, key_points: &str) -> Self {
        Self {
            summary: summary.to_string(),
            key_points: key_points.to_string(),
            ..Default::default()
        }
    }

    pub fn failing(msg: &str) -> Self {
        Self {
            fail_summary: Some(msg.to_string()),
            fail_key_points: Some(msg.to_string()),
            ..Default::default()
        }
    }

    pub fn failing_key_points(summary: &str, msg: &str) -> Self {
        Self {
            summary: summary.to_string(),
            fail_key_points: Some(msg.to_string()),
            ..Default::default()
        }
    }

    pub fn with_barrier(mut self, barrier: Arc<Barrier>) -> Self {
        self.barrier = Some(barrier);
        self
    }

    fn prompt_kind(prompt: &str) -> Prompt {
        let key_points_preamble = Prompt::KeyPoints
            .template()
            .split("{transcription}")
            .next()
            .unwrap_or_default();
        if prompt.starts_with(key_points_preamble) {
            Prompt::KeyPoints
        } else {
            Prompt::Summary
        }
    }
}

impl Completer for MockCompleter {
    type Error = anyhow::Error;

    async fn complete(&self, prompt: &str) -> Result<String, Self::Error> {
        let kind = Self::prompt_kind(prompt);
        self.calls.lock().unwrap().push((kind, prompt.to_string()));

        if let Some(ref barrier) = self.barrier {
            barrier.wait().await;
        }

        let (answer, failure) = match kind {
            Prompt::Summary => (&self.summary, &self.fail_summary),
            Prompt::KeyPoints => (&self.key_points, &self.fail_key_points),
        };
        if let Some(msg) = failure {
            return Err(anyhow::anyhow!("{}", msg));
        }
        Ok(answer.clone())
    }
}
