use std::{
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};
use tube_digest::tts::SpeechSynthesizer;

#[derive(Clone, Default)]
pub struct MockSynthesizer {
    pub calls: Arc<Mutex<Vec<(String, PathBuf)>>>,
    pub fail_with: Option<String>,
}

impl MockSynthesizer {
    pub fn failing(msg: &str) -> Self {
        Self {
            fail_with: Some(msg.to_string()),
            ..Default::default()
        }
    }
}

impl SpeechSynthesizer for MockSynthesizer {
    type Error = anyhow::Error;

    async fn synthesize(&self, text: &str, language: &str, output: &Path) -> Result<(), Self::Error> {
        assert_eq!(language, "en");
        self.calls
            .lock()
            .unwrap()
            .push((text.to_string(), output.to_path_buf()));
        if let Some(ref msg) = self.fail_with {
            return Err(anyhow::anyhow!("{}", msg));
        }
        Ok(())
    }
}
