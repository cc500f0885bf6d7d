use std::{convert::Infallible, path::Path};

use crate::tts::SpeechSynthesizer;

/// Stands in when audio rendering is switched off
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSynthesizer;

impl SpeechSynthesizer for NoopSynthesizer {
    type Error = Infallible;

    fn is_enabled(&self) -> bool {
        false
    }

    async fn synthesize(&self, _text: &str, _language: &str, _output: &Path) -> Result<(), Self::Error> {
        Ok(())
    }
}
