pub mod google;
pub mod noop;

use std::{future::Future, path::Path};

pub use google::{GoogleTts, TtsError};
pub use noop::NoopSynthesizer;

/// Renders text as speech and persists the audio at `output`
pub trait SpeechSynthesizer {
    type Error: Into<anyhow::Error>;

    /// Disabled synthesizers are never asked to synthesize
    fn is_enabled(&self) -> bool {
        true
    }

    fn synthesize(
        &self,
        text: &str,
        language: &str,
        output: &Path,
    ) -> impl Future<Output = Result<(), Self::Error>>;
}
