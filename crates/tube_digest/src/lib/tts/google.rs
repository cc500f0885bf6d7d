use std::path::Path;

use itertools::Itertools;

use crate::tts::SpeechSynthesizer;

#[derive(Debug, thiserror::Error)]
pub enum TtsError {
    #[error("HTTP error: {0}")]
    Request(#[from] reqwest::Error),
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Nothing to synthesize")]
    EmptyText,
}

/// Text to speech through the Google Translate speech endpoint, which
/// returns mp3 audio for at most [`GoogleTts::MAX_CHUNK_CHARS`] characters per request.
#[derive(Debug, Clone)]
pub struct GoogleTts {
    client: reqwest::Client,
    base_url: String,
}

impl Default for GoogleTts {
    fn default() -> Self {
        Self::new(reqwest::Client::new())
    }
}

impl GoogleTts {
    pub const MAX_CHUNK_CHARS: usize = 100;

    pub fn new(client: reqwest::Client) -> Self {
        Self {
            client,
            base_url: "https://translate.google.com".into(),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    async fn fetch_chunk(
        &self,
        chunk: &str,
        language: &str,
        idx: usize,
        total: usize,
    ) -> Result<Vec<u8>, TtsError> {
        let total = total.to_string();
        let idx = idx.to_string();
        let textlen = chunk.chars().count().to_string();

        let resp = self
            .client
            .get(format!("{}/translate_tts", self.base_url))
            .query(&[
                ("ie", "UTF-8"),
                ("q", chunk),
                ("tl", language),
                ("client", "tw-ob"),
                ("total", total.as_str()),
                ("idx", idx.as_str()),
                ("textlen", textlen.as_str()),
            ])
            .send()
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to make http request"))?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let message = resp.text().await.unwrap_or_default();
            return Err(TtsError::Api { status, message });
        }

        Ok(resp.bytes().await?.to_vec())
    }
}

/// Splits `text` on whitespace into chunks of at most `max_chars` characters.
/// Words longer than `max_chars` are cut.
pub fn split_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let pieces = word
            .chars()
            .chunks(max_chars)
            .into_iter()
            .map(|piece| piece.collect::<String>())
            .collect::<Vec<_>>();

        for piece in pieces {
            let needed = piece.chars().count() + usize::from(!current.is_empty());
            if current.chars().count() + needed > max_chars && !current.is_empty() {
                chunks.push(std::mem::take(&mut current));
            }
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(&piece);
        }
    }

    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}

impl SpeechSynthesizer for GoogleTts {
    type Error = TtsError;

    #[tracing::instrument(skip(self, text), fields(text_len = text.len()))]
    async fn synthesize(&self, text: &str, language: &str, output: &Path) -> Result<(), Self::Error> {
        let chunks = split_text(text, Self::MAX_CHUNK_CHARS);
        if chunks.is_empty() {
            return Err(TtsError::EmptyText);
        }

        let mut audio = Vec::new();
        for (idx, chunk) in chunks.iter().enumerate() {
            let bytes = self.fetch_chunk(chunk, language, idx, chunks.len()).await?;
            audio.extend_from_slice(&bytes);
        }

        if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(output, &audio).await?;

        tracing::info!(path = %output.display(), bytes = audio.len(), "Saved audio");
        Ok(())
    }
}
