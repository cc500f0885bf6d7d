//! Step functions: each reads the state and returns the fields it produces.
//!
//! Lookups (search, captions) and the optional audio artifact degrade to an
//! absent field and a warning when their collaborator fails. For lookups this
//! covers every failure: an unreachable or rate-limited search page ends the
//! run the same way as an empty or malformed one, and the run is reported as
//! an unsupported video. Text generation failures are returned to the engine
//! and end the run.

use std::path::Path;

use anyhow::Context;
use itertools::Itertools;

use crate::{
    llm::{Completer, Prompt},
    parser,
    state::{StatePatch, VideoState},
    tts::SpeechSynthesizer,
    yt::{SearchQuery, TranscriptFetcher, VideoSearcher},
};

pub const AUDIO_LANGUAGE: &str = "en";

#[tracing::instrument(skip_all)]
pub async fn get_video_url<S: VideoSearcher>(
    searcher: &S,
    state: &VideoState,
) -> anyhow::Result<StatePatch> {
    let query = SearchQuery::from_video_name(&state.video_name);

    let url = match searcher.search(&query).await {
        Ok(urls) => {
            let url = urls.into_iter().next();
            if url.is_none() {
                tracing::warn!(%query, "Search returned no videos");
            }
            url
        }
        Err(e) => {
            let e: anyhow::Error = e.into();
            tracing::warn!(error = ?e, %query, "Search failed");
            None
        }
    };

    Ok(StatePatch::url(url))
}

#[tracing::instrument(skip_all, fields(url = ?state.url))]
pub async fn get_video_id_from_url(state: &VideoState) -> anyhow::Result<StatePatch> {
    let video_id = parser::extract_video_id(state.url.as_deref());
    if video_id.is_none() {
        tracing::warn!("No video id found in url");
    }

    Ok(StatePatch::video_id(video_id))
}

#[tracing::instrument(skip_all, fields(video_id = ?state.video_id))]
pub async fn transcribe_youtube_video<T: TranscriptFetcher>(
    fetcher: &T,
    state: &VideoState,
) -> anyhow::Result<StatePatch> {
    let Some(video_id) = state.video_id.as_deref() else {
        tracing::warn!("No video id, skipping transcription");
        return Ok(StatePatch::transcript(None));
    };

    let transcript = match fetcher.fetch(video_id).await {
        Ok(segments) => {
            let text = segments.iter().map(|s| s.text.as_str()).join(" ");
            tracing::info!(segments = segments.len(), chars = text.len(), "Fetched transcript");
            Some(text).filter(|t| !t.trim().is_empty())
        }
        Err(e) => {
            let e: anyhow::Error = e.into();
            tracing::warn!(error = ?e, "Error fetching transcript");
            None
        }
    };

    Ok(StatePatch::transcript(transcript))
}

#[tracing::instrument(skip_all)]
pub async fn get_video_summary<C: Completer>(
    completer: &C,
    state: &VideoState,
) -> anyhow::Result<StatePatch> {
    let transcript = state
        .transcript
        .as_deref()
        .context("No transcript to summarize")?;

    let summary = completer
        .complete(&Prompt::Summary.render(transcript))
        .await
        .map_err(Into::<anyhow::Error>::into)
        .context("Failed to summarize transcript")?;

    Ok(StatePatch::summary(Some(summary)))
}

#[tracing::instrument(skip_all)]
pub async fn get_video_keypoints<C: Completer>(
    completer: &C,
    state: &VideoState,
) -> anyhow::Result<StatePatch> {
    let transcript = state
        .transcript
        .as_deref()
        .context("No transcript to extract key points from")?;

    let key_points = completer
        .complete(&Prompt::KeyPoints.render(transcript))
        .await
        .map_err(Into::<anyhow::Error>::into)
        .context("Failed to extract key points")?;

    Ok(StatePatch::key_points(Some(key_points)))
}

/// Writes `<audio_dir>/summary-<run_id>.mp3`
#[tracing::instrument(skip_all, fields(run_id = %state.run_id))]
pub async fn generate_audio_summary<A: SpeechSynthesizer>(
    synthesizer: &A,
    audio_dir: &Path,
    state: &VideoState,
) -> anyhow::Result<StatePatch> {
    let Some(summary) = state.summary.as_deref().filter(|s| !s.trim().is_empty()) else {
        tracing::debug!("No summary, skipping audio");
        return Ok(StatePatch::audio_file(None));
    };

    if !synthesizer.is_enabled() {
        tracing::debug!("Audio disabled");
        return Ok(StatePatch::audio_file(None));
    }

    let audio_path = audio_dir.join(format!("summary-{}.mp3", state.run_id));
    let audio_file = match synthesizer
        .synthesize(summary, AUDIO_LANGUAGE, &audio_path)
        .await
    {
        Ok(()) => Some(audio_path),
        Err(e) => {
            let e: anyhow::Error = e.into();
            tracing::warn!(error = ?e, "Error generating audio");
            None
        }
    };

    Ok(StatePatch::audio_file(audio_file))
}
