//! The record threaded through every workflow step.
//!
//! Steps never mutate a [`VideoState`]. They read it and return a
//! [`StatePatch`] naming only the fields they produce; the engine folds
//! patches into the record with [`VideoState::merge`].

use std::path::PathBuf;

use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VideoState {
    /// Unique per invocation, namespaces the run's artifacts
    pub run_id: Uuid,
    pub video_name: String,
    pub url: Option<String>,
    pub video_id: Option<String>,
    pub transcript: Option<String>,
    pub summary: Option<String>,
    pub key_points: Option<String>,
    pub audio_file: Option<PathBuf>,
}

impl VideoState {
    pub fn new(video_name: impl Into<String>) -> Self {
        Self::with_run_id(video_name, Uuid::new_v4())
    }

    pub fn with_run_id(video_name: impl Into<String>, run_id: Uuid) -> Self {
        Self {
            run_id,
            video_name: video_name.into(),
            url: None,
            video_id: None,
            transcript: None,
            summary: None,
            key_points: None,
            audio_file: None,
        }
    }

    /// Shallow overwrite: fields named by `patch` are replaced, in patch
    /// order, everything else is kept.
    pub fn merge(mut self, patch: StatePatch) -> Self {
        for update in patch.0 {
            match update {
                StateUpdate::Url(url) => self.url = url,
                StateUpdate::VideoId(video_id) => self.video_id = video_id,
                StateUpdate::Transcript(transcript) => self.transcript = transcript,
                StateUpdate::Summary(summary) => self.summary = summary,
                StateUpdate::KeyPoints(key_points) => self.key_points = key_points,
                StateUpdate::AudioFile(audio_file) => self.audio_file = audio_file,
            }
        }
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum StateUpdate {
    Url(Option<String>),
    VideoId(Option<String>),
    Transcript(Option<String>),
    Summary(Option<String>),
    KeyPoints(Option<String>),
    AudioFile(Option<PathBuf>),
}

impl StateUpdate {
    pub fn key(&self) -> &'static str {
        match self {
            StateUpdate::Url(_) => "url",
            StateUpdate::VideoId(_) => "video_id",
            StateUpdate::Transcript(_) => "transcript",
            StateUpdate::Summary(_) => "summary",
            StateUpdate::KeyPoints(_) => "key_points",
            StateUpdate::AudioFile(_) => "audio_file",
        }
    }
}

/// A partial update produced by one step
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatePatch(Vec<StateUpdate>);

impl StatePatch {
    pub fn url(url: Option<String>) -> Self {
        Self(vec![StateUpdate::Url(url)])
    }

    pub fn video_id(video_id: Option<String>) -> Self {
        Self(vec![StateUpdate::VideoId(video_id)])
    }

    pub fn transcript(transcript: Option<String>) -> Self {
        Self(vec![StateUpdate::Transcript(transcript)])
    }

    pub fn summary(summary: Option<String>) -> Self {
        Self(vec![StateUpdate::Summary(summary)])
    }

    pub fn key_points(key_points: Option<String>) -> Self {
        Self(vec![StateUpdate::KeyPoints(key_points)])
    }

    pub fn audio_file(audio_file: Option<PathBuf>) -> Self {
        Self(vec![StateUpdate::AudioFile(audio_file)])
    }

    pub fn and(mut self, other: StatePatch) -> Self {
        self.0.extend(other.0);
        self
    }

    pub fn keys(&self) -> Vec<&'static str> {
        self.0.iter().map(StateUpdate::key).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_empty_but_named() {
        let state = VideoState::new("lofi beats");
        assert_eq!(state.video_name, "lofi beats");
        assert!(state.url.is_none());
        assert!(state.video_id.is_none());
        assert!(state.transcript.is_none());
        assert!(state.summary.is_none());
        assert!(state.key_points.is_none());
        assert!(state.audio_file.is_none());
    }

    #[test]
    fn test_run_ids_differ_between_runs() {
        assert_ne!(VideoState::new("a").run_id, VideoState::new("a").run_id);
    }

    #[test]
    fn test_merge_only_touches_patched_fields() {
        let state = VideoState::new("x")
            .merge(StatePatch::url(Some("https://youtu.be/abc12345678".into())))
            .merge(StatePatch::transcript(Some("hello".into())));

        let merged = state.clone().merge(StatePatch::summary(Some("short".into())));

        assert_eq!(merged.summary.as_deref(), Some("short"));
        assert_eq!(merged.url, state.url);
        assert_eq!(merged.transcript, state.transcript);
        assert_eq!(merged.run_id, state.run_id);
    }

    #[test]
    fn test_merge_can_clear_a_field() {
        let state = VideoState::new("x")
            .merge(StatePatch::url(Some("https://youtu.be/abc12345678".into())))
            .merge(StatePatch::url(None));
        assert!(state.url.is_none());
    }

    #[test]
    fn test_later_updates_win() {
        let patch = StatePatch::summary(Some("first".into())).and(StatePatch::summary(Some("second".into())));
        assert_eq!(patch.keys(), vec!["summary", "summary"]);

        let state = VideoState::new("x").merge(patch);
        assert_eq!(state.summary.as_deref(), Some("second"));
    }

    #[test]
    fn test_empty_patch_is_identity() {
        let state = VideoState::new("x");
        assert!(StatePatch::default().is_empty());
        assert_eq!(state.clone().merge(StatePatch::default()), state);
    }
}
