use std::path::PathBuf;

use serde::Serialize;

use crate::{
    state::VideoState,
    workflow::{transcript_condition, Route},
};

/// What a caller gets to see of a finished run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DigestReport {
    pub summary: Option<String>,
    pub key_points: Option<String>,
    pub video_url: Option<String>,
    pub audio_file: Option<PathBuf>,
    pub issue: Option<String>,
}

impl DigestReport {
    pub const UNSUPPORTED_VIDEO: &str = "Video does not support transcription";

    /// Videos that produced no transcript could not be digested
    pub fn is_unsupported(&self) -> bool {
        self.issue.as_deref() == Some(Self::UNSUPPORTED_VIDEO)
    }
}

impl From<VideoState> for DigestReport {
    fn from(state: VideoState) -> Self {
        let issue = (transcript_condition(&state) == Route::End)
            .then(|| Self::UNSUPPORTED_VIDEO.to_string());

        Self {
            summary: state.summary,
            key_points: state.key_points,
            video_url: state.url,
            audio_file: state.audio_file,
            issue,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::StatePatch;

    #[test]
    fn test_report_without_transcript_is_unsupported() {
        let state = VideoState::new("x")
            .merge(StatePatch::url(Some("https://youtube.com/watch?v=abc12345678".into())));

        let report = DigestReport::from(state);
        assert!(report.is_unsupported());
        assert_eq!(
            report.video_url.as_deref(),
            Some("https://youtube.com/watch?v=abc12345678")
        );
        assert!(report.summary.is_none());
    }

    #[test]
    fn test_report_with_error_transcript_is_unsupported() {
        let state = VideoState::new("x")
            .merge(StatePatch::transcript(Some("Error: Subtitles are disabled".into())));

        assert!(DigestReport::from(state).is_unsupported());
    }

    #[test]
    fn test_report_carries_generated_fields() {
        let state = VideoState::new("x")
            .merge(StatePatch::transcript(Some("hello world".into())))
            .merge(StatePatch::summary(Some("a summary".into())))
            .merge(StatePatch::key_points(Some("1. one".into())));

        let report = DigestReport::from(state);
        assert!(!report.is_unsupported());
        assert!(report.issue.is_none());
        assert_eq!(report.summary.as_deref(), Some("a summary"));
        assert_eq!(report.key_points.as_deref(), Some("1. one"));
    }

    #[test]
    fn test_report_serializes_absent_fields_as_null() {
        let json = serde_json::to_value(DigestReport::from(VideoState::new("x"))).unwrap();
        assert!(json["summary"].is_null());
        assert_eq!(json["issue"], DigestReport::UNSUPPORTED_VIDEO);
    }
}
