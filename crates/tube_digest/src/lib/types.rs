//! Serde views over the parts of YouTube's embedded page data this crate reads.

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoRenderer {
    pub video_id: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayabilityStatus {
    pub status: String,
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptionTrack {
    pub base_url: String,
    pub language_code: String,
    /// `Some("asr")` for auto-generated tracks
    pub kind: Option<String>,
}

impl CaptionTrack {
    pub fn is_generated(&self) -> bool {
        self.kind.as_deref() == Some("asr")
    }
}

/// Caption payload returned by the timedtext endpoint with `fmt=json3`
#[derive(Debug, Default, Deserialize)]
pub struct Json3Captions {
    #[serde(default)]
    pub events: Vec<Json3Event>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Json3Event {
    pub t_start_ms: Option<u64>,
    pub d_duration_ms: Option<u64>,
    pub segs: Option<Vec<Json3Seg>>,
}

#[derive(Debug, Deserialize)]
pub struct Json3Seg {
    #[serde(default)]
    pub utf8: String,
}
