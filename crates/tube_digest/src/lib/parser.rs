//! # Yt Parser
//!
//! Extraction of the JSON blobs YouTube embeds in its html pages and of the
//! handful of fields this crate needs from them: search result video ids,
//! caption tracks and `json3` caption events. Also home to the video id
//! matcher used by the workflow.

use std::{ops::Deref, sync::LazyLock};

use regex::Regex;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{
    error::Error,
    types::{CaptionTrack, Json3Captions, PlayabilityStatus, VideoRenderer},
    yt::TranscriptSegment,
};

static YT_INTIALDATA_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<script[^>]*>\s*var\s+ytInitialData\s*=\s*(\{.*?\});\s*</script>").unwrap()
});

static YT_PLAYER_RESPONSE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)ytInitialPlayerResponse\s*=\s*(\{.*?\})\s*;\s*(?:var\s+meta\b|</script>)")
        .unwrap()
});

static VIDEO_ID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:v=|/embed/|/v/|/vi/|youtu\.be/|/e/|watch\?v=|&v=)([a-zA-Z0-9_-]{11})")
        .unwrap()
});

/// Extracts the 11 character video id from any of the known YouTube url shapes.
///
/// An absent url is treated as "no match".
pub fn extract_video_id(url: Option<&str>) -> Option<String> {
    url.and_then(|url| VIDEO_ID_RE.captures(url))
        .and_then(|cap| cap.get(1))
        .map(|m| m.as_str().to_string())
}

/// Parses the video ids of a search results page, in page order.
///
/// Non-video results (channels, playlists, shelves, ads) are skipped.
///
/// # Returns
/// * `Err(Error::ParseError)` if the `ytInitialData` layout is not the one of a results page.
#[tracing::instrument(skip(json))]
pub fn parse_search_results(json: &Value) -> Result<Vec<String>, Error> {
    let sections = json["contents"]["twoColumnSearchResultsRenderer"]["primaryContents"]
        ["sectionListRenderer"]["contents"]
        .as_array()
        .ok_or(Error::ParseError(
            "Failed to get ytInitialData['contents']['twoColumnSearchResultsRenderer']['primaryContents']['sectionListRenderer']['contents']",
        ))?;

    let mut video_ids = Vec::new();
    for section in sections {
        let Some(items) = section["itemSectionRenderer"]["contents"].as_array() else {
            continue;
        };
        for item in items {
            if !item["videoRenderer"].is_object() {
                continue;
            }
            let renderer = serde_json::from_value::<VideoRenderer>(item["videoRenderer"].clone())?;
            video_ids.push(renderer.video_id);
        }
    }

    Ok(video_ids)
}

/// Returns the caption tracks listed in a watch page's player response.
///
/// # Returns
/// * `Ok(vec![])` when the video is playable but has no captions.
/// * `Err(Error::ParseError)` when the video is not playable.
#[tracing::instrument(skip(json))]
pub fn parse_caption_tracks(json: &Value) -> Result<Vec<CaptionTrack>, Error> {
    if let Some(status) = json.get("playabilityStatus") {
        let status = serde_json::from_value::<PlayabilityStatus>(status.clone())?;
        if status.status != "OK" {
            tracing::debug!(status = %status.status, reason = ?status.reason, "Video is not playable");
            return Err(Error::ParseError("Video is not playable"));
        }
    }

    let Some(tracks) =
        json["captions"]["playerCaptionsTracklistRenderer"]["captionTracks"].as_array()
    else {
        return Ok(Vec::new());
    };

    tracks
        .iter()
        .map(|track| serde_json::from_value::<CaptionTrack>(track.clone()).map_err(Error::from))
        .collect()
}

/// Picks a manually created English track, then an auto-generated English
/// track, then whatever comes first.
pub fn select_caption_track(tracks: &[CaptionTrack]) -> Option<&CaptionTrack> {
    let is_english = |t: &&CaptionTrack| t.language_code.starts_with("en");

    tracks
        .iter()
        .filter(is_english)
        .find(|t| !t.is_generated())
        .or_else(|| tracks.iter().find(is_english))
        .or_else(|| tracks.first())
}

/// Turns a `json3` caption payload into transcript segments.
/// Events without text (window/styling events, line breaks) are dropped.
pub fn parse_json3_captions(captions: Json3Captions) -> Vec<TranscriptSegment> {
    captions
        .events
        .into_iter()
        .filter_map(|event| {
            let text = event
                .segs?
                .iter()
                .map(|seg| seg.utf8.as_str())
                .collect::<String>()
                .replace('\n', " ");
            let text = text.trim();
            if text.is_empty() {
                return None;
            }

            Some(TranscriptSegment {
                text: text.to_string(),
                start: event.t_start_ms.unwrap_or_default() as f64 / 1000.0,
                duration: event.d_duration_ms.unwrap_or_default() as f64 / 1000.0,
            })
        })
        .collect()
}

pub struct YtHtmlDocument(String);

impl Deref for YtHtmlDocument {
    type Target = String;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl YtHtmlDocument {
    pub fn new(doc: String) -> Self {
        YtHtmlDocument(doc)
    }

    /// Deserializes the `ytInitialData` script data
    pub fn to_json<T>(&self) -> Result<T, Error>
    where
        T: DeserializeOwned,
    {
        self.extract(
            &YT_INTIALDATA_RE,
            "Failed to extract ytInitialData from the page's script tag",
        )
    }

    /// Deserializes the `ytInitialPlayerResponse` script data of a watch page
    pub fn player_response<T>(&self) -> Result<T, Error>
    where
        T: DeserializeOwned,
    {
        self.extract(
            &YT_PLAYER_RESPONSE_RE,
            "Failed to extract ytInitialPlayerResponse from the page's script tag",
        )
    }

    fn extract<T>(&self, re: &Regex, err: &'static str) -> Result<T, Error>
    where
        T: DeserializeOwned,
    {
        re.captures(self)
            .and_then(|cap| cap.get(1))
            .and_then(|m| serde_json::from_str(m.as_str()).ok())
            .ok_or(Error::ParseError(err))
    }
}

impl From<String> for YtHtmlDocument {
    fn from(value: String) -> Self {
        YtHtmlDocument(value)
    }
}
