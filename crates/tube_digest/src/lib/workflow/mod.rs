//! The digest workflow as an explicit state machine.
//!
//! ```text
//! get_video_url ─► get_video_id_from_url ─► transcribe_youtube_video
//!                                                 │
//!                                  transcript_condition
//!                                   │             │
//!                                  END    ┌───────┴────────┐
//!                                         ▼                ▼
//!                                 get_video_summary   get_video_keypoints ─► END
//!                                         │
//!                                         ▼
//!                              generate_audio_summary ─► END
//! ```

mod engine;
pub mod steps;

use std::fmt;

pub use engine::Workflow;

use crate::state::VideoState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Node {
    GetVideoUrl,
    GetVideoIdFromUrl,
    TranscribeYoutubeVideo,
    GetVideoSummary,
    GetVideoKeypoints,
    GenerateAudioSummary,
}

impl Node {
    pub const ENTRY: Node = Node::GetVideoUrl;

    pub fn name(self) -> &'static str {
        match self {
            Node::GetVideoUrl => "get_video_url",
            Node::GetVideoIdFromUrl => "get_video_id_from_url",
            Node::TranscribeYoutubeVideo => "transcribe_youtube_video",
            Node::GetVideoSummary => "get_video_summary",
            Node::GetVideoKeypoints => "get_video_keypoints",
            Node::GenerateAudioSummary => "generate_audio_summary",
        }
    }

    /// Outgoing edge of each node
    pub fn edge(self) -> Edge {
        match self {
            Node::GetVideoUrl => Edge::Static(&[Node::GetVideoIdFromUrl]),
            Node::GetVideoIdFromUrl => Edge::Static(&[Node::TranscribeYoutubeVideo]),
            Node::TranscribeYoutubeVideo => Edge::Conditional(transcript_condition),
            Node::GetVideoSummary => Edge::Static(&[Node::GenerateAudioSummary]),
            Node::GetVideoKeypoints | Node::GenerateAudioSummary => Edge::End,
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Edge {
    Static(&'static [Node]),
    Conditional(fn(&VideoState) -> Route),
    End,
}

impl Edge {
    /// Nodes to run next, given the state after the current node's update
    pub fn successors(&self, state: &VideoState) -> &'static [Node] {
        match self {
            Edge::Static(nodes) => *nodes,
            Edge::Conditional(route) => route(state).targets(),
            Edge::End => &[],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    End,
    Summarize,
}

impl Route {
    pub fn targets(self) -> &'static [Node] {
        match self {
            Route::End => &[],
            Route::Summarize => &[Node::GetVideoSummary, Node::GetVideoKeypoints],
        }
    }
}

/// Ends the run unless there is a usable transcript.
///
/// Blank transcripts and provider messages starting with `"Error"` are not usable.
pub fn transcript_condition(state: &VideoState) -> Route {
    match state.transcript.as_deref() {
        Some(transcript) if !transcript.trim().is_empty() && !transcript.starts_with("Error") => {
            Route::Summarize
        }
        _ => Route::End,
    }
}

#[derive(Debug, thiserror::Error)]
pub enum WorkflowError {
    #[error("Video name must not be empty")]
    EmptyVideoName,
    #[error("Step `{node}` failed")]
    Step {
        node: Node,
        #[source]
        source: anyhow::Error,
    },
    #[error("Workflow did not terminate within {limit} supersteps")]
    StepLimitExceeded { limit: usize },
}

impl WorkflowError {
    pub fn node(&self) -> Option<Node> {
        match self {
            WorkflowError::Step { node, .. } => Some(*node),
            _ => None,
        }
    }
}
