use std::path::PathBuf;

use futures::future::try_join_all;
use itertools::Itertools;

use crate::{
    llm::Completer,
    state::{StatePatch, VideoState},
    tts::SpeechSynthesizer,
    workflow::{steps, Node, WorkflowError},
    yt::{TranscriptFetcher, VideoSearcher},
};

/// Runs the digest graph over a [`VideoState`].
///
/// Execution proceeds in supersteps. All nodes of a superstep read the same
/// snapshot of the state and may run concurrently; their patches are merged
/// in node order once every one of them has finished, after which the
/// outgoing edges of those nodes pick the next superstep. A node's output is
/// therefore never visible to the nodes it runs alongside.
#[derive(Debug)]
pub struct Workflow<S, T, C, A>
where
    S: VideoSearcher + Send + Sync + 'static,
    T: TranscriptFetcher + Send + Sync + 'static,
    C: Completer + Send + Sync + 'static,
    A: SpeechSynthesizer + Send + Sync + 'static,
{
    searcher: S,
    transcript_fetcher: T,
    completer: C,
    synthesizer: A,
    audio_dir: PathBuf,
}

impl<S, T, C, A> Workflow<S, T, C, A>
where
    S: VideoSearcher + Send + Sync + 'static,
    T: TranscriptFetcher + Send + Sync + 'static,
    C: Completer + Send + Sync + 'static,
    A: SpeechSynthesizer + Send + Sync + 'static,
{
    /// The graph is acyclic and four supersteps deep
    pub const MAX_SUPERSTEPS: usize = 25;

    pub fn new(
        searcher: S,
        transcript_fetcher: T,
        completer: C,
        synthesizer: A,
        audio_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            searcher,
            transcript_fetcher,
            completer,
            synthesizer,
            audio_dir: audio_dir.into(),
        }
    }

    #[tracing::instrument(skip_all, fields(run_id = %state.run_id, video_name = %state.video_name))]
    pub async fn invoke(&self, mut state: VideoState) -> Result<VideoState, WorkflowError> {
        let mut frontier = vec![Node::ENTRY];
        let mut superstep = 0;

        while !frontier.is_empty() {
            if superstep == Self::MAX_SUPERSTEPS {
                return Err(WorkflowError::StepLimitExceeded {
                    limit: Self::MAX_SUPERSTEPS,
                });
            }
            superstep += 1;
            tracing::debug!(superstep, nodes = ?frontier, "Running superstep");

            let patches = try_join_all(frontier.iter().map(|node| self.execute(*node, &state))).await?;
            for patch in patches {
                state = state.merge(patch);
            }

            frontier = frontier
                .iter()
                .flat_map(|node| node.edge().successors(&state))
                .copied()
                .unique()
                .collect();
        }

        tracing::info!(supersteps = superstep, "Workflow finished");
        Ok(state)
    }

    async fn execute(&self, node: Node, state: &VideoState) -> Result<StatePatch, WorkflowError> {
        let result = match node {
            Node::GetVideoUrl => steps::get_video_url(&self.searcher, state).await,
            Node::GetVideoIdFromUrl => steps::get_video_id_from_url(state).await,
            Node::TranscribeYoutubeVideo => {
                steps::transcribe_youtube_video(&self.transcript_fetcher, state).await
            }
            Node::GetVideoSummary => steps::get_video_summary(&self.completer, state).await,
            Node::GetVideoKeypoints => steps::get_video_keypoints(&self.completer, state).await,
            Node::GenerateAudioSummary => {
                steps::generate_audio_summary(&self.synthesizer, &self.audio_dir, state).await
            }
        };

        result
            .inspect(|patch| tracing::debug!(%node, keys = ?patch.keys(), "Step finished"))
            .map_err(|source| {
                tracing::error!(%node, error = ?source, "Step failed");
                WorkflowError::Step { node, source }
            })
    }
}
