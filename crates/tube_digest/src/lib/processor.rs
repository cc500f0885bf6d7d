pub mod builder;

use crate::{
    llm::Completer,
    state::VideoState,
    tts::SpeechSynthesizer,
    workflow::{Workflow, WorkflowError},
    yt::{TranscriptFetcher, VideoSearcher},
};

/// Entry point of the crate: turns a video name into a digested [`VideoState`]
#[derive(Debug)]
pub struct DigestProcessor<S, T, C, A>
where
    S: VideoSearcher + Send + Sync + 'static,
    T: TranscriptFetcher + Send + Sync + 'static,
    C: Completer + Send + Sync + 'static,
    A: SpeechSynthesizer + Send + Sync + 'static,
{
    workflow: Workflow<S, T, C, A>,
}

impl<S, T, C, A> DigestProcessor<S, T, C, A>
where
    S: VideoSearcher + Send + Sync + 'static,
    T: TranscriptFetcher + Send + Sync + 'static,
    C: Completer + Send + Sync + 'static,
    A: SpeechSynthesizer + Send + Sync + 'static,
{
    pub fn new(workflow: Workflow<S, T, C, A>) -> Self {
        Self { workflow }
    }

    /// Runs the whole workflow once and hands back the final state untouched.
    ///
    /// Fails only when `video_name` is blank or a generation step fails;
    /// lookup failures show up as absent fields instead.
    #[tracing::instrument(skip(self))]
    pub async fn run(&self, video_name: &str) -> Result<VideoState, WorkflowError> {
        if video_name.trim().is_empty() {
            return Err(WorkflowError::EmptyVideoName);
        }

        let state = VideoState::new(video_name);
        tracing::info!(run_id = %state.run_id, "Processing video");

        self.workflow.invoke(state).await
    }
}
