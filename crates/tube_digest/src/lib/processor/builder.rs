use std::path::PathBuf;

use crate::{
    llm::Completer,
    tts::SpeechSynthesizer,
    workflow::Workflow,
    yt::{TranscriptFetcher, VideoSearcher},
    DigestProcessor,
};

pub struct DigestProcessorBuilder<S = (), T = (), C = (), A = ()> {
    audio_dir: PathBuf,
    searcher: S,
    transcript_fetcher: T,
    completer: C,
    synthesizer: A,
}

impl DigestProcessorBuilder {
    pub fn new(audio_dir: impl Into<PathBuf>) -> Self {
        Self {
            audio_dir: audio_dir.into(),
            searcher: (),
            transcript_fetcher: (),
            completer: (),
            synthesizer: (),
        }
    }
}

impl<S, T, C, A> DigestProcessorBuilder<S, T, C, A> {
    pub fn searcher<S2: VideoSearcher + Send + Sync + 'static>(
        self,
        searcher: S2,
    ) -> DigestProcessorBuilder<S2, T, C, A> {
        DigestProcessorBuilder {
            audio_dir: self.audio_dir,
            searcher,
            transcript_fetcher: self.transcript_fetcher,
            completer: self.completer,
            synthesizer: self.synthesizer,
        }
    }

    pub fn transcript_fetcher<T2: TranscriptFetcher + Send + Sync + 'static>(
        self,
        transcript_fetcher: T2,
    ) -> DigestProcessorBuilder<S, T2, C, A> {
        DigestProcessorBuilder {
            audio_dir: self.audio_dir,
            searcher: self.searcher,
            transcript_fetcher,
            completer: self.completer,
            synthesizer: self.synthesizer,
        }
    }

    pub fn completer<C2: Completer + Send + Sync + 'static>(
        self,
        completer: C2,
    ) -> DigestProcessorBuilder<S, T, C2, A> {
        DigestProcessorBuilder {
            audio_dir: self.audio_dir,
            searcher: self.searcher,
            transcript_fetcher: self.transcript_fetcher,
            completer,
            synthesizer: self.synthesizer,
        }
    }

    pub fn synthesizer<A2: SpeechSynthesizer + Send + Sync + 'static>(
        self,
        synthesizer: A2,
    ) -> DigestProcessorBuilder<S, T, C, A2> {
        DigestProcessorBuilder {
            audio_dir: self.audio_dir,
            searcher: self.searcher,
            transcript_fetcher: self.transcript_fetcher,
            completer: self.completer,
            synthesizer,
        }
    }

    pub fn audio_dir(mut self, audio_dir: impl Into<PathBuf>) -> Self {
        self.audio_dir = audio_dir.into();
        self
    }
}

impl<S, T, C, A> DigestProcessorBuilder<S, T, C, A>
where
    S: VideoSearcher + Send + Sync + 'static,
    T: TranscriptFetcher + Send + Sync + 'static,
    C: Completer + Send + Sync + 'static,
    A: SpeechSynthesizer + Send + Sync + 'static,
{
    pub fn build(self) -> DigestProcessor<S, T, C, A> {
        DigestProcessor::new(Workflow::new(
            self.searcher,
            self.transcript_fetcher,
            self.completer,
            self.synthesizer,
            self.audio_dir,
        ))
    }
}
