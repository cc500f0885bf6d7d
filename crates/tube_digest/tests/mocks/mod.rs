pub mod completer;
pub mod searcher;
pub mod synthesizer;
pub mod transcript_fetcher;
