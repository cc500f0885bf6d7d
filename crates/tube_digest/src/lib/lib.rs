mod error;
mod llm;
pub mod parser;
mod processor;
pub mod report;
pub mod state;
pub mod tracing;
pub mod tts;
pub mod types;
pub mod workflow;
pub mod yt;

pub use error::Error;
pub use llm::openai;
pub use llm::{Completer, Prompt};
pub use processor::{builder::DigestProcessorBuilder, DigestProcessor};
pub use report::DigestReport;
pub use state::{StatePatch, VideoState};
