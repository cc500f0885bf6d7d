pub mod openai;

use std::future::Future;

const SUMMARY_PROMPT: &str = include_str!("./prompts/summary.txt");
const KEY_POINTS_PROMPT: &str = include_str!("./prompts/key_points.txt");

/// A language model that answers a single prompt with a single completion
pub trait Completer {
    type Error: Into<anyhow::Error>;

    fn complete(&self, prompt: &str) -> impl Future<Output = Result<String, Self::Error>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prompt {
    Summary,
    KeyPoints,
}

impl Prompt {
    pub fn template(self) -> &'static str {
        match self {
            Prompt::Summary => SUMMARY_PROMPT,
            Prompt::KeyPoints => KEY_POINTS_PROMPT,
        }
    }

    pub fn render(self, transcription: &str) -> String {
        self.template().replace("{transcription}", transcription)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_inlines_transcription() {
        let prompt = Prompt::Summary.render("hello world");
        assert!(prompt.contains("Given this transcription: hello world"));
        assert!(!prompt.contains("{transcription}"));
    }

    #[test]
    fn test_key_points_asks_for_five() {
        assert!(Prompt::KeyPoints.template().contains("exactly 5"));
        assert_ne!(Prompt::KeyPoints.render("x"), Prompt::Summary.render("x"));
    }
}
