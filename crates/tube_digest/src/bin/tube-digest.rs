use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tube_digest::{
    openai::OpenAIClient,
    tracing::init_tracing_subscriber,
    tts::{GoogleTts, NoopSynthesizer, SpeechSynthesizer},
    yt::{ProxyConfig, SearchQuery, VideoSearcher, YtCaptionFetcher, YtSearchScraper},
    DigestProcessorBuilder, DigestReport,
};

#[derive(Parser)]
#[command(
    name = "tube-digest",
    about = "Summaries, key points and audio digests of YouTube videos"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Find a video, transcribe it and digest the transcript
    Run {
        /// Free text name of the video
        video_name: String,

        #[command(flatten)]
        config: Config,
    },
    /// Only resolve a query to video urls
    Search {
        /// Search terms, optionally followed by `, <count>`
        query: String,
    },
}

#[derive(clap::Args, Clone)]
struct Config {
    /// API key of the chat completions provider
    #[arg(long, env = "TOGETHER_API_KEY", hide_env_values = true)]
    api_key: String,

    /// Base url of the OpenAI compatible chat completions API
    #[arg(long, env = "LLM_BASE_URL", default_value = OpenAIClient::DEFAULT_BASE_URL)]
    llm_base_url: String,

    #[arg(long, env = "LLM_MODEL", default_value = OpenAIClient::DEFAULT_MODEL)]
    llm_model: String,

    /// Forward proxy for caption requests
    #[arg(long, env = "TRANSCRIPT_PROXY_URL", default_value = "http://p.webshare.io:80")]
    proxy_url: String,

    #[arg(long, env = "TRANSCRIPT_PROXY_USERNAME")]
    proxy_username: Option<String>,

    #[arg(long, env = "TRANSCRIPT_PROXY_PASSWORD", hide_env_values = true)]
    proxy_password: Option<String>,

    /// Directory the audio summaries are written to
    #[arg(long, env = "AUDIO_DIR", default_value = "./audio")]
    audio_dir: PathBuf,

    /// Skip rendering the summary as audio
    #[arg(long)]
    no_audio: bool,
}

impl Config {
    fn proxy(&self) -> Option<ProxyConfig> {
        match (&self.proxy_username, &self.proxy_password) {
            (Some(username), Some(password)) => Some(ProxyConfig {
                url: self.proxy_url.clone(),
                username: username.clone(),
                password: password.clone(),
            }),
            _ => None,
        }
    }
}

async fn run_digest<A>(config: &Config, synthesizer: A, video_name: &str) -> anyhow::Result<DigestReport>
where
    A: SpeechSynthesizer + Send + Sync + 'static,
{
    let transcript_fetcher = match config.proxy() {
        Some(proxy) => YtCaptionFetcher::with_proxy(&proxy).context("Invalid transcript proxy")?,
        None => {
            tracing::warn!("No transcript proxy configured, fetching captions directly");
            YtCaptionFetcher::default()
        }
    };
    let completer = OpenAIClient::new(&config.api_key)
        .with_base_url(&config.llm_base_url)
        .with_model(&config.llm_model);
    tracing::info!(
        model = completer.model(),
        base_url = %config.llm_base_url,
        "Using completion model"
    );

    let processor = DigestProcessorBuilder::new(&config.audio_dir)
        .searcher(YtSearchScraper::default())
        .transcript_fetcher(transcript_fetcher)
        .completer(completer)
        .synthesizer(synthesizer)
        .build();

    let state = processor
        .run(video_name)
        .await
        .with_context(|| format!("Error processing video '{video_name}'"))?;

    Ok(DigestReport::from(state))
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    let _guard = sentry::init((
        std::env::var("SENTRY_DSN").unwrap_or_default(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    ));

    let cli = Cli::parse();
    init_tracing_subscriber()?;

    match cli.command {
        Command::Run { video_name, config } => {
            let report = if config.no_audio {
                run_digest(&config, NoopSynthesizer, &video_name).await?
            } else {
                run_digest(&config, GoogleTts::default(), &video_name).await?
            };

            println!("{}", serde_json::to_string_pretty(&report)?);

            if report.is_unsupported() {
                tracing::warn!(%video_name, "Transcription failed");
                anyhow::bail!(DigestReport::UNSUPPORTED_VIDEO);
            }
        }
        Command::Search { query } => {
            let query = query.parse::<SearchQuery>()?;
            let urls = YtSearchScraper::default().search(&query).await?;
            for url in urls {
                println!("{url}");
            }
        }
    }

    Ok(())
}
