use clap::Parser;
use edubot::chat::{ConversationRouter, HipolabsDirectory, RssFeedSource};
use edubot::document::{DocumentAnalyzer, TesseractOcr};
use edubot::generation::{GenerationClient, OpenAiClient};
use edubot::profile::InteractionLog;
use edubot::server::{self, AppState};
use edubot::utils::AppConfig;
use std::env;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(name = "edubot")]
#[command(about = "An education assistant server for document review and study-abroad chat")]
struct Args {
    /// Path to a JSON configuration file
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// Listen address, overriding the configured one
    #[arg(long, short = 'a')]
    addr: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "edubot=info,tower_http=debug".into()),
        )
        .init();

    let config = match &args.config {
        Some(path) => AppConfig::from_file(path)?,
        None => AppConfig::default_config(),
    };

    run_server(config, args.addr).await?;

    Ok(())
}

async fn run_server(
    config: AppConfig,
    addr: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let addr = addr.unwrap_or_else(|| config.host_url.to_string());
    let socket_addr: std::net::SocketAddr = addr.parse()?;

    let api_key = env::var("OPENAI_API_KEY").unwrap_or_default();
    if api_key.is_empty() {
        tracing::warn!("OPENAI_API_KEY is not set; generation-backed replies will fail");
    }

    let client: Arc<dyn GenerationClient> = Arc::new(OpenAiClient::new(
        config.generation.base_url.as_ref(),
        api_key,
        config.generation.model.as_ref(),
    ));
    let ocr = Arc::new(TesseractOcr::new(
        config.ocr.binary.as_ref(),
        config.ocr.language.as_ref(),
    ));

    let analyzer = Arc::new(DocumentAnalyzer::new(
        Arc::clone(&client),
        ocr,
        config.max_file_size,
    ));

    let scholarships = Arc::new(RssFeedSource::new(config.scholarship_feeds));
    let universities = Arc::new(HipolabsDirectory::new(
        config.university_directory_url.as_ref(),
    ));
    let interaction_log = config.profile_log.as_deref().map(InteractionLog::new);

    let router = Arc::new(ConversationRouter::new(
        client,
        scholarships,
        universities,
        interaction_log,
        config.generation.temperature,
    ));

    let state = AppState::new(analyzer, router);

    server::start_server(socket_addr, state).await?;

    Ok(())
}
