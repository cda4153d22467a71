use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use snaptext::api::{create_router, AppState};
use snaptext::config::Config;
use snaptext::ocr::OcrEngine;
use snaptext::pipeline::{ConfidenceReport, Pipeline};

#[derive(Parser)]
#[command(name = "snaptext")]
#[command(version)]
#[command(about = "Extract text from screenshots with Tesseract OCR")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP API server
    Serve,
    /// Extract text from an image file
    Extract {
        /// Path to the image
        path: PathBuf,
        /// Write extracted text to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Print the confidence summary after the text
        #[arg(long)]
        confidence: bool,
        /// Tesseract languages, overriding OCR_LANGUAGES (e.g. "eng+deu")
        #[arg(long)]
        language: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "snaptext=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();

    match args.command {
        Command::Serve => serve(config).await,
        Command::Extract {
            path,
            output,
            confidence,
            language,
        } => extract(config, path, output, confidence, language).await,
    }
}

async fn serve(config: Config) -> anyhow::Result<()> {
    tracing::info!(languages = %config.ocr.languages, "Initializing OCR engine...");
    let engine = OcrEngine::new(&config.ocr);
    if !engine.is_available() {
        tracing::warn!("OCR unavailable - extraction requests will return 503");
    }

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState::new(config, engine);
    let app = create_router(state);

    tracing::info!("SnapText starting on http://{}", addr);
    tracing::info!("  Health check: http://{}/api/v1/health", addr);
    tracing::info!("  API docs:     http://{}/api/v1/docs", addr);
    tracing::info!("  OpenAPI spec: http://{}/api/v1/openapi.json", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn extract(
    config: Config,
    path: PathBuf,
    output: Option<PathBuf>,
    confidence: bool,
    language: Option<String>,
) -> anyhow::Result<()> {
    let bytes = std::fs::read(&path)
        .map_err(|e| anyhow::anyhow!("Cannot read {}: {e}", path.display()))?;

    let engine = OcrEngine::new(&config.ocr);
    let pipeline = Pipeline::new(Arc::new(engine), Arc::new(config));

    let result = pipeline.extract(bytes, language).await?;

    match output {
        Some(out) => {
            std::fs::write(&out, &result.text)?;
            println!("Text written to {}", out.display());
        }
        None => println!("{}", result.text),
    }

    if confidence {
        match &result.confidence {
            ConfidenceReport::Summary(summary) => {
                let quality = if summary.average_confidence >= 80.0 {
                    "high"
                } else if summary.average_confidence >= 60.0 {
                    "medium"
                } else {
                    "low"
                };
                println!();
                println!(
                    "Confidence: {:.1} ({quality}), {} words, {} low-confidence",
                    summary.average_confidence, summary.word_count, summary.low_confidence_words
                );
                if let Some(strategy) = &result.strategy {
                    println!("Strategy:   {strategy}");
                }
            }
            ConfidenceReport::Unavailable { error } => {
                println!();
                println!("Confidence: unavailable ({error})");
            }
        }
    }

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
