use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use papyr::api::{create_router, AppState};
use papyr::config::Config;
use papyr::ocr::{TesseractRecognizer, TextRecognizer};
use papyr::pdf::{PageRasterizer, PdfiumRasterizer};

#[derive(Parser)]
#[command(name = "papyr")]
#[command(about = "Self-hostable OCR service for images and PDFs")]
struct Args {
    /// Bind address (overrides PAPYR_HOST)
    #[arg(long)]
    host: Option<String>,

    /// Port (overrides PAPYR_PORT)
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "papyr=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut config = Config::from_env();
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    tracing::info!(languages = %config.ocr.languages, "Initializing OCR engine...");
    let recognizer: Arc<dyn TextRecognizer> = Arc::new(TesseractRecognizer::new(&config.ocr));
    if !recognizer.is_available() {
        tracing::warn!("OCR engine unavailable - extraction requests will fail");
    }

    let rasterizer: Arc<dyn PageRasterizer> = Arc::new(PdfiumRasterizer::new(&config.pdf));
    if !rasterizer.is_available() {
        tracing::warn!("Pdfium library not found - PDF uploads will be rejected");
    }

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState::new(config, recognizer, rasterizer);
    let app = create_router(state);

    tracing::info!("Papyr starting on http://{}", addr);
    tracing::info!("  Liveness:     http://{}/", addr);
    tracing::info!("  Health check: http://{}/health", addr);
    tracing::info!("  API docs:     http://{}/docs", addr);
    tracing::info!("  OpenAPI spec: http://{}/openapi.json", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

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
