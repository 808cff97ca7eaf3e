// Web-based AI image analysis using Azure AI Vision

use ai_image_analysis::config::Args;
use ai_image_analysis::logging;
use ai_image_analysis::routes::{create_router, AppState};
use ai_image_analysis::vision::AzureVisionClient;
use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    let args = Args::parse();

    logging::init(args.log_format)?;
    info!("Starting ai-image-analysis v{}", env!("CARGO_PKG_VERSION"));

    let vision = args.vision_config();
    if let Err(err) = vision.credentials() {
        warn!("{} Analysis requests will be rejected until it is set.", err);
    }
    info!(?vision, "Vision service configuration");

    let analyzer = AzureVisionClient::new(vision.timeout)?;
    let state = AppState {
        vision,
        analyzer: Arc::new(analyzer),
    };
    let app = create_router(state, args.max_upload_bytes());

    let listener = tokio::net::TcpListener::bind((args.host.as_str(), args.port)).await?;
    info!("Server running on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down gracefully");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            error!(%err, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                error!(%err, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C signal"),
        _ = terminate => info!("Received SIGTERM signal"),
    }
}
