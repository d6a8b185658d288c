use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use bioinsight::api::{start_api_server, ApiContext};
use bioinsight::config::{self, AppConfig};
use bioinsight::pipeline::openrouter::OpenRouterClient;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    let app_config = match AppConfig::from_env() {
        Ok(app_config) => app_config,
        Err(err) => {
            tracing::error!(error = %err, "Configuration error");
            std::process::exit(1);
        }
    };

    let client = Arc::new(OpenRouterClient::from_config(&app_config));
    let ctx = ApiContext::new(client);

    let mut server = match start_api_server(ctx, app_config.bind_addr).await {
        Ok(server) => server,
        Err(err) => {
            tracing::error!(error = %err, "Failed to start API server");
            std::process::exit(1);
        }
    };

    tracing::info!(addr = %server.session.local_addr, "Ready to analyze exams");

    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "Failed to listen for shutdown signal");
    }
    server.shutdown();
}
