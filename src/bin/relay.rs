use std::sync::Arc;

use recipe_relay::{Config, relay_from_config, transport::server};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    // Load configuration
    let config = Config::from_env()?;
    tracing::info!(
        model = %config.completion.model,
        max_tokens = ?config.completion.max_tokens,
        "Relaying recipe prompts to {}",
        config.provider.infer_url
    );

    let relay = Arc::new(relay_from_config(&config));
    server::serve(relay, config.port).await?;
    Ok(())
}
