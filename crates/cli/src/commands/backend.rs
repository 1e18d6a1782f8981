//! Backend health command.

use litart_gallery::backend::BackendClient;
use litart_gallery::config::BackendConfig;

/// Probe the backend auth service.
///
/// # Errors
///
/// Returns an error when configuration cannot be loaded or the backend is
/// unreachable/unhealthy.
pub async fn health() -> Result<(), Box<dyn std::error::Error>> {
    let config = BackendConfig::from_env()?;
    let client = BackendClient::new(&config);

    client.health().await?;
    tracing::info!("backend auth service is healthy");

    Ok(())
}
