//! Storage bootstrap command.

use litart_gallery::backend::BackendClient;
use litart_gallery::bootstrap::ensure_storage_ready;
use litart_gallery::config::BackendConfig;

/// Run the storage bootstrap standalone.
///
/// Same routine the gallery runs at startup: best-effort, idempotent,
/// every failure logged and swallowed.
///
/// # Errors
///
/// Returns an error only when backend configuration cannot be loaded.
pub async fn bootstrap() -> Result<(), Box<dyn std::error::Error>> {
    let config = BackendConfig::from_env()?;
    let client = BackendClient::new(&config);

    ensure_storage_ready(&client).await;

    Ok(())
}
