//! Generic remote procedure calls.

use tracing::instrument;

use super::BackendError;
use super::client::BackendClient;

impl BackendClient {
    /// Invoke a backend function by name with a JSON argument map.
    ///
    /// Returns the function's JSON result (`null` for void functions).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the function reports one.
    #[instrument(skip(self, args), fields(function = %function))]
    pub async fn rpc(
        &self,
        function: &str,
        args: &serde_json::Value,
    ) -> Result<serde_json::Value, BackendError> {
        let url = self.endpoint(&format!("/rest/v1/rpc/{function}"));
        let response = self
            .authed(self.inner.http.post(&url))
            .json(args)
            .send()
            .await?;

        let response = Self::check(response).await?;
        let body = response.text().await.map_err(BackendError::from)?;
        if body.is_empty() {
            return Ok(serde_json::Value::Null);
        }
        Ok(serde_json::from_str(&body)?)
    }
}
