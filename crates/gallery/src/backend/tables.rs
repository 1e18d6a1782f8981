//! Relational table CRUD over the backend's REST interface.
//!
//! Deliberately narrow: equality filters, one optional ordering, and the
//! four operations this application performs. The backend owns the schema
//! and the row-level security; an RLS denial surfaces as an API error with
//! code `42501`.

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::instrument;

use super::BackendError;
use super::client::BackendClient;

/// Equality filters plus ordering for a table read or write.
#[derive(Debug, Clone, Default)]
pub struct TableQuery {
    filters: Vec<(String, String)>,
    order: Option<String>,
}

impl TableQuery {
    /// An unfiltered query.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Require `column = value`.
    #[must_use]
    pub fn eq(mut self, column: &str, value: impl ToString) -> Self {
        self.filters
            .push((column.to_string(), format!("eq.{}", value.to_string())));
        self
    }

    /// Order by `column`, newest first.
    #[must_use]
    pub fn order_desc(mut self, column: &str) -> Self {
        self.order = Some(format!("{column}.desc"));
        self
    }

    /// The query-string pairs for this query.
    fn pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![("select".to_string(), "*".to_string())];
        pairs.extend(self.filters.iter().cloned());
        if let Some(order) = &self.order {
            pairs.push(("order".to_string(), order.clone()));
        }
        pairs
    }

    /// Filter pairs only (no projection/ordering), for writes.
    fn filter_pairs(&self) -> &[(String, String)] {
        &self.filters
    }
}

impl BackendClient {
    /// Select all rows matching `query`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or rows cannot be decoded.
    #[instrument(skip(self, query), fields(table = %table))]
    pub async fn select_rows<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &TableQuery,
    ) -> Result<Vec<T>, BackendError> {
        let url = self.endpoint(&format!("/rest/v1/{table}"));
        let response = self
            .authed(self.inner.http.get(&url))
            .query(&query.pairs())
            .send()
            .await?;

        let response = Self::check(response).await?;
        Ok(response.json().await?)
    }

    /// Select exactly one row matching `query`.
    ///
    /// An empty result is [`BackendError::NotFound`] - callers treat a
    /// missing row as a fetch error, never as "no row yet".
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, decoding fails, or no row
    /// matches.
    pub async fn select_single<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &TableQuery,
    ) -> Result<T, BackendError> {
        let mut rows: Vec<T> = self.select_rows(table, query).await?;
        if rows.is_empty() {
            return Err(BackendError::NotFound(table.to_string()));
        }
        Ok(rows.swap_remove(0))
    }

    /// Insert one row and return the stored representation.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the representation cannot
    /// be decoded.
    #[instrument(skip(self, row), fields(table = %table))]
    pub async fn insert_row<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        table: &str,
        row: &B,
    ) -> Result<T, BackendError> {
        let url = self.endpoint(&format!("/rest/v1/{table}"));
        let response = self
            .authed(self.inner.http.post(&url))
            .header("Prefer", "return=representation")
            .json(row)
            .send()
            .await?;

        let response = Self::check(response).await?;
        let mut rows: Vec<T> = response.json().await?;
        if rows.is_empty() {
            return Err(BackendError::NotFound(table.to_string()));
        }
        Ok(rows.swap_remove(0))
    }

    /// Insert-or-update one row, keyed by the table's primary key, and
    /// return the stored representation.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the representation cannot
    /// be decoded.
    #[instrument(skip(self, row), fields(table = %table))]
    pub async fn upsert_row<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        table: &str,
        row: &B,
    ) -> Result<T, BackendError> {
        let url = self.endpoint(&format!("/rest/v1/{table}"));
        let response = self
            .authed(self.inner.http.post(&url))
            .header("Prefer", "resolution=merge-duplicates,return=representation")
            .json(row)
            .send()
            .await?;

        let response = Self::check(response).await?;
        let mut rows: Vec<T> = response.json().await?;
        if rows.is_empty() {
            return Err(BackendError::NotFound(table.to_string()));
        }
        Ok(rows.swap_remove(0))
    }

    /// Update all rows matching `query` with the given partial row.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self, query, changes), fields(table = %table))]
    pub async fn update_rows<B: Serialize + Sync>(
        &self,
        table: &str,
        query: &TableQuery,
        changes: &B,
    ) -> Result<(), BackendError> {
        let url = self.endpoint(&format!("/rest/v1/{table}"));
        let response = self
            .authed(self.inner.http.patch(&url))
            .query(query.filter_pairs())
            .json(changes)
            .send()
            .await?;

        Self::check(response).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_pairs_select_and_order() {
        let query = TableQuery::new().order_desc("created_at");
        assert_eq!(
            query.pairs(),
            vec![
                ("select".to_string(), "*".to_string()),
                ("order".to_string(), "created_at.desc".to_string()),
            ]
        );
    }

    #[test]
    fn test_query_pairs_eq_filter() {
        let query = TableQuery::new().eq("id", "abc-123");
        assert_eq!(
            query.pairs(),
            vec![
                ("select".to_string(), "*".to_string()),
                ("id".to_string(), "eq.abc-123".to_string()),
            ]
        );
        assert_eq!(
            query.filter_pairs(),
            &[("id".to_string(), "eq.abc-123".to_string())]
        );
    }
}
