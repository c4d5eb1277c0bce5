//! HTTP storage implementation for tasklane.
//!
//! Talks to a PostgREST-style endpoint (`/rest/v1/<table>`) and the matching
//! auth endpoint (`/auth/v1/user`), as exposed by Supabase projects.

mod error;

pub use error::RestStoreError;

use anyhow::{Context, Result, bail};
use reqwest::{Client, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use tasklane_core::{NewTask, Task, TaskFields, TaskId, User};
use tracing::debug;

const DEFAULT_TABLE: &str = "todos";

/// Connection settings for [`RestStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestConfig {
    /// Project base URL, e.g. `https://xyz.supabase.co`.
    pub url: String,
    /// Public API key sent with every request.
    pub api_key: String,
    /// Session token of the signed-in user, if any.
    pub access_token: Option<String>,
    /// Table holding task rows.
    pub table: String,
}

impl RestConfig {
    /// Settings for the default `todos` table without a user session.
    pub fn new(url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            api_key: api_key.into(),
            access_token: None,
            table: DEFAULT_TABLE.to_owned(),
        }
    }

    /// Attach a user session token.
    #[must_use]
    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }
}

/// Remote task table accessed over HTTP.
#[derive(Debug, Clone)]
pub struct RestStore {
    client: Client,
    base: Url,
    table: String,
    api_key: String,
    access_token: Option<String>,
}

impl RestStore {
    /// Build a store from connection settings.
    ///
    /// # Errors
    /// Returns an error if the base URL is invalid or the table name is empty.
    pub fn new(config: RestConfig) -> Result<Self> {
        let RestConfig {
            url,
            api_key,
            access_token,
            table,
        } = config;

        let mut base = Url::parse(url.trim()).with_context(|| format!("invalid store url '{url}'"))?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        if table.trim().is_empty() {
            bail!("store table name must not be empty");
        }

        Ok(Self {
            client: Client::new(),
            base,
            table,
            api_key,
            access_token: access_token.filter(|token| !token.is_empty()),
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, RestStoreError> {
        self.base
            .join(path)
            .map_err(|err| RestStoreError::Config(format!("cannot build url for {path}: {err}")))
    }

    fn table_url(&self) -> Result<Url, RestStoreError> {
        self.endpoint(&format!("rest/v1/{}", self.table))
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        let bearer = self.access_token.as_deref().unwrap_or(&self.api_key);
        request.header("apikey", &self.api_key).bearer_auth(bearer)
    }

    fn id_filter(id: TaskId) -> [(&'static str, String); 1] {
        [("id", format!("eq.{id}"))]
    }

    /// Insert a row and return the stored representation.
    ///
    /// # Errors
    /// Returns [`RestStoreError`] when the request fails or is rejected.
    pub async fn insert(&self, task: &NewTask) -> Result<Vec<Task>, RestStoreError> {
        debug!(title = %task.title, "inserting task");
        let request = self
            .client
            .post(self.table_url()?)
            .header("Prefer", "return=representation")
            .json(task);
        let response = self.authorize(request).send().await?;
        decode(ensure_success(response).await?).await
    }

    /// Fetch every visible row.
    ///
    /// # Errors
    /// Returns [`RestStoreError`] when the request fails or is rejected.
    pub async fn select_all(&self) -> Result<Vec<Task>, RestStoreError> {
        let request = self.client.get(self.table_url()?).query(&[("select", "*")]);
        let response = self.authorize(request).send().await?;
        let tasks: Vec<Task> = decode(ensure_success(response).await?).await?;
        debug!(count = tasks.len(), "fetched tasks");
        Ok(tasks)
    }

    /// Overwrite the editable columns of a row.
    ///
    /// # Errors
    /// Returns [`RestStoreError`] when the request fails or is rejected.
    pub async fn update(&self, id: TaskId, fields: &TaskFields) -> Result<(), RestStoreError> {
        debug!(%id, "updating task");
        let request = self
            .client
            .patch(self.table_url()?)
            .query(&Self::id_filter(id))
            .json(fields);
        let response = self.authorize(request).send().await?;
        ensure_success(response).await?;
        Ok(())
    }

    /// Delete a row.
    ///
    /// # Errors
    /// Returns [`RestStoreError`] when the request fails or is rejected.
    pub async fn delete(&self, id: TaskId) -> Result<(), RestStoreError> {
        debug!(%id, "deleting task");
        let request = self.client.delete(self.table_url()?).query(&Self::id_filter(id));
        let response = self.authorize(request).send().await?;
        ensure_success(response).await?;
        Ok(())
    }

    /// Resolve the user behind the configured session token.
    ///
    /// Returns `Ok(None)` without a token or when the token is rejected.
    ///
    /// # Errors
    /// Returns [`RestStoreError`] for transport failures and unexpected statuses.
    pub async fn current_user(&self) -> Result<Option<User>, RestStoreError> {
        let Some(token) = self.access_token.as_deref() else {
            return Ok(None);
        };
        let response = self
            .client
            .get(self.endpoint("auth/v1/user")?)
            .header("apikey", &self.api_key)
            .bearer_auth(token)
            .send()
            .await?;
        if matches!(response.status(), StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) {
            debug!(status = %response.status(), "session token rejected");
            return Ok(None);
        }
        let user = decode(ensure_success(response).await?).await?;
        Ok(Some(user))
    }
}

async fn ensure_success(response: Response) -> Result<Response, RestStoreError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(RestStoreError::Status {
        status: status.as_u16(),
        body,
    })
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, RestStoreError> {
    let bytes = response.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_rejects_invalid_urls() {
        assert!(RestStore::new(RestConfig::new("not a url", "key")).is_err());
    }

    #[test]
    fn new_rejects_empty_table() {
        let mut config = RestConfig::new("https://example.invalid", "key");
        config.table = "  ".into();
        assert!(RestStore::new(config).is_err());
    }

    #[test]
    fn table_url_keeps_base_path() {
        let store = RestStore::new(RestConfig::new("https://example.invalid/project", "key"))
            .unwrap_or_else(|err| panic!("must build store: {err}"));
        let url = store
            .table_url()
            .unwrap_or_else(|err| panic!("must build url: {err}"));
        assert_eq!(url.as_str(), "https://example.invalid/project/rest/v1/todos");
    }

    #[test]
    fn empty_access_token_counts_as_signed_out() {
        let store = RestStore::new(RestConfig::new("https://example.invalid", "key").with_access_token(""))
            .unwrap_or_else(|err| panic!("must build store: {err}"));
        assert!(store.access_token.is_none());
    }
}
