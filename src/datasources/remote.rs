use crate::error::{Result, SchemeError};
use crate::models::Dataset;

/// A scheme ruleset served as a JSON array over HTTP.
pub struct RemoteDataset {
    client: reqwest::Client,
    url: String,
    token: Option<String>,
}

impl RemoteDataset {
    pub fn new(url: impl Into<String>, token: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
            token: token.filter(|t| !t.is_empty()),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub async fn load(&self) -> Result<Dataset> {
        let mut request = self
            .client
            .get(&self.url)
            .header("Accept", "application/json");
        if let Some(ref token) = self.token {
            request = request.header("Authorization", format!("Bearer {}", token));
        }

        let response = request
            .send()
            .await
            .map_err(|e| SchemeError::DatasetUnavailable(format!("{}: {}", self.url, e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(SchemeError::DatasetUnavailable(format!(
                "{} returned {}: {}",
                self.url, status, body
            )));
        }

        let dataset: Dataset = response.json().await.map_err(|e| {
            SchemeError::DatasetUnavailable(format!(
                "Failed to parse dataset from {}: {}",
                self.url, e
            ))
        })?;

        tracing::debug!(url = %self.url, rows = dataset.len(), "Fetched scheme dataset");
        Ok(dataset)
    }
}

impl std::fmt::Debug for RemoteDataset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteDataset")
            .field("url", &self.url)
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}
