use std::path::Path;

use spec_sync::{
    EnvSource, FetchError, ProcessEnv, SpecFetcher, SpecSource, UrlAuth, prepare_request,
};

/// The production fetcher: copies file sources byte-for-byte and issues
/// authenticated GETs for URL sources.
///
/// Writes land directly at the target path; the orchestrator owns
/// directory creation.
pub struct HttpFetcher {
    client: reqwest::Client,
    env: Box<dyn EnvSource>,
}

impl HttpFetcher {
    pub fn new() -> Self {
        Self::with_env(Box::new(ProcessEnv))
    }

    /// Use a custom environment lookup instead of the process environment.
    pub fn with_env(env: Box<dyn EnvSource>) -> Self {
        Self {
            client: reqwest::Client::new(),
            env,
        }
    }

    async fn fetch_url(
        &self,
        url: &str,
        auth: Option<&UrlAuth>,
        target_path: &Path,
    ) -> Result<(), FetchError> {
        let prepared = prepare_request(url, auth, self.env.as_ref())?;

        let mut request = self.client.get(&prepared.url);
        for (name, value) in &prepared.headers {
            request = request.header(name.as_str(), value.as_str());
        }

        let response = request
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus(status.to_string()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        std::fs::write(target_path, body).map_err(|source| FetchError::Io {
            path: target_path.display().to_string(),
            source,
        })
    }

    fn copy_file(&self, path: &str, target_path: &Path) -> Result<(), FetchError> {
        std::fs::copy(path, target_path).map_err(|source| FetchError::Io {
            path: path.to_owned(),
            source,
        })?;
        Ok(())
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl SpecFetcher for HttpFetcher {
    async fn fetch(&self, source: &SpecSource, target_path: &Path) -> Result<(), FetchError> {
        match source {
            SpecSource::File { path, .. } => self.copy_file(path, target_path),
            SpecSource::Url { url, auth, .. } => {
                self.fetch_url(url, auth.as_ref(), target_path).await
            }
        }
    }
}
