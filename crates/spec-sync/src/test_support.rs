use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};

use crate::auth::EnvSource;
use crate::fetch::{FetchError, SpecFetcher};
use crate::source::SpecSource;

/// Canned environment for auth tests. Lookups never touch the real
/// process environment.
#[derive(Debug, Clone, Default)]
pub struct StaticEnv {
    vars: HashMap<String, String>,
}

impl StaticEnv {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }
}

impl EnvSource for StaticEnv {
    fn get(&self, name: &str) -> Option<String> {
        self.vars.get(name).cloned()
    }
}

/// Canned fetcher for orchestrator tests.
///
/// Each `spec_id` maps to content to write or a network-style failure.
/// Clones share the call log, so a test can keep a probe handle after
/// handing the fetcher to a `SyncManager`.
#[derive(Clone, Default)]
pub struct ScriptedFetcher {
    outcomes: HashMap<String, Result<String, String>>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl ScriptedFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_content(mut self, spec_id: impl Into<String>, content: impl Into<String>) -> Self {
        self.outcomes.insert(spec_id.into(), Ok(content.into()));
        self
    }

    pub fn with_failure(mut self, spec_id: impl Into<String>, message: impl Into<String>) -> Self {
        self.outcomes.insert(spec_id.into(), Err(message.into()));
        self
    }

    /// The `spec_id`s fetched so far, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl SpecFetcher for ScriptedFetcher {
    async fn fetch(&self, source: &SpecSource, target_path: &Path) -> Result<(), FetchError> {
        self.calls
            .lock()
            .unwrap()
            .push(source.spec_id().to_owned());

        match self.outcomes.get(source.spec_id()) {
            Some(Ok(content)) => {
                std::fs::write(target_path, content).map_err(|source| FetchError::Io {
                    path: target_path.display().to_string(),
                    source,
                })?;
                Ok(())
            }
            Some(Err(message)) => Err(FetchError::Network(message.clone())),
            None => Err(FetchError::Network(format!(
                "no scripted outcome for {}",
                source.spec_id()
            ))),
        }
    }
}
