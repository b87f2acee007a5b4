use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::auth::UrlAuth;

/// One configured origin of a specification document.
///
/// Sources are identified by a caller-chosen `spec_id`, which becomes the
/// output filename stem when the document is written locally.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SpecSource {
    /// A specification file on the local filesystem.
    File { path: String, spec_id: String },
    /// A specification served over HTTP(S), optionally authenticated.
    Url {
        url: String,
        spec_id: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        auth: Option<UrlAuth>,
    },
}

impl SpecSource {
    pub fn spec_id(&self) -> &str {
        match self {
            Self::File { spec_id, .. } | Self::Url { spec_id, .. } => spec_id,
        }
    }

    /// The name this source's document is written under in the target
    /// directory.
    ///
    /// File sources keep a `.json` extension when the source path carries
    /// one (case-insensitive); every other case, URL sources included,
    /// lands as `.yaml`. Deterministic, so failed syncs can still report
    /// which file they would have produced.
    pub fn output_filename(&self) -> String {
        match self {
            Self::File { path, spec_id } => {
                let is_json = Path::new(path)
                    .extension()
                    .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
                if is_json {
                    format!("{spec_id}.json")
                } else {
                    format!("{spec_id}.yaml")
                }
            }
            Self::Url { spec_id, .. } => format!("{spec_id}.yaml"),
        }
    }
}
