use std::collections::HashMap;

use base64::Engine;
use serde::{Deserialize, Serialize};

/// Errors that can occur while resolving authentication for a URL source.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Environment variable {0} not found")]
    MissingEnvVar(String),

    #[error("invalid source URL {url}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

/// How to authenticate a URL fetch.
///
/// Every value string may be a `{{NAME}}` environment reference, resolved
/// at request-preparation time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum UrlAuth {
    /// `Authorization: Bearer <token>`.
    Bearer { value: String },
    /// `Authorization: Basic <base64(username:password)>`.
    Basic { username: String, password: String },
    /// A caller-named header or query parameter.
    Custom {
        name: String,
        value: String,
        #[serde(default)]
        position: AuthPosition,
    },
}

/// Where a custom auth parameter is placed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthPosition {
    #[default]
    Header,
    Query,
}

/// Narrow lookup capability over the process environment.
///
/// Injectable so auth resolution stays testable without mutating real
/// environment state.
pub trait EnvSource: Send + Sync {
    fn get(&self, name: &str) -> Option<String>;
}

/// Reads the real process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn get(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

/// Header additions and effective URL for one authenticated GET.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedRequest {
    pub headers: HashMap<String, String>,
    pub url: String,
}

/// Resolve an auth descriptor into header additions and an effective URL.
///
/// No descriptor means no headers and the URL unchanged. Query-position
/// custom auth appends its parameter, preserving whatever query string the
/// URL already carries. Performs no I/O; the injected environment lookup
/// is the only outside state touched.
pub fn prepare_request(
    url: &str,
    auth: Option<&UrlAuth>,
    env: &dyn EnvSource,
) -> Result<PreparedRequest, AuthError> {
    let mut headers = HashMap::new();
    let mut effective_url = url.to_owned();

    match auth {
        None => {}
        Some(UrlAuth::Bearer { value }) => {
            let token = resolve_value(value, env)?;
            headers.insert("Authorization".to_owned(), format!("Bearer {token}"));
        }
        Some(UrlAuth::Basic { username, password }) => {
            let username = resolve_value(username, env)?;
            let password = resolve_value(password, env)?;
            let encoded = base64::engine::general_purpose::STANDARD
                .encode(format!("{username}:{password}"));
            headers.insert("Authorization".to_owned(), format!("Basic {encoded}"));
        }
        Some(UrlAuth::Custom {
            name,
            value,
            position,
        }) => {
            let value = resolve_value(value, env)?;
            match position {
                AuthPosition::Header => {
                    headers.insert(name.clone(), value);
                }
                AuthPosition::Query => {
                    let mut parsed =
                        url::Url::parse(url).map_err(|source| AuthError::InvalidUrl {
                            url: url.to_owned(),
                            source,
                        })?;
                    parsed.query_pairs_mut().append_pair(name, &value);
                    effective_url = parsed.to_string();
                }
            }
        }
    }

    Ok(PreparedRequest {
        headers,
        url: effective_url,
    })
}

/// Resolve a configured value, treating a string wrapped exactly once in
/// `{{ }}` as an environment-variable reference.
///
/// Unset and empty variables both fail. Anything not fully wrapped is used
/// verbatim; partial interpolation is not supported.
fn resolve_value(value: &str, env: &dyn EnvSource) -> Result<String, AuthError> {
    let Some(name) = value
        .strip_prefix("{{")
        .and_then(|rest| rest.strip_suffix("}}"))
    else {
        return Ok(value.to_owned());
    };

    match env.get(name) {
        Some(resolved) if !resolved.is_empty() => Ok(resolved),
        _ => Err(AuthError::MissingEnvVar(name.to_owned())),
    }
}
