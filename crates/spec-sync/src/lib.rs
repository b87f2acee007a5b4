pub mod auth;
pub mod diagnostic;
pub mod fetch;
pub mod source;
pub mod sync;

pub use auth::{
    AuthError, AuthPosition, EnvSource, PreparedRequest, ProcessEnv, UrlAuth, prepare_request,
};
pub use diagnostic::Diagnostic;
pub use fetch::{FetchError, SpecFetcher};
pub use source::SpecSource;
pub use sync::{
    DuplicatePolicy, SyncConfig, SyncError, SyncManager, SyncReport, SyncResult,
};

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
