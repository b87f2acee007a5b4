use std::path::PathBuf;

use spec_sync::test_support::StaticEnv;
use spec_sync::{
    AuthPosition, DuplicatePolicy, FetchError, SpecFetcher, SpecSource, SyncConfig, SyncManager,
    UrlAuth,
};
use spec_sync_fetch::HttpFetcher;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn temp_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("spec-sync-fetch-test-{name}"));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn url_source(server: &MockServer, route: &str, spec_id: &str) -> SpecSource {
    SpecSource::Url {
        url: format!("{}{route}", server.uri()),
        spec_id: spec_id.to_owned(),
        auth: None,
    }
}

#[tokio::test]
async fn url_fetch_writes_body_verbatim() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/petstore.yaml"))
        .respond_with(ResponseTemplate::new(200).set_body_string("openapi: 3.0.0\n"))
        .mount(&server)
        .await;

    let dir = temp_dir("url-body");
    let target = dir.join("petstore.yaml");

    let fetcher = HttpFetcher::new();
    fetcher
        .fetch(&url_source(&server, "/petstore.yaml", "petstore"), &target)
        .await
        .unwrap();

    assert_eq!(
        std::fs::read_to_string(&target).unwrap(),
        "openapi: 3.0.0\n"
    );

    let _ = std::fs::remove_dir_all(&dir);
}

#[tokio::test]
async fn bearer_auth_header_reaches_the_server() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/spec.yaml"))
        .and(header("Authorization", "Bearer plain-token"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .expect(1)
        .mount(&server)
        .await;

    let dir = temp_dir("bearer");
    let source = SpecSource::Url {
        url: format!("{}/spec.yaml", server.uri()),
        spec_id: "authed".to_owned(),
        auth: Some(UrlAuth::Bearer {
            value: "plain-token".to_owned(),
        }),
    };

    let fetcher = HttpFetcher::new();
    fetcher.fetch(&source, &dir.join("authed.yaml")).await.unwrap();

    let _ = std::fs::remove_dir_all(&dir);
}

#[tokio::test]
async fn bearer_token_resolves_through_injected_environment() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/spec.yaml"))
        .and(header("Authorization", "Bearer env-token"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .expect(1)
        .mount(&server)
        .await;

    let dir = temp_dir("bearer-env");
    let source = SpecSource::Url {
        url: format!("{}/spec.yaml", server.uri()),
        spec_id: "authed".to_owned(),
        auth: Some(UrlAuth::Bearer {
            value: "{{SYNC_TOKEN}}".to_owned(),
        }),
    };

    let env = StaticEnv::new().with("SYNC_TOKEN", "env-token");
    let fetcher = HttpFetcher::with_env(Box::new(env));
    fetcher.fetch(&source, &dir.join("authed.yaml")).await.unwrap();

    let _ = std::fs::remove_dir_all(&dir);
}

#[tokio::test]
async fn query_position_auth_lands_in_the_request_url() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/spec.yaml"))
        .and(query_param("version", "1"))
        .and(query_param("api_key", "custom-key"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .expect(1)
        .mount(&server)
        .await;

    let dir = temp_dir("query-auth");
    let source = SpecSource::Url {
        url: format!("{}/spec.yaml?version=1", server.uri()),
        spec_id: "keyed".to_owned(),
        auth: Some(UrlAuth::Custom {
            name: "api_key".to_owned(),
            value: "custom-key".to_owned(),
            position: AuthPosition::Query,
        }),
    };

    let fetcher = HttpFetcher::new();
    fetcher.fetch(&source, &dir.join("keyed.yaml")).await.unwrap();

    let _ = std::fs::remove_dir_all(&dir);
}

#[tokio::test]
async fn non_success_status_names_the_status_text() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/gone.yaml"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let dir = temp_dir("status");
    let fetcher = HttpFetcher::new();
    let err = fetcher
        .fetch(&url_source(&server, "/gone.yaml", "gone"), &dir.join("gone.yaml"))
        .await
        .unwrap_err();

    match err {
        FetchError::HttpStatus(status) => assert_eq!(status, "404 Not Found"),
        other => panic!("expected HttpStatus, got {other:?}"),
    }
    assert!(!dir.join("gone.yaml").exists());

    let _ = std::fs::remove_dir_all(&dir);
}

#[tokio::test]
async fn unreachable_host_is_a_network_error() {
    let dir = temp_dir("network");
    let source = SpecSource::Url {
        url: "http://127.0.0.1:1/spec.yaml".to_owned(),
        spec_id: "dead".to_owned(),
        auth: None,
    };

    let fetcher = HttpFetcher::new();
    let err = fetcher.fetch(&source, &dir.join("dead.yaml")).await.unwrap_err();
    assert!(matches!(err, FetchError::Network(_)));

    let _ = std::fs::remove_dir_all(&dir);
}

#[tokio::test]
async fn missing_environment_variable_fails_before_any_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let dir = temp_dir("missing-env");
    let source = SpecSource::Url {
        url: format!("{}/spec.yaml", server.uri()),
        spec_id: "unresolved".to_owned(),
        auth: Some(UrlAuth::Bearer {
            value: "{{MISSING_TOKEN}}".to_owned(),
        }),
    };

    let fetcher = HttpFetcher::with_env(Box::new(StaticEnv::new()));
    let err = fetcher
        .fetch(&source, &dir.join("unresolved.yaml"))
        .await
        .unwrap_err();

    assert!(
        err.to_string()
            .contains("Environment variable MISSING_TOKEN not found")
    );

    let _ = std::fs::remove_dir_all(&dir);
}

#[tokio::test]
async fn file_source_copies_bytes_unchanged() {
    let dir = temp_dir("file-copy");
    let source_path = dir.join("source.json");
    // Not valid UTF-8; the copy must not care.
    std::fs::write(&source_path, [0x7b, 0xff, 0xfe, 0x7d]).unwrap();

    let source = SpecSource::File {
        path: source_path.display().to_string(),
        spec_id: "binary".to_owned(),
    };

    let target = dir.join("binary.json");
    let fetcher = HttpFetcher::new();
    fetcher.fetch(&source, &target).await.unwrap();

    assert_eq!(std::fs::read(&target).unwrap(), [0x7b, 0xff, 0xfe, 0x7d]);

    let _ = std::fs::remove_dir_all(&dir);
}

#[tokio::test]
async fn missing_file_surfaces_not_found() {
    let dir = temp_dir("file-missing");
    let source = SpecSource::File {
        path: "/nonexistent/spec.json".to_owned(),
        spec_id: "missing".to_owned(),
    };

    let fetcher = HttpFetcher::new();
    let err = fetcher
        .fetch(&source, &dir.join("missing.json"))
        .await
        .unwrap_err();

    match &err {
        FetchError::Io { path, source } => {
            assert_eq!(path, "/nonexistent/spec.json");
            assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
        }
        other => panic!("expected Io, got {other:?}"),
    }
    assert!(err.to_string().contains("/nonexistent/spec.json"));

    let _ = std::fs::remove_dir_all(&dir);
}

#[tokio::test]
async fn mixed_batch_isolates_failures_and_preserves_order() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/petstore.yaml"))
        .respond_with(ResponseTemplate::new(200).set_body_string("openapi: 3.0.0\n"))
        .mount(&server)
        .await;

    let dir = temp_dir("batch");
    let local_spec = dir.join("basic-api.json");
    std::fs::write(&local_spec, "{\"openapi\":\"3.0.0\"}").unwrap();

    let target = dir.join("out");
    let config = SyncConfig {
        sources: vec![
            url_source(&server, "/petstore.yaml", "petstore"),
            SpecSource::File {
                path: local_spec.display().to_string(),
                spec_id: "basic-api".to_owned(),
            },
            SpecSource::Url {
                url: format!("{}/petstore.yaml", server.uri()),
                spec_id: "petstore-auth".to_owned(),
                auth: Some(UrlAuth::Bearer {
                    value: "{{MISSING_TOKEN}}".to_owned(),
                }),
            },
        ],
        target_directory: target.clone(),
        sync_interval_secs: None,
        duplicate_policy: DuplicatePolicy::default(),
    };

    let manager = SyncManager::new(Box::new(HttpFetcher::with_env(Box::new(StaticEnv::new()))));
    let report = manager.sync(&config).await.unwrap();

    assert_eq!(report.results.len(), 3);

    assert!(report.results[0].success);
    assert_eq!(report.results[0].filename, "petstore.yaml");
    assert!(report.results[1].success);
    assert_eq!(report.results[1].filename, "basic-api.json");

    assert!(!report.results[2].success);
    assert_eq!(report.results[2].filename, "petstore-auth.yaml");
    assert!(
        report.results[2]
            .error
            .as_deref()
            .is_some_and(|e| e.contains("Environment variable MISSING_TOKEN not found"))
    );

    assert_eq!(
        std::fs::read_to_string(target.join("petstore.yaml")).unwrap(),
        "openapi: 3.0.0\n"
    );
    assert!(target.join("basic-api.json").exists());
    assert!(!target.join("petstore-auth.yaml").exists());

    let _ = std::fs::remove_dir_all(&dir);
}
