use std::time::Duration;

use anyhow::Result;
use spec_sync::{Diagnostic, SyncConfig, SyncManager, SyncReport};
use spec_sync_fetch::HttpFetcher;

/// Interval used by `--watch` when the config carries none.
const DEFAULT_WATCH_INTERVAL_SECS: u64 = 300;

/// Print diagnostics to stderr.
pub fn print_diagnostics(diagnostics: &[Diagnostic]) {
    for diagnostic in diagnostics {
        eprintln!("warning: {diagnostic}");
    }
}

/// Print one batch's outcome; returns how many sources failed.
fn print_report(report: &SyncReport, json: bool) -> Result<usize> {
    print_diagnostics(&report.diagnostics);

    let total = report.results.len();
    let failed = report.results.iter().filter(|r| !r.success).count();

    if json {
        println!("{}", serde_json::to_string_pretty(&report.results)?);
        return Ok(failed);
    }

    for result in &report.results {
        if result.success {
            println!("synced {}", result.filename);
        } else {
            let reason = result.error.as_deref().unwrap_or("unknown error");
            eprintln!("warning: {} failed: {reason}", result.filename);
        }
    }

    if failed > 0 {
        eprintln!("Synced {} sources ({failed} failed)", total - failed);
    }

    Ok(failed)
}

/// Run one batch and print its outcome; with `watch`, keep re-running on
/// the configured interval until interrupted.
pub async fn run(config: &SyncConfig, json: bool, watch: bool) -> Result<()> {
    let manager = SyncManager::new(Box::new(HttpFetcher::new()));

    if !watch {
        let report = manager.sync(config).await?;
        let failed = print_report(&report, json)?;
        let total = report.results.len();
        if total > 0 && failed == total {
            anyhow::bail!("all {total} sources failed to sync");
        }
        return Ok(());
    }

    let secs = config
        .sync_interval_secs
        .unwrap_or(DEFAULT_WATCH_INTERVAL_SECS);
    let mut interval = tokio::time::interval(Duration::from_secs(secs));

    loop {
        interval.tick().await;
        let report = manager.sync(config).await?;
        print_report(&report, json)?;
    }
}
