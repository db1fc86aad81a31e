//! The scrape-and-upload run driven by `glossy scrape`.

use glossy_core::AppConfig;
use glossy_db::UploadOutcome;
use glossy_scraper::{default_stores, find_store, harvest_all, HarvestReport, ScrapeOptions};

/// Scrapes the configured stores, prints the run summary, then uploads
/// unless `dry_run` is set.
///
/// Per-store and per-page failures are already absorbed inside the
/// orchestrator; a preflight failure aborts the upload with its diagnostic
/// but does not fail the process — everything worth reporting was reported.
///
/// # Errors
///
/// Returns an error only when the store filter names an unknown store or the
/// post-preflight database connection cannot be opened.
pub async fn run_scrape(
    config: &AppConfig,
    pages: Option<u32>,
    store_filter: Option<&str>,
    dry_run: bool,
) -> anyhow::Result<()> {
    let all_stores = default_stores();
    let stores = match store_filter {
        Some(name) => {
            let store = find_store(&all_stores, name).ok_or_else(|| {
                anyhow::anyhow!(
                    "store '{name}' is not configured; run `glossy stores` for the list"
                )
            })?;
            vec![store]
        }
        None => all_stores,
    };

    let mut options = ScrapeOptions::from_config(config);
    if let Some(pages) = pages {
        options.pages_per_store = pages;
    }

    let report = harvest_all(&stores, &options).await;
    print!("{}", format_summary(&report));

    if dry_run {
        println!("dry run: skipping upload of {} products", report.products.len());
        return Ok(());
    }

    match glossy_db::run_upload(
        &config.database_url,
        config.db_connect_timeout_ms,
        &report.products,
    )
    .await?
    {
        UploadOutcome::NoRecords => println!("nothing to upload"),
        UploadOutcome::PreflightFailed(e) => {
            println!("upload aborted before any writes: {e}");
        }
        UploadOutcome::Completed(tally) => println!("upload done: {tally}"),
    }

    Ok(())
}

/// Renders the human-readable run summary: one line per store, then the
/// final valid count.
fn format_summary(report: &HarvestReport) -> String {
    use std::fmt::Write;

    let mut out = String::new();
    let _ = writeln!(out, "{:=<60}", "");
    for store in &report.stores {
        let status = if store.succeeded { "ok" } else { "FAILED" };
        let _ = writeln!(
            out,
            "{:<12} {:>5} products  [{status}]",
            store.store, store.records
        );
    }
    let _ = writeln!(out, "total valid products: {}", report.products.len());
    let _ = writeln!(out, "{:=<60}", "");
    out
}
