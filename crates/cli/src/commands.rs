//! Subcommand implementations - thin drivers over the core crate.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use tracing::{info, warn};

use animatch_core::{
    episode_files, load_json_array, match_into_remote, parse_task_list, reconcile_mapping,
    render_failures, render_report, run_verification, save_json_array, save_text, select_best,
    Aria2Backend, CatalogEntry, Config, DownloadSubmitter, FolderMapping, RcloneLister,
    ReconcileOutcome, RemoteLister, RemoteSpec, SearchHit, SearchIndex,
};

fn load_inputs(config: &Config) -> Result<(Vec<CatalogEntry>, SearchIndex)> {
    let catalog: Vec<CatalogEntry> = load_json_array(&config.data.catalog_path())
        .context("Failed to load catalog")?;
    let hits: Vec<SearchHit> = load_json_array(&config.data.search_results_path())
        .context("Failed to load search results")?;
    info!(entries = catalog.len(), hits = hits.len(), "inputs loaded");
    Ok((catalog, SearchIndex::build(hits)))
}

fn required_remote<'a>(config: &'a Config, id: &str) -> Result<&'a RemoteSpec> {
    match config.remote(id) {
        Some(remote) => Ok(remote),
        None => bail!("remote '{id}' is not configured"),
    }
}

/// Run the verification pass and write the issue/report artifacts.
pub fn verify(config: &Config) -> Result<()> {
    let (catalog, index) = load_inputs(config)?;
    let report = run_verification(&catalog, &index);

    save_json_array(&config.data.issues_path(), &report.issues)
        .context("Failed to write issue file")?;
    let text = render_report(&report);
    save_text(&config.data.report_path(), &text).context("Failed to write report file")?;

    print!("{text}");
    info!(
        ok = report.verified.len(),
        issues = report.issues.len(),
        "verification complete"
    );
    Ok(())
}

/// Export the download task list for entries that verified `ok`.
pub fn export_tasks(config: &Config) -> Result<()> {
    let (catalog, index) = load_inputs(config)?;
    let report = run_verification(&catalog, &index);

    let mut out = String::new();
    let mut exported = 0;
    let mut without_locator = 0;
    for record in &report.verified {
        let candidates: Vec<_> = index
            .hits_for(record.anime_id)
            .iter()
            .map(|h| h.to_candidate())
            .collect();
        // A verified record always came from a selected hit.
        let Some(best) = select_best(&candidates) else {
            continue;
        };
        match &best.locator {
            Some(locator) => {
                out.push_str(&format!(
                    "# {} ({})\n{}\n\n",
                    record.anime_name, record.year, locator
                ));
                exported += 1;
            }
            None => {
                warn!(anime = %record.anime_name, "verified but no locator, skipping");
                without_locator += 1;
            }
        }
    }

    save_text(&config.data.task_path(), &out).context("Failed to write task file")?;
    info!(
        exported,
        without_locator,
        skipped_issues = report.issues.len(),
        path = %config.data.task_path().display(),
        "task list written"
    );
    Ok(())
}

/// Repair mappings on one remote from a live listing.
pub async fn reconcile(config: &Config, remote_id: &str) -> Result<()> {
    let remote = required_remote(config, remote_id)?;
    let mapping_path = config.data.mapping_path();
    let mappings: Vec<FolderMapping> =
        load_json_array(&mapping_path).context("Failed to load mapping file")?;
    info!(mappings = mappings.len(), "mapping file loaded");

    let lister = RcloneLister::default();
    let listing = lister
        .list(&remote.root_path())
        .await
        .with_context(|| format!("Failed to list remote {remote_id}"))?;
    info!(folders = listing.len(), "remote listing fetched");

    let prefix = remote.prefix();
    let mut updated = 0;
    let mut unresolved = 0;
    let repaired: Vec<FolderMapping> = mappings
        .into_iter()
        .map(|m| {
            if !m.folder_path.starts_with(&prefix) {
                return m;
            }
            match reconcile_mapping(&m, remote, &listing) {
                ReconcileOutcome::Unchanged => m,
                ReconcileOutcome::Updated(new_mapping) => {
                    info!(
                        anime = %new_mapping.anime_name,
                        old = %m.folder_name,
                        new = %new_mapping.folder_name,
                        "mapping repaired"
                    );
                    updated += 1;
                    new_mapping
                }
                ReconcileOutcome::Unresolved { reason } => {
                    warn!(anime = %m.anime_name, folder = %m.folder_name, %reason, "unresolved");
                    unresolved += 1;
                    m
                }
            }
        })
        .collect();

    save_json_array(&mapping_path, &repaired).context("Failed to write mapping file")?;
    info!(updated, unresolved, "reconcile complete");
    Ok(())
}

/// Adopt mappings onto a target remote after a transfer.
pub async fn adopt(config: &Config, remote_id: &str, output: Option<PathBuf>) -> Result<()> {
    let target = required_remote(config, remote_id)?;
    let mappings: Vec<FolderMapping> = load_json_array(&config.data.mapping_path())
        .context("Failed to load mapping file")?;

    let lister = RcloneLister::default();
    let listing = lister
        .list(&target.root_path())
        .await
        .with_context(|| format!("Failed to list remote {remote_id}"))?;
    info!(folders = listing.len(), "target listing fetched");

    let prefix = target.prefix();
    let mut adopted: Vec<FolderMapping> = Vec::new();
    for mapping in &mappings {
        if mapping.folder_path.starts_with(&prefix) {
            adopted.push(mapping.clone());
            continue;
        }
        match match_into_remote(mapping, target, &listing) {
            Some(new_mapping) => {
                info!(anime = %new_mapping.anime_name, path = %new_mapping.folder_path, "adopted");
                adopted.push(new_mapping);
            }
            None => {
                warn!(anime = %mapping.anime_name, folder = %mapping.folder_name, "no counterpart on target");
            }
        }
    }

    // Folders on the target that no mapping claims deserve a look too.
    for entry in listing.iter().filter(|e| e.is_dir) {
        if !adopted.iter().any(|m| m.folder_name == entry.name) {
            info!(folder = %entry.name, "target folder not referenced by any mapping");
        }
    }

    let output = output.unwrap_or_else(|| config.data.mapping_path_for(remote_id));
    save_json_array(&output, &adopted).context("Failed to write adopted mapping file")?;
    info!(
        adopted = adopted.len(),
        total = mappings.len(),
        path = %output.display(),
        "adoption complete"
    );
    Ok(())
}

/// Fill `episodes` for every mapping on a remote from per-folder listings.
pub async fn scan_episodes(config: &Config, remote_id: &str) -> Result<()> {
    let remote = required_remote(config, remote_id)?;
    let mapping_path = config.data.mapping_path();
    let mut mappings: Vec<FolderMapping> =
        load_json_array(&mapping_path).context("Failed to load mapping file")?;

    let lister = RcloneLister::default();
    let prefix = remote.prefix();
    let mut scanned = 0;
    for mapping in mappings.iter_mut() {
        if !mapping.folder_path.starts_with(&prefix) {
            continue;
        }
        match lister.list(&mapping.folder_path).await {
            Ok(listing) => {
                mapping.episodes = episode_files(&listing);
                scanned += 1;
                info!(
                    anime = %mapping.anime_name,
                    episodes = mapping.episodes.len(),
                    "scanned"
                );
            }
            Err(e) => {
                // One unreadable folder must not lose the whole scan.
                warn!(anime = %mapping.anime_name, error = %e, "listing failed, skipping");
            }
        }
    }

    save_json_array(&mapping_path, &mappings).context("Failed to write mapping file")?;
    info!(scanned, "episode scan complete");
    Ok(())
}

/// Submit a task list to the aria2 backend, bounded and time-boxed.
pub async fn download(config: &Config, tasks: Option<PathBuf>) -> Result<()> {
    let task_path = tasks.unwrap_or_else(|| config.data.task_path());
    let text = std::fs::read_to_string(&task_path)
        .with_context(|| format!("Failed to read task list {:?}", task_path))?;
    let tasks = parse_task_list(&text);
    if tasks.is_empty() {
        info!("task list is empty, nothing to do");
        return Ok(());
    }
    info!(tasks = tasks.len(), "task list loaded");

    let backend = Aria2Backend::new(
        config.downloader.aria2.clone(),
        Duration::from_secs(config.downloader.task_timeout_secs),
    );
    let submitter = DownloadSubmitter::new(backend, config.downloader.max_concurrent);
    let summary = submitter.submit_all(&tasks).await;

    if !summary.failures.is_empty() {
        let failed_path = config.data.failed_path();
        save_text(&failed_path, &render_failures(&summary.failures))
            .context("Failed to write failure list")?;
        warn!(
            failed = summary.failures.len(),
            path = %failed_path.display(),
            "some tasks failed"
        );
    }
    info!(
        succeeded = summary.succeeded,
        failed = summary.failures.len(),
        "download batch complete"
    );
    Ok(())
}
