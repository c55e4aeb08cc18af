use std::path::Path;

use anyhow::{anyhow, Result};

use gitvitae_core::config::{self, AppConfig};
use gitvitae_core::git::GitRepo;
use gitvitae_core::store::{self, Backend};
use gitvitae_core::sync::{sync_project, SyncOutcome};
use gitvitae_core::VitaeError;

/// `gitvitae seed` — sync the current repository into the store, named
/// after the working directory.
pub fn run(data_dir: &Path, backend: Backend) -> Result<()> {
    if !config::is_initialized(data_dir) {
        return Err(VitaeError::NotInitialized.into());
    }
    let config = AppConfig::load(data_dir)?;
    let store = store::open(backend, data_dir)?;

    let cwd = std::env::current_dir()?;
    let name = cwd
        .file_name()
        .and_then(|n| n.to_str())
        .map(str::to_string)
        .ok_or_else(|| anyhow!("cannot determine a project name from the current directory"))?;
    let repo = GitRepo::open(&cwd)?;

    let outcome = sync_project(
        store.as_ref(),
        &repo,
        &name,
        &cwd.display().to_string(),
        &config.user.email,
    )?;

    match outcome {
        SyncOutcome::UpToDate => println!("No new commits to update"),
        SyncOutcome::Synced {
            new_commits,
            first_sync: true,
        } => println!("Fetched {new_commits} commits for '{name}'"),
        SyncOutcome::Synced { new_commits, .. } => {
            println!("Fetched {new_commits} new commits for '{name}'")
        }
    }
    Ok(())
}
