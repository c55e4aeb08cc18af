use std::path::Path;

use anyhow::Result;

use gitvitae_core::config::{self, AppConfig};
use gitvitae_core::git::{self, GitRepo};
use gitvitae_core::model::NewUser;
use gitvitae_core::store::{self, Backend};
use gitvitae_core::{prompts, VitaeError};

/// `gitvitae init` — create the data directory, config file, storage
/// schema, the local user record, and the default prompt configs.
pub fn run(data_dir: &Path, backend: Backend) -> Result<()> {
    let store = store::open(backend, data_dir)?;
    store.migrate()?;

    // Global git identity first, then the current repo's local config.
    let (mut name, mut email) = git::global_identity();
    if name.is_none() || email.is_none() {
        if let Ok(repo) = GitRepo::open(std::env::current_dir()?) {
            let (repo_name, repo_email) = repo.user_identity()?;
            name = name.or(repo_name);
            email = email.or(repo_email);
        }
    }
    let (Some(name), Some(email)) = (name, email) else {
        return Err(VitaeError::GitUserMissing.into());
    };

    if config::is_initialized(data_dir) {
        println!("Already initialized at {}", data_dir.display());
    } else {
        AppConfig::new(name.clone(), email.clone()).save(data_dir)?;
    }

    if store.get_user_by_email(&email)?.is_none() {
        store.create_user(&NewUser {
            name: name.clone(),
            email: email.clone(),
        })?;
    }

    for prompt in prompts::defaults() {
        if store.get_prompt(&prompt.title)?.is_none() {
            store.upsert_prompt(&prompt)?;
        }
    }

    println!("Initialized gitvitae for {name} <{email}>");
    Ok(())
}
