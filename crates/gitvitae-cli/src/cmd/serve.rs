use std::path::Path;
use std::sync::Arc;

use anyhow::Result;

use gitvitae_core::config;
use gitvitae_core::store::{self, Backend, Store};
use gitvitae_core::VitaeError;
use gitvitae_server::state::AppState;

/// `gitvitae serve` — run the dashboard until Ctrl-C.
pub fn run(data_dir: &Path, backend: Backend, port: Option<u16>, no_open: bool) -> Result<()> {
    if !config::is_initialized(data_dir) {
        return Err(VitaeError::NotInitialized.into());
    }
    let store: Arc<dyn Store> = Arc::from(store::open(backend, data_dir)?);
    let state = AppState::new(store, data_dir.to_path_buf());

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async move {
        tokio::select! {
            res = gitvitae_server::serve(state, port, !no_open) => res,
            _ = tokio::signal::ctrl_c() => Ok(()),
        }
    })
}
