pub mod config;
pub mod error;
pub mod git;
pub mod io;
pub mod model;
pub mod paths;
pub mod prompts;
pub mod store;
pub mod sync;
pub mod tech;

pub use error::{Result, VitaeError};
