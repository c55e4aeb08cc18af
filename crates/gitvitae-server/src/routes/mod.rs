pub mod ai;
pub mod config;
pub mod export;
pub mod projects;
pub mod resumes;
pub mod users;
