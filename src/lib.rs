pub mod changelog;
pub mod classify;
pub mod config;
pub mod error;
pub mod history;
pub mod provider;
pub mod publisher;
pub mod ui;
pub mod version;
pub mod workflow;

pub use error::{ChangelogError, Result};
