// src/file/mod.rs
use anyhow::Result;
use std::path::Path;

pub mod export;
pub mod session;

pub use export::save_report;
pub use session::{FileSessionStore, Session, SessionStore};

// Core trait for file operations
pub trait FileHandler<T> {
    fn load(&self, path: &Path) -> Result<T>;
    fn save(&self, data: &T, path: &Path) -> Result<()>;
}

pub(crate) fn pretty_config() -> ron::ser::PrettyConfig {
    ron::ser::PrettyConfig::new()
        .new_line("\n".to_string())
        .depth_limit(4)
        .separate_tuple_members(true)
}
