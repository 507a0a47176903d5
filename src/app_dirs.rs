//! Filesystem layout under a single `.clipdeck` root.
//!
//! Everything this app persists (the config file and logs) lives under one
//! directory in the OS config location, or wherever `CLIPDECK_CONFIG_HOME`
//! points for portable installs and tests.

use std::path::{Path, PathBuf};

use directories::BaseDirs;
use thiserror::Error;

/// Name of the application directory under the base config location.
pub const APP_DIR_NAME: &str = ".clipdeck";

/// Environment variable relocating the whole layout.
pub const CONFIG_HOME_ENV: &str = "CLIPDECK_CONFIG_HOME";

#[derive(Debug, Error)]
pub enum LayoutError {
    /// Neither the override nor an OS config directory was available.
    #[error("No config directory available for application files")]
    NoConfigDir,
    /// A directory under the root could not be created.
    #[error("Could not create {path}: {source}")]
    Create {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Resolved directory layout for one installation.
#[derive(Clone, Debug)]
pub struct AppLayout {
    root: PathBuf,
}

impl AppLayout {
    /// Resolve the root from the environment override or the OS config
    /// directory, creating it on first use.
    pub fn resolve() -> Result<Self, LayoutError> {
        let base = std::env::var_os(CONFIG_HOME_ENV)
            .map(PathBuf::from)
            .or_else(|| BaseDirs::new().map(|dirs| dirs.config_dir().to_path_buf()))
            .ok_or(LayoutError::NoConfigDir)?;
        Self::rooted_at(base)
    }

    /// Build a layout under an explicit base directory.
    pub fn rooted_at(base: impl Into<PathBuf>) -> Result<Self, LayoutError> {
        let root = base.into().join(APP_DIR_NAME);
        ensure_dir(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Logs directory under the root, created on demand.
    pub fn logs_dir(&self) -> Result<PathBuf, LayoutError> {
        let path = self.root.join("logs");
        ensure_dir(&path)?;
        Ok(path)
    }
}

fn ensure_dir(path: &Path) -> Result<(), LayoutError> {
    std::fs::create_dir_all(path).map_err(|source| LayoutError::Create {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn rooted_layout_creates_the_app_directory() {
        let base = tempdir().unwrap();
        let layout = AppLayout::rooted_at(base.path()).unwrap();
        assert_eq!(layout.root(), base.path().join(APP_DIR_NAME));
        assert!(layout.root().is_dir());
    }

    #[test]
    fn logs_dir_nests_under_the_root() {
        let base = tempdir().unwrap();
        let layout = AppLayout::rooted_at(base.path()).unwrap();
        let logs = layout.logs_dir().unwrap();
        assert_eq!(logs, layout.root().join("logs"));
        assert!(logs.is_dir());
    }
}
