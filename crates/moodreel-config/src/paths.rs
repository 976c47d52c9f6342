use anyhow::Result;
use std::path::{Path, PathBuf};

/// Base directory override, mostly for tests and containers.
const HOME_ENV: &str = "MOODREEL_HOME";

pub struct PathManager {
    config_dir: PathBuf,
    data_dir: PathBuf,
    log_dir: PathBuf,
}

impl PathManager {
    pub fn new() -> Result<Self> {
        let base_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?
            .join("moodreel");

        Ok(Self::with_base(base_dir))
    }

    /// Config files at the base, data and logs in subdirectories.
    pub fn with_base(base: impl Into<PathBuf>) -> Self {
        let base = base.into();
        Self {
            config_dir: base.clone(),
            data_dir: base.join("data"),
            log_dir: base.join("logs"),
        }
    }

    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }

    /// Directory backing the key-value store (one JSON file per key)
    pub fn store_dir(&self) -> PathBuf {
        self.data_dir.join("store")
    }

    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join("config.toml")
    }

    pub fn credentials_file(&self) -> PathBuf {
        self.config_dir.join("credentials.toml")
    }

    pub fn ensure_directories(&self) -> Result<()> {
        std::fs::create_dir_all(&self.config_dir)?;
        std::fs::create_dir_all(&self.data_dir)?;
        std::fs::create_dir_all(&self.log_dir)?;
        std::fs::create_dir_all(self.store_dir())?;
        Ok(())
    }
}

impl Default for PathManager {
    fn default() -> Self {
        if let Ok(base) = std::env::var(HOME_ENV) {
            return Self::with_base(base);
        }

        // Platform-specific paths (e.g., ~/.config/moodreel on Linux),
        // falling back to a dot directory in the working directory.
        Self::new().unwrap_or_else(|_| Self::with_base(".moodreel"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_layout_under_base() {
        let paths = PathManager::with_base("/srv/moodreel");
        assert_eq!(paths.config_file(), PathBuf::from("/srv/moodreel/config.toml"));
        assert_eq!(paths.credentials_file(), PathBuf::from("/srv/moodreel/credentials.toml"));
        assert_eq!(paths.store_dir(), PathBuf::from("/srv/moodreel/data/store"));
        assert_eq!(paths.log_dir(), Path::new("/srv/moodreel/logs"));
    }

    #[test]
    fn test_ensure_directories() {
        let dir = TempDir::new().unwrap();
        let paths = PathManager::with_base(dir.path());
        paths.ensure_directories().unwrap();
        assert!(paths.store_dir().is_dir());
        assert!(paths.log_dir().is_dir());
    }
}
