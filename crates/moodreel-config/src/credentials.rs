use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

#[derive(Debug, Serialize, Deserialize, Default)]
struct CredentialsData {
    #[serde(flatten)]
    data: HashMap<String, String>,
}

/// API keys kept outside `config.toml` so the config can be shared safely.
pub struct CredentialStore {
    path: PathBuf,
    credentials: HashMap<String, String>,
}

impl CredentialStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            credentials: HashMap::new(),
        }
    }

    pub fn load(&mut self) -> Result<()> {
        if self.path.exists() {
            let content = std::fs::read_to_string(&self.path)?;
            let creds_data: CredentialsData = toml::from_str(&content)?;
            self.credentials = creds_data.data;
        }
        Ok(())
    }

    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let creds_data = CredentialsData {
            data: self.credentials.clone(),
        };
        let content = toml::to_string_pretty(&creds_data)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    pub fn get(&self, key: &str) -> Option<&String> {
        self.credentials.get(key)
    }

    pub fn set(&mut self, key: String, value: String) {
        self.credentials.insert(key, value);
    }

    pub fn get_tmdb_api_key(&self) -> Option<&String> {
        self.get("tmdb_api_key")
    }

    pub fn set_tmdb_api_key(&mut self, key: String) {
        self.set("tmdb_api_key".to_string(), key);
    }

    pub fn get_omdb_api_key(&self) -> Option<&String> {
        self.get("omdb_api_key")
    }

    pub fn set_omdb_api_key(&mut self, key: String) {
        self.set("omdb_api_key".to_string(), key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_credential_store_load_and_save() {
        let file = NamedTempFile::new().unwrap();
        let path = file.path().to_path_buf();

        let mut store = CredentialStore::new(path.clone());
        store.set_tmdb_api_key("tmdb_key".to_string());
        store.set_omdb_api_key("omdb_key".to_string());
        store.save().unwrap();

        let mut loaded_store = CredentialStore::new(path);
        loaded_store.load().unwrap();
        assert_eq!(loaded_store.get_tmdb_api_key(), Some(&"tmdb_key".to_string()));
        assert_eq!(loaded_store.get_omdb_api_key(), Some(&"omdb_key".to_string()));
    }

    #[test]
    fn test_missing_file_loads_empty() {
        let mut store = CredentialStore::new(PathBuf::from("/nonexistent/moodreel/credentials.toml"));
        store.load().unwrap();
        assert_eq!(store.get_tmdb_api_key(), None);
        assert_eq!(store.get_omdb_api_key(), None);
    }
}
