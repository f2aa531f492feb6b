use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use crate::utils::{app_data_dir, ensure_dir};

use super::{KeyValueStore, Result};

const TMP_SUFFIX: &str = "tmp";

/// File-backed key-value store: one `<key>.json` per key under the data
/// directory.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    root: PathBuf,
}

impl JsonFileStore {
    pub fn new(root: Option<PathBuf>) -> Result<Self> {
        let root = root.unwrap_or_else(app_data_dir);
        ensure_dir(&root)?;
        Ok(Self { root })
    }

    pub fn new_default() -> Result<Self> {
        Self::new(None)
    }

    pub fn base_dir(&self) -> &Path {
        &self.root
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.json", key))
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.key_path(key);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(path)?))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.key_path(key);
        let tmp = tmp_path(&path);
        write_all(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_all(path: &Path, data: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_with_temp_dir() -> (JsonFileStore, TempDir) {
        let temp = TempDir::new().expect("temp dir");
        let store = JsonFileStore::new(Some(temp.path().to_path_buf())).expect("json store");
        (store, temp)
    }

    #[test]
    fn get_of_absent_key_is_none() {
        let (store, _guard) = store_with_temp_dir();
        assert!(store.get("expenses").expect("get").is_none());
    }

    #[test]
    fn set_then_get_round_trips() {
        let (store, _guard) = store_with_temp_dir();
        store.set("expenses", "[]").expect("set");
        assert_eq!(store.get("expenses").expect("get").as_deref(), Some("[]"));
    }

    #[test]
    fn set_replaces_the_whole_value() {
        let (store, _guard) = store_with_temp_dir();
        store.set("user", "{\"a\":1}").expect("set");
        store.set("user", "{\"b\":2}").expect("set again");
        assert_eq!(
            store.get("user").expect("get").as_deref(),
            Some("{\"b\":2}")
        );
    }

    #[test]
    fn keys_live_in_separate_files() {
        let (store, guard) = store_with_temp_dir();
        store.set("expenses", "[]").expect("set");
        store.set("budgets", "[]").expect("set");
        assert!(guard.path().join("expenses.json").exists());
        assert!(guard.path().join("budgets.json").exists());
    }
}
