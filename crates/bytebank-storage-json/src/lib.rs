//! bytebank-storage-json
//!
//! Filesystem-backed [`KeyValueStore`]: one pretty-printed JSON file per key.

use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use bytebank_core::{CoreError, KeyValueStore};

const FILE_EXTENSION: &str = "json";
const TMP_SUFFIX: &str = "tmp";

/// Stores each key as `<root>/<encoded key>.json`; see [`file_stem`].
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    root: PathBuf,
}

impl JsonFileStore {
    pub fn new(root: PathBuf) -> Result<Self, CoreError> {
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.root
            .join(format!("{}.{}", file_stem(key), FILE_EXTENSION))
    }
}

impl KeyValueStore for JsonFileStore {
    fn get_raw(&self, key: &str) -> Result<Option<String>, CoreError> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        let data = fs::read_to_string(&path)?;
        tracing::debug!(path = %path.display(), bytes = data.len(), "read stored item");
        Ok(Some(data))
    }

    fn set_raw(&self, key: &str, value: &str) -> Result<(), CoreError> {
        let document: serde_json::Value =
            serde_json::from_str(value).map_err(|err| CoreError::Serde(err.to_string()))?;
        let pretty = serde_json::to_string_pretty(&document)
            .map_err(|err| CoreError::Serde(err.to_string()))?;
        let path = self.path_for(key);
        let tmp = tmp_path(&path);
        write_atomic(&tmp, &pretty)?;
        fs::rename(&tmp, &path)?;
        tracing::debug!(path = %path.display(), "stored item");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<bool, CoreError> {
        let path = self.path_for(key);
        if path.exists() {
            fs::remove_file(path)?;
            Ok(true)
        } else {
            Ok(false)
        }
    }
}

/// File stem for `key`: `[a-z0-9-]` pass through, every other byte becomes `%XX`.
///
/// Distinct keys always map to distinct stems, and no two stems differ only
/// by case, so the mapping also holds on case-insensitive filesystems.
pub fn file_stem(key: &str) -> String {
    let mut stem = String::with_capacity(key.len());
    for byte in key.bytes() {
        match byte {
            b'a'..=b'z' | b'0'..=b'9' | b'-' => stem.push(char::from(byte)),
            _ => stem.push_str(&format!("%{:02X}", byte)),
        }
    }
    stem
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

fn write_atomic(path: &Path, data: &str) -> Result<(), CoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
