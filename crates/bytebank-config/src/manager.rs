use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};

use tempfile::NamedTempFile;

use crate::{Config, ConfigError};

const CONFIG_DIR: &str = "config";
const CONFIG_FILE: &str = "config.json";

/// Reads and writes the JSON preferences file.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    pub fn new(config_path: PathBuf) -> Self {
        Self { config_path }
    }

    /// Uses `<base>/config/config.json`, creating the directory.
    pub fn with_base_dir(base: PathBuf) -> Result<Self, ConfigError> {
        let dir = base.join(CONFIG_DIR);
        fs::create_dir_all(&dir)?;
        Ok(Self::new(dir.join(CONFIG_FILE)))
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Stored config, or defaults when the file does not exist yet.
    pub fn load(&self) -> Result<Config, ConfigError> {
        match fs::read_to_string(&self.config_path) {
            Ok(data) => serde_json::from_str(&data).map_err(|err| ConfigError::Serde(err.to_string())),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Config::default()),
            Err(err) => Err(err.into()),
        }
    }

    /// Like [`ConfigManager::load`], but writes the defaults out on first use.
    ///
    /// The flag is `true` when the file was created by this call.
    pub fn load_or_init(&self) -> Result<(Config, bool), ConfigError> {
        if self.config_path.exists() {
            return Ok((self.load()?, false));
        }
        let config = Config::default();
        self.save(&config)?;
        Ok((config, true))
    }

    /// Replaces the file in one rename so readers never see a partial document.
    pub fn save(&self, config: &Config) -> Result<(), ConfigError> {
        let dir = self
            .config_path
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(dir)?;

        let json = serde_json::to_string_pretty(config)
            .map_err(|err| ConfigError::Serde(err.to_string()))?;
        let mut staged = NamedTempFile::new_in(dir)?;
        staged.write_all(json.as_bytes())?;
        staged.flush()?;
        staged
            .persist(&self.config_path)
            .map_err(|err| ConfigError::Io(err.error))?;
        Ok(())
    }
}
