use std::{path::PathBuf, time::Duration};

use serde::{Deserialize, Serialize};

/// Stores user preferences for the Bytebank shell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub currency: String,
    #[serde(default = "Config::default_account_key")]
    pub account_key: String,
    #[serde(default = "Config::default_registration_delay_ms")]
    pub registration_delay_ms: u64,
    #[serde(default)]
    pub show_balance_on_login: bool,
    #[serde(default = "Config::default_ui_color_enabled")]
    pub ui_color_enabled: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Optional custom directory for stored data. Defaults to `<data dir>/bytebank`.
    pub storage_root: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            currency: "BRL".into(),
            account_key: Self::default_account_key(),
            registration_delay_ms: Self::default_registration_delay_ms(),
            show_balance_on_login: false,
            ui_color_enabled: Self::default_ui_color_enabled(),
            storage_root: None,
        }
    }
}

impl Config {
    pub fn default_account_key() -> String {
        "@bytebank/account-data".into()
    }

    pub fn default_registration_delay_ms() -> u64 {
        2000
    }

    pub fn default_ui_color_enabled() -> bool {
        true
    }

    pub fn registration_delay(&self) -> Duration {
        Duration::from_millis(self.registration_delay_ms)
    }

    pub fn resolve_storage_root(&self) -> PathBuf {
        if let Some(path) = &self.storage_root {
            return path.clone();
        }

        let base = dirs::data_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."));

        base.join("bytebank")
    }
}
