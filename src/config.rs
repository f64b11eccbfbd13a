use crate::cli::Cli;
use crate::error::ConfigError;
use serde::Deserialize;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

pub const DEFAULT_CONFIG_FILE: &str = "cleanup_bot.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_base_url: String,
    pub upload_path: String,
    pub analysis_path: String,
    pub request_timeout_secs: u64,
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8000".into(),
            upload_path: "/save_image".into(),
            analysis_path: "/question-whether-dirty/".into(),
            request_timeout_secs: 30,
            log_filter: "info".into(),
        }
    }
}

/// Keys accepted in the config file. Everything is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileSettings {
    api_base_url: Option<String>,
    upload_path: Option<String>,
    analysis_path: Option<String>,
    request_timeout_secs: Option<u64>,
    log_filter: Option<String>,
}

impl Settings {
    /// Defaults, then the config file, then `CLEANUP_BOT_*` variables, then
    /// command-line flags.
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let mut settings = Settings::default();
        settings.apply_file(&cli.config)?;
        settings.apply_env(|key| std::env::var(key).ok())?;
        settings.apply_cli(cli);
        Ok(settings)
    }

    fn apply_file(&mut self, path: &Path) -> Result<(), ConfigError> {
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(()),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        self.apply_toml(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        positive_timeout("request_timeout_secs", self.request_timeout_secs)?;
        Ok(())
    }

    fn apply_toml(&mut self, raw: &str) -> Result<(), toml::de::Error> {
        let file: FileSettings = toml::from_str(raw)?;
        if let Some(v) = file.api_base_url {
            self.api_base_url = v;
        }
        if let Some(v) = file.upload_path {
            self.upload_path = v;
        }
        if let Some(v) = file.analysis_path {
            self.analysis_path = v;
        }
        if let Some(v) = file.request_timeout_secs {
            self.request_timeout_secs = v;
        }
        if let Some(v) = file.log_filter {
            self.log_filter = v;
        }
        Ok(())
    }

    fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<(), ConfigError> {
        if let Some(v) = lookup("CLEANUP_BOT_API_URL") {
            self.api_base_url = v;
        }
        if let Some(v) = lookup("CLEANUP_BOT_TIMEOUT_SECS") {
            let secs = v.trim().parse().map_err(|_| ConfigError::InvalidValue {
                key: "CLEANUP_BOT_TIMEOUT_SECS",
                value: v.clone(),
            })?;
            self.request_timeout_secs = positive_timeout("CLEANUP_BOT_TIMEOUT_SECS", secs)?;
        }
        if let Some(v) = lookup("CLEANUP_BOT_LOG") {
            self.log_filter = v;
        }
        Ok(())
    }

    fn apply_cli(&mut self, cli: &Cli) {
        if let Some(v) = &cli.api_url {
            self.api_base_url = v.clone();
        }
        if let Some(v) = &cli.log {
            self.log_filter = v.clone();
        }
    }
}

/// A zero timeout would fail every request before it is sent.
fn positive_timeout(key: &'static str, secs: u64) -> Result<u64, ConfigError> {
    if secs == 0 {
        return Err(ConfigError::InvalidValue {
            key,
            value: secs.to_string(),
        });
    }
    Ok(secs)
}
