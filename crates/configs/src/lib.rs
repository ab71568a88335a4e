use anyhow::Result;
use serde::Deserialize;
use anyhow::anyhow;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Copy, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct LoggingConfig {
    #[serde(default)]
    pub format: LogFormat,
    /// `EnvFilter` directive used when `RUST_LOG` is not set.
    #[serde(default)]
    pub filter: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct StorageConfig {
    /// Directory holding the JSON entity files; in-memory only when unset.
    #[serde(default)]
    pub data_dir: Option<String>,
    /// Fixture file imported through the services at startup.
    #[serde(default)]
    pub seed_file: Option<String>,
}

pub fn load_default() -> Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    load_from_file(&path)
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    parse(&content)
}

pub fn parse(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

impl AppConfig {
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = load_default()?;
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    /// Like `load_and_validate`, but a missing config file yields defaults.
    pub fn load_or_default() -> Result<Self> {
        let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
        let mut cfg = if std::path::Path::new(&path).exists() {
            load_from_file(&path)?
        } else {
            AppConfig::default()
        };
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.logging.normalize();
        self.storage.normalize_from_env();
        self.storage.validate()?;
        Ok(())
    }
}

impl LoggingConfig {
    fn normalize(&mut self) {
        if self.filter.as_deref().is_some_and(|f| f.trim().is_empty()) {
            self.filter = None;
        }
    }
}

impl StorageConfig {
    pub fn normalize_from_env(&mut self) {
        if self.data_dir.as_deref().map_or(true, |d| d.trim().is_empty()) {
            self.data_dir = std::env::var("TAXI_DATA_DIR").ok().filter(|d| !d.trim().is_empty());
        }
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(seed) = &self.seed_file {
            if seed.trim().is_empty() {
                return Err(anyhow!(
                    "storage.seed_file is blank; remove it or point it at a JSON fixture file"
                ));
            }
        }
        Ok(())
    }
}
