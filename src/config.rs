use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::platforms::PlatformSpec;

const DEFAULT_CONCURRENCY: usize = 12;
const DEFAULT_TIMEOUT_SECS: u64 = 12;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    /// Maximum simultaneous in-flight requests.
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Accept invalid TLS certificates when probing.
    #[serde(default)]
    pub accept_invalid_certs: bool,

    /// Platform keys excluded from probing.
    #[serde(default)]
    pub disabled: Vec<String>,

    /// User-defined platforms, appended after the built-in catalog.
    #[serde(default)]
    pub extra_platforms: Vec<PlatformSpec>,

    #[serde(skip_serializing, skip_deserializing)]
    base_path: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_CONCURRENCY,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            accept_invalid_certs: false,
            disabled: Vec::new(),
            extra_platforms: Vec::new(),
            base_path: String::new(),
        }
    }
}

fn default_concurrency() -> usize {
    DEFAULT_CONCURRENCY
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

/// Application base directory, `USERFIND_BASE_PATH` overrides the default.
pub fn base_path() -> anyhow::Result<String> {
    if let Ok(path) = std::env::var("USERFIND_BASE_PATH") {
        return Ok(path);
    }

    let home = homedir::my_home()
        .context("couldnt determine home directory")?
        .context("home directory path is empty")?;
    Ok(format!("{}/.local/share/userfind", home.to_string_lossy()))
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        Self::load_with(&base_path()?)
    }

    pub fn load_with(base_path: &str) -> anyhow::Result<Self> {
        std::fs::create_dir_all(base_path)
            .with_context(|| format!("failed to create {base_path}"))?;

        let config_path = format!("{base_path}/config.yaml");

        // create new if does not exist
        if std::fs::metadata(&config_path).is_err() {
            log::info!("creating default config at {config_path}");
            std::fs::write(&config_path, serde_yml::to_string(&Self::default())?)?;
        }

        let config_str = std::fs::read_to_string(&config_path)
            .with_context(|| format!("failed to read {config_path}"))?;
        let mut config: Self =
            serde_yml::from_str(&config_str).context("config is malformed")?;

        config.base_path = base_path.to_string();
        config.validate()?;

        // resave in case config version needs an upgrade
        if config_str != serde_yml::to_string(&config)? {
            config.save()?;
        }

        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        if self.concurrency == 0 {
            anyhow::bail!("concurrency must be greater than 0");
        }
        if self.timeout_secs == 0 {
            anyhow::bail!("timeout_secs must be greater than 0");
        }
        Ok(())
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = format!("{}/config.yaml", self.base_path);
        std::fs::write(&config_path, serde_yml::to_string(self)?)
            .with_context(|| format!("failed to write {config_path}"))?;
        Ok(())
    }
}
