use crate::core::wallet::Wallet;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use tracing::debug;

pub const DEFAULT_AWESOME_BASE_URL: &str = "https://economia.awesomeapi.com.br";

fn default_timeout_secs() -> u64 {
    10
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AwesomeProviderConfig {
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for AwesomeProviderConfig {
    fn default() -> Self {
        AwesomeProviderConfig {
            base_url: DEFAULT_AWESOME_BASE_URL.to_string(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ProvidersConfig {
    pub awesome: Option<AwesomeProviderConfig>,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        ProvidersConfig {
            awesome: Some(AwesomeProviderConfig::default()),
        }
    }
}

/// Seed balances for a new session.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct WalletConfig {
    #[serde(default = "seed_brl")]
    pub brl: f64,
    #[serde(default = "seed_usd")]
    pub usd: f64,
    #[serde(default = "seed_btc")]
    pub btc: f64,
}

fn seed_brl() -> f64 {
    Wallet::default().brl
}

fn seed_usd() -> f64 {
    Wallet::default().usd
}

fn seed_btc() -> f64 {
    Wallet::default().btc
}

impl Default for WalletConfig {
    fn default() -> Self {
        WalletConfig {
            brl: seed_brl(),
            usd: seed_usd(),
            btc: seed_btc(),
        }
    }
}

impl WalletConfig {
    pub fn to_wallet(&self) -> Result<Wallet> {
        for (code, value) in [("brl", self.brl), ("usd", self.usd), ("btc", self.btc)] {
            if !(value.is_finite() && value >= 0.0) {
                anyhow::bail!("Seed balance for {code} must be a non-negative number, got {value}");
            }
        }
        Ok(Wallet::new(self.brl, self.usd, self.btc))
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub providers: ProvidersConfig,
    #[serde(default)]
    pub wallet: WalletConfig,
}

impl AppConfig {
    /// Loads the default config file, falling back to built-in defaults when
    /// it has not been created yet.
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        if !config_path.exists() {
            debug!(
                "No config at {}, using defaults",
                config_path.display()
            );
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("dev", "walletfx", "walletfx")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }

    pub fn awesome(&self) -> AwesomeProviderConfig {
        self.providers.awesome.clone().unwrap_or_default()
    }
}
