// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{error::Error, path::PathBuf, str::FromStr, time::Duration};

use calboard_client::ClientConfig;
use tokio::fs;

pub const APP_NAME: &str = "calboard";

const CALBOARD_CONFIG_ENV: &str = "CALBOARD_CONFIG";

#[tracing::instrument]
pub async fn parse_config(path: Option<PathBuf>) -> Result<Config, Box<dyn Error>> {
    let path = if let Some(path) = path {
        path
    } else if let Ok(env_path) = std::env::var(CALBOARD_CONFIG_ENV) {
        PathBuf::from(env_path)
    } else {
        let config = get_config_dir()?.join(format!("{APP_NAME}/config.toml"));
        if !config.exists() {
            return Err(format!("No config found at: {}", config.display()).into());
        }
        config
    };

    fs::read_to_string(&path)
        .await
        .map_err(|e| format!("Failed to read config file at {}: {}", path.display(), e))?
        .parse()
}

/// Configuration for the calboard application.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct Config {
    /// Connection to the event service.
    pub client: ClientConfig,

    /// Terminal interface settings.
    #[serde(default)]
    pub ui: UiConfig,
}

impl FromStr for Config {
    type Err = Box<dyn Error>;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(toml::from_str(s)?)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize)]
pub struct UiConfig {
    /// How long a notification stays on screen, in milliseconds.
    #[serde(default = "default_notification_timeout_ms")]
    pub notification_timeout_ms: u64,
}

impl UiConfig {
    pub fn notification_timeout(&self) -> Duration {
        Duration::from_millis(self.notification_timeout_ms)
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            notification_timeout_ms: default_notification_timeout_ms(),
        }
    }
}

const fn default_notification_timeout_ms() -> u64 {
    1000
}

fn get_config_dir() -> Result<PathBuf, Box<dyn Error>> {
    #[cfg(unix)]
    let config_dir = xdg::BaseDirectories::new().get_config_home();
    #[cfg(windows)]
    let config_dir = dirs::config_dir();
    config_dir.ok_or_else(|| "User-specific home directory not found".into())
}
