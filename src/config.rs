// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db::APP;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const DEFAULT_RATES_URL: &str = "https://open.er-api.com/v6/latest/USD";
pub const DEFAULT_INSIGHTS_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_INSIGHTS_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_CURRENCY_SYMBOL: &str = "K";

/// Environment variables checked, in order, for the insights credential.
pub const API_KEY_VARS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub rates_url: String,
    pub insights_endpoint: String,
    pub insights_model: String,
    pub currency_symbol: String,
    #[serde(skip)]
    pub api_key: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            rates_url: DEFAULT_RATES_URL.to_string(),
            insights_endpoint: DEFAULT_INSIGHTS_ENDPOINT.to_string(),
            insights_model: DEFAULT_INSIGHTS_MODEL.to_string(),
            currency_symbol: DEFAULT_CURRENCY_SYMBOL.to_string(),
            api_key: None,
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific config dir")?;
    Ok(proj.config_dir().join("config.json"))
}

impl Settings {
    /// Load from the platform config dir and pick up the credential from the
    /// environment.
    pub fn load() -> Result<Settings> {
        let mut settings = Settings::load_from(&config_path()?)?;
        settings.api_key = API_KEY_VARS
            .iter()
            .find_map(|var| std::env::var(var).ok())
            .filter(|k| !k.trim().is_empty());
        Ok(settings)
    }

    /// A missing file yields the defaults; a malformed one is an error.
    pub fn load_from(path: &Path) -> Result<Settings> {
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Settings::default());
        }
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Read config at {}", path.display()))?;
        let settings: Settings = serde_json::from_str(&raw)
            .with_context(|| format!("Invalid config at {}", path.display()))?;
        debug!(path = %path.display(), "loaded config");
        Ok(settings)
    }
}
