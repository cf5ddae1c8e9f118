// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow, bail};
use jansite_app::{DEFAULT_BUSINESS_NAME, DEFAULT_RECIPIENT, SiteConfig, normalize_recipient};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub const APP_NAME: &str = "jansite";
const CONFIG_VERSION: i64 = 1;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub version: i64,
    #[serde(default)]
    pub site: Site,
    #[serde(default)]
    pub whatsapp: Whatsapp,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            site: Site::default(),
            whatsapp: Whatsapp::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Site {
    pub business_name: Option<String>,
}

impl Default for Site {
    fn default() -> Self {
        Self {
            business_name: Some(DEFAULT_BUSINESS_NAME.to_owned()),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Whatsapp {
    pub recipient: Option<String>,
}

impl Default for Whatsapp {
    fn default() -> Self {
        Self {
            recipient: Some(DEFAULT_RECIPIENT.to_owned()),
        }
    }
}

impl Config {
    pub fn default_path() -> Result<PathBuf> {
        if let Some(path) = env::var_os("JANSITE_CONFIG_PATH") {
            return Ok(PathBuf::from(path));
        }

        let config_root = dirs::config_dir().ok_or_else(|| {
            anyhow!("cannot resolve config directory; set JANSITE_CONFIG_PATH to the config file")
        })?;
        Ok(config_root.join(APP_NAME).join("config.toml"))
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let raw = fs::read_to_string(path)
            .with_context(|| format!("read config file {}", path.display()))?;
        let value: toml::Value = toml::from_str(&raw)
            .with_context(|| format!("parse TOML config {}", path.display()))?;

        let version = value
            .get("version")
            .and_then(toml::Value::as_integer)
            .ok_or_else(|| {
                anyhow!(
                    "config file {} is not versioned. Add `version = 1` and put values under [site] and [whatsapp]",
                    path.display()
                )
            })?;

        if version != CONFIG_VERSION {
            bail!(
                "unsupported config version {} in {}; expected version = 1",
                version,
                path.display()
            );
        }

        let config: Config = value
            .try_into()
            .with_context(|| format!("decode config {}", path.display()))?;
        config.validate(path)?;
        Ok(config)
    }

    fn validate(&self, path: &Path) -> Result<()> {
        if let Some(name) = &self.site.business_name
            && name.trim().is_empty()
        {
            bail!("site.business_name in {} must not be blank", path.display());
        }

        if let Some(recipient) = &self.whatsapp.recipient {
            normalize_recipient(recipient)
                .with_context(|| format!("invalid whatsapp.recipient in {}", path.display()))?;
        }

        Ok(())
    }

    pub fn business_name(&self) -> &str {
        self.site
            .business_name
            .as_deref()
            .map(str::trim)
            .unwrap_or(DEFAULT_BUSINESS_NAME)
    }

    pub fn recipient(&self) -> &str {
        self.whatsapp
            .recipient
            .as_deref()
            .unwrap_or(DEFAULT_RECIPIENT)
    }

    pub fn site_config(&self) -> SiteConfig {
        SiteConfig {
            business_name: self.business_name().to_owned(),
            whatsapp_recipient: self.recipient().to_owned(),
        }
    }

    pub fn example_config(path: &Path) -> String {
        format!(
            "# jansite config\n# Place this file at: {}\n\nversion = 1\n\n[site]\nbusiness_name = \"{}\"\n\n[whatsapp]\n# International number, digits only (a leading + is allowed)\nrecipient = \"{}\"\n",
            path.display(),
            DEFAULT_BUSINESS_NAME,
            DEFAULT_RECIPIENT,
        )
    }
}
