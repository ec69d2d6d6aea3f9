//! Layered configuration.
//!
//! Uses Figment to merge `config.toml` + `config.<env>.toml` + `APP_*` env vars,
//! with `RUST_ENV` picking the environment. Nested keys come from env vars
//! with `__` separators, e.g. `APP_HIGHLIGHT__FRAGMENT_CHAR_SIZE=80`.

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::de::DeserializeOwned;
use std::env;
use std::path::Path;

use crate::error::{Error, Result};

pub struct Config {
    figment: Figment,
}

impl Config {
    pub fn load() -> Result<Self> {
        let env_name = env::var("RUST_ENV").unwrap_or_else(|_| "dev".to_string());
        Ok(Self::load_from(Path::new("."), &env_name))
    }

    /// Loads the config files found in `dir` for `env_name`. Missing files are skipped.
    pub fn load_from(dir: &Path, env_name: &str) -> Self {
        let mut figment = Figment::new().merge(Toml::file(dir.join("config.toml")));
        let env_file = match env_name {
            "dev" | "development" => Some("config.dev.toml"),
            "prod" | "production" => Some("config.prod.toml"),
            "test" | "testing" => Some("config.test.toml"),
            _ => None,
        };
        if let Some(file) = env_file {
            figment = figment.merge(Toml::file(dir.join(file)));
        }
        figment = figment.merge(Env::prefixed("APP_").split("__"));
        Self { figment }
    }

    pub fn from_figment(figment: Figment) -> Self {
        Self { figment }
    }

    pub fn get<T>(&self, key: &str) -> Result<T>
    where
        T: DeserializeOwned,
    {
        self.figment
            .extract_inner(key)
            .map_err(|e| Error::InvalidConfig(format!("Failed to get '{key}': {e}")))
    }

    /// Like [`Config::get`] but an absent key yields `T::default()`.
    pub fn get_or_default<T>(&self, key: &str) -> Result<T>
    where
        T: DeserializeOwned + Default,
    {
        if self.figment.find_value(key).is_err() {
            return Ok(T::default());
        }
        self.get(key)
    }
}
