//! Configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde_json::Value;

use crate::host::{DEFAULT_POSTS_PER_PAGE, OptionStore, POSTS_PER_PAGE};

/// Default text domain for translatable default-content labels.
pub const DEFAULT_TEXT_DOMAIN: &str = "ar2";

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Host page size used when a section does not set its own count (default: 10).
    pub posts_per_page: u32,

    /// Path to the Tera templates directory (default: ./templates).
    pub templates_dir: PathBuf,

    /// Text domain handed to the translator (default: "ar2").
    pub text_domain: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let posts_per_page: u32 = env::var("POSTS_PER_PAGE")
            .unwrap_or_else(|_| DEFAULT_POSTS_PER_PAGE.to_string())
            .parse()
            .context("POSTS_PER_PAGE must be a valid u32")?;
        if posts_per_page == 0 {
            anyhow::bail!("POSTS_PER_PAGE must be greater than zero");
        }

        let templates_dir = env::var("TEMPLATES_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./templates"));

        let text_domain =
            env::var("TEXT_DOMAIN").unwrap_or_else(|_| DEFAULT_TEXT_DOMAIN.to_string());

        Ok(Self {
            posts_per_page,
            templates_dir,
            text_domain,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            posts_per_page: DEFAULT_POSTS_PER_PAGE,
            templates_dir: PathBuf::from("./templates"),
            text_domain: DEFAULT_TEXT_DOMAIN.to_string(),
        }
    }
}

impl OptionStore for Config {
    fn get_option(&self, key: &str) -> Option<Value> {
        match key {
            POSTS_PER_PAGE => Some(Value::from(self.posts_per_page)),
            "text_domain" => Some(Value::from(self.text_domain.as_str())),
            "templates_dir" => Some(Value::from(self.templates_dir.to_string_lossy().as_ref())),
            _ => None,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn default_config_exposes_page_size() {
        let config = Config::default();
        assert_eq!(config.posts_per_page(), DEFAULT_POSTS_PER_PAGE);
        assert_eq!(
            config.get_option("text_domain"),
            Some(Value::from(DEFAULT_TEXT_DOMAIN))
        );
    }

    #[test]
    fn unknown_option_is_absent() {
        let config = Config::default();
        assert!(config.get_option("blogname").is_none());
    }

    #[test]
    fn custom_page_size_flows_through_option_store() {
        let config = Config {
            posts_per_page: 25,
            ..Config::default()
        };
        assert_eq!(config.posts_per_page(), 25);
    }
}
