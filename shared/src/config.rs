//! Configuration management for Lambda functions.

use std::env;

use crate::prompt::PromptSpec;
use crate::{Error, Result};

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Completion service credential; absence fails requests, not startup
    pub openai_api_key: Option<String>,
    /// Completion service base URL
    pub openai_base_url: String,
    /// Model identifier sent with every completion
    pub openai_model: String,
    /// Prompt variant this deployment serves
    pub prompt_spec: PromptSpec,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let variant = lookup("REWRITE_VARIANT").unwrap_or_else(|| "standard".to_string());
        let prompt_spec = PromptSpec::by_name(variant.trim())
            .ok_or_else(|| Error::Config(format!("Unknown REWRITE_VARIANT: {}", variant)))?;

        Ok(Self {
            openai_api_key: lookup("OPENAI_API_KEY").filter(|key| !key.trim().is_empty()),
            openai_base_url: lookup("OPENAI_BASE_URL")
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            openai_model: lookup("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            prompt_spec,
        })
    }
}
