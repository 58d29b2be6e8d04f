use std::env;

use thiserror::Error;

use crate::prompts::SYSTEM_PROMPT;

pub const DEFAULT_MODEL: &str = "mistralai/Mixtral-8x7B-Instruct-v0.1";
pub const DEFAULT_INFER_URL: &str = "https://router.huggingface.co";
pub const DEFAULT_MAX_TOKENS: u32 = 1024;
pub const DEFAULT_PORT: u16 = 3000;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} environment variable must be set")]
    Missing(&'static str),

    #[error("{name} cannot be empty")]
    Empty { name: &'static str },

    #[error("Invalid {name}: {value:?}")]
    Invalid { name: &'static str, value: String },
}

/// Where and how to reach the inference provider.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub api_key: Box<str>,
    pub infer_url: Box<str>,
}

/// Everything the relay puts into a chat completion besides the user prompt.
#[derive(Debug, Clone)]
pub struct CompletionConfig {
    pub model: Box<str>,
    pub system_prompt: Box<str>,
    /// `None` leaves the response length to the provider default.
    pub max_tokens: Option<u32>,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.into(),
            system_prompt: SYSTEM_PROMPT.into(),
            max_tokens: Some(DEFAULT_MAX_TOKENS),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub provider: ProviderConfig,
    pub completion: CompletionConfig,
    pub port: u16,
}

impl Config {
    /// Loads `.env` (if any) and then reads the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key: Box<str> = lookup("HF_API_KEY")
            .ok_or(ConfigError::Missing("HF_API_KEY"))?
            .trim()
            .into();
        if api_key.is_empty() {
            return Err(ConfigError::Empty { name: "HF_API_KEY" });
        }

        let infer_url = lookup("INFER_URL")
            .map(|url| url.trim().trim_end_matches('/').to_owned())
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_INFER_URL.into());

        let model = lookup("DEFAULT_MODEL")
            .map(|model| model.trim().to_owned())
            .filter(|model| !model.is_empty())
            .unwrap_or_else(|| DEFAULT_MODEL.into());

        let max_tokens = match lookup("MAX_TOKENS") {
            Some(value) => parse_max_tokens(&value)?,
            None => Some(DEFAULT_MAX_TOKENS),
        };

        let port = match lookup("PORT") {
            Some(value) => value.trim().parse::<u16>().map_err(|_| ConfigError::Invalid {
                name: "PORT",
                value,
            })?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            provider: ProviderConfig {
                api_key,
                infer_url: infer_url.into(),
            },
            completion: CompletionConfig {
                model: model.into(),
                max_tokens,
                ..CompletionConfig::default()
            },
            port,
        })
    }
}

fn parse_max_tokens(value: &str) -> Result<Option<u32>, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "" | "none" | "off" | "0" => Ok(None),
        number => number
            .parse::<u32>()
            .map(Some)
            .map_err(|_| ConfigError::Invalid {
                name: "MAX_TOKENS",
                value: value.to_owned(),
            }),
    }
}
