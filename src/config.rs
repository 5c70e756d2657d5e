//! Configuration for the bridge: credential, endpoint and sampling defaults

use std::fmt;
use std::path::Path;
use log::debug;
use serde::{Deserialize, Serialize};

/// Environment variable holding the service credential
pub const API_KEY_ENV: &str = "TINKER_API_KEY";
/// Optional endpoint override
pub const BASE_URL_ENV: &str = "TINKER_BASE_URL";
/// Optional path to a JSON file overriding the defaults below
pub const CONFIG_PATH_ENV: &str = "TINKER_BRIDGE_CONFIG";

pub const DEFAULT_BASE_URL: &str
  = "https://tinker.thinkingmachines.dev/services/tinker-prod";
/// Tokenizer of the base model the sampled checkpoints were trained from.
/// Not derived from the model path.
pub const DEFAULT_TOKENIZER_ID: &str = "Qwen/Qwen3-VL-30B-A3B-Instruct";
pub const DEFAULT_MAX_TOKENS: usize = 500;
pub const DEFAULT_TEMPERATURE: f32 = 0.2;
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 500;

/// Everything one invocation needs besides its CLI arguments
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig
{   /// Credential, only ever read from the environment
    #[serde(skip)]
    pub api_key: String
  , /// Sampling service base URL
    pub base_url: String
  , /// Hugging Face hub id of the tokenizer
    pub tokenizer_id: String
  , /// Max tokens to generate
    pub max_tokens: usize
  , /// Temperature for sampling
    pub temperature: f32
  , /// Delay between polls of a pending sample future
    pub poll_interval_ms: u64
}

impl Default for BridgeConfig
{   fn default() -> Self
    {   BridgeConfig
        {   api_key: String::new()
          , base_url: DEFAULT_BASE_URL.to_string()
          , tokenizer_id: DEFAULT_TOKENIZER_ID.to_string()
          , max_tokens: DEFAULT_MAX_TOKENS
          , temperature: DEFAULT_TEMPERATURE
          , poll_interval_ms: DEFAULT_POLL_INTERVAL_MS
        }
    }
}

impl fmt::Debug for BridgeConfig
{   fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {   f.debug_struct("BridgeConfig")
          .field("api_key", &"<redacted>")
          .field("base_url", &self.base_url)
          .field("tokenizer_id", &self.tokenizer_id)
          .field("max_tokens", &self.max_tokens)
          .field("temperature", &self.temperature)
          .field("poll_interval_ms", &self.poll_interval_ms)
          .finish()
    }
}

impl BridgeConfig
{   /// Build the config from the process environment
    pub fn from_env() -> crate::Result<Self>
    {   Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build the config from any variable lookup.
    /// The credential is checked first so a missing key fails
    /// before anything else is read.
    pub fn from_lookup<F>(lookup: F) -> crate::Result<Self>
    where
      F: Fn(&str) -> Option<String>
    {   let api_key = non_empty(lookup(API_KEY_ENV))
          .ok_or_else(|| {
            crate::Error::MissingApiKey(API_KEY_ENV.to_string())
          })?;

        let mut config = match non_empty(lookup(CONFIG_PATH_ENV))
        {   Some(path) => Self::from_file(path)?
          , None => BridgeConfig::default()
        };

        if let Some(base_url) = non_empty(lookup(BASE_URL_ENV))
        {   debug!("Using base url from {}", BASE_URL_ENV);
            config.base_url = base_url;
        }

        config.api_key = api_key;
        debug!("Resolved {:?}", config);
        Ok(config)
    }

    /// Load overrides from a JSON file; missing fields keep their defaults
    pub fn from_file<P: AsRef<Path>>(path: P)
      -> crate::Result<Self>
    {   let path = path.as_ref();
        debug!("Loading config from {}", path.display());
        let raw = std::fs::read_to_string(path)
          .map_err(|e| {
            crate::Error::InvalidConfiguration(
              format!("{}: {}", path.display(), e)
            )
          })?;
        serde_json::from_str(&raw)
          .map_err(|e| {
            crate::Error::InvalidConfiguration(
              format!("{}: {}", path.display(), e)
            )
          })
    }
}

fn non_empty(value: Option<String>) -> Option<String>
{   value.filter(|v| !v.trim().is_empty())
}
