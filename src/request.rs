//! Request and wire types for one sampling call

use serde::{Deserialize, Serialize};

/// One invocation's worth of input, built once from the CLI
/// arguments and the config defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Request
{   /// Sampler checkpoint to sample from
    pub model_path: String
  , /// The user message
    pub user_input: String
  , /// Optional system message
    pub system_prompt: Option<String>
  , /// Max tokens to generate
    pub max_tokens: usize
  , /// Temperature for sampling
    pub temperature: f32
}

impl Request
{   /// Create a request with the default sampling settings
    pub fn new(
      model_path: impl Into<String>
    , user_input: impl Into<String>
    , system_prompt: Option<String>
    ) -> Self
    {   Request
        {   model_path: model_path.into()
          , user_input: user_input.into()
          , system_prompt
          , max_tokens: crate::config::DEFAULT_MAX_TOKENS
          , temperature: crate::config::DEFAULT_TEMPERATURE
        }
    }

    /// Take max tokens and temperature from a config
    pub fn with_sampling(
      mut self
    , max_tokens: usize
    , temperature: f32
    ) -> Self
    {   self.max_tokens = max_tokens;
        self.temperature = temperature;
        self
    }

    pub fn validate(&self) -> crate::Result<()>
    {   if self.max_tokens == 0
        {   return Err(crate::Error::InvalidConfiguration(
              "max_tokens must be positive".to_string()
            ));
        }
        if !self.temperature.is_finite() || self.temperature < 0.0
        {   return Err(crate::Error::InvalidConfiguration(
              format!(
                "temperature must be non-negative, got {}",
                self.temperature
              )
            ));
        }
        Ok(())
    }

    /// Sampling parameters for this request, stopping at end of turn
    pub fn sampling_params(&self) -> SamplingParams
    {   SamplingParams
        {   max_tokens: self.max_tokens
          , temperature: self.temperature
          , stop: vec![crate::prompt::END_OF_TURN.to_string()]
        }
    }
}

/// Sampling knobs sent alongside the prompt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SamplingParams
{   pub max_tokens: usize
  , pub temperature: f32
  , #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub stop: Vec<String>
}

/// A chunk of model input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ModelInputChunk
{   EncodedText
    {   tokens: Vec<u32>
    }
}

/// Prompt as the sampling service takes it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelInput
{   pub chunks: Vec<ModelInputChunk>
}

impl ModelInput
{   /// Wrap an already encoded prompt
    pub fn from_ints(tokens: Vec<u32>) -> Self
    {   ModelInput
        {   chunks: vec![ModelInputChunk::EncodedText { tokens }]
        }
    }

    pub fn length(&self) -> usize
    {   self.chunks.iter()
          .map(|c| match c
          {   ModelInputChunk::EncodedText { tokens } => tokens.len()
          })
          .sum()
    }
}

/// One generated sequence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampledSequence
{   pub tokens: Vec<u32>
  , #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop_reason: Option<String>
}

/// Resolved value of a sample future. `sequences` is required:
/// a reply without it is not a finished sample.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SampleResponse
{   pub sequences: Vec<SampledSequence>
}
