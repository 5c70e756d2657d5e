//! Prompt in, text out: one sampling round trip

use log::{debug, error};
use crate::prompt::{format_prompt, strip_end_of_turn};
use crate::request::{ModelInput, Request, SampleResponse, SamplingParams};
use crate::tokenizer::{HubTokenizer, TextCodec};

/// Only one completion is ever requested
pub const NUM_SAMPLES: usize = 1;

/// Remote side of the bridge: token ids in, sequences out.
/// Implementations wait for the service to finish; there is
/// no timeout and no retry.
#[allow(async_fn_in_trait)]
pub trait Sampler
{   async fn sample(
      &self
    , prompt: ModelInput
    , sampling_params: SamplingParams
    , num_samples: usize
    ) -> crate::Result<SampleResponse>;
}

impl<T: Sampler + ?Sized> Sampler for &T
{   async fn sample(
      &self
    , prompt: ModelInput
    , sampling_params: SamplingParams
    , num_samples: usize
    ) -> crate::Result<SampleResponse>
    {   (**self).sample(prompt, sampling_params, num_samples).await
    }
}

/// Formats, encodes, samples and decodes a single request
pub struct Bridge<S, C>
{   sampler: S
  , codec: C
}

impl<S, C> Bridge<S, C>
where
  S: Sampler
, C: TextCodec
{   pub fn new(sampler: S, codec: C) -> Self
    {   Bridge
        {   sampler
          , codec
        }
    }

    /// Callers validate the request first, see `sample_model`
    pub async fn run(&self, request: &Request)
      -> crate::Result<String>
    {   let prompt = format_prompt(
          &request.user_input
        , request.system_prompt.as_deref()
        );
        let tokens = self.codec.encode(&prompt)?;
        debug!("Encoded prompt into {} tokens", tokens.len());

        let response = self.sampler
          .sample(
            ModelInput::from_ints(tokens)
          , request.sampling_params()
          , NUM_SAMPLES
          )
          .await?;

        self.decode_first(&response)
    }

    /// Text of the first sequence, or empty if there is none
    fn decode_first(&self, response: &SampleResponse)
      -> crate::Result<String>
    {   match response.sequences.first()
        {   Some(sequence) => {
              let raw = self.codec.decode(&sequence.tokens)?;
              Ok(strip_end_of_turn(&raw))
            }
          , None => {
              debug!("No sequences returned");
              Ok(String::new())
            }
        }
    }
}

/// Run one request against the real service and tokenizer.
/// The request is validated before any client is built.
pub async fn sample_model(
  config: &crate::BridgeConfig
, request: &Request
) -> crate::Result<String>
{   request.validate()?;

    let service_client = crate::providers::ServiceClient::new(
      config.api_key.clone()
    , config
    );
    let sampling_client = service_client
      .create_sampling_client(request.model_path.clone());

    let tokenizer_id = config.tokenizer_id.clone();
    let tokenizer = tokio::task::spawn_blocking(move || {
        HubTokenizer::from_pretrained(&tokenizer_id)
      })
      .await
      .map_err(|e| {
        error!("Tokenizer task failed: {}", e);
        crate::Error::Tokenizer(e.to_string())
      })??;
    debug!("Tokenizer {} ready", tokenizer.id());

    Bridge::new(sampling_client, tokenizer)
      .run(request)
      .await
}
