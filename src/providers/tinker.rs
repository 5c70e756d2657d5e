use std::time::Duration;
use serde::{Deserialize, Serialize};
use log::{debug, trace, error, info};
use crate::request::{ModelInput, SampleResponse, SamplingParams};

// ===== Wire Types =====

#[derive(Debug, Clone, Serialize)]
pub struct SampleRequest<'a>
{   pub model_path: &'a str
  , pub prompt: &'a ModelInput
  , pub sampling_params: &'a SamplingParams
  , pub num_samples: usize
}

#[derive(Debug, Clone, Deserialize)]
pub struct UntypedFuture
{   pub request_id: String
}

#[derive(Debug, Clone, Serialize)]
pub struct FutureRetrieveRequest<'a>
{   pub request_id: &'a str
}

/// Where a sample future stands after one poll
#[derive(Debug, Clone, PartialEq)]
pub enum FutureState
{   Pending
  , Done(SampleResponse)
}

impl FutureState
{   /// Classify a `retrieve_future` reply body.
    /// `{"error": ..}` is a failed future, `{"type": "try_again"}`
    /// is still running, anything else must be a sample response
    /// carrying `sequences`, or it is a parse error.
    pub fn from_reply(body: serde_json::Value)
      -> crate::Result<Self>
    {   if let Some(err) = body.get("error")
        {   let msg = match err.as_str()
            {   Some(s) => s.to_string()
              , None => err.to_string()
            };
            error!("Sample future failed: {}", msg);
            return Err(crate::Error::SamplingFailed(msg));
        }

        if body.get("type").and_then(|t| t.as_str()) == Some("try_again")
        {   return Ok(FutureState::Pending);
        }

        let response: SampleResponse
          = serde_json::from_value(body).map_err(|e| {
            error!("Parse error: {}", e);
            crate::Error::ParseError(e.to_string())
          })?;
        Ok(FutureState::Done(response))
    }
}

// ===== Connection =====

/// Base URL plus credential, shared by every handle derived
/// from one service client
#[derive(Clone)]
struct Endpoint
{   http_client: reqwest::Client
  , base_url: String
  , api_key: String
}

impl Endpoint
{   fn url(&self, path: &str) -> String
    {   format!("{}/api/v1/{}", self.base_url.trim_end_matches('/'), path)
    }

    async fn post<T: Serialize + ?Sized>(
      &self
    , path: &str
    , body: &T
    ) -> crate::Result<reqwest::Response>
    {   let url = self.url(path);
        trace!("POST {}", url);
        self.http_client
          .post(url)
          .header("Authorization", format!("Bearer {}", self.api_key))
          .header("Content-Type", "application/json")
          .json(body)
          .send()
          .await
          .map_err(|e| {
            error!("HTTP error: {}", e);
            crate::Error::HttpError(e.to_string())
          })
    }
}

/// Turn a non-success status into an API error carrying the body
async fn check_status(response: reqwest::Response)
  -> crate::Result<reqwest::Response>
{   let status = response.status();
    trace!("Tinker response status: {}", status);

    if !status.is_success()
    {   let error_text = response.text().await
          .unwrap_or_else(|_|
            "Unknown error".to_string()
          );
        error!("Tinker API error: {}", error_text);
        return Err(crate::Error::ApiError(
          format!("{}: {}", status, error_text)
        ));
    }
    Ok(response)
}

// ===== Clients =====

/// Entry point to the sampling service
pub struct ServiceClient
{   endpoint: Endpoint
  , poll_interval: Duration
}

impl ServiceClient
{   pub fn new(
      api_key: impl Into<String>
    , config: &crate::BridgeConfig
    ) -> Self
    {   debug!("Creating ServiceClient for {}", config.base_url);
        ServiceClient
        {   endpoint: Endpoint
            {   http_client: reqwest::Client::new()
              , base_url: config.base_url.clone()
              , api_key: api_key.into()
            }
          , poll_interval: Duration::from_millis(
              config.poll_interval_ms
            )
        }
    }

    /// Handle for sampling from one checkpoint
    pub fn create_sampling_client(
      &self
    , model_path: impl Into<String>
    ) -> SamplingClient
    {   let model_path = model_path.into();
        debug!("Creating SamplingClient for {}", model_path);
        SamplingClient
        {   endpoint: self.endpoint.clone()
          , model_path
          , poll_interval: self.poll_interval
        }
    }
}

/// Samples from a single checkpoint
pub struct SamplingClient
{   endpoint: Endpoint
  , model_path: String
  , poll_interval: Duration
}

impl SamplingClient
{   /// Submit a sample request; the returned future resolves
    /// once the service has finished generating
    pub async fn sample(
      &self
    , prompt: &ModelInput
    , sampling_params: &SamplingParams
    , num_samples: usize
    ) -> crate::Result<SampleFuture>
    {   debug!(
          "Submitting {} prompt tokens to {}",
          prompt.length(), self.model_path
        );
        let request = SampleRequest
        {   model_path: &self.model_path
          , prompt
          , sampling_params
          , num_samples
        };
        trace!("Tinker request: {:?}", request);

        let response = self.endpoint.post("asample", &request).await?;
        let response = check_status(response).await?;

        let future: UntypedFuture
          = response.json().await.map_err(|e| {
            error!("Parse error: {}", e);
            crate::Error::ParseError(e.to_string())
          })?;

        debug!("Sample submitted as {}", future.request_id);
        Ok(SampleFuture
        {   endpoint: self.endpoint.clone()
          , request_id: future.request_id
          , poll_interval: self.poll_interval
        })
    }
}

impl crate::bridge::Sampler for SamplingClient
{   async fn sample(
      &self
    , prompt: ModelInput
    , sampling_params: SamplingParams
    , num_samples: usize
    ) -> crate::Result<SampleResponse>
    {   SamplingClient::sample(self, &prompt, &sampling_params, num_samples)
          .await?
          .result()
          .await
    }
}

/// Server-side handle of a submitted sample request
pub struct SampleFuture
{   endpoint: Endpoint
  , request_id: String
  , poll_interval: Duration
}

impl SampleFuture
{   /// Poll until the future resolves. There is no deadline.
    pub async fn result(self) -> crate::Result<SampleResponse>
    {   let body = FutureRetrieveRequest
        {   request_id: &self.request_id
        };

        loop
        {   let response = self.endpoint
              .post("retrieve_future", &body)
              .await?;

            if response.status() == reqwest::StatusCode::REQUEST_TIMEOUT
            {   trace!("{} still running", self.request_id);
                tokio::time::sleep(self.poll_interval).await;
                continue;
            }

            let response = check_status(response).await?;
            let reply: serde_json::Value
              = response.json().await.map_err(|e| {
                error!("Parse error: {}", e);
                crate::Error::ParseError(e.to_string())
              })?;

            match FutureState::from_reply(reply)?
            {   FutureState::Pending => {
                  trace!("{} still running", self.request_id);
                  tokio::time::sleep(self.poll_interval).await;
                }
              , FutureState::Done(result) => {
                  info!(
                    "{} resolved with {} sequence(s)",
                    self.request_id, result.sequences.len()
                  );
                  return Ok(result);
                }
            }
        }
    }
}
