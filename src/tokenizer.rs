//! Text <-> token id conversion

use std::path::Path;
use hf_hub::api::sync::Api;
use log::{debug, error};
use tokenizers::Tokenizer;

/// Anything that can turn the prompt into token ids and back
pub trait TextCodec
{   fn encode(&self, text: &str) -> crate::Result<Vec<u32>>;
    fn decode(&self, tokens: &[u32]) -> crate::Result<String>;
}

impl<T: TextCodec + ?Sized> TextCodec for &T
{   fn encode(&self, text: &str) -> crate::Result<Vec<u32>>
    {   (**self).encode(text)
    }

    fn decode(&self, tokens: &[u32]) -> crate::Result<String>
    {   (**self).decode(tokens)
    }
}

/// Tokenizer loaded from a `tokenizer.json`
pub struct HubTokenizer
{   id: String
  , inner: Tokenizer
}

impl HubTokenizer
{   /// Fetch `tokenizer.json` for a hub model id (cached locally
    /// by hf-hub) and load it. Blocks on network IO.
    pub fn from_pretrained(id: &str) -> crate::Result<Self>
    {   debug!("Resolving tokenizer {}", id);
        let api = Api::new().map_err(|e| {
          error!("Failed to create HF API: {}", e);
          crate::Error::Tokenizer(
            format!("failed to create HF API: {}", e)
          )
        })?;

        let path = api.model(id.to_string())
          .get("tokenizer.json")
          .map_err(|e| {
            error!("Failed to fetch tokenizer for {}: {}", id, e);
            crate::Error::Tokenizer(
              format!("failed to download tokenizer.json for {}: {}", id, e)
            )
          })?;

        Self::from_file(id, &path)
    }

    /// Load a tokenizer from a local `tokenizer.json`
    pub fn from_file(id: &str, path: &Path) -> crate::Result<Self>
    {   debug!("Loading tokenizer from {}", path.display());
        let inner = Tokenizer::from_file(path).map_err(|e| {
          error!("Failed to load tokenizer: {}", e);
          crate::Error::Tokenizer(
            format!("failed to load {}: {}", path.display(), e)
          )
        })?;
        Ok(HubTokenizer
        {   id: id.to_string()
          , inner
        })
    }

    pub fn id(&self) -> &str
    {   &self.id
    }
}

impl TextCodec for HubTokenizer
{   fn encode(&self, text: &str) -> crate::Result<Vec<u32>>
    {   let encoding = self.inner
          .encode(text, true)
          .map_err(|e| crate::Error::Tokenizer(e.to_string()))?;
        Ok(encoding.get_ids().to_vec())
    }

    /// Special tokens are kept so a leaked end-of-turn marker
    /// shows up in the text
    fn decode(&self, tokens: &[u32]) -> crate::Result<String>
    {   self.inner
          .decode(tokens, false)
          .map_err(|e| crate::Error::Tokenizer(e.to_string()))
    }
}
