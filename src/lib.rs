pub mod error;
pub mod config;
pub mod request;
pub mod prompt;
pub mod tokenizer;
pub mod providers;
pub mod bridge;

/*

tinker-bridge: called as a subprocess by the insights API.
Formats one ChatML prompt, samples a fine-tuned checkpoint on
the Tinker service, and prints the decoded completion.

tinker-bridge/
├── Cargo.toml
├── src/
│   ├── lib.rs          # Re-exports
│   ├── main.rs         # CLI, logging, exit status
│   ├── error.rs        # Error type
│   ├── config.rs       # Credential, endpoint, defaults
│   ├── request.rs      # Request and wire types
│   ├── prompt.rs       # Role markers and formatting
│   ├── tokenizer.rs    # Hub tokenizer
│   ├── bridge.rs       # Sampler seam and the round trip
│   └── providers/
│       ├── mod.rs
│       └── tinker.rs   # Sampling service client
└── tests/

*/

pub use error::{Error, Result};
pub use config::BridgeConfig;
pub use request::{
  ModelInput, Request, SampleResponse, SampledSequence, SamplingParams
};
pub use bridge::{sample_model, Bridge, Sampler};
pub use tokenizer::{HubTokenizer, TextCodec};
