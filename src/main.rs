use std::ffi::OsString;
use std::process::ExitCode;
use clap::Parser;
use log::{debug, warn};
use tinker_bridge::{sample_model, BridgeConfig, Request};

const USAGE: &str
  = "Usage: tinker-bridge <model_path> <user_input> [system_prompt]";

/// Sample one completion from a Tinker checkpoint and print it
#[derive(Parser, Debug)]
#[command(
  name = "tinker-bridge"
, disable_help_flag = true
, disable_version_flag = true
)]
struct Args
{   /// Sampler checkpoint path on the service
    model_path: String

  , /// User message
    user_input: String

  , /// Optional system message
    system_prompt: Option<String>

  , #[arg(hide = true)]
    extra: Vec<String>
}

impl Args
{   /// Parse arguments strictly by position. An escape `--` is put
    /// in front of them so clap never reads a value like `-h`,
    /// `--version` or `--` as a flag.
    fn try_parse_positional<I>(argv: I) -> Result<Self, clap::Error>
    where
      I: IntoIterator<Item = OsString>
    {   let mut argv = argv.into_iter();
        let mut escaped: Vec<OsString> = argv.next().into_iter().collect();
        escaped.push(OsString::from("--"));
        escaped.extend(argv);
        Args::try_parse_from(escaped)
    }
}

async fn run(args: Args) -> tinker_bridge::Result<String>
{   let config = BridgeConfig::from_env()?;

    if !args.extra.is_empty()
    {   warn!("Ignoring {} extra argument(s)", args.extra.len());
    }

    let request = Request::new(
        args.model_path
      , args.user_input
      , args.system_prompt
      )
      .with_sampling(config.max_tokens, config.temperature);
    debug!("Request: {:?}", request);

    sample_model(&config, &request).await
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode
{   env_logger::Builder::from_env(
      env_logger::Env::default().default_filter_or("off")
    ).init();

    let args = match Args::try_parse_positional(std::env::args_os())
    {   Ok(args) => args
      , Err(e) => {
          debug!("Argument error: {}", e);
          eprintln!("{}", USAGE);
          return ExitCode::from(1);
        }
    };

    match run(args).await
    {   Ok(output) => {
          println!("{}", output);
          ExitCode::SUCCESS
        }
      , Err(e) => {
          eprintln!("Error: {}", e);
          ExitCode::from(1)
        }
    }
}
