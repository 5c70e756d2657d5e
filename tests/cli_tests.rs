use std::process::{Command, Output};

const BIN: &str = env!("CARGO_BIN_EXE_tinker-bridge");

/// Run the binary with a scrubbed bridge environment
fn bridge(args: &[&str], env: &[(&str, &str)]) -> Output
{   let mut cmd = Command::new(BIN);
    cmd.args(args)
      .env_remove("TINKER_API_KEY")
      .env_remove("TINKER_BASE_URL")
      .env_remove("TINKER_BRIDGE_CONFIG")
      .env_remove("RUST_LOG");
    for (k, v) in env
    {   cmd.env(k, v);
    }
    cmd.output().expect("failed to run tinker-bridge")
}

#[test]
fn test_no_arguments_prints_usage()
{   let out = bridge(&[], &[]);
    assert_eq!(out.status.code(), Some(1));
    assert!(out.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.starts_with("Usage: tinker-bridge <model_path> <user_input>"));
}

#[test]
fn test_one_argument_prints_usage()
{   let out = bridge(&["model-x"], &[("TINKER_API_KEY", "secret")]);
    assert_eq!(out.status.code(), Some(1));
    assert!(out.stdout.is_empty());
    assert!(String::from_utf8_lossy(&out.stderr).contains("Usage:"));
}

#[test]
fn test_missing_api_key()
{   let out = bridge(&["model-x", "Hello"], &[]);
    assert_eq!(out.status.code(), Some(1));
    assert!(out.stdout.is_empty());
    assert_eq!(
      String::from_utf8_lossy(&out.stderr).trim(),
      "Error: TINKER_API_KEY not found in environment."
    );
}

#[test]
fn test_missing_api_key_with_system_prompt()
{   let out = bridge(&["model-x", "-5 degrees?", "Be brief."], &[]);
    assert_eq!(out.status.code(), Some(1));
    assert!(out.stdout.is_empty());
    assert!(String::from_utf8_lossy(&out.stderr).contains("TINKER_API_KEY"));
}

#[test]
fn test_bad_config_file()
{   let out = bridge(
      &["model-x", "Hello"]
    , &[
        ("TINKER_API_KEY", "secret")
      , ("TINKER_BRIDGE_CONFIG", "/nonexistent/tinker-bridge.json")
      ]
    );
    assert_eq!(out.status.code(), Some(1));
    assert!(out.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.starts_with("Error: Invalid configuration:"));
}

#[test]
fn test_flag_like_single_argument_prints_usage()
{   for flag in ["--help", "-h", "--version", "--"]
    {   let out = bridge(&[flag], &[]);
        assert_eq!(out.status.code(), Some(1), "argument {}", flag);
        assert!(out.stdout.is_empty(), "argument {}", flag);
        assert!(
          String::from_utf8_lossy(&out.stderr).starts_with("Usage: tinker-bridge"),
          "argument {}", flag
        );
    }
}

#[test]
fn test_flag_like_values_are_positional()
{   let cases: [&[&str]; 5] = [
      &["model-x", "-h"]
    , &["model-x", "--help"]
    , &["model-x", "Hello", "--version"]
    , &["--", "Hello"]
    , &["model-x", "--", "--help"]
    ];
    for args in cases
    {   let out = bridge(args, &[]);
        // two or more positionals reach the credential check
        assert_eq!(out.status.code(), Some(1), "arguments {:?}", args);
        assert!(out.stdout.is_empty(), "arguments {:?}", args);
        assert_eq!(
          String::from_utf8_lossy(&out.stderr).trim(),
          "Error: TINKER_API_KEY not found in environment.",
          "arguments {:?}", args
        );
    }
}
