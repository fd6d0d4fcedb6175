//! # Siteverify CLI
//!
//! Verifies a single reCAPTCHA token from the command line and prints
//! the decoded endpoint response as JSON.
//!
//! ## Usage
//! ```bash
//! # v2 pass/fail check
//! siteverify --secret $RECAPTCHA_SECRET "token-from-widget"
//!
//! # v3 with a score policy
//! siteverify --v3 --min-score 0.7 --action login "token-from-widget"
//! ```
//!
//! Exit codes: 0 accepted, 2 rejected by the endpoint or the policy,
//! 1 operational error (transport, decode, bad configuration).

use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use siteverify::{FormRequest, ScorePolicy, Verifier, VerifyError};

mod config;

use config::CliConfig;

/// Siteverify - reCAPTCHA token checker
#[derive(Parser, Debug)]
#[command(name = "siteverify")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Challenge token to verify
    token: String,

    /// Configuration file path
    #[arg(short, long, default_value = "config/siteverify.toml")]
    config: String,

    /// Shared secret (overrides config)
    #[arg(short, long, env = "RECAPTCHA_SECRET")]
    secret: Option<String>,

    /// Client address in host:port form, forwarded as remoteip
    #[arg(long, default_value = "127.0.0.1:0")]
    client_addr: String,

    /// Verify as v3 and apply the score policy
    #[arg(long)]
    v3: bool,

    /// Minimum accepted score (v3, overrides config)
    #[arg(long)]
    min_score: Option<f64>,

    /// Required action label (v3, overrides config)
    #[arg(long)]
    action: Option<String>,

    /// Request timeout in seconds (overrides config)
    #[arg(long)]
    timeout: Option<u64>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn", env = "LOG_LEVEL")]
    log_level: String,

    /// Enable JSON logging output
    #[arg(long, default_value = "false")]
    json_logs: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let args = Args::parse();
    init_logging(&args.log_level, args.json_logs)?;

    let config = CliConfig::load(&args.config, &args)?;
    if config.secret.is_empty() {
        bail!("no secret configured (use --secret, RECAPTCHA_SECRET, or the config file)");
    }

    let verifier = Verifier::with_timeout(Duration::from_secs(config.timeout_secs));
    let request = FormRequest::new(&args.client_addr).with_token(&args.token);

    let result = if args.v3 {
        let mut policy = ScorePolicy::new().min_score(config.policy.min_score);
        if !config.policy.action.is_empty() {
            policy = policy.action(&config.policy.action);
        }

        verifier
            .verify_v3(&config.secret, &request, policy)
            .await
            .map(|resp| serde_json::to_value(&resp).unwrap_or_default())
    } else {
        verifier
            .verify_v2(&config.secret, &request)
            .await
            .map(|resp| serde_json::to_value(&resp).unwrap_or_default())
    };

    match result {
        Ok(value) => {
            info!("challenge accepted");
            println!("{}", serde_json::to_string_pretty(&value)?);
            Ok(())
        }
        Err(err) if err.is_rejection() => {
            if let VerifyError::NoSuccess(ref resp) = err {
                eprintln!("{}", serde_json::to_string_pretty(resp)?);
            }
            eprintln!("rejected: {err}");
            std::process::exit(2);
        }
        Err(err) => Err(err).context("verification failed"),
    }
}

/// Initialize structured logging with tracing
fn init_logging(level: &str, json: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(false))
            .init();
    }

    Ok(())
}
