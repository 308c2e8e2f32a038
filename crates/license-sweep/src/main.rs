//! license-sweep: switch license-included OCI resources to BYOL
//!
//! Runs one sweep over every subscribed region and prints the result
//! envelope as JSON on stdout. Logs go to stderr.

use clap::Parser;
use license_sweep::config::{self, CredentialConfig, EngineConfig, HttpConfig, SweepConfig};
use license_sweep::invoke;
use license_sweep::logging;
use license_sweep_common::SweepResult;
use license_sweep_common::defaults::DEFAULT_MAX_CONCURRENCY;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use tracing::instrument::WithSubscriber;
use tracing::warn;

#[derive(Parser, Debug)]
#[command(name = "license-sweep")]
#[command(about = "Switch license-included resources to bring-your-own-license in every region")]
#[command(version)]
struct Args {
    /// Tenancy OCID
    #[arg(long, env = "OCI_TENANCY")]
    tenancy: Option<String>,

    /// User OCID owning the API signing key
    #[arg(long, env = "OCI_USER")]
    user: Option<String>,

    /// Fingerprint of the API signing key
    #[arg(long, env = "OCI_FINGERPRINT")]
    fingerprint: Option<String>,

    /// PEM private key used to sign requests
    #[arg(long, env = "OCI_KEY_FILE")]
    key_file: Option<PathBuf>,

    /// Home region, used to list region subscriptions
    #[arg(long, env = "OCI_REGION")]
    region: Option<String>,

    /// debug, info, warn, error or critical
    #[arg(long, env = "LOG_LEVEL")]
    log_level: Option<String>,

    /// Maximum region or resource tasks in flight (0 = unbounded)
    #[arg(long, env = "LICENSE_SWEEP_MAX_CONCURRENCY", default_value_t = DEFAULT_MAX_CONCURRENCY)]
    max_concurrency: usize,

    /// Per-request timeout in seconds (default: none)
    #[arg(long, env = "LICENSE_SWEEP_REQUEST_TIMEOUT_SECS")]
    request_timeout_secs: Option<u64>,

    /// Send every request to this base URL instead of the regional endpoints
    #[arg(long, env = "LICENSE_SWEEP_ENDPOINT")]
    endpoint: Option<String>,

    /// Report what would change without updating anything
    #[arg(long, env = "LICENSE_SWEEP_DRY_RUN")]
    dry_run: bool,
}

impl TryFrom<Args> for SweepConfig {
    type Error = config::ConfigError;

    fn try_from(args: Args) -> Result<Self, Self::Error> {
        let endpoint_override = args
            .endpoint
            .as_deref()
            .map(config::parse_endpoint)
            .transpose()?;

        let config = Self {
            credentials: CredentialConfig {
                tenancy: args.tenancy.unwrap_or_default(),
                user: args.user.unwrap_or_default(),
                fingerprint: args.fingerprint.unwrap_or_default(),
                key_file: args.key_file.unwrap_or_default(),
            },
            home_region: args.region.unwrap_or_default(),
            log_level: args.log_level,
            engine: EngineConfig {
                max_concurrency: args.max_concurrency,
                dry_run: args.dry_run,
            },
            http: HttpConfig {
                request_timeout: args.request_timeout_secs.map(Duration::from_secs),
                endpoint_override,
            },
        };
        config.validate()?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    let (level, rejected) =
        logging::LogLevel::from_setting(args.log_level.as_deref());
    let directives = std::env::var("RUST_LOG").ok();
    let dispatch = logging::dispatch(level, directives.as_deref());
    if let Some(raw) = rejected {
        tracing::dispatcher::with_default(&dispatch, || {
            warn!(value = %raw, fallback = %level, "Unrecognized log level, using default");
        });
    }

    let result = match SweepConfig::try_from(args) {
        Ok(config) => invoke(&config).with_subscriber(dispatch).await,
        Err(e) => {
            let message = format!("Error getting configuration: {e}");
            print_error(&anyhow::Error::new(e).context("Invalid configuration"));
            SweepResult::failed(message)
        }
    };

    match result.to_json() {
        Ok(json) => println!("{json}"),
        Err(e) => {
            print_error(&anyhow::Error::new(e).context("Failed to serialize result"));
            return ExitCode::FAILURE;
        }
    }

    if result.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

/// Print error in a user-friendly way
fn print_error(e: &anyhow::Error) {
    use std::io::Write;

    let mut stderr = std::io::stderr();
    let _ = writeln!(stderr, "\x1b[1;31mError:\x1b[0m {e}");

    let mut source = e.source();
    while let Some(cause) = source {
        let _ = writeln!(stderr, "  \x1b[33mCaused by:\x1b[0m {cause}");
        source = cause.source();
    }
}
