//! Log level selection and subscriber construction
//!
//! The subscriber is returned as a [`Dispatch`] rather than installed
//! globally; callers attach it to the invocation future.

use license_sweep_common::defaults::DEFAULT_LOG_LEVEL;
use std::str::FromStr;
use tracing::Dispatch;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::Directive;

/// Targets kept at warn unless the caller supplies its own filter
const QUIET_TARGETS: &[&str] = &["hyper", "hyper_util", "reqwest", "rustls"];
const QUIET_LEVEL: LevelFilter = LevelFilter::WARN;

/// Accepted `LOG_LEVEL` values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, strum::Display, strum::EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum LogLevel {
    Debug,
    #[default]
    Info,
    Warn,
    Error,
    /// Only errors are emitted; there is no level above error
    Critical,
}

impl LogLevel {
    /// Resolve a raw setting.
    ///
    /// Unset or blank settings use the default quietly. Unrecognized values
    /// also use the default and are handed back so they can be reported once
    /// logging is up.
    pub fn from_setting(raw: Option<&str>) -> (Self, Option<String>) {
        let raw = raw.map(str::trim).filter(|r| !r.is_empty());
        match raw {
            None => (Self::default_level(), None),
            Some(value) => match LogLevel::from_str(value) {
                Ok(level) => (level, None),
                Err(_) => (Self::default_level(), Some(value.to_string())),
            },
        }
    }

    fn default_level() -> Self {
        LogLevel::from_str(DEFAULT_LOG_LEVEL).unwrap_or_default()
    }

    pub fn as_level_filter(self) -> LevelFilter {
        match self {
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Error | LogLevel::Critical => LevelFilter::ERROR,
        }
    }
}

/// Filter at `level`, refined by `directives` (`RUST_LOG` syntax) when given
pub fn filter(level: LogLevel, directives: Option<&str>) -> EnvFilter {
    let default = level.as_level_filter();
    let builder = EnvFilter::builder().with_default_directive(default.into());
    match directives {
        Some(directives) => builder.parse_lossy(directives),
        // Quieting only ever narrows the chosen level
        None if QUIET_LEVEL >= default => builder.parse_lossy(""),
        None => QUIET_TARGETS
            .iter()
            .filter_map(|target| format!("{target}={QUIET_LEVEL}").parse::<Directive>().ok())
            .fold(builder.parse_lossy(""), EnvFilter::add_directive),
    }
}

/// Subscriber writing formatted events to stderr
pub fn dispatch(level: LogLevel, directives: Option<&str>) -> Dispatch {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter(level, directives))
        .with_writer(std::io::stderr)
        .with_target(false)
        .finish();
    Dispatch::new(subscriber)
}
