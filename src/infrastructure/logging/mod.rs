// src/infrastructure/logging/mod.rs
mod logfmt;

pub use logfmt::{CorrelationLayer, LogFields, LogValue, LogfmtFormatter, format_line};

use std::str::FromStr;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_FILTER: &str = "info,tower_http=info,sqlx=warn";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Logfmt,
    Pretty,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "logfmt" => Ok(Self::Logfmt),
            "pretty" | "text" => Ok(Self::Pretty),
            other => Err(format!("unknown log format: {other}")),
        }
    }
}

/// Install the global subscriber. `RUST_LOG` overrides the default filter.
pub fn init_tracing(format: LogFormat) {
    let env_filter = std::env::var("RUST_LOG")
        .ok()
        .unwrap_or_else(|| DEFAULT_FILTER.to_string());

    let registry = tracing_subscriber::registry().with(EnvFilter::new(env_filter));
    let result = match format {
        LogFormat::Logfmt => registry
            .with(CorrelationLayer)
            .with(tracing_subscriber::fmt::layer().event_format(LogfmtFormatter::default()))
            .try_init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).try_init(),
    };

    if result.is_err() {
        tracing::warn!("tracing subscriber already initialised");
    }
}
