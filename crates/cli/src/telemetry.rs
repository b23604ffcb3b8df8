//! Observability wiring: `tracing-subscriber` plus optional OTLP span export.

use anyhow::Context;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::runtime;
use opentelemetry_sdk::trace::TracerProvider;
use tracing::warn;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use crate::settings::LogFormat;

const SERVICE_NAME: &str = "codacy-security-export";
const DEFAULT_DIRECTIVES: &str = "info";

/// Flushes pending spans when dropped. Keep it alive for the whole run.
pub struct TelemetryGuard {
    provider: Option<TracerProvider>,
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        if let Some(provider) = self.provider.take() {
            if let Err(err) = provider.shutdown() {
                eprintln!("Failed to flush OpenTelemetry spans: {err}");
            }
        }
    }
}

/// Installs the global subscriber.
///
/// `RUST_LOG` controls filtering (default `info`). An invalid value falls
/// back to the default and is reported once the subscriber is installed.
/// With an OTLP endpoint, spans are also exported over gRPC.
pub fn init(format: LogFormat, otlp_endpoint: Option<&str>) -> anyhow::Result<TelemetryGuard> {
    let directives = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let (filter, rejected) = match parse_filter(directives.as_deref()) {
        Ok(filter) => (filter, None),
        Err(err) => (EnvFilter::new(DEFAULT_DIRECTIVES), Some(err)),
    };

    let (json_layer, text_layer) = match format {
        LogFormat::Json => (Some(fmt::layer().json()), None),
        LogFormat::Text => (None, Some(fmt::layer().with_target(false))),
    };

    let provider = otlp_endpoint.map(otlp_provider).transpose()?;
    let otel_layer = provider
        .as_ref()
        .map(|p| tracing_opentelemetry::layer().with_tracer(p.tracer(SERVICE_NAME)));

    tracing_subscriber::registry()
        .with(filter)
        .with(json_layer)
        .with(text_layer)
        .with(otel_layer)
        .try_init()
        .context("failed to install tracing subscriber")?;

    if let Some(err) = rejected {
        warn!(
            variable = EnvFilter::DEFAULT_ENV,
            value = directives.as_deref().unwrap_or_default(),
            error = %err,
            "Ignoring invalid log filter, using '{DEFAULT_DIRECTIVES}'"
        );
    }

    Ok(TelemetryGuard { provider })
}

/// Parses `RUST_LOG`-style directives. Unset or blank means the default.
fn parse_filter(directives: Option<&str>) -> Result<EnvFilter, ParseError> {
    match directives.map(str::trim) {
        Some(directives) if !directives.is_empty() => EnvFilter::builder().parse(directives),
        _ => Ok(EnvFilter::new(DEFAULT_DIRECTIVES)),
    }
}

fn otlp_provider(endpoint: &str) -> anyhow::Result<TracerProvider> {
    let exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .with_endpoint(endpoint)
        .build()
        .with_context(|| format!("failed to build OTLP exporter for {endpoint}"))?;

    let provider = TracerProvider::builder()
        .with_batch_exporter(exporter, runtime::TokioCurrentThread)
        .build();
    opentelemetry::global::set_tracer_provider(provider.clone());
    Ok(provider)
}
