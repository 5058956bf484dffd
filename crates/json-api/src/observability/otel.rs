//! OpenTelemetry tracer provider setup.

use opentelemetry::KeyValue;
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::{
    Resource,
    trace::{RandomIdGenerator, Sampler, SdkTracerProvider},
};

use crate::config::ServerConfig;

use super::ObservabilityError;

/// Gateway key mode, so traces from sandbox keys never pass for live payments.
fn payment_mode(key_id: &str) -> &'static str {
    if key_id.starts_with("rzp_live_") {
        "live"
    } else if key_id.starts_with("rzp_test_") {
        "test"
    } else {
        "unknown"
    }
}

fn service_resource(config: &ServerConfig) -> Resource {
    let observability = &config.observability;

    Resource::builder_empty()
        .with_service_name(observability.otel_service_name.clone())
        .with_attributes([
            KeyValue::new("service.namespace", "tiffin"),
            KeyValue::new("service.version", observability.otel_service_version.clone()),
            KeyValue::new(
                "deployment.environment.name",
                observability.otel_deployment_environment.clone(),
            ),
            KeyValue::new(
                "tiffin.payment.mode",
                payment_mode(&config.payments.razorpay_key_id),
            ),
            KeyValue::new(
                "tiffin.payment.currency",
                config.payments.payment_currency.clone(),
            ),
        ])
        .build()
}

pub(super) fn build_tracer_provider(
    config: &ServerConfig,
) -> Result<SdkTracerProvider, ObservabilityError> {
    let observability = &config.observability;

    let exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .with_endpoint(observability.otel_exporter_otlp_endpoint.clone())
        .with_timeout(observability.export_timeout())
        .build()?;

    Ok(SdkTracerProvider::builder()
        .with_sampler(Sampler::ParentBased(Box::new(Sampler::TraceIdRatioBased(
            observability.sample_ratio(),
        ))))
        .with_id_generator(RandomIdGenerator::default())
        .with_resource(service_resource(config))
        .with_batch_exporter(exporter)
        .build())
}
