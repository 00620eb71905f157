use axum::{body::Body, http::Request, response::Response};
use opentelemetry::{
    global,
    trace::{SpanKind, TraceContextExt, Tracer},
    Context, KeyValue,
};
use opentelemetry_otlp::{WithExportConfig, WithTonicConfig};
use std::{
    future::Future,
    pin::Pin,
    sync::OnceLock,
    task::{Context as TaskContext, Poll},
};
use tower::{Layer, Service};

use crate::auth::jwt::Claims;

const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
const SERVICE_NAME: &str = "leave-portal";

/// Keep the LoggerProvider alive for the process lifetime.
static LOGGER_PROVIDER: OnceLock<opentelemetry_sdk::logs::SdkLoggerProvider> = OnceLock::new();

/// Runtime for the OTLP gRPC exporters. Tonic spawns its connection task
/// on first use, and the `dioxus::serve` init closure may run outside a
/// Tokio context.
static OTEL_RUNTIME: OnceLock<tokio::runtime::Runtime> = OnceLock::new();

/// Collector settings read from the environment.
struct OtlpTarget {
    endpoint: String,
    /// Optional `OTEL_EXPORTER_OTLP_HEADERS`-style `key=value,key=value` pairs.
    headers: Vec<(String, String)>,
}

impl OtlpTarget {
    fn from_env() -> Option<Self> {
        let endpoint = std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT")
            .ok()
            .filter(|e| !e.is_empty())?;
        let headers = std::env::var("OTEL_EXPORTER_OTLP_HEADERS")
            .map(|raw| parse_header_pairs(&raw))
            .unwrap_or_default();
        Some(Self { endpoint, headers })
    }

    /// Point an exporter builder at the collector, with TLS for https
    /// endpoints and any configured metadata headers.
    fn apply<B: WithExportConfig + WithTonicConfig>(&self, builder: B) -> B {
        let mut builder = builder.with_endpoint(&self.endpoint);
        if self.endpoint.starts_with("https://") {
            builder = builder.with_tls_config(
                opentelemetry_otlp::tonic_types::transport::ClientTlsConfig::new()
                    .with_native_roots(),
            );
        }
        if !self.headers.is_empty() {
            let mut metadata = opentelemetry_otlp::tonic_types::metadata::MetadataMap::new();
            for (key, value) in &self.headers {
                let key = tonic::metadata::MetadataKey::from_bytes(
                    key.as_bytes(),
                );
                match (key, value.parse()) {
                    (Ok(key), Ok(value)) => {
                        metadata.insert(key, value);
                    }
                    _ => tracing::warn!("skipping malformed OTLP header"),
                }
            }
            builder = builder.with_metadata(metadata);
        }
        builder
    }
}

fn parse_header_pairs(raw: &str) -> Vec<(String, String)> {
    raw.split(',')
        .filter_map(|pair| {
            let (k, v) = pair.split_once('=')?;
            let (k, v) = (k.trim(), v.trim());
            (!k.is_empty() && !v.is_empty()).then(|| (k.to_lowercase(), v.to_string()))
        })
        .collect()
}

/// Set up OTLP trace and log export and register the providers globally.
///
/// Dioxus owns the `tracing` subscriber; this only configures the exporters
/// so request spans from `OtelTraceLayer` and `log` records reach the collector.
///
/// Environment:
///   - `OTEL_EXPORTER_OTLP_ENDPOINT`: collector gRPC address (export is off when unset)
///   - `OTEL_EXPORTER_OTLP_HEADERS`: extra gRPC metadata, `key=value,...`
///   - `OTEL_SERVICE_NAME`: service name tag (default `leave-portal`)
///   - `DEPLOY_ENV`: deployment environment tag (default `development`)
pub fn init_telemetry() {
    let _ = dotenvy::dotenv();

    let Some(target) = OtlpTarget::from_env() else {
        tracing::info!("OTEL_EXPORTER_OTLP_ENDPOINT not set, telemetry export disabled");
        return;
    };

    let service_name =
        std::env::var("OTEL_SERVICE_NAME").unwrap_or_else(|_| SERVICE_NAME.to_string());
    let environment = std::env::var("DEPLOY_ENV").unwrap_or_else(|_| "development".to_string());

    let rt = OTEL_RUNTIME.get_or_init(|| {
        tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .worker_threads(1)
            .build()
            .expect("failed to start the telemetry runtime")
    });
    let _guard = rt.enter();

    let resource = opentelemetry_sdk::Resource::builder()
        .with_service_name(service_name)
        .with_attribute(KeyValue::new("service.version", APP_VERSION))
        .with_attribute(KeyValue::new("deployment.environment", environment))
        .build();

    match target
        .apply(opentelemetry_otlp::SpanExporter::builder().with_tonic())
        .build()
    {
        Ok(exporter) => {
            let provider = opentelemetry_sdk::trace::SdkTracerProvider::builder()
                .with_batch_exporter(exporter)
                .with_resource(resource.clone())
                .build();
            global::set_tracer_provider(provider);
        }
        Err(e) => {
            tracing::error!(error = %e, "failed to create OTLP span exporter");
            return;
        }
    }

    let log_exporter = match target
        .apply(opentelemetry_otlp::LogExporter::builder().with_tonic())
        .build()
    {
        Ok(exporter) => exporter,
        Err(e) => {
            tracing::error!(error = %e, "failed to create OTLP log exporter");
            return;
        }
    };

    let logger_provider = LOGGER_PROVIDER.get_or_init(|| {
        opentelemetry_sdk::logs::SdkLoggerProvider::builder()
            .with_batch_exporter(log_exporter)
            .with_resource(resource)
            .build()
    });

    // `log` records go to OpenTelemetry; `tracing` stays with Dioxus.
    let bridge = opentelemetry_appender_log::OpenTelemetryLogBridge::new(logger_provider);
    match log::set_boxed_logger(Box::new(bridge)) {
        Ok(()) => log::set_max_level(log::LevelFilter::Info),
        Err(_) => tracing::warn!("log bridge skipped, a logger is already installed"),
    }

    tracing::info!(endpoint = %target.endpoint, version = APP_VERSION, "telemetry export enabled");
}

/// Client platform from the explicit `X-Client-Platform` header, else a
/// User-Agent guess. Browsers are the only real client of the portal.
fn client_platform(user_agent: Option<&str>, explicit: Option<&str>) -> &'static str {
    match explicit {
        Some("web") => return "web",
        Some("desktop") => return "desktop",
        Some("mobile") => return "mobile",
        Some(_) => return "unknown",
        None => {}
    }
    match user_agent {
        Some(ua) if ua.contains("Mozilla") || ua.contains("Chrome") || ua.contains("Safari") => {
            "web"
        }
        Some(ua) if !ua.is_empty() => "script",
        _ => "unknown",
    }
}

/// Collapse id-bearing segments so spans group by route, not by record.
fn route_name(path: &str) -> String {
    path.split('/')
        .map(|seg| {
            if seg.parse::<uuid::Uuid>().is_ok() || (!seg.is_empty() && seg.chars().all(|c| c.is_ascii_digit())) {
                "{id}"
            } else {
                seg
            }
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Tower layer that creates an OpenTelemetry span for each HTTP request.
///
/// Captures method, path, client platform, request ID, response status,
/// and the authenticated user id when the auth middleware ran first.
#[derive(Clone)]
pub struct OtelTraceLayer;

impl<S> Layer<S> for OtelTraceLayer {
    type Service = OtelTraceService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        OtelTraceService { inner }
    }
}

#[derive(Clone)]
pub struct OtelTraceService<S> {
    inner: S,
}

impl<S> Service<Request<Body>> for OtelTraceService<S>
where
    S: Service<Request<Body>, Response = Response> + Send + Clone + 'static,
    S::Future: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut TaskContext<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let tracer = global::tracer(SERVICE_NAME);
        let method = req.method().to_string();
        let path = req.uri().path().to_string();
        let header = |name: &str| req.headers().get(name).and_then(|v| v.to_str().ok());

        let platform = client_platform(header("user-agent"), header("x-client-platform"));
        let request_id = header("x-request-id").unwrap_or("").to_string();

        let mut attributes = vec![
            KeyValue::new("http.method", method.clone()),
            KeyValue::new("http.target", path.clone()),
            KeyValue::new("client.platform", platform),
            KeyValue::new("http.request_id", request_id),
        ];
        match req.extensions().get::<Claims>() {
            Some(claims) => {
                attributes.push(KeyValue::new("user.id", claims.sub.to_string()));
                attributes.push(KeyValue::new("auth.status", "authenticated"));
            }
            None => attributes.push(KeyValue::new("auth.status", "anonymous")),
        }

        let span = tracer
            .span_builder(format!("{} {}", method, route_name(&path)))
            .with_kind(SpanKind::Server)
            .with_attributes(attributes)
            .start(&tracer);

        let cx = Context::current_with_span(span);
        let mut inner = self.inner.clone();

        let guard = cx.clone().attach();
        let future = inner.call(req);
        drop(guard);

        Box::pin(async move {
            let response = future.await?;

            let span = cx.span();
            let status = response.status();
            span.set_attribute(KeyValue::new("http.status_code", status.as_u16() as i64));
            if status.is_server_error() {
                span.set_status(opentelemetry::trace::Status::error(status.to_string()));
            }

            Ok(response)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_platform_wins() {
        assert_eq!(client_platform(Some("Mozilla/5.0"), Some("desktop")), "desktop");
        assert_eq!(client_platform(None, Some("watch")), "unknown");
    }

    #[test]
    fn browsers_are_web() {
        assert_eq!(
            client_platform(Some("Mozilla/5.0 (X11; Linux x86_64) Chrome/120.0"), None),
            "web"
        );
    }

    #[test]
    fn other_agents_are_scripts() {
        assert_eq!(client_platform(Some("curl/8.4.0"), None), "script");
        assert_eq!(client_platform(Some(""), None), "unknown");
        assert_eq!(client_platform(None, None), "unknown");
    }

    #[test]
    fn route_name_hides_ids() {
        assert_eq!(route_name("/api/dashboard/staff"), "/api/dashboard/staff");
        assert_eq!(
            route_name("/api/students/5b8f0c3e-8a6f-4a8e-9d0c-2f1f7c0b9a11/attendance"),
            "/api/students/{id}/attendance"
        );
        assert_eq!(route_name("/api/leave/42"), "/api/leave/{id}");
    }

    #[test]
    fn header_pairs_parse_and_skip_junk() {
        assert_eq!(
            parse_header_pairs("X-Api-Key=abc, broken ,team = ops"),
            vec![
                ("x-api-key".to_string(), "abc".to_string()),
                ("team".to_string(), "ops".to_string()),
            ]
        );
    }
}
