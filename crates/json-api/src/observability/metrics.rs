//! Prometheus metrics collection and exposition endpoint.
//!
//! HTTP request metrics and the pickup point business counters share one registry,
//! exposed at `GET /metrics`.

use std::sync::OnceLock;

use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounter, IntCounterVec, IntGauge, Opts, Registry,
    TextEncoder, core::Collector,
};
use pvz_app::metrics::OperationMetrics;
use salvo::{
    Request, Response, handler,
    http::{
        StatusCode,
        header::{CONTENT_TYPE, HeaderValue},
    },
};
use tracing::error;

#[derive(Debug)]
struct Metrics {
    registry: Registry,
    requests_total: IntCounterVec,
    request_duration_seconds: HistogramVec,
    requests_in_flight: IntGauge,
    pickup_points_registered_total: IntCounter,
    receptions_created_total: IntCounter,
    products_added_total: IntCounter,
}

static METRICS: OnceLock<Option<Metrics>> = OnceLock::new();

#[derive(Debug)]
pub(super) struct InFlightRequestGuard {
    tracked: bool,
}

impl InFlightRequestGuard {
    pub(super) fn track() -> Self {
        if let Some(metrics) = metrics() {
            metrics.requests_in_flight.inc();
            return Self { tracked: true };
        }

        Self { tracked: false }
    }
}

impl Drop for InFlightRequestGuard {
    fn drop(&mut self) {
        if self.tracked
            && let Some(metrics) = metrics()
        {
            metrics.requests_in_flight.dec();
        }
    }
}

pub(super) fn observe_request(method: &str, route: &str, status_code: u16, duration_seconds: f64) {
    let Some(metrics) = metrics() else {
        return;
    };

    let status_class = status_class(status_code);
    let status_code = status_code.to_string();

    metrics
        .requests_total
        .with_label_values(&[method, route, status_class, status_code.as_str()])
        .inc();

    metrics
        .request_duration_seconds
        .with_label_values(&[method, route])
        .observe(duration_seconds);
}

/// Business counters backed by the process-wide Prometheus registry.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct PrometheusOperationMetrics;

impl OperationMetrics for PrometheusOperationMetrics {
    fn pickup_point_registered(&self) {
        if let Some(metrics) = metrics() {
            metrics.pickup_points_registered_total.inc();
        }
    }

    fn reception_created(&self) {
        if let Some(metrics) = metrics() {
            metrics.receptions_created_total.inc();
        }
    }

    fn product_added(&self) {
        if let Some(metrics) = metrics() {
            metrics.products_added_total.inc();
        }
    }
}

#[handler]
pub(crate) async fn metrics_handler(_req: &mut Request, res: &mut Response) {
    let Some(metrics) = metrics() else {
        res.status_code(StatusCode::INTERNAL_SERVER_ERROR);
        return;
    };

    let encoder = TextEncoder::new();
    let metric_families = metrics.registry.gather();

    let mut encoded = Vec::new();

    if let Err(source) = encoder.encode(&metric_families, &mut encoded) {
        error!("failed to encode metrics response: {source}");
        res.status_code(StatusCode::INTERNAL_SERVER_ERROR);

        return;
    }

    let content_type = match HeaderValue::from_str(encoder.format_type()) {
        Ok(value) => value,
        Err(source) => {
            error!("failed to encode metrics content type header: {source}");
            res.status_code(StatusCode::INTERNAL_SERVER_ERROR);

            return;
        }
    };

    res.headers_mut().insert(CONTENT_TYPE, content_type);
    res.render(String::from_utf8_lossy(&encoded).into_owned());
}

fn metrics() -> Option<&'static Metrics> {
    METRICS.get_or_init(build_metrics).as_ref()
}

/// Create a metric and add it to the registry, logging whichever step fails.
fn register<M>(registry: &Registry, name: &str, metric: prometheus::Result<M>) -> Option<M>
where
    M: Collector + Clone + 'static,
{
    let metric = match metric {
        Ok(metric) => metric,
        Err(source) => {
            error!("failed to create {name} metric: {source}");
            return None;
        }
    };

    if let Err(source) = registry.register(Box::new(metric.clone())) {
        error!("failed to register {name} metric: {source}");
        return None;
    }

    Some(metric)
}

fn counter(registry: &Registry, name: &str, help: &str) -> Option<IntCounter> {
    register(registry, name, IntCounter::with_opts(Opts::new(name, help)))
}

fn build_metrics() -> Option<Metrics> {
    let registry = Registry::new();

    let requests_total = register(
        &registry,
        "pvz_json_http_requests_total",
        IntCounterVec::new(
            Opts::new(
                "pvz_json_http_requests_total",
                "Total HTTP requests partitioned by method, route, status class, and status code.",
            ),
            &["method", "route", "status_class", "status_code"],
        ),
    )?;

    let request_duration_seconds = register(
        &registry,
        "pvz_json_http_request_duration_seconds",
        HistogramVec::new(
            HistogramOpts::new(
                "pvz_json_http_request_duration_seconds",
                "HTTP request duration in seconds partitioned by method and route.",
            )
            .buckets(vec![
                0.001, 0.0025, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
            ]),
            &["method", "route"],
        ),
    )?;

    let requests_in_flight = register(
        &registry,
        "pvz_json_http_requests_in_flight",
        IntGauge::with_opts(Opts::new(
            "pvz_json_http_requests_in_flight",
            "Current number of in-flight HTTP requests.",
        )),
    )?;

    let pickup_points_registered_total = counter(
        &registry,
        "pvz_json_pickup_points_registered_total",
        "Pickup points registered.",
    )?;

    let receptions_created_total = counter(
        &registry,
        "pvz_json_receptions_created_total",
        "Receptions opened.",
    )?;

    let products_added_total = counter(
        &registry,
        "pvz_json_products_added_total",
        "Products added to receptions.",
    )?;

    Some(Metrics {
        registry,
        requests_total,
        request_duration_seconds,
        requests_in_flight,
        pickup_points_registered_total,
        receptions_created_total,
        products_added_total,
    })
}

fn status_class(status_code: u16) -> &'static str {
    match status_code {
        100..=199 => "1xx",
        200..=299 => "2xx",
        300..=399 => "3xx",
        400..=499 => "4xx",
        500..=599 => "5xx",
        _ => "other",
    }
}
