use std::net::SocketAddr;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

// ── Booking metrics ─────────────────────────────────────────────

/// Counter: appointments created.
pub const BOOKINGS_TOTAL: &str = "apppoint_bookings_total";

/// Counter: booking attempts refused. Labels: reason (unconfigured, full).
pub const BOOKING_REJECTIONS_TOTAL: &str = "apppoint_booking_rejections_total";

/// Counter: auto-shift advances to the next day.
pub const AUTO_SHIFTS_TOTAL: &str = "apppoint_auto_shifts_total";

/// Counter: appointments removed by either cancel path.
pub const CANCELLATIONS_TOTAL: &str = "apppoint_cancellations_total";

/// Gauge: appointments currently held by the store.
pub const APPOINTMENTS_ACTIVE: &str = "apppoint_appointments_active";

/// Counter: date-spec tokens that failed to parse.
pub const CAPACITY_TOKENS_REJECTED_TOTAL: &str = "apppoint_capacity_tokens_rejected_total";

/// Install the tracing subscriber. Logs go to stderr so they never mix with
/// the interactive session on stdout.
pub fn init_logging(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("apppoint=info"));
    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr).json())
            .init();
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(false)
                    .compact(),
            )
            .init();
    }
}

/// Install Prometheus metrics exporter on the given port. No-op if port is None.
pub fn init_metrics(port: Option<u16>) -> Result<(), Box<dyn std::error::Error>> {
    let Some(port) = port else { return Ok(()) };
    let addr: SocketAddr = ([0, 0, 0, 0], port).into();
    metrics_exporter_prometheus::PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()?;
    tracing::info!("metrics endpoint: http://0.0.0.0:{port}/metrics");
    Ok(())
}
