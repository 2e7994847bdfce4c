use std::io;

use tracing::info;

use apppoint::config::Config;
use apppoint::engine::BookingStore;
use apppoint::shell::Shell;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env();
    apppoint::observability::init_logging(config.log_json);
    apppoint::observability::init_metrics(config.metrics_port)?;

    info!("apppoint starting");
    info!(
        "  max_auto_shifts: {}",
        config.max_auto_shifts.map_or("unlimited".to_string(), |n| n.to_string())
    );
    info!(
        "  metrics: {}",
        config.metrics_port.map_or("disabled".to_string(), |p| format!("http://0.0.0.0:{p}/metrics"))
    );

    let mut store = BookingStore::new();
    let stdin = io::stdin();
    let stdout = io::stdout();
    Shell::new(&mut store, stdin.lock(), stdout.lock(), &config).run()?;

    info!("apppoint stopped with {} appointment(s) booked", store.appointment_count());
    Ok(())
}
