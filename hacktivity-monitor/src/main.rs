/*!
HackerOne Hacktivity Disclosure Monitor

Single-run batch job meant to be invoked periodically by an external
scheduler: fetch the disclosure feed, alert a chat webhook about reports not
seen before, persist the merged snapshot for the next run.
*/

use tracing::error;
use tracing_subscriber::EnvFilter;

use crate::core::config::MonitorConfig;
use crate::core::monitor::HacktivityMonitor;

mod core;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = match MonitorConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Error: {e}");
            std::process::exit(1);
        }
    };

    let monitor = match HacktivityMonitor::new(&config) {
        Ok(monitor) => monitor,
        Err(e) => {
            error!("Failed to initialize monitor: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = monitor.run().await {
        error!("Run aborted: {e}");
        std::process::exit(1);
    }
}
