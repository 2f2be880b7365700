//! Server startup utilities.

use tracing::info;

/// Prints the startup banner.
pub fn print_banner() {
    info!(
        r"
  _____         _    _                         _
 |_   _|_ _ ___| | _| |__   ___   __ _ _ __ __| |
   | |/ _` / __| |/ / '_ \ / _ \ / _` | '__/ _` |
   | | (_| \__ \   <| |_) | (_) | (_| | | | (_| |
   |_|\__,_|___/_|\_\_.__/ \___/ \__,_|_|  \__,_|
    "
    );
}

/// Prints server startup information.
pub fn print_startup_info(addr: &str) {
    let separator = "=".repeat(60);
    info!("{}", separator);
    info!("REST API:  http://{}/api/v1", addr);
    info!("Health:    http://{}/healthz/", addr);
    info!("API Docs:  http://{}/swagger-ui", addr);
    info!("{}", separator);
}
