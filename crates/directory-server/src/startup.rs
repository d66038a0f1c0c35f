//! Server startup utilities.

use directory_config::AppConfig;
use tracing::info;

/// Prints the startup banner.
pub fn print_banner() {
    info!(r#"
   __  __                 ____  _               __
  / / / /_______  _____  / __ \(_)_______  ____/ /_____  _______  __
 / / / / ___/ _ \/ ___/ / / / / / ___/ _ \/ ___/ __/ __ \/ ___/ / / /
/ /_/ (__  )  __/ /    / /_/ / / /  /  __/ /__/ /_/ /_/ / /  / /_/ /
\____/____/\___/_/    /_____/_/_/   \___/\___/\__/\____/_/   \__, /
                                                            /____/
    "#);
}

/// Prints where the server listens and which backends it uses.
pub fn print_startup_info(config: &AppConfig) {
    let separator = "=".repeat(60);
    let addr = config.server.addr();
    info!("{}", separator);
    info!("REST API:  http://{}/users", addr);
    info!("Health:    http://{}/health", addr);
    info!("Store:     {} (table `{}`)", config.database.backend, config.database.table);
    info!("Cache:     {} (ttl {}s)", config.cache.backend, config.cache.ttl_secs);
    info!("{}", separator);
}
