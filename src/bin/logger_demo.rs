use netback_client::logger::*;
use netback_client::settings::Log;

fn main() -> anyhow::Result<()> {
    let logger = Logger::new_bootstrap();
    trace!("bootstrap trace log");
    debug!("bootstrap debug log");
    info!("bootstrap info log");

    let log = Log {
        filter: "debug".to_string(),
    };
    logger.reload_from_config(&LogConfig::from(&log))?;
    trace!("client trace log");
    debug!(refresh_in_flight = false, "client debug log");
    info!(login_path = "/", "client info log");

    Ok(())
}
