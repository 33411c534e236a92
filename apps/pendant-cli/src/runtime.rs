//! Builds a connected `PoseCore`/`MotorLink` pair from a loaded
//! `PendantConfig`, picking the real serial backend or an in-memory stand-in
//! depending on `simulation_mode`.

use std::sync::Arc;
use std::time::Duration;

use pendant_sdk::{Connected, InMemorySerialPort, MotorLink, PendantConfig, PoseCore};

use crate::error::Result;

pub fn connect(config: PendantConfig) -> Result<(PoseCore<Connected>, Arc<MotorLink>)> {
    let command_delay = Duration::from_secs_f64(config.serial.command_delay_secs);
    let read_timeout = Duration::from_secs_f64(config.serial.timeout_secs);

    let (link, _notifications) = if config.simulation_mode {
        MotorLink::new(Box::new(InMemorySerialPort::new()), command_delay, read_timeout)
    } else {
        #[cfg(feature = "serial-backend")]
        {
            let port = pendant_sdk::RealSerialPort::open(&config.serial.port, config.serial.baud_rate)?;
            let (link, rx) = MotorLink::new(Box::new(port), command_delay, read_timeout);
            link.connect();
            (link, rx)
        }
        #[cfg(not(feature = "serial-backend"))]
        {
            return Err(crate::error::CliError::NoMotorLink);
        }
    };

    let link = Arc::new(link);
    let pose = PoseCore::new(config).connect(link.clone());
    Ok((pose, link))
}
