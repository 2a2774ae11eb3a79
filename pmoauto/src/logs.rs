//! Initialisation du logging
//!
//! Installs a `tracing-subscriber` registry whose level filter can be
//! changed at runtime through the returned [`LogHandle`].

use crate::error::{AutoError, Result};
use parking_lot::RwLock;
use pmoconfig::Config;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{
    Registry, filter::LevelFilter, layer::SubscriberExt, reload, util::SubscriberInitExt,
};

/// Parses a level name (`trace`, `DEBUG`, `off`, ...).
pub fn parse_level(level: &str) -> Result<LevelFilter> {
    match level.trim().to_uppercase().as_str() {
        "TRACE" => Ok(LevelFilter::TRACE),
        "DEBUG" => Ok(LevelFilter::DEBUG),
        "INFO" => Ok(LevelFilter::INFO),
        "WARN" | "WARNING" => Ok(LevelFilter::WARN),
        "ERROR" => Ok(LevelFilter::ERROR),
        "OFF" => Ok(LevelFilter::OFF),
        _ => Err(AutoError::InvalidLogLevel(level.to_string())),
    }
}

/// Handle sur le filtre rechargeable
#[derive(Clone)]
pub struct LogHandle {
    reload_handle: reload::Handle<LevelFilter, Registry>,
    level: Arc<RwLock<LevelFilter>>,
}

impl LogHandle {
    fn new(reload_handle: reload::Handle<LevelFilter, Registry>, level: LevelFilter) -> Self {
        Self {
            reload_handle,
            level: Arc::new(RwLock::new(level)),
        }
    }

    pub fn level(&self) -> LevelFilter {
        *self.level.read()
    }

    /// Changes the minimum level of every installed layer.
    pub fn set_level(&self, level: &str) -> Result<()> {
        let filter = parse_level(level)?;
        self.reload_handle
            .reload(filter)
            .map_err(|e| AutoError::Logging(e.to_string()))?;
        *self.level.write() = filter;
        info!(level = %filter, "✅ Log level changed");
        Ok(())
    }
}

/// Installs the global subscriber from the `host.logger` section of `config`.
///
/// An unknown `min_level` falls back to `INFO`. Fails if a global subscriber
/// is already installed.
pub fn init_logging(config: &Config) -> Result<LogHandle> {
    let level = config
        .get_log_min_level()
        .ok()
        .and_then(|l| parse_level(&l).ok())
        .unwrap_or(LevelFilter::INFO);
    let enable_console = config.get_log_enable_console().unwrap_or(true);
    let with_target = config.get_log_with_target().unwrap_or(true);

    // Le filtre doit être appliqué en premier
    let (filter, reload_handle) = reload::Layer::new(level);
    let console = enable_console.then(|| {
        tracing_subscriber::fmt::layer()
            .with_target(with_target)
            .with_level(true)
            .with_ansi(true)
    });

    Registry::default()
        .with(filter)
        .with(console)
        .try_init()
        .map_err(|e| AutoError::Logging(e.to_string()))?;

    Ok(LogHandle::new(reload_handle, level))
}
