//! Process-wide settings for the reconciler

use closer_core::{Error, Result, Settings, LOG_TARGET};
use once_cell::sync::OnceCell;

static SETTINGS: OnceCell<Settings> = OnceCell::new();

/// Install settings for the rest of the process
///
/// Must run before the first close failure is logged; after that the
/// settings are fixed and this returns a configuration error.
pub fn configure(settings: Settings) -> Result<()> {
    SETTINGS
        .set(settings)
        .map_err(|_| Error::configuration("close settings are already initialized"))
}

/// Current settings, read from the environment on first use
pub fn settings() -> &'static Settings {
    SETTINGS.get_or_init(|| {
        Settings::from_env().unwrap_or_else(|e| {
            tracing::warn!(target: LOG_TARGET, error = %e, "using default close settings");
            Settings::default()
        })
    })
}
