/// Constants used throughout the closer codebase
// Environment variable selecting the level of demoted close failures
pub const CLOSER_LOG_LEVEL_VAR: &str = "CLOSER_LOG_LEVEL";

// Tracing target for every event emitted by the reconciler
pub const LOG_TARGET: &str = "closer";
