use thiserror::Error;

/// Errors surfaced by the `try_`-prefixed query API.
///
/// The zero-returning entry points never propagate these; they report the
/// failure through `log::error!` and degrade to a zero byte count.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    #[error("failed to initialize the device management library: {0}")]
    Init(String),

    #[error("failed to resolve device handle {index}: {reason}")]
    Device { index: u32, reason: String },

    #[error("failed to query the device count: {0}")]
    DeviceCount(String),

    #[error("failed to query device memory info: {0}")]
    MemoryInfo(String),

    #[error("failed to query the running process list: {0}")]
    ProcessList(String),

    #[error("compute runtime error: {0}")]
    Runtime(String),
}
