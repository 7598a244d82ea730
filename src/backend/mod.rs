//! Capability seam over the vendor GPU libraries.
//!
//! All query logic talks to these traits instead of process-global vendor
//! state, so a harness (or this crate's own tests) can substitute the
//! scriptable [`fake`] implementations.

#[cfg(feature = "cuda")]
mod cuda;
pub mod fake;
mod nvml;
mod types;

#[cfg(feature = "cuda")]
pub use cuda::CudaRuntime;
pub use nvml::NvmlBackend;
pub use types::{ClassificationMode, DeviceHandle, MemoryInfo, ProcessDetail, ProcessListError};

use crate::error::QueryError;

/// The vendor's device-management library: device enumeration, per-device
/// memory counters and the running-process list.
pub trait DeviceBackend {
    /// Initialize the library. Idempotent and safe to call repeatedly;
    /// every query path calls it before touching a device.
    fn ensure_ready(&self) -> Result<(), QueryError>;

    /// Number of devices visible to the library.
    fn device_count(&self) -> Result<u32, QueryError>;

    /// Resolve the handle for the device at `index`.
    fn device_handle(&self, index: u32) -> Result<DeviceHandle, QueryError>;

    /// Free and total memory for the device.
    fn memory_info(&self, device: DeviceHandle) -> Result<MemoryInfo, QueryError>;

    /// Running processes in one classification mode, through a request
    /// sized for `capacity` entries. A capacity that cannot hold every
    /// record fails with [`ProcessListError::InsufficientSize`] carrying
    /// the count needed for a retry.
    fn running_process_list(
        &self,
        device: DeviceHandle,
        mode: ClassificationMode,
        capacity: usize,
    ) -> Result<Vec<ProcessDetail>, ProcessListError>;
}

/// The vendor's compute runtime. Its memory query addresses the implicit
/// current device of the calling thread, takes no caller-sized buffer and
/// therefore needs no retry logic.
pub trait RuntimeBackend {
    fn memory_info(&self) -> Result<MemoryInfo, QueryError>;
}
