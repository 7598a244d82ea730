//! GPU memory usage and availability queries.
//!
//! Reports whole-device memory counters and per-process usage attribution
//! by querying the vendor's device-management library, with a secondary
//! aggregate path over the compute runtime (behind the `cuda` feature).
//! Every vendor interaction goes through the [`backend`] capability
//! traits, so callers can substitute their own implementation; the
//! scriptable ones in [`backend::fake`] are what this crate's tests run
//! against.
//!
//! The free functions at the crate root mirror the historical entry
//! points: total functions that report failures through `log` and return
//! zero. On that layer zero is ambiguous between "zero usage", "not
//! found" and "vendor error"; the `try_`-prefixed methods on
//! [`GpuMemory`] distinguish the error case.

pub mod backend;
mod config;
mod error;
mod query;

pub use config::{QueryConfig, DEFAULT_PROCESS_LIST_CAPACITY};
pub use error::QueryError;
#[cfg(feature = "cuda")]
pub use query::cuda;
pub use query::{
    runtime_memory_available, runtime_memory_total, runtime_memory_used, try_runtime_memory,
    GpuMemory,
};

/// Memory in use across the whole first device, in bytes. Zero on failure.
pub fn device_memory_used() -> u64 {
    GpuMemory::nvml().device_memory_used()
}

/// Unallocated memory on the first device, in bytes. Zero on failure.
pub fn device_memory_available() -> u64 {
    GpuMemory::nvml().device_memory_available()
}

/// Total memory of the first device, in bytes. Zero on failure.
pub fn device_memory_total() -> u64 {
    GpuMemory::nvml().device_memory_total()
}

/// Memory used on the first device by `pid`, in bytes.
///
/// A `pid` of 0 keeps its historical meaning of "whole device" and
/// returns `total - free` instead of consulting the process lists. Zero
/// on any failure.
pub fn process_memory_used(pid: u32) -> u64 {
    GpuMemory::nvml().process_memory_used(pid)
}
