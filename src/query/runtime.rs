use log::error;

use crate::backend::{MemoryInfo, RuntimeBackend};
use crate::error::QueryError;

// Aggregate queries over the compute runtime's implicit current device.
// One vendor call each; the call takes no caller-sized buffer, so there
// is nothing to retry.

/// Free and total counters from the runtime.
pub fn try_runtime_memory<R: RuntimeBackend>(runtime: &R) -> Result<MemoryInfo, QueryError> {
    runtime.memory_info()
}

/// Memory in use on the current device, in bytes. Zero on failure.
pub fn runtime_memory_used<R: RuntimeBackend>(runtime: &R) -> u64 {
    zero_on_failure(runtime).used()
}

/// Unallocated memory on the current device, in bytes. Zero on failure.
pub fn runtime_memory_available<R: RuntimeBackend>(runtime: &R) -> u64 {
    zero_on_failure(runtime).free
}

/// Total memory of the current device, in bytes. Zero on failure.
pub fn runtime_memory_total<R: RuntimeBackend>(runtime: &R) -> u64 {
    zero_on_failure(runtime).total
}

fn zero_on_failure<R: RuntimeBackend>(runtime: &R) -> MemoryInfo {
    runtime.memory_info().unwrap_or_else(|err| {
        error!("{err}");
        MemoryInfo::default()
    })
}

/// CUDA-backed convenience wrappers over the generic runtime queries.
#[cfg(feature = "cuda")]
pub mod cuda {
    use crate::backend::CudaRuntime;

    pub fn memory_used() -> u64 {
        super::runtime_memory_used(&CudaRuntime::default())
    }

    pub fn memory_available() -> u64 {
        super::runtime_memory_available(&CudaRuntime::default())
    }

    pub fn memory_total() -> u64 {
        super::runtime_memory_total(&CudaRuntime::default())
    }
}
