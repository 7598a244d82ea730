//! Query operations built on the backend capability seam.

mod device;
mod resolver;
mod runtime;

pub use device::GpuMemory;
#[cfg(feature = "cuda")]
pub use runtime::cuda;
pub use runtime::{
    runtime_memory_available, runtime_memory_total, runtime_memory_used, try_runtime_memory,
};
