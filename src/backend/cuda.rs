use cudarc::driver::{result, CudaDevice};

use super::{MemoryInfo, RuntimeBackend};
use crate::error::QueryError;

/// Compute-runtime backend over the CUDA driver.
///
/// `memory_info` addresses the device whose context is current on the
/// calling thread; binding the primary context for `device_index` makes
/// that explicit instead of depending on whatever ran before.
pub struct CudaRuntime {
    device_index: usize,
}

impl CudaRuntime {
    pub fn new(device_index: usize) -> Self {
        Self { device_index }
    }
}

impl Default for CudaRuntime {
    fn default() -> Self {
        Self::new(0)
    }
}

impl RuntimeBackend for CudaRuntime {
    fn memory_info(&self) -> Result<MemoryInfo, QueryError> {
        // CudaDevice::new binds the device's primary context to this
        // thread, which is what the memory query below reads from.
        let _device = CudaDevice::new(self.device_index)
            .map_err(|e| QueryError::Runtime(e.to_string()))?;
        let (free, total) =
            result::mem_get_info().map_err(|e| QueryError::Runtime(e.to_string()))?;
        Ok(MemoryInfo {
            free: free as u64,
            total: total as u64,
        })
    }
}
