use std::sync::OnceLock;

use nvml_wrapper::enums::device::UsedGpuMemory;
use nvml_wrapper::Nvml;

use super::{
    ClassificationMode, DeviceBackend, DeviceHandle, MemoryInfo, ProcessDetail, ProcessListError,
};
use crate::error::QueryError;

/// Device-management backend over NVML.
///
/// The library handle is created on first use and kept for the lifetime of
/// the backend, so `ensure_ready` stays cheap no matter how often it is
/// called. NVML initialization is refcounted in the driver; constructing
/// one backend per query (as the crate-root free functions do) remains
/// safe.
pub struct NvmlBackend {
    nvml: OnceLock<Nvml>,
}

impl NvmlBackend {
    pub fn new() -> Self {
        Self {
            nvml: OnceLock::new(),
        }
    }

    fn nvml(&self) -> Result<&Nvml, QueryError> {
        self.ensure_ready()?;
        self.nvml
            .get()
            .ok_or_else(|| QueryError::Init("library handle missing after init".to_string()))
    }

    fn device(&self, handle: DeviceHandle) -> Result<nvml_wrapper::Device<'_>, QueryError> {
        self.nvml()?
            .device_by_index(handle.index())
            .map_err(|e| QueryError::Device {
                index: handle.index(),
                reason: e.to_string(),
            })
    }
}

impl Default for NvmlBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl DeviceBackend for NvmlBackend {
    fn ensure_ready(&self) -> Result<(), QueryError> {
        if self.nvml.get().is_some() {
            return Ok(());
        }
        let nvml = Nvml::init().map_err(|e| QueryError::Init(e.to_string()))?;
        // A racing caller may have stored a handle first; dropping the
        // extra one just decrements the library refcount.
        let _ = self.nvml.set(nvml);
        Ok(())
    }

    fn device_count(&self) -> Result<u32, QueryError> {
        self.nvml()?
            .device_count()
            .map_err(|e| QueryError::DeviceCount(e.to_string()))
    }

    fn device_handle(&self, index: u32) -> Result<DeviceHandle, QueryError> {
        // Resolve once so a bad index fails here rather than on first use.
        // Queries re-resolve through the handle on each call; NVML device
        // lookups are cheap and the handle itself never needs releasing.
        self.nvml()?
            .device_by_index(index)
            .map_err(|e| QueryError::Device {
                index,
                reason: e.to_string(),
            })?;
        Ok(DeviceHandle(index))
    }

    fn memory_info(&self, device: DeviceHandle) -> Result<MemoryInfo, QueryError> {
        let info = self
            .device(device)?
            .memory_info()
            .map_err(|e| QueryError::MemoryInfo(e.to_string()))?;
        Ok(MemoryInfo {
            free: info.free,
            total: info.total,
        })
    }

    fn running_process_list(
        &self,
        device: DeviceHandle,
        mode: ClassificationMode,
        capacity: usize,
    ) -> Result<Vec<ProcessDetail>, ProcessListError> {
        let device = self.device(device).map_err(ProcessListError::Backend)?;
        let raw = match mode {
            ClassificationMode::Graphics => device.running_graphics_processes(),
            ClassificationMode::Compute => device.running_compute_processes(),
        }
        .map_err(|e| ProcessListError::Backend(QueryError::ProcessList(e.to_string())))?;

        // The wrapper library sizes its own result buffer, so the caller
        // capacity contract is enforced at this seam: more records than
        // requested reads as an insufficient-size status carrying the
        // true count.
        if raw.len() > capacity {
            return Err(ProcessListError::InsufficientSize {
                required: raw.len(),
            });
        }

        Ok(raw
            .into_iter()
            .map(|p| ProcessDetail {
                pid: p.pid,
                used_memory: match p.used_gpu_memory {
                    UsedGpuMemory::Used(bytes) => bytes,
                    UsedGpuMemory::Unavailable => 0,
                },
            })
            .collect())
    }
}
