use log::error;

use crate::backend::{
    ClassificationMode, DeviceBackend, DeviceHandle, MemoryInfo, NvmlBackend, ProcessDetail,
};
use crate::config::QueryConfig;
use crate::error::QueryError;
use crate::query::resolver;

/// Memory queries against one device of an injected device-management
/// backend.
///
/// Two API layers: `try_`-prefixed methods return `Result` and say what
/// failed, while the unprefixed methods keep the historical contract of
/// never failing loudly. On that layer any vendor error is reported
/// through `log::error!` and read as a zero byte count, so zero stays
/// ambiguous between zero usage, not found, and error.
pub struct GpuMemory<B> {
    backend: B,
    config: QueryConfig,
}

impl GpuMemory<NvmlBackend> {
    /// Query object over the standard device-management library with the
    /// default single-GPU configuration.
    pub fn nvml() -> Self {
        Self::new(NvmlBackend::new())
    }
}

impl<B: DeviceBackend> GpuMemory<B> {
    pub fn new(backend: B) -> Self {
        Self::with_config(backend, QueryConfig::default())
    }

    pub fn with_config(backend: B, config: QueryConfig) -> Self {
        Self { backend, config }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn config(&self) -> &QueryConfig {
        &self.config
    }

    fn device(&self) -> Result<DeviceHandle, QueryError> {
        self.backend.ensure_ready()?;
        self.backend.device_handle(self.config.device_index)
    }

    /// Free and total counters for the configured device.
    pub fn try_device_memory(&self) -> Result<MemoryInfo, QueryError> {
        let device = self.device()?;
        self.backend.memory_info(device)
    }

    /// Number of devices visible to the backend.
    pub fn try_device_count(&self) -> Result<u32, QueryError> {
        self.backend.ensure_ready()?;
        self.backend.device_count()
    }

    /// One mode's full running-process list, fetched through the same
    /// sizing protocol the per-process resolver uses.
    pub fn try_running_processes(
        &self,
        mode: ClassificationMode,
    ) -> Result<Vec<ProcessDetail>, QueryError> {
        let device = self.device()?;
        resolver::fetch_process_list(&self.backend, device, mode, self.config.process_list_capacity)
    }

    /// Memory attributed to `pid`, walking graphics then compute
    /// classification and returning the first nonzero match.
    ///
    /// `pid == 0` keeps its historical meaning of "whole device": the
    /// device-management `total - free`, with the process-list logic
    /// skipped entirely. `Ok(None)` means no mode recorded a nonzero
    /// usage for the pid; absent and present-with-zero are conflated,
    /// exactly as the vendor reports them.
    pub fn try_process_memory_used(&self, pid: u32) -> Result<Option<u64>, QueryError> {
        if pid == 0 {
            return Ok(Some(self.try_device_memory()?.used()));
        }
        let device = self.device()?;
        resolver::resolve_process_memory(
            &self.backend,
            device,
            pid,
            self.config.process_list_capacity,
        )
    }

    /// Memory in use across the whole device, in bytes. Zero on failure.
    pub fn device_memory_used(&self) -> u64 {
        zero_on_failure(self.try_device_memory().map(|memory| memory.used()))
    }

    /// Unallocated device memory, in bytes. Zero on failure.
    pub fn device_memory_available(&self) -> u64 {
        zero_on_failure(self.try_device_memory().map(|memory| memory.free))
    }

    /// Total device memory, in bytes. Zero on failure.
    pub fn device_memory_total(&self) -> u64 {
        zero_on_failure(self.try_device_memory().map(|memory| memory.total))
    }

    /// Number of visible devices. Zero on failure.
    pub fn device_count(&self) -> u64 {
        zero_on_failure(self.try_device_count().map(u64::from))
    }

    /// Memory used by `pid`, in bytes. Zero when the process holds none,
    /// is not found in either classification, or any vendor call failed.
    pub fn process_memory_used(&self, pid: u32) -> u64 {
        match self.try_process_memory_used(pid) {
            Ok(Some(bytes)) => bytes,
            Ok(None) => 0,
            Err(err) => {
                error!("resolving memory for process {pid}: {err}");
                0
            }
        }
    }
}

fn zero_on_failure(result: Result<u64, QueryError>) -> u64 {
    result.unwrap_or_else(|err| {
        error!("{err}");
        0
    })
}
