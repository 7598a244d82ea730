//! Scriptable in-memory backends.
//!
//! Used by this crate's own tests and available to embedding harnesses
//! that need deterministic vendor behavior without a GPU.

use std::cell::RefCell;
use std::collections::VecDeque;

use super::{
    ClassificationMode, DeviceBackend, DeviceHandle, MemoryInfo, ProcessDetail, ProcessListError,
    RuntimeBackend,
};
use crate::error::QueryError;

/// A recorded running-process-list request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessListCall {
    pub mode: ClassificationMode,
    pub capacity: usize,
}

type ProcessListResponse = Result<Vec<ProcessDetail>, ProcessListError>;

/// Scriptable device-management backend behaving like a single-device
/// node.
///
/// Process tables are set per classification mode; a request whose
/// capacity cannot hold a mode's whole table reports
/// [`ProcessListError::InsufficientSize`] with the true count, exactly
/// like the real seam. Responses pushed with
/// [`push_process_list_response`](Self::push_process_list_response) take
/// precedence over the tables. Every process-list request is recorded so
/// tests can assert call counts and capacities.
pub struct FakeDevice {
    init_error: Option<QueryError>,
    device_error: Option<QueryError>,
    memory_error: Option<QueryError>,
    memory: MemoryInfo,
    device_count: u32,
    graphics: Vec<ProcessDetail>,
    compute: Vec<ProcessDetail>,
    scripted_graphics: RefCell<VecDeque<ProcessListResponse>>,
    scripted_compute: RefCell<VecDeque<ProcessListResponse>>,
    calls: RefCell<Vec<ProcessListCall>>,
}

impl FakeDevice {
    pub fn new() -> Self {
        Self {
            init_error: None,
            device_error: None,
            memory_error: None,
            memory: MemoryInfo::default(),
            device_count: 1,
            graphics: Vec::new(),
            compute: Vec::new(),
            scripted_graphics: RefCell::new(VecDeque::new()),
            scripted_compute: RefCell::new(VecDeque::new()),
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn with_memory(mut self, free: u64, total: u64) -> Self {
        self.memory = MemoryInfo { free, total };
        self
    }

    pub fn with_device_count(mut self, count: u32) -> Self {
        self.device_count = count;
        self
    }

    /// Populate one mode's process table from `(pid, used_memory)` pairs.
    pub fn with_processes(mut self, mode: ClassificationMode, entries: &[(u32, u64)]) -> Self {
        let table = entries
            .iter()
            .map(|&(pid, used_memory)| ProcessDetail { pid, used_memory })
            .collect();
        match mode {
            ClassificationMode::Graphics => self.graphics = table,
            ClassificationMode::Compute => self.compute = table,
        }
        self
    }

    /// Make library initialization fail.
    pub fn fail_init(mut self, error: QueryError) -> Self {
        self.init_error = Some(error);
        self
    }

    /// Make device-handle resolution fail.
    pub fn fail_device(mut self, error: QueryError) -> Self {
        self.device_error = Some(error);
        self
    }

    /// Make memory-info queries fail.
    pub fn fail_memory(mut self, error: QueryError) -> Self {
        self.memory_error = Some(error);
        self
    }

    /// Queue a response for the next process-list request in `mode`,
    /// overriding the table emulation for that one request.
    pub fn push_process_list_response(&self, mode: ClassificationMode, response: ProcessListResponse) {
        match mode {
            ClassificationMode::Graphics => self.scripted_graphics.borrow_mut().push_back(response),
            ClassificationMode::Compute => self.scripted_compute.borrow_mut().push_back(response),
        }
    }

    /// Every process-list request observed so far, in order.
    pub fn process_list_calls(&self) -> Vec<ProcessListCall> {
        self.calls.borrow().clone()
    }

    /// Capacities of the observed requests in `mode`, in order.
    pub fn capacities_for(&self, mode: ClassificationMode) -> Vec<usize> {
        self.calls
            .borrow()
            .iter()
            .filter(|call| call.mode == mode)
            .map(|call| call.capacity)
            .collect()
    }
}

impl Default for FakeDevice {
    fn default() -> Self {
        Self::new()
    }
}

impl DeviceBackend for FakeDevice {
    fn ensure_ready(&self) -> Result<(), QueryError> {
        match &self.init_error {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }

    fn device_count(&self) -> Result<u32, QueryError> {
        self.ensure_ready()?;
        Ok(self.device_count)
    }

    fn device_handle(&self, index: u32) -> Result<DeviceHandle, QueryError> {
        self.ensure_ready()?;
        match &self.device_error {
            Some(error) => Err(error.clone()),
            None => Ok(DeviceHandle(index)),
        }
    }

    fn memory_info(&self, _device: DeviceHandle) -> Result<MemoryInfo, QueryError> {
        self.ensure_ready()?;
        match &self.memory_error {
            Some(error) => Err(error.clone()),
            None => Ok(self.memory),
        }
    }

    fn running_process_list(
        &self,
        _device: DeviceHandle,
        mode: ClassificationMode,
        capacity: usize,
    ) -> Result<Vec<ProcessDetail>, ProcessListError> {
        self.calls.borrow_mut().push(ProcessListCall { mode, capacity });

        let scripted = match mode {
            ClassificationMode::Graphics => self.scripted_graphics.borrow_mut().pop_front(),
            ClassificationMode::Compute => self.scripted_compute.borrow_mut().pop_front(),
        };
        if let Some(response) = scripted {
            return response;
        }

        let table = match mode {
            ClassificationMode::Graphics => &self.graphics,
            ClassificationMode::Compute => &self.compute,
        };
        if table.len() > capacity {
            return Err(ProcessListError::InsufficientSize {
                required: table.len(),
            });
        }
        Ok(table.clone())
    }
}

/// Scriptable compute-runtime backend.
pub struct FakeRuntime {
    memory: MemoryInfo,
    error: Option<QueryError>,
}

impl FakeRuntime {
    pub fn new(free: u64, total: u64) -> Self {
        Self {
            memory: MemoryInfo { free, total },
            error: None,
        }
    }

    pub fn failing(error: QueryError) -> Self {
        Self {
            memory: MemoryInfo::default(),
            error: Some(error),
        }
    }
}

impl RuntimeBackend for FakeRuntime {
    fn memory_info(&self) -> Result<MemoryInfo, QueryError> {
        match &self.error {
            Some(error) => Err(error.clone()),
            None => Ok(self.memory),
        }
    }
}
