use log::{debug, warn};

use crate::backend::{
    ClassificationMode, DeviceBackend, DeviceHandle, ProcessDetail, ProcessListError,
};
use crate::error::QueryError;

/// Fetch one classification mode's running-process list, honoring the
/// vendor's sizing protocol: request `capacity` entries first and resize
/// to the reported requirement at most once.
pub(crate) fn fetch_process_list<B: DeviceBackend>(
    backend: &B,
    device: DeviceHandle,
    mode: ClassificationMode,
    capacity: usize,
) -> Result<Vec<ProcessDetail>, QueryError> {
    match backend.running_process_list(device, mode, capacity) {
        Ok(list) => Ok(list),
        Err(ProcessListError::InsufficientSize { required }) => {
            debug!("{mode} process list needs {required} entries (had {capacity}), retrying once");
            match backend.running_process_list(device, mode, required) {
                Ok(list) => Ok(list),
                Err(ProcessListError::InsufficientSize { required }) => {
                    Err(QueryError::ProcessList(format!(
                        "{mode} list still insufficient after resizing to {required} entries"
                    )))
                }
                Err(ProcessListError::Backend(error)) => Err(error),
            }
        }
        Err(ProcessListError::Backend(error)) => Err(error),
    }
}

/// Memory attributed to `pid` in one mode's list. A missing pid is not an
/// error; it reads as zero, indistinguishable from a recorded zero usage.
fn memory_for_pid(list: &[ProcessDetail], pid: u32) -> u64 {
    list.iter()
        .find(|process| process.pid == pid)
        .map(|process| process.used_memory)
        .unwrap_or(0)
}

/// Walk the classification modes in fallback order and return the first
/// nonzero usage recorded for `pid`.
///
/// Every mode starts from the same initial `capacity`; a resize granted in
/// one mode never carries into the next. A mode that fails outright is
/// reported and skipped so the remaining modes still get their chance; an
/// error in the final mode fails the call.
pub(crate) fn resolve_process_memory<B: DeviceBackend>(
    backend: &B,
    device: DeviceHandle,
    pid: u32,
    capacity: usize,
) -> Result<Option<u64>, QueryError> {
    let mut last_error = None;
    for mode in ClassificationMode::FALLBACK_ORDER {
        match fetch_process_list(backend, device, mode, capacity) {
            Ok(list) => {
                last_error = None;
                let used = memory_for_pid(&list, pid);
                if used > 0 {
                    return Ok(Some(used));
                }
            }
            Err(error) => {
                warn!("{mode} process list query failed: {error}");
                last_error = Some(error);
            }
        }
    }
    match last_error {
        Some(error) => Err(error),
        None => Ok(None),
    }
}
