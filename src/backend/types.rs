use std::fmt;

use crate::error::QueryError;

/// Opaque reference to a physical GPU, obtained by index from a
/// [`DeviceBackend`](super::DeviceBackend). Owned by the vendor library
/// for its process lifetime; never released explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceHandle(pub(crate) u32);

impl DeviceHandle {
    pub fn index(&self) -> u32 {
        self.0
    }
}

/// Whole-device memory counters, in bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemoryInfo {
    pub free: u64,
    pub total: u64,
}

impl MemoryInfo {
    /// Memory currently in use, derived as `total - free`.
    pub fn used(&self) -> u64 {
        self.total.saturating_sub(self.free)
    }
}

/// One running-process record as reported by the vendor. Read-only to
/// this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessDetail {
    pub pid: u32,
    pub used_memory: u64,
}

/// The vendor's process categories when enumerating running processes.
///
/// A process usually shows up under exactly one of these; per-process
/// attribution walks [`FALLBACK_ORDER`](Self::FALLBACK_ORDER) and stops at
/// the first nonzero match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClassificationMode {
    Graphics,
    Compute,
}

impl ClassificationMode {
    /// Fixed lookup order for attribution: graphics first, compute as the
    /// fallback.
    pub const FALLBACK_ORDER: [ClassificationMode; 2] =
        [ClassificationMode::Graphics, ClassificationMode::Compute];
}

impl fmt::Display for ClassificationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClassificationMode::Graphics => f.write_str("graphics"),
            ClassificationMode::Compute => f.write_str("compute"),
        }
    }
}

/// Outcome of a sized running-process-list request that did not succeed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessListError {
    /// The supplied capacity could not hold every record; `required` is
    /// the entry count the vendor reports for a retry.
    InsufficientSize { required: usize },
    /// Any other vendor failure. Not recovered.
    Backend(QueryError),
}
