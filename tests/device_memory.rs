use gpu_memstat::backend::fake::FakeDevice;
use gpu_memstat::backend::ClassificationMode::{Compute, Graphics};
use gpu_memstat::{GpuMemory, QueryConfig, QueryError};

#[test]
fn aggregates_derive_from_one_memory_reading() {
    let query = GpuMemory::new(FakeDevice::new().with_memory(6_000, 16_000));

    assert_eq!(query.device_memory_total(), 16_000);
    assert_eq!(query.device_memory_available(), 6_000);
    assert_eq!(query.device_memory_used(), 10_000);
}

#[test]
fn memory_query_failure_reads_as_zero_but_is_distinguishable() {
    let backend = FakeDevice::new()
        .fail_memory(QueryError::MemoryInfo("GPU is lost".to_string()));
    let query = GpuMemory::new(backend);

    assert_eq!(query.device_memory_used(), 0);
    assert!(query.try_device_memory().is_err());
}

#[test]
fn device_resolution_failure_reads_as_zero() {
    let backend = FakeDevice::new().with_memory(1, 2).fail_device(QueryError::Device {
        index: 0,
        reason: "invalid index".to_string(),
    });
    let query = GpuMemory::new(backend);

    assert_eq!(query.device_memory_total(), 0);
    assert_eq!(query.process_memory_used(42), 0);
}

#[test]
fn device_count_passes_through() {
    let query = GpuMemory::new(FakeDevice::new().with_device_count(4));
    assert_eq!(query.device_count(), 4);
    assert_eq!(query.try_device_count().unwrap(), 4);
}

#[test]
fn configured_device_index_is_what_gets_queried() {
    let config = QueryConfig {
        device_index: 3,
        ..QueryConfig::default()
    };
    let query = GpuMemory::with_config(FakeDevice::new().with_memory(10, 30), config);

    assert_eq!(query.config().device_index, 3);
    assert_eq!(query.device_memory_used(), 20);
}

#[test]
fn crate_root_entry_points_are_total() {
    // These hit the real device-management library; on a host without one
    // they report the failure and read as zero rather than panicking.
    let _ = gpu_memstat::device_memory_used();
    let _ = gpu_memstat::device_memory_available();
    let _ = gpu_memstat::device_memory_total();
    let _ = gpu_memstat::process_memory_used(u32::MAX);
}

#[test]
fn running_process_listing_uses_the_sizing_protocol() {
    let entries: Vec<(u32, u64)> = (0..120).map(|i| (100 + i, 4)).collect();
    let backend = FakeDevice::new()
        .with_processes(Graphics, &entries)
        .with_processes(Compute, &[(9, 64)]);
    let query = GpuMemory::new(backend);

    let graphics = query.try_running_processes(Graphics).unwrap();
    assert_eq!(graphics.len(), 120);
    assert_eq!(query.backend().capacities_for(Graphics), vec![100, 120]);

    let compute = query.try_running_processes(Compute).unwrap();
    assert_eq!(compute.len(), 1);
    assert_eq!(query.backend().capacities_for(Compute), vec![100]);
}
