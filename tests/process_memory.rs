use gpu_memstat::backend::fake::FakeDevice;
use gpu_memstat::backend::ClassificationMode::{Compute, Graphics};
use gpu_memstat::{GpuMemory, QueryError};

#[test]
fn pid_zero_is_whole_device_usage() {
    // The shortcut must hold no matter what the process lists contain,
    // and must not touch them at all.
    let backend = FakeDevice::new()
        .with_memory(2_000, 10_000)
        .with_processes(Graphics, &[(0, 12_345), (42, 1_000)])
        .with_processes(Compute, &[(0, 54_321)]);
    let query = GpuMemory::new(backend);

    let total = query.device_memory_total();
    let available = query.device_memory_available();
    assert_eq!(query.process_memory_used(0), total - available);
    assert_eq!(query.process_memory_used(0), 8_000);
    assert!(query.backend().process_list_calls().is_empty());
}

#[test]
fn graphics_wins_when_both_modes_list_the_pid() {
    let backend = FakeDevice::new()
        .with_processes(Graphics, &[(42, 1_000)])
        .with_processes(Compute, &[(42, 2_000)]);
    let query = GpuMemory::new(backend);

    assert_eq!(query.process_memory_used(42), 1_000);
    // Compute was never consulted.
    assert!(query.backend().capacities_for(Compute).is_empty());
}

#[test]
fn compute_is_the_fallback_on_a_graphics_miss() {
    let backend = FakeDevice::new()
        .with_processes(Graphics, &[(7, 300)])
        .with_processes(Compute, &[(42, 500)]);
    let query = GpuMemory::new(backend);

    assert_eq!(query.process_memory_used(42), 500);
}

#[test]
fn unknown_pid_reads_as_zero() {
    let backend = FakeDevice::new()
        .with_processes(Graphics, &[(7, 300)])
        .with_processes(Compute, &[(8, 400)]);
    let query = GpuMemory::new(backend);

    assert_eq!(query.process_memory_used(999), 0);
    assert_eq!(query.try_process_memory_used(999).unwrap(), None);
}

#[test]
fn undersized_list_is_resized_and_retried_once() {
    // 150 running graphics processes against the default capacity of 100:
    // the first request reports the required size, the retry succeeds.
    let mut entries: Vec<(u32, u64)> = (0..149).map(|i| (2_000 + i, 8)).collect();
    entries.push((42, 700));
    let backend = FakeDevice::new().with_processes(Graphics, &entries);
    let query = GpuMemory::new(backend);

    assert_eq!(query.process_memory_used(42), 700);
    assert_eq!(query.backend().capacities_for(Graphics), vec![100, 150]);
}

#[test]
fn initialization_failure_degrades_every_entry_point_to_zero() {
    let backend = FakeDevice::new()
        .with_memory(1, 2)
        .fail_init(QueryError::Init("driver not loaded".to_string()));
    let query = GpuMemory::new(backend);

    assert_eq!(query.device_memory_used(), 0);
    assert_eq!(query.device_memory_available(), 0);
    assert_eq!(query.device_memory_total(), 0);
    assert_eq!(query.device_count(), 0);
    assert_eq!(query.process_memory_used(42), 0);
    assert_eq!(query.process_memory_used(0), 0);
    assert!(query.try_process_memory_used(42).is_err());
}

#[test]
fn a_graphics_resize_never_leaks_into_the_compute_attempt() {
    // Graphics resizes to 150 and still misses; the compute attempt must
    // start over from the default capacity.
    let entries: Vec<(u32, u64)> = (0..150).map(|i| (2_000 + i, 8)).collect();
    let backend = FakeDevice::new()
        .with_processes(Graphics, &entries)
        .with_processes(Compute, &[(42, 500)]);
    let query = GpuMemory::new(backend);

    assert_eq!(query.process_memory_used(42), 500);
    assert_eq!(query.backend().capacities_for(Graphics), vec![100, 150]);
    assert_eq!(query.backend().capacities_for(Compute), vec![100]);
}
