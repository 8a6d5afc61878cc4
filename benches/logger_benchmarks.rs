//! Criterion benchmarks for component_logger

use component_logger::core::log_level::should_log;
use component_logger::prelude::*;
use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use std::sync::Arc;

// ============================================================================
// Level Filtering Benchmarks
// ============================================================================

fn bench_level_filtering(c: &mut Criterion) {
    let mut group = c.benchmark_group("level_filtering");
    group.throughput(Throughput::Elements(1));

    group.bench_function("should_log", |b| {
        b.iter(|| should_log(black_box(LogLevel::Info), black_box(LogLevel::Warning)));
    });

    let logger = ComponentLogger::new(
        LoggerOptions::new("bench").min_level("emergency"),
        Host::empty(),
    )
    .unwrap();

    group.bench_function("filtered_call", |b| {
        b.iter(|| logger.info(black_box("Filtered message"), LogContext::new()));
    });

    group.finish();
}

// ============================================================================
// Formatting Benchmarks
// ============================================================================

fn bench_formatting(c: &mut Criterion) {
    let mut group = c.benchmark_group("formatting");
    group.throughput(Throughput::Elements(1));

    let plain = LogEntry::new(LogLevel::Info, "Plain message".into(), LogContext::new());
    let with_context = LogEntry::new(
        LogLevel::Error,
        "Payment failed".into(),
        LogContext::new()
            .with_field("order_id", 1234)
            .with_field("gateway", "stripe")
            .with_field("retry", true),
    );

    group.bench_function("file_record_plain", |b| {
        b.iter(|| black_box(plain.to_file_record()));
    });

    group.bench_function("file_record_context", |b| {
        b.iter(|| black_box(with_context.to_file_record()));
    });

    group.bench_function("process_line_context", |b| {
        b.iter(|| black_box(with_context.to_process_line()));
    });

    group.finish();
}

// ============================================================================
// Fallback File Benchmarks
// ============================================================================

fn bench_file_append(c: &mut Criterion) {
    let mut group = c.benchmark_group("file_append");
    group.throughput(Throughput::Elements(1));

    let temp_dir = tempfile::tempdir().unwrap();
    let appender = DailyFileAppender::new(temp_dir.path(), "bench");
    let entry = LogEntry::new(
        LogLevel::Notice,
        "Benchmark entry".into(),
        LogContext::new().with_field("i", 1),
    );

    group.bench_function("locked_append", |b| {
        b.iter(|| appender.append(black_box(&entry)).unwrap());
    });

    let hooks = Arc::new(HookRegistry::new());
    let host = Host::builder()
        .hook_registry(hooks)
        .uploads(StaticUploadDir(temp_dir.path().to_path_buf()))
        .build();
    let logger = ComponentLogger::builder(LoggerOptions::new("bench"))
        .host(host)
        .sweep_one_in(u32::MAX)
        .build()
        .unwrap();

    group.bench_function("facade_fallback", |b| {
        b.iter(|| logger.info(black_box("Facade entry"), LogContext::new()));
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_level_filtering,
    bench_formatting,
    bench_file_append
);
criterion_main!(benches);
