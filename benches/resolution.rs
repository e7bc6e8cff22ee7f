#![allow(unused)]
extern crate il2scope;

use criterion::{criterion_group, criterion_main, BatchSize, Criterion, Throughput};
use il2scope::prelude::*;
use std::hint::black_box;

const DEFINITIONS: u32 = 512;

/// A flat definition table where every type derives from the previous one and exposes one
/// instantiation of a shared generic collection over itself, wrapped in an array
fn synthetic_store() -> (MemoryStore, Vec<RawTypeUsage>) {
    let mut store = MemoryStore::new();
    let namespace = store.intern("Bench");
    let list_name = store.intern("List`1");
    let list = store.push_type_definition(RawTypeDefinition {
        namespace,
        name: list_name,
        flags: TYPE_ATTRIBUTE::PUBLIC,
        ..Default::default()
    });

    let mut parent = None;
    let mut usages = Vec::new();
    for i in 0..DEFINITIONS {
        let name = store.intern(&format!("Type{i}"));
        let index = store.push_type_definition(RawTypeDefinition {
            namespace,
            name,
            parent,
            flags: TYPE_ATTRIBUTE::PUBLIC,
            ..Default::default()
        });
        parent = Some(store.push_usage(RawTypeUsage::definition(index)));

        let argument = store.map_usage(RawTypeUsage::definition(index));
        let class_inst = store.map_generic_instantiation(&[argument]);
        let class = store.map_generic_class(RawGenericClass {
            definition: list,
            class_inst,
        });
        let instance = store.map_usage(RawTypeUsage::generic_instance(class));
        usages.push(RawTypeUsage::sz_array(instance));
    }

    (store, usages)
}

/// Benchmark resolving the whole definition table into a fresh model, then every usage
fn bench_cold_resolution(c: &mut Criterion) {
    let (store, usages) = synthetic_store();

    let mut group = c.benchmark_group("resolution_cold");
    group.throughput(Throughput::Elements(u64::from(DEFINITIONS)));
    group.bench_function("resolve_all", |b| {
        b.iter_batched(
            || TypeModel::new(store.clone()),
            |model| black_box(model.resolve_all()),
            BatchSize::SmallInput,
        );
    });
    group.bench_function("resolve_usages", |b| {
        b.iter_batched(
            || TypeModel::new(store.clone()),
            |model| {
                for usage in &usages {
                    black_box(model.resolve_usage(usage).unwrap());
                }
                model
            },
            BatchSize::SmallInput,
        );
    });
    group.finish();
}

/// Benchmark cache hits on a model that has already seen every type
fn bench_warm_resolution(c: &mut Criterion) {
    let (store, usages) = synthetic_store();
    let model = TypeModel::new(store);
    for usage in &usages {
        model.resolve_usage(usage).unwrap();
    }

    let mut group = c.benchmark_group("resolution_warm");
    group.throughput(Throughput::Elements(u64::from(DEFINITIONS)));
    group.bench_function("resolve_definition", |b| {
        b.iter(|| {
            for index in 1..=DEFINITIONS {
                black_box(model.resolve_definition(TypeDefIndex::new(index)).unwrap());
            }
        });
    });
    group.bench_function("resolve_usage", |b| {
        b.iter(|| {
            for usage in &usages {
                black_box(model.resolve_usage(black_box(usage)).unwrap());
            }
        });
    });
    group.bench_function("display_name", |b| {
        let ids: Vec<TypeId> = model.all_types();
        b.iter(|| {
            for id in &ids {
                black_box(model.display_name(*id).unwrap());
            }
        });
    });
    group.finish();
}

criterion_group!(benches, bench_cold_resolution, bench_warm_resolution);
criterion_main!(benches);
