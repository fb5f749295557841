// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use criterion::{BenchmarkId, Criterion, Throughput};
use futures::StreamExt;
use rxlens_state::{Lens, Store, Transition};
use rxlens_test_utils::{state::app_state, test_channel};
use serde_json::json;
use std::hint::black_box;
use tokio::runtime::Runtime;

fn increment() -> Transition {
    let lens = Lens::new("counter");
    Transition::new(move |state| lens.over(state, |n| json!(n.as_i64().unwrap_or(0) + 1)))
}

pub fn bench_store_fold(c: &mut Criterion) {
    let mut group = c.benchmark_group("store_fold");

    for &transitions in &[10usize, 100, 1000] {
        group.throughput(Throughput::Elements(transitions as u64));
        let id = BenchmarkId::from_parameter(format!("transitions_{transitions}"));
        group.bench_with_input(id, &transitions, |bencher, &transitions| {
            let rt = Runtime::new().unwrap();
            bencher.iter(|| {
                rt.block_on(async {
                    let (tx, updates) = test_channel();
                    let store = Store::new(app_state(), updates);
                    let mut states = store.subscribe();

                    for _ in 0..transitions {
                        tx.send(increment()).unwrap();
                    }
                    drop(tx);

                    // Seed plus one state per transition
                    let mut seen = 0;
                    while let Some(state) = states.next().await {
                        black_box(state);
                        seen += 1;
                    }
                    assert_eq!(seen, transitions + 1);
                });
            });
        });
    }

    group.finish();
}

pub fn bench_view_fan_out(c: &mut Criterion) {
    let mut group = c.benchmark_group("view_fan_out");

    for &subscribers in &[1usize, 16, 128] {
        group.throughput(Throughput::Elements(subscribers as u64));
        let id = BenchmarkId::from_parameter(format!("subs_{subscribers}"));
        group.bench_with_input(id, &subscribers, |bencher, &subscribers| {
            let rt = Runtime::new().unwrap();
            bencher.iter(|| {
                rt.block_on(async {
                    let (tx, updates) = test_channel();
                    let store = Store::new(app_state(), updates);

                    let mut handles = Vec::with_capacity(subscribers);
                    for _ in 0..subscribers {
                        let mut counter = store.view("counter").to_stream();
                        handles.push(tokio::spawn(async move {
                            // Replayed seed, then the increment
                            black_box(counter.next().await);
                            black_box(counter.next().await);
                        }));
                    }

                    tx.send(increment()).unwrap();
                    for handle in handles {
                        let _ = handle.await;
                    }
                });
            });
        });
    }

    group.finish();
}
