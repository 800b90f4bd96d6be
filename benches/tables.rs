/* Benchmarks from `hashbrown` (https://github.com/rust-lang/hashbrown), adapted to compare
 * both prime-sized tables against `std::collections::HashMap`.
 *
 * Int key distribution: low bit heavy, top bit heavy, and random.
 * Task: insert, insert_erase, lookup, lookup_fail.
 */

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use primehash::{ChainedHashMap, OpenHashMap};
use std::collections::HashMap;

const SIZE: usize = 1000;

#[derive(Clone, Copy)]
struct RandomKeys {
    state: usize,
}

impl RandomKeys {
    fn new() -> Self {
        RandomKeys { state: 0 }
    }
}

impl Iterator for RandomKeys {
    type Item = usize;
    fn next(&mut self) -> Option<usize> {
        // Add 1 then multiply by some 32 bit prime.
        self.state = self.state.wrapping_add(1).wrapping_mul(3_787_392_781);
        Some(self.state)
    }
}

/// Lets `std`'s map be filled through the same `put` call as the tables.
trait Put {
    fn put(&mut self, key: usize, value: usize) -> Option<usize>;
}

impl Put for HashMap<usize, usize> {
    fn put(&mut self, key: usize, value: usize) -> Option<usize> {
        self.insert(key, value)
    }
}

macro_rules! bench_suite {
    ($bench_macro:ident, $bench_fn_name:ident, $group_name:expr $(,)?) => {
        fn $bench_fn_name(c: &mut Criterion) {
            let mut group = c.benchmark_group($group_name);
            group.throughput(Throughput::Elements(SIZE as u64));

            $bench_macro!(group, OpenHashMap<usize, usize>, 0.., "open/low");
            $bench_macro!(group, OpenHashMap<usize, usize>, (0..).map(usize::swap_bytes), "open/high");
            $bench_macro!(group, OpenHashMap<usize, usize>, RandomKeys::new(), "open/random");
            $bench_macro!(group, ChainedHashMap<usize, usize>, 0.., "chained/low");
            $bench_macro!(group, ChainedHashMap<usize, usize>, (0..).map(usize::swap_bytes), "chained/high");
            $bench_macro!(group, ChainedHashMap<usize, usize>, RandomKeys::new(), "chained/random");
            $bench_macro!(group, HashMap<usize, usize>, 0.., "std/low");
            $bench_macro!(group, HashMap<usize, usize>, (0..).map(usize::swap_bytes), "std/high");
            $bench_macro!(group, HashMap<usize, usize>, RandomKeys::new(), "std/random");

            group.finish();
        }
    };
}

macro_rules! bench_insert {
    ($group:ident, $table:ty, $keydist:expr, $bench_id:expr) => {
        $group.bench_function(BenchmarkId::from_parameter($bench_id), |b| {
            b.iter(|| {
                let mut map = <$table>::default();
                ($keydist).take(SIZE).for_each(|i| {
                    map.put(i, i);
                });
                black_box(&map);
            });
        });
    };
}

bench_suite!(bench_insert, insert, "insert");

macro_rules! bench_insert_erase {
    ($group:ident, $table:ty, $keydist:expr, $bench_id:expr) => {
        let mut base = <$table>::default();
        ($keydist).take(SIZE).for_each(|i| {
            base.put(i, i);
        });
        let skip = ($keydist).skip(SIZE);
        $group.bench_function(BenchmarkId::from_parameter($bench_id), |b| {
            b.iter(|| {
                let mut map = base.clone();
                let mut add_iter = skip.clone();
                let mut remove_iter = $keydist;
                // While keeping the size constant, replace the first keydist with the second.
                (&mut add_iter)
                    .zip(&mut remove_iter)
                    .take(SIZE)
                    .for_each(|(add, remove)| {
                        map.put(add, add);
                        black_box(map.remove(&remove));
                    });
                black_box(&map);
            });
        });
    };
}

bench_suite!(bench_insert_erase, insert_erase, "insert_erase");

macro_rules! bench_lookup {
    ($group:ident, $table:ty, $keydist:expr, $bench_id:expr) => {
        let mut map = <$table>::default();
        ($keydist).take(SIZE).for_each(|i| {
            map.put(i, i);
        });
        $group.bench_function(BenchmarkId::from_parameter($bench_id), |b| {
            b.iter(|| {
                ($keydist).take(SIZE).for_each(|i| {
                    black_box(map.get(&i));
                });
            });
        });
    };
}

bench_suite!(bench_lookup, lookup, "lookup");

macro_rules! bench_lookup_fail {
    ($group:ident, $table:ty, $keydist:expr, $bench_id:expr) => {
        let mut map = <$table>::default();
        let mut iter = $keydist;
        (&mut iter).take(SIZE).for_each(|i| {
            map.put(i, i);
        });
        $group.bench_function(BenchmarkId::from_parameter($bench_id), |b| {
            b.iter(|| {
                (&mut iter.clone()).take(SIZE).for_each(|i| {
                    black_box(map.get(&i));
                });
            });
        });
    };
}

bench_suite!(bench_lookup_fail, lookup_fail, "lookup_fail");

criterion_group!(benches, insert, insert_erase, lookup, lookup_fail);
criterion_main!(benches);
