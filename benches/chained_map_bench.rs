use chained_map::ChainedMap;
use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use std::time::Duration;

fn lcg(mut s: u64) -> impl Iterator<Item = u64> {
    std::iter::from_fn(move || {
        s = s.wrapping_mul(6364136223846793005).wrapping_add(1);
        Some(s)
    })
}

fn key(n: u64) -> String {
    format!("k{:016x}", n)
}

// Ten buckets and 1k keys: chains average ~100 entries.
fn bench_insert_default_buckets(c: &mut Criterion) {
    let keys: Vec<_> = lcg(1).take(1_000).map(key).collect();
    c.bench_function("chained_map_insert_1k_10_buckets", |b| {
        b.iter_batched(
            ChainedMap::new,
            |mut m| {
                for k in &keys {
                    m.insert(k, "v").unwrap();
                }
                black_box(m)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_insert_wide(c: &mut Criterion) {
    let keys: Vec<_> = lcg(3).take(10_000).map(key).collect();
    c.bench_function("chained_map_insert_10k_4096_buckets", |b| {
        b.iter_batched(
            || ChainedMap::with_bucket_count(4096).unwrap(),
            |mut m| {
                for k in &keys {
                    m.insert(k, "v").unwrap();
                }
                black_box(m)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_update(c: &mut Criterion) {
    c.bench_function("chained_map_update_existing", |b| {
        let mut m = ChainedMap::with_bucket_count(1024).unwrap();
        let keys: Vec<_> = lcg(5).take(1_000).map(key).collect();
        for k in &keys {
            m.insert(k, "initial").unwrap();
        }
        let mut it = keys.iter().cycle();
        b.iter(|| {
            let k = it.next().unwrap();
            m.insert(k, "updated").unwrap();
        })
    });
}

fn bench_get_hit(c: &mut Criterion) {
    c.bench_function("chained_map_get_hit", |b| {
        let mut m = ChainedMap::with_bucket_count(4096).unwrap();
        let keys: Vec<_> = lcg(7).take(20_000).map(key).collect();
        for k in &keys {
            m.insert(k, k).unwrap();
        }
        let mut it = keys.iter().cycle();
        b.iter(|| {
            let k = it.next().unwrap();
            black_box(m.get(k).unwrap());
        })
    });
}

fn bench_get_miss(c: &mut Criterion) {
    c.bench_function("chained_map_get_miss", |b| {
        let mut m = ChainedMap::with_bucket_count(4096).unwrap();
        for x in lcg(11).take(10_000) {
            m.insert(&key(x), "v").unwrap();
        }
        let mut miss = lcg(0xdead_beef);
        b.iter(|| {
            // generate keys unlikely in map
            let k = key(miss.next().unwrap());
            black_box(m.get(&k));
        })
    });
}

fn bench_destroy(c: &mut Criterion) {
    let keys: Vec<_> = lcg(13).take(10_000).map(key).collect();
    c.bench_function("chained_map_destroy_10k", |b| {
        b.iter_batched(
            || {
                let mut m = ChainedMap::with_bucket_count(1024).unwrap();
                for k in &keys {
                    m.insert(k, "v").unwrap();
                }
                m
            },
            |m| black_box(m.destroy()),
            BatchSize::LargeInput,
        )
    });
}

fn bench_config() -> Criterion {
    Criterion::default()
        .sample_size(50)
        .measurement_time(Duration::from_secs(8))
        .warm_up_time(Duration::from_secs(2))
}

criterion_group! {
    name = benches;
    config = bench_config();
    targets = bench_insert_default_buckets, bench_insert_wide, bench_update,
        bench_get_hit, bench_get_miss, bench_destroy
}
criterion_main!(benches);
