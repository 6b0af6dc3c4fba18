use core::hash::BuildHasher;
use core::hash::Hash;
use core::hint::black_box;

use chain_hash::HashSet as ChainHashSet;
use criterion::AxisScale;
use criterion::BatchSize;
use criterion::Criterion;
use criterion::PlotConfiguration;
use criterion::Throughput;
use criterion::criterion_group;
use criterion::criterion_main;
use hashbrown::HashSet as HashbrownHashSet;
use rand::Rng;
use rand::SeedableRng;
use rand::TryRngCore;
use rand::rngs::OsRng;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand_distr::Distribution;
use rand_distr::Zipf;
use siphasher::sip::SipHasher;

#[derive(Clone, Copy)]
struct SipBuildHasher {
    k0: u64,
    k1: u64,
}

impl SipBuildHasher {
    fn random() -> Self {
        Self {
            k0: OsRng.try_next_u64().unwrap(),
            k1: OsRng.try_next_u64().unwrap(),
        }
    }
}

impl BuildHasher for SipBuildHasher {
    type Hasher = SipHasher;

    fn build_hasher(&self) -> Self::Hasher {
        SipHasher::new_with_keys(self.k0, self.k1)
    }
}

trait BenchItem: Clone + Hash + Eq {
    fn new(key: u64) -> Self;
}

#[derive(Clone, Hash, PartialEq, Eq)]
struct SmallTestItem {
    key: u64,
}

impl BenchItem for SmallTestItem {
    fn new(key: u64) -> Self {
        black_box(Self { key })
    }
}

#[derive(Clone, Hash, PartialEq, Eq)]
struct TestItem {
    key: String,
}

impl BenchItem for TestItem {
    fn new(key: u64) -> Self {
        black_box(Self {
            key: format!("key_{:016X}", key),
        })
    }
}

const SIZES: &[usize] = &[
    (1 << 8),
    (1 << 10),
    (1 << 12),
    (1 << 14),
    (1 << 16),
];

fn random_items<Item: BenchItem>(count: usize) -> Vec<Item> {
    let mut rng = OsRng;
    (0..count)
        .map(|_| Item::new(rng.try_next_u64().unwrap()))
        .collect()
}

fn bench_insert_random<Item: BenchItem, const MAX_SIZE: usize>(c: &mut Criterion) {
    let mut group = c.benchmark_group(format!(
        "insert_random_{}",
        core::any::type_name::<Item>()
    ));
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for &size in SIZES[..=MAX_SIZE].iter() {
        let items = random_items::<Item>(size);
        let hasher = SipBuildHasher::random();
        group.throughput(Throughput::Elements(size as u64));

        group.bench_function(format!("chain_hash/{size}"), |b| {
            b.iter_batched(
                || {
                    let mut items = items.clone();
                    items.shuffle(&mut SmallRng::from_os_rng());
                    items
                },
                |items| {
                    let mut set = ChainHashSet::with_hasher(hasher);
                    for item in items {
                        set.insert(item);
                    }
                    black_box(set)
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_function(format!("hashbrown/{size}"), |b| {
            b.iter_batched(
                || {
                    let mut items = items.clone();
                    items.shuffle(&mut SmallRng::from_os_rng());
                    items
                },
                |items| {
                    let mut set = HashbrownHashSet::with_hasher(hasher);
                    for item in items {
                        set.insert(item);
                    }
                    black_box(set)
                },
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

fn bench_find_hit_miss<Item: BenchItem, const MAX_SIZE: usize>(c: &mut Criterion) {
    let mut group = c.benchmark_group(format!(
        "find_hit_miss_{}",
        core::any::type_name::<Item>()
    ));
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for &size in SIZES[..=MAX_SIZE].iter() {
        let items = random_items::<Item>(size);
        let misses = random_items::<Item>(size);
        let hasher = SipBuildHasher::random();

        let mut chained = ChainHashSet::with_hasher(hasher);
        chained.extend(items.iter().cloned());
        let mut hashbrown = HashbrownHashSet::with_hasher(hasher);
        hashbrown.extend(items.iter().cloned());

        let mut probes = items.iter().chain(misses.iter()).cloned().collect::<Vec<_>>();
        probes.shuffle(&mut SmallRng::from_os_rng());

        group.throughput(Throughput::Elements(probes.len() as u64));
        group.bench_function(format!("chain_hash/{size}"), |b| {
            b.iter(|| {
                let mut hits = 0usize;
                for probe in &probes {
                    hits += chained.contains(probe) as usize;
                }
                black_box(hits)
            })
        });
        group.bench_function(format!("hashbrown/{size}"), |b| {
            b.iter(|| {
                let mut hits = 0usize;
                for probe in &probes {
                    hits += hashbrown.contains(probe) as usize;
                }
                black_box(hits)
            })
        });
    }

    group.finish();
}

fn bench_find_zipf<Item: BenchItem, const MAX_SIZE: usize>(c: &mut Criterion) {
    const LOOKUPS: usize = 4096;

    let mut group = c.benchmark_group(format!("find_zipf_{}", core::any::type_name::<Item>()));
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for &size in SIZES[..=MAX_SIZE].iter() {
        let items = random_items::<Item>(size);
        let hasher = SipBuildHasher::random();

        let mut chained = ChainHashSet::with_hasher(hasher);
        chained.extend(items.iter().cloned());
        let mut hashbrown = HashbrownHashSet::with_hasher(hasher);
        hashbrown.extend(items.iter().cloned());

        let distr = Zipf::new(size as f32, 1.0).unwrap();
        let mut rng = SmallRng::from_os_rng();
        let probes = (0..LOOKUPS)
            .map(|_| {
                let rank = distr.sample(&mut rng) as usize;
                items[rank.saturating_sub(1).min(size - 1)].clone()
            })
            .collect::<Vec<_>>();

        group.throughput(Throughput::Elements(LOOKUPS as u64));
        group.bench_function(format!("chain_hash/{size}"), |b| {
            b.iter(|| {
                for probe in &probes {
                    black_box(chained.contains(probe));
                }
            })
        });
        group.bench_function(format!("hashbrown/{size}"), |b| {
            b.iter(|| {
                for probe in &probes {
                    black_box(hashbrown.contains(probe));
                }
            })
        });
    }

    group.finish();
}

fn bench_insert_collisions(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert_collisions");

    for &size in SIZES[..=2].iter() {
        let mut rng = SmallRng::from_os_rng();
        let buckets = (size / 16).max(1) as u64;
        let hashes = (0..size)
            .map(|_| rng.random_range(0..buckets))
            .collect::<Vec<u64>>();

        group.throughput(Throughput::Elements(size as u64));
        group.bench_function(format!("chain_hash_raw/{size}"), |b| {
            b.iter(|| {
                let mut table = chain_hash::HashTable::new();
                for &hash in &hashes {
                    table.insert(hash, hash);
                }
                black_box(table)
            })
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_insert_random::<SmallTestItem, 4>,
    bench_insert_random::<TestItem, 4>,
    bench_find_hit_miss::<SmallTestItem, 4>,
    bench_find_hit_miss::<TestItem, 3>,
    bench_find_zipf::<SmallTestItem, 4>,
    bench_find_zipf::<TestItem, 3>,
    bench_insert_collisions,
);

criterion_main!(benches);
